use msgpack_view::{Error, Msgpack, decode_value, skip_value};

// ==================== Helper Functions ====================

// {"id": 1234, "tags": ["x", bin[0xff]], "meta": {"ok": true, "v": -1.0f32},
//  "ext": ext8(5, [1, 2]), "s16": str16 of 300 'a'}
fn create_document() -> Vec<u8> {
    let mut data = vec![0x85];
    data.extend_from_slice(&[0xa2, b'i', b'd', 0xcd, 0x04, 0xd2]);
    data.extend_from_slice(&[0xa4, b't', b'a', b'g', b's', 0x92, 0xa1, b'x', 0xc4, 0x01, 0xff]);
    data.extend_from_slice(&[0xa4, b'm', b'e', b't', b'a', 0x82, 0xa2, b'o', b'k', 0xc3]);
    data.extend_from_slice(&[0xa1, b'v', 0xca]);
    data.extend_from_slice(&(-1.0f32).to_be_bytes());
    data.extend_from_slice(&[0xa3, b'e', b'x', b't', 0xc7, 0x02, 0x05, 0x01, 0x02]);
    data.extend_from_slice(&[0xa3, b's', b'1', b'6', 0xda, 0x01, 0x2c]);
    data.extend(std::iter::repeat_n(b'a', 300));
    data
}

// ==================== Truncation ====================

#[test]
fn test_document_is_well_formed() {
    let data = create_document();
    assert_eq!(skip_value(&data, 0).unwrap(), data.len());

    let doc = Msgpack::new(&data);
    assert_eq!(doc.as_uint("id").unwrap(), Some(1234));
    assert_eq!(doc.child("meta").unwrap().unwrap().as_float("v").unwrap(), Some(-1.0));
    assert_eq!(doc.as_ext("ext").unwrap().unwrap().as_bytes(), &[1, 2]);
    assert_eq!(doc.as_string("s16").unwrap().map(str::len), Some(300));
}

#[test]
fn test_every_prefix_is_truncated() {
    let data = create_document();

    for cut in 0..data.len() {
        let prefix = &data[..cut];
        assert!(
            matches!(skip_value(prefix, 0), Err(Error::Truncated { .. })),
            "skip at cut {cut}"
        );
        assert!(
            matches!(decode_value(prefix, 0), Err(Error::Truncated { .. })),
            "decode at cut {cut}"
        );
    }
}

#[test]
fn test_every_prefix_lookup_never_panics() {
    let data = create_document();

    for cut in 0..data.len() {
        let doc = Msgpack::new(&data[..cut]);
        let _ = doc.get("id");
        let _ = doc.at("s16");
        let _ = doc.as_string("s16");
        let _ = doc.child("tags").map(|tags| tags.map(|t| t.get(1)));
        let _ = doc.as_encoded();
    }
}

#[test]
fn test_truncation_reports_position() {
    // uint32 with two of four payload bytes
    let data = [0xce, 0x00, 0x01];
    assert_eq!(
        decode_value(&data, 0),
        Err(Error::Truncated {
            offset: 1,
            needed: 4,
            len: 3
        })
    );
}

#[test]
fn test_truncated_length_field() {
    // str16 with one of two length bytes
    let data = [0xda, 0x01];
    assert!(matches!(
        skip_value(&data, 0),
        Err(Error::Truncated { offset: 1, .. })
    ));
}

// ==================== Reserved Tag ====================

#[test]
fn test_reserved_tag_at_root() {
    let doc = Msgpack::new(&[0xc1u8]);
    assert_eq!(doc.value(), Err(Error::InvalidFormat(0xc1)));
    assert_eq!(doc.get("a"), Err(Error::InvalidFormat(0xc1)));
}

#[test]
fn test_reserved_tag_inside_map_value() {
    // {"a": 0xc1}
    let data = [0x81, 0xa1, b'a', 0xc1];
    assert_eq!(skip_value(&data, 0), Err(Error::InvalidFormat(0xc1)));
    assert_eq!(Msgpack::new(&data).get("a"), Err(Error::InvalidFormat(0xc1)));
}

#[test]
fn test_reserved_tag_as_map_key() {
    // {0xc1: 1, "a": 2}
    let data = [0x82, 0xc1, 0x01, 0xa1, b'a', 0x02];
    assert_eq!(skip_value(&data, 0), Err(Error::InvalidFormat(0xc1)));
}

// ==================== Error Display ====================

#[test]
fn test_error_messages() {
    let err = Error::Truncated {
        offset: 3,
        needed: 4,
        len: 5,
    };
    assert!(err.to_string().contains('3'));
    assert!(Error::InvalidFormat(0xc1).to_string().contains("0xc1"));
    assert!(
        Error::TypeMismatch {
            expected: "str",
            found: "map"
        }
        .to_string()
        .contains("map")
    );

    let boxed: Box<dyn std::error::Error> = Box::new(Error::KeyNotFound);
    assert!(!boxed.to_string().is_empty());
}
