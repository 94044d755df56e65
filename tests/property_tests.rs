use msgpack_view::{Error, Msgpack, decode_value, skip_value};
use proptest::prelude::*;

// ==================== Test Encoder ====================

#[derive(Debug, Clone)]
enum Node {
    Nil,
    Bool(bool),
    UInt(u64),
    Int(i64),
    Float(f64),
    Float32(f32),
    Str(String),
    Bin(Vec<u8>),
    Ext(i8, Vec<u8>),
    Array(Vec<Node>),
    Map(Vec<(String, Node)>),
    AnyKeyMap(Vec<(Node, Node)>),
}

fn encode_len(out: &mut Vec<u8>, len: usize, tags: [u8; 3]) {
    if len <= u8::MAX as usize && tags[0] != 0 {
        out.push(tags[0]);
        out.push(len as u8);
    } else if len <= u16::MAX as usize {
        out.push(tags[1]);
        out.extend_from_slice(&(len as u16).to_be_bytes());
    } else {
        out.push(tags[2]);
        out.extend_from_slice(&(len as u32).to_be_bytes());
    }
}

fn encode(node: &Node, out: &mut Vec<u8>) {
    match node {
        Node::Nil => out.push(0xc0),
        Node::Bool(value) => out.push(if *value { 0xc3 } else { 0xc2 }),
        Node::UInt(value) => match *value {
            0..=0x7f => out.push(*value as u8),
            0x80..=0xff => out.extend_from_slice(&[0xcc, *value as u8]),
            0x100..=0xffff => {
                out.push(0xcd);
                out.extend_from_slice(&(*value as u16).to_be_bytes());
            }
            0x1_0000..=0xffff_ffff => {
                out.push(0xce);
                out.extend_from_slice(&(*value as u32).to_be_bytes());
            }
            _ => {
                out.push(0xcf);
                out.extend_from_slice(&value.to_be_bytes());
            }
        },
        Node::Int(value) => {
            let value = *value;
            if value >= -32 {
                out.push(value as i8 as u8);
            } else if value >= i8::MIN as i64 {
                out.extend_from_slice(&[0xd0, value as i8 as u8]);
            } else if value >= i16::MIN as i64 {
                out.push(0xd1);
                out.extend_from_slice(&(value as i16).to_be_bytes());
            } else if value >= i32::MIN as i64 {
                out.push(0xd2);
                out.extend_from_slice(&(value as i32).to_be_bytes());
            } else {
                out.push(0xd3);
                out.extend_from_slice(&value.to_be_bytes());
            }
        }
        Node::Float(value) => {
            out.push(0xcb);
            out.extend_from_slice(&value.to_be_bytes());
        }
        Node::Float32(value) => {
            out.push(0xca);
            out.extend_from_slice(&value.to_be_bytes());
        }
        Node::Str(value) => {
            if value.len() < 32 {
                out.push(0xa0 | value.len() as u8);
            } else {
                encode_len(out, value.len(), [0xd9, 0xda, 0xdb]);
            }
            out.extend_from_slice(value.as_bytes());
        }
        Node::Bin(value) => {
            encode_len(out, value.len(), [0xc4, 0xc5, 0xc6]);
            out.extend_from_slice(value);
        }
        Node::Ext(type_code, payload) => {
            match payload.len() {
                1 => out.push(0xd4),
                2 => out.push(0xd5),
                4 => out.push(0xd6),
                8 => out.push(0xd7),
                16 => out.push(0xd8),
                len => encode_len(out, len, [0xc7, 0xc8, 0xc9]),
            }
            out.push(*type_code as u8);
            out.extend_from_slice(payload);
        }
        Node::Array(items) => {
            if items.len() < 16 {
                out.push(0x90 | items.len() as u8);
            } else {
                encode_len(out, items.len(), [0, 0xdc, 0xdd]);
            }
            for item in items {
                encode(item, out);
            }
        }
        Node::Map(entries) => {
            if entries.len() < 16 {
                out.push(0x80 | entries.len() as u8);
            } else {
                encode_len(out, entries.len(), [0, 0xde, 0xdf]);
            }
            for (key, value) in entries {
                encode(&Node::Str(key.clone()), out);
                encode(value, out);
            }
        }
        Node::AnyKeyMap(entries) => {
            if entries.len() < 16 {
                out.push(0x80 | entries.len() as u8);
            } else {
                encode_len(out, entries.len(), [0, 0xde, 0xdf]);
            }
            for (key, value) in entries {
                encode(key, out);
                encode(value, out);
            }
        }
    }
}

fn to_bytes(node: &Node) -> Vec<u8> {
    let mut out = Vec::new();
    encode(node, &mut out);
    out
}

fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        Just(Node::Nil),
        any::<bool>().prop_map(Node::Bool),
        any::<u64>().prop_map(Node::UInt),
        (i64::MIN..0i64).prop_map(Node::Int),
        any::<f64>().prop_map(Node::Float),
        any::<f32>().prop_map(Node::Float32),
        "[a-z]{0,40}".prop_map(Node::Str),
        prop::collection::vec(any::<u8>(), 0..300).prop_map(Node::Bin),
        (any::<i8>(), prop::collection::vec(any::<u8>(), 0..20))
            .prop_map(|(type_code, payload)| Node::Ext(type_code, payload)),
    ];

    leaf.prop_recursive(4, 64, 20, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..20).prop_map(Node::Array),
            prop::collection::vec(("[a-c]{1,2}", inner.clone()), 0..20).prop_map(Node::Map),
            prop::collection::vec((inner.clone(), inner), 0..20).prop_map(Node::AnyKeyMap),
        ]
    })
}

// ==================== Properties ====================

proptest! {
    #[test]
    fn prop_skip_agrees_with_decode(node in arb_node()) {
        let data = to_bytes(&node);
        let (consumed, _) = decode_value(&data, 0).unwrap();
        prop_assert_eq!(consumed, data.len());
        prop_assert_eq!(skip_value(&data, 0).unwrap(), data.len());
    }

    #[test]
    fn prop_array_elements_are_located(items in prop::collection::vec(arb_node(), 0..24)) {
        let data = to_bytes(&Node::Array(items.clone()));
        let doc = Msgpack::new(&data);

        for (index, item) in items.iter().enumerate() {
            let expected = to_bytes(item);
            let child = doc.child(index).unwrap().unwrap();
            prop_assert_eq!(child.as_encoded().unwrap(), expected.as_slice());
        }
        prop_assert_eq!(doc.get(items.len()).unwrap(), None);
    }

    #[test]
    fn prop_map_lookup_finds_first_key(entries in prop::collection::vec(("[a-c]{1,2}", arb_node()), 0..24)) {
        let data = to_bytes(&Node::Map(entries.clone()));
        let doc = Msgpack::new(&data);

        for (key, _) in &entries {
            let (_, first) = entries.iter().find(|(k, _)| k == key).unwrap();
            let expected = to_bytes(first);
            let child = doc.child(key.as_str()).unwrap().unwrap();
            prop_assert_eq!(child.as_encoded().unwrap(), expected.as_slice());
        }
        prop_assert_eq!(doc.get("zz").unwrap(), None);
        prop_assert_eq!(doc.at("zz"), Err(Error::KeyNotFound));
    }

    #[test]
    fn prop_map_lookup_skips_non_string_keys(entries in prop::collection::vec((arb_node(), arb_node()), 0..16)) {
        let data = to_bytes(&Node::AnyKeyMap(entries.clone()));
        let doc = Msgpack::new(&data);

        for (key, _) in &entries {
            if let Node::Str(key) = key {
                let (_, first) = entries
                    .iter()
                    .find(|(k, _)| matches!(k, Node::Str(s) if s == key))
                    .unwrap();
                let expected = to_bytes(first);
                let child = doc.child(key.as_str()).unwrap().unwrap();
                prop_assert_eq!(child.as_encoded().unwrap(), expected.as_slice());
            }
        }
    }

    #[test]
    fn prop_prefixes_are_truncated(node in arb_node()) {
        let data = to_bytes(&node);
        for cut in 0..data.len() {
            let is_truncated = matches!(skip_value(&data[..cut], 0), Err(Error::Truncated { .. }));
            prop_assert!(is_truncated, "cut {}", cut);
        }
    }

    #[test]
    fn prop_arbitrary_bytes_never_panic(data in prop::collection::vec(any::<u8>(), 0..64)) {
        let skipped = skip_value(&data, 0).ok();
        let decoded = decode_value(&data, 0).ok().map(|(consumed, _)| consumed);
        prop_assert_eq!(skipped, decoded);

        let doc = Msgpack::new(&data);
        let _ = doc.get("a");
        let _ = doc.get(0);
        let _ = doc.as_encoded();
    }
}
