use bytes::Bytes;
use msgpack_view::{Msgpack, Value, decode_value, from_slice, read_shared, skip_value};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Record<'a> {
    #[serde(default)]
    id: i64,
    #[serde(default)]
    name: &'a str,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    nested: Option<Box<Record<'a>>>,
    #[serde(default)]
    attrs: HashMap<String, f64>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
enum Command {
    Stop,
    Move(i32, i32),
    Rename { from: String, to: String },
}

pub fn test_serde(data: &[u8]) {
    let _ = from_slice::<Record>(data);
    let _ = from_slice::<Command>(data);
    let _ = from_slice::<Vec<Option<u32>>>(data);
    let _ = from_slice::<HashMap<&str, (i8, &[u8])>>(data);
}

// Walks every reachable value, checking that decode and skip agree.
fn walk(value: Value<'_>, depth: usize) {
    if depth > 64 {
        return;
    }
    match value {
        Value::Array(array) => {
            for item in array.iter().flatten() {
                walk(item, depth + 1);
            }
        }
        Value::Map(map) => {
            for (key, item) in map.iter().flatten() {
                if let Some(key) = key.as_str() {
                    assert!(map.get(key).unwrap().is_some());
                }
                walk(item, depth + 1);
            }
        }
        Value::Str(s) => {
            let _ = s.to_str();
        }
        _ => {}
    }
}

pub fn test_direct(data: &[u8]) {
    let skipped = skip_value(data, 0);
    match decode_value(data, 0) {
        Ok((consumed, value)) => {
            assert_eq!(skipped, Ok(consumed));
            walk(value, 0);
        }
        Err(_) => assert!(skipped.is_err()),
    }

    let doc = Msgpack::new(data);
    let _ = doc.get(0);
    let _ = doc.at("id");
    let _ = doc.as_string("name");
    let _ = doc.child("nested").map(|nested| nested.map(|n| n.as_encoded()));

    if let Ok(shared) = read_shared(Bytes::copy_from_slice(data)) {
        let _ = shared.to_bytes();
        let _ = shared.child(1);
    }
}

pub fn test(data: &[u8]) {
    test_serde(data);
    test_direct(data);
}
