//! Walks a small telemetry record with chained lookups, then deserializes
//! one nested part of it with serde.
//!
//! Run with `cargo run --example nested_access`.

use msgpack_view::{Msgpack, Result, Value};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct Reading<'a> {
    sensor: &'a str,
    celsius: f64,
}

// {"device": "gw-7", "uptime": 86400, "readings": [
//     {"sensor": "intake", "celsius": 21.5},
//     {"sensor": "exhaust", "celsius": 38.25}]}
fn record() -> Vec<u8> {
    let mut data = vec![0x83];
    data.extend_from_slice(&[0xa6, b'd', b'e', b'v', b'i', b'c', b'e']);
    data.extend_from_slice(&[0xa4, b'g', b'w', b'-', b'7']);
    data.extend_from_slice(&[0xa6, b'u', b'p', b't', b'i', b'm', b'e', 0xce]);
    data.extend_from_slice(&86400u32.to_be_bytes());
    data.extend_from_slice(&[0xa8, b'r', b'e', b'a', b'd', b'i', b'n', b'g', b's', 0x92]);
    for (sensor, celsius) in [("intake", 21.5f64), ("exhaust", 38.25)] {
        data.extend_from_slice(&[0x82, 0xa6, b's', b'e', b'n', b's', b'o', b'r']);
        data.push(0xa0 | sensor.len() as u8);
        data.extend_from_slice(sensor.as_bytes());
        data.extend_from_slice(&[0xa7, b'c', b'e', b'l', b's', b'i', b'u', b's', 0xcb]);
        data.extend_from_slice(&celsius.to_be_bytes());
    }
    data
}

fn main() -> Result<()> {
    let data = record();
    let doc = Msgpack::new(&data);

    println!("device: {:?}", doc.as_string("device")?);
    println!("uptime: {:?}", doc.as_uint("uptime")?);

    if let Some(readings) = doc.child("readings")? {
        for index in 0..readings.value()?.as_array().map_or(0, |a| a.len()) {
            let Some(reading) = readings.child(index)? else {
                continue;
            };
            println!(
                "  {} = {:?}",
                reading.as_string("sensor")?.unwrap_or("?"),
                reading.as_float("celsius")?
            );
        }

        let last: Reading = readings.at(1).and_then(msgpack_view::from_value)?;
        println!("last reading: {last:?}");
    }

    match doc.get("firmware")? {
        Some(Value::Str(version)) => println!("firmware: {}", version.to_str()?),
        Some(other) => println!("firmware has unexpected type {:?}", other.family()),
        None => println!("firmware: unknown"),
    }

    Ok(())
}
