use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use msgpack_view::{Msgpack, from_slice, skip_value};
use serde::Deserialize;

// A map of `width` entries "k0".."k{width-1}", each holding
// {"id": i, "name": "item", "scores": [1, 2, 3, 4]}.
fn create_document(width: usize) -> Vec<u8> {
    let mut data = vec![0xde];
    data.extend_from_slice(&(width as u16).to_be_bytes());
    for i in 0..width {
        let key = format!("k{i}");
        data.push(0xa0 | key.len() as u8);
        data.extend_from_slice(key.as_bytes());

        data.push(0x83);
        data.extend_from_slice(&[0xa2, b'i', b'd', 0xcd]);
        data.extend_from_slice(&(i as u16).to_be_bytes());
        data.extend_from_slice(&[0xa4, b'n', b'a', b'm', b'e', 0xa4, b'i', b't', b'e', b'm']);
        data.extend_from_slice(&[0xa6, b's', b'c', b'o', b'r', b'e', b's', 0x94, 1, 2, 3, 4]);
    }
    data
}

#[derive(Deserialize)]
#[allow(dead_code)]
struct Item<'a> {
    id: u16,
    name: &'a str,
    scores: Vec<u8>,
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    for width in [16usize, 256, 4096] {
        let data = create_document(width);
        let last = format!("k{}", width - 1);
        group.throughput(Throughput::Bytes(data.len() as u64));

        group.bench_with_input(BenchmarkId::new("last_key", width), &data, |b, data| {
            b.iter(|| {
                let doc = Msgpack::new(black_box(data));
                doc.child(last.as_str()).unwrap().unwrap().as_int("id").unwrap()
            })
        });

        group.bench_with_input(BenchmarkId::new("skip_root", width), &data, |b, data| {
            b.iter(|| skip_value(black_box(data), 0).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("serde_full", width), &data, |b, data| {
            b.iter(|| {
                from_slice::<std::collections::HashMap<&str, Item>>(black_box(data)).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lookup);
criterion_main!(benches);
