use honggfuzz::fuzz;

fn main() {
    loop {
        fuzz!(|data: &[u8]| {
            msgpack_view_fuzz::test(data);
        });
    }
}
