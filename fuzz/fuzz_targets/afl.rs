fn main() {
    afl::fuzz!(|data: &[u8]| {
        msgpack_view_fuzz::test(data);
    });
}
