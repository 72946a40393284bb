//! Random-input fuzzer for plain payload decoding.
//!
//! Decoding arbitrary bytes must never panic or over-allocate. Anything that
//! does decode must re-encode to exactly the bytes the decoder consumed.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sealbox_proto::{Cursor, PayloadCodec, PlainCodec};

fuzz_target!(|data: &[u8]| {
    let codec = PlainCodec::default();

    if let Ok((payload, next)) = codec.decode_from(Cursor::new(data)) {
        let wire = codec.encode(&payload);
        assert_eq!(&wire[..], &data[..next.offset()]);
    }
});
