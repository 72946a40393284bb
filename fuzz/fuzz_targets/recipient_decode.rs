//! Random-input fuzzer for recipient-carrying payloads and scoping.
//!
//! Uses the first 32 bytes as a candidate recipient key and the rest as the
//! wire input. Scoping must either fail cleanly or return a view without
//! recipient keys, holding a single box whenever the input carried keys.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sealbox_proto::{CodecError, Cursor, PayloadCodec, PublicKey, RecipientCodec};

fuzz_target!(|data: &[u8]| {
    if data.len() < 32 {
        return;
    }
    let (key, wire) = data.split_at(32);
    let recipient = PublicKey::from(key);
    let codec = RecipientCodec::default();

    let decoded = codec.decode_from(Cursor::new(wire));
    if let Ok((value, next)) = &decoded {
        assert_eq!(&codec.encode(value)[..], &wire[..next.offset()]);
    }
    let carried_keys = matches!(&decoded, Ok((value, _)) if !value.is_scoped());

    match codec.decode_for_recipient(wire, &recipient) {
        Ok(scoped) if scoped.is_scoped() => {
            if carried_keys {
                assert_eq!(scoped.payload.recipient_boxes.len(), 1);
            }
        },
        Ok(_) => panic!("scoped view still carries recipient keys"),
        Err(CodecError::MalformedPayload(_) | CodecError::InvalidRecipient { .. }) => {},
    }
});
