//! Recipient scoping.
//!
//! A node that stores or forwards a transaction for one recipient must keep
//! only that recipient's box. [`scope_to_recipient`] is the single place that
//! reduction happens, independent of the encryption scheme.

use crate::{
    CodecError, EmptyRecipientPolicy, EncodedPayloadWithRecipients, PublicKey,
    errors::{Malformed, Result},
};

/// Reduce a decoded multi-recipient payload to the view of `recipient`.
///
/// - Keys present and `recipient` among them at index `i`: the result holds
///   only box `i`, the other payload fields unchanged, and no keys.
/// - Keys present without `recipient`: [`CodecError::InvalidRecipient`].
/// - No keys: governed by `policy`. [`EmptyRecipientPolicy::PassThrough`]
///   returns the payload unchanged, [`EmptyRecipientPolicy::Reject`] fails
///   with [`CodecError::InvalidRecipient`].
///
/// If the same key appears twice, the first position wins.
///
/// # Errors
///
/// Returns [`Malformed::RecipientCountMismatch`] if a non-empty key list
/// does not line up with the boxes. Decoded values never hit this; it guards
/// values built by hand.
pub fn scope_to_recipient(
    value: &EncodedPayloadWithRecipients,
    recipient: &PublicKey,
    policy: EmptyRecipientPolicy,
) -> Result<EncodedPayloadWithRecipients> {
    if value.is_scoped() {
        return match policy {
            EmptyRecipientPolicy::PassThrough => Ok(value.clone()),
            EmptyRecipientPolicy::Reject => Err(invalid(recipient)),
        };
    }

    if !value.is_consistent() {
        return Err(Malformed::RecipientCountMismatch {
            keys: value.recipient_keys.len(),
            boxes: value.payload.recipient_boxes.len(),
        }
        .into());
    }

    let index = value.recipient_index(recipient).ok_or_else(|| invalid(recipient))?;
    let recipient_box = value.payload.recipient_boxes[index].clone();

    Ok(EncodedPayloadWithRecipients::scoped(value.payload.with_single_box(recipient_box)))
}

fn invalid(recipient: &PublicKey) -> CodecError {
    CodecError::InvalidRecipient { recipient: recipient.clone() }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::{EncodedPayload, Nonce};

    fn key(byte: u8) -> PublicKey {
        PublicKey::from(vec![byte; 32])
    }

    fn three_recipients() -> EncodedPayloadWithRecipients {
        EncodedPayloadWithRecipients::new(
            EncodedPayload {
                sender_key: key(0x5e),
                cipher_text: Bytes::from_static(b"sealed transaction"),
                cipher_text_nonce: Nonce::from(vec![0x11; 24]),
                recipient_boxes: vec![
                    Bytes::from_static(b"box-a"),
                    Bytes::from_static(b"box-b"),
                    Bytes::from_static(b"box-c"),
                ],
                recipient_nonce: Nonce::from(vec![0x22; 24]),
            },
            vec![key(0xa), key(0xb), key(0xc)],
        )
    }

    #[test]
    fn keeps_only_the_target_box() {
        let original = three_recipients();
        let scoped =
            scope_to_recipient(&original, &key(0xb), EmptyRecipientPolicy::default()).unwrap();

        assert_eq!(scoped.payload.recipient_boxes, vec![Bytes::from_static(b"box-b")]);
        assert!(scoped.recipient_keys.is_empty());
        assert_eq!(scoped.payload.sender_key, original.payload.sender_key);
        assert_eq!(scoped.payload.cipher_text, original.payload.cipher_text);
        assert_eq!(scoped.payload.cipher_text_nonce, original.payload.cipher_text_nonce);
        assert_eq!(scoped.payload.recipient_nonce, original.payload.recipient_nonce);
    }

    #[test]
    fn first_and_last_positions() {
        let original = three_recipients();

        let first = scope_to_recipient(&original, &key(0xa), EmptyRecipientPolicy::default());
        let last = scope_to_recipient(&original, &key(0xc), EmptyRecipientPolicy::default());

        assert_eq!(first.unwrap().payload.recipient_boxes, vec![Bytes::from_static(b"box-a")]);
        assert_eq!(last.unwrap().payload.recipient_boxes, vec![Bytes::from_static(b"box-c")]);
    }

    #[test]
    fn reject_non_recipient() {
        let result =
            scope_to_recipient(&three_recipients(), &key(0xd), EmptyRecipientPolicy::default());
        assert_eq!(result, Err(CodecError::InvalidRecipient { recipient: key(0xd) }));
    }

    #[test]
    fn reject_non_recipient_regardless_of_policy() {
        let result =
            scope_to_recipient(&three_recipients(), &key(0xd), EmptyRecipientPolicy::PassThrough);
        assert!(matches!(result, Err(CodecError::InvalidRecipient { .. })));
    }

    #[test]
    fn duplicate_key_uses_first_position() {
        let mut value = three_recipients();
        value.recipient_keys = vec![key(0xa), key(0xb), key(0xb)];

        let scoped = scope_to_recipient(&value, &key(0xb), EmptyRecipientPolicy::default());
        assert_eq!(scoped.unwrap().payload.recipient_boxes, vec![Bytes::from_static(b"box-b")]);
    }

    #[test]
    fn empty_keys_pass_through() {
        let mut value = three_recipients();
        value.recipient_keys.clear();

        let result = scope_to_recipient(&value, &key(0xd), EmptyRecipientPolicy::PassThrough);
        assert_eq!(result, Ok(value));
    }

    #[test]
    fn empty_keys_rejected_by_policy() {
        let mut value = three_recipients();
        value.recipient_keys.clear();

        let result = scope_to_recipient(&value, &key(0xa), EmptyRecipientPolicy::Reject);
        assert_eq!(result, Err(CodecError::InvalidRecipient { recipient: key(0xa) }));
    }

    #[test]
    fn reject_misaligned_keys() {
        let mut value = three_recipients();
        value.recipient_keys.truncate(2);

        let result = scope_to_recipient(&value, &key(0xa), EmptyRecipientPolicy::default());
        assert_eq!(
            result,
            Err(CodecError::MalformedPayload(Malformed::RecipientCountMismatch {
                keys: 2,
                boxes: 3
            }))
        );
    }

    #[test]
    fn input_is_not_modified() {
        let original = three_recipients();
        let copy = original.clone();

        let _ = scope_to_recipient(&original, &key(0xa), EmptyRecipientPolicy::default());
        assert_eq!(original, copy);
    }
}
