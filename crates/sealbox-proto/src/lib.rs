//! Wire format for encrypted transaction payloads exchanged between relay
//! nodes.
//!
//! A payload carries the sender's public key, the encrypted transaction
//! body, two nonces, and one encrypted key box per recipient. Nodes that
//! forward or persist a transaction on behalf of several recipients also
//! append the list of recipient public keys, positionally matched to the
//! boxes.
//!
//! Every node must agree on this layout byte-for-byte, so the format is
//! deliberately small: each opaque byte sequence is written as an 8-byte
//! big-endian length followed by the bytes, and each sequence of them as an
//! 8-byte big-endian count followed by the elements.
//!
//! ```text
//! Payload               := Field(sender_key) Field(cipher_text) Field(cipher_text_nonce)
//!                          Array(recipient_boxes) Field(recipient_nonce)
//! PayloadWithRecipients := Payload Array(recipient_keys)
//! Field(x)              := u64be(len(x)) x
//! Array(xs)             := u64be(len(xs)) Field(xs[0]) .. Field(xs[n-1])
//! ```
//!
//! # Recipient scoping
//!
//! [`decode_payload_for_recipient`] reduces a multi-recipient payload to the
//! single box addressed to one recipient. A node persisting or forwarding a
//! transaction for a recipient must go through this path so it never keeps
//! boxes addressed to anyone else.
//!
//! # Security
//!
//! Decoding never allocates based on an unchecked length or count: every
//! declared size is compared against the bytes actually remaining before
//! any buffer is reserved. Truncated or overrunning input is rejected with
//! [`CodecError::MalformedPayload`] and no partial structure is returned.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod array;
pub mod codec;
pub mod config;
pub mod cursor;
pub mod errors;
pub mod field;
pub mod filter;
pub mod keys;
pub mod payload;

pub use codec::{PayloadCodec, PlainCodec, RecipientCodec};
pub use config::{CodecConfig, EmptyRecipientPolicy};
pub use cursor::Cursor;
pub use errors::{CodecError, Malformed, Result};
pub use filter::scope_to_recipient;
pub use keys::{Nonce, PublicKey};
pub use payload::{EncodedPayload, EncodedPayloadWithRecipients};

use bytes::Bytes;

/// Encode a payload with the default configuration.
pub fn encode_payload(payload: &EncodedPayload) -> Bytes {
    PlainCodec::default().encode(payload)
}

/// Decode a payload with the default configuration.
pub fn decode_payload(bytes: &[u8]) -> Result<EncodedPayload> {
    PlainCodec::default().decode(bytes)
}

/// Encode a payload together with its recipient key list.
pub fn encode_payload_with_recipients(payload: &EncodedPayloadWithRecipients) -> Bytes {
    RecipientCodec::default().encode(payload)
}

/// Decode a payload together with its recipient key list.
pub fn decode_payload_with_recipients(bytes: &[u8]) -> Result<EncodedPayloadWithRecipients> {
    RecipientCodec::default().decode(bytes)
}

/// Decode a multi-recipient payload and scope it to `recipient`.
///
/// See [`RecipientCodec::decode_for_recipient`].
pub fn decode_payload_for_recipient(
    bytes: &[u8],
    recipient: &PublicKey,
) -> Result<EncodedPayloadWithRecipients> {
    RecipientCodec::default().decode_for_recipient(bytes, recipient)
}
