//! Payload value types.
//!
//! Both types are immutable values: they are built once, by a decoder or by
//! the caller before encoding, and transformations such as recipient scoping
//! return a new value.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{Nonce, PublicKey};

/// Encrypted core of a transaction.
///
/// Wire order is fixed: sender key, cipher text, cipher text nonce,
/// recipient boxes, recipient nonce.
///
/// # Invariants
///
/// - `recipient_boxes.len()` is the number of recipients this value
///   describes. Zero-length boxes are carried as-is; the codec does not
///   judge their meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedPayload {
    /// Sender's public key
    pub sender_key: PublicKey,

    /// Encrypted transaction body
    pub cipher_text: Bytes,

    /// Nonce used to encrypt `cipher_text`
    pub cipher_text_nonce: Nonce,

    /// One encrypted key box per recipient
    pub recipient_boxes: Vec<Bytes>,

    /// Nonce used to seal the recipient boxes
    pub recipient_nonce: Nonce,
}

impl EncodedPayload {
    /// Copy of this payload carrying only `recipient_box`.
    pub fn with_single_box(&self, recipient_box: Bytes) -> Self {
        Self {
            sender_key: self.sender_key.clone(),
            cipher_text: self.cipher_text.clone(),
            cipher_text_nonce: self.cipher_text_nonce.clone(),
            recipient_boxes: vec![recipient_box],
            recipient_nonce: self.recipient_nonce.clone(),
        }
    }
}

/// Payload paired with the public keys of its recipients.
///
/// # Invariants
///
/// - When `recipient_keys` is non-empty it has one key per box, and the key
///   at index `i` owns the box at index `i`.
/// - When `recipient_keys` is empty the payload is already scoped to a single
///   implicit recipient and no key list goes on the wire beyond a zero count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedPayloadWithRecipients {
    /// The encrypted payload
    pub payload: EncodedPayload,

    /// Recipient keys, positionally matched to `payload.recipient_boxes`
    pub recipient_keys: Vec<PublicKey>,
}

impl EncodedPayloadWithRecipients {
    /// Pair a payload with its recipient keys.
    pub fn new(payload: EncodedPayload, recipient_keys: Vec<PublicKey>) -> Self {
        Self { payload, recipient_keys }
    }

    /// Wrap an already-scoped payload (no recipient keys).
    pub fn scoped(payload: EncodedPayload) -> Self {
        Self { payload, recipient_keys: Vec::new() }
    }

    /// True when no recipient keys are carried
    pub fn is_scoped(&self) -> bool {
        self.recipient_keys.is_empty()
    }

    /// Position of the first key equal to `recipient`
    pub fn recipient_index(&self, recipient: &PublicKey) -> Option<usize> {
        self.recipient_keys.iter().position(|key| key == recipient)
    }

    /// True when a non-empty key list and the boxes line up one-to-one
    pub fn is_consistent(&self) -> bool {
        self.is_scoped() || self.recipient_keys.len() == self.payload.recipient_boxes.len()
    }
}
