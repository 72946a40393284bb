//! Error types for payload encoding and decoding.
//!
//! Callers see exactly two kinds of failure: the bytes do not describe a
//! well-formed payload, or the caller asked to scope a payload to a key it
//! was never addressed to. The [`Malformed`] detail exists for logs and
//! tests; recovery policy never depends on it.

use thiserror::Error;

use crate::PublicKey;

/// Failures returned by the payload codecs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input cannot satisfy a declared length or count
    ///
    /// Decoding is deterministic, so retrying the same bytes yields the same
    /// failure. Retransmission is the transport's decision.
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] Malformed),

    /// Scoping target is not among the payload's recipients
    #[error("{recipient} is not a recipient of this transaction")]
    InvalidRecipient {
        /// Key the caller asked to scope to
        recipient: PublicKey,
    },
}

/// Structural reasons a payload failed to decode.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// Fewer than 8 bytes left where a length or count was expected
    #[error("length prefix at offset {offset} truncated: {remaining} of 8 bytes available")]
    TruncatedLength {
        /// Offset of the length prefix
        offset: usize,
        /// Bytes left in the input
        remaining: usize,
    },

    /// Declared field length exceeds the bytes left
    #[error("field at offset {offset} declares {declared} bytes, only {remaining} available")]
    TruncatedField {
        /// Offset of the field body
        offset: usize,
        /// Length read from the prefix
        declared: u64,
        /// Bytes left in the input
        remaining: usize,
    },

    /// Declared element count cannot fit in the bytes left
    ///
    /// Every element needs at least its own 8-byte length prefix, so a count
    /// above `remaining / 8` is rejected before anything is allocated.
    #[error("array at offset {offset} declares {count} elements, only {remaining} bytes available")]
    CountOverrun {
        /// Offset of the first element
        offset: usize,
        /// Count read from the prefix
        count: u64,
        /// Bytes left in the input
        remaining: usize,
    },

    /// Input exceeds the configured maximum size
    #[error("input of {size} bytes exceeds maximum {max}")]
    InputTooLarge {
        /// Input size
        size: usize,
        /// Configured limit
        max: usize,
    },

    /// Non-empty recipient key list does not line up with the boxes
    #[error("{keys} recipient keys for {boxes} recipient boxes")]
    RecipientCountMismatch {
        /// Number of recipient keys
        keys: usize,
        /// Number of recipient boxes
        boxes: usize,
    },
}

/// Convenient Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_converts_into_codec_error() {
        let err: CodecError = Malformed::TruncatedLength { offset: 3, remaining: 2 }.into();
        assert_eq!(
            err.to_string(),
            "malformed payload: length prefix at offset 3 truncated: 2 of 8 bytes available"
        );
    }

    #[test]
    fn invalid_recipient_names_the_key() {
        let err = CodecError::InvalidRecipient { recipient: PublicKey::from(vec![0xab, 0xcd]) };
        assert_eq!(err.to_string(), "abcd is not a recipient of this transaction");
    }
}
