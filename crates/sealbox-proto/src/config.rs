//! Codec configuration.
//!
//! Hosts usually embed [`CodecConfig`] in their own configuration file, so
//! every field has a default and missing keys deserialize to it.

use serde::{Deserialize, Serialize};

use crate::errors::{Malformed, Result};

/// How recipient scoping treats a payload that carries no recipient keys.
///
/// An empty key list normally means the payload was already scoped to a
/// single recipient before it was stored, so there is nothing to check the
/// target against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyRecipientPolicy {
    /// Return the payload unchanged and trust the caller's target
    #[default]
    PassThrough,
    /// Fail with `InvalidRecipient`, since membership cannot be proven
    Reject,
}

/// Settings shared by [`crate::PlainCodec`] and [`crate::RecipientCodec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Scoping behaviour for payloads without recipient keys
    pub empty_recipients: EmptyRecipientPolicy,

    /// Largest input accepted by `decode`, in bytes. `None` means no limit
    /// beyond the declared lengths themselves.
    pub max_input_size: Option<usize>,
}

impl CodecConfig {
    /// Reject `input` up front if it exceeds `max_input_size`.
    pub fn check_input(&self, input: &[u8]) -> Result<()> {
        match self.max_input_size {
            Some(max) if input.len() > max => {
                Err(Malformed::InputTooLarge { size: input.len(), max }.into())
            },
            _ => Ok(()),
        }
    }
}
