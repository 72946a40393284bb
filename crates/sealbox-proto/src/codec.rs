//! Payload codecs.
//!
//! [`PayloadCodec`] is the capability both codecs share. [`RecipientCodec`]
//! holds a [`PlainCodec`] and delegates the payload part to it, then handles
//! the trailing recipient key array and scoping itself.

use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    CodecConfig, Cursor, EncodedPayload, EncodedPayloadWithRecipients, Nonce, PublicKey,
    array::{array_len, decode_array, decode_array_with, encode_array},
    errors::{CodecError, Malformed, Result},
    field::{decode_field, encode_field, field_len},
    filter::scope_to_recipient,
};

/// Encodes and decodes one wire structure.
///
/// Implementors supply the cursor-level methods. `encode` and `decode` are
/// the whole-buffer entry points and apply the codec's [`CodecConfig`].
pub trait PayloadCodec {
    /// Structure carried on the wire
    type Value;

    /// Configuration applied by `decode`
    fn config(&self) -> &CodecConfig;

    /// Exact number of bytes `encode_into` writes for `value`
    fn encoded_len(&self, value: &Self::Value) -> usize;

    /// Append the wire form of `value` to `dst`.
    fn encode_into(&self, value: &Self::Value, dst: &mut impl BufMut);

    /// Decode one value starting at `cursor`, returning the cursor after it.
    fn decode_from<'a>(&self, cursor: Cursor<'a>) -> Result<(Self::Value, Cursor<'a>)>;

    /// Encode `value` into a freshly allocated buffer of exact size.
    ///
    /// Encoding cannot fail and is deterministic: the same value always
    /// produces the same bytes.
    fn encode(&self, value: &Self::Value) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len(value));
        self.encode_into(value, &mut buf);
        buf.freeze()
    }

    /// Decode a value from the start of `bytes`.
    ///
    /// Bytes after the last declared field are ignored, so a plain payload
    /// can be read from the front of a recipient-carrying buffer.
    fn decode(&self, bytes: &[u8]) -> Result<Self::Value> {
        self.config().check_input(bytes)?;
        let (value, _) = self.decode_from(Cursor::new(bytes))?;
        Ok(value)
    }
}

/// Codec for [`EncodedPayload`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainCodec {
    config: CodecConfig,
}

impl PlainCodec {
    /// Codec using `config`
    pub const fn new(config: CodecConfig) -> Self {
        Self { config }
    }
}

impl PayloadCodec for PlainCodec {
    type Value = EncodedPayload;

    fn config(&self) -> &CodecConfig {
        &self.config
    }

    fn encoded_len(&self, value: &EncodedPayload) -> usize {
        field_len(value.sender_key.as_bytes().len())
            + field_len(value.cipher_text.len())
            + field_len(value.cipher_text_nonce.as_bytes().len())
            + array_len(&value.recipient_boxes)
            + field_len(value.recipient_nonce.as_bytes().len())
    }

    fn encode_into(&self, value: &EncodedPayload, dst: &mut impl BufMut) {
        encode_field(value.sender_key.as_bytes(), dst);
        encode_field(&value.cipher_text, dst);
        encode_field(value.cipher_text_nonce.as_bytes(), dst);
        encode_array(&value.recipient_boxes, dst);
        encode_field(value.recipient_nonce.as_bytes(), dst);
    }

    fn decode_from<'a>(&self, cursor: Cursor<'a>) -> Result<(EncodedPayload, Cursor<'a>)> {
        let (sender_key, cursor) = decode_field(cursor)?;
        let (cipher_text, cursor) = decode_field(cursor)?;
        let (cipher_text_nonce, cursor) = decode_field(cursor)?;
        let (recipient_boxes, cursor) = decode_array(cursor)?;
        let (recipient_nonce, cursor) = decode_field(cursor)?;

        let payload = EncodedPayload {
            sender_key: PublicKey::new(sender_key),
            cipher_text,
            cipher_text_nonce: Nonce::new(cipher_text_nonce),
            recipient_boxes,
            recipient_nonce: Nonce::new(recipient_nonce),
        };

        Ok((payload, cursor))
    }
}

/// Codec for [`EncodedPayloadWithRecipients`].
///
/// Wire form is the plain payload followed by an array of recipient keys.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipientCodec {
    inner: PlainCodec,
}

impl RecipientCodec {
    /// Codec using `config` for both the payload and the key list
    pub const fn new(config: CodecConfig) -> Self {
        Self { inner: PlainCodec::new(config) }
    }

    /// Codec used for the payload part
    pub const fn plain(&self) -> &PlainCodec {
        &self.inner
    }

    /// Decode `bytes` and scope the result to `recipient`.
    ///
    /// This is the entry point for a node that persists or forwards a
    /// transaction on behalf of one recipient: the result carries only that
    /// recipient's box and no key list. See [`scope_to_recipient`] for the
    /// rules, including how an empty key list is treated under the
    /// configured [`crate::EmptyRecipientPolicy`].
    ///
    /// # Errors
    ///
    /// - [`CodecError::MalformedPayload`] if `bytes` do not decode
    /// - [`CodecError::InvalidRecipient`] if `recipient` is not addressed
    pub fn decode_for_recipient(
        &self,
        bytes: &[u8],
        recipient: &PublicKey,
    ) -> Result<EncodedPayloadWithRecipients> {
        let decoded = self.decode(bytes)?;
        let policy = self.config().empty_recipients;

        match scope_to_recipient(&decoded, recipient, policy) {
            Ok(scoped) => {
                tracing::trace!(
                    recipients = decoded.recipient_keys.len(),
                    boxes = decoded.payload.recipient_boxes.len(),
                    passed_through = decoded.is_scoped(),
                    "scoped payload to recipient"
                );
                Ok(scoped)
            },
            Err(err @ CodecError::InvalidRecipient { .. }) => {
                tracing::debug!(
                    recipients = decoded.recipient_keys.len(),
                    ?policy,
                    "rejected scoping request for non-recipient"
                );
                Err(err)
            },
            Err(err) => Err(err),
        }
    }
}

impl PayloadCodec for RecipientCodec {
    type Value = EncodedPayloadWithRecipients;

    fn config(&self) -> &CodecConfig {
        self.inner.config()
    }

    fn encoded_len(&self, value: &EncodedPayloadWithRecipients) -> usize {
        self.inner.encoded_len(&value.payload) + array_len(&value.recipient_keys)
    }

    fn encode_into(&self, value: &EncodedPayloadWithRecipients, dst: &mut impl BufMut) {
        self.inner.encode_into(&value.payload, dst);
        encode_array(&value.recipient_keys, dst);
    }

    fn decode_from<'a>(
        &self,
        cursor: Cursor<'a>,
    ) -> Result<(EncodedPayloadWithRecipients, Cursor<'a>)> {
        let (payload, cursor) = self.inner.decode_from(cursor)?;
        let (recipient_keys, cursor) = decode_array_with(cursor, |key: &[u8]| PublicKey::from(key))?;

        let value = EncodedPayloadWithRecipients::new(payload, recipient_keys);
        if !value.is_consistent() {
            return Err(Malformed::RecipientCountMismatch {
                keys: value.recipient_keys.len(),
                boxes: value.payload.recipient_boxes.len(),
            }
            .into());
        }

        Ok((value, cursor))
    }
}
