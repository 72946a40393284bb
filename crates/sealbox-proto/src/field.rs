//! Single opaque byte sequence: `[length: u64be][bytes]`.
//!
//! No upper bound is enforced here. Decoding only checks the declared
//! length against the bytes actually available.

use bytes::{BufMut, Bytes};

use crate::{Cursor, Result, cursor::LENGTH_SIZE};

/// Encoded size of a field holding `len` bytes
pub const fn field_len(len: usize) -> usize {
    LENGTH_SIZE + len
}

/// Write `bytes` as a length-prefixed field.
pub fn encode_field(bytes: &[u8], dst: &mut impl BufMut) {
    dst.put_u64(bytes.len() as u64);
    dst.put_slice(bytes);
}

/// Read one length-prefixed field, borrowing its body from the input.
pub fn decode_field_ref(cursor: Cursor<'_>) -> Result<(&[u8], Cursor<'_>)> {
    let (declared, cursor) = cursor.read_length()?;
    cursor.read_slice(declared)
}

/// Read one length-prefixed field into an owned buffer.
pub fn decode_field(cursor: Cursor<'_>) -> Result<(Bytes, Cursor<'_>)> {
    let (body, cursor) = decode_field_ref(cursor)?;
    Ok((Bytes::copy_from_slice(body), cursor))
}
