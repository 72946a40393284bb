//! Ordered sequence of fields: `[count: u64be][field]*count`.

use bytes::{BufMut, Bytes};

use crate::{
    Cursor, Result,
    cursor::LENGTH_SIZE,
    errors::Malformed,
    field::{decode_field_ref, encode_field, field_len},
};

/// Encoded size of an array over `items`
pub fn array_len<T: AsRef<[u8]>>(items: &[T]) -> usize {
    LENGTH_SIZE + items.iter().map(|item| field_len(item.as_ref().len())).sum::<usize>()
}

/// Write `items` as a counted array of fields, preserving order.
pub fn encode_array<T: AsRef<[u8]>>(items: &[T], dst: &mut impl BufMut) {
    dst.put_u64(items.len() as u64);
    for item in items {
        encode_field(item.as_ref(), dst);
    }
}

/// Read a counted array of fields, mapping each body through `f`.
///
/// The count is checked against the bytes remaining before anything is
/// reserved: each element carries at least an 8-byte prefix, so a count
/// above `remaining / 8` cannot be satisfied.
pub fn decode_array_with<'a, T>(
    cursor: Cursor<'a>,
    mut f: impl FnMut(&'a [u8]) -> T,
) -> Result<(Vec<T>, Cursor<'a>)> {
    let (count, mut cursor) = cursor.read_length()?;

    let max_count = cursor.remaining() / LENGTH_SIZE;
    let count = usize::try_from(count).ok().filter(|&count| count <= max_count).ok_or(
        Malformed::CountOverrun { offset: cursor.offset(), count, remaining: cursor.remaining() },
    )?;

    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        let (body, next) = decode_field_ref(cursor)?;
        items.push(f(body));
        cursor = next;
    }

    Ok((items, cursor))
}

/// Read a counted array of fields into owned buffers.
pub fn decode_array(cursor: Cursor<'_>) -> Result<(Vec<Bytes>, Cursor<'_>)> {
    decode_array_with(cursor, Bytes::copy_from_slice)
}
