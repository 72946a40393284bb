//! Forward-only read position over an immutable input buffer.
//!
//! A [`Cursor`] is a borrowed slice plus an offset. It is `Copy` and never
//! mutated: each read hands back the value together with a new cursor
//! positioned after it. Sub-decoders therefore share no hidden state and can
//! be tested in isolation by starting them at any offset.

use zerocopy::{FromBytes, byteorder::big_endian::U64};

use crate::errors::{Malformed, Result};

/// Size of every length and count prefix on the wire
pub const LENGTH_SIZE: usize = 8;

/// Read position over a borrowed input buffer.
///
/// # Invariants
///
/// - `offset <= buf.len()`. Reads that would pass the end fail instead of
///   advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// Start reading at the beginning of `buf`.
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Bytes consumed so far
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed
    pub const fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// True when every byte has been consumed
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Unconsumed tail of the input
    pub fn rest(&self) -> &'a [u8] {
        &self.buf[self.offset..]
    }

    /// Read an 8-byte big-endian length or count.
    pub fn read_length(self) -> Result<(u64, Self)> {
        let (length, _) = U64::read_from_prefix(self.rest()).map_err(|_| {
            Malformed::TruncatedLength { offset: self.offset, remaining: self.remaining() }
        })?;

        Ok((length.get(), self.advance(LENGTH_SIZE)))
    }

    /// Borrow the next `declared` bytes.
    ///
    /// Lengths that do not fit in `usize` can never be satisfied, so they
    /// fail the same way as an ordinary overrun.
    pub fn read_slice(self, declared: u64) -> Result<(&'a [u8], Self)> {
        let len = usize::try_from(declared)
            .ok()
            .filter(|&len| len <= self.remaining())
            .ok_or(Malformed::TruncatedField {
                offset: self.offset,
                declared,
                remaining: self.remaining(),
            })?;

        let bytes = &self.buf[self.offset..self.offset + len];
        Ok((bytes, self.advance(len)))
    }

    fn advance(self, by: usize) -> Self {
        debug_assert!(by <= self.remaining());
        Self { buf: self.buf, offset: self.offset + by }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CodecError;

    #[test]
    fn read_length_is_big_endian() {
        let buf = [0, 0, 0, 0, 0, 0, 0x01, 0x02, 0xff];
        let (length, next) = Cursor::new(&buf).read_length().unwrap();

        assert_eq!(length, 0x0102);
        assert_eq!(next.offset(), 8);
        assert_eq!(next.rest(), &[0xff]);
    }

    #[test]
    fn reads_leave_original_cursor_untouched() {
        let buf = [0u8; 16];
        let start = Cursor::new(&buf);
        let (_, next) = start.read_length().unwrap();

        assert_eq!(start.offset(), 0);
        assert_eq!(next.offset(), 8);
        assert_eq!(start.read_length().unwrap().1, next);
    }

    #[test]
    fn reject_short_length_prefix() {
        let buf = [0u8; 7];
        let result = Cursor::new(&buf).read_length();

        assert_eq!(
            result,
            Err(CodecError::MalformedPayload(Malformed::TruncatedLength {
                offset: 0,
                remaining: 7
            }))
        );
    }

    #[test]
    fn read_slice_exact_fit() {
        let buf = [1, 2, 3];
        let (bytes, next) = Cursor::new(&buf).read_slice(3).unwrap();

        assert_eq!(bytes, &[1, 2, 3]);
        assert!(next.is_empty());
    }

    #[test]
    fn read_slice_zero_length() {
        let (bytes, next) = Cursor::new(&[]).read_slice(0).unwrap();

        assert!(bytes.is_empty());
        assert_eq!(next.offset(), 0);
    }

    #[test]
    fn reject_slice_overrun() {
        let buf = [1, 2, 3];
        let result = Cursor::new(&buf).read_slice(4);

        assert!(matches!(
            result,
            Err(CodecError::MalformedPayload(Malformed::TruncatedField {
                declared: 4,
                remaining: 3,
                ..
            }))
        ));
    }

    #[test]
    fn reject_unaddressable_length() {
        let result = Cursor::new(&[0u8; 8]).read_slice(u64::MAX);
        assert!(matches!(
            result,
            Err(CodecError::MalformedPayload(Malformed::TruncatedField { .. }))
        ));
    }
}
