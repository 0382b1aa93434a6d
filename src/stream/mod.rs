// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Stream abstraction for the length-prefixed wire format.
//!
//! A serialized view is `[len: u32, network endian][len payload bytes]
//! [zero padding to a 4 byte boundary]`. [`Stream`] is the read side
//! consumed by [`ByteViewMut::read`]; [`StreamMut`] is the write side
//! produced by [`ByteView::write`].
//!
//! [`ByteViewMut::read`]: crate::view::ByteViewMut::read
//! [`ByteView::write`]: crate::view::ByteView::write

use crate::view::ViewResult;

#[cfg(feature = "bytes")]
pub mod buf;
pub mod slice;

#[cfg(feature = "bytes")]
pub use buf::*;
pub use slice::*;

/// The alignment boundary of the wire format, in bytes
pub const ALIGNMENT: usize = core::mem::size_of::<u32>();

/// A source of wire-format data
///
/// Implementations track their position from the start of the serialized
/// data so [`align`] can land on format boundaries.
///
/// [`align`]: Self::align
pub trait Stream {
    /// Reads the next network-endian `u32`
    fn read_u32(&mut self) -> ViewResult<u32>;

    /// Fills `dest` with the next `dest.len()` bytes
    fn read_exact(&mut self, dest: &mut [u8]) -> ViewResult;

    /// Discards the next `len` bytes without buffering them
    fn skip(&mut self, len: usize) -> ViewResult;

    /// Advances past padding to the next multiple of `boundary`
    fn align(&mut self, boundary: usize) -> ViewResult;
}

/// A sink for wire-format data
pub trait StreamMut {
    /// Writes a network-endian `u32`
    fn write_u32(&mut self, value: u32) -> ViewResult;

    /// Writes the bytes of `slice`
    fn write_slice(&mut self, slice: &[u8]) -> ViewResult;

    /// Writes zero padding up to the next multiple of `boundary`
    fn align(&mut self, boundary: usize) -> ViewResult;
}

/// Returns the number of padding bytes between `position` and the next
/// multiple of `boundary`
#[inline]
pub const fn padding_len(position: usize, boundary: usize) -> usize {
    if boundary < 2 {
        return 0;
    }
    (boundary - position % boundary) % boundary
}

#[cfg(test)]
mod tests {
    use super::padding_len;

    #[test]
    fn padding() {
        assert_eq!(padding_len(0, 4), 0);
        assert_eq!(padding_len(1, 4), 3);
        assert_eq!(padding_len(3, 4), 1);
        assert_eq!(padding_len(4, 4), 0);
        assert_eq!(padding_len(9, 4), 3);
        assert_eq!(padding_len(5, 0), 0);
        assert_eq!(padding_len(5, 1), 0);
    }
}
