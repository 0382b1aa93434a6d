// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    stream::{padding_len, Stream},
    view::{ViewError, ViewResult},
};
use bytes::Buf;

/// Adapts any [`bytes::Buf`] into a [`Stream`]
///
/// `Buf` has no notion of absolute position, so the adapter counts consumed
/// bytes itself to keep `align` anchored to the start of the serialized data.
#[derive(Debug)]
pub struct BufStream<B> {
    inner: B,
    consumed: usize,
}

impl<B: Buf> BufStream<B> {
    #[inline]
    pub fn new(inner: B) -> Self {
        Self { inner, consumed: 0 }
    }

    /// Returns the number of bytes consumed so far
    #[inline]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    #[inline]
    pub fn into_inner(self) -> B {
        self.inner
    }

    #[inline]
    fn check_remaining(&self, len: usize) -> ViewResult {
        if self.inner.remaining() < len {
            return Err(ViewError::UnexpectedEnd(len - self.inner.remaining()));
        }
        Ok(())
    }
}

impl<B: Buf> Stream for BufStream<B> {
    #[inline]
    fn read_u32(&mut self) -> ViewResult<u32> {
        self.check_remaining(core::mem::size_of::<u32>())?;
        // Buf::get_u32 is big endian, matching the wire format
        let value = self.inner.get_u32();
        self.consumed += core::mem::size_of::<u32>();
        Ok(value)
    }

    #[inline]
    fn read_exact(&mut self, dest: &mut [u8]) -> ViewResult {
        self.check_remaining(dest.len())?;
        self.inner.copy_to_slice(dest);
        self.consumed += dest.len();
        Ok(())
    }

    #[inline]
    fn skip(&mut self, len: usize) -> ViewResult {
        self.check_remaining(len)?;
        self.inner.advance(len);
        self.consumed += len;
        Ok(())
    }

    #[inline]
    fn align(&mut self, boundary: usize) -> ViewResult {
        self.skip(padding_len(self.consumed, boundary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ByteViewMut;

    #[test]
    fn read_through_buf() {
        let wire: &[u8] = &[0, 0, 0, 2, 7, 8, 0, 0, 0xee];
        let mut stream = BufStream::new(wire);

        let mut storage = [0u8; 4];
        let mut view = ByteViewMut::new(&mut storage);
        assert_eq!(view.read(&mut stream), Ok(2));
        assert_eq!(view.as_slice(), &[7, 8]);
        assert_eq!(stream.consumed(), 8);
        assert_eq!(stream.into_inner(), &[0xee]);
    }

    #[test]
    fn buf_exhaustion() {
        let wire: &[u8] = &[0, 0];
        let mut stream = BufStream::new(wire);
        assert_eq!(stream.read_u32(), Err(ViewError::UnexpectedEnd(2)));
    }
}
