// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    stream::{padding_len, Stream, StreamMut},
    view::{ViewError, ViewResult},
};
use byteorder::{ByteOrder, NetworkEndian};

/// A [`Stream`] reading from a byte slice with a cursor
#[derive(Debug)]
pub struct SliceStream<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> SliceStream<'a> {
    #[inline]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Returns the number of bytes consumed so far
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes left in the stream
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    #[inline]
    fn take(&mut self, len: usize) -> ViewResult<&'a [u8]> {
        if self.remaining() < len {
            return Err(ViewError::UnexpectedEnd(len - self.remaining()));
        }
        let bytes = &self.bytes[self.position..self.position + len];
        self.position += len;
        Ok(bytes)
    }
}

impl Stream for SliceStream<'_> {
    #[inline]
    fn read_u32(&mut self) -> ViewResult<u32> {
        let bytes = self.take(core::mem::size_of::<u32>())?;
        Ok(NetworkEndian::read_u32(bytes))
    }

    #[inline]
    fn read_exact(&mut self, dest: &mut [u8]) -> ViewResult {
        let bytes = self.take(dest.len())?;
        dest.copy_from_slice(bytes);
        Ok(())
    }

    #[inline]
    fn skip(&mut self, len: usize) -> ViewResult {
        self.take(len)?;
        Ok(())
    }

    #[inline]
    fn align(&mut self, boundary: usize) -> ViewResult {
        self.skip(padding_len(self.position, boundary))
    }
}

/// A [`StreamMut`] writing to a byte slice with a cursor
#[derive(Debug)]
pub struct SliceStreamMut<'a> {
    bytes: &'a mut [u8],
    position: usize,
}

impl<'a> SliceStreamMut<'a> {
    #[inline]
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Returns the number of bytes written so far
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes of space left in the stream
    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    #[inline]
    fn reserve(&mut self, len: usize) -> ViewResult<&mut [u8]> {
        if self.remaining() < len {
            return Err(ViewError::UnexpectedEnd(len - self.remaining()));
        }
        let bytes = &mut self.bytes[self.position..self.position + len];
        self.position += len;
        Ok(bytes)
    }
}

impl StreamMut for SliceStreamMut<'_> {
    #[inline]
    fn write_u32(&mut self, value: u32) -> ViewResult {
        let bytes = self.reserve(core::mem::size_of::<u32>())?;
        NetworkEndian::write_u32(bytes, value);
        Ok(())
    }

    #[inline]
    fn write_slice(&mut self, slice: &[u8]) -> ViewResult {
        self.reserve(slice.len())?.copy_from_slice(slice);
        Ok(())
    }

    #[inline]
    fn align(&mut self, boundary: usize) -> ViewResult {
        let padding = padding_len(self.position, boundary);
        self.reserve(padding)?.fill(0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::ALIGNMENT;

    #[test]
    fn read_u32_network_endian() {
        let mut stream = SliceStream::new(&[0x12, 0x34, 0x56, 0x78, 0xff]);
        assert_eq!(stream.read_u32(), Ok(0x1234_5678));
        assert_eq!(stream.position(), 4);
        assert_eq!(stream.remaining(), 1);
    }

    #[test]
    fn read_past_end() {
        let mut stream = SliceStream::new(&[1, 2]);
        assert_eq!(stream.read_u32(), Err(ViewError::UnexpectedEnd(2)));
        // a failed read consumes nothing
        assert_eq!(stream.position(), 0);

        let mut dest = [0; 3];
        assert_eq!(
            stream.read_exact(&mut dest),
            Err(ViewError::UnexpectedEnd(1))
        );
        assert_eq!(stream.skip(5), Err(ViewError::UnexpectedEnd(3)));
    }

    #[test]
    fn align_skips_padding() {
        let mut stream = SliceStream::new(&[1, 2, 3, 4, 5, 6, 7, 8]);
        stream.skip(1).unwrap();
        stream.align(ALIGNMENT).unwrap();
        assert_eq!(stream.position(), 4);
        // already aligned is a no-op
        stream.align(ALIGNMENT).unwrap();
        assert_eq!(stream.position(), 4);
    }

    #[test]
    fn write_then_read() {
        let mut bytes = [0xffu8; 12];
        let mut stream = SliceStreamMut::new(&mut bytes);
        stream.write_u32(5).unwrap();
        stream.write_slice(&[10, 20, 30, 40, 50]).unwrap();
        stream.align(ALIGNMENT).unwrap();
        assert_eq!(stream.position(), 12);

        assert_eq!(bytes, [0, 0, 0, 5, 10, 20, 30, 40, 50, 0, 0, 0]);

        let mut stream = SliceStream::new(&bytes);
        assert_eq!(stream.read_u32(), Ok(5));
        let mut payload = [0; 5];
        stream.read_exact(&mut payload).unwrap();
        assert_eq!(payload, [10, 20, 30, 40, 50]);
        stream.align(ALIGNMENT).unwrap();
        assert_eq!(stream.remaining(), 0);
    }

    #[test]
    fn write_past_end() {
        let mut bytes = [0u8; 2];
        let mut stream = SliceStreamMut::new(&mut bytes);
        assert_eq!(stream.write_u32(1), Err(ViewError::UnexpectedEnd(2)));
        assert_eq!(
            stream.write_slice(&[1, 2, 3]),
            Err(ViewError::UnexpectedEnd(1))
        );
    }
}
