// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::{
    stream::{Stream, ALIGNMENT},
    view::{impl_view, ByteView, ViewError, ViewResult},
};
use core::{fmt, mem, num::NonZeroUsize};
use zerocopy::{Immutable, IntoBytes};

/// How a [`ByteViewMut`] is bound to its region
///
/// A read-only binding refuses every write; a writable binding is the only
/// way to reach the region mutably, so a write path that does not alias the
/// read path is unrepresentable.
enum Binding<'a> {
    ReadOnly(&'a [u8]),
    Writable(&'a mut [u8]),
}

impl<'a> Binding<'a> {
    #[inline]
    fn as_slice(&self) -> &[u8] {
        match self {
            Self::ReadOnly(bytes) => bytes,
            Self::Writable(bytes) => bytes,
        }
    }

    #[inline]
    fn as_mut_slice(&mut self) -> ViewResult<&mut [u8]> {
        match self {
            Self::ReadOnly(_) => Err(ViewError::ReadOnly),
            Self::Writable(bytes) => Ok(&mut **bytes),
        }
    }

    #[inline]
    fn is_writable(&self) -> bool {
        matches!(self, Self::Writable(_))
    }
}

impl Default for Binding<'_> {
    #[inline]
    fn default() -> Self {
        Self::Writable(Default::default())
    }
}

/// A mutable, non-owning view over a contiguous byte buffer
///
/// Layers byte-mutating operations over the [`ByteView`] data model. The
/// view never allocates, frees, or grows the storage it is bound to, and all
/// mutation is bounds-checked against the logical length.
///
/// The gap-shifting operations ([`insert`] and [`erase`]) move content as
/// raw bytes; they are only meaningful for binary-safe element types with no
/// per-element construction or destruction semantics.
///
/// [`insert`]: Self::insert
/// [`erase`]: Self::erase
pub struct ByteViewMut<'a> {
    bytes: Binding<'a>,
    len: usize,
    element_size: NonZeroUsize,
}

impl_view!(ByteViewMut);

impl<'a> ByteViewMut<'a> {
    /// Binds a writable view over `bytes` with single-byte granularity
    #[inline]
    pub fn new(bytes: &'a mut [u8]) -> Self {
        let len = bytes.len();
        Self {
            bytes: Binding::Writable(bytes),
            len,
            element_size: NonZeroUsize::MIN,
        }
    }

    /// Binds a writable view over `bytes` with the given granularity
    ///
    /// The bound region is expected to hold whole elements.
    #[inline]
    pub fn with_element_size(bytes: &'a mut [u8], element_size: NonZeroUsize) -> Self {
        debug_assert!(
            bytes.len() % element_size.get() == 0,
            "region does not hold a whole number of elements"
        );
        let len = bytes.len();
        Self {
            bytes: Binding::Writable(bytes),
            len,
            element_size,
        }
    }

    /// Binds a read-only view; every mutation fails with
    /// [`ViewError::ReadOnly`]
    #[inline]
    pub fn read_only(bytes: &'a [u8]) -> Self {
        Self {
            bytes: Binding::ReadOnly(bytes),
            len: bytes.len(),
            element_size: NonZeroUsize::MIN,
        }
    }

    /// Binds a read-only view with the given granularity
    #[inline]
    pub fn read_only_with_element_size(bytes: &'a [u8], element_size: NonZeroUsize) -> Self {
        debug_assert!(
            bytes.len() % element_size.get() == 0,
            "region does not hold a whole number of elements"
        );
        Self {
            bytes: Binding::ReadOnly(bytes),
            len: bytes.len(),
            element_size,
        }
    }

    /// Returns `true` if the view was bound with write access
    #[inline]
    pub fn is_writable(&self) -> bool {
        self.bytes.is_writable()
    }

    /// Returns an immutable view aliasing the same region
    #[inline]
    pub fn as_view(&self) -> ByteView<'_> {
        ByteView::from_parts(self.bytes.as_slice(), self.len, self.element_size)
    }

    /// Returns a shorter-lived view aliasing the same region, preserving
    /// write access
    ///
    /// This is the copy-of-a-mutable-view operation: `&mut` bindings are not
    /// `Copy`, so the alias borrows from `self` instead.
    #[inline]
    pub fn reborrow(&mut self) -> ByteViewMut<'_> {
        let bytes = match &mut self.bytes {
            Binding::ReadOnly(bytes) => Binding::ReadOnly(*bytes),
            Binding::Writable(bytes) => Binding::Writable(&mut **bytes),
        };
        ByteViewMut {
            bytes,
            len: self.len,
            element_size: self.element_size,
        }
    }

    /// Exchanges the bindings, lengths, and granularities of two views
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Rebinds the view writable over a new external region
    ///
    /// The previous binding is discarded without freeing anything; position
    /// markers derived from it are invalidated.
    #[inline]
    pub fn link(&mut self, bytes: &'a mut [u8]) {
        self.len = bytes.len();
        self.bytes = Binding::Writable(bytes);
    }

    /// Rebinds the view read-only over a new external region
    #[inline]
    pub fn link_read_only(&mut self, bytes: &'a [u8]) {
        self.len = bytes.len();
        self.bytes = Binding::ReadOnly(bytes);
    }

    /// Resets the view to the unbound empty state
    ///
    /// Equivalent to default construction; the element size survives, as it
    /// is a property of the element type rather than of the binding.
    #[inline]
    pub fn unlink(&mut self) {
        self.bytes = Binding::default();
        self.len = 0;
    }

    /// Returns the first `len` bytes of the bound region mutably
    #[inline]
    pub fn as_mut_slice(&mut self) -> ViewResult<&mut [u8]> {
        let len = self.len;
        Ok(&mut self.bytes.as_mut_slice()?[..len])
    }

    /// Overwrites `src.len()` bytes at `start` with the contents of `src`
    ///
    /// The source is a separate slice, so it cannot overlap the view. Write
    /// access is only required for a nonzero byte count.
    #[inline]
    pub fn copy_from_slice_at(&mut self, start: usize, src: &[u8]) -> ViewResult {
        self.check_aligned(src.len())?;
        let end = self.check_range(start, src.len())?;
        if src.is_empty() {
            return Ok(());
        }
        self.bytes.as_mut_slice()?[start..end].copy_from_slice(src);
        Ok(())
    }

    /// Copies `count` bytes from `src` to `dest` within the view
    ///
    /// A copy onto itself (`src == dest`) is a no-op and leaves the buffer
    /// untouched.
    #[inline]
    pub fn copy_within(&mut self, src: usize, dest: usize, count: usize) -> ViewResult {
        self.check_aligned(count)?;
        let src_end = self.check_range(src, count)?;
        self.check_range(dest, count)?;
        if src == dest || count == 0 {
            return Ok(());
        }
        self.bytes.as_mut_slice()?.copy_within(src..src_end, dest);
        Ok(())
    }

    /// Writes `pattern` repeated `count` times starting at `start`
    ///
    /// The total span is `pattern.len() * count` bytes. A single-byte
    /// pattern degenerates to a plain byte fill of the whole span.
    #[inline]
    pub fn fill_at(&mut self, start: usize, pattern: &[u8], count: usize) -> ViewResult {
        self.check_aligned(pattern.len())?;
        let total = pattern
            .len()
            .checked_mul(count)
            .ok_or(ViewError::LengthOverflow)?;
        let end = self.check_range(start, total)?;
        if total == 0 {
            return Ok(());
        }
        let region = &mut self.bytes.as_mut_slice()?[start..end];
        if let [byte] = *pattern {
            region.fill(byte);
        } else {
            for chunk in region.chunks_exact_mut(pattern.len()) {
                chunk.copy_from_slice(pattern);
            }
        }
        Ok(())
    }

    /// Writes a value of `T` into the view at `start`
    #[inline]
    pub fn write_zerocopy<T: IntoBytes + Immutable + ?Sized>(
        &mut self,
        start: usize,
        value: &T,
    ) -> ViewResult {
        self.copy_from_slice_at(start, value.as_bytes())
    }

    /// Writes `count` copies of a value of `T` starting at `start`
    #[inline]
    pub fn fill_zerocopy<T: IntoBytes + Immutable>(
        &mut self,
        start: usize,
        value: &T,
        count: usize,
    ) -> ViewResult {
        self.fill_at(start, value.as_bytes(), count)
    }

    /// Opens a gap of `count` bytes at `start` by rotating `[start, len)` in
    /// place
    ///
    /// Bytes previously in `[len - count, len)` land in the gap, so the gap
    /// content is unspecified from the caller's point of view and must be
    /// overwritten. Both `start` and `count` must be element-aligned.
    #[inline]
    pub fn insert(&mut self, start: usize, count: usize) -> ViewResult {
        let span = self.shift_span(start, count)?;
        span.rotate_right(count);
        Ok(())
    }

    /// Closes over `count` bytes at `start` by rotating `[start, len)` in
    /// place
    ///
    /// The tail shifts left over the erased bytes; the content of the last
    /// `count` bytes of the span is unspecified afterwards. Both `start` and
    /// `count` must be element-aligned.
    #[inline]
    pub fn erase(&mut self, start: usize, count: usize) -> ViewResult {
        let span = self.shift_span(start, count)?;
        span.rotate_left(count);
        Ok(())
    }

    /// Validates an insert/erase request and returns the affected span
    #[inline]
    fn shift_span(&mut self, start: usize, count: usize) -> ViewResult<&mut [u8]> {
        self.check_aligned(start)?;
        self.check_aligned(count)?;
        self.check_range(start, count)?;
        if count == 0 {
            return Ok(&mut []);
        }
        let len = self.len;
        Ok(&mut self.bytes.as_mut_slice()?[start..len])
    }

    /// Deserializes the view's contents from `stream`
    ///
    /// Reads a length field `n`, then at most `capacity` payload bytes: the
    /// logical length shrinks to `min(n, capacity)`, excess payload is
    /// skipped without buffering, and the stream is advanced to the wire
    /// format's alignment boundary. The operation never writes past the
    /// bound region, no matter what length the stream claims.
    ///
    /// Fails with [`ViewError::Misaligned`] if `n` is not a multiple of the
    /// element size. On failure the stream position is unspecified. Returns
    /// the new logical length.
    #[inline]
    pub fn read<S: Stream>(&mut self, stream: &mut S) -> ViewResult<usize> {
        let declared = stream.read_u32()? as usize;
        self.check_aligned(declared)?;
        let to_read = declared.min(self.capacity());
        if to_read > 0 {
            stream.read_exact(&mut self.bytes.as_mut_slice()?[..to_read])?;
        }
        self.resize(to_read)?;
        stream.skip(declared - to_read)?;
        stream.align(ALIGNMENT)?;
        Ok(to_read)
    }

    #[inline]
    pub(crate) fn capacity_slice(&self) -> &[u8] {
        self.bytes.as_slice()
    }
}

impl Default for ByteViewMut<'_> {
    #[inline]
    fn default() -> Self {
        Self {
            bytes: Binding::default(),
            len: 0,
            element_size: NonZeroUsize::MIN,
        }
    }
}

impl<'a> From<ByteView<'a>> for ByteViewMut<'a> {
    /// Copying from a read-only source never grants write access
    #[inline]
    fn from(view: ByteView<'a>) -> Self {
        let (bytes, len, element_size) = view.into_parts();
        Self {
            bytes: Binding::ReadOnly(bytes),
            len,
            element_size,
        }
    }
}

impl<'a> From<&'a mut [u8]> for ByteViewMut<'a> {
    #[inline]
    fn from(bytes: &'a mut [u8]) -> Self {
        Self::new(bytes)
    }
}

impl fmt::Debug for ByteViewMut<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteViewMut")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("element_size", &self.element_size())
            .field("writable", &self.is_writable())
            .finish()
    }
}
