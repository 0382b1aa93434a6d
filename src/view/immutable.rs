// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use crate::view::impl_view;
use core::{fmt, num::NonZeroUsize};

/// A read-only, non-owning view over a contiguous byte buffer
///
/// The view records the bound region (its capacity), a logical length within
/// that region, and an element size: the granularity all mutation offsets and
/// lengths must be multiples of. Copies are shallow and alias the same
/// memory.
#[derive(Clone, Copy)]
pub struct ByteView<'a> {
    bytes: &'a [u8],
    len: usize,
    element_size: NonZeroUsize,
}

impl_view!(ByteView);

impl<'a> ByteView<'a> {
    /// Binds a view over `bytes` with single-byte granularity
    #[inline]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            len: bytes.len(),
            element_size: NonZeroUsize::MIN,
        }
    }

    /// Binds a view over `bytes` with the given granularity
    ///
    /// The bound region is expected to hold whole elements.
    #[inline]
    pub fn with_element_size(bytes: &'a [u8], element_size: NonZeroUsize) -> Self {
        debug_assert!(
            bytes.len() % element_size.get() == 0,
            "region does not hold a whole number of elements"
        );
        Self {
            bytes,
            len: bytes.len(),
            element_size,
        }
    }

    /// Rebinds the view to a new external region
    ///
    /// The previous binding is discarded without freeing anything; position
    /// markers derived from it are invalidated.
    #[inline]
    pub fn link(&mut self, bytes: &'a [u8]) {
        self.bytes = bytes;
        self.len = bytes.len();
    }

    /// Resets the view to the unbound empty state
    ///
    /// The element size is a property of the element type, not of the
    /// binding, so it survives.
    #[inline]
    pub fn unlink(&mut self) {
        self.bytes = &[];
        self.len = 0;
    }

    #[inline]
    pub(crate) fn capacity_slice(&self) -> &[u8] {
        self.bytes
    }

    #[inline]
    pub(crate) fn from_parts(bytes: &'a [u8], len: usize, element_size: NonZeroUsize) -> Self {
        debug_assert!(len <= bytes.len());
        Self {
            bytes,
            len,
            element_size,
        }
    }

    #[inline]
    pub(crate) fn into_parts(self) -> (&'a [u8], usize, NonZeroUsize) {
        (self.bytes, self.len, self.element_size)
    }
}

impl Default for ByteView<'_> {
    #[inline]
    fn default() -> Self {
        Self::new(&[])
    }
}

impl<'a> From<&'a [u8]> for ByteView<'a> {
    #[inline]
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

impl fmt::Debug for ByteView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteView")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .field("element_size", &self.element_size())
            .finish()
    }
}
