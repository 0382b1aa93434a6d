// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Non-owning views over externally owned byte buffers.
//!
//! [`ByteView`] is a read-only view; [`ByteViewMut`] layers mutation on top
//! of the same data model. Neither type allocates, frees, or resizes the
//! storage it is bound to; the backing buffer's lifetime is the caller's
//! responsibility.

use core::fmt;

pub mod immutable;
pub mod lifecycle;
pub mod mutable;

pub use immutable::*;
pub use lifecycle::*;
pub use mutable::*;


/// Result alias for view operations
pub type ViewResult<T = ()> = Result<T, ViewError>;

/// Errors reported by view and stream operations
///
/// Every precondition violation is reported as a distinguished error value
/// rather than a panic, so the crate stays panic-free in both debug and
/// release builds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "generator"), derive(bolero_generator::TypeGenerator))]
pub enum ViewError {
    /// The stream ran out of data or space; contains the number of
    /// additional bytes needed to satisfy the request
    UnexpectedEnd(usize),
    /// A byte span falls outside the logical bounds of the view
    OutOfRange,
    /// A length or offset is not a multiple of the element size; contains
    /// the offending value
    Misaligned(usize),
    /// The view is bound read-only and cannot be written through
    ReadOnly,
    /// A length computation overflowed `usize`
    LengthOverflow,
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnexpectedEnd(needed) => {
                write!(f, "unexpected end of stream: {} more bytes needed", needed)
            }
            Self::OutOfRange => write!(f, "span exceeds the bounds of the view"),
            Self::Misaligned(value) => {
                write!(f, "{} is not a multiple of the element size", value)
            }
            Self::ReadOnly => write!(f, "view is bound read-only"),
            Self::LengthOverflow => write!(f, "length computation overflowed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ViewError {}

/// Implements the read-side interface shared by `ByteView` and `ByteViewMut`.
///
/// Each type provides `capacity_slice` (the full bound region) plus `len` and
/// `element_size` fields; everything here derives from those.
macro_rules! impl_view {
    ($ty:ident) => {
        impl<'a> $ty<'a> {
            /// Returns the logical length of the view in bytes
            #[inline]
            pub fn len(&self) -> usize {
                self.len
            }

            /// Returns `true` if the logical length is zero
            #[inline]
            pub fn is_empty(&self) -> bool {
                self.len == 0
            }

            /// Returns the full addressable size of the bound region
            #[inline]
            pub fn capacity(&self) -> usize {
                self.capacity_slice().len()
            }

            /// Returns the number of bytes between the logical length and
            /// the capacity
            #[inline]
            pub fn remaining_capacity(&self) -> usize {
                self.capacity() - self.len
            }

            /// Returns the granularity all mutation offsets and lengths must
            /// be multiples of
            #[inline]
            pub fn element_size(&self) -> usize {
                self.element_size.get()
            }

            /// Returns the first `len` bytes of the bound region
            #[inline]
            pub fn as_slice(&self) -> &[u8] {
                &self.capacity_slice()[..self.len]
            }

            /// Iterates over the logical bytes of the view
            #[inline]
            pub fn iter(&self) -> core::slice::Iter<'_, u8> {
                self.as_slice().iter()
            }

            /// Iterates over the view in element-sized chunks
            #[inline]
            pub fn elements(&self) -> core::slice::ChunksExact<'_, u8> {
                self.as_slice().chunks_exact(self.element_size.get())
            }

            /// Re-sets the logical length without touching the capacity
            ///
            /// Fails if `len` exceeds the capacity or is not a multiple of
            /// the element size.
            #[inline]
            pub fn resize(&mut self, len: usize) -> $crate::view::ViewResult {
                self.check_aligned(len)?;
                if len > self.capacity() {
                    return Err($crate::view::ViewError::OutOfRange);
                }
                self.len = len;
                Ok(())
            }

            /// Reads a value of `T` out of the view at `start`
            #[inline]
            pub fn get_zerocopy<T: ::zerocopy::FromBytes>(
                &self,
                start: usize,
            ) -> $crate::view::ViewResult<T> {
                let size = core::mem::size_of::<T>();
                self.check_aligned(size)?;
                let end = self.check_range(start, size)?;
                T::read_from_bytes(&self.as_slice()[start..end])
                    .map_err(|_| $crate::view::ViewError::OutOfRange)
            }

            /// Writes the view to `stream` in the length-prefixed wire
            /// format, padding to the format's alignment boundary
            #[inline]
            pub fn write<S: $crate::stream::StreamMut>(
                &self,
                stream: &mut S,
            ) -> $crate::view::ViewResult {
                let len = u32::try_from(self.len)
                    .map_err(|_| $crate::view::ViewError::LengthOverflow)?;
                stream.write_u32(len)?;
                stream.write_slice(self.as_slice())?;
                stream.align($crate::stream::ALIGNMENT)
            }

            /// Copies the logical bytes into a `Vec`
            #[cfg(feature = "alloc")]
            #[inline]
            pub fn to_vec(&self) -> ::alloc::vec::Vec<u8> {
                self.as_slice().to_vec()
            }

            #[inline]
            pub(crate) fn check_aligned(&self, value: usize) -> $crate::view::ViewResult {
                if value % self.element_size.get() != 0 {
                    return Err($crate::view::ViewError::Misaligned(value));
                }
                Ok(())
            }

            #[inline]
            pub(crate) fn check_range(
                &self,
                start: usize,
                count: usize,
            ) -> $crate::view::ViewResult<usize> {
                let end = start
                    .checked_add(count)
                    .ok_or($crate::view::ViewError::LengthOverflow)?;
                if end > self.len {
                    return Err($crate::view::ViewError::OutOfRange);
                }
                Ok(end)
            }
        }

        impl<'a> PartialEq for $ty<'a> {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                self.element_size == other.element_size && self.as_slice() == other.as_slice()
            }
        }

        impl<'a> Eq for $ty<'a> {}
    };
}

pub(crate) use impl_view;

#[cfg(test)]
mod bolero_harnesses {
    use super::*;

    #[test]
    #[cfg_attr(kani, kani::proof)]
    fn bolero_test_error_display() {
        bolero::check!()
            .with_type()
            .cloned()
            .for_each(|error: ViewError| Some(error.to_string().len()));
    }
}
