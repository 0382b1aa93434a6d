// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Block lifecycle hooks for owning containers.
//!
//! A container that allocates and frees the storage behind a view calls
//! [`BlockLifecycle::construct_block`] right after acquiring raw bytes and
//! [`BlockLifecycle::destruct_block`] right before releasing them. The
//! provided behavior covers binary-safe element types: zero-fill on
//! construction, sentinel poisoning on destruction. Containers managing
//! element types with real construction or destruction semantics override
//! the hooks.

use crate::view::{ByteView, ByteViewMut, ViewError, ViewResult};

/// The sentinel written over released blocks when poisoning is enabled
///
/// Reading this pattern back in a test is a strong signal of use-after-free.
pub const POISON_BYTE: u8 = 0xCD;

/// Controls whether released blocks are overwritten with [`POISON_BYTE`]
///
/// The default follows the build: enabled under `debug_assertions`, disabled
/// otherwise. It is ordinary runtime data, so both settings can be exercised
/// by tests regardless of the build profile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(any(test, feature = "generator"), derive(bolero_generator::TypeGenerator))]
pub enum Poisoning {
    Enabled,
    Disabled,
}

impl Poisoning {
    /// Returns the setting matching the current build profile
    #[inline]
    pub const fn for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }

    #[inline]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl Default for Poisoning {
    #[inline]
    fn default() -> Self {
        Self::for_build()
    }
}

/// Hooks invoked by an owning container around raw allocation events
pub trait BlockLifecycle {
    /// The granularity blocks passed to the hooks must honor
    fn element_size(&self) -> usize;

    /// Initializes a freshly allocated block
    ///
    /// The provided behavior zero-fills: the "no state to construct" case
    /// for binary-safe element types.
    #[inline]
    fn construct_block(&self, block: &mut [u8]) -> ViewResult {
        check_block(block, self.element_size())?;
        block.fill(0);
        Ok(())
    }

    /// Deinitializes a block about to be released
    ///
    /// With poisoning enabled the block is overwritten with [`POISON_BYTE`];
    /// disabled, the hook leaves the block untouched.
    #[inline]
    fn destruct_block(&self, block: &mut [u8], poisoning: Poisoning) -> ViewResult {
        check_block(block, self.element_size())?;
        if poisoning.is_enabled() {
            block.fill(POISON_BYTE);
        }
        Ok(())
    }

    /// [`destruct_block`] with the build-profile default poisoning setting
    ///
    /// [`destruct_block`]: Self::destruct_block
    #[inline]
    fn destruct_block_default(&self, block: &mut [u8]) -> ViewResult {
        self.destruct_block(block, Poisoning::default())
    }
}

#[inline]
fn check_block(block: &[u8], element_size: usize) -> ViewResult {
    if block.len() % element_size != 0 {
        return Err(ViewError::Misaligned(block.len()));
    }
    Ok(())
}

impl BlockLifecycle for ByteView<'_> {
    #[inline]
    fn element_size(&self) -> usize {
        ByteView::element_size(self)
    }
}

impl BlockLifecycle for ByteViewMut<'_> {
    #[inline]
    fn element_size(&self) -> usize {
        ByteViewMut::element_size(self)
    }
}
