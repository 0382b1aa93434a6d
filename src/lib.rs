// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![cfg_attr(all(not(test), not(feature = "std")), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(any(feature = "testing", test))]
pub mod testing;

pub mod stream;
pub mod view;

pub use stream::*;
pub use view::*;
