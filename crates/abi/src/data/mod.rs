// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! FFI-safe descriptors exchanged with the engine for batch column access

mod retrieve;
mod set;

pub use retrieve::*;
pub use set::*;
