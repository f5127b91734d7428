// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Typed column values and their native byte rendering

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod error;
pub mod value;

pub use error::DecodeError;
pub use uuid::Uuid;
pub use value::{ColumnKind, DateTime, MAX_FIXED_SIZE, Rendered, Utf16Text, Value};
