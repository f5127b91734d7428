// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! C ABI definitions for native batch column access
//!
//! This crate provides the stable C ABI that a record storage engine exposes for
//! setting and retrieving many columns of the current record in one call. It
//! defines FFI-safe handles, the per-column descriptor layouts, option flags,
//! result codes and the function table a host uses to reach the engine.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod data;
pub mod engine;
pub mod handle;
pub mod options;
pub mod result;

pub use handle::{ColumnId, SesId, TableId};
pub use result::{ErrorCode, WarningCode};
