// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Batch column marshaling
//!
//! Renders typed column values into the engine's native descriptor arrays,
//! issues exactly one native call per batch and distributes the per-column and
//! aggregate result codes back to the caller. Per-column failures are always
//! data (the entry's error slot); only the aggregate result of the native call
//! can become an [`Error`].

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod check;
pub mod config;
pub mod context;
pub mod cursor;
pub mod error;
pub mod observer;
mod pin;
pub mod retrieve;
mod scratch;
pub mod set;
pub mod typed;
pub mod value;

pub use colbatch_abi::{ColumnId, ErrorCode, SesId, TableId, WarningCode, engine::NativeApi};
pub use colbatch_type::{ColumnKind, DateTime, Utf16Text, Uuid, Value};
pub use config::MarshalConfig;
pub use context::{MarshalContext, MarshalStats};
pub use cursor::Cursor;
pub use error::{Error, Result};
pub use observer::{ErrorObservers, ObserverId};
pub use retrieve::RetrieveColumn;
pub use set::SetColumn;
pub use typed::RetrieveValue;
pub use value::ColumnValue;
