// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::{ffi::c_void, ptr::null};

use crate::{handle::ColumnId, result::SUCCESS};

/// FFI-safe descriptor for setting one column value
///
/// One descriptor is submitted per column in a batch set call. The engine reads
/// every field except `err`, which it writes with the per-column outcome.
/// - `data == null` and `data_len == 0`: no value supplied (remove/default)
/// - `data_len == 0` with `SET_ZERO_LENGTH` in `options`: explicit empty value
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SetColumnFFI {
	/// Target column
	pub column_id: ColumnId,
	/// Value bytes, only valid for the duration of the native call
	pub data: *const c_void,
	/// Number of bytes at `data`
	pub data_len: u32,
	/// `SET_*` option flags
	pub options: u32,
	/// Byte offset into an existing long value
	pub long_value_offset: u32,
	/// 1-based multi-value index, 0 appends a new value
	pub multi_value_index: u32,
	/// Per-column result, written by the engine
	pub err: i32,
}

impl SetColumnFFI {
	/// Create a descriptor with no value and default options
	pub const fn empty(column_id: ColumnId) -> Self {
		Self {
			column_id,
			data: null(),
			data_len: 0,
			options: 0,
			long_value_offset: 0,
			multi_value_index: 1,
			err: SUCCESS,
		}
	}

	/// Check whether the descriptor points at value bytes
	pub fn has_data(&self) -> bool {
		!self.data.is_null()
	}
}
