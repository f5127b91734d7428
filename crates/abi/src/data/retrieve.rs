// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::{ffi::c_void, ptr::null_mut};

use crate::{handle::ColumnId, result::SUCCESS};

/// FFI-safe descriptor for retrieving one column value
///
/// The engine copies at most `data_len` bytes into `data` and always reports the
/// full size of the stored value in `actual_len`, so `actual_len > data_len`
/// means the destination was too small.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct RetrieveColumnFFI {
	/// Column to read
	pub column_id: ColumnId,
	/// Destination buffer, may be null to only discover the size
	pub data: *mut c_void,
	/// Capacity of `data` in bytes
	pub data_len: u32,
	/// Size of the stored value, written by the engine
	pub actual_len: u32,
	/// `RETRIEVE_*` option flags
	pub options: u32,
	/// Byte offset into a long value to start reading from
	pub long_value_offset: u32,
	/// 1-based multi-value index
	pub multi_value_index: u32,
	/// Next tagged column, written by the engine when enumerating tags
	pub next_tagged: ColumnId,
	/// Per-column result, written by the engine
	pub err: i32,
}

impl RetrieveColumnFFI {
	/// Create a size-discovery descriptor with no destination
	pub const fn empty(column_id: ColumnId) -> Self {
		Self {
			column_id,
			data: null_mut(),
			data_len: 0,
			actual_len: 0,
			options: 0,
			long_value_offset: 0,
			multi_value_index: 1,
			next_tagged: ColumnId::NONE,
			err: SUCCESS,
		}
	}
}
