// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{
	data::{RetrieveColumnFFI, SetColumnFFI},
	engine::NativeApi,
	handle::{SesId, TableId},
};

/// Function table of a natively loaded engine
///
/// Hosts fill this from the engine's exported symbols. All function pointers
/// must be valid (non-null).
#[repr(C)]
#[derive(Clone, Copy)]
pub struct EngineVTableFFI {
	/// Set multiple columns of the record being prepared
	///
	/// # Parameters
	/// - `sesid`: Session handle
	/// - `tableid`: Cursor handle
	/// - `columns`: Array of set descriptors, `err` is written per entry
	/// - `count`: Number of descriptors
	///
	/// # Returns
	/// - 0 on success, positive warning, negative error code on failure
	pub set_columns: extern "C" fn(sesid: SesId, tableid: TableId, columns: *mut SetColumnFFI, count: u32) -> i32,

	/// Retrieve multiple columns of the current record
	///
	/// # Parameters
	/// - `sesid`: Session handle
	/// - `tableid`: Cursor handle
	/// - `columns`: Array of retrieve descriptors, `actual_len` and `err` are written per entry
	/// - `count`: Number of descriptors
	///
	/// # Returns
	/// - 0 on success, `WRN_BUFFER_TRUNCATED` if any entry was truncated, negative error code on failure
	pub retrieve_columns:
		extern "C" fn(sesid: SesId, tableid: TableId, columns: *mut RetrieveColumnFFI, count: u32) -> i32,
}

impl NativeApi for EngineVTableFFI {
	unsafe fn set_columns(&self, sesid: SesId, tableid: TableId, columns: *mut SetColumnFFI, count: u32) -> i32 {
		(self.set_columns)(sesid, tableid, columns, count)
	}

	unsafe fn retrieve_columns(
		&self,
		sesid: SesId,
		tableid: TableId,
		columns: *mut RetrieveColumnFFI,
		count: u32,
	) -> i32 {
		(self.retrieve_columns)(sesid, tableid, columns, count)
	}
}
