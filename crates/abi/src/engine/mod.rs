// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Native batch column entry points

mod vtable;

pub use vtable::EngineVTableFFI;

use crate::{
	data::{RetrieveColumnFFI, SetColumnFFI},
	handle::{SesId, TableId},
};

/// The engine's batch column contract
///
/// Each method is one synchronous native call over a contiguous descriptor
/// array. The return value is the aggregate result code of the call; the
/// per-column outcome is written into each descriptor's `err` field.
pub trait NativeApi {
	/// Set `count` column values on the record being prepared in `tableid`
	///
	/// # Safety
	/// - `columns` must point at `count` initialized descriptors, writable for the whole call
	/// - every non-null `data` pointer must reference `data_len` readable bytes until the call returns
	unsafe fn set_columns(&self, sesid: SesId, tableid: TableId, columns: *mut SetColumnFFI, count: u32) -> i32;

	/// Retrieve `count` column values from the current record of `tableid`
	///
	/// # Safety
	/// - `columns` must point at `count` initialized descriptors, writable for the whole call
	/// - every non-null `data` pointer must reference `data_len` writable bytes until the call returns
	unsafe fn retrieve_columns(
		&self,
		sesid: SesId,
		tableid: TableId,
		columns: *mut RetrieveColumnFFI,
		count: u32,
	) -> i32;
}

impl<T: NativeApi + ?Sized> NativeApi for &T {
	unsafe fn set_columns(&self, sesid: SesId, tableid: TableId, columns: *mut SetColumnFFI, count: u32) -> i32 {
		unsafe { (**self).set_columns(sesid, tableid, columns, count) }
	}

	unsafe fn retrieve_columns(
		&self,
		sesid: SesId,
		tableid: TableId,
		columns: *mut RetrieveColumnFFI,
		count: u32,
	) -> i32 {
		unsafe { (**self).retrieve_columns(sesid, tableid, columns, count) }
	}
}
