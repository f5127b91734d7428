// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Batch column access on one open table

use colbatch_abi::{SesId, TableId, WarningCode, engine::NativeApi};

use crate::{
	context::MarshalContext,
	error::Result,
	retrieve::{self, RetrieveColumn},
	set::{self, SetColumn},
	typed::{self, RetrieveValue},
	value::ColumnValue,
};

/// A session and table handle bound to an engine and a marshal context
///
/// Every operation issues its entries in a single native batch call (typed
/// retrieval may add one more for truncated text and bytes) and translates
/// the aggregate result through the context's observers.
pub struct Cursor<'a, E: NativeApi> {
	engine: &'a E,
	ctx: &'a MarshalContext,
	sesid: SesId,
	tableid: TableId,
}

impl<'a, E: NativeApi> Cursor<'a, E> {
	pub fn new(engine: &'a E, ctx: &'a MarshalContext, sesid: SesId, tableid: TableId) -> Self {
		Self {
			engine,
			ctx,
			sesid,
			tableid,
		}
	}

	pub fn sesid(&self) -> SesId {
		self.sesid
	}

	pub fn tableid(&self) -> TableId {
		self.tableid
	}

	pub fn context(&self) -> &MarshalContext {
		self.ctx
	}

	/// Set the first `count` values of `values` in one call.
	///
	/// Each value's error slot receives its own result, whatever the
	/// aggregate outcome. Fails before calling the engine when `count`
	/// exceeds `values.len()`.
	pub fn set_columns(&self, values: &mut [ColumnValue], count: usize) -> Result<WarningCode> {
		set::set_columns(self.engine, self.ctx, self.sesid, self.tableid, values, count)
	}

	/// Set the first `count` raw columns in one call
	pub fn set_raw_columns(&self, columns: &mut [SetColumn<'_>], count: usize) -> Result<WarningCode> {
		set::set_raw_columns(self.engine, self.ctx, self.sesid, self.tableid, columns, count)
	}

	/// Retrieve the first `count` columns into their destinations in one call.
	///
	/// Returns [`WarningCode::BUFFER_TRUNCATED`] when any destination was too small.
	pub fn retrieve_columns(&self, columns: &mut [RetrieveColumn<'_>], count: usize) -> Result<WarningCode> {
		retrieve::retrieve_columns(self.engine, self.ctx, self.sesid, self.tableid, columns, count)
	}

	/// Retrieve and decode every request
	pub fn retrieve_values(&self, requests: &mut [RetrieveValue]) -> Result<WarningCode> {
		typed::retrieve_values(self.engine, self.ctx, self.sesid, self.tableid, requests)
	}
}
