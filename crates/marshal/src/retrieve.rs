// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Batch retrieve marshaling

use core::{ffi::c_void, ptr::null_mut};

use colbatch_abi::{
	ColumnId, ErrorCode, SesId, TableId, WarningCode,
	data::RetrieveColumnFFI,
	engine::NativeApi,
	result::{SUCCESS, WRN_BUFFER_TRUNCATED, WRN_COLUMN_NULL},
};
use smallvec::SmallVec;
use tracing::{instrument, trace};

use crate::{
	check::check,
	context::MarshalContext,
	error::{Error, Result},
	pin::PinnedBuffers,
};

/// A column to read into a caller-owned destination
#[derive(Debug)]
pub struct RetrieveColumn<'a> {
	pub column_id: ColumnId,
	/// Destination, `None` only discovers the value size
	pub buffer: Option<&'a mut [u8]>,
	/// Number of bytes of `buffer` the engine may write
	pub data_size: usize,
	/// Upper bound on the bytes considered, independent of `data_size`
	pub max_data_size: Option<usize>,
	/// `RETRIEVE_*` option flags
	pub options: u32,
	/// Byte offset into a long value to start reading from
	pub long_value_offset: u32,
	/// 1-based multi-value index
	pub multi_value_index: u32,
	actual_size: usize,
	next_tagged: ColumnId,
	error: Option<ErrorCode>,
}

impl<'a> RetrieveColumn<'a> {
	pub fn new(column_id: ColumnId, buffer: &'a mut [u8]) -> Self {
		let data_size = buffer.len();
		Self {
			column_id,
			buffer: Some(buffer),
			data_size,
			max_data_size: None,
			options: 0,
			long_value_offset: 0,
			multi_value_index: 1,
			actual_size: 0,
			next_tagged: ColumnId::NONE,
			error: None,
		}
	}

	/// A request that only reports the size of the stored value
	pub fn size_only(column_id: ColumnId) -> Self {
		Self {
			column_id,
			buffer: None,
			data_size: 0,
			max_data_size: None,
			options: 0,
			long_value_offset: 0,
			multi_value_index: 1,
			actual_size: 0,
			next_tagged: ColumnId::NONE,
			error: None,
		}
	}

	pub fn with_options(mut self, options: u32) -> Self {
		self.options = options;
		self
	}

	pub fn with_max_data_size(mut self, max_data_size: usize) -> Self {
		self.max_data_size = Some(max_data_size);
		self
	}

	pub fn with_long_value_offset(mut self, long_value_offset: u32) -> Self {
		self.long_value_offset = long_value_offset;
		self
	}

	pub fn with_multi_value_index(mut self, multi_value_index: u32) -> Self {
		self.multi_value_index = multi_value_index;
		self
	}

	/// Bytes the engine is allowed to write
	pub fn capacity(&self) -> usize {
		match self.max_data_size {
			Some(max) => self.data_size.min(max),
			None => self.data_size,
		}
	}

	/// Full size of the stored value, as reported by the last call
	pub fn actual_size(&self) -> usize {
		self.actual_size
	}

	pub fn next_tagged(&self) -> ColumnId {
		self.next_tagged
	}

	pub fn error(&self) -> Option<ErrorCode> {
		self.error
	}

	pub fn truncated(&self) -> bool {
		self.error.map(|e| e.code()) == Some(WRN_BUFFER_TRUNCATED) || self.actual_size > self.capacity()
	}

	pub fn is_null(&self) -> bool {
		self.error.map(|e| e.code()) == Some(WRN_COLUMN_NULL)
	}

	/// The bytes written by the last call
	pub fn data(&self) -> Option<&[u8]> {
		if self.is_null() || self.error.is_some_and(|e| e.is_error()) {
			return None;
		}
		let written = self.actual_size.min(self.capacity());
		self.buffer.as_deref().map(|buffer| &buffer[..written])
	}

	pub(crate) fn check_data_size(&self) -> Result<()> {
		match &self.buffer {
			None if self.data_size != 0 => Err(Error::ArgumentOutOfRange {
				name: "data_size",
				value: self.data_size,
				reason: "must be zero when buffer is absent",
			}),
			Some(buffer) if self.data_size > buffer.len() => Err(Error::ArgumentOutOfRange {
				name: "data_size",
				value: self.data_size,
				reason: "cannot be greater than the length of buffer",
			}),
			_ => Ok(()),
		}
	}
}

#[instrument(name = "marshal::retrieve_columns", level = "trace", skip_all, fields(count = count))]
pub(crate) fn retrieve_columns<E: NativeApi>(
	engine: &E,
	ctx: &MarshalContext,
	sesid: SesId,
	tableid: TableId,
	columns: &mut [RetrieveColumn<'_>],
	count: usize,
) -> Result<WarningCode> {
	if count > columns.len() {
		return Err(Error::count_out_of_range(count));
	}
	for column in &columns[..count] {
		column.check_data_size()?;
	}
	let native_count = u32::try_from(count).map_err(|_| Error::CountOverflow {
		count,
	})?;

	let (err, descriptors) = {
		let mut pins = PinnedBuffers::new(ctx.counters());
		let mut descriptors: SmallVec<[RetrieveColumnFFI; 16]> = SmallVec::with_capacity(count);

		for column in columns[..count].iter_mut() {
			let capacity = column.capacity();
			let data_len = u32::try_from(capacity).map_err(|_| Error::ArgumentOutOfRange {
				name: "data_size",
				value: capacity,
				reason: "exceeds the native buffer limit",
			})?;
			let data = match column.buffer.as_deref_mut() {
				Some(buffer) => pins.pin_mut(&mut buffer[..capacity]) as *mut c_void,
				None => null_mut(),
			};
			descriptors.push(RetrieveColumnFFI {
				data,
				data_len,
				options: column.options,
				long_value_offset: column.long_value_offset,
				multi_value_index: column.multi_value_index,
				..RetrieveColumnFFI::empty(column.column_id)
			});
		}

		ctx.counters().native_call();
		trace!(pins = pins.len(), "issuing native retrieve");

		// SAFETY: `descriptors` holds exactly `count` entries and every data
		// pointer targets a destination exclusively borrowed until `pins` drops.
		let err = unsafe { engine.retrieve_columns(sesid, tableid, descriptors.as_mut_ptr(), native_count) };
		(err, descriptors)
	};

	let mut truncated = false;
	for (column, descriptor) in columns.iter_mut().zip(descriptors.iter()) {
		column.actual_size = descriptor.actual_len as usize;
		column.next_tagged = descriptor.next_tagged;
		column.error = Some(ErrorCode(descriptor.err));
		truncated |= column.truncated();
	}

	if err == SUCCESS && truncated {
		return check(ctx, WRN_BUFFER_TRUNCATED);
	}
	check(ctx, err)
}
