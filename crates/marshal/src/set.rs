// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Batch set marshaling

use core::{ffi::c_void, ptr::null};

use colbatch_abi::{
	ColumnId, ErrorCode, SesId, TableId, WarningCode, data::SetColumnFFI, engine::NativeApi,
};
use colbatch_type::Rendered;
use smallvec::SmallVec;
use tracing::{instrument, trace};

use crate::{
	check::check,
	context::MarshalContext,
	error::{Error, Result},
	pin::PinnedBuffers,
	scratch::Scratch,
	value::ColumnValue,
};

/// Descriptors kept on the stack before spilling to the heap
const INLINE_DESCRIPTORS: usize = 16;

type Descriptors = SmallVec<[SetColumnFFI; INLINE_DESCRIPTORS]>;

/// A raw column to set, pointing at caller-owned bytes
#[derive(Debug, Clone, PartialEq)]
pub struct SetColumn<'a> {
	pub column_id: ColumnId,
	/// Value bytes, `None` sets no value
	pub data: Option<&'a [u8]>,
	/// Number of bytes of `data` to use
	pub data_size: usize,
	/// `SET_*` option flags, passed through unchanged
	pub options: u32,
	/// Byte offset into an existing long value
	pub long_value_offset: u32,
	/// 1-based multi-value index, 0 appends to a multi-valued column
	pub multi_value_index: u32,
	error: Option<ErrorCode>,
}

impl<'a> SetColumn<'a> {
	pub fn new(column_id: ColumnId, data: &'a [u8]) -> Self {
		Self {
			column_id,
			data: Some(data),
			data_size: data.len(),
			options: 0,
			long_value_offset: 0,
			multi_value_index: 1,
			error: None,
		}
	}

	pub fn null(column_id: ColumnId) -> Self {
		Self {
			column_id,
			data: None,
			data_size: 0,
			options: 0,
			long_value_offset: 0,
			multi_value_index: 1,
			error: None,
		}
	}

	pub fn with_options(mut self, options: u32) -> Self {
		self.options = options;
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

	pub fn error(&self) -> Option<ErrorCode> {
		self.error
	}

	pub(crate) fn check_data_size(&self) -> Result<()> {
		match self.data {
			None if self.data_size != 0 => Err(Error::ArgumentOutOfRange {
				name: "data_size",
				value: self.data_size,
				reason: "must be zero when data is absent",
			}),
			Some(data) if self.data_size > data.len() => Err(Error::ArgumentOutOfRange {
				name: "data_size",
				value: self.data_size,
				reason: "cannot be greater than the length of data",
			}),
			_ => Ok(()),
		}
	}
}

/// A descriptor still missing its data pointer, plus the payload backing it
struct Pending<'a> {
	descriptor: SetColumnFFI,
	payload: Option<Rendered<'a>>,
}

enum Backing {
	None,
	Scratch(usize),
	Pinned(*const u8),
}

#[instrument(name = "marshal::set_columns", level = "trace", skip_all, fields(count = count))]
pub(crate) fn set_columns<E: NativeApi>(
	engine: &E,
	ctx: &MarshalContext,
	sesid: SesId,
	tableid: TableId,
	values: &mut [ColumnValue],
	count: usize,
) -> Result<WarningCode> {
	if count > values.len() {
		return Err(Error::count_out_of_range(count));
	}

	let pending = values[..count].iter().map(|value| {
		let (options, payload) = value.render();
		Pending {
			descriptor: SetColumnFFI {
				options,
				multi_value_index: value.multi_value_index,
				..SetColumnFFI::empty(value.column_id)
			},
			payload,
		}
	});
	let (err, descriptors) = submit(engine, ctx, sesid, tableid, pending, count)?;

	for (value, descriptor) in values.iter_mut().zip(descriptors.iter()) {
		value.set_error(descriptor.err);
	}

	check(ctx, err)
}

#[instrument(name = "marshal::set_raw_columns", level = "trace", skip_all, fields(count = count))]
pub(crate) fn set_raw_columns<E: NativeApi>(
	engine: &E,
	ctx: &MarshalContext,
	sesid: SesId,
	tableid: TableId,
	columns: &mut [SetColumn<'_>],
	count: usize,
) -> Result<WarningCode> {
	if count > columns.len() {
		return Err(Error::count_out_of_range(count));
	}
	for column in &columns[..count] {
		column.check_data_size()?;
	}

	let pending = columns[..count].iter().map(|column| Pending {
		descriptor: SetColumnFFI {
			options: column.options,
			long_value_offset: column.long_value_offset,
			multi_value_index: column.multi_value_index,
			..SetColumnFFI::empty(column.column_id)
		},
		payload: column.data.map(|data| Rendered::Borrowed(&data[..column.data_size])),
	});
	let (err, descriptors) = submit(engine, ctx, sesid, tableid, pending, count)?;

	for (column, descriptor) in columns.iter_mut().zip(descriptors.iter()) {
		column.error = Some(ErrorCode(descriptor.err));
	}

	check(ctx, err)
}

/// Fill the descriptor array and issue the one native call.
///
/// Payloads are copied into the scratch region in order while they fit;
/// the rest are pinned. Pins are released when this function returns, on
/// the error paths as well, so the returned descriptors must only be read
/// for their `err` fields.
fn submit<'a, E: NativeApi>(
	engine: &E,
	ctx: &'a MarshalContext,
	sesid: SesId,
	tableid: TableId,
	pending: impl Iterator<Item = Pending<'a>>,
	count: usize,
) -> Result<(i32, Descriptors)> {
	let native_count = u32::try_from(count).map_err(|_| Error::CountOverflow {
		count,
	})?;

	let mut descriptors = Descriptors::with_capacity(count);
	let mut backing: SmallVec<[Backing; INLINE_DESCRIPTORS]> = SmallVec::with_capacity(count);
	let mut scratch = Scratch::new(ctx.config().scratch_capacity);
	let mut pins = PinnedBuffers::new(ctx.counters());

	for Pending {
		mut descriptor,
		payload,
	} in pending
	{
		let source = match payload {
			None => Backing::None,
			Some(rendered) => {
				let bytes = rendered.as_bytes();
				descriptor.data_len = u32::try_from(bytes.len()).map_err(|_| Error::ArgumentOutOfRange {
					name: "data_size",
					value: bytes.len(),
					reason: "exceeds the native buffer limit",
				})?;

				if let Some(offset) = scratch.try_push(bytes) {
					Backing::Scratch(offset)
				} else {
					trace!(column = %descriptor.column_id, bytes = bytes.len(), "payload exceeds scratch");
					match rendered {
						Rendered::Borrowed(borrowed) => Backing::Pinned(pins.pin(borrowed)),
						Rendered::Inline {
							..
						} => Backing::Pinned(pins.pin_owned(bytes)),
					}
				}
			}
		};
		descriptors.push(descriptor);
		backing.push(source);
	}
	debug_assert_eq!(descriptors.len(), count);

	for (descriptor, source) in descriptors.iter_mut().zip(backing.iter()) {
		descriptor.data = match source {
			Backing::None => null(),
			Backing::Scratch(offset) => scratch.ptr_at(*offset) as *const c_void,
			Backing::Pinned(ptr) => *ptr as *const c_void,
		};
	}

	ctx.counters().scratch(scratch.used());
	ctx.counters().native_call();
	trace!(scratch = scratch.used(), pins = pins.len(), "issuing native set");

	// SAFETY: `descriptors` holds exactly `count` entries, and every data
	// pointer targets `scratch`, a pinned buffer or caller data borrowed for
	// 'a, all of which outlive the call.
	let err = unsafe { engine.set_columns(sesid, tableid, descriptors.as_mut_ptr(), native_count) };

	Ok((err, descriptors))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_data_size_within_data() {
		let mut column = SetColumn::new(ColumnId(1), b"abcd");
		assert_eq!(column.data_size, 4);
		assert!(column.check_data_size().is_ok());

		column.data_size = 0;
		assert!(column.check_data_size().is_ok());

		column.data_size = 5;
		assert!(matches!(
			column.check_data_size(),
			Err(Error::ArgumentOutOfRange {
				name: "data_size",
				value: 5,
				..
			})
		));
	}

	#[test]
	fn test_absent_data_needs_zero_size() {
		let mut column = SetColumn::null(ColumnId(1));
		assert!(column.check_data_size().is_ok());

		column.data_size = 1;
		assert!(column.check_data_size().is_err());
	}

	#[test]
	fn test_defaults() {
		let column = SetColumn::null(ColumnId(1));
		assert_eq!(column.multi_value_index, 1);
		assert_eq!(column.options, 0);
		assert!(column.error().is_none());
	}
}
