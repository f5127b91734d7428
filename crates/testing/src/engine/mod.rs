// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! In-memory implementation of the native batch contract

mod record;

use std::{collections::HashMap, slice};

use colbatch_abi::{
	ColumnId, SesId, TableId,
	data::{RetrieveColumnFFI, SetColumnFFI},
	engine::NativeApi,
	result::{ERR_COLUMN_NOT_FOUND, SUCCESS, WRN_BUFFER_TRUNCATED},
};
use colbatch_type::ColumnKind;
use parking_lot::Mutex;
use record::Record;
use tracing::trace;

/// Schema of one column of the in-memory table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnDef {
	pub kind: ColumnKind,
	pub multi_valued: bool,
	/// Largest value accepted, in bytes
	pub max_size: Option<usize>,
}

impl ColumnDef {
	pub fn new(kind: ColumnKind) -> Self {
		Self {
			kind,
			multi_valued: false,
			max_size: None,
		}
	}

	pub fn multi_valued(mut self) -> Self {
		self.multi_valued = true;
		self
	}

	pub fn with_max_size(mut self, max_size: usize) -> Self {
		self.max_size = Some(max_size);
		self
	}
}

/// What a set call was handed for one column
#[derive(Debug, Clone, PartialEq)]
pub struct SetSnapshot {
	pub column_id: ColumnId,
	pub options: u32,
	pub data_len: u32,
	pub has_data: bool,
	pub long_value_offset: u32,
	pub multi_value_index: u32,
	/// Copy of the bytes behind the data pointer
	pub data: Vec<u8>,
}

/// What a retrieve call was handed for one column
#[derive(Debug, Clone, PartialEq)]
pub struct RetrieveSnapshot {
	pub column_id: ColumnId,
	pub options: u32,
	pub data_len: u32,
	pub has_data: bool,
	pub long_value_offset: u32,
	pub multi_value_index: u32,
}

#[derive(Debug, Default)]
struct State {
	record: Record,
	set_calls: usize,
	retrieve_calls: usize,
	last_set: Vec<SetSnapshot>,
	last_retrieve: Vec<RetrieveSnapshot>,
	fail_next: Option<i32>,
}

/// A single-record table held in memory
///
/// Set calls apply every descriptor in order and return the result of the last
/// one; retrieve calls return [`WRN_BUFFER_TRUNCATED`] when any destination
/// was too small, unless built with [`MemoryEngine::with_silent_truncation`].
#[derive(Debug, Default)]
pub struct MemoryEngine {
	columns: HashMap<ColumnId, ColumnDef>,
	silent_truncation: bool,
	state: Mutex<State>,
}

impl MemoryEngine {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_column(mut self, column_id: ColumnId, def: ColumnDef) -> Self {
		self.columns.insert(column_id, def);
		self
	}

	/// Report truncation only per column, returning success for the call
	pub fn with_silent_truncation(mut self) -> Self {
		self.silent_truncation = true;
		self
	}

	pub fn column(&self, column_id: ColumnId) -> Option<&ColumnDef> {
		self.columns.get(&column_id)
	}

	/// Make the next call return `code` without touching any descriptor
	pub fn fail_next_call(&self, code: i32) {
		self.state.lock().fail_next = Some(code);
	}

	pub fn set_calls(&self) -> usize {
		self.state.lock().set_calls
	}

	pub fn retrieve_calls(&self) -> usize {
		self.state.lock().retrieve_calls
	}

	pub fn calls(&self) -> usize {
		let state = self.state.lock();
		state.set_calls + state.retrieve_calls
	}

	pub fn last_set(&self) -> Vec<SetSnapshot> {
		self.state.lock().last_set.clone()
	}

	pub fn last_retrieve(&self) -> Vec<RetrieveSnapshot> {
		self.state.lock().last_retrieve.clone()
	}

	/// The stored bytes of `column_id` at the 1-based `multi_value_index`
	pub fn stored(&self, column_id: ColumnId, multi_value_index: u32) -> Option<Vec<u8>> {
		self.state.lock().record.get(column_id, multi_value_index).map(<[u8]>::to_vec)
	}

	pub fn value_count(&self, column_id: ColumnId) -> usize {
		self.state.lock().record.count(column_id)
	}

	/// Drop every stored value
	pub fn clear(&self) {
		self.state.lock().record = Record::default();
	}
}

impl NativeApi for MemoryEngine {
	unsafe fn set_columns(&self, _sesid: SesId, _tableid: TableId, columns: *mut SetColumnFFI, count: u32) -> i32 {
		let descriptors: &mut [SetColumnFFI] = if count == 0 {
			&mut []
		} else {
			// SAFETY: the caller guarantees `count` initialized descriptors
			unsafe { slice::from_raw_parts_mut(columns, count as usize) }
		};

		let mut state = self.state.lock();
		state.set_calls += 1;
		state.last_set.clear();
		for descriptor in descriptors.iter() {
			let data = if descriptor.has_data() && descriptor.data_len > 0 {
				// SAFETY: non-null data references `data_len` readable bytes
				unsafe { slice::from_raw_parts(descriptor.data as *const u8, descriptor.data_len as usize) }
					.to_vec()
			} else {
				Vec::new()
			};
			state.last_set.push(SetSnapshot {
				column_id: descriptor.column_id,
				options: descriptor.options,
				data_len: descriptor.data_len,
				has_data: descriptor.has_data(),
				long_value_offset: descriptor.long_value_offset,
				multi_value_index: descriptor.multi_value_index,
				data,
			});
		}

		if let Some(code) = state.fail_next.take() {
			trace!(code, "failing set call");
			return code;
		}

		let mut last = SUCCESS;
		for (descriptor, snapshot) in descriptors.iter_mut().zip(state.last_set.clone()) {
			let data = descriptor.has_data().then_some(snapshot.data.as_slice());
			descriptor.err = match self.columns.get(&descriptor.column_id) {
				Some(def) => state.record.set(descriptor.column_id, def, descriptor, data),
				None => ERR_COLUMN_NOT_FOUND,
			};
			trace!(column = %descriptor.column_id, err = descriptor.err, "set column");
			last = descriptor.err;
		}
		last
	}

	unsafe fn retrieve_columns(
		&self,
		_sesid: SesId,
		_tableid: TableId,
		columns: *mut RetrieveColumnFFI,
		count: u32,
	) -> i32 {
		let descriptors: &mut [RetrieveColumnFFI] = if count == 0 {
			&mut []
		} else {
			// SAFETY: the caller guarantees `count` initialized descriptors
			unsafe { slice::from_raw_parts_mut(columns, count as usize) }
		};

		let mut state = self.state.lock();
		state.retrieve_calls += 1;
		state.last_retrieve = descriptors
			.iter()
			.map(|descriptor| RetrieveSnapshot {
				column_id: descriptor.column_id,
				options: descriptor.options,
				data_len: descriptor.data_len,
				has_data: !descriptor.data.is_null(),
				long_value_offset: descriptor.long_value_offset,
				multi_value_index: descriptor.multi_value_index,
			})
			.collect();

		if let Some(code) = state.fail_next.take() {
			trace!(code, "failing retrieve call");
			return code;
		}

		let mut truncated = false;
		for descriptor in descriptors.iter_mut() {
			let Some(def) = self.columns.get(&descriptor.column_id) else {
				descriptor.actual_len = 0;
				descriptor.err = ERR_COLUMN_NOT_FOUND;
				continue;
			};
			let destination: &mut [u8] = if descriptor.data.is_null() || descriptor.data_len == 0 {
				&mut []
			} else {
				// SAFETY: non-null data references `data_len` writable bytes
				unsafe { slice::from_raw_parts_mut(descriptor.data as *mut u8, descriptor.data_len as usize) }
			};
			let (err, actual) = state.record.retrieve(descriptor.column_id, def, descriptor, destination);
			descriptor.err = err;
			descriptor.actual_len = actual;
			descriptor.next_tagged = state.record.next_after(descriptor.column_id);
			truncated |= err == WRN_BUFFER_TRUNCATED;
		}

		if truncated && !self.silent_truncation {
			WRN_BUFFER_TRUNCATED
		} else {
			SUCCESS
		}
	}
}
