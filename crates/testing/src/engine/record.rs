// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::collections::BTreeMap;

use colbatch_abi::{
	ColumnId,
	data::{RetrieveColumnFFI, SetColumnFFI},
	options::{
		RETRIEVE_NULL_ON_ZERO_LENGTH, SET_APPEND_LV, SET_OVERWRITE_LV, SET_REVERT_TO_DEFAULT, SET_UNIQUE_MULTI_VALUES,
		SET_ZERO_LENGTH, has_option,
	},
	result::{
		ERR_BAD_ITAG_SEQUENCE, ERR_COLUMN_TOO_BIG, ERR_INVALID_BUFFER_SIZE, ERR_MULTI_VALUED_DUPLICATE, SUCCESS,
		WRN_BUFFER_TRUNCATED, WRN_COLUMN_NULL,
	},
};

use super::ColumnDef;

/// Column values of the one record, multi-values in itag order
#[derive(Debug, Default)]
pub(super) struct Record {
	values: BTreeMap<ColumnId, Vec<Vec<u8>>>,
}

impl Record {
	pub(super) fn get(&self, column_id: ColumnId, multi_value_index: u32) -> Option<&[u8]> {
		let index = (multi_value_index as usize).checked_sub(1)?;
		self.values.get(&column_id)?.get(index).map(Vec::as_slice)
	}

	pub(super) fn count(&self, column_id: ColumnId) -> usize {
		self.values.get(&column_id).map_or(0, Vec::len)
	}

	/// The first column after `column_id` holding a value
	pub(super) fn next_after(&self, column_id: ColumnId) -> ColumnId {
		self.values
			.range(ColumnId(column_id.0.saturating_add(1))..)
			.find(|(_, values)| !values.is_empty())
			.map_or(ColumnId::NONE, |(id, _)| *id)
	}

	pub(super) fn set(
		&mut self,
		column_id: ColumnId,
		def: &ColumnDef,
		descriptor: &SetColumnFFI,
		data: Option<&[u8]>,
	) -> i32 {
		let values = self.values.entry(column_id).or_default();
		let options = descriptor.options;

		if has_option(options, SET_REVERT_TO_DEFAULT) {
			values.clear();
			return SUCCESS;
		}

		let index = if !def.multi_valued {
			0
		} else if descriptor.multi_value_index == 0 {
			values.len()
		} else {
			(descriptor.multi_value_index - 1) as usize
		};

		let bytes = match data {
			Some(bytes) if !bytes.is_empty() || has_option(options, SET_ZERO_LENGTH) => bytes,
			_ => {
				if index < values.len() {
					values.remove(index);
				}
				return SUCCESS;
			}
		};

		let long_value = has_option(options, SET_APPEND_LV) || has_option(options, SET_OVERWRITE_LV);
		if let Some(size) = def.kind.fixed_size() {
			if long_value || bytes.len() != size {
				return ERR_INVALID_BUFFER_SIZE;
			}
		}

		let existing = values.get(index).cloned().unwrap_or_default();
		let new = if has_option(options, SET_APPEND_LV) {
			let mut new = existing;
			new.extend_from_slice(bytes);
			new
		} else if has_option(options, SET_OVERWRITE_LV) {
			let mut new = existing;
			let offset = descriptor.long_value_offset as usize;
			if new.len() < offset + bytes.len() {
				new.resize(offset + bytes.len(), 0);
			}
			new[offset..offset + bytes.len()].copy_from_slice(bytes);
			new
		} else {
			bytes.to_vec()
		};

		if def.max_size.is_some_and(|max| new.len() > max) {
			return ERR_COLUMN_TOO_BIG;
		}
		if has_option(options, SET_UNIQUE_MULTI_VALUES)
			&& values.iter().enumerate().any(|(i, value)| i != index && *value == new)
		{
			return ERR_MULTI_VALUED_DUPLICATE;
		}

		if index < values.len() {
			values[index] = new;
		} else {
			values.push(new);
		}
		SUCCESS
	}

	/// Copy the requested value into `destination`, returning the per-column
	/// result and the size of the value from the long-value offset on
	pub(super) fn retrieve(
		&self,
		column_id: ColumnId,
		def: &ColumnDef,
		descriptor: &RetrieveColumnFFI,
		destination: &mut [u8],
	) -> (i32, u32) {
		if descriptor.multi_value_index == 0 {
			return (ERR_BAD_ITAG_SEQUENCE, 0);
		}
		let index = if def.multi_valued {
			descriptor.multi_value_index
		} else {
			1
		};
		let Some(value) = self.get(column_id, index) else {
			return (WRN_COLUMN_NULL, 0);
		};
		if value.is_empty() && has_option(descriptor.options, RETRIEVE_NULL_ON_ZERO_LENGTH) {
			return (WRN_COLUMN_NULL, 0);
		}

		let start = (descriptor.long_value_offset as usize).min(value.len());
		let remaining = &value[start..];
		let copied = remaining.len().min(destination.len());
		destination[..copied].copy_from_slice(&remaining[..copied]);

		let err = if remaining.len() > destination.len() {
			WRN_BUFFER_TRUNCATED
		} else {
			SUCCESS
		};
		(err, remaining.len() as u32)
	}
}
