// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use colbatch_abi::{ColumnId, ErrorCode, options::SET_ZERO_LENGTH};
use colbatch_type::{Rendered, Value};

/// One column to set in a batch
///
/// `value == None` leaves the column without a value (the engine removes it or
/// falls back to the default), while an empty `Text` or `Bytes` value sets an
/// explicit zero-length value.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnValue {
	pub column_id: ColumnId,
	/// `SET_*` option flags
	pub options: u32,
	/// 1-based position within a multi-valued column
	pub multi_value_index: u32,
	pub value: Option<Value>,
	error: Option<ErrorCode>,
}

impl ColumnValue {
	pub fn new(column_id: ColumnId, value: impl Into<Value>) -> Self {
		Self {
			column_id,
			options: 0,
			multi_value_index: 1,
			value: Some(value.into()),
			error: None,
		}
	}

	pub fn absent(column_id: ColumnId) -> Self {
		Self {
			column_id,
			options: 0,
			multi_value_index: 1,
			value: None,
			error: None,
		}
	}

	pub fn with_options(mut self, options: u32) -> Self {
		self.options = options;
		self
	}

	pub fn with_multi_value_index(mut self, multi_value_index: u32) -> Self {
		self.multi_value_index = multi_value_index;
		self
	}

	/// Result of this column in the last batch call it took part in,
	/// `None` before any call completed.
	pub fn error(&self) -> Option<ErrorCode> {
		self.error
	}

	pub(crate) fn set_error(&mut self, code: i32) {
		self.error = Some(ErrorCode(code));
	}

	/// Options and payload to submit.
	///
	/// A present zero-length payload gets [`SET_ZERO_LENGTH`] so the engine can
	/// tell it apart from an absent value, which is submitted with no payload.
	pub(crate) fn render(&self) -> (u32, Option<Rendered<'_>>) {
		match &self.value {
			None => (self.options, None),
			Some(value) => {
				let rendered = value.render();
				let options = if rendered.is_empty() {
					self.options | SET_ZERO_LENGTH
				} else {
					self.options
				};
				(options, Some(rendered))
			}
		}
	}
}
