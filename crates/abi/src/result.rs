// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Native result codes
//!
//! Every native call returns a signed 32-bit code:
//! - `0` success
//! - positive: success qualified by a warning
//! - negative: failure

use std::fmt::{Display, Formatter};

pub const SUCCESS: i32 = 0;

pub const WRN_COLUMN_NULL: i32 = 1004;
pub const WRN_BUFFER_TRUNCATED: i32 = 1006;
pub const WRN_COLUMN_MAX_TRUNCATED: i32 = 1512;
pub const WRN_COLUMN_SET_NULL: i32 = 1068;

pub const ERR_INVALID_PARAMETER: i32 = -1003;
pub const ERR_INVALID_BUFFER_SIZE: i32 = -1047;
pub const ERR_INVALID_SESID: i32 = -1104;
pub const ERR_INVALID_TABLEID: i32 = -1310;
pub const ERR_NULL_INVALID: i32 = -1504;
pub const ERR_COLUMN_TOO_BIG: i32 = -1506;
pub const ERR_COLUMN_NOT_FOUND: i32 = -1507;
pub const ERR_MULTI_VALUED_DUPLICATE: i32 = -1525;
pub const ERR_BAD_COLUMN_ID: i32 = -1517;
pub const ERR_BAD_ITAG_SEQUENCE: i32 = -1518;
pub const ERR_NO_CURRENT_RECORD: i32 = -1603;
pub const ERR_UPDATE_NOT_PREPARED: i32 = -1609;

/// Symbolic name of a well-known code
pub fn code_name(code: i32) -> Option<&'static str> {
	let name = match code {
		SUCCESS => "Success",
		WRN_COLUMN_NULL => "ColumnNull",
		WRN_BUFFER_TRUNCATED => "BufferTruncated",
		WRN_COLUMN_MAX_TRUNCATED => "ColumnMaxTruncated",
		WRN_COLUMN_SET_NULL => "ColumnSetNull",
		ERR_INVALID_PARAMETER => "InvalidParameter",
		ERR_INVALID_BUFFER_SIZE => "InvalidBufferSize",
		ERR_INVALID_SESID => "InvalidSesid",
		ERR_INVALID_TABLEID => "InvalidTableid",
		ERR_NULL_INVALID => "NullInvalid",
		ERR_COLUMN_TOO_BIG => "ColumnTooBig",
		ERR_COLUMN_NOT_FOUND => "ColumnNotFound",
		ERR_MULTI_VALUED_DUPLICATE => "MultiValuedDuplicate",
		ERR_BAD_COLUMN_ID => "BadColumnId",
		ERR_BAD_ITAG_SEQUENCE => "BadItagSequence",
		ERR_NO_CURRENT_RECORD => "NoCurrentRecord",
		ERR_UPDATE_NOT_PREPARED => "UpdateNotPrepared",
		_ => return None,
	};
	Some(name)
}

/// A native result code as reported per column or per call
///
/// Per-column codes may be negative (the column failed), zero, or positive
/// (the column succeeded with a warning such as [`WRN_COLUMN_NULL`]).
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ErrorCode(pub i32);

impl ErrorCode {
	pub const SUCCESS: ErrorCode = ErrorCode(SUCCESS);

	pub const fn code(self) -> i32 {
		self.0
	}

	pub const fn is_success(self) -> bool {
		self.0 == SUCCESS
	}

	pub const fn is_error(self) -> bool {
		self.0 < 0
	}

	pub const fn is_warning(self) -> bool {
		self.0 > 0
	}

	pub fn name(self) -> Option<&'static str> {
		code_name(self.0)
	}
}

impl From<i32> for ErrorCode {
	fn from(code: i32) -> Self {
		Self(code)
	}
}

impl Display for ErrorCode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.name() {
			Some(name) => write!(f, "{name} ({})", self.0),
			None => write!(f, "{}", self.0),
		}
	}
}

/// A non-negative aggregate result, zero being unqualified success
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct WarningCode(pub i32);

impl WarningCode {
	pub const SUCCESS: WarningCode = WarningCode(SUCCESS);
	pub const BUFFER_TRUNCATED: WarningCode = WarningCode(WRN_BUFFER_TRUNCATED);
	pub const COLUMN_NULL: WarningCode = WarningCode(WRN_COLUMN_NULL);

	pub const fn code(self) -> i32 {
		self.0
	}

	pub const fn is_success(self) -> bool {
		self.0 == SUCCESS
	}

	pub fn name(self) -> Option<&'static str> {
		code_name(self.0)
	}
}

impl Display for WarningCode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.name() {
			Some(name) => write!(f, "{name} ({})", self.0),
			None => write!(f, "{}", self.0),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_classification() {
		assert!(ErrorCode(0).is_success());
		assert!(ErrorCode(WRN_COLUMN_NULL).is_warning());
		assert!(!ErrorCode(WRN_COLUMN_NULL).is_error());
		assert!(ErrorCode(ERR_COLUMN_NOT_FOUND).is_error());
	}

	#[test]
	fn test_display() {
		assert_eq!(ErrorCode(ERR_COLUMN_NOT_FOUND).to_string(), "ColumnNotFound (-1507)");
		assert_eq!(ErrorCode(-42).to_string(), "-42");
		assert_eq!(WarningCode::BUFFER_TRUNCATED.to_string(), "BufferTruncated (1006)");
	}
}
