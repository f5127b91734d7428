// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use colbatch_abi::{ColumnId, ErrorCode};
use colbatch_type::DecodeError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The aggregate result of a native call was an error code
	#[error("engine error {code}")]
	Engine {
		code: ErrorCode,
	},

	#[error("{name} out of range: {value} ({reason})")]
	ArgumentOutOfRange {
		name: &'static str,
		value: usize,
		reason: &'static str,
	},

	#[error("descriptor count {count} exceeds the native limit")]
	CountOverflow {
		count: usize,
	},

	#[error("cannot decode {column_id}: {source}")]
	Decode {
		column_id: ColumnId,
		#[source]
		source: DecodeError,
	},
}

impl Error {
	/// The native code carried by an engine error
	pub fn code(&self) -> Option<ErrorCode> {
		match self {
			Error::Engine {
				code,
			} => Some(*code),
			_ => None,
		}
	}

	pub(crate) fn count_out_of_range(count: usize) -> Self {
		Error::ArgumentOutOfRange {
			name: "count",
			value: count,
			reason: "cannot be greater than the number of entries",
		}
	}
}
