// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::value::ColumnKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
	#[error("{kind} expects {expected} bytes, got {actual}")]
	Size {
		kind: ColumnKind,
		expected: usize,
		actual: usize,
	},

	#[error("TEXT must have an even byte length, got {actual}")]
	OddTextLength {
		actual: usize,
	},

	#[error("DATETIME value {value} is not a valid date")]
	InvalidDateTime {
		value: f64,
	},
}
