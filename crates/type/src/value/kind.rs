// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Type tag of a column value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
	Boolean,
	Int1,
	Uint1,
	Int2,
	Uint2,
	Int4,
	Uint4,
	Int8,
	Uint8,
	Float4,
	Float8,
	DateTime,
	Guid,
	Text,
	Bytes,
}

impl ColumnKind {
	/// Rendered width of fixed-size kinds, `None` for variable-length kinds
	pub const fn fixed_size(self) -> Option<usize> {
		match self {
			ColumnKind::Boolean | ColumnKind::Int1 | ColumnKind::Uint1 => Some(1),
			ColumnKind::Int2 | ColumnKind::Uint2 => Some(2),
			ColumnKind::Int4 | ColumnKind::Uint4 | ColumnKind::Float4 => Some(4),
			ColumnKind::Int8 | ColumnKind::Uint8 | ColumnKind::Float8 | ColumnKind::DateTime => Some(8),
			ColumnKind::Guid => Some(16),
			ColumnKind::Text | ColumnKind::Bytes => None,
		}
	}

	pub const fn is_variable(self) -> bool {
		self.fixed_size().is_none()
	}
}

impl Display for ColumnKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			ColumnKind::Boolean => "BOOLEAN",
			ColumnKind::Int1 => "INT1",
			ColumnKind::Uint1 => "UINT1",
			ColumnKind::Int2 => "INT2",
			ColumnKind::Uint2 => "UINT2",
			ColumnKind::Int4 => "INT4",
			ColumnKind::Uint4 => "UINT4",
			ColumnKind::Int8 => "INT8",
			ColumnKind::Uint8 => "UINT8",
			ColumnKind::Float4 => "FLOAT4",
			ColumnKind::Float8 => "FLOAT8",
			ColumnKind::DateTime => "DATETIME",
			ColumnKind::Guid => "GUID",
			ColumnKind::Text => "TEXT",
			ColumnKind::Bytes => "BYTES",
		};
		f.write_str(name)
	}
}
