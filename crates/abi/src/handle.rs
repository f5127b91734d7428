// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

/// Session handle, issued by the engine's session management
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SesId(pub usize);

/// Cursor handle on an open table
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TableId(pub usize);

/// Engine assigned column identifier
///
/// Opaque to the host. It is passed through to the engine unchecked, an
/// unknown id surfaces as a per-column error after the batch call.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ColumnId(pub u32);

impl ColumnId {
	/// The "no column" id reported when no further tagged column exists
	pub const NONE: ColumnId = ColumnId(0);

	pub const fn value(self) -> u32 {
		self.0
	}
}

impl From<u32> for ColumnId {
	fn from(value: u32) -> Self {
		Self(value)
	}
}

impl Display for ColumnId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "column#{}", self.0)
	}
}
