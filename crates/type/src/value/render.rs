// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

/// Widest fixed-size rendering (the 128-bit identifier)
pub const MAX_FIXED_SIZE: usize = 16;

/// Native byte form of a present value.
///
/// Fixed-size scalars are rendered into an inline array; variable-length values
/// borrow their own backing storage so large payloads are never copied here.
#[derive(Debug, Clone, Copy)]
pub enum Rendered<'a> {
	Inline {
		bytes: [u8; MAX_FIXED_SIZE],
		len: u8,
	},
	Borrowed(&'a [u8]),
}

impl<'a> Rendered<'a> {
	pub(crate) fn inline(src: &[u8]) -> Self {
		debug_assert!(src.len() <= MAX_FIXED_SIZE);
		let mut bytes = [0u8; MAX_FIXED_SIZE];
		bytes[..src.len()].copy_from_slice(src);
		Rendered::Inline {
			bytes,
			len: src.len() as u8,
		}
	}

	pub fn as_bytes(&self) -> &[u8] {
		match self {
			Rendered::Inline {
				bytes,
				len,
			} => &bytes[..*len as usize],
			Rendered::Borrowed(bytes) => bytes,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			Rendered::Inline {
				len,
				..
			} => *len as usize,
			Rendered::Borrowed(bytes) => bytes.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Borrowed renderings point into the value itself and can be pinned in place
	pub fn is_borrowed(&self) -> bool {
		matches!(self, Rendered::Borrowed(_))
	}
}
