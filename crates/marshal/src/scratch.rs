// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use smallvec::SmallVec;

use crate::config::DEFAULT_SCRATCH_CAPACITY;

/// Fixed-capacity region small payloads are copied into for one call.
///
/// Copies only record an offset. Pointers are taken with [`Scratch::ptr_at`]
/// once filling is done, so moving the region while it fills is harmless.
/// The region never grows past the capacity it was created with.
pub(crate) struct Scratch {
	buf: SmallVec<[u8; DEFAULT_SCRATCH_CAPACITY]>,
	capacity: usize,
}

impl Scratch {
	pub(crate) fn new(capacity: usize) -> Self {
		Self {
			buf: SmallVec::with_capacity(capacity),
			capacity,
		}
	}

	pub(crate) fn remaining(&self) -> usize {
		self.capacity - self.buf.len()
	}

	/// Copy `bytes` in if they fit, returning their offset
	pub(crate) fn try_push(&mut self, bytes: &[u8]) -> Option<usize> {
		if bytes.len() > self.remaining() {
			return None;
		}
		let offset = self.buf.len();
		self.buf.extend_from_slice(bytes);
		Some(offset)
	}

	pub(crate) fn used(&self) -> usize {
		self.buf.len()
	}

	pub(crate) fn ptr_at(&self, offset: usize) -> *const u8 {
		debug_assert!(offset <= self.buf.len());
		// SAFETY: offset is at most len, one-past-the-end is a valid pointer
		unsafe { self.buf.as_ptr().add(offset) }
	}
}
