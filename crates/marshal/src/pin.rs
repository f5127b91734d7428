// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::marker::PhantomData;

use smallvec::SmallVec;
use tracing::trace;

use crate::context::Counters;

enum Pinned<'a> {
	/// Caller-owned bytes, read by the engine in place
	Shared(&'a [u8]),
	/// A rendering that did not fit the scratch region
	Owned(Box<[u8]>),
	/// Caller-owned destination, written by the engine in place
	Exclusive {
		len: usize,
		_buffer: PhantomData<&'a mut [u8]>,
	},
}

impl Pinned<'_> {
	fn kind(&self) -> &'static str {
		match self {
			Pinned::Shared(_) => "shared",
			Pinned::Owned(_) => "owned",
			Pinned::Exclusive {
				..
			} => "exclusive",
		}
	}

	fn len(&self) -> usize {
		match self {
			Pinned::Shared(bytes) => bytes.len(),
			Pinned::Owned(bytes) => bytes.len(),
			Pinned::Exclusive {
				len,
				..
			} => *len,
		}
	}
}

/// Buffers held stable for the duration of one native call.
///
/// Every buffer pinned here is released when the guard drops, which happens on
/// every path out of the marshaling function, including argument errors
/// raised after some buffers were already pinned.
pub(crate) struct PinnedBuffers<'a> {
	pins: SmallVec<[Pinned<'a>; 4]>,
	counters: &'a Counters,
}

impl<'a> PinnedBuffers<'a> {
	pub(crate) fn new(counters: &'a Counters) -> Self {
		Self {
			pins: SmallVec::new(),
			counters,
		}
	}

	pub(crate) fn pin(&mut self, bytes: &'a [u8]) -> *const u8 {
		let ptr = bytes.as_ptr();
		self.push(Pinned::Shared(bytes));
		ptr
	}

	pub(crate) fn pin_owned(&mut self, bytes: &[u8]) -> *const u8 {
		let owned: Box<[u8]> = bytes.into();
		// the heap allocation does not move with the box
		let ptr = owned.as_ptr();
		self.push(Pinned::Owned(owned));
		ptr
	}

	pub(crate) fn pin_mut(&mut self, buffer: &'a mut [u8]) -> *mut u8 {
		let ptr = buffer.as_mut_ptr();
		self.push(Pinned::Exclusive {
			len: buffer.len(),
			_buffer: PhantomData,
		});
		ptr
	}

	pub(crate) fn len(&self) -> usize {
		self.pins.len()
	}

	fn push(&mut self, pinned: Pinned<'a>) {
		self.counters.pin();
		trace!(kind = pinned.kind(), bytes = pinned.len(), "pinned buffer");
		self.pins.push(pinned);
	}
}

impl Drop for PinnedBuffers<'_> {
	fn drop(&mut self) {
		let count = self.pins.len();
		if count == 0 {
			return;
		}
		self.pins.clear();
		self.counters.release(count);
		trace!(count, "released pinned buffers");
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::context::MarshalContext;

	#[test]
	fn test_release_on_drop() {
		let ctx = MarshalContext::new();
		let data = vec![1u8, 2, 3];
		{
			let mut pins = PinnedBuffers::new(ctx.counters());
			assert_eq!(pins.pin(&data), data.as_ptr());
			pins.pin_owned(&[4, 5]);
			assert_eq!(pins.len(), 2);
			assert_eq!(ctx.stats().releases, 0);
		}
		let stats = ctx.stats();
		assert_eq!(stats.pins, 2);
		assert_eq!(stats.releases, 2);
	}

	#[test]
	fn test_release_on_early_return() {
		fn fails_after_pinning(pins: &mut PinnedBuffers<'_>, data: &[u8]) -> Result<(), ()> {
			pins.pin_owned(data);
			Err(())
		}

		let ctx = MarshalContext::new();
		let result = {
			let mut pins = PinnedBuffers::new(ctx.counters());
			fails_after_pinning(&mut pins, &[1])
		};
		assert!(result.is_err());
		assert_eq!(ctx.stats().pins, ctx.stats().releases);
	}

	#[test]
	fn test_owned_copy_is_stable() {
		let ctx = MarshalContext::new();
		let mut pins = PinnedBuffers::new(ctx.counters());
		let ptr = pins.pin_owned(&[9, 8, 7]);
		for _ in 0..16 {
			pins.pin_owned(&[0]);
		}
		let bytes = unsafe { std::slice::from_raw_parts(ptr, 3) };
		assert_eq!(bytes, &[9, 8, 7]);
	}
}
