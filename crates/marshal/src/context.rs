// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::sync::atomic::{AtomicU64, Ordering};

use colbatch_abi::ErrorCode;

use crate::{config::MarshalConfig, observer::ErrorObservers};

/// Counters of the work done by the marshalers of one context
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarshalStats {
	/// Native batch calls issued
	pub native_calls: u64,
	/// Payload bytes copied into scratch regions
	pub scratch_bytes: u64,
	/// Buffers pinned for the duration of a call
	pub pins: u64,
	/// Pinned buffers released after a call
	pub releases: u64,
}

#[derive(Debug, Default)]
pub(crate) struct Counters {
	native_calls: AtomicU64,
	scratch_bytes: AtomicU64,
	pins: AtomicU64,
	releases: AtomicU64,
}

impl Counters {
	pub(crate) fn native_call(&self) {
		self.native_calls.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn scratch(&self, bytes: usize) {
		self.scratch_bytes.fetch_add(bytes as u64, Ordering::Relaxed);
	}

	pub(crate) fn pin(&self) {
		self.pins.fetch_add(1, Ordering::Relaxed);
	}

	pub(crate) fn release(&self, count: usize) {
		self.releases.fetch_add(count as u64, Ordering::Relaxed);
	}

	fn snapshot(&self) -> MarshalStats {
		MarshalStats {
			native_calls: self.native_calls.load(Ordering::Relaxed),
			scratch_bytes: self.scratch_bytes.load(Ordering::Relaxed),
			pins: self.pins.load(Ordering::Relaxed),
			releases: self.releases.load(Ordering::Relaxed),
		}
	}

	fn reset(&self) {
		self.native_calls.store(0, Ordering::Relaxed);
		self.scratch_bytes.store(0, Ordering::Relaxed);
		self.pins.store(0, Ordering::Relaxed);
		self.releases.store(0, Ordering::Relaxed);
	}
}

/// State shared by every batch call made through a [`crate::Cursor`]
///
/// Holds the configuration, the error observers the result translator
/// notifies, and the marshaling counters. Subscribing or unsubscribing
/// observers needs `&mut`, so it cannot race with a call borrowing the context.
#[derive(Debug, Default)]
pub struct MarshalContext {
	config: MarshalConfig,
	observers: ErrorObservers,
	counters: Counters,
}

impl MarshalContext {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_config(config: MarshalConfig) -> Self {
		Self {
			config,
			..Self::default()
		}
	}

	pub fn config(&self) -> &MarshalConfig {
		&self.config
	}

	pub fn observers(&self) -> &ErrorObservers {
		&self.observers
	}

	pub fn observers_mut(&mut self) -> &mut ErrorObservers {
		&mut self.observers
	}

	/// Shorthand for `observers_mut().subscribe(observer)`
	pub fn on_error<F>(&mut self, observer: F) -> crate::observer::ObserverId
	where
		F: Fn(ErrorCode) + Send + Sync + 'static,
	{
		self.observers.subscribe(observer)
	}

	pub fn stats(&self) -> MarshalStats {
		self.counters.snapshot()
	}

	pub fn reset_stats(&self) {
		self.counters.reset();
	}

	pub(crate) fn counters(&self) -> &Counters {
		&self.counters
	}
}
