// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::{fmt, sync::Arc};

use colbatch_abi::ErrorCode;

type Observer = Arc<dyn Fn(ErrorCode) + Send + Sync>;

/// Handle returned by [`ErrorObservers::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Callbacks notified synchronously, in subscription order, whenever a native
/// aggregate result is translated into an error.
#[derive(Default)]
pub struct ErrorObservers {
	observers: Vec<(ObserverId, Observer)>,
	next_id: u64,
}

impl ErrorObservers {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
	where
		F: Fn(ErrorCode) + Send + Sync + 'static,
	{
		let id = ObserverId(self.next_id);
		self.next_id += 1;
		self.observers.push((id, Arc::new(observer)));
		id
	}

	/// Returns `false` if `id` was not subscribed
	pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
		let before = self.observers.len();
		self.observers.retain(|(observer_id, _)| *observer_id != id);
		self.observers.len() != before
	}

	pub fn len(&self) -> usize {
		self.observers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.observers.is_empty()
	}

	pub(crate) fn notify(&self, code: ErrorCode) {
		for (_, observer) in &self.observers {
			observer(code);
		}
	}
}

impl fmt::Debug for ErrorObservers {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ErrorObservers").field("count", &self.observers.len()).finish()
	}
}
