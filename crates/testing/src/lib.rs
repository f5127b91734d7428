// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Test support for batch column marshaling
//!
//! [`MemoryEngine`] implements the native batch contract over an in-memory
//! record, recording what each call was handed so tests can inspect the
//! descriptors the marshalers produced.

pub mod engine;

pub use engine::{ColumnDef, MemoryEngine, RetrieveSnapshot, SetSnapshot};

/// Install a fmt subscriber filtered by `RUST_LOG`, once per process
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
		)
		.with_test_writer()
		.try_init();
}
