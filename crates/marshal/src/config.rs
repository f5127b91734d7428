// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use serde::Deserialize;

/// Inline scratch bytes available to one batch set call
pub const DEFAULT_SCRATCH_CAPACITY: usize = 128;

/// Initial destination size for variable-length typed retrieval
pub const DEFAULT_RETRIEVE_BUFFER_SIZE: usize = 256;

/// Configuration for batch marshaling
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MarshalConfig {
	/// Payloads are copied into a scratch region of this many bytes while it
	/// has room; anything that does not fit is pinned in place instead.
	pub scratch_capacity: usize,
	/// Destination size first tried for TEXT and BYTES columns by
	/// typed retrieval before resizing to the reported size.
	pub retrieve_buffer_size: usize,
}

impl Default for MarshalConfig {
	fn default() -> Self {
		Self {
			scratch_capacity: DEFAULT_SCRATCH_CAPACITY,
			retrieve_buffer_size: DEFAULT_RETRIEVE_BUFFER_SIZE,
		}
	}
}

impl MarshalConfig {
	pub fn with_scratch_capacity(mut self, scratch_capacity: usize) -> Self {
		self.scratch_capacity = scratch_capacity;
		self
	}

	pub fn with_retrieve_buffer_size(mut self, retrieve_buffer_size: usize) -> Self {
		self.retrieve_buffer_size = retrieve_buffer_size;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let config = MarshalConfig::default();
		assert_eq!(config.scratch_capacity, 128);
		assert_eq!(config.retrieve_buffer_size, 256);
	}

	#[test]
	fn test_deserialize_partial() {
		let config: MarshalConfig = serde_json::from_str(r#"{ "scratch_capacity": 32 }"#).unwrap();
		assert_eq!(config.scratch_capacity, 32);
		assert_eq!(config.retrieve_buffer_size, DEFAULT_RETRIEVE_BUFFER_SIZE);
	}
}
