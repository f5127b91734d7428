// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Option flags carried in the `options` field of the batch descriptors

/// Set: append the data to the end of an existing long value
pub const SET_APPEND_LV: u32 = 1 << 0; // 0x01

/// Set: overwrite the existing long value starting at the given offset
pub const SET_OVERWRITE_LV: u32 = 1 << 2; // 0x04

/// Set: change the size of an existing long value
pub const SET_SIZE_LV: u32 = 1 << 1; // 0x02

/// Set: force a long value to be stored apart from the record
pub const SET_SEPARATE_LV: u32 = 1 << 6; // 0x40

/// Set: explicit zero-length value, as opposed to no value at all
pub const SET_ZERO_LENGTH: u32 = 1 << 5; // 0x20

/// Set: reject the value if it duplicates another value of a multi-valued column
pub const SET_UNIQUE_MULTI_VALUES: u32 = 1 << 7; // 0x80

/// Set: like [`SET_UNIQUE_MULTI_VALUES`], comparing normalized values
pub const SET_UNIQUE_NORMALIZED_MULTI_VALUES: u32 = 1 << 8; // 0x100

/// Set: replace the column with its default value
pub const SET_REVERT_TO_DEFAULT: u32 = 1 << 9; // 0x200

/// Set: keep a long value inside the record
pub const SET_INTRINSIC_LV: u32 = 1 << 10; // 0x400

/// Retrieve: read from the copy buffer of a prepared update
pub const RETRIEVE_COPY: u32 = 1 << 0; // 0x01

/// Retrieve: read the value from the current index entry
pub const RETRIEVE_FROM_INDEX: u32 = 1 << 1; // 0x02

/// Retrieve: read the value from the primary index entry
pub const RETRIEVE_FROM_PRIMARY_BOOKMARK: u32 = 1 << 2; // 0x04

/// Retrieve: report the multi-value index instead of the data
pub const RETRIEVE_TAG: u32 = 1 << 3; // 0x08

/// Retrieve: a zero-length value is reported as null
pub const RETRIEVE_NULL_ON_ZERO_LENGTH: u32 = 1 << 4; // 0x10

/// Retrieve: skip the column default when no value is stored
pub const RETRIEVE_IGNORE_DEFAULT: u32 = 1 << 5; // 0x20

/// Helper to check if a flag is set
///
/// # Example
/// ```
/// use colbatch_abi::options::*;
///
/// let options = SET_ZERO_LENGTH | SET_UNIQUE_MULTI_VALUES;
/// assert!(has_option(options, SET_ZERO_LENGTH));
/// assert!(!has_option(options, SET_APPEND_LV));
/// ```
#[inline]
pub const fn has_option(options: u32, option: u32) -> bool {
	(options & option) != 0
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_set_flag_values() {
		assert_eq!(SET_APPEND_LV, 0x01);
		assert_eq!(SET_SIZE_LV, 0x02);
		assert_eq!(SET_OVERWRITE_LV, 0x04);
		assert_eq!(SET_ZERO_LENGTH, 0x20);
		assert_eq!(SET_SEPARATE_LV, 0x40);
		assert_eq!(SET_UNIQUE_MULTI_VALUES, 0x80);
		assert_eq!(SET_UNIQUE_NORMALIZED_MULTI_VALUES, 0x100);
		assert_eq!(SET_REVERT_TO_DEFAULT, 0x200);
		assert_eq!(SET_INTRINSIC_LV, 0x400);
	}

	#[test]
	fn test_retrieve_flag_values() {
		assert_eq!(RETRIEVE_COPY, 0x01);
		assert_eq!(RETRIEVE_FROM_INDEX, 0x02);
		assert_eq!(RETRIEVE_FROM_PRIMARY_BOOKMARK, 0x04);
		assert_eq!(RETRIEVE_TAG, 0x08);
		assert_eq!(RETRIEVE_NULL_ON_ZERO_LENGTH, 0x10);
		assert_eq!(RETRIEVE_IGNORE_DEFAULT, 0x20);
	}

	#[test]
	fn test_set_flags_are_distinct() {
		let flags = [
			SET_APPEND_LV,
			SET_SIZE_LV,
			SET_OVERWRITE_LV,
			SET_ZERO_LENGTH,
			SET_SEPARATE_LV,
			SET_UNIQUE_MULTI_VALUES,
			SET_UNIQUE_NORMALIZED_MULTI_VALUES,
			SET_REVERT_TO_DEFAULT,
			SET_INTRINSIC_LV,
		];
		let mut seen = 0u32;
		for flag in flags {
			assert_eq!(flag.count_ones(), 1);
			assert_eq!(seen & flag, 0);
			seen |= flag;
		}
	}
}
