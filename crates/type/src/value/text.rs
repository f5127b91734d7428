// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Text held in the engine's UTF-16 form.
///
/// The code units are kept already rendered in native byte order, so the bytes
/// can be handed to the engine without re-encoding.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Utf16Text {
	bytes: Vec<u8>,
}

impl Utf16Text {
	pub fn new(text: &str) -> Self {
		let mut bytes = Vec::with_capacity(text.len() * 2);
		for unit in text.encode_utf16() {
			bytes.extend_from_slice(&unit.to_ne_bytes());
		}
		Self {
			bytes,
		}
	}

	pub fn empty() -> Self {
		Self::default()
	}

	pub fn from_units(units: &[u16]) -> Self {
		let mut bytes = Vec::with_capacity(units.len() * 2);
		for unit in units {
			bytes.extend_from_slice(&unit.to_ne_bytes());
		}
		Self {
			bytes,
		}
	}

	/// Take ownership of native-order UTF-16 bytes. Returns `None` for an odd length.
	pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
		if bytes.len() % 2 != 0 {
			return None;
		}
		Some(Self {
			bytes,
		})
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	pub fn units(&self) -> impl Iterator<Item = u16> + '_ {
		self.bytes.chunks_exact(2).map(|pair| u16::from_ne_bytes([pair[0], pair[1]]))
	}

	/// Number of UTF-16 code units
	pub fn len(&self) -> usize {
		self.bytes.len() / 2
	}

	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	pub fn to_string_lossy(&self) -> String {
		char::decode_utf16(self.units()).map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER)).collect()
	}
}

impl From<&str> for Utf16Text {
	fn from(text: &str) -> Self {
		Self::new(text)
	}
}

impl From<String> for Utf16Text {
	fn from(text: String) -> Self {
		Self::new(&text)
	}
}

impl Display for Utf16Text {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.to_string_lossy())
	}
}

impl Serialize for Utf16Text {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.to_string_lossy())
	}
}

impl<'de> Deserialize<'de> for Utf16Text {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let text = String::deserialize(deserializer)?;
		Ok(Self::new(&text))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_byte_length_is_twice_units() {
		let text = Utf16Text::new("héllo");
		assert_eq!(text.len(), 5);
		assert_eq!(text.as_bytes().len(), 10);
	}

	#[test]
	fn test_surrogate_pairs() {
		let text = Utf16Text::new("a\u{1F600}");
		assert_eq!(text.len(), 3);
		assert_eq!(text.to_string_lossy(), "a\u{1F600}");
	}

	#[test]
	fn test_odd_length_rejected() {
		assert!(Utf16Text::from_bytes(vec![0x41]).is_none());
		assert_eq!(Utf16Text::from_bytes(Vec::new()), Some(Utf16Text::empty()));
	}
}
