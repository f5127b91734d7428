// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod datetime;
mod kind;
mod render;
mod text;

pub use datetime::DateTime;
pub use kind::ColumnKind;
pub use render::{MAX_FIXED_SIZE, Rendered};
pub use text::Utf16Text;

use crate::error::DecodeError;

/// A present column value, represented as a native Rust type.
///
/// Absence of a value is expressed by the caller as `Option<Value>::None`, an
/// empty `Text` or `Bytes` is a present zero-length value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
	/// A boolean, stored as a single 0x00 / 0xFF byte
	Boolean(bool),
	/// A 1-byte signed integer
	Int1(i8),
	/// A 1-byte unsigned integer
	Uint1(u8),
	/// A 2-byte signed integer
	Int2(i16),
	/// A 2-byte unsigned integer
	Uint2(u16),
	/// A 4-byte signed integer
	Int4(i32),
	/// A 4-byte unsigned integer
	Uint4(u32),
	/// An 8-byte signed integer
	Int8(i64),
	/// An 8-byte unsigned integer
	Uint8(u64),
	/// A 4-byte floating point
	Float4(f32),
	/// An 8-byte floating point
	Float8(f64),
	/// A date and time, stored as its OLE automation day count
	DateTime(DateTime),
	/// A 128-bit identifier, stored in the mixed-endian GUID layout
	Guid(Uuid),
	/// UTF-16 text
	Text(Utf16Text),
	/// Raw bytes
	Bytes(Vec<u8>),
}

impl Value {
	pub fn text(text: impl Into<Utf16Text>) -> Self {
		Value::Text(text.into())
	}

	pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
		Value::Bytes(bytes.into())
	}

	pub fn kind(&self) -> ColumnKind {
		match self {
			Value::Boolean(_) => ColumnKind::Boolean,
			Value::Int1(_) => ColumnKind::Int1,
			Value::Uint1(_) => ColumnKind::Uint1,
			Value::Int2(_) => ColumnKind::Int2,
			Value::Uint2(_) => ColumnKind::Uint2,
			Value::Int4(_) => ColumnKind::Int4,
			Value::Uint4(_) => ColumnKind::Uint4,
			Value::Int8(_) => ColumnKind::Int8,
			Value::Uint8(_) => ColumnKind::Uint8,
			Value::Float4(_) => ColumnKind::Float4,
			Value::Float8(_) => ColumnKind::Float8,
			Value::DateTime(_) => ColumnKind::DateTime,
			Value::Guid(_) => ColumnKind::Guid,
			Value::Text(_) => ColumnKind::Text,
			Value::Bytes(_) => ColumnKind::Bytes,
		}
	}

	/// Render into the engine's native byte form
	pub fn render(&self) -> Rendered<'_> {
		match self {
			Value::Boolean(v) => Rendered::inline(&[if *v {
				0xFF
			} else {
				0x00
			}]),
			Value::Int1(v) => Rendered::inline(&v.to_ne_bytes()),
			Value::Uint1(v) => Rendered::inline(&v.to_ne_bytes()),
			Value::Int2(v) => Rendered::inline(&v.to_ne_bytes()),
			Value::Uint2(v) => Rendered::inline(&v.to_ne_bytes()),
			Value::Int4(v) => Rendered::inline(&v.to_ne_bytes()),
			Value::Uint4(v) => Rendered::inline(&v.to_ne_bytes()),
			Value::Int8(v) => Rendered::inline(&v.to_ne_bytes()),
			Value::Uint8(v) => Rendered::inline(&v.to_ne_bytes()),
			Value::Float4(v) => Rendered::inline(&v.to_ne_bytes()),
			Value::Float8(v) => Rendered::inline(&v.to_ne_bytes()),
			Value::DateTime(v) => Rendered::inline(&v.to_oa_date().to_ne_bytes()),
			Value::Guid(v) => Rendered::inline(&v.to_bytes_le()),
			Value::Text(v) => Rendered::Borrowed(v.as_bytes()),
			Value::Bytes(v) => Rendered::Borrowed(v),
		}
	}

	/// Decode a value of `kind` from the bytes the engine returned
	pub fn from_bytes(kind: ColumnKind, bytes: &[u8]) -> Result<Value, DecodeError> {
		let value = match kind {
			ColumnKind::Boolean => Value::Boolean(fixed::<1>(kind, bytes)?[0] != 0),
			ColumnKind::Int1 => Value::Int1(i8::from_ne_bytes(fixed(kind, bytes)?)),
			ColumnKind::Uint1 => Value::Uint1(u8::from_ne_bytes(fixed(kind, bytes)?)),
			ColumnKind::Int2 => Value::Int2(i16::from_ne_bytes(fixed(kind, bytes)?)),
			ColumnKind::Uint2 => Value::Uint2(u16::from_ne_bytes(fixed(kind, bytes)?)),
			ColumnKind::Int4 => Value::Int4(i32::from_ne_bytes(fixed(kind, bytes)?)),
			ColumnKind::Uint4 => Value::Uint4(u32::from_ne_bytes(fixed(kind, bytes)?)),
			ColumnKind::Int8 => Value::Int8(i64::from_ne_bytes(fixed(kind, bytes)?)),
			ColumnKind::Uint8 => Value::Uint8(u64::from_ne_bytes(fixed(kind, bytes)?)),
			ColumnKind::Float4 => Value::Float4(f32::from_ne_bytes(fixed(kind, bytes)?)),
			ColumnKind::Float8 => Value::Float8(f64::from_ne_bytes(fixed(kind, bytes)?)),
			ColumnKind::DateTime => {
				let oa = f64::from_ne_bytes(fixed(kind, bytes)?);
				let datetime = DateTime::from_oa_date(oa).ok_or(DecodeError::InvalidDateTime {
					value: oa,
				})?;
				Value::DateTime(datetime)
			}
			ColumnKind::Guid => Value::Guid(Uuid::from_bytes_le(fixed(kind, bytes)?)),
			ColumnKind::Text => {
				let text = Utf16Text::from_bytes(bytes.to_vec()).ok_or(DecodeError::OddTextLength {
					actual: bytes.len(),
				})?;
				Value::Text(text)
			}
			ColumnKind::Bytes => Value::Bytes(bytes.to_vec()),
		};
		Ok(value)
	}
}

fn fixed<const N: usize>(kind: ColumnKind, bytes: &[u8]) -> Result<[u8; N], DecodeError> {
	bytes.try_into().map_err(|_| DecodeError::Size {
		kind,
		expected: N,
		actual: bytes.len(),
	})
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Boolean(v) => Display::fmt(v, f),
			Value::Int1(v) => Display::fmt(v, f),
			Value::Uint1(v) => Display::fmt(v, f),
			Value::Int2(v) => Display::fmt(v, f),
			Value::Uint2(v) => Display::fmt(v, f),
			Value::Int4(v) => Display::fmt(v, f),
			Value::Uint4(v) => Display::fmt(v, f),
			Value::Int8(v) => Display::fmt(v, f),
			Value::Uint8(v) => Display::fmt(v, f),
			Value::Float4(v) => Display::fmt(v, f),
			Value::Float8(v) => Display::fmt(v, f),
			Value::DateTime(v) => Display::fmt(v, f),
			Value::Guid(v) => Display::fmt(v, f),
			Value::Text(v) => Display::fmt(v, f),
			Value::Bytes(v) => {
				f.write_str("0x")?;
				for b in v {
					write!(f, "{:02x}", b)?;
				}
				Ok(())
			}
		}
	}
}

macro_rules! impl_from_scalar {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl From<$ty> for Value {
				fn from(v: $ty) -> Self {
					Value::$variant(v)
				}
			}
		)*
	};
}

impl_from_scalar! {
	bool => Boolean,
	i8 => Int1,
	u8 => Uint1,
	i16 => Int2,
	u16 => Uint2,
	i32 => Int4,
	u32 => Uint4,
	i64 => Int8,
	u64 => Uint8,
	f32 => Float4,
	f64 => Float8,
	DateTime => DateTime,
	Uuid => Guid,
	Utf16Text => Text,
	Vec<u8> => Bytes,
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Text(Utf16Text::new(v))
	}
}
