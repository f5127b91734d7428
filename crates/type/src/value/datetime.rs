// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{
	Deserialize, Deserializer, Serialize, Serializer,
	de::{self, Visitor},
};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Days between the OLE automation epoch (1899-12-30) and the Unix epoch
const OA_EPOCH_OFFSET_DAYS: i64 = 25_569;

/// Exclusive lower bound of accepted OLE automation dates
const OA_MIN: f64 = -657_435.0;

/// Exclusive upper bound of accepted OLE automation dates (10000-01-01)
const OA_MAX: f64 = 2_958_466.0;

/// A UTC date and time with millisecond precision.
///
/// Stored in the engine as an OLE automation date: an `f64` counting days since
/// 1899-12-30, the fraction being the time of day.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DateTime {
	// Days since Unix epoch (1970-01-01)
	days_since_epoch: i32,
	// Milliseconds since midnight, [0, 86_400_000)
	millis_of_day: u32,
}

// Calendar utilities
impl DateTime {
	#[inline]
	fn is_leap_year(year: i32) -> bool {
		(year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
	}

	#[inline]
	fn days_in_month(year: i32, month: u32) -> u32 {
		match month {
			1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
			4 | 6 | 9 | 11 => 30,
			2 => {
				if Self::is_leap_year(year) {
					29
				} else {
					28
				}
			}
			_ => 0,
		}
	}

	/// Convert year/month/day to days since Unix epoch
	fn ymd_to_days_since_epoch(year: i32, month: u32, day: u32) -> Option<i32> {
		if month < 1 || month > 12 || day < 1 || day > Self::days_in_month(year, month) {
			return None;
		}

		// Howard Hinnant's days_from_civil, March based year
		let (y, m) = if month <= 2 {
			(year - 1, month as i32 + 9)
		} else {
			(year, month as i32 - 3)
		};

		let era = if y >= 0 {
			y
		} else {
			y - 399
		} / 400;
		let yoe = y - era * 400;
		let doy = (153 * m + 2) / 5 + day as i32 - 1;
		let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;

		Some(era * 146097 + doe - 719468)
	}

	/// Convert days since Unix epoch to year/month/day
	fn days_since_epoch_to_ymd(days: i32) -> (i32, u32, u32) {
		let days_since_ce = days + 719468;

		let era = if days_since_ce >= 0 {
			days_since_ce
		} else {
			days_since_ce - 146096
		} / 146097;
		let doe = days_since_ce - era * 146097;
		let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
		let y = yoe + era * 400;
		let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
		let mp = (5 * doy + 2) / 153;
		let d = doy - (153 * mp + 2) / 5 + 1;
		let m = if mp < 10 {
			mp + 3
		} else {
			mp - 9
		};
		let year = if m <= 2 {
			y + 1
		} else {
			y
		};

		(year, m as u32, d as u32)
	}
}

impl DateTime {
	/// Earliest year an OLE automation date can represent
	pub const MIN_YEAR: i32 = 100;
	/// Latest year an OLE automation date can represent
	pub const MAX_YEAR: i32 = 9999;

	pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32, millis: u32) -> Option<Self> {
		if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
			return None;
		}
		if hour > 23 || minute > 59 || second > 59 || millis > 999 {
			return None;
		}
		let days_since_epoch = Self::ymd_to_days_since_epoch(year, month, day)?;
		let millis_of_day = ((hour * 60 + minute) * 60 + second) * 1000 + millis;
		Some(Self {
			days_since_epoch,
			millis_of_day,
		})
	}

	pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
		Self::new(year, month, day, 0, 0, 0, 0)
	}

	/// Create from milliseconds since the Unix epoch, within years 100..=9999
	pub fn from_timestamp_millis(millis: i64) -> Option<Self> {
		let days = millis.div_euclid(MILLIS_PER_DAY);
		let millis_of_day = millis.rem_euclid(MILLIS_PER_DAY) as u32;
		let days_since_epoch = i32::try_from(days).ok()?;
		let (year, _, _) = Self::days_since_epoch_to_ymd(days_since_epoch);
		if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
			return None;
		}
		Some(Self {
			days_since_epoch,
			millis_of_day,
		})
	}

	pub fn timestamp_millis(&self) -> i64 {
		self.days_since_epoch as i64 * MILLIS_PER_DAY + self.millis_of_day as i64
	}

	pub fn year(&self) -> i32 {
		Self::days_since_epoch_to_ymd(self.days_since_epoch).0
	}

	pub fn month(&self) -> u32 {
		Self::days_since_epoch_to_ymd(self.days_since_epoch).1
	}

	pub fn day(&self) -> u32 {
		Self::days_since_epoch_to_ymd(self.days_since_epoch).2
	}

	pub fn hour(&self) -> u32 {
		self.millis_of_day / 3_600_000
	}

	pub fn minute(&self) -> u32 {
		(self.millis_of_day / 60_000) % 60
	}

	pub fn second(&self) -> u32 {
		(self.millis_of_day / 1000) % 60
	}

	pub fn millisecond(&self) -> u32 {
		self.millis_of_day % 1000
	}

	/// Convert to an OLE automation date.
	///
	/// Dates before 1899-12-30 keep the fraction measured forward from the
	/// integral day, so -1.25 is 1899-12-29 06:00.
	pub fn to_oa_date(&self) -> f64 {
		let mut millis = self.timestamp_millis() + OA_EPOCH_OFFSET_DAYS * MILLIS_PER_DAY;
		if millis < 0 {
			let frac = millis % MILLIS_PER_DAY;
			if frac != 0 {
				millis -= (MILLIS_PER_DAY + frac) * 2;
			}
		}
		millis as f64 / MILLIS_PER_DAY as f64
	}

	/// Convert from an OLE automation date, rounding to the nearest millisecond.
	///
	/// Returns `None` for NaN or values outside years 100..=9999.
	pub fn from_oa_date(value: f64) -> Option<Self> {
		if !(value > OA_MIN && value < OA_MAX) {
			return None;
		}
		let rounding = if value >= 0.0 {
			0.5
		} else {
			-0.5
		};
		let mut millis = (value * MILLIS_PER_DAY as f64 + rounding) as i64;
		if millis < 0 {
			millis -= (millis % MILLIS_PER_DAY) * 2;
		}
		Self::from_timestamp_millis(millis - OA_EPOCH_OFFSET_DAYS * MILLIS_PER_DAY)
	}
}

impl Display for DateTime {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let (year, month, day) = Self::days_since_epoch_to_ymd(self.days_since_epoch);
		write!(
			f,
			"{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
			year,
			month,
			day,
			self.hour(),
			self.minute(),
			self.second(),
			self.millisecond()
		)
	}
}

// Serde implementation for ISO 8601 format
impl Serialize for DateTime {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&self.to_string())
	}
}

struct DateTimeVisitor;

impl<'de> Visitor<'de> for DateTimeVisitor {
	type Value = DateTime;

	fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
		formatter.write_str("a date time in ISO 8601 format (YYYY-MM-DDTHH:MM:SS.sssZ)")
	}

	fn visit_str<E>(self, value: &str) -> Result<DateTime, E>
	where
		E: de::Error,
	{
		let invalid = || E::custom(format!("invalid date time: {}", value));

		let trimmed = value.strip_suffix('Z').unwrap_or(value);
		let (date_part, time_part) = trimmed.split_once('T').ok_or_else(invalid)?;

		let mut date = date_part.splitn(3, '-');
		let year = date.next().and_then(|s| s.parse::<i32>().ok()).ok_or_else(invalid)?;
		let month = date.next().and_then(|s| s.parse::<u32>().ok()).ok_or_else(invalid)?;
		let day = date.next().and_then(|s| s.parse::<u32>().ok()).ok_or_else(invalid)?;

		let (hms, millis) = match time_part.split_once('.') {
			Some((hms, frac)) => (hms, frac.parse::<u32>().map_err(|_| invalid())?),
			None => (time_part, 0),
		};
		let mut time = hms.splitn(3, ':');
		let hour = time.next().and_then(|s| s.parse::<u32>().ok()).ok_or_else(invalid)?;
		let minute = time.next().and_then(|s| s.parse::<u32>().ok()).ok_or_else(invalid)?;
		let second = time.next().and_then(|s| s.parse::<u32>().ok()).ok_or_else(invalid)?;

		DateTime::new(year, month, day, hour, minute, second, millis).ok_or_else(invalid)
	}
}

impl<'de> Deserialize<'de> for DateTime {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_str(DateTimeVisitor)
	}
}

#[cfg(test)]
pub mod tests {
	use super::*;

	#[test]
	fn test_oa_epoch() {
		let dt = DateTime::from_ymd(1899, 12, 30).unwrap();
		assert_eq!(dt.to_oa_date(), 0.0);
		assert_eq!(DateTime::from_oa_date(0.0), Some(dt));
	}

	#[test]
	fn test_oa_known_values() {
		let dt = DateTime::from_ymd(1970, 1, 1).unwrap();
		assert_eq!(dt.to_oa_date(), 25569.0);

		let dt = DateTime::new(2000, 1, 1, 12, 0, 0, 0).unwrap();
		assert_eq!(dt.to_oa_date(), 36526.5);
	}

	#[test]
	fn test_oa_negative_fraction_counts_forward() {
		let dt = DateTime::new(1899, 12, 29, 6, 0, 0, 0).unwrap();
		assert_eq!(dt.to_oa_date(), -1.25);
		assert_eq!(DateTime::from_oa_date(-1.25), Some(dt));
	}

	#[test]
	fn test_oa_round_trip_millis() {
		let dt = DateTime::new(2024, 2, 29, 23, 59, 59, 999).unwrap();
		assert_eq!(DateTime::from_oa_date(dt.to_oa_date()), Some(dt));

		let dt = DateTime::new(1601, 7, 4, 3, 14, 15, 926).unwrap();
		assert_eq!(DateTime::from_oa_date(dt.to_oa_date()), Some(dt));
	}

	#[test]
	fn test_oa_out_of_range() {
		assert_eq!(DateTime::from_oa_date(f64::NAN), None);
		assert_eq!(DateTime::from_oa_date(3_000_000.0), None);
		assert_eq!(DateTime::from_oa_date(-700_000.0), None);
	}

	#[test]
	fn test_year_range() {
		assert!(DateTime::from_ymd(99, 12, 31).is_none());
		assert!(DateTime::from_ymd(50, 1, 1).is_none());
		assert!(DateTime::from_ymd(10000, 1, 1).is_none());

		let first = DateTime::from_ymd(DateTime::MIN_YEAR, 1, 1).unwrap();
		assert_eq!(first.to_oa_date(), -657_434.0);
		assert_eq!(DateTime::from_oa_date(first.to_oa_date()), Some(first));
		assert!(DateTime::from_timestamp_millis(first.timestamp_millis() - 1).is_none());

		let last = DateTime::new(DateTime::MAX_YEAR, 12, 31, 23, 59, 59, 999).unwrap();
		assert_eq!(DateTime::from_oa_date(last.to_oa_date()), Some(last));
		assert!(DateTime::from_timestamp_millis(last.timestamp_millis() + 1).is_none());
	}

	#[test]
	fn test_invalid_components() {
		assert!(DateTime::new(2023, 2, 29, 0, 0, 0, 0).is_none());
		assert!(DateTime::new(2024, 1, 1, 24, 0, 0, 0).is_none());
		assert!(DateTime::new(2024, 13, 1, 0, 0, 0, 0).is_none());
	}

	#[test]
	fn test_display() {
		let dt = DateTime::new(2024, 3, 15, 9, 5, 7, 42).unwrap();
		assert_eq!(dt.to_string(), "2024-03-15T09:05:07.042Z");
	}

	#[test]
	fn test_serde_round_trip() {
		let dt = DateTime::new(1999, 12, 31, 23, 59, 58, 1).unwrap();
		let json = serde_json::to_string(&dt).unwrap();
		assert_eq!(json, "\"1999-12-31T23:59:58.001Z\"");
		let back: DateTime = serde_json::from_str(&json).unwrap();
		assert_eq!(back, dt);
	}
}
