//! Weekday identifiers
//!
//! Every weekday label that enters the system (tab clicks, date-picker
//! callbacks, persisted document keys, spreadsheet headers) is turned into a
//! [`WeekdayId`] through [`resolve`] before it is used as a key, compared or
//! displayed. Nothing downstream indexes by raw strings.
//!
//! - [`WeekdayId`] - closed enum, Sunday = 0 … Saturday = 6
//! - [`WeekdayRegistry`] - display names and canonical keys, built once
//! - [`are_equal`] / [`matches`] - resolution-based day comparison

mod compare;
mod registry;

pub use compare::{are_equal, matches};
pub use registry::{
    WeekdayEntry, WeekdayRegistry, display_name_of, key_of, ordered_ids, resolve,
};

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the seven canonical weekdays
///
/// Ordering follows `Date.getDay()` indexing: Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum WeekdayId {
    Sunday = 0,
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
}

impl WeekdayId {
    /// All weekdays, Sunday first
    pub const ALL: [WeekdayId; 7] = [
        WeekdayId::Sunday,
        WeekdayId::Monday,
        WeekdayId::Tuesday,
        WeekdayId::Wednesday,
        WeekdayId::Thursday,
        WeekdayId::Friday,
        WeekdayId::Saturday,
    ];

    /// Day index, 0 = Sunday … 6 = Saturday
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Weekday a calendar date falls on
    pub fn from_date(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    /// Accented Spanish display name ("Miércoles")
    pub fn display_name(self) -> &'static str {
        display_name_of(self)
    }

    /// Canonical ASCII key ("miercoles")
    pub fn key(self) -> &'static str {
        key_of(self)
    }
}

impl From<Weekday> for WeekdayId {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Sun => Self::Sunday,
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
        }
    }
}

impl From<WeekdayId> for Weekday {
    fn from(day: WeekdayId) -> Self {
        match day {
            WeekdayId::Sunday => Weekday::Sun,
            WeekdayId::Monday => Weekday::Mon,
            WeekdayId::Tuesday => Weekday::Tue,
            WeekdayId::Wednesday => Weekday::Wed,
            WeekdayId::Thursday => Weekday::Thu,
            WeekdayId::Friday => Weekday::Fri,
            WeekdayId::Saturday => Weekday::Sat,
        }
    }
}

impl fmt::Display for WeekdayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for WeekdayId {
    type Err = NotAWeekday;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve(s)
    }
}

// Persisted as the canonical key; read back through `resolve`, so legacy
// spellings deserialize and garbage keys are rejected.
impl Serialize for WeekdayId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl<'de> Deserialize<'de> for WeekdayId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        resolve(&raw).map_err(serde::de::Error::custom)
    }
}

/// A label that does not name any of the seven weekdays
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a weekday: {label:?}")]
pub struct NotAWeekday {
    /// The label as received
    pub label: String,
}

impl NotAWeekday {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_order_is_sunday_first() {
        let indexes: Vec<u8> = WeekdayId::ALL.iter().map(|d| d.index()).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3, 4, 5, 6]);
        assert!(WeekdayId::Sunday < WeekdayId::Saturday);
    }

    #[test]
    fn test_from_index() {
        assert_eq!(WeekdayId::from_index(3), Some(WeekdayId::Wednesday));
        assert_eq!(WeekdayId::from_index(7), None);
    }

    #[test]
    fn test_from_date() {
        // 2024-01-03 was a Wednesday
        let date = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert_eq!(WeekdayId::from_date(date), WeekdayId::Wednesday);

        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(WeekdayId::from_date(sunday), WeekdayId::Sunday);
    }

    #[test]
    fn test_chrono_round_trip() {
        for day in WeekdayId::ALL {
            let chrono_day: Weekday = day.into();
            assert_eq!(WeekdayId::from(chrono_day), day);
            assert_eq!(chrono_day.num_days_from_sunday(), u32::from(day.index()));
        }
    }

    #[test]
    fn test_display_and_from_str() {
        assert_eq!(WeekdayId::Saturday.to_string(), "Sábado");
        assert_eq!("MIÉRCOLES".parse::<WeekdayId>(), Ok(WeekdayId::Wednesday));
        assert_eq!(
            "someday".parse::<WeekdayId>(),
            Err(NotAWeekday::new("someday"))
        );
    }

    #[test]
    fn test_serde_uses_canonical_key() {
        let json = serde_json::to_string(&WeekdayId::Wednesday).unwrap();
        assert_eq!(json, "\"miercoles\"");

        let day: WeekdayId = serde_json::from_str("\"Miércoles\"").unwrap();
        assert_eq!(day, WeekdayId::Wednesday);

        let err = serde_json::from_str::<WeekdayId>("\"xyzzy\"");
        assert!(err.is_err());
    }

    #[test]
    fn test_not_a_weekday_message() {
        let err = NotAWeekday::new("Xyzzy");
        assert_eq!(err.to_string(), "not a weekday: \"Xyzzy\"");
    }
}
