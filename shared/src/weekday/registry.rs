//! Weekday registry
//!
//! The single table of weekday display names and canonical keys. Keys are
//! derived from the display names with [`crate::text::normalize`] when the
//! table is built, so the two columns cannot drift apart. The process-wide
//! instance is built on first use and never mutated.

use super::{NotAWeekday, WeekdayId};
use crate::text;
use std::sync::LazyLock;

const DISPLAY_NAMES: [(WeekdayId, &str); 7] = [
    (WeekdayId::Sunday, "Domingo"),
    (WeekdayId::Monday, "Lunes"),
    (WeekdayId::Tuesday, "Martes"),
    (WeekdayId::Wednesday, "Miércoles"),
    (WeekdayId::Thursday, "Jueves"),
    (WeekdayId::Friday, "Viernes"),
    (WeekdayId::Saturday, "Sábado"),
];

static GLOBAL: LazyLock<WeekdayRegistry> = LazyLock::new(WeekdayRegistry::new);

/// Registry table entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdayEntry {
    pub id: WeekdayId,
    /// Accented display form ("Miércoles")
    pub display_name: &'static str,
    /// ASCII lookup key ("miercoles")
    pub normalized_key: String,
}

/// Bidirectional weekday lookup
///
/// Read-only after construction; share freely across threads.
#[derive(Debug, Clone)]
pub struct WeekdayRegistry {
    /// Indexed by `WeekdayId::index()`
    entries: [WeekdayEntry; 7],
}

impl WeekdayRegistry {
    pub fn new() -> Self {
        let entries = DISPLAY_NAMES.map(|(id, display_name)| WeekdayEntry {
            id,
            display_name,
            normalized_key: text::normalize(display_name),
        });
        Self { entries }
    }

    /// The process-wide registry
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// Resolve an untrusted label to a weekday.
    ///
    /// The label is normalized and stripped of all whitespace before lookup.
    /// Unknown labels are reported, never mapped to a default day.
    pub fn resolve(&self, raw: &str) -> Result<WeekdayId, NotAWeekday> {
        let key = text::compact(raw);
        self.entries
            .iter()
            .find(|entry| entry.normalized_key == key)
            .map(|entry| entry.id)
            .ok_or_else(|| NotAWeekday::new(raw))
    }

    pub fn display_name_of(&self, id: WeekdayId) -> &'static str {
        self.entry(id).display_name
    }

    pub fn key_of(&self, id: WeekdayId) -> &str {
        &self.entry(id).normalized_key
    }

    /// The seven ids, Sunday first. Restartable.
    pub fn ordered_ids(&self) -> impl Iterator<Item = WeekdayId> + '_ {
        self.entries.iter().map(|entry| entry.id)
    }

    pub fn entries(&self) -> &[WeekdayEntry] {
        &self.entries
    }

    fn entry(&self, id: WeekdayId) -> &WeekdayEntry {
        &self.entries[usize::from(id.index())]
    }
}

impl Default for WeekdayRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a label against the global registry
pub fn resolve(raw: &str) -> Result<WeekdayId, NotAWeekday> {
    WeekdayRegistry::global().resolve(raw)
}

pub fn display_name_of(id: WeekdayId) -> &'static str {
    WeekdayRegistry::global().display_name_of(id)
}

pub fn key_of(id: WeekdayId) -> &'static str {
    WeekdayRegistry::global().key_of(id)
}

pub fn ordered_ids() -> impl Iterator<Item = WeekdayId> {
    WeekdayRegistry::global().ordered_ids()
}
