//! Menu data reconciliation
//!
//! Collapses a weekday-keyed mapping with inconsistent or duplicate keys
//! ("Miércoles", "miercoles", "MIERCOLES") into the canonical seven-day
//! mapping. Runs on every document load and every save.
//!
//! # Rules
//!
//! | Input | Outcome |
//! |-------|---------|
//! | key does not resolve | entry dropped, reported |
//! | key resolves, slot empty | value coerced into a [`DayMenu`] |
//! | key resolves, slot taken | later entry replaces the earlier one, reported |
//! | weekday absent after all entries | empty [`DayMenu`] |
//! | input not an object | [`ReconcileError::MalformedMenuInput`] |
//!
//! Replacing on collision keeps the behavior observed in stored documents.
//! Whether colliding days should instead merge their items is an open
//! product decision; collisions are reported so they can be counted.
//!
//! Value coercion accepts `{ "items": [...] }` as well as the legacy bare
//! array form, and bare string items. Items without a usable `name` are
//! dropped. Anything else becomes an empty day.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{DayMenu, MenuItem, WeekDays};
use crate::weekday::{WeekdayId, ordered_ids, resolve};

/// Reconciliation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReconcileError {
    /// The input is not a mapping at all
    #[error("malformed menu input: expected an object keyed by weekday, found {found}")]
    MalformedMenuInput { found: &'static str },
}

/// Two input keys that resolved to the same weekday
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub day: WeekdayId,
    /// Key whose value was discarded
    pub replaced: String,
    /// Key whose value was kept
    pub kept: String,
}

/// What reconciliation discarded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Keys that named no weekday, in input order
    pub dropped_keys: Vec<String>,
    pub collisions: Vec<Collision>,
    /// Items dropped for lacking a name
    pub dropped_items: usize,
}

impl ReconcileReport {
    /// Nothing was discarded
    pub fn is_clean(&self) -> bool {
        self.dropped_keys.is_empty() && self.collisions.is_empty() && self.dropped_items == 0
    }
}

/// Canonical day mapping plus the report
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    pub days: WeekDays,
    pub report: ReconcileReport,
}

/// Reconcile a stored day mapping into exactly seven weekdays.
pub fn reconcile(input: &Value) -> Result<WeekDays, ReconcileError> {
    reconcile_with_report(input).map(|reconciled| reconciled.days)
}

/// [`reconcile`], also returning what was discarded.
pub fn reconcile_with_report(input: &Value) -> Result<Reconciliation, ReconcileError> {
    let Value::Object(entries) = input else {
        return Err(ReconcileError::MalformedMenuInput {
            found: json_type(input),
        });
    };
    Ok(reconcile_map(entries))
}

/// Reconcile an already-parsed JSON object. Iteration follows insertion order.
pub fn reconcile_map(entries: &Map<String, Value>) -> Reconciliation {
    reconcile_entries(entries.iter().map(|(key, value)| (key.as_str(), value)))
}

/// Reconcile `(label, value)` pairs; later pairs win on collision.
pub fn reconcile_entries<'a, I>(entries: I) -> Reconciliation
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    let mut days = WeekDays::new();
    let mut sources: Vec<Option<&'a str>> = vec![None; WeekdayId::ALL.len()];
    let mut report = ReconcileReport::default();

    for (raw_key, raw_value) in entries {
        let day = match resolve(raw_key) {
            Ok(day) => day,
            Err(err) => {
                tracing::warn!(key = raw_key, error = %err, "Dropping menu entry with unresolvable day key");
                report.dropped_keys.push(raw_key.to_string());
                continue;
            }
        };

        let (menu, dropped) = coerce_day_menu(raw_value);
        report.dropped_items += dropped;

        if let Some(previous) = sources[usize::from(day.index())].replace(raw_key) {
            tracing::warn!(
                day = day.key(),
                replaced = previous,
                kept = raw_key,
                "Day key collision, keeping the later entry"
            );
            report.collisions.push(Collision {
                day,
                replaced: previous.to_string(),
                kept: raw_key.to_string(),
            });
        }
        days.insert(day, menu);
    }

    for day in ordered_ids() {
        days.entry(day).or_default();
    }

    if report.dropped_items > 0 {
        tracing::debug!(count = report.dropped_items, "Dropped menu items without a name");
    }

    Reconciliation { days, report }
}

/// Coerce a stored day value, returning the menu and the number of items dropped.
fn coerce_day_menu(value: &Value) -> (DayMenu, usize) {
    let raw_items: &[Value] = match value {
        Value::Object(fields) => match fields.get("items") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        },
        Value::Array(items) => items.as_slice(),
        _ => &[],
    };

    let items: Vec<MenuItem> = raw_items.iter().filter_map(coerce_item).collect();
    let dropped = raw_items.len() - items.len();
    (DayMenu::new(items), dropped)
}

fn coerce_item(value: &Value) -> Option<MenuItem> {
    match value {
        Value::String(name) if !name.trim().is_empty() => Some(MenuItem::new(name.as_str())),
        Value::Object(fields) => {
            let name = fields.get("name")?.as_str()?;
            if name.trim().is_empty() {
                return None;
            }
            Some(MenuItem {
                name: name.to_string(),
                description: fields
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
        }
        _ => None,
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
