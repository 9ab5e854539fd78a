//! Day comparison
//!
//! Two labels name the same day only if both resolve and resolve to the same
//! [`WeekdayId`]. Raw or normalized strings are never compared directly, so
//! two identical garbage labels are not "the same day".

use super::{WeekdayId, resolve};

/// Whether two labels name the same weekday
pub fn are_equal(a: &str, b: &str) -> bool {
    match (resolve(a), resolve(b)) {
        (Ok(left), Ok(right)) => left == right,
        _ => false,
    }
}

/// Whether a label names the given weekday
pub fn matches(label: &str, id: WeekdayId) -> bool {
    resolve(label).is_ok_and(|day| day == id)
}
