//! Attendance Confirmation Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::text;
use crate::types::Timestamp;
use crate::weekday::WeekdayId;

/// Daily attendance confirmed by a department coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceConfirmation {
    pub id: String,
    /// Published weekly menu the confirmation was made against
    pub menu_id: String,
    pub date: NaiveDate,
    pub day: WeekdayId,
    pub branch: String,
    pub department: String,
    /// Number of employees eating that day
    pub attendees: u32,
    /// Coordinator user id
    pub confirmed_by: String,
    pub confirmed_at: Timestamp,
    pub note: Option<String>,
}

impl AttendanceConfirmation {
    /// One confirmation per date and normalized branch/department pair;
    /// confirming again replaces the earlier document.
    ///
    /// `None` when either name normalizes to nothing.
    pub fn document_id(date: NaiveDate, branch: &str, department: &str) -> Option<String> {
        let (branch, department) = scope_key(branch, department);
        if branch.is_empty() || department.is_empty() {
            return None;
        }
        // Length prefix keeps ("a_b", "c") and ("a", "b_c") apart.
        let mut hasher = Sha256::new();
        hasher.update(format!("{}:{branch}", branch.len()));
        hasher.update(department.as_bytes());
        let digest = hex::encode(hasher.finalize());
        Some(format!("{}_{}", date.format("%Y-%m-%d"), &digest[..16]))
    }
}

/// Identity of a branch/department pair, as compared everywhere
pub fn scope_key(branch: &str, department: &str) -> (String, String) {
    (text::normalize(branch), text::normalize(department))
}

/// Confirm attendance payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceCreate {
    pub date: NaiveDate,
    /// Day tab the coordinator clicked, if the UI sent one
    #[serde(default)]
    pub day_label: Option<String>,
    pub branch: String,
    pub department: String,
    pub attendees: u32,
    pub note: Option<String>,
}

/// Aggregated attendance for one branch/department
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub branch: String,
    pub department: String,
    pub attendees: u64,
    pub confirmations: u32,
}
