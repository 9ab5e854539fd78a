//! Attendance confirmation service
//!
//! Coordinators confirm how many people from their department will eat on
//! a given date. A confirmation is only accepted against a published menu
//! that actually serves something that day.

use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{AttendanceConfirmation, AttendanceCreate, AttendanceSummary, scope_key};
use shared::text;
use shared::types::permissions::{ATTENDANCE_CONFIRM, REPORTS_VIEW};
use shared::util::now_millis;
use shared::weekday::{WeekdayId, matches};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::instrument;

use super::MenuService;
use crate::auth::CurrentUser;
use crate::core::Config;
use crate::store::{DocumentStore, Filter};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};

/// Upper bound for a single department's headcount
pub const MAX_ATTENDEES: u32 = 10_000;

#[derive(Clone)]
pub struct AttendanceService {
    store: Arc<dyn DocumentStore>,
    collection: String,
    menus: MenuService,
}

impl std::fmt::Debug for AttendanceService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttendanceService")
            .field("collection", &self.collection)
            .finish()
    }
}

impl AttendanceService {
    pub fn new(store: Arc<dyn DocumentStore>, menus: MenuService, config: &Config) -> Self {
        Self {
            store,
            collection: config.attendance_collection.clone(),
            menus,
        }
    }

    /// Confirm (or re-confirm) attendance for one branch/department on `date`
    #[instrument(skip(self, user, data), fields(user = %user.id, date = %data.date))]
    pub async fn confirm(
        &self,
        user: &CurrentUser,
        data: AttendanceCreate,
    ) -> AppResult<AttendanceConfirmation> {
        user.require_permission(ATTENDANCE_CONFIRM)?;

        let branch = required(data.branch, "branch")?;
        let department = required(data.department, "department")?;
        validate_required_text(&branch, "branch", MAX_NAME_LEN)?;
        validate_required_text(&department, "department", MAX_NAME_LEN)?;
        let note = data.note.and_then(|n| {
            let trimmed = n.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        });
        validate_optional_text(&note, "note", MAX_NOTE_LEN)?;
        // Names made only of marks or symbols normalize to nothing
        let id = AttendanceConfirmation::document_id(data.date, &branch, &department)
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::RequiredField,
                    "branch and department must contain letters or digits",
                )
                .with_detail("branch", branch.as_str())
                .with_detail("department", department.as_str())
            })?;
        user.require_scope(&branch, &department)?;

        if data.attendees == 0 || data.attendees > MAX_ATTENDEES {
            return Err(AppError::with_message(
                ErrorCode::InvalidAttendeeCount,
                format!("Attendees must be between 1 and {MAX_ATTENDEES}"),
            )
            .with_detail("attendees", data.attendees));
        }

        let day = WeekdayId::from_date(data.date);
        if let Some(label) = data.day_label.as_deref()
            && !matches(label, day)
        {
            return Err(AppError::with_message(
                ErrorCode::DayMismatch,
                format!("{label:?} is not the weekday of {}", data.date),
            )
            .with_detail("day_label", label)
            .with_detail("expected", day.key()));
        }

        let menu = self
            .menus
            .find_published_for_date(data.date)
            .await?
            .ok_or_else(|| {
                AppError::new(ErrorCode::MenuNotPublished)
                    .with_detail("date", data.date.to_string())
            })?;

        if menu.day(day).is_none_or(|d| d.is_empty()) {
            return Err(AppError::with_message(
                ErrorCode::NoMenuForDay,
                format!("No menu is served on {}", day.display_name()),
            )
            .with_detail("menu_id", menu.id.as_str())
            .with_detail("day", day.key()));
        }

        let confirmation = AttendanceConfirmation {
            id,
            menu_id: menu.id,
            date: data.date,
            day,
            branch,
            department,
            attendees: data.attendees,
            confirmed_by: user.id.clone(),
            confirmed_at: now_millis(),
            note,
        };

        let doc = serde_json::to_value(&confirmation)?;
        self.store
            .set(&self.collection, &confirmation.id, doc)
            .await?;

        tracing::info!(
            id = %confirmation.id,
            attendees = confirmation.attendees,
            "Attendance confirmed"
        );
        Ok(confirmation)
    }

    /// Confirmations for `date`, ordered by document id
    #[instrument(skip(self))]
    pub async fn list_for_date(&self, date: NaiveDate) -> AppResult<Vec<AttendanceConfirmation>> {
        self.store
            .query(&self.collection, &[Filter::equals("date", date.to_string())])
            .await?
            .into_iter()
            .map(|(_, raw)| serde_json::from_value(raw).map_err(AppError::from))
            .collect()
    }

    /// Attendance per branch and department, sorted by normalized names
    #[instrument(skip(self, user), fields(user = %user.id))]
    pub async fn summary_for_date(
        &self,
        user: &CurrentUser,
        date: NaiveDate,
    ) -> AppResult<Vec<AttendanceSummary>> {
        user.require_permission(REPORTS_VIEW)?;

        let mut groups: BTreeMap<(String, String), AttendanceSummary> = BTreeMap::new();
        for confirmation in self.list_for_date(date).await? {
            let key = scope_key(&confirmation.branch, &confirmation.department);
            let entry = groups.entry(key).or_insert_with(|| AttendanceSummary {
                branch: confirmation.branch.clone(),
                department: confirmation.department.clone(),
                attendees: 0,
                confirmations: 0,
            });
            entry.attendees += u64::from(confirmation.attendees);
            entry.confirmations += 1;
        }
        Ok(groups.into_values().collect())
    }

    /// Total attendees per branch on `date`
    ///
    /// Branch spellings that normalize alike are added together under the
    /// first spelling seen.
    #[instrument(skip(self, user), fields(user = %user.id))]
    pub async fn branch_totals(
        &self,
        user: &CurrentUser,
        date: NaiveDate,
    ) -> AppResult<BTreeMap<String, u32>> {
        let mut totals: BTreeMap<String, u32> = BTreeMap::new();
        let mut spellings: HashMap<String, String> = HashMap::new();
        for summary in self.summary_for_date(user, date).await? {
            let attendees = u32::try_from(summary.attendees).unwrap_or(u32::MAX);
            let branch = spellings
                .entry(text::normalize(&summary.branch))
                .or_insert(summary.branch)
                .clone();
            let total = totals.entry(branch).or_default();
            *total = total.saturating_add(attendees);
        }
        Ok(totals)
    }
}

fn required(value: String, field: &'static str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} is required"),
        )
        .with_detail("field", field));
    }
    Ok(trimmed.to_string())
}
