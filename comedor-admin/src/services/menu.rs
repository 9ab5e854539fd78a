//! Weekly menu service
//!
//! Menus are stored one document per week, keyed by the Monday of that
//! week. Every load and every save passes the day mapping through the
//! reconciler, so documents written with stray spellings ("Miércoles",
//! "MIERCOLES") heal on the next save.

use chrono::{Datelike, Days, NaiveDate};
use serde_json::{Map, Value};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    DayMenu, MenuItem, MenuItemCreate, MenuItemUpdate, MenuStatus, WeekDays, WeeklyMenu,
    WeeklyMenuCreate,
};
use shared::reconcile::{ReconcileReport, reconcile_with_report};
use shared::types::permissions::MENU_MANAGE;
use shared::util::now_millis;
use shared::weekday::{WeekdayId, resolve};
use std::sync::Arc;
use tracing::instrument;

use crate::auth::CurrentUser;
use crate::core::Config;
use crate::store::{DocumentStore, Filter, FilterOp, StoreError};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};

/// Monday of the ISO week containing `date`
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Weekly menu CRUD and publication
#[derive(Clone)]
pub struct MenuService {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl std::fmt::Debug for MenuService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuService")
            .field("collection", &self.collection)
            .finish()
    }
}

impl MenuService {
    pub fn new(store: Arc<dyn DocumentStore>, config: &Config) -> Self {
        Self {
            store,
            collection: config.menus_collection.clone(),
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> AppResult<WeeklyMenu> {
        let raw = self
            .store
            .get(&self.collection, id)
            .await?
            .ok_or_else(|| menu_not_found(id))?;
        decode(raw)
    }

    /// Menus ordered by week, optionally filtered by status
    #[instrument(skip(self))]
    pub async fn list(&self, status: Option<MenuStatus>) -> AppResult<Vec<WeeklyMenu>> {
        let filters: Vec<Filter> = status
            .map(|s| Filter::equals("status", s.as_str()))
            .into_iter()
            .collect();
        let mut menus = self
            .store
            .query(&self.collection, &filters)
            .await?
            .into_iter()
            .map(|(_, raw)| decode(raw))
            .collect::<AppResult<Vec<_>>>()?;
        menus.sort_by_key(|m| m.week_start);
        Ok(menus)
    }

    /// Published menu whose week covers `date`
    #[instrument(skip(self))]
    pub async fn find_published_for_date(&self, date: NaiveDate) -> AppResult<Option<WeeklyMenu>> {
        // A covering week starts at most six days before `date`
        let earliest = date.checked_sub_days(Days::new(6)).unwrap_or(NaiveDate::MIN);
        let filters = [
            Filter::equals("status", MenuStatus::Published.as_str()),
            Filter::new("week_start", FilterOp::Ge, WeeklyMenu::id_for(earliest)),
            Filter::new("week_start", FilterOp::Le, WeeklyMenu::id_for(date)),
        ];
        let mut candidates = Vec::new();
        for (_, raw) in self.store.query(&self.collection, &filters).await? {
            let menu = decode(raw)?;
            if menu.covers(date) {
                candidates.push(menu);
            }
        }
        Ok(candidates.into_iter().max_by_key(|m| m.week_start))
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Create the draft menu for the week containing `week_start`
    #[instrument(skip(self, user, data), fields(user = %user.id))]
    pub async fn initialize_week(
        &self,
        user: &CurrentUser,
        data: WeeklyMenuCreate,
    ) -> AppResult<WeeklyMenu> {
        user.require_permission(MENU_MANAGE)?;

        let week_start = week_start_of(data.week_start);
        let days = match &data.days {
            Some(raw) => reconciled_days(raw)?,
            None => reconciled_days(&Value::Object(Map::new()))?,
        };
        check_item_lengths(&days)?;

        let now = now_millis();
        let menu = WeeklyMenu {
            id: WeeklyMenu::id_for(week_start),
            week_start,
            status: MenuStatus::Draft,
            days,
            created_at: Some(now),
            updated_at: Some(now),
            published_at: None,
        };

        let doc = serde_json::to_value(&menu)?;
        self.store
            .create(&self.collection, &menu.id, doc)
            .await
            .map_err(|err| match err {
                StoreError::Conflict(_) => AppError::with_message(
                    ErrorCode::MenuAlreadyExists,
                    format!("A menu for the week of {} already exists", menu.id),
                )
                .with_detail("id", menu.id.as_str()),
                other => other.into(),
            })?;

        tracing::info!(id = %menu.id, "Weekly menu initialized");
        Ok(menu)
    }

    /// Append an item to the day named by `day_label`
    #[instrument(skip(self, user, item), fields(user = %user.id))]
    pub async fn add_item(
        &self,
        user: &CurrentUser,
        id: &str,
        day_label: &str,
        item: MenuItemCreate,
    ) -> AppResult<WeeklyMenu> {
        let day = resolve(day_label)?;
        let item = validated_item(item.name, item.description)?;
        self.edit_day(user, id, day, |menu| {
            menu.items.push(item);
            Ok(())
        })
        .await
    }

    /// Edit the item at `index`; absent fields are left unchanged
    #[instrument(skip(self, user, update), fields(user = %user.id))]
    pub async fn update_item(
        &self,
        user: &CurrentUser,
        id: &str,
        day_label: &str,
        index: usize,
        update: MenuItemUpdate,
    ) -> AppResult<WeeklyMenu> {
        let day = resolve(day_label)?;
        let name = update.name.map(validated_name).transpose()?;
        let description = update.description.map(validated_description).transpose()?;
        self.edit_day(user, id, day, |menu| {
            let target = menu
                .items
                .get_mut(index)
                .ok_or_else(|| item_not_found(day, index))?;
            if let Some(name) = name {
                target.name = name;
            }
            if let Some(description) = description {
                target.description = description;
            }
            Ok(())
        })
        .await
    }

    /// Remove and return the item at `index`
    #[instrument(skip(self, user), fields(user = %user.id))]
    pub async fn remove_item(
        &self,
        user: &CurrentUser,
        id: &str,
        day_label: &str,
        index: usize,
    ) -> AppResult<MenuItem> {
        let day = resolve(day_label)?;
        let mut removed = None;
        self.edit_day(user, id, day, |menu| {
            if index >= menu.items.len() {
                return Err(item_not_found(day, index));
            }
            removed = Some(menu.items.remove(index));
            Ok(())
        })
        .await?;
        removed.ok_or_else(|| item_not_found(day, index))
    }

    /// Replace every item of one day
    #[instrument(skip(self, user, replacement), fields(user = %user.id))]
    pub async fn replace_day(
        &self,
        user: &CurrentUser,
        id: &str,
        day_label: &str,
        replacement: DayMenu,
    ) -> AppResult<WeeklyMenu> {
        let day = resolve(day_label)?;
        let items = replacement
            .items
            .into_iter()
            .map(|item| validated_item(item.name, item.description))
            .collect::<AppResult<Vec<_>>>()?;
        self.edit_day(user, id, day, |menu| {
            menu.items = items;
            Ok(())
        })
        .await
    }

    /// Move a draft to published
    #[instrument(skip(self, user), fields(user = %user.id))]
    pub async fn publish(&self, user: &CurrentUser, id: &str) -> AppResult<WeeklyMenu> {
        user.require_permission(MENU_MANAGE)?;
        let mut menu = self.get(id).await?;
        if menu.is_published() {
            return Err(AppError::business_rule(
                ErrorCode::MenuAlreadyPublished,
                format!("Menu {id} is already published"),
            ));
        }
        menu.status = MenuStatus::Published;
        menu.published_at = Some(now_millis());
        self.save(&mut menu).await?;
        tracing::info!(id, "Weekly menu published");
        Ok(menu)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn edit_day<F>(
        &self,
        user: &CurrentUser,
        id: &str,
        day: WeekdayId,
        edit: F,
    ) -> AppResult<WeeklyMenu>
    where
        F: FnOnce(&mut DayMenu) -> AppResult<()>,
    {
        user.require_permission(MENU_MANAGE)?;
        let mut menu = self.get(id).await?;
        if menu.is_published() {
            return Err(AppError::business_rule(
                ErrorCode::MenuAlreadyPublished,
                format!("Menu {id} is published and can no longer be edited"),
            ));
        }
        edit(menu.days.entry(day).or_default())?;
        self.save(&mut menu).await?;
        tracing::debug!(id, day = day.key(), "Day menu updated");
        Ok(menu)
    }

    /// Reconcile, stamp and persist the whole document
    async fn save(&self, menu: &mut WeeklyMenu) -> AppResult<()> {
        menu.days = reconciled_days(&serde_json::to_value(&menu.days)?)?;
        menu.updated_at = Some(now_millis());
        let doc = serde_json::to_value(&*menu)?;
        self.store.set(&self.collection, &menu.id, doc).await?;
        Ok(())
    }
}

/// Decode a stored document, reconciling its day mapping
fn decode(mut raw: Value) -> AppResult<WeeklyMenu> {
    let id = raw
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let Some(fields) = raw.as_object_mut() else {
        return Err(AppError::with_message(
            ErrorCode::MalformedMenu,
            format!("Menu document {id} is not an object"),
        ));
    };
    let days = reconciled_days(fields.get("days").unwrap_or(&Value::Null))
        .map_err(|err| err.with_detail("id", id.as_str()))?;
    fields.insert("days".into(), serde_json::to_value(&days)?);
    serde_json::from_value(raw).map_err(|err| {
        AppError::with_message(ErrorCode::MalformedMenu, err.to_string()).with_detail("id", id)
    })
}

fn reconciled_days(raw: &Value) -> AppResult<WeekDays> {
    let reconciled = reconcile_with_report(raw)?;
    log_report(&reconciled.report);
    Ok(reconciled.days)
}

fn log_report(report: &ReconcileReport) {
    if !report.is_clean() {
        tracing::info!(
            dropped_keys = report.dropped_keys.len(),
            collisions = report.collisions.len(),
            dropped_items = report.dropped_items,
            "Menu days reconciled with losses"
        );
    }
}

fn validated_name(name: String) -> AppResult<String> {
    let name = non_blank(name).ok_or_else(|| {
        AppError::validation("Menu item name must not be empty").with_detail("field", "name")
    })?;
    validate_required_text(&name, "name", MAX_NAME_LEN)?;
    Ok(name)
}

fn validated_description(description: String) -> AppResult<Option<String>> {
    let description = non_blank(description);
    validate_optional_text(&description, "description", MAX_NOTE_LEN)?;
    Ok(description)
}

fn validated_item(name: String, description: Option<String>) -> AppResult<MenuItem> {
    Ok(MenuItem {
        name: validated_name(name)?,
        description: description.map(validated_description).transpose()?.flatten(),
    })
}

/// Length checks for items that arrived through a raw day mapping
fn check_item_lengths(days: &WeekDays) -> AppResult<()> {
    for item in days.values().flat_map(|d| d.items.iter()) {
        validate_required_text(&item.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&item.description, "description", MAX_NOTE_LEN)?;
    }
    Ok(())
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn menu_not_found(id: &str) -> AppError {
    AppError::with_message(ErrorCode::MenuNotFound, format!("Menu {id} not found"))
        .with_detail("id", id)
}

fn item_not_found(day: WeekdayId, index: usize) -> AppError {
    AppError::with_message(
        ErrorCode::MenuItemNotFound,
        format!("{} has no item at position {index}", day.display_name()),
    )
    .with_detail("day", day.key())
    .with_detail("index", index)
}
