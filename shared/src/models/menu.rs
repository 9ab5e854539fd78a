//! Weekly Menu Model

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::Timestamp;
use crate::weekday::WeekdayId;

/// Day menus keyed by weekday
///
/// Once reconciled, always holds exactly the seven weekdays.
pub type WeekDays = BTreeMap<WeekdayId, DayMenu>;

/// A dish on a day's menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MenuItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Items served on one day
///
/// Items are identified by position only; there is no stable item id
/// across saves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMenu {
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl DayMenu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Publication status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuStatus {
    #[default]
    Draft,
    Published,
}

impl MenuStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }
}

/// Weekly menu document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyMenu {
    /// Week start date in ISO form, also the document id
    pub id: String,
    pub week_start: NaiveDate,
    #[serde(default)]
    pub status: MenuStatus,
    pub days: WeekDays,
    /// Assigned on write (Unix millis)
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub published_at: Option<Timestamp>,
}

impl WeeklyMenu {
    /// Document id for the week starting on `week_start`
    pub fn id_for(week_start: NaiveDate) -> String {
        week_start.format("%Y-%m-%d").to_string()
    }

    /// Last day covered by this menu
    pub fn week_end(&self) -> NaiveDate {
        self.week_start
            .checked_add_days(Days::new(6))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Whether `date` falls within `[week_start, week_start + 6]`
    pub fn covers(&self, date: NaiveDate) -> bool {
        date >= self.week_start && date <= self.week_end()
    }

    pub fn is_published(&self) -> bool {
        self.status == MenuStatus::Published
    }

    /// Menu for one day; reconciled documents hold every day.
    pub fn day(&self, id: WeekdayId) -> Option<&DayMenu> {
        self.days.get(&id)
    }
}

/// Initialize week payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyMenuCreate {
    pub week_start: NaiveDate,
    /// Initial day mapping in any spelling; reconciled before it is stored
    #[serde(default)]
    pub days: Option<serde_json::Value>,
}

/// Add item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: Option<String>,
}

/// Update item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_menu_item_skips_missing_description() {
        let json = serde_json::to_string(&MenuItem::new("Tacos")).unwrap();
        assert_eq!(json, r#"{"name":"Tacos"}"#);

        let item = MenuItem::new("Sopa").with_description("de lentejas");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["description"], "de lentejas");
    }

    #[test]
    fn test_status_serialize() {
        assert_eq!(
            serde_json::to_string(&MenuStatus::Published).unwrap(),
            "\"published\""
        );
        assert_eq!(MenuStatus::default(), MenuStatus::Draft);
    }

    #[test]
    fn test_week_coverage() {
        let menu = WeeklyMenu {
            id: WeeklyMenu::id_for(date(2024, 3, 3)),
            week_start: date(2024, 3, 3),
            status: MenuStatus::Draft,
            days: WeekDays::new(),
            created_at: None,
            updated_at: None,
            published_at: None,
        };
        assert_eq!(menu.id, "2024-03-03");
        assert_eq!(menu.week_end(), date(2024, 3, 9));
        assert!(menu.covers(date(2024, 3, 3)));
        assert!(menu.covers(date(2024, 3, 9)));
        assert!(!menu.covers(date(2024, 3, 10)));
        assert!(!menu.covers(date(2024, 3, 2)));
    }

    #[test]
    fn test_week_days_serialize_with_canonical_keys() {
        let mut days = WeekDays::new();
        days.insert(WeekdayId::Wednesday, DayMenu::new(vec![MenuItem::new("Pozole")]));
        days.insert(WeekdayId::Saturday, DayMenu::default());

        let json = serde_json::to_value(&days).unwrap();
        assert_eq!(json["miercoles"]["items"][0]["name"], "Pozole");
        assert_eq!(json["sabado"]["items"], serde_json::json!([]));
    }
}
