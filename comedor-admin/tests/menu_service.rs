mod common;

use common::{admin, coordinator, date, fixture};
use comedor_admin::DocumentStore;
use serde_json::json;
use shared::error::ErrorCode;
use shared::models::{DayMenu, MenuItem, MenuItemCreate, MenuItemUpdate, MenuStatus, WeeklyMenuCreate};
use shared::weekday::WeekdayId;

fn create(week_start: chrono::NaiveDate) -> WeeklyMenuCreate {
    WeeklyMenuCreate {
        week_start,
        days: None,
    }
}

fn item(name: &str) -> MenuItemCreate {
    MenuItemCreate {
        name: name.into(),
        description: None,
    }
}

#[tokio::test]
async fn test_initialize_week_creates_seven_empty_days() {
    let fx = fixture();
    let menu = fx
        .menus
        .initialize_week(&admin(), create(date(2024, 3, 6)))
        .await
        .unwrap();

    assert_eq!(menu.id, "2024-03-04");
    assert_eq!(menu.week_start, date(2024, 3, 4));
    assert_eq!(menu.status, MenuStatus::Draft);
    assert_eq!(menu.days.len(), 7);
    assert!(menu.days.values().all(DayMenu::is_empty));
    assert!(menu.created_at.is_some());

    let stored = fx.store.get("weekly_menus", "2024-03-04").await.unwrap().unwrap();
    let keys: Vec<&str> = stored["days"].as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["domingo", "lunes", "martes", "miercoles", "jueves", "viernes", "sabado"]
    );
}

#[tokio::test]
async fn test_initialize_week_reconciles_initial_days() {
    let fx = fixture();
    let data = WeeklyMenuCreate {
        week_start: date(2024, 3, 4),
        days: Some(json!({
            "Miércoles": { "items": [{ "name": "A" }] },
            "miercoles": { "items": [{ "name": "B" }] },
            "Feriado": ["C"]
        })),
    };
    let menu = fx.menus.initialize_week(&admin(), data).await.unwrap();
    assert_eq!(menu.days[&WeekdayId::Wednesday].items, vec![MenuItem::new("B")]);
    assert_eq!(menu.days.len(), 7);
}

#[tokio::test]
async fn test_initialize_week_twice_conflicts() {
    let fx = fixture();
    fx.menus
        .initialize_week(&admin(), create(date(2024, 3, 4)))
        .await
        .unwrap();
    let err = fx
        .menus
        .initialize_week(&admin(), create(date(2024, 3, 8)))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MenuAlreadyExists);
}

#[tokio::test]
async fn test_initialize_week_rejects_malformed_days() {
    let fx = fixture();
    let data = WeeklyMenuCreate {
        week_start: date(2024, 3, 4),
        days: Some(json!(["lunes"])),
    };
    let err = fx.menus.initialize_week(&admin(), data).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedMenu);
    assert!(fx.store.is_empty("weekly_menus"));
}

#[tokio::test]
async fn test_coordinator_cannot_manage_menus() {
    let fx = fixture();
    let err = fx
        .menus
        .initialize_week(&coordinator("Norte", "Ventas"), create(date(2024, 3, 4)))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);
}

#[tokio::test]
async fn test_item_edits_resolve_day_labels() {
    let fx = fixture();
    let user = admin();
    fx.menus
        .initialize_week(&user, create(date(2024, 3, 4)))
        .await
        .unwrap();

    fx.menus.add_item(&user, "2024-03-04", "Miércoles", item("Sopa")).await.unwrap();
    fx.menus.add_item(&user, "2024-03-04", "MIERCOLES", item("Mole")).await.unwrap();
    let menu = fx
        .menus
        .add_item(&user, "2024-03-04", " miercoles ", item("Flan"))
        .await
        .unwrap();
    let names: Vec<&str> = menu.days[&WeekdayId::Wednesday]
        .items
        .iter()
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(names, vec!["Sopa", "Mole", "Flan"]);

    let menu = fx
        .menus
        .update_item(
            &user,
            "2024-03-04",
            "miércoles",
            1,
            MenuItemUpdate {
                name: None,
                description: Some("con arroz".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(
        menu.days[&WeekdayId::Wednesday].items[1],
        MenuItem::new("Mole").with_description("con arroz")
    );

    let removed = fx
        .menus
        .remove_item(&user, "2024-03-04", "Miercoles", 0)
        .await
        .unwrap();
    assert_eq!(removed.name, "Sopa");

    let menu = fx.menus.get("2024-03-04").await.unwrap();
    assert_eq!(menu.days[&WeekdayId::Wednesday].items.len(), 2);
}

#[tokio::test]
async fn test_item_edit_errors() {
    let fx = fixture();
    let user = admin();
    fx.menus
        .initialize_week(&user, create(date(2024, 3, 4)))
        .await
        .unwrap();

    let err = fx
        .menus
        .add_item(&user, "2024-03-04", "Funday", item("Sopa"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotAWeekday);

    let err = fx
        .menus
        .add_item(&user, "2024-03-04", "lunes", item("   "))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);

    let err = fx
        .menus
        .remove_item(&user, "2024-03-04", "lunes", 3)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MenuItemNotFound);

    let err = fx
        .menus
        .add_item(&user, "2099-01-05", "lunes", item("Sopa"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MenuNotFound);
}

#[tokio::test]
async fn test_replace_day() {
    let fx = fixture();
    let user = admin();
    fx.menus
        .initialize_week(&user, create(date(2024, 3, 4)))
        .await
        .unwrap();
    let menu = fx
        .menus
        .replace_day(
            &user,
            "2024-03-04",
            "Viernes",
            DayMenu::new(vec![MenuItem::new("Pescado"), MenuItem::new(" Ensalada ")]),
        )
        .await
        .unwrap();
    assert_eq!(
        menu.days[&WeekdayId::Friday].items,
        vec![MenuItem::new("Pescado"), MenuItem::new("Ensalada")]
    );
}

#[tokio::test]
async fn test_publish_locks_menu() {
    let fx = fixture();
    let user = admin();
    fx.menus
        .initialize_week(&user, create(date(2024, 3, 4)))
        .await
        .unwrap();

    let menu = fx.menus.publish(&user, "2024-03-04").await.unwrap();
    assert!(menu.is_published());
    assert!(menu.published_at.is_some());

    let err = fx.menus.publish(&user, "2024-03-04").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::MenuAlreadyPublished);

    let err = fx
        .menus
        .add_item(&user, "2024-03-04", "lunes", item("Sopa"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MenuAlreadyPublished);
}

#[tokio::test]
async fn test_get_heals_stored_document() {
    let fx = fixture();
    fx.store
        .set(
            "weekly_menus",
            "2024-03-04",
            json!({
                "id": "2024-03-04",
                "week_start": "2024-03-04",
                "status": "draft",
                "days": {
                    "Lunes": ["Arroz"],
                    "MIÉRCOLES": { "items": [{ "name": "Mole" }] },
                    "miercoles": { "items": [{ "name": "Pozole" }] }
                }
            }),
        )
        .await
        .unwrap();

    let menu = fx.menus.get("2024-03-04").await.unwrap();
    assert_eq!(menu.days.len(), 7);
    assert_eq!(menu.days[&WeekdayId::Monday].items, vec![MenuItem::new("Arroz")]);
    assert_eq!(menu.days[&WeekdayId::Wednesday].items, vec![MenuItem::new("Pozole")]);

    // The next save persists the canonical keys.
    fx.menus
        .add_item(&admin(), "2024-03-04", "martes", item("Tacos"))
        .await
        .unwrap();
    let stored = fx.store.get("weekly_menus", "2024-03-04").await.unwrap().unwrap();
    let days = stored["days"].as_object().unwrap();
    assert_eq!(days.len(), 7);
    assert!(days.contains_key("miercoles"));
    assert!(!days.contains_key("MIÉRCOLES"));
}

#[tokio::test]
async fn test_list_and_find_published() {
    let fx = fixture();
    let user = admin();
    for week in [date(2024, 3, 4), date(2024, 3, 11), date(2024, 2, 26)] {
        fx.menus.initialize_week(&user, create(week)).await.unwrap();
    }
    fx.menus.publish(&user, "2024-03-04").await.unwrap();
    fx.menus.publish(&user, "2024-02-26").await.unwrap();

    let all = fx.menus.list(None).await.unwrap();
    let ids: Vec<&str> = all.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["2024-02-26", "2024-03-04", "2024-03-11"]);

    let drafts = fx.menus.list(Some(MenuStatus::Draft)).await.unwrap();
    assert_eq!(drafts.len(), 1);

    let found = fx.menus.find_published_for_date(date(2024, 3, 10)).await.unwrap();
    assert_eq!(found.map(|m| m.id), Some("2024-03-04".to_string()));

    let found = fx.menus.find_published_for_date(date(2024, 3, 12)).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_find_published_ignores_weeks_long_past() {
    let fx = fixture();
    let user = admin();
    fx.menus
        .initialize_week(&user, create(date(2024, 3, 4)))
        .await
        .unwrap();
    fx.menus.publish(&user, "2024-03-04").await.unwrap();

    // An old published week whose document no longer decodes
    fx.store
        .set(
            "weekly_menus",
            "2023-01-02",
            json!({
                "id": "2023-01-02",
                "week_start": "2023-01-02",
                "status": "published"
            }),
        )
        .await
        .unwrap();

    let found = fx.menus.find_published_for_date(date(2024, 3, 6)).await.unwrap();
    assert_eq!(found.map(|m| m.id), Some("2024-03-04".to_string()));

    // The week itself is still reported as malformed when it could cover the date
    let err = fx
        .menus
        .find_published_for_date(date(2023, 1, 8))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MalformedMenu);
}

#[tokio::test]
async fn test_item_text_length_limits() {
    let fx = fixture();
    let user = admin();
    fx.menus
        .initialize_week(&user, create(date(2024, 3, 4)))
        .await
        .unwrap();

    let err = fx
        .menus
        .add_item(&user, "2024-03-04", "lunes", item(&"a".repeat(201)))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
    assert_eq!(err.detail("field"), Some(&json!("name")));

    let long_description = MenuItemCreate {
        name: "Sopa".into(),
        description: Some("d".repeat(501)),
    };
    let err = fx
        .menus
        .add_item(&user, "2024-03-04", "lunes", long_description)
        .await
        .unwrap_err();
    assert_eq!(err.detail("field"), Some(&json!("description")));

    fx.menus
        .add_item(&user, "2024-03-04", "lunes", item(&"a".repeat(200)))
        .await
        .unwrap();
    let err = fx
        .menus
        .update_item(
            &user,
            "2024-03-04",
            "lunes",
            0,
            MenuItemUpdate {
                name: None,
                description: Some("d".repeat(501)),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);

    let err = fx
        .menus
        .initialize_week(
            &user,
            WeeklyMenuCreate {
                week_start: date(2024, 3, 11),
                days: Some(json!({ "martes": ["x".repeat(201)] })),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationFailed);
}
