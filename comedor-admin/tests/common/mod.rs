#![allow(dead_code)]

use chrono::NaiveDate;
use comedor_admin::{AttendanceService, Claims, Config, CurrentUser, MemoryStore, MenuService};
use shared::types::Role;
use std::sync::Arc;

pub struct Fixture {
    pub store: MemoryStore,
    pub menus: MenuService,
    pub attendance: AttendanceService,
}

pub fn fixture() -> Fixture {
    let store = MemoryStore::new();
    let config = Config::with_collections("weekly_menus", "attendance");
    let shared_store: Arc<dyn comedor_admin::DocumentStore> = Arc::new(store.clone());
    let menus = MenuService::new(shared_store.clone(), &config);
    let attendance = AttendanceService::new(shared_store, menus.clone(), &config);
    Fixture {
        store,
        menus,
        attendance,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn admin() -> CurrentUser {
    CurrentUser::from(Claims {
        sub: "admin-1".into(),
        name: "Marta".into(),
        role: Role::Admin,
        branch: None,
        department: None,
    })
}

pub fn coordinator(branch: &str, department: &str) -> CurrentUser {
    CurrentUser::from(Claims {
        sub: format!("coord-{}", shared::text::normalize(department)),
        name: "Coordinador".into(),
        role: Role::Coordinator,
        branch: Some(branch.into()),
        department: Some(department.into()),
    })
}

pub fn viewer() -> CurrentUser {
    CurrentUser::from(Claims {
        sub: "viewer-1".into(),
        name: "Pablo".into(),
        role: Role::Viewer,
        branch: None,
        department: None,
    })
}
