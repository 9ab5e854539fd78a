//! Common types for the shared crate

use serde::{Deserialize, Serialize};

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Permission strings understood by the admin services
pub mod permissions {
    pub const MENU_VIEW: &str = "menu:view";
    pub const MENU_MANAGE: &str = "menu:manage";
    pub const ATTENDANCE_CONFIRM: &str = "attendance:confirm";
    pub const REPORTS_VIEW: &str = "reports:view";
}

/// Permission type
///
/// `"*"` grants everything, `"menu:*"` grants every `menu:` action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission(pub String);

impl Permission {
    /// Check if this permission grants access to the given resource action
    pub fn grants(&self, action: &str) -> bool {
        if self.0 == "*" {
            return true;
        }
        if let Some(prefix) = self.0.strip_suffix(":*") {
            return action
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with(':'));
        }
        self.0 == action
    }
}

impl From<&str> for Permission {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role carried in the identity provider's custom claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    /// Department coordinator, confirms attendance for their own department
    Coordinator,
    Viewer,
}

impl Role {
    /// Permissions granted by this role
    pub fn permissions(&self) -> Vec<Permission> {
        use permissions::*;
        let granted: &[&str] = match self {
            Role::Admin => &["*"],
            Role::Coordinator => &[ATTENDANCE_CONFIRM, REPORTS_VIEW, MENU_VIEW],
            Role::Viewer => &[MENU_VIEW, REPORTS_VIEW],
        };
        granted.iter().copied().map(Permission::from).collect()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Coordinator => "coordinator",
            Role::Viewer => "viewer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::permissions::*;
    use super::*;

    #[test]
    fn test_permission_grants() {
        assert!(Permission::from("*").grants(MENU_MANAGE));
        assert!(Permission::from("menu:*").grants(MENU_MANAGE));
        assert!(Permission::from("menu:*").grants(MENU_VIEW));
        assert!(!Permission::from("menu:*").grants(REPORTS_VIEW));
        assert!(!Permission::from("menu:*").grants("menus:view"));
        assert!(Permission::from(MENU_VIEW).grants(MENU_VIEW));
        assert!(!Permission::from(MENU_VIEW).grants(MENU_MANAGE));
    }

    #[test]
    fn test_role_permissions() {
        let grants = |role: Role, action: &str| role.permissions().iter().any(|p| p.grants(action));

        assert!(grants(Role::Admin, MENU_MANAGE));
        assert!(grants(Role::Admin, ATTENDANCE_CONFIRM));

        assert!(grants(Role::Coordinator, ATTENDANCE_CONFIRM));
        assert!(grants(Role::Coordinator, MENU_VIEW));
        assert!(!grants(Role::Coordinator, MENU_MANAGE));

        assert!(grants(Role::Viewer, REPORTS_VIEW));
        assert!(!grants(Role::Viewer, ATTENDANCE_CONFIRM));
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Coordinator).unwrap(), "\"coordinator\"");
        let role: Role = serde_json::from_str("\"viewer\"").unwrap();
        assert_eq!(role, Role::Viewer);
        assert_eq!(Role::Admin.to_string(), "admin");
    }
}
