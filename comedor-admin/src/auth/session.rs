use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use shared::text;
use shared::types::{Permission, Role};

/// Custom claims issued by the identity provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (subject)
    pub sub: String,
    pub name: String,
    pub role: Role,
    /// Branch the user belongs to, coordinators only
    #[serde(default)]
    pub branch: Option<String>,
    /// Department the user coordinates, coordinators only
    #[serde(default)]
    pub department: Option<String>,
}

/// Signed-in user context, built from [`Claims`]
///
/// # Example
///
/// ```ignore
/// let user = CurrentUser::from(claims);
/// user.require_permission(permissions::MENU_MANAGE)?;
/// ```
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub branch: Option<String>,
    pub department: Option<String>,
    pub permissions: Vec<Permission>,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            permissions: claims.role.permissions(),
            id: claims.sub,
            name: claims.name,
            role: claims.role,
            branch: claims.branch,
            department: claims.department,
        }
    }
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Check a permission, honoring `*` and `resource:*` wildcards
    pub fn has_permission(&self, permission: &str) -> bool {
        self.is_admin() || self.permissions.iter().any(|p| p.grants(permission))
    }

    pub fn require_permission(&self, permission: &str) -> AppResult<()> {
        if self.has_permission(permission) {
            Ok(())
        } else {
            tracing::warn!(user = %self.id, role = %self.role, permission, "Permission denied");
            Err(AppError::permission_denied(format!("Missing permission {permission}"))
                .with_detail("permission", permission))
        }
    }

    /// Whether this user may act for `branch`/`department`
    ///
    /// Admins act anywhere; everyone else only within their own branch and
    /// department, compared after text normalization.
    pub fn can_act_for(&self, branch: &str, department: &str) -> bool {
        if self.is_admin() {
            return true;
        }
        let same = |own: &Option<String>, other: &str| {
            own.as_deref()
                .is_some_and(|own| text::normalize(own) == text::normalize(other))
        };
        same(&self.branch, branch) && same(&self.department, department)
    }

    pub fn require_scope(&self, branch: &str, department: &str) -> AppResult<()> {
        if self.can_act_for(branch, department) {
            Ok(())
        } else {
            tracing::warn!(user = %self.id, branch, department, "Out of scope");
            Err(AppError::out_of_scope(branch, department))
        }
    }
}
