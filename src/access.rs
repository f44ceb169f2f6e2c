//! Role-based permissions and anonymization of report rows.

use serde::Serialize;
use tracing::warn;

use crate::db::PriceStore;
use crate::types::PriceEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    User,
}

impl Role {
    /// Unknown or missing role names fall back to `User`.
    pub fn parse(s: Option<&str>) -> Self {
        match s.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("admin") => Role::Admin,
            Some("manager") => Role::Manager,
            _ => Role::User,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::User => "user",
        }
    }

    pub fn permissions(self) -> &'static [Permission] {
        match self {
            Role::Admin => &[
                Permission::ViewAllData,
                Permission::ViewAggregateData,
                Permission::ExportData,
                Permission::ManageUsers,
            ],
            Role::Manager => &[Permission::ViewAggregateData, Permission::ExportData],
            Role::User => &[Permission::ViewAggregateData],
        }
    }

    pub fn has(self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    ViewAllData,
    ViewAggregateData,
    ExportData,
    ManageUsers,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Permission::ViewAllData => "view_all_data",
            Permission::ViewAggregateData => "view_aggregate_data",
            Permission::ExportData => "export_data",
            Permission::ManageUsers => "manage_users",
        };
        write!(f, "{s}")
    }
}

/// Look up the caller's role. A failed lookup is logged and treated as `User`.
pub async fn resolve_role(store: &PriceStore, user_id: &str) -> Role {
    match store.user_role(user_id).await {
        Ok(role) => Role::parse(role.as_deref()),
        Err(e) => {
            warn!(user_id, "Role lookup failed, using default role: {e}");
            Role::User
        }
    }
}

pub async fn has_permission(store: &PriceStore, user_id: &str, permission: Permission) -> bool {
    resolve_role(store, user_id).await.has(permission)
}

// ---------------------------------------------------------------------------
// Anonymization
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnonymizationLevel {
    Low,
    Medium,
    High,
}

impl AnonymizationLevel {
    /// Level for a report request: detailed rows are only served to privileged callers.
    pub fn for_report(detailed: bool, authenticated: bool) -> Self {
        match (detailed, authenticated) {
            (true, _) => AnonymizationLevel::Low,
            (false, true) => AnonymizationLevel::Medium,
            (false, false) => AnonymizationLevel::High,
        }
    }
}

/// Rows that can be stripped of identifying detail before leaving the service.
pub trait Anonymize {
    fn anonymize(&mut self, level: AnonymizationLevel);
}

/// `karim@example.com` -> `k***@example.com`.
pub fn mask_email(email: &str) -> String {
    let (local, domain) = email.split_once('@').unwrap_or((email, ""));
    let first: String = local.chars().take(1).collect();
    if domain.is_empty() {
        format!("{first}***")
    } else {
        format!("{first}***@{domain}")
    }
}

/// Keep only the calendar date of an RFC 3339 timestamp.
pub fn date_only(timestamp: &str) -> String {
    timestamp.split('T').next().unwrap_or(timestamp).to_string()
}

pub const MASKED: &str = "***";

impl Anonymize for PriceEntry {
    fn anonymize(&mut self, level: AnonymizationLevel) {
        self.user_email = mask_email(&self.user_email);
        self.created_at = date_only(&self.created_at);
        if level == AnonymizationLevel::High {
            self.upazilla = MASKED.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn entry() -> PriceEntry {
        PriceEntry {
            id: 7,
            user_email: "karim@example.com".into(),
            district: "Dhaka".into(),
            upazilla: "Savar".into(),
            product_id: 1,
            product_name: "Rice".into(),
            unit: "kg".into(),
            price: 80.0,
            category: None,
            other_category: None,
            purchase_option: None,
            other_purchase_option: None,
            shop_type: None,
            other_shop_type: None,
            online_shop_name: None,
            notes: None,
            created_at: "2024-05-02T08:15:00Z".into(),
        }
    }

    #[test]
    fn role_permission_table() {
        assert!(Role::Admin.has(Permission::ViewAllData));
        assert!(Role::Admin.has(Permission::ManageUsers));
        assert!(!Role::Manager.has(Permission::ViewAllData));
        assert!(Role::Manager.has(Permission::ExportData));
        assert!(Role::User.has(Permission::ViewAggregateData));
        assert!(!Role::User.has(Permission::ExportData));
    }

    #[test]
    fn unknown_role_names_are_users() {
        assert_eq!(Role::parse(Some(" ADMIN ")), Role::Admin);
        assert_eq!(Role::parse(Some("superuser")), Role::User);
        assert_eq!(Role::parse(None), Role::User);
    }

    #[test]
    fn masks_email_and_time_at_every_level() {
        let mut e = entry();
        e.anonymize(AnonymizationLevel::Low);
        assert_eq!(e.user_email, "k***@example.com");
        assert_eq!(e.created_at, "2024-05-02");
        assert_eq!(e.upazilla, "Savar");
    }

    #[test]
    fn high_level_hides_upazilla() {
        let mut e = entry();
        e.anonymize(AnonymizationLevel::High);
        assert_eq!(e.upazilla, "***");
        assert_eq!(e.district, "Dhaka");
    }

    #[test]
    fn malformed_email_is_still_masked() {
        assert_eq!(mask_email("nobody"), "n***");
        assert_eq!(mask_email(""), "***");
    }

    #[test]
    fn report_levels() {
        assert_eq!(AnonymizationLevel::for_report(true, true), AnonymizationLevel::Low);
        assert_eq!(AnonymizationLevel::for_report(false, true), AnonymizationLevel::Medium);
        assert_eq!(AnonymizationLevel::for_report(false, false), AnonymizationLevel::High);
    }

    #[tokio::test]
    async fn missing_user_row_resolves_to_user_role() {
        let store = PriceStore::new(test_pool().await);
        assert_eq!(resolve_role(&store, "ghost").await, Role::User);
        assert!(!has_permission(&store, "ghost", Permission::ViewAllData).await);

        store.set_user_role("boss", "admin").await.unwrap();
        assert!(has_permission(&store, "boss", Permission::ViewAllData).await);
    }

    #[tokio::test]
    async fn failed_lookup_resolves_to_user_role() {
        let pool = test_pool().await;
        let store = PriceStore::new(pool.clone());
        pool.close().await;
        assert_eq!(resolve_role(&store, "anyone").await, Role::User);
    }
}
