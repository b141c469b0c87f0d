use leptos::*;

/// Runs a closure inside a throwaway reactive runtime so signal-based code
/// can be exercised from plain tests.
pub fn with_runtime<T>(f: impl FnOnce() -> T) -> T {
    let runtime = create_runtime();
    let result = f();
    runtime.dispose();
    result
}

pub mod helpers {
    use crate::api::{Organization, User, UserRole};
    use chrono::{TimeZone, Utc};

    pub fn sample_user(id: &str, email: &str, role: UserRole) -> User {
        User {
            id: id.into(),
            email: email.into(),
            first_name: "Айгерим".into(),
            last_name: "Нурланова".into(),
            phone_number: Some("+77011234567".into()),
            role,
            is_verified: true,
            created_at: Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 2, 1, 12, 30, 0).unwrap(),
            last_login: None,
            organization_name: None,
        }
    }

    pub fn sample_organization(id: &str, name: &str) -> Organization {
        Organization {
            organization_id: id.into(),
            name: name.into(),
            description: "Центральное здание".into(),
            address: "г. Алматы, ул. Абая 10".into(),
            is_active: true,
            created_at: Utc.with_ymd_and_hms(2025, 1, 5, 7, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2025, 1, 20, 16, 45, 0).unwrap(),
            map_url: String::new(),
            active_modules: String::new(),
        }
    }
}
