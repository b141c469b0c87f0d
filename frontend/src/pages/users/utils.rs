use crate::api::{CreateUserRequest, UpdateUserRequest, User, UserRole};
use crate::utils::validate;
use leptos::*;

/// Whether the dialog creates a new account or edits an existing one. The
/// password rules differ between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFormMode {
    Create,
    Edit,
}

#[derive(Clone, Copy)]
pub struct UserFormState {
    mode: RwSignal<UserFormMode>,
    email: RwSignal<String>,
    first_name: RwSignal<String>,
    last_name: RwSignal<String>,
    phone_number: RwSignal<String>,
    role: RwSignal<UserRole>,
    password: RwSignal<String>,
    push_notification_permission: RwSignal<bool>,
    email_error: RwSignal<Option<String>>,
    first_name_error: RwSignal<Option<String>>,
    last_name_error: RwSignal<Option<String>>,
    password_error: RwSignal<Option<String>>,
}

impl Default for UserFormState {
    fn default() -> Self {
        Self {
            mode: create_rw_signal(UserFormMode::Create),
            email: create_rw_signal(String::new()),
            first_name: create_rw_signal(String::new()),
            last_name: create_rw_signal(String::new()),
            phone_number: create_rw_signal(String::new()),
            role: create_rw_signal(UserRole::User),
            password: create_rw_signal(String::new()),
            push_notification_permission: create_rw_signal(false),
            email_error: create_rw_signal(None),
            first_name_error: create_rw_signal(None),
            last_name_error: create_rw_signal(None),
            password_error: create_rw_signal(None),
        }
    }
}

impl UserFormState {
    pub fn mode(&self) -> UserFormMode {
        self.mode.get_untracked()
    }

    pub fn email_signal(&self) -> RwSignal<String> {
        self.email
    }

    pub fn first_name_signal(&self) -> RwSignal<String> {
        self.first_name
    }

    pub fn last_name_signal(&self) -> RwSignal<String> {
        self.last_name
    }

    pub fn phone_number_signal(&self) -> RwSignal<String> {
        self.phone_number
    }

    pub fn role_signal(&self) -> RwSignal<UserRole> {
        self.role
    }

    pub fn password_signal(&self) -> RwSignal<String> {
        self.password
    }

    pub fn push_notification_permission_signal(&self) -> RwSignal<bool> {
        self.push_notification_permission
    }

    pub fn email_error(&self) -> RwSignal<Option<String>> {
        self.email_error
    }

    pub fn first_name_error(&self) -> RwSignal<Option<String>> {
        self.first_name_error
    }

    pub fn last_name_error(&self) -> RwSignal<Option<String>> {
        self.last_name_error
    }

    pub fn password_error(&self) -> RwSignal<Option<String>> {
        self.password_error
    }

    pub fn set_email(&self, value: String) {
        self.email.set(value);
        self.email_error.set(None);
    }

    pub fn set_first_name(&self, value: String) {
        self.first_name.set(value);
        self.first_name_error.set(None);
    }

    pub fn set_last_name(&self, value: String) {
        self.last_name.set(value);
        self.last_name_error.set(None);
    }

    pub fn set_password(&self, value: String) {
        self.password.set(value);
        self.password_error.set(None);
    }

    pub fn open_for_create(&self) {
        self.reset();
        self.mode.set(UserFormMode::Create);
    }

    /// Preloads an existing account. The password box starts blank, typing
    /// into it is how a password change is requested.
    pub fn open_for_edit(&self, user: &User) {
        self.mode.set(UserFormMode::Edit);
        self.email.set(user.email.clone());
        self.first_name.set(user.first_name.clone());
        self.last_name.set(user.last_name.clone());
        self.phone_number
            .set(user.phone_number.clone().unwrap_or_default());
        self.role.set(user.role);
        self.password.set(String::new());
        self.push_notification_permission.set(false);
        self.clear_errors();
    }

    pub fn validate(&self) -> bool {
        let email = self.email.get_untracked();
        let email_error = if email.trim().is_empty() {
            Some("Email обязателен".to_string())
        } else if !validate::is_plausible_email(&email) {
            Some("Некорректный email".to_string())
        } else {
            None
        };

        let first_name_error = if self.first_name.get_untracked().trim().is_empty() {
            Some("Имя обязательно".to_string())
        } else {
            None
        };

        let last_name_error = if self.last_name.get_untracked().trim().is_empty() {
            Some("Фамилия обязательна".to_string())
        } else {
            None
        };

        let password = self.password.get_untracked();
        let password_error = if password.is_empty() {
            match self.mode.get_untracked() {
                UserFormMode::Create => Some("Пароль обязателен".to_string()),
                UserFormMode::Edit => None,
            }
        } else if password.chars().count() < 6 {
            Some("Пароль должен быть не менее 6 символов".to_string())
        } else {
            None
        };

        let ok = email_error.is_none()
            && first_name_error.is_none()
            && last_name_error.is_none()
            && password_error.is_none();
        self.email_error.set(email_error);
        self.first_name_error.set(first_name_error);
        self.last_name_error.set(last_name_error);
        self.password_error.set(password_error);
        ok
    }

    pub fn to_create_request(&self) -> CreateUserRequest {
        let phone_number = self.phone_number.get_untracked();
        CreateUserRequest {
            email: self.email.get_untracked(),
            first_name: self.first_name.get_untracked(),
            last_name: self.last_name.get_untracked(),
            phone_number: (!phone_number.is_empty()).then_some(phone_number),
            role: self.role.get_untracked(),
            password: self.password.get_untracked(),
            push_notification_permission: self.push_notification_permission.get_untracked(),
        }
    }

    /// Email never goes into an update, the request type has no slot for it.
    /// A blank password is omitted so the current one stays.
    pub fn to_update_request(&self) -> UpdateUserRequest {
        let phone_number = self.phone_number.get_untracked();
        let password = self.password.get_untracked();
        UpdateUserRequest {
            first_name: Some(self.first_name.get_untracked()),
            last_name: Some(self.last_name.get_untracked()),
            phone_number: (!phone_number.is_empty()).then_some(phone_number),
            role: Some(self.role.get_untracked()),
            password: (!password.is_empty()).then_some(password),
        }
    }

    pub fn reset(&self) {
        self.mode.set(UserFormMode::Create);
        self.email.set(String::new());
        self.first_name.set(String::new());
        self.last_name.set(String::new());
        self.phone_number.set(String::new());
        self.role.set(UserRole::User);
        self.password.set(String::new());
        self.push_notification_permission.set(false);
        self.clear_errors();
    }

    fn clear_errors(&self) {
        self.email_error.set(None);
        self.first_name_error.set(None);
        self.last_name_error.set(None);
        self.password_error.set(None);
    }
}

/// Case-insensitive match against name, email and organization. An empty
/// query keeps everyone.
pub fn filter_users(users: &[User], query: &str) -> Vec<User> {
    let needle = query.to_lowercase();
    users
        .iter()
        .filter(|user| {
            user.first_name.to_lowercase().contains(&needle)
                || user.last_name.to_lowercase().contains(&needle)
                || user.email.to_lowercase().contains(&needle)
                || user
                    .organization_name
                    .as_deref()
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(&needle)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{helpers::sample_user, with_runtime};

    #[test]
    fn create_mode_requires_email_names_and_password() {
        with_runtime(|| {
            let form = UserFormState::default();
            assert!(!form.validate());
            assert_eq!(
                form.email_error().get_untracked().as_deref(),
                Some("Email обязателен")
            );
            assert_eq!(
                form.first_name_error().get_untracked().as_deref(),
                Some("Имя обязательно")
            );
            assert_eq!(
                form.last_name_error().get_untracked().as_deref(),
                Some("Фамилия обязательна")
            );
            assert_eq!(
                form.password_error().get_untracked().as_deref(),
                Some("Пароль обязателен")
            );
        });
    }

    #[test]
    fn malformed_email_and_short_password_have_their_own_messages() {
        with_runtime(|| {
            let form = UserFormState::default();
            form.set_email("нет-собаки".into());
            form.set_first_name("Айгерим".into());
            form.set_last_name("Нурланова".into());
            form.set_password("12345".into());
            assert!(!form.validate());
            assert_eq!(
                form.email_error().get_untracked().as_deref(),
                Some("Некорректный email")
            );
            assert_eq!(
                form.password_error().get_untracked().as_deref(),
                Some("Пароль должен быть не менее 6 символов")
            );
        });
    }

    #[test]
    fn edit_mode_allows_a_blank_password() {
        with_runtime(|| {
            let form = UserFormState::default();
            form.open_for_edit(&sample_user("u-1", "aigerim@qamqor.kz", UserRole::Manager));
            assert_eq!(form.mode(), UserFormMode::Edit);
            assert_eq!(form.email_signal().get_untracked(), "aigerim@qamqor.kz");
            assert!(form.password_signal().get_untracked().is_empty());
            assert!(form.validate());
        });
    }

    #[test]
    fn update_request_omits_email_and_blank_password() {
        with_runtime(|| {
            let form = UserFormState::default();
            form.open_for_edit(&sample_user("u-1", "aigerim@qamqor.kz", UserRole::Manager));
            let request = form.to_update_request();
            assert!(request.password.is_none());

            let value = serde_json::to_value(&request).unwrap();
            let object = value.as_object().unwrap();
            assert!(!object.contains_key("email"));
            assert!(!object.contains_key("password"));
            assert_eq!(object["first_name"], "Айгерим");
            assert_eq!(object["role"], "manager");
        });
    }

    #[test]
    fn typed_password_rides_along_in_edit_mode() {
        with_runtime(|| {
            let form = UserFormState::default();
            form.open_for_edit(&sample_user("u-1", "aigerim@qamqor.kz", UserRole::User));
            form.set_password("новый-пароль".into());
            assert!(form.validate());
            assert_eq!(
                form.to_update_request().password.as_deref(),
                Some("новый-пароль")
            );
        });
    }

    #[test]
    fn create_request_drops_an_empty_phone() {
        with_runtime(|| {
            let form = UserFormState::default();
            form.set_email("nurlan@qamqor.kz".into());
            form.set_first_name("Нурлан".into());
            form.set_last_name("Абаев".into());
            form.set_password("secret6".into());
            assert!(form.validate());
            let request = form.to_create_request();
            assert!(request.phone_number.is_none());
            assert_eq!(request.role, UserRole::User);
            assert!(!request.push_notification_permission);
        });
    }

    #[test]
    fn filter_matches_name_email_and_organization_case_insensitively() {
        let mut aigerim = sample_user("u-1", "aigerim@qamqor.kz", UserRole::Admin);
        aigerim.organization_name = Some("Главный офис".to_string());
        let mut nurlan = sample_user("u-2", "nurlan@qamqor.kz", UserRole::User);
        nurlan.first_name = "Нурлан".to_string();
        nurlan.last_name = "Абаев".to_string();
        let users = vec![aigerim, nurlan];

        assert_eq!(filter_users(&users, "АЙГЕ").len(), 1);
        assert_eq!(filter_users(&users, "абаев").len(), 1);
        assert_eq!(filter_users(&users, "главный")[0].id, "u-1");
        assert_eq!(filter_users(&users, "qamqor.kz").len(), 2);
        assert!(filter_users(&users, "никого").is_empty());
    }

    #[test]
    fn empty_query_keeps_everyone() {
        let users = vec![
            sample_user("u-1", "a@qamqor.kz", UserRole::User),
            sample_user("u-2", "b@qamqor.kz", UserRole::User),
        ];
        assert_eq!(filter_users(&users, "").len(), 2);
    }
}
