use crate::api::{ApiError, LoginRequest};
use crate::utils::validate;
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginFormState {
    email: RwSignal<String>,
    password: RwSignal<String>,
    email_error: RwSignal<Option<String>>,
    password_error: RwSignal<Option<String>>,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self {
            email: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
            email_error: create_rw_signal(None),
            password_error: create_rw_signal(None),
        }
    }
}

impl LoginFormState {
    pub fn email_signal(&self) -> RwSignal<String> {
        self.email
    }

    pub fn password_signal(&self) -> RwSignal<String> {
        self.password
    }

    pub fn email_error(&self) -> RwSignal<Option<String>> {
        self.email_error
    }

    pub fn password_error(&self) -> RwSignal<Option<String>> {
        self.password_error
    }

    /// Editing a field clears that field's error right away.
    pub fn set_email(&self, value: String) {
        self.email.set(value);
        self.email_error.set(None);
    }

    pub fn set_password(&self, value: String) {
        self.password.set(value);
        self.password_error.set(None);
    }

    /// Fills the per-field error slots; returns whether the form may submit.
    pub fn validate(&self) -> bool {
        let email = self.email.get_untracked();
        let email_error = if email.is_empty() {
            Some("Email обязателен для заполнения".to_string())
        } else if !validate::is_valid_email(&email) {
            Some("Введите корректный email адрес".to_string())
        } else {
            None
        };

        let password = self.password.get_untracked();
        let password_error = if password.is_empty() {
            Some("Пароль обязателен для заполнения".to_string())
        } else if password.chars().count() < 6 {
            Some("Пароль должен содержать минимум 6 символов".to_string())
        } else {
            None
        };

        let ok = email_error.is_none() && password_error.is_none();
        self.email_error.set(email_error);
        self.password_error.set(password_error);
        ok
    }

    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.get_untracked(),
            password: self.password.get_untracked(),
        }
    }

    pub fn reset(&self) {
        self.email.set(String::new());
        self.password.set(String::new());
        self.email_error.set(None);
        self.password_error.set(None);
    }
}

/// Status-specific display message for a failed sign-in.
pub fn login_error_message(error: &ApiError) -> String {
    if error.status == 0 {
        return error.message().to_string();
    }
    match error.status {
        400 => error.message_or("Неверный формат данных запроса"),
        401 => "Неверный email или пароль".to_string(),
        403 => "Email не подтвержден. Проверьте почту для подтверждения.".to_string(),
        500 => error.message_or("Ошибка сервера. Попробуйте позже."),
        _ => error.message_or("Произошла ошибка при входе в систему"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ErrorEnvelope;
    use crate::test_support::with_runtime;

    fn application_error(status: u16, message: &str) -> ApiError {
        ApiError::application(
            status,
            ErrorEnvelope {
                error: "Error".into(),
                message: message.into(),
            },
        )
    }

    #[test]
    fn empty_fields_produce_required_errors() {
        with_runtime(|| {
            let form = LoginFormState::default();
            assert!(!form.validate());
            assert_eq!(
                form.email_error().get_untracked().as_deref(),
                Some("Email обязателен для заполнения")
            );
            assert_eq!(
                form.password_error().get_untracked().as_deref(),
                Some("Пароль обязателен для заполнения")
            );
        });
    }

    #[test]
    fn malformed_email_and_short_password_are_rejected() {
        with_runtime(|| {
            let form = LoginFormState::default();
            form.set_email("not-an-email".into());
            form.set_password("12345".into());
            assert!(!form.validate());
            assert_eq!(
                form.email_error().get_untracked().as_deref(),
                Some("Введите корректный email адрес")
            );
            assert_eq!(
                form.password_error().get_untracked().as_deref(),
                Some("Пароль должен содержать минимум 6 символов")
            );
        });
    }

    #[test]
    fn valid_credentials_clear_all_errors() {
        with_runtime(|| {
            let form = LoginFormState::default();
            form.set_email("aigerim@qamqor.kz".into());
            form.set_password("secret6".into());
            assert!(form.validate());
            assert!(form.email_error().get_untracked().is_none());
            assert!(form.password_error().get_untracked().is_none());
        });
    }

    #[test]
    fn editing_a_field_clears_only_its_error() {
        with_runtime(|| {
            let form = LoginFormState::default();
            form.validate();
            form.set_email("a@b.kz".into());
            assert!(form.email_error().get_untracked().is_none());
            assert!(form.password_error().get_untracked().is_some());
        });
    }

    #[test]
    fn status_table_matches_for_every_documented_code() {
        let transport = ApiError::transport("Не удалось подключиться к серверу API");
        assert_eq!(
            login_error_message(&transport),
            "Не удалось подключиться к серверу API"
        );

        assert_eq!(
            login_error_message(&application_error(400, "")),
            "Неверный формат данных запроса"
        );
        assert_eq!(
            login_error_message(&application_error(400, "bad json")),
            "bad json"
        );
        assert_eq!(
            login_error_message(&application_error(401, "ignored")),
            "Неверный email или пароль"
        );
        assert_eq!(
            login_error_message(&application_error(403, "ignored")),
            "Email не подтвержден. Проверьте почту для подтверждения."
        );
        assert_eq!(
            login_error_message(&application_error(500, "")),
            "Ошибка сервера. Попробуйте позже."
        );
        assert_eq!(
            login_error_message(&application_error(502, "")),
            "Произошла ошибка при входе в систему"
        );
    }
}
