use crate::api::{ApiError, RegisterRequest};
use crate::utils::validate;
use leptos::*;

#[derive(Clone, Copy)]
pub struct RegisterFormState {
    email: RwSignal<String>,
    password: RwSignal<String>,
    confirm_password: RwSignal<String>,
    first_name: RwSignal<String>,
    last_name: RwSignal<String>,
    phone_number: RwSignal<String>,
    push_notification_permission: RwSignal<bool>,
    email_error: RwSignal<Option<String>>,
    password_error: RwSignal<Option<String>>,
    confirm_password_error: RwSignal<Option<String>>,
    first_name_error: RwSignal<Option<String>>,
    last_name_error: RwSignal<Option<String>>,
    phone_number_error: RwSignal<Option<String>>,
}

impl Default for RegisterFormState {
    fn default() -> Self {
        Self {
            email: create_rw_signal(String::new()),
            password: create_rw_signal(String::new()),
            confirm_password: create_rw_signal(String::new()),
            first_name: create_rw_signal(String::new()),
            last_name: create_rw_signal(String::new()),
            phone_number: create_rw_signal(String::new()),
            push_notification_permission: create_rw_signal(false),
            email_error: create_rw_signal(None),
            password_error: create_rw_signal(None),
            confirm_password_error: create_rw_signal(None),
            first_name_error: create_rw_signal(None),
            last_name_error: create_rw_signal(None),
            phone_number_error: create_rw_signal(None),
        }
    }
}

impl RegisterFormState {
    pub fn email_signal(&self) -> RwSignal<String> {
        self.email
    }

    pub fn password_signal(&self) -> RwSignal<String> {
        self.password
    }

    pub fn confirm_password_signal(&self) -> RwSignal<String> {
        self.confirm_password
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

    pub fn push_permission_signal(&self) -> RwSignal<bool> {
        self.push_notification_permission
    }

    pub fn email_error(&self) -> RwSignal<Option<String>> {
        self.email_error
    }

    pub fn password_error(&self) -> RwSignal<Option<String>> {
        self.password_error
    }

    pub fn confirm_password_error(&self) -> RwSignal<Option<String>> {
        self.confirm_password_error
    }

    pub fn first_name_error(&self) -> RwSignal<Option<String>> {
        self.first_name_error
    }

    pub fn last_name_error(&self) -> RwSignal<Option<String>> {
        self.last_name_error
    }

    pub fn phone_number_error(&self) -> RwSignal<Option<String>> {
        self.phone_number_error
    }

    pub fn set_email(&self, value: String) {
        self.email.set(value);
        self.email_error.set(None);
    }

    pub fn set_password(&self, value: String) {
        self.password.set(value);
        self.password_error.set(None);
    }

    pub fn set_confirm_password(&self, value: String) {
        self.confirm_password.set(value);
        self.confirm_password_error.set(None);
    }

    pub fn set_first_name(&self, value: String) {
        self.first_name.set(value);
        self.first_name_error.set(None);
    }

    pub fn set_last_name(&self, value: String) {
        self.last_name.set(value);
        self.last_name_error.set(None);
    }

    pub fn set_phone_number(&self, value: String) {
        self.phone_number.set(value);
        self.phone_number_error.set(None);
    }

    pub fn set_push_permission(&self, value: bool) {
        self.push_notification_permission.set(value);
    }

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
        } else if !validate::is_strong_password(&password) {
            Some(
                "Пароль должен содержать минимум 8 символов, заглавные и строчные буквы, цифру и специальный символ"
                    .to_string(),
            )
        } else {
            None
        };

        let confirm = self.confirm_password.get_untracked();
        let confirm_error = if confirm.is_empty() {
            Some("Подтвердите пароль".to_string())
        } else if confirm != password {
            Some("Пароли не совпадают".to_string())
        } else {
            None
        };

        let first_name = self.first_name.get_untracked();
        let first_name_error = if first_name.is_empty() {
            Some("Имя обязательно для заполнения".to_string())
        } else if !validate::is_valid_name(&first_name) {
            Some("Имя должно содержать от 2 до 50 символов и только буквы".to_string())
        } else {
            None
        };

        let last_name = self.last_name.get_untracked();
        let last_name_error = if last_name.is_empty() {
            Some("Фамилия обязательна для заполнения".to_string())
        } else if !validate::is_valid_name(&last_name) {
            Some("Фамилия должна содержать от 2 до 50 символов и только буквы".to_string())
        } else {
            None
        };

        let phone = self.phone_number.get_untracked();
        let phone_error = if !phone.is_empty() && !validate::is_valid_phone(&phone) {
            Some("Введите корректный номер телефона".to_string())
        } else {
            None
        };

        let ok = [
            &email_error,
            &password_error,
            &confirm_error,
            &first_name_error,
            &last_name_error,
            &phone_error,
        ]
        .iter()
        .all(|error| error.is_none());

        self.email_error.set(email_error);
        self.password_error.set(password_error);
        self.confirm_password_error.set(confirm_error);
        self.first_name_error.set(first_name_error);
        self.last_name_error.set(last_name_error);
        self.phone_number_error.set(phone_error);
        ok
    }

    pub fn to_request(&self) -> RegisterRequest {
        let phone = self.phone_number.get_untracked();
        RegisterRequest {
            email: self.email.get_untracked(),
            password: self.password.get_untracked(),
            first_name: self.first_name.get_untracked(),
            last_name: self.last_name.get_untracked(),
            phone_number: if phone.is_empty() { None } else { Some(phone) },
            push_notification_permission: self.push_notification_permission.get_untracked(),
            // The backend assigns the default role to self-registered accounts.
            role: None,
        }
    }

    pub fn reset(&self) {
        self.email.set(String::new());
        self.password.set(String::new());
        self.confirm_password.set(String::new());
        self.first_name.set(String::new());
        self.last_name.set(String::new());
        self.phone_number.set(String::new());
        self.push_notification_permission.set(false);
        self.clear_errors();
    }

    pub fn clear_errors(&self) {
        self.email_error.set(None);
        self.password_error.set(None);
        self.confirm_password_error.set(None);
        self.first_name_error.set(None);
        self.last_name_error.set(None);
        self.phone_number_error.set(None);
    }
}

/// Status-specific display message for a failed registration.
pub fn register_error_message(error: &ApiError) -> String {
    if error.status == 0 {
        return error.message().to_string();
    }
    match error.status {
        400 => error.message_or("Неверный формат данных запроса"),
        409 => "Пользователь с таким email уже существует".to_string(),
        500 => error.message_or("Ошибка сервера. Попробуйте позже."),
        _ => error.message_or("Произошла ошибка при регистрации"),
    }
}
