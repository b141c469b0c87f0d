use super::repository::RegisterRepository;
use super::utils::{register_error_message, RegisterFormState};
use crate::api::{ApiClient, ApiError, RegisterRequest, RegisterResponse};
use crate::utils::notify::NotificationState;
use leptos::*;

#[derive(Clone, Copy)]
pub struct RegisterViewModel {
    pub form: RegisterFormState,
    pub general_error: RwSignal<Option<ApiError>>,
    /// Flipped once; the shell switches to the sign-in screen when it sees it.
    pub registration_success: RwSignal<bool>,
    pub notifications: NotificationState,
    pub submit_action: Action<RegisterRequest, Result<RegisterResponse, ApiError>>,
}

impl RegisterViewModel {
    pub fn submit(&self) {
        if self.submit_action.pending().get_untracked() {
            return;
        }
        if !self.form.validate() {
            return;
        }
        self.general_error.set(None);
        self.submit_action.dispatch(self.form.to_request());
    }
}

pub fn use_register_view_model() -> RegisterViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = store_value(RegisterRepository::new(api));
    let notifications = use_context::<NotificationState>().unwrap_or_else(NotificationState::new);

    let form = RegisterFormState::default();
    let general_error = create_rw_signal(None::<ApiError>);
    let registration_success = create_rw_signal(false);

    let submit_action = create_action(move |request: &RegisterRequest| {
        let repository = repository.get_value();
        let request = request.clone();
        async move { repository.register(&request).await }
    });

    create_effect(move |_| {
        apply_submit_result(
            submit_action.value().get(),
            form,
            general_error,
            registration_success,
            notifications,
        );
    });

    RegisterViewModel {
        form,
        general_error,
        registration_success,
        notifications,
        submit_action,
    }
}

fn apply_submit_result(
    result: Option<Result<RegisterResponse, ApiError>>,
    form: RegisterFormState,
    general_error: RwSignal<Option<ApiError>>,
    registration_success: RwSignal<bool>,
    notifications: NotificationState,
) {
    if let Some(result) = result {
        match result {
            Ok(response) => {
                let message = if response.message.is_empty() {
                    "Регистрация успешна! Проверьте email для подтверждения.".to_string()
                } else {
                    response.message
                };
                notifications.success(message);
                registration_success.set(true);
                form.reset();
                general_error.set(None);
            }
            Err(error) => {
                notifications.error(register_error_message(&error));
                general_error.set(Some(error));
            }
        }
    }
}
