use super::repository::LoginRepository;
use super::utils::LoginFormState;
use crate::api::{ApiClient, ApiError, LoginRequest, LoginResponse};
use crate::state::session::{self, SessionState, SessionUser};
use crate::utils::notify::NotificationState;
use leptos::*;

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub form: LoginFormState,
    pub show_password: RwSignal<bool>,
    pub general_error: RwSignal<Option<ApiError>>,
    pub notifications: NotificationState,
    pub submit_action: Action<LoginRequest, Result<LoginResponse, ApiError>>,
}

impl LoginViewModel {
    /// Validates and dispatches. A submission already in flight blocks the
    /// next one, so double-clicking the button sends a single request.
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

pub fn use_login_view_model() -> LoginViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = store_value(LoginRepository::new(api));
    let (_session, set_session) = session::use_session();
    let notifications = use_context::<NotificationState>().unwrap_or_else(NotificationState::new);

    let form = LoginFormState::default();
    let show_password = create_rw_signal(false);
    let general_error = create_rw_signal(None::<ApiError>);

    let submit_action = create_action(move |request: &LoginRequest| {
        let repository = repository.get_value();
        let request = request.clone();
        async move { run_login(repository, request, set_session).await }
    });

    create_effect(move |_| {
        apply_submit_result(
            submit_action.value().get(),
            form,
            general_error,
            notifications,
        );
    });

    LoginViewModel {
        form,
        show_password,
        general_error,
        notifications,
        submit_action,
    }
}

async fn run_login(
    repository: LoginRepository,
    request: LoginRequest,
    set_session: WriteSignal<SessionState>,
) -> Result<LoginResponse, ApiError> {
    let response = repository.login(&request).await?;
    session::login(
        &response.access_token,
        SessionUser::from(&response.user),
        set_session,
    );
    Ok(response)
}

fn apply_submit_result(
    result: Option<Result<LoginResponse, ApiError>>,
    form: LoginFormState,
    general_error: RwSignal<Option<ApiError>>,
    notifications: NotificationState,
) {
    if let Some(result) = result {
        match result {
            Ok(response) => {
                general_error.set(None);
                form.reset();
                notifications.success(format!(
                    "Добро пожаловать в систему мониторинга, {}!",
                    response.user.first_name
                ));
            }
            Err(error) => general_error.set(Some(error)),
        }
    }
}
