use super::repository::UsersRepository;
use super::utils::{filter_users, UserFormState};
use crate::api::{
    ApiClient, ApiError, ApiResult, CreateUserRequest, LoginHistoryEntry, UpdateUserRequest, User,
};
use crate::utils::notify::NotificationState;
use leptos::*;

pub const LOGIN_HISTORY_PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone, Default)]
pub struct UsersState {
    pub users: Vec<User>,
    pub total: i64,
    pub loading: bool,
    pub error: Option<ApiError>,
}

/// Replaces the list with the server's current answer. A failed load keeps
/// the previous list on screen and only fills the error slot.
pub async fn load_users(repository: &UsersRepository, set_state: WriteSignal<UsersState>) -> bool {
    set_state.update(|state| {
        state.loading = true;
        state.error = None;
    });
    match repository.list().await {
        Ok(response) => {
            set_state.update(|state| {
                state.users = response.users;
                state.total = response.total;
                state.loading = false;
            });
            true
        }
        Err(error) => {
            set_state.update(|state| {
                state.error = Some(error);
                state.loading = false;
            });
            false
        }
    }
}

/// Every mutation reloads the whole list afterwards instead of patching it
/// locally, so the screen always shows what the server has.
pub async fn create_user(
    repository: &UsersRepository,
    set_state: WriteSignal<UsersState>,
    request: &CreateUserRequest,
) -> bool {
    set_state.update(|state| {
        state.loading = true;
        state.error = None;
    });
    match repository.create(request).await {
        Ok(_) => load_users(repository, set_state).await,
        Err(error) => {
            set_state.update(|state| {
                state.error = Some(error);
                state.loading = false;
            });
            false
        }
    }
}

pub async fn update_user(
    repository: &UsersRepository,
    set_state: WriteSignal<UsersState>,
    user_id: &str,
    request: &UpdateUserRequest,
) -> bool {
    set_state.update(|state| {
        state.loading = true;
        state.error = None;
    });
    match repository.update(user_id, request).await {
        Ok(_) => load_users(repository, set_state).await,
        Err(error) => {
            set_state.update(|state| {
                state.error = Some(error);
                state.loading = false;
            });
            false
        }
    }
}

pub async fn delete_user(
    repository: &UsersRepository,
    set_state: WriteSignal<UsersState>,
    user_id: &str,
) -> bool {
    set_state.update(|state| {
        state.loading = true;
        state.error = None;
    });
    match repository.delete(user_id).await {
        Ok(_) => load_users(repository, set_state).await,
        Err(error) => {
            set_state.update(|state| {
                state.error = Some(error);
                state.loading = false;
            });
            false
        }
    }
}

pub async fn block_user(
    repository: &UsersRepository,
    set_state: WriteSignal<UsersState>,
    user_id: &str,
) -> bool {
    set_state.update(|state| {
        state.loading = true;
        state.error = None;
    });
    match repository.block(user_id).await {
        Ok(_) => load_users(repository, set_state).await,
        Err(error) => {
            set_state.update(|state| {
                state.error = Some(error);
                state.loading = false;
            });
            false
        }
    }
}

/// One-off fetch for the details dialog; does not touch the list state.
pub async fn fetch_user_details(repository: &UsersRepository, user_id: &str) -> ApiResult<User> {
    repository.details(user_id).await
}

// ---------------------------------------------------------------------------
// Login history
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct LoginHistoryState {
    pub entries: Vec<LoginHistoryEntry>,
    pub loading: bool,
    pub has_more: bool,
    pub next_offset: i64,
}

/// Loads one page of sign-in history. Offset zero replaces the list, later
/// offsets append. A short page means the history is exhausted.
pub async fn load_login_history(
    repository: &UsersRepository,
    set_history: WriteSignal<LoginHistoryState>,
    user_id: &str,
    offset: i64,
) -> bool {
    set_history.update(|state| state.loading = true);
    match repository
        .login_history(user_id, LOGIN_HISTORY_PAGE_SIZE, offset)
        .await
    {
        Ok(response) => {
            set_history.update(|state| {
                let fetched = response.login_history.len() as i64;
                if offset == 0 {
                    state.entries = response.login_history;
                } else {
                    state.entries.extend(response.login_history);
                }
                state.has_more = fetched == LOGIN_HISTORY_PAGE_SIZE;
                state.next_offset = offset + fetched;
                state.loading = false;
            });
            true
        }
        Err(error) => {
            log::warn!("login history for {} did not load: {}", user_id, error);
            set_history.update(|state| {
                if offset == 0 {
                    state.entries.clear();
                    state.has_more = false;
                    state.next_offset = 0;
                }
                state.loading = false;
            });
            false
        }
    }
}

pub fn clear_login_history(set_history: WriteSignal<LoginHistoryState>) {
    set_history.set(LoginHistoryState::default());
}

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

#[derive(Clone, Copy)]
pub struct UsersViewModel {
    pub state: ReadSignal<UsersState>,
    pub set_state: WriteSignal<UsersState>,
    pub search_query: RwSignal<String>,
    pub filtered_users: Signal<Vec<User>>,
    pub form: UserFormState,
    pub form_visible: RwSignal<bool>,
    pub editing_user: RwSignal<Option<User>>,
    pub delete_target: RwSignal<Option<User>>,
    pub details_user: RwSignal<Option<User>>,
    pub login_history: ReadSignal<LoginHistoryState>,
    pub set_login_history: WriteSignal<LoginHistoryState>,
    pub notifications: NotificationState,
    pub load_action: Action<(), bool>,
    pub create_action: Action<CreateUserRequest, bool>,
    pub update_action: Action<(String, UpdateUserRequest), bool>,
    pub delete_action: Action<String, bool>,
    pub block_action: Action<String, bool>,
    pub history_action: Action<(String, i64), bool>,
}

impl UsersViewModel {
    pub fn open_create_form(&self) {
        self.form.open_for_create();
        self.editing_user.set(None);
        self.form_visible.set(true);
    }

    pub fn open_edit_form(&self, user: User) {
        self.form.open_for_edit(&user);
        self.editing_user.set(Some(user));
        self.form_visible.set(true);
    }

    /// Routes the dialog to create or update depending on how it was opened.
    pub fn submit_form(&self) {
        if self.create_action.pending().get_untracked()
            || self.update_action.pending().get_untracked()
        {
            return;
        }
        if !self.form.validate() {
            return;
        }
        match self.editing_user.get_untracked() {
            Some(user) => self
                .update_action
                .dispatch((user.id, self.form.to_update_request())),
            None => self.create_action.dispatch(self.form.to_create_request()),
        }
    }

    pub fn close_form(&self) {
        self.form_visible.set(false);
        self.editing_user.set(None);
    }

    pub fn request_delete(&self, user: User) {
        self.delete_target.set(Some(user));
    }

    pub fn cancel_delete(&self) {
        self.delete_target.set(None);
    }

    pub fn confirm_delete(&self) {
        if self.delete_action.pending().get_untracked() {
            return;
        }
        if let Some(user) = self.delete_target.get_untracked() {
            self.delete_action.dispatch(user.id);
        }
    }

    pub fn block(&self, user_id: String) {
        if self.block_action.pending().get_untracked() {
            return;
        }
        self.block_action.dispatch(user_id);
    }

    /// Opens the details dialog and pulls the first page of sign-in history.
    pub fn open_details(&self, user: User) {
        let user_id = user.id.clone();
        self.details_user.set(Some(user));
        self.history_action.dispatch((user_id, 0));
    }

    pub fn close_details(&self) {
        self.details_user.set(None);
        clear_login_history(self.set_login_history);
    }

    pub fn load_more_history(&self) {
        let history = self.login_history.get_untracked();
        if history.loading || !history.has_more {
            return;
        }
        if let Some(user) = self.details_user.get_untracked() {
            self.history_action.dispatch((user.id, history.next_offset));
        }
    }
}

pub fn use_users_view_model() -> UsersViewModel {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let repository = store_value(UsersRepository::new(api));
    let notifications = use_context::<NotificationState>().unwrap_or_else(NotificationState::new);

    let (state, set_state) = create_signal(UsersState::default());
    let (login_history, set_login_history) = create_signal(LoginHistoryState::default());
    let search_query = create_rw_signal(String::new());
    let filtered_users =
        Signal::derive(move || filter_users(&state.get().users, &search_query.get()));
    let form = UserFormState::default();
    let form_visible = create_rw_signal(false);
    let editing_user = create_rw_signal(None::<User>);
    let delete_target = create_rw_signal(None::<User>);
    let details_user = create_rw_signal(None::<User>);

    let load_action = create_action(move |_: &()| {
        let repository = repository.get_value();
        async move { load_users(&repository, set_state).await }
    });
    let create_action = create_action(move |request: &CreateUserRequest| {
        let repository = repository.get_value();
        let request = request.clone();
        async move { create_user(&repository, set_state, &request).await }
    });
    let update_action = leptos::create_action(move |payload: &(String, UpdateUserRequest)| {
        let repository = repository.get_value();
        let (user_id, request) = payload.clone();
        async move { update_user(&repository, set_state, &user_id, &request).await }
    });
    let delete_action = leptos::create_action(move |user_id: &String| {
        let repository = repository.get_value();
        let user_id = user_id.clone();
        async move { delete_user(&repository, set_state, &user_id).await }
    });
    let block_action = leptos::create_action(move |user_id: &String| {
        let repository = repository.get_value();
        let user_id = user_id.clone();
        async move { block_user(&repository, set_state, &user_id).await }
    });
    let history_action = leptos::create_action(move |payload: &(String, i64)| {
        let repository = repository.get_value();
        let (user_id, offset) = payload.clone();
        async move { load_login_history(&repository, set_login_history, &user_id, offset).await }
    });

    create_effect(move |_| {
        apply_create_result(
            create_action.value().get(),
            form,
            form_visible,
            notifications,
        );
    });
    create_effect(move |_| {
        apply_update_result(
            update_action.value().get(),
            form_visible,
            editing_user,
            notifications,
        );
    });
    create_effect(move |_| {
        apply_delete_result(delete_action.value().get(), delete_target, notifications);
    });

    // The first load happens in the browser.
    #[cfg(target_arch = "wasm32")]
    load_action.dispatch(());

    UsersViewModel {
        state,
        set_state,
        search_query,
        filtered_users,
        form,
        form_visible,
        editing_user,
        delete_target,
        details_user,
        login_history,
        set_login_history,
        notifications,
        load_action,
        create_action,
        update_action,
        delete_action,
        block_action,
        history_action,
    }
}

fn apply_create_result(
    result: Option<bool>,
    form: UserFormState,
    form_visible: RwSignal<bool>,
    notifications: NotificationState,
) {
    match result {
        Some(true) => {
            form.reset();
            form_visible.set(false);
            notifications.success("Пользователь успешно создан");
        }
        Some(false) => notifications.error("Не удалось создать пользователя"),
        None => {}
    }
}

fn apply_update_result(
    result: Option<bool>,
    form_visible: RwSignal<bool>,
    editing_user: RwSignal<Option<User>>,
    notifications: NotificationState,
) {
    match result {
        Some(true) => {
            form_visible.set(false);
            editing_user.set(None);
            notifications.success("Пользователь успешно обновлен");
        }
        Some(false) => notifications.error("Не удалось обновить пользователя"),
        None => {}
    }
}

/// The confirmation dialog closes either way; only the toast differs.
fn apply_delete_result(
    result: Option<bool>,
    delete_target: RwSignal<Option<User>>,
    notifications: NotificationState,
) {
    match result {
        Some(true) => {
            delete_target.set(None);
            notifications.success("Пользователь успешно удален");
        }
        Some(false) => {
            delete_target.set(None);
            notifications.error("Не удалось удалить пользователя");
        }
        None => {}
    }
}
