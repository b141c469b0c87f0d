//! Session store: the signal-backed source of truth for "who is signed in".
//!
//! The token and the profile are persisted as a pair. A stored token without
//! a stored profile (or the other way round) is treated as no session at all
//! and both keys are cleared, so the rest of the app never sees half a login.

use crate::api::{LoginUser, UserRole};
use crate::utils::storage;
use leptos::*;
use serde::{Deserialize, Serialize};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const CURRENT_USER_KEY: &str = "current_user";

type SessionContext = (ReadSignal<SessionState>, WriteSignal<SessionState>);

/// Identity slice persisted under [`CURRENT_USER_KEY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: String,
    pub email: String,
    pub role: UserRole,
    pub full_name: String,
}

impl From<&LoginUser> for SessionUser {
    fn from(user: &LoginUser) -> Self {
        Self {
            user_id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            full_name: user.full_name(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<SessionUser>,
    pub token: Option<String>,
    pub is_authenticated: bool,
    pub loading: bool,
}

fn create_session_context() -> SessionContext {
    let (session, set_session) = create_signal(SessionState {
        loading: true,
        ..SessionState::default()
    });
    // Both storage backends are synchronous, so the loading phase resolves
    // before the provider renders anything.
    rehydrate(set_session);
    (session, set_session)
}

#[component]
pub fn SessionProvider(children: Children) -> impl IntoView {
    let ctx = create_session_context();
    provide_context::<SessionContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().unwrap_or_else(|| create_signal(SessionState::default()))
}

/// Persists the token and profile, then publishes the authenticated state.
pub fn login(token: &str, user: SessionUser, set_session: WriteSignal<SessionState>) {
    if let Err(err) = storage::set_item(ACCESS_TOKEN_KEY, token) {
        log::error!("failed to persist access token: {}", err);
    }
    match serde_json::to_string(&user) {
        Ok(json) => {
            if let Err(err) = storage::set_item(CURRENT_USER_KEY, &json) {
                log::error!("failed to persist profile: {}", err);
            }
        }
        Err(err) => log::error!("profile did not serialize: {}", err),
    }

    set_session.update(|state| {
        state.user = Some(user);
        state.token = Some(token.to_string());
        state.is_authenticated = true;
        state.loading = false;
    });
}

pub fn logout(set_session: WriteSignal<SessionState>) {
    let _ = storage::remove_item(ACCESS_TOKEN_KEY);
    let _ = storage::remove_item(CURRENT_USER_KEY);
    set_session.update(|state| *state = SessionState::default());
}

/// Restores a previous session from storage, clearing whatever is left behind
/// when only one half of it survived or the stored profile does not decode.
pub fn rehydrate(set_session: WriteSignal<SessionState>) {
    let token = storage::get_item(ACCESS_TOKEN_KEY)
        .ok()
        .flatten()
        .filter(|token| !token.is_empty());
    let user = storage::get_item(CURRENT_USER_KEY)
        .ok()
        .flatten()
        .and_then(|json| match serde_json::from_str::<SessionUser>(&json) {
            Ok(user) => Some(user),
            Err(err) => {
                log::warn!("stored profile did not decode, dropping session: {}", err);
                None
            }
        });

    match (token, user) {
        (Some(token), Some(user)) => set_session.update(|state| {
            state.user = Some(user);
            state.token = Some(token);
            state.is_authenticated = true;
            state.loading = false;
        }),
        _ => {
            let _ = storage::remove_item(ACCESS_TOKEN_KEY);
            let _ = storage::remove_item(CURRENT_USER_KEY);
            set_session.update(|state| *state = SessionState::default());
        }
    }
}
