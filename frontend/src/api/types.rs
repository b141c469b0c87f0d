use chrono::{DateTime, Utc};
use leptos::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Which layer a failure came from. `Validation` never left the client,
/// `Transport` never reached the server, `Protocol` means the response was
/// not the JSON we agreed on, `Application` is the backend saying no.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    Validation,
    Transport,
    Protocol,
    Application,
}

/// The `{error, message}` body every backend failure responds with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .envelope.message)]
pub struct ApiError {
    /// HTTP status of the response; `0` when no response was received
    /// (transport failures and client-side validation).
    pub status: u16,
    pub kind: ApiErrorKind,
    pub envelope: ErrorEnvelope,
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            kind: ApiErrorKind::Transport,
            envelope: ErrorEnvelope {
                error: "Network error".to_string(),
                message: message.into(),
            },
        }
    }

    /// Response carried a non-JSON content type.
    pub fn invalid_response(status: u16) -> Self {
        Self {
            status,
            kind: ApiErrorKind::Protocol,
            envelope: ErrorEnvelope {
                error: "Invalid response".to_string(),
                message: "Сервер вернул некорректный ответ".to_string(),
            },
        }
    }

    /// Response claimed JSON but the body did not decode.
    pub fn parse_error(status: u16) -> Self {
        Self {
            status,
            kind: ApiErrorKind::Protocol,
            envelope: ErrorEnvelope {
                error: "Parse error".to_string(),
                message: "Ошибка при обработке ответа сервера".to_string(),
            },
        }
    }

    /// Non-2xx with the server's own `{error, message}` body.
    pub fn application(status: u16, envelope: ErrorEnvelope) -> Self {
        Self {
            status,
            kind: ApiErrorKind::Application,
            envelope,
        }
    }

    /// Rejected on the client before any request went out.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            kind: ApiErrorKind::Validation,
            envelope: ErrorEnvelope {
                error: "Validation error".to_string(),
                message: message.into(),
            },
        }
    }

    pub fn message(&self) -> &str {
        &self.envelope.message
    }

    /// Server message when it sent one, the given fallback otherwise.
    pub fn message_or(&self, fallback: &str) -> String {
        if self.envelope.message.is_empty() {
            fallback.to_string()
        } else {
            self.envelope.message.clone()
        }
    }
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.envelope.message
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.envelope.message.into_view()
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub message: String,
    pub user: LoginUser,
}

/// Profile embedded in the login response. Slimmer than [`User`]: the auth
/// service answers before organization enrichment happens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginUser {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub push_notification_permission: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl LoginUser {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub push_notification_permission: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
    Manager,
    Operator,
    Analyst,
}

impl UserRole {
    pub const ALL: [UserRole; 5] = [
        UserRole::Admin,
        UserRole::User,
        UserRole::Manager,
        UserRole::Operator,
        UserRole::Analyst,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
            UserRole::Manager => "manager",
            UserRole::Operator => "operator",
            UserRole::Analyst => "analyst",
        }
    }

    /// Label shown in role dropdowns and on user cards.
    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::Admin => "Администратор",
            UserRole::User => "Пользователь",
            UserRole::Manager => "Менеджер",
            UserRole::Operator => "Оператор",
            UserRole::Analyst => "Аналитик",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::User
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(default)]
    pub organization_name: Option<String>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListUsersResponse {
    pub users: Vec<User>,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    pub role: UserRole,
    pub password: String,
    pub push_notification_permission: bool,
}

/// Partial update. Email is immutable after creation and deliberately has no
/// slot here; an absent password means "leave it unchanged".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub user_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteUserResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDetailsResponse {
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginHistoryEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub login_status: String,
    pub ip_address: String,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub failure_reason: Option<String>,
}

impl LoginHistoryEntry {
    /// The backend is not consistent about the status casing.
    pub fn is_success(&self) -> bool {
        self.login_status.eq_ignore_ascii_case("success")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginHistoryResponse {
    pub login_history: Vec<LoginHistoryEntry>,
    pub limit: i64,
    pub offset: i64,
}

// ---------------------------------------------------------------------------
// Organizations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub organization_id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub map_url: String,
    #[serde(default)]
    pub active_modules: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganizationRequest {
    pub name: String,
    pub description: String,
    pub address: String,
    pub map_url: String,
    pub active_modules: String,
}

/// Full-record update: the backend has no partial patch, every field is
/// resubmitted with gaps filled from the last loaded record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateOrganizationRequest {
    pub organization_id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub is_active: bool,
    pub map_url: String,
    pub active_modules: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationResponse {
    pub organization: Organization,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOrganizationsResponse {
    pub organizations: Vec<Organization>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteOrganizationResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddManagerRequest {
    pub organization_id: String,
    pub manager_user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerActionResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetOrganizationManagersResponse {
    pub manager_user_ids: Vec<String>,
}

// ---------------------------------------------------------------------------
// Active modules
// ---------------------------------------------------------------------------

/// Per-organization feature toggles, stored serialized inside
/// [`Organization::active_modules`]. The first wire key keeps the spelling
/// the deployed backend ships.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActiveModules {
    #[serde(rename = "smokDetection")]
    pub smoke_detection: bool,
    pub fire_detection: bool,
    pub access_control: bool,
    pub perimeter_monitoring: bool,
}

/// Decodes the `active_modules` column. Stored strings predate the codec and
/// are not trusted: empty or malformed input yields all-off, missing keys
/// are off, unknown keys are ignored.
pub fn decode_active_modules(raw: &str) -> ActiveModules {
    if raw.trim().is_empty() {
        return ActiveModules::default();
    }
    match serde_json::from_str(raw) {
        Ok(modules) => modules,
        Err(err) => {
            log::warn!("active_modules did not decode, defaulting to all-off: {}", err);
            ActiveModules::default()
        }
    }
}

pub fn encode_active_modules(modules: &ActiveModules) -> String {
    serde_json::to_string(modules).unwrap_or_else(|_| "{}".to_string())
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use serde_json::json;

    fn modules_from_bits(bits: u8) -> ActiveModules {
        ActiveModules {
            smoke_detection: bits & 1 != 0,
            fire_detection: bits & 2 != 0,
            access_control: bits & 4 != 0,
            perimeter_monitoring: bits & 8 != 0,
        }
    }

    #[test]
    fn active_modules_round_trips_every_combination() {
        for bits in 0..16 {
            let modules = modules_from_bits(bits);
            let encoded = encode_active_modules(&modules);
            assert_eq!(decode_active_modules(&encoded), modules, "bits {:#06b}", bits);
        }
    }

    #[test]
    fn active_modules_decode_is_fail_safe() {
        assert_eq!(decode_active_modules(""), ActiveModules::default());
        assert_eq!(decode_active_modules("   "), ActiveModules::default());
        assert_eq!(decode_active_modules("не json"), ActiveModules::default());
        assert_eq!(decode_active_modules("{\"smokDetection\":"), ActiveModules::default());
        assert_eq!(
            decode_active_modules("{\"smokDetection\": \"да\"}"),
            ActiveModules::default()
        );
    }

    #[test]
    fn active_modules_missing_and_unknown_keys_are_tolerated() {
        let decoded = decode_active_modules("{\"fireDetection\":true,\"cameraCount\":4}");
        assert!(decoded.fire_detection);
        assert!(!decoded.smoke_detection);
        assert!(!decoded.access_control);
        assert!(!decoded.perimeter_monitoring);
    }

    #[test]
    fn active_modules_uses_deployed_wire_keys() {
        let encoded = encode_active_modules(&ActiveModules {
            smoke_detection: true,
            fire_detection: true,
            access_control: true,
            perimeter_monitoring: true,
        });
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(
            value,
            json!({
                "smokDetection": true,
                "fireDetection": true,
                "accessControl": true,
                "perimeterMonitoring": true,
            })
        );
    }

    #[test]
    fn api_error_constructors_tag_the_kind() {
        let transport = ApiError::transport("Не удалось подключиться к серверу");
        assert_eq!(transport.status, 0);
        assert_eq!(transport.kind, ApiErrorKind::Transport);
        assert_eq!(transport.envelope.error, "Network error");

        let protocol = ApiError::invalid_response(502);
        assert_eq!(protocol.kind, ApiErrorKind::Protocol);
        assert_eq!(protocol.message(), "Сервер вернул некорректный ответ");

        let parse = ApiError::parse_error(200);
        assert_eq!(parse.envelope.error, "Parse error");

        let application = ApiError::application(
            409,
            ErrorEnvelope {
                error: "conflict".to_string(),
                message: "уже существует".to_string(),
            },
        );
        assert_eq!(application.status, 409);
        assert_eq!(application.kind, ApiErrorKind::Application);

        let validation = ApiError::validation("Учреждение не найдено");
        assert_eq!(validation.status, 0);
        assert_eq!(validation.kind, ApiErrorKind::Validation);
    }

    #[test]
    fn api_error_displays_the_message() {
        let error = ApiError::transport("Ошибка сети: boom");
        assert_eq!(error.to_string(), "Ошибка сети: boom");
        let as_string: String = error.into();
        assert_eq!(as_string, "Ошибка сети: boom");
    }

    #[test]
    fn update_user_request_never_serializes_email_or_blank_fields() {
        let request = UpdateUserRequest {
            first_name: Some("Айгерим".to_string()),
            ..UpdateUserRequest::default()
        };
        let value = serde_json::to_value(&request).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert!(object.contains_key("first_name"));
        assert!(!object.contains_key("email"));
        assert!(!object.contains_key("password"));
    }

    #[test]
    fn user_role_round_trips_lowercase() {
        for role in UserRole::ALL {
            let encoded = serde_json::to_string(&role).unwrap();
            assert_eq!(encoded, format!("\"{}\"", role.as_str()));
            let decoded: UserRole = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, role);
        }
        assert_eq!(UserRole::Admin.display_name(), "Администратор");
        assert_eq!(UserRole::default(), UserRole::User);
    }

    #[test]
    fn login_history_status_ignores_case() {
        let entry = LoginHistoryEntry {
            id: "1".to_string(),
            created_at: Utc::now(),
            login_status: "SUCCESS".to_string(),
            ip_address: "10.0.0.1".to_string(),
            user_agent: None,
            failure_reason: None,
        };
        assert!(entry.is_success());
    }
}
