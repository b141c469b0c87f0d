//! Authentication endpoints. Both go out without a bearer token; persisting
//! the returned session is the caller's job (`state::session`).

use super::client::ApiClient;
use super::types::{ApiResult, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

impl ApiClient {
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        self.execute(self.post_public("/api/v1/login").json(request))
            .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<RegisterResponse> {
        self.execute(self.post_public("/api/v1/register").json(request))
            .await
    }
}
