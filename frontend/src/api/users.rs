//! User management endpoints. All of these require an authenticated session.

use super::client::ApiClient;
use super::types::{
    ApiResult, CreateUserRequest, CreateUserResponse, DeleteUserResponse, ListUsersResponse,
    LoginHistoryResponse, UpdateUserRequest, UpdateUserResponse, UserDetailsResponse,
};

impl ApiClient {
    pub async fn get_users(&self) -> ApiResult<ListUsersResponse> {
        self.execute(self.get("/api/v1/users")).await
    }

    pub async fn create_user(&self, request: &CreateUserRequest) -> ApiResult<CreateUserResponse> {
        self.execute(self.post("/api/v1/users/create").json(request))
            .await
    }

    pub async fn update_user(
        &self,
        user_id: &str,
        request: &UpdateUserRequest,
    ) -> ApiResult<UpdateUserResponse> {
        self.execute(self.put(&format!("/api/v1/users/{}", user_id)).json(request))
            .await
    }

    pub async fn delete_user(&self, user_id: &str) -> ApiResult<DeleteUserResponse> {
        self.execute(self.delete(&format!("/api/v1/users/{}", user_id)))
            .await
    }

    pub async fn block_user(&self, user_id: &str) -> ApiResult<UpdateUserResponse> {
        self.execute(self.put(&format!("/api/v1/users/{}/block", user_id)))
            .await
    }

    pub async fn get_user_details(&self, user_id: &str) -> ApiResult<UserDetailsResponse> {
        self.execute(self.get(&format!("/api/v1/users/{}", user_id)))
            .await
    }

    pub async fn get_user_login_history(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> ApiResult<LoginHistoryResponse> {
        self.execute(
            self.get(&format!("/api/v1/users/{}/login-history", user_id))
                .query(&[("limit", limit), ("offset", offset)]),
        )
        .await
    }
}
