use std::rc::Rc;

use crate::api::{
    ApiClient, ApiResult, CreateUserRequest, CreateUserResponse, DeleteUserResponse,
    ListUsersResponse, LoginHistoryResponse, UpdateUserRequest, UpdateUserResponse, User,
};

/// Data access for the user management screen.
#[derive(Clone)]
pub struct UsersRepository {
    client: Rc<ApiClient>,
}

impl UsersRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub async fn list(&self) -> ApiResult<ListUsersResponse> {
        self.client.get_users().await
    }

    pub async fn create(&self, request: &CreateUserRequest) -> ApiResult<CreateUserResponse> {
        self.client.create_user(request).await
    }

    pub async fn update(
        &self,
        user_id: &str,
        request: &UpdateUserRequest,
    ) -> ApiResult<UpdateUserResponse> {
        self.client.update_user(user_id, request).await
    }

    pub async fn delete(&self, user_id: &str) -> ApiResult<DeleteUserResponse> {
        self.client.delete_user(user_id).await
    }

    pub async fn block(&self, user_id: &str) -> ApiResult<UpdateUserResponse> {
        self.client.block_user(user_id).await
    }

    pub async fn details(&self, user_id: &str) -> ApiResult<User> {
        Ok(self.client.get_user_details(user_id).await?.user)
    }

    pub async fn login_history(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> ApiResult<LoginHistoryResponse> {
        self.client
            .get_user_login_history(user_id, limit, offset)
            .await
    }
}
