use crate::api::{ApiClient, ApiResult, LoginRequest, LoginResponse};
use std::rc::Rc;

#[derive(Clone)]
pub struct LoginRepository {
    client: Rc<ApiClient>,
}

impl LoginRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        self.client.login(request).await
    }
}
