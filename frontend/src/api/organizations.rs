//! Organization (institution) endpoints.

use super::client::ApiClient;
use super::types::{
    AddManagerRequest, ApiResult, CreateOrganizationRequest, DeleteOrganizationResponse,
    GetOrganizationManagersResponse, ListOrganizationsResponse, ManagerActionResponse,
    OrganizationResponse, UpdateOrganizationRequest,
};

impl ApiClient {
    pub async fn create_organization(
        &self,
        request: &CreateOrganizationRequest,
    ) -> ApiResult<OrganizationResponse> {
        self.execute(self.post("/api/v1/organizations").json(request))
            .await
    }

    pub async fn get_organizations(&self) -> ApiResult<ListOrganizationsResponse> {
        self.execute(self.get("/api/v1/organizations")).await
    }

    pub async fn get_organization(&self, organization_id: &str) -> ApiResult<OrganizationResponse> {
        self.execute(self.get(&format!("/api/v1/organizations/{}", organization_id)))
            .await
    }

    /// Full-record update: the server replaces every editable field with what
    /// is sent here, so callers must merge edits into the current record first.
    pub async fn update_organization(
        &self,
        request: &UpdateOrganizationRequest,
    ) -> ApiResult<OrganizationResponse> {
        self.execute(
            self.put(&format!("/api/v1/organizations/{}", request.organization_id))
                .json(request),
        )
        .await
    }

    pub async fn delete_organization(
        &self,
        organization_id: &str,
    ) -> ApiResult<DeleteOrganizationResponse> {
        self.execute(self.delete(&format!("/api/v1/organizations/{}", organization_id)))
            .await
    }

    pub async fn add_organization_manager(
        &self,
        request: &AddManagerRequest,
    ) -> ApiResult<ManagerActionResponse> {
        self.execute(
            self.post(&format!(
                "/api/v1/organizations/{}/managers",
                request.organization_id
            ))
            .json(request),
        )
        .await
    }

    pub async fn remove_organization_manager(
        &self,
        organization_id: &str,
        manager_user_id: &str,
    ) -> ApiResult<ManagerActionResponse> {
        self.execute(self.delete(&format!(
            "/api/v1/organizations/{}/managers/{}",
            organization_id, manager_user_id
        )))
        .await
    }

    pub async fn get_organization_managers(
        &self,
        organization_id: &str,
    ) -> ApiResult<GetOrganizationManagersResponse> {
        self.execute(self.get(&format!(
            "/api/v1/organizations/{}/managers",
            organization_id
        )))
        .await
    }
}
