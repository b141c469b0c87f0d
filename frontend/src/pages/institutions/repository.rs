use std::rc::Rc;

use super::fixtures::FixtureStore;
use crate::api::{
    ApiClient, ApiResult, CreateOrganizationRequest, DeleteOrganizationResponse, Organization,
    UpdateOrganizationRequest,
};
use crate::config::DataSource;

/// Data access for the institutions screen. Either the organizations
/// endpoints behind the gateway or the seeded in-memory dataset; callers
/// cannot tell which one they got.
#[derive(Clone)]
pub enum InstitutionsRepository {
    Live(Rc<ApiClient>),
    Fixtures(FixtureStore),
}

impl InstitutionsRepository {
    pub fn new(api: ApiClient) -> Self {
        Self::Live(Rc::new(api))
    }

    pub fn fixtures() -> Self {
        Self::Fixtures(FixtureStore::new())
    }

    pub fn from_data_source(source: DataSource, api: ApiClient) -> Self {
        match source {
            DataSource::Live => Self::new(api),
            DataSource::Fixtures => Self::fixtures(),
        }
    }

    pub async fn list(&self) -> ApiResult<Vec<Organization>> {
        match self {
            Self::Live(client) => Ok(client.get_organizations().await?.organizations),
            Self::Fixtures(store) => Ok(store.list()),
        }
    }

    pub async fn create(&self, request: &CreateOrganizationRequest) -> ApiResult<Organization> {
        match self {
            Self::Live(client) => Ok(client.create_organization(request).await?.organization),
            Self::Fixtures(store) => Ok(store.create(request)),
        }
    }

    pub async fn update(&self, request: &UpdateOrganizationRequest) -> ApiResult<Organization> {
        match self {
            Self::Live(client) => Ok(client.update_organization(request).await?.organization),
            Self::Fixtures(store) => store.update(request),
        }
    }

    pub async fn delete(&self, organization_id: &str) -> ApiResult<DeleteOrganizationResponse> {
        match self {
            Self::Live(client) => client.delete_organization(organization_id).await,
            Self::Fixtures(store) => store.delete(organization_id),
        }
    }
}
