//! Context profile custom attributes (Global Manager)

use crate::api::common::{ApiQueryParams, PatchAction, GLOBAL_MANAGER_BASE_PATH};
use crate::api::gm_model::{PolicyContextProfileListResult, PolicyCustomAttributes};
use crate::api::infra::custom_attributes::{custom_attributes_path, CustomAttributesQuery};
use crate::api::{ApiError, Client};

pub struct GlobalCustomAttributesApi<'a> {
    client: &'a Client,
}

impl<'a> GlobalCustomAttributesApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn path() -> String {
        custom_attributes_path(&format!("{}/global-infra", GLOBAL_MANAGER_BASE_PATH))
    }

    /// GET /global-manager/api/v1/global-infra/context-profiles/custom-attributes
    pub async fn list(
        &self,
        query: &CustomAttributesQuery,
    ) -> Result<PolicyContextProfileListResult, ApiError> {
        self.client
            .get(&Self::path(), &query.to_query_params())
            .await
    }

    /// POST .../global-infra/context-profiles/custom-attributes?action={add|remove}
    pub async fn create(
        &self,
        attributes: &PolicyCustomAttributes,
        action: PatchAction,
    ) -> Result<(), ApiError> {
        let query = ApiQueryParams::new().add("action", action);
        self.client.post(&Self::path(), &query, attributes).await
    }
}
