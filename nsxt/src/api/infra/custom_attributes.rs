//! Context profile custom attributes (Local Manager)

use crate::api::common::{ApiQueryParams, PaginationParams, PatchAction, POLICY_BASE_PATH};
use crate::api::model::{PolicyContextProfileListResult, PolicyCustomAttributes};
use crate::api::{ApiError, Client};

/// Filters accepted by the custom attribute list call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomAttributesQuery {
    pub attribute_key: Option<String>,
    pub attribute_source: Option<String>,
    pub pagination: PaginationParams,
}

impl CustomAttributesQuery {
    pub fn to_query_params(&self) -> ApiQueryParams {
        ApiQueryParams::new()
            .add_optional("attribute_key", self.attribute_key.as_deref())
            .add_optional("attribute_source", self.attribute_source.as_deref())
            .extend(self.pagination.to_query_params())
    }
}

pub fn custom_attributes_path(base: &str) -> String {
    format!("{}/context-profiles/custom-attributes", base)
}

pub struct CustomAttributesApi<'a> {
    client: &'a Client,
}

impl<'a> CustomAttributesApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    fn path() -> String {
        custom_attributes_path(&format!("{}/infra", POLICY_BASE_PATH))
    }

    /// GET /policy/api/v1/infra/context-profiles/custom-attributes
    pub async fn list(
        &self,
        query: &CustomAttributesQuery,
    ) -> Result<PolicyContextProfileListResult, ApiError> {
        self.client
            .get(&Self::path(), &query.to_query_params())
            .await
    }

    /// POST /policy/api/v1/infra/context-profiles/custom-attributes?action={add|remove}
    pub async fn create(
        &self,
        attributes: &PolicyCustomAttributes,
        action: PatchAction,
    ) -> Result<(), ApiError> {
        let query = ApiQueryParams::new().add("action", action);
        self.client.post(&Self::path(), &query, attributes).await
    }
}
