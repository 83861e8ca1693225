//! Context profile custom attributes as a member collection

use std::sync::Arc;

use async_trait::async_trait;

use crate::api::infra::custom_attributes::CustomAttributesQuery;
use crate::api::model::{
    PolicyContextProfileListResult, PolicyCustomAttributes,
    POLICY_CUSTOM_ATTRIBUTES_ATTRIBUTE_SOURCE_CUSTOM, POLICY_CUSTOM_ATTRIBUTES_DATATYPE_STRING,
    POLICY_CUSTOM_ATTRIBUTES_KEY_CUSTOM_URL, POLICY_CUSTOM_ATTRIBUTES_KEY_DOMAIN_NAME,
};
use crate::api::{gm_model, ApiError, Client, PatchAction};
use crate::composite::{MemberCollection, MemberPage, MemberQuery};

pub const CUSTOM_ATTRIBUTE_KEYS: &[&str] = &[
    POLICY_CUSTOM_ATTRIBUTES_KEY_DOMAIN_NAME,
    POLICY_CUSTOM_ATTRIBUTES_KEY_CUSTOM_URL,
];

impl MemberPage for PolicyContextProfileListResult {
    fn result_count(&self) -> Option<i64> {
        self.result_count
    }

    fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    fn contains_member(&self, key: &str, member: &str) -> bool {
        self.results
            .iter()
            .flat_map(|profile| profile.attributes.iter())
            .filter(|attrs| attrs.key.as_deref() == Some(key))
            .any(|attrs| attrs.value.iter().any(|v| v == member))
    }
}

impl From<&MemberQuery> for CustomAttributesQuery {
    fn from(query: &MemberQuery) -> Self {
        Self {
            attribute_key: Some(query.key.clone()),
            attribute_source: Some(query.source.clone()),
            pagination: query.pagination.clone(),
        }
    }
}

/// The `custom-attributes` collection shared by all context profiles
#[derive(Debug, Clone)]
pub struct ContextProfileCustomAttributes {
    client: Arc<Client>,
}

impl ContextProfileCustomAttributes {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MemberCollection for ContextProfileCustomAttributes {
    type Page = PolicyContextProfileListResult;
    type GlobalPage = gm_model::PolicyContextProfileListResult;
    type Patch = PolicyCustomAttributes;
    type GlobalPatch = gm_model::PolicyCustomAttributes;

    fn kind(&self) -> &'static str {
        "ContextProfileCustomAttribute"
    }

    fn allowed_keys(&self) -> &'static [&'static str] {
        CUSTOM_ATTRIBUTE_KEYS
    }

    fn source(&self) -> &'static str {
        POLICY_CUSTOM_ATTRIBUTES_ATTRIBUTE_SOURCE_CUSTOM
    }

    fn build_patch(&self, key: &str, member: &str) -> PolicyCustomAttributes {
        PolicyCustomAttributes {
            datatype: Some(POLICY_CUSTOM_ATTRIBUTES_DATATYPE_STRING.to_string()),
            key: Some(key.to_string()),
            value: vec![member.to_string()],
            ..Default::default()
        }
    }

    async fn list(&self, query: &MemberQuery) -> Result<PolicyContextProfileListResult, ApiError> {
        self.client
            .infra()
            .custom_attributes()
            .list(&query.into())
            .await
    }

    async fn list_global(
        &self,
        query: &MemberQuery,
    ) -> Result<gm_model::PolicyContextProfileListResult, ApiError> {
        self.client
            .global_infra()
            .custom_attributes()
            .list(&query.into())
            .await
    }

    async fn mutate(
        &self,
        patch: &PolicyCustomAttributes,
        action: PatchAction,
    ) -> Result<(), ApiError> {
        self.client
            .infra()
            .custom_attributes()
            .create(patch, action)
            .await
    }

    async fn mutate_global(
        &self,
        patch: &gm_model::PolicyCustomAttributes,
        action: PatchAction,
    ) -> Result<(), ApiError> {
        self.client
            .global_infra()
            .custom_attributes()
            .create(patch, action)
            .await
    }
}
