//! Resource trait and related types
//!
//! This module defines the Resource trait and the configure extension that
//! resources implement to receive provider data.

use crate::schema::Schema;
use crate::types::{Diagnostic, DynamicValue};
use async_trait::async_trait;
use std::any::Any;
use std::sync::Arc;

/// Base trait for resources - implement CRUD operations
/// Type name should be constant and match the key in Provider.resources()
#[async_trait]
pub trait Resource: Send + Sync {
    /// Type name should be constant (e.g., "nsxt_policy_group")
    fn type_name(&self) -> &str;

    fn schema(&self) -> Schema;

    /// Called during plan to validate configuration
    async fn validate(&self, request: ValidateResourceConfigRequest)
        -> ValidateResourceConfigResponse;

    /// MUST populate all attributes in response.new_state (including computed)
    async fn create(&self, request: CreateResourceRequest) -> CreateResourceResponse;

    /// MUST return accurate current state or None if resource doesn't exist
    async fn read(&self, request: ReadResourceRequest) -> ReadResourceResponse;

    async fn update(&self, request: UpdateResourceRequest) -> UpdateResourceResponse;

    async fn delete(&self, request: DeleteResourceRequest) -> DeleteResourceResponse;

    /// Called during "terraform import"; the returned state is refreshed with
    /// read() afterwards
    async fn import_state(
        &self,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        ImportResourceStateResponse {
            imported_resources: vec![],
            diagnostics: vec![Diagnostic::error(
                "Resource import not supported",
                format!("{} does not support import", request.type_name),
            )],
        }
    }
}

pub struct ValidateResourceConfigRequest {
    pub type_name: String,
    pub config: DynamicValue,
}

pub struct ValidateResourceConfigResponse {
    pub diagnostics: Vec<Diagnostic>,
}

pub struct CreateResourceRequest {
    pub type_name: String,
    pub planned_state: DynamicValue,
    pub config: DynamicValue,
}

pub struct CreateResourceResponse {
    pub new_state: DynamicValue,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct ReadResourceRequest {
    pub type_name: String,
    pub current_state: DynamicValue,
}

pub struct ReadResourceResponse {
    /// None removes the resource from state
    pub new_state: Option<DynamicValue>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct UpdateResourceRequest {
    pub type_name: String,
    pub prior_state: DynamicValue,
    pub planned_state: DynamicValue,
    pub config: DynamicValue,
}

pub struct UpdateResourceResponse {
    pub new_state: DynamicValue,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct DeleteResourceRequest {
    pub type_name: String,
    pub prior_state: DynamicValue,
}

pub struct DeleteResourceResponse {
    pub diagnostics: Vec<Diagnostic>,
}

pub struct ImportResourceStateRequest {
    pub type_name: String,
    pub id: String,
}

pub struct ImportResourceStateResponse {
    pub imported_resources: Vec<ImportedResource>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct ImportedResource {
    pub type_name: String,
    pub state: DynamicValue,
}

/// Resources receive provider data through configure
/// This is called immediately after the factory creates the resource
#[async_trait]
pub trait ResourceWithConfigure: Resource {
    async fn configure(&mut self, request: ConfigureResourceRequest)
        -> ConfigureResourceResponse;
}

pub struct ConfigureResourceRequest {
    /// Data from ConfigureProviderResponse.provider_data
    /// Downcast to your provider's specific type
    pub provider_data: Option<Arc<dyn Any + Send + Sync>>,
}

pub struct ConfigureResourceResponse {
    pub diagnostics: Vec<Diagnostic>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaBuilder;

    struct Fixed;

    #[async_trait]
    impl Resource for Fixed {
        fn type_name(&self) -> &str {
            "nsxt_fixed"
        }

        fn schema(&self) -> Schema {
            SchemaBuilder::new().build()
        }

        async fn validate(
            &self,
            _request: ValidateResourceConfigRequest,
        ) -> ValidateResourceConfigResponse {
            ValidateResourceConfigResponse {
                diagnostics: vec![],
            }
        }

        async fn create(&self, request: CreateResourceRequest) -> CreateResourceResponse {
            CreateResourceResponse {
                new_state: request.planned_state,
                diagnostics: vec![],
            }
        }

        async fn read(&self, request: ReadResourceRequest) -> ReadResourceResponse {
            ReadResourceResponse {
                new_state: Some(request.current_state),
                diagnostics: vec![],
            }
        }

        async fn update(&self, request: UpdateResourceRequest) -> UpdateResourceResponse {
            UpdateResourceResponse {
                new_state: request.planned_state,
                diagnostics: vec![],
            }
        }

        async fn delete(&self, _request: DeleteResourceRequest) -> DeleteResourceResponse {
            DeleteResourceResponse {
                diagnostics: vec![],
            }
        }
    }

    #[tokio::test]
    async fn import_is_unsupported_by_default() {
        let response = Fixed
            .import_state(ImportResourceStateRequest {
                type_name: "nsxt_fixed".to_string(),
                id: "anything".to_string(),
            })
            .await;

        assert!(response.imported_resources.is_empty());
        assert_eq!(response.diagnostics.len(), 1);
        assert!(response.diagnostics[0].detail.contains("nsxt_fixed"));
    }
}
