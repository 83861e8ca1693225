pub mod api;
pub mod composite;
pub mod config;
pub mod provider_data;
pub mod resources;

pub use provider_data::NsxtProviderData;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tfplug::provider::{ConfigureProviderRequest, ConfigureProviderResponse};
use tfplug::resource::ConfigureResourceRequest;
use tfplug::types::Diagnostic;
use tfplug::{
    AttributeBuilder, AttributeType, Provider, ResourceFactory, ResourceWithConfigure, Schema,
    SchemaBuilder,
};

use crate::config::ProviderConfig;
use crate::resources::context_profile::resource_custom_attribute;

#[derive(Default)]
pub struct NsxtProvider {
    provider_data: Option<NsxtProviderData>,
}

impl NsxtProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provider_data(&self) -> Option<&NsxtProviderData> {
        self.provider_data.as_ref()
    }

    /// Instantiate a resource by type name and hand it the provider data
    pub async fn create_resource(
        &self,
        name: &str,
    ) -> tfplug::Result<Box<dyn ResourceWithConfigure>> {
        let provider_data = self
            .provider_data
            .clone()
            .ok_or("Provider not configured")?;

        let factories = self.resources();
        let factory = factories
            .get(name)
            .ok_or_else(|| tfplug::TfplugError::ResourceNotFound(name.to_string()))?;

        let mut resource = factory();
        let response = resource
            .configure(ConfigureResourceRequest {
                provider_data: Some(Arc::new(provider_data)),
            })
            .await;
        if let Some(diag) = response.diagnostics.first() {
            return Err(format!("{}: {}", diag.summary, diag.detail).into());
        }

        Ok(resource)
    }
}

#[async_trait]
impl Provider for NsxtProvider {
    fn type_name(&self) -> &str {
        "nsxt"
    }

    fn schema(&self) -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("VMware NSX-T Policy provider")
            .attribute(
                AttributeBuilder::new("host", AttributeType::String)
                    .description("NSX Manager host name or URL")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("username", AttributeType::String)
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("password", AttributeType::String)
                    .optional()
                    .sensitive()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("allow_unverified_ssl", AttributeType::Bool)
                    .description("Skip TLS certificate verification")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("global_manager", AttributeType::Bool)
                    .description("Target is a Global Manager of a federated deployment")
                    .optional()
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("request_timeout", AttributeType::Number)
                    .description("Per-request timeout in seconds")
                    .optional()
                    .build(),
            )
            .build()
    }

    async fn configure(&mut self, request: ConfigureProviderRequest) -> ConfigureProviderResponse {
        let config = match ProviderConfig::from_terraform(&request.config) {
            Ok(config) => config,
            Err(diagnostics) => {
                return ConfigureProviderResponse {
                    diagnostics,
                    provider_data: None,
                }
            }
        };

        match api::Client::new(&config.client_config()) {
            Ok(client) => {
                tracing::info!(
                    "Configured NSX provider for {} (global manager: {})",
                    client.base_url(),
                    config.global_manager
                );
                let data = NsxtProviderData::new(client, config.global_manager);
                self.provider_data = Some(data.clone());
                ConfigureProviderResponse {
                    diagnostics: vec![],
                    provider_data: Some(Arc::new(data)),
                }
            }
            Err(e) => ConfigureProviderResponse {
                diagnostics: vec![Diagnostic::error(
                    "Failed to create API client",
                    e.to_string(),
                )],
                provider_data: None,
            },
        }
    }

    fn resources(&self) -> HashMap<String, ResourceFactory> {
        let mut factories: HashMap<String, ResourceFactory> = HashMap::new();
        factories.insert(
            resource_custom_attribute::TYPE_NAME.to_string(),
            Box::new(|| {
                Box::new(resources::ContextProfileCustomAttributeResource::new())
                    as Box<dyn ResourceWithConfigure>
            }),
        );
        factories
    }
}
