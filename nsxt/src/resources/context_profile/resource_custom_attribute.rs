//! Context profile custom attribute resource
//!
//! Each instance is one value under a key of the shared custom attribute
//! collection. The state id is `<key>~<attribute>`.

use async_trait::async_trait;
use tfplug::import_state_passthrough_id;
use tfplug::plan_modifier::{RequiresReplace, UseStateForUnknown};
use tfplug::resource::{
    ConfigureResourceRequest, ConfigureResourceResponse, CreateResourceRequest,
    CreateResourceResponse, DeleteResourceRequest, DeleteResourceResponse,
    ImportResourceStateRequest, ImportResourceStateResponse, ReadResourceRequest,
    ReadResourceResponse, Resource, ResourceWithConfigure, UpdateResourceRequest,
    UpdateResourceResponse, ValidateResourceConfigRequest, ValidateResourceConfigResponse,
};
use tfplug::schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
use tfplug::types::{AttributePath, Diagnostic, DynamicValue};
use tfplug::validator::StringInSlice;

use super::collection::{ContextProfileCustomAttributes, CUSTOM_ATTRIBUTE_KEYS};
use crate::composite::{SubResource, SubResourceController, SubResourceError};
use crate::NsxtProviderData;

pub const TYPE_NAME: &str = "nsxt_policy_context_profile_custom_attribute";

#[derive(Default)]
pub struct ContextProfileCustomAttributeResource {
    provider_data: Option<NsxtProviderData>,
}

impl ContextProfileCustomAttributeResource {
    pub fn new() -> Self {
        Self::default()
    }

    fn controller(&self) -> Option<SubResourceController<ContextProfileCustomAttributes>> {
        self.provider_data.as_ref().map(|data| {
            SubResourceController::new(
                ContextProfileCustomAttributes::new(data.client.clone()),
                data.topology,
            )
        })
    }

    fn not_configured() -> Diagnostic {
        Diagnostic::error(
            "Provider not configured",
            "Provider data was not properly configured",
        )
    }

    fn write_state(state: &mut DynamicValue, resource: &SubResource) -> Result<(), Diagnostic> {
        let set = |state: &mut DynamicValue, name: &str, value: &str| {
            state
                .set_string(&AttributePath::new(name), value)
                .map_err(|e| {
                    Diagnostic::error("Failed to set state", e.to_string())
                        .with_attribute(AttributePath::new(name))
                })
        };
        set(state, "id", &resource.id.to_string())?;
        set(state, "key", resource.id.key())?;
        set(state, "attribute", resource.id.member())
    }

    fn state_id(state: &DynamicValue) -> Option<String> {
        state
            .get_string(&AttributePath::new("id"))
            .ok()
            .filter(|id| !id.is_empty())
    }
}

#[async_trait]
impl Resource for ContextProfileCustomAttributeResource {
    fn type_name(&self) -> &str {
        TYPE_NAME
    }

    fn schema(&self) -> Schema {
        SchemaBuilder::new()
            .version(0)
            .description("Manages a custom attribute value of NSX context profiles")
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .description("Composite identifier in the form <key>~<attribute>")
                    .computed()
                    .plan_modifier(UseStateForUnknown)
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("key", AttributeType::String)
                    .description("Key of the custom attribute")
                    .required()
                    .validator(StringInSlice::new(CUSTOM_ATTRIBUTE_KEYS.iter().copied()))
                    .plan_modifier(RequiresReplace)
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("attribute", AttributeType::String)
                    .description("Custom attribute value")
                    .required()
                    .plan_modifier(RequiresReplace)
                    .build(),
            )
            .build()
    }

    async fn validate(
        &self,
        request: ValidateResourceConfigRequest,
    ) -> ValidateResourceConfigResponse {
        ValidateResourceConfigResponse {
            diagnostics: self.schema().validate(&request.config),
        }
    }

    async fn create(&self, request: CreateResourceRequest) -> CreateResourceResponse {
        let mut diagnostics = vec![];

        let Some(controller) = self.controller() else {
            diagnostics.push(Self::not_configured());
            return CreateResourceResponse {
                new_state: request.planned_state,
                diagnostics,
            };
        };

        let key = request.planned_state.get_string(&AttributePath::new("key"));
        let attribute = request
            .planned_state
            .get_string(&AttributePath::new("attribute"));
        let (key, attribute) = match (key, attribute) {
            (Ok(key), Ok(attribute)) => (key, attribute),
            (Err(e), _) | (_, Err(e)) => {
                diagnostics.push(Diagnostic::error("Invalid configuration", e.to_string()));
                return CreateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                };
            }
        };

        match controller.create(&key, &attribute).await {
            Ok(resource) => {
                let mut new_state = request.planned_state;
                if let Err(diag) = Self::write_state(&mut new_state, &resource) {
                    diagnostics.push(diag);
                }
                CreateResourceResponse {
                    new_state,
                    diagnostics,
                }
            }
            Err(e) => {
                let diag = match &e {
                    SubResourceError::Validation { .. } => {
                        Diagnostic::error("Invalid configuration", e.to_string())
                            .with_attribute(AttributePath::new("key"))
                    }
                    _ => Diagnostic::error("Failed to create custom attribute", e.to_string()),
                };
                diagnostics.push(diag);
                CreateResourceResponse {
                    new_state: request.planned_state,
                    diagnostics,
                }
            }
        }
    }

    async fn read(&self, request: ReadResourceRequest) -> ReadResourceResponse {
        let mut diagnostics = vec![];

        let Some(id) = Self::state_id(&request.current_state) else {
            diagnostics.push(Diagnostic::error(
                "Error obtaining custom attribute ID",
                "The state has no id attribute",
            ));
            return ReadResourceResponse {
                new_state: Some(request.current_state),
                diagnostics,
            };
        };

        let Some(controller) = self.controller() else {
            diagnostics.push(Self::not_configured());
            return ReadResourceResponse {
                new_state: Some(request.current_state),
                diagnostics,
            };
        };

        match controller.read(&id).await {
            Ok(resource) => {
                let mut new_state = request.current_state;
                if let Err(diag) = Self::write_state(&mut new_state, &resource) {
                    diagnostics.push(diag);
                }
                ReadResourceResponse {
                    new_state: Some(new_state),
                    diagnostics,
                }
            }
            Err(e) if e.is_not_found() => {
                tracing::info!("{} {} not found, removing from state", TYPE_NAME, id);
                ReadResourceResponse {
                    new_state: None,
                    diagnostics,
                }
            }
            Err(e) => {
                diagnostics.push(Diagnostic::error(
                    "Failed to read custom attribute",
                    e.to_string(),
                ));
                ReadResourceResponse {
                    new_state: Some(request.current_state),
                    diagnostics,
                }
            }
        }
    }

    async fn update(&self, request: UpdateResourceRequest) -> UpdateResourceResponse {
        UpdateResourceResponse {
            new_state: request.prior_state,
            diagnostics: vec![Diagnostic::error(
                "Update not supported",
                format!("Every attribute of {} forces replacement", TYPE_NAME),
            )],
        }
    }

    async fn delete(&self, request: DeleteResourceRequest) -> DeleteResourceResponse {
        let mut diagnostics = vec![];

        let Some(id) = Self::state_id(&request.prior_state) else {
            diagnostics.push(Diagnostic::error(
                "Error obtaining custom attribute ID",
                "The state has no id attribute",
            ));
            return DeleteResourceResponse { diagnostics };
        };

        let Some(controller) = self.controller() else {
            diagnostics.push(Self::not_configured());
            return DeleteResourceResponse { diagnostics };
        };

        if let Err(e) = controller.delete(&id).await {
            diagnostics.push(Diagnostic::error(
                "Failed to delete custom attribute",
                e.to_string(),
            ));
        }

        DeleteResourceResponse { diagnostics }
    }

    async fn import_state(
        &self,
        request: ImportResourceStateRequest,
    ) -> ImportResourceStateResponse {
        let mut response = ImportResourceStateResponse {
            imported_resources: vec![],
            diagnostics: vec![],
        };

        import_state_passthrough_id(AttributePath::new("id"), &request, &mut response);
        if !response.diagnostics.is_empty() {
            return response;
        }

        let Some(controller) = self.controller() else {
            response.diagnostics.push(Self::not_configured());
            response.imported_resources.clear();
            return response;
        };

        match controller.import(&request.id).await {
            Ok(resource) => {
                for imported in &mut response.imported_resources {
                    if let Err(diag) = Self::write_state(&mut imported.state, &resource) {
                        response.diagnostics.push(diag);
                    }
                }
            }
            Err(e) => {
                let summary = if e.is_not_found() {
                    "Cannot import non-existent remote object"
                } else {
                    "Failed to import custom attribute"
                };
                response.imported_resources.clear();
                response
                    .diagnostics
                    .push(Diagnostic::error(summary, e.to_string()));
            }
        }

        response
    }
}

#[async_trait]
impl ResourceWithConfigure for ContextProfileCustomAttributeResource {
    async fn configure(&mut self, request: ConfigureResourceRequest) -> ConfigureResourceResponse {
        let mut diagnostics = vec![];

        if let Some(data) = request.provider_data {
            match data.downcast::<NsxtProviderData>() {
                Ok(provider_data) => self.provider_data = Some((*provider_data).clone()),
                Err(_) => diagnostics.push(Diagnostic::error(
                    "Invalid provider data",
                    "Failed to extract NsxtProviderData from provider data",
                )),
            }
        }

        ConfigureResourceResponse { diagnostics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_helpers::{create_test_client, custom_attribute_page};
    use mockito::{Matcher, Server, ServerGuard};
    use std::sync::Arc;
    use tfplug::types::Dynamic;

    const PATH: &str = "/policy/api/v1/infra/context-profiles/custom-attributes";

    async fn configured(server: &ServerGuard) -> ContextProfileCustomAttributeResource {
        let mut resource = ContextProfileCustomAttributeResource::new();
        let data = NsxtProviderData::new(create_test_client(&server.url()), false);
        let response = resource
            .configure(ConfigureResourceRequest {
                provider_data: Some(Arc::new(data)),
            })
            .await;
        assert!(response.diagnostics.is_empty());
        resource
    }

    fn state(key: &str, attribute: &str, id: Option<&str>) -> DynamicValue {
        let mut state = DynamicValue::object();
        state.set_string(&AttributePath::new("key"), key).unwrap();
        state
            .set_string(&AttributePath::new("attribute"), attribute)
            .unwrap();
        match id {
            Some(id) => state.set_string(&AttributePath::new("id"), id).unwrap(),
            None => state.mark_unknown(&AttributePath::new("id")).unwrap(),
        }
        state
    }

    fn get(state: &DynamicValue, name: &str) -> String {
        state.get_string(&AttributePath::new(name)).unwrap()
    }

    #[test]
    fn schema_forces_replacement_of_user_fields() {
        let schema = ContextProfileCustomAttributeResource::new().schema();

        for name in ["key", "attribute"] {
            let attr = schema.attribute(name).unwrap();
            assert!(attr.required);
            assert_eq!(attr.plan_modifiers.len(), 1);
        }
        let id = schema.attribute("id").unwrap();
        assert!(id.computed);
        assert!(!id.required);
    }

    #[test]
    fn changing_key_plans_replacement() {
        let schema = ContextProfileCustomAttributeResource::new().schema();
        let prior = state("DOMAIN_NAME", "example.com", Some("DOMAIN_NAME~example.com"));
        let proposed = state("CUSTOM_URL", "example.com", None);

        let change = tfplug::plan_resource_change(&schema, &prior, &proposed, &proposed);

        assert_eq!(change.requires_replace, vec![AttributePath::new("key")]);
        assert_eq!(
            change.planned_state.get_string(&AttributePath::new("id")).unwrap(),
            "DOMAIN_NAME~example.com"
        );
    }

    #[tokio::test]
    async fn validate_rejects_unknown_key() {
        let resource = ContextProfileCustomAttributeResource::new();
        let mut config = DynamicValue::object();
        config
            .set_string(&AttributePath::new("key"), "IP_ADDRESS")
            .unwrap();
        config
            .set_string(&AttributePath::new("attribute"), "10.0.0.1")
            .unwrap();

        let response = resource
            .validate(ValidateResourceConfigRequest {
                type_name: TYPE_NAME.to_string(),
                config,
            })
            .await;

        assert_eq!(response.diagnostics.len(), 1);
        assert!(response.diagnostics[0].detail.contains("got IP_ADDRESS"));
    }

    #[tokio::test]
    async fn create_sets_composite_id() {
        let mut server = Server::new_async().await;
        let add = server
            .mock("POST", PATH)
            .match_query(Matcher::UrlEncoded("action".into(), "add".into()))
            .create_async()
            .await;
        let _list = server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_body(custom_attribute_page("DOMAIN_NAME", &["example.com"]))
            .create_async()
            .await;

        let resource = configured(&server).await;
        let planned = state("DOMAIN_NAME", "example.com", None);
        let response = resource
            .create(CreateResourceRequest {
                type_name: TYPE_NAME.to_string(),
                planned_state: planned.clone(),
                config: planned,
            })
            .await;

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        assert_eq!(get(&response.new_state, "id"), "DOMAIN_NAME~example.com");
        add.assert_async().await;
    }

    #[tokio::test]
    async fn create_reports_remote_failure() {
        let mut server = Server::new_async().await;
        let _add = server
            .mock("POST", PATH)
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"error_code":500012,"error_message":"Invalid value"}"#)
            .create_async()
            .await;

        let resource = configured(&server).await;
        let planned = state("CUSTOM_URL", "not a url", None);
        let response = resource
            .create(CreateResourceRequest {
                type_name: TYPE_NAME.to_string(),
                planned_state: planned.clone(),
                config: planned,
            })
            .await;

        assert_eq!(response.diagnostics.len(), 1);
        assert_eq!(
            response.diagnostics[0].detail,
            "Failed to create ContextProfileCustomAttribute not a url: \
             API returned error (HTTP 400): Invalid value"
        );
    }

    #[tokio::test]
    async fn read_drops_absent_member_from_state() {
        let mut server = Server::new_async().await;
        let _list = server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_body(r#"{"results":[],"result_count":0}"#)
            .create_async()
            .await;

        let resource = configured(&server).await;
        let response = resource
            .read(ReadResourceRequest {
                type_name: TYPE_NAME.to_string(),
                current_state: state(
                    "DOMAIN_NAME",
                    "example.com",
                    Some("DOMAIN_NAME~example.com"),
                ),
            })
            .await;

        assert!(response.diagnostics.is_empty());
        assert!(response.new_state.is_none());
    }

    #[tokio::test]
    async fn read_surfaces_server_errors() {
        let mut server = Server::new_async().await;
        let _list = server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(r#"{"error_message":"boom"}"#)
            .create_async()
            .await;

        let resource = configured(&server).await;
        let response = resource
            .read(ReadResourceRequest {
                type_name: TYPE_NAME.to_string(),
                current_state: state(
                    "DOMAIN_NAME",
                    "example.com",
                    Some("DOMAIN_NAME~example.com"),
                ),
            })
            .await;

        assert!(response.new_state.is_some());
        assert_eq!(response.diagnostics[0].summary, "Failed to read custom attribute");
    }

    #[tokio::test]
    async fn delete_skips_remove_when_already_absent() {
        let mut server = Server::new_async().await;
        let _list = server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;
        let remove = server
            .mock("POST", PATH)
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let resource = configured(&server).await;
        let response = resource
            .delete(DeleteResourceRequest {
                type_name: TYPE_NAME.to_string(),
                prior_state: state(
                    "DOMAIN_NAME",
                    "example.com",
                    Some("DOMAIN_NAME~example.com"),
                ),
            })
            .await;

        assert!(response.diagnostics.is_empty());
        remove.assert_async().await;
    }

    #[tokio::test]
    async fn import_populates_key_and_attribute() {
        let mut server = Server::new_async().await;
        let _list = server
            .mock("GET", PATH)
            .match_query(Matcher::UrlEncoded(
                "attribute_key".into(),
                "CUSTOM_URL".into(),
            ))
            .with_body(custom_attribute_page("CUSTOM_URL", &["https://a.example/~x"]))
            .create_async()
            .await;

        let resource = configured(&server).await;
        let response = resource
            .import_state(ImportResourceStateRequest {
                type_name: TYPE_NAME.to_string(),
                id: "CUSTOM_URL~https://a.example/~x".to_string(),
            })
            .await;

        assert!(response.diagnostics.is_empty(), "{:?}", response.diagnostics);
        let imported = &response.imported_resources[0].state;
        assert_eq!(get(imported, "key"), "CUSTOM_URL");
        assert_eq!(get(imported, "attribute"), "https://a.example/~x");
    }

    #[tokio::test]
    async fn import_rejects_invalid_key() {
        let server = Server::new_async().await;
        let resource = configured(&server).await;

        let response = resource
            .import_state(ImportResourceStateRequest {
                type_name: TYPE_NAME.to_string(),
                id: "IP_ADDRESS~10.0.0.1".to_string(),
            })
            .await;

        assert!(response.imported_resources.is_empty());
        assert_eq!(
            response.diagnostics[0].summary,
            "Failed to import custom attribute"
        );
    }

    #[tokio::test]
    async fn update_is_refused() {
        let resource = ContextProfileCustomAttributeResource::new();
        let prior = state("DOMAIN_NAME", "a", Some("DOMAIN_NAME~a"));

        let response = resource
            .update(UpdateResourceRequest {
                type_name: TYPE_NAME.to_string(),
                prior_state: prior.clone(),
                planned_state: state("DOMAIN_NAME", "b", None),
                config: prior,
            })
            .await;

        assert!(response.diagnostics[0].is_error());
        assert_eq!(get(&response.new_state, "attribute"), "a");
    }

    #[tokio::test]
    async fn unconfigured_resource_reports_diagnostic() {
        let resource = ContextProfileCustomAttributeResource::new();

        let response = resource
            .delete(DeleteResourceRequest {
                type_name: TYPE_NAME.to_string(),
                prior_state: state("DOMAIN_NAME", "a", Some("DOMAIN_NAME~a")),
            })
            .await;

        assert_eq!(response.diagnostics[0].summary, "Provider not configured");
    }

    #[tokio::test]
    async fn configure_rejects_foreign_provider_data() {
        let mut resource = ContextProfileCustomAttributeResource::new();

        let response = resource
            .configure(ConfigureResourceRequest {
                provider_data: Some(Arc::new(Dynamic::Null)),
            })
            .await;

        assert_eq!(response.diagnostics[0].summary, "Invalid provider data");
    }
}
