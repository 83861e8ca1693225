//! tfplug - Terraform Plugin Framework for Rust
//!
//! The resource-facing half of a Terraform plugin framework: the value
//! model used for config and state, schemas with validators and plan
//! modifiers, and the traits providers and resources implement.

// Core modules
pub mod error;
pub mod schema;
pub mod types;

// Provider API modules
pub mod provider;
pub mod resource;

// Helper modules
pub mod import;
pub mod plan_modifier;
pub mod validator;

// Re-exports for convenience
pub use error::{Result, TfplugError};
pub use import::import_state_passthrough_id;
pub use plan_modifier::{plan_resource_change, PlannedChange};
pub use provider::{Provider, ResourceFactory};
pub use resource::{Resource, ResourceWithConfigure};
pub use schema::{AttributeBuilder, AttributeType, Schema, SchemaBuilder};
pub use types::{AttributePath, Diagnostic, DiagnosticSeverity, Dynamic, DynamicValue};
