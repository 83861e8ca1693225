//! Resource implementations

pub mod context_profile;

pub use context_profile::ContextProfileCustomAttributeResource;
