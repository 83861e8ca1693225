pub mod collection;
pub mod resource_custom_attribute;

pub use collection::ContextProfileCustomAttributes;
pub use resource_custom_attribute::ContextProfileCustomAttributeResource;
