//! Schema types and builders for tfplug
//!
//! A schema describes the attributes of a resource or provider, along with
//! the validators and plan modifiers attached to each attribute.

use crate::plan_modifier::PlanModifier;
use crate::types::{AttributePath, Diagnostic, Dynamic, DynamicValue};
use crate::validator::Validator;
use std::collections::HashMap;
use std::sync::Arc;

/// AttributeType mirrors Terraform's type system
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeType {
    String,
    Number,
    Bool,
    List(Box<AttributeType>),
    Set(Box<AttributeType>),
    Map(Box<AttributeType>),
    Object(HashMap<String, AttributeType>),
}

impl AttributeType {
    /// Whether a decoded value has the shape this type expects
    pub fn accepts(&self, value: &Dynamic) -> bool {
        match (self, value) {
            (_, Dynamic::Null | Dynamic::Unknown) => true,
            (AttributeType::String, Dynamic::String(_)) => true,
            (AttributeType::Number, Dynamic::Number(_)) => true,
            (AttributeType::Bool, Dynamic::Bool(_)) => true,
            (AttributeType::List(elem) | AttributeType::Set(elem), Dynamic::List(items)) => {
                items.iter().all(|item| elem.accepts(item))
            }
            (AttributeType::Map(elem), Dynamic::Map(entries)) => {
                entries.values().all(|item| elem.accepts(item))
            }
            (AttributeType::Object(fields), Dynamic::Map(entries)) => entries
                .iter()
                .all(|(k, v)| fields.get(k).is_some_and(|t| t.accepts(v))),
            _ => false,
        }
    }
}

/// Schema is returned by providers and resources
/// Version is used for state migration
#[derive(Debug, Clone)]
pub struct Schema {
    pub version: i64,
    pub description: String,
    pub attributes: Vec<Attribute>,
}

impl Schema {
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Checks required attributes, value shapes and attribute validators.
    /// Unknown values are skipped; they are validated again at apply time.
    pub fn validate(&self, config: &DynamicValue) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for attr in &self.attributes {
            let path = AttributePath::new(&attr.name);
            let value = config.get(&path).unwrap_or(&Dynamic::Null);

            if matches!(value, Dynamic::Unknown) {
                continue;
            }

            if matches!(value, Dynamic::Null) {
                if attr.required {
                    diagnostics.push(
                        Diagnostic::error(
                            "Missing required argument",
                            format!("The argument \"{}\" is required", attr.name),
                        )
                        .with_attribute(path),
                    );
                }
                continue;
            }

            if attr.computed && !attr.optional && !attr.required {
                diagnostics.push(
                    Diagnostic::error(
                        "Value for unconfigurable attribute",
                        format!(
                            "Can't configure a value for \"{}\": its value will be decided automatically",
                            attr.name
                        ),
                    )
                    .with_attribute(path),
                );
                continue;
            }

            if !attr.r#type.accepts(value) {
                diagnostics.push(
                    Diagnostic::error(
                        "Incorrect attribute value type",
                        format!(
                            "Attribute \"{}\" expects {:?}, got {}",
                            attr.name,
                            attr.r#type,
                            value.type_name()
                        ),
                    )
                    .with_attribute(path),
                );
                continue;
            }

            for validator in &attr.validators {
                validator.validate(value, &path, &mut diagnostics);
            }
        }

        diagnostics
    }
}

/// Attribute represents a single configuration attribute
#[derive(Clone)]
pub struct Attribute {
    pub name: String,
    pub r#type: AttributeType,
    pub description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    pub validators: Vec<Arc<dyn Validator>>,
    pub plan_modifiers: Vec<Arc<dyn PlanModifier>>,
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("type", &self.r#type)
            .field("required", &self.required)
            .field("optional", &self.optional)
            .field("computed", &self.computed)
            .field("sensitive", &self.sensitive)
            .field(
                "validators",
                &self
                    .validators
                    .iter()
                    .map(|v| v.description())
                    .collect::<Vec<_>>(),
            )
            .field(
                "plan_modifiers",
                &self
                    .plan_modifiers
                    .iter()
                    .map(|m| m.description())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Builder for Schema
#[derive(Default)]
pub struct SchemaBuilder {
    version: i64,
    description: String,
    attributes: Vec<Attribute>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, version: i64) -> Self {
        self.version = version;
        self
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn attribute(mut self, attr: Attribute) -> Self {
        self.attributes.push(attr);
        self
    }

    pub fn build(self) -> Schema {
        Schema {
            version: self.version,
            description: self.description,
            attributes: self.attributes,
        }
    }
}

/// Builder for Attribute
pub struct AttributeBuilder {
    attr: Attribute,
}

impl AttributeBuilder {
    pub fn new(name: &str, type_: AttributeType) -> Self {
        Self {
            attr: Attribute {
                name: name.to_string(),
                r#type: type_,
                description: String::new(),
                required: false,
                optional: false,
                computed: false,
                sensitive: false,
                validators: Vec::new(),
                plan_modifiers: Vec::new(),
            },
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.attr.description = desc.into();
        self
    }

    pub fn required(mut self) -> Self {
        self.attr.required = true;
        self.attr.optional = false;
        self
    }

    pub fn optional(mut self) -> Self {
        self.attr.optional = true;
        self.attr.required = false;
        self
    }

    pub fn computed(mut self) -> Self {
        self.attr.computed = true;
        self
    }

    pub fn sensitive(mut self) -> Self {
        self.attr.sensitive = true;
        self
    }

    pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
        self.attr.validators.push(Arc::new(validator));
        self
    }

    pub fn plan_modifier(mut self, modifier: impl PlanModifier + 'static) -> Self {
        self.attr.plan_modifiers.push(Arc::new(modifier));
        self
    }

    pub fn build(self) -> Attribute {
        self.attr
    }
}
