//! Plan modifiers and the framework's default planning pass

use crate::schema::Schema;
use crate::types::{AttributePath, Diagnostic, Dynamic, DynamicValue};

#[derive(Debug, Clone)]
pub struct PlanModifyRequest<'a> {
    pub path: &'a AttributePath,
    pub state: &'a Dynamic,
    pub config: &'a Dynamic,
    pub plan: Dynamic,
}

#[derive(Debug, Clone)]
pub struct PlanModifyResponse {
    pub plan_value: Dynamic,
    pub requires_replace: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl PlanModifyResponse {
    fn keep(plan_value: Dynamic) -> Self {
        Self {
            plan_value,
            requires_replace: false,
            diagnostics: Vec::new(),
        }
    }
}

/// Plan modifiers run for each attribute after the default planning pass
pub trait PlanModifier: Send + Sync {
    fn description(&self) -> String;

    fn modify_plan(&self, request: PlanModifyRequest<'_>) -> PlanModifyResponse;
}

/// Any change to the attribute destroys and recreates the resource
pub struct RequiresReplace;

impl PlanModifier for RequiresReplace {
    fn description(&self) -> String {
        "changing this value forces replacement".to_string()
    }

    fn modify_plan(&self, request: PlanModifyRequest<'_>) -> PlanModifyResponse {
        let requires_replace = match (request.state, &request.plan) {
            (Dynamic::Null, _) | (_, Dynamic::Unknown) => false,
            (state, plan) => state != plan,
        };

        PlanModifyResponse {
            requires_replace,
            ..PlanModifyResponse::keep(request.plan)
        }
    }
}

/// Keeps the prior state value for computed attributes that would otherwise
/// plan as unknown
pub struct UseStateForUnknown;

impl PlanModifier for UseStateForUnknown {
    fn description(&self) -> String {
        "once set, the value is carried over from state".to_string()
    }

    fn modify_plan(&self, request: PlanModifyRequest<'_>) -> PlanModifyResponse {
        let unresolved = matches!(request.plan, Dynamic::Unknown | Dynamic::Null);
        if unresolved && request.state.is_set() {
            PlanModifyResponse::keep(request.state.clone())
        } else {
            PlanModifyResponse::keep(request.plan)
        }
    }
}

/// Result of planning a change against a schema
#[derive(Debug, Clone)]
pub struct PlannedChange {
    pub planned_state: DynamicValue,
    pub requires_replace: Vec<AttributePath>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Default planning: unset computed attributes become unknown, then the
/// attribute plan modifiers run. Create and destroy plans skip the modifiers.
pub fn plan_resource_change(
    schema: &Schema,
    prior_state: &DynamicValue,
    proposed_new_state: &DynamicValue,
    config: &DynamicValue,
) -> PlannedChange {
    let mut change = PlannedChange {
        planned_state: proposed_new_state.clone(),
        requires_replace: Vec::new(),
        diagnostics: Vec::new(),
    };

    if proposed_new_state.is_null() {
        return change;
    }

    let creating = prior_state.is_null();

    for attr in &schema.attributes {
        let path = AttributePath::new(&attr.name);
        let mut plan = proposed_new_state
            .get(&path)
            .cloned()
            .unwrap_or(Dynamic::Null);

        if attr.computed && matches!(plan, Dynamic::Null) {
            plan = Dynamic::Unknown;
        }

        if !creating {
            let state = prior_state.get(&path).unwrap_or(&Dynamic::Null);
            let configured = config.get(&path).unwrap_or(&Dynamic::Null);
            for modifier in &attr.plan_modifiers {
                let response = modifier.modify_plan(PlanModifyRequest {
                    path: &path,
                    state,
                    config: configured,
                    plan,
                });
                plan = response.plan_value;
                change.diagnostics.extend(response.diagnostics);
                if response.requires_replace && !change.requires_replace.contains(&path) {
                    tracing::debug!("attribute {} requires replacement", path);
                    change.requires_replace.push(path.clone());
                }
            }
        }

        if let Err(e) = change.planned_state.set_value(&path, plan) {
            change.diagnostics.push(
                Diagnostic::error("Failed to plan attribute", e.to_string())
                    .with_attribute(path),
            );
        }
    }

    change
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AttributeBuilder, AttributeType, SchemaBuilder};

    fn schema() -> Schema {
        SchemaBuilder::new()
            .attribute(
                AttributeBuilder::new("id", AttributeType::String)
                    .computed()
                    .plan_modifier(UseStateForUnknown)
                    .build(),
            )
            .attribute(
                AttributeBuilder::new("attribute", AttributeType::String)
                    .required()
                    .plan_modifier(RequiresReplace)
                    .build(),
            )
            .build()
    }

    fn state(id: Option<&str>, attribute: &str) -> DynamicValue {
        let mut dv = DynamicValue::object();
        if let Some(id) = id {
            dv.set_string(&AttributePath::new("id"), id).unwrap();
        }
        dv.set_string(&AttributePath::new("attribute"), attribute)
            .unwrap();
        dv
    }

    #[test]
    fn create_plan_marks_computed_unknown() {
        let proposed = state(None, "example.com");
        let change = plan_resource_change(&schema(), &DynamicValue::null(), &proposed, &proposed);

        assert!(change.requires_replace.is_empty());
        assert_eq!(
            change.planned_state.get(&AttributePath::new("id")),
            Some(&Dynamic::Unknown)
        );
    }

    #[test]
    fn changed_force_new_attribute_requires_replace() {
        let prior = state(Some("DOMAIN_NAME~a.com"), "a.com");
        let proposed = state(None, "b.com");
        let change = plan_resource_change(&schema(), &prior, &proposed, &proposed);

        assert_eq!(change.requires_replace, vec![AttributePath::new("attribute")]);
    }

    #[test]
    fn unchanged_plan_keeps_id_from_state() {
        let prior = state(Some("DOMAIN_NAME~a.com"), "a.com");
        let proposed = state(None, "a.com");
        let change = plan_resource_change(&schema(), &prior, &proposed, &proposed);

        assert!(change.requires_replace.is_empty());
        assert_eq!(change.planned_state, prior);
    }

    #[test]
    fn destroy_plan_is_null() {
        let prior = state(Some("DOMAIN_NAME~a.com"), "a.com");
        let change =
            plan_resource_change(&schema(), &prior, &DynamicValue::null(), &DynamicValue::null());

        assert!(change.planned_state.is_null());
    }
}
