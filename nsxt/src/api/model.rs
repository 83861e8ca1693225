//! Local Manager policy model types

use serde::{Deserialize, Serialize};

pub const POLICY_CUSTOM_ATTRIBUTES_KEY_DOMAIN_NAME: &str = "DOMAIN_NAME";
pub const POLICY_CUSTOM_ATTRIBUTES_KEY_CUSTOM_URL: &str = "CUSTOM_URL";

pub const POLICY_CUSTOM_ATTRIBUTES_ATTRIBUTE_SOURCE_CUSTOM: &str = "CUSTOM";
pub const POLICY_CUSTOM_ATTRIBUTES_ATTRIBUTE_SOURCE_SYSTEM: &str = "SYSTEM";

pub const POLICY_CUSTOM_ATTRIBUTES_DATATYPE_STRING: &str = "STRING";

/// Body of the custom-attributes action call; `value` lists the members to
/// add or remove under `key`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyCustomAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "isALGType", skip_serializing_if = "Option::is_none")]
    pub is_alg_type: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicySubAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Vec<String>,
}

/// One key-tagged value group inside a context profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub value: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "isALGType", skip_serializing_if = "Option::is_none")]
    pub is_alg_type: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_attributes: Vec<PolicySubAttributes>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyContextProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marked_for_delete: Option<bool>,
    #[serde(default)]
    pub attributes: Vec<PolicyAttributes>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PolicyContextProfileListResult {
    #[serde(default)]
    pub results: Vec<PolicyContextProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_ascending: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_result_decodes_nsx_payload() {
        let result: PolicyContextProfileListResult = serde_json::from_str(
            r#"{
                "results": [{
                    "id": "custom",
                    "resource_type": "PolicyContextProfile",
                    "attributes": [{
                        "key": "DOMAIN_NAME",
                        "datatype": "STRING",
                        "isALGType": false,
                        "value": ["example.com", "*.example.org"],
                        "sub_attributes": [{"key": "TLS_VERSION", "datatype": "STRING", "value": ["TLS_V12"]}]
                    }]
                }],
                "result_count": 1,
                "sort_ascending": true
            }"#,
        )
        .unwrap();

        assert_eq!(result.result_count, Some(1));
        let attrs = &result.results[0].attributes[0];
        assert_eq!(attrs.key.as_deref(), Some("DOMAIN_NAME"));
        assert_eq!(attrs.is_alg_type, Some(false));
        assert_eq!(attrs.value, vec!["example.com", "*.example.org"]);
        assert_eq!(attrs.sub_attributes[0].value, vec!["TLS_V12"]);
    }

    #[test]
    fn custom_attributes_skip_unset_fields() {
        let body = serde_json::to_value(PolicyCustomAttributes {
            datatype: Some(POLICY_CUSTOM_ATTRIBUTES_DATATYPE_STRING.to_string()),
            key: Some(POLICY_CUSTOM_ATTRIBUTES_KEY_CUSTOM_URL.to_string()),
            value: vec!["https://example.com/login".to_string()],
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "datatype": "STRING",
                "key": "CUSTOM_URL",
                "value": ["https://example.com/login"],
            })
        );
    }
}
