//! Common types and utilities for the NSX Policy API

use serde::{Deserialize, Serialize};

/// Local Manager policy API root
pub const POLICY_BASE_PATH: &str = "/policy/api/v1";

/// Global Manager policy API root
pub const GLOBAL_MANAGER_BASE_PATH: &str = "/global-manager/api/v1";

/// Error body returned by NSX Manager on failed requests
#[derive(Debug, Clone, Default, Serialize, Deserialize, thiserror::Error)]
#[error("NSX error {error_code:?} in {module_name:?}: {error_message:?}")]
pub struct ApiErrorDetails {
    #[serde(default, rename = "httpStatus")]
    pub http_status: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub module_name: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub related_errors: Vec<ApiErrorDetails>,
}

impl ApiErrorDetails {
    /// Top-level message followed by related error messages
    pub fn full_message(&self) -> Option<String> {
        let mut messages: Vec<&str> = self.error_message.iter().map(String::as_str).collect();
        messages.extend(
            self.related_errors
                .iter()
                .filter_map(|e| e.error_message.as_deref()),
        );
        if messages.is_empty() {
            None
        } else {
            Some(messages.join("; "))
        }
    }
}

/// Verb of an NSX `?action=` mutation against a list-valued object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchAction {
    Add,
    Remove,
}

impl PatchAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchAction::Add => "add",
            PatchAction::Remove => "remove",
        }
    }
}

impl std::fmt::Display for PatchAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApiQueryParams {
    params: Vec<(String, String)>,
}

impl ApiQueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn add_optional<K: Into<String>, V: ToString>(mut self, key: K, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.params.push((key.into(), v.to_string()));
        }
        self
    }

    pub fn extend(mut self, other: ApiQueryParams) -> Self {
        self.params.extend(other.params);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let pairs = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>();
        format!("?{}", pairs.join("&"))
    }
}

/// Paging parameters shared by NSX list calls
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaginationParams {
    pub cursor: Option<String>,
    pub include_mark_for_delete_objects: Option<bool>,
    pub included_fields: Option<String>,
    pub page_size: Option<i64>,
    pub sort_ascending: Option<bool>,
    pub sort_by: Option<String>,
}

impl PaginationParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn to_query_params(&self) -> ApiQueryParams {
        ApiQueryParams::new()
            .add_optional("cursor", self.cursor.as_deref())
            .add_optional(
                "include_mark_for_delete_objects",
                self.include_mark_for_delete_objects,
            )
            .add_optional("included_fields", self.included_fields.as_deref())
            .add_optional("page_size", self.page_size)
            .add_optional("sort_ascending", self.sort_ascending)
            .add_optional("sort_by", self.sort_by.as_deref())
    }
}
