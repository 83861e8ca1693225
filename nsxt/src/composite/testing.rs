//! In-memory member collection for controller and scanner tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::scanner::{MemberCollection, MemberPage, MemberQuery};
use crate::api::{ApiError, PatchAction};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FakeGroup {
    pub key: String,
    pub value: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FakePage {
    pub groups: Vec<FakeGroup>,
    pub result_count: Option<i64>,
    pub cursor: Option<String>,
}

impl MemberPage for FakePage {
    fn result_count(&self) -> Option<i64> {
        self.result_count
    }

    fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    fn contains_member(&self, key: &str, member: &str) -> bool {
        self.groups
            .iter()
            .filter(|g| g.key == key)
            .any(|g| g.value.iter().any(|v| v == member))
    }
}

/// Global counterpart of [`FakePage`]; `result_count` is loosely typed so a
/// test can serve a shape the local page cannot hold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FakeGlobalPage {
    pub groups: Vec<FakeGroup>,
    pub result_count: Option<serde_json::Value>,
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FakePatch {
    pub key: String,
    pub value: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FakeGlobalPatch {
    pub key: String,
    pub value: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    ListNotFound,
    ListUnavailable,
    MutateRejected,
    IncompatibleGlobalPage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub key: String,
    pub value: Vec<String>,
    pub action: PatchAction,
    pub global: bool,
}

#[derive(Default)]
pub struct FakeCollection {
    members: Mutex<HashMap<String, Vec<String>>>,
    queries: Mutex<Vec<MemberQuery>>,
    mutations: Mutex<Vec<Mutation>>,
    page_size: Option<usize>,
    cursor_cycle: Vec<String>,
    failure: Option<Failure>,
    list_calls: AtomicUsize,
    local_calls: AtomicUsize,
    global_calls: AtomicUsize,
}

impl FakeCollection {
    pub fn with_members(entries: &[(&str, &str)]) -> Self {
        let collection = Self::default();
        {
            let mut members = collection.members.lock().unwrap();
            for (key, member) in entries {
                members
                    .entry(key.to_string())
                    .or_default()
                    .push(member.to_string());
            }
        }
        collection
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }

    pub fn sticky_cursor(self, cursor: &str) -> Self {
        self.cursor_cycle(&[cursor])
    }

    /// Every page points at the cursor after the requested one, wrapping around
    pub fn cursor_cycle(mut self, cursors: &[&str]) -> Self {
        self.cursor_cycle = cursors.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn failing(mut self, failure: Failure) -> Self {
        self.failure = Some(failure);
        self
    }

    pub fn members(&self, key: &str) -> Vec<String> {
        self.members
            .lock()
            .unwrap()
            .get(key)
            .cloned()
            .unwrap_or_default()
    }

    pub fn queries(&self) -> Vec<MemberQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<Mutation> {
        self.mutations.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn local_calls(&self) -> usize {
        self.local_calls.load(Ordering::SeqCst)
    }

    pub fn global_calls(&self) -> usize {
        self.global_calls.load(Ordering::SeqCst)
    }

    fn serve(&self, query: &MemberQuery) -> Result<FakePage, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());

        match self.failure {
            Some(Failure::ListNotFound) => {
                return Err(ApiError::NotFound {
                    message: "The requested object could not be found.".to_string(),
                })
            }
            Some(Failure::ListUnavailable) => return Err(ApiError::ServiceUnavailable),
            _ => {}
        }

        let values = self.members(&query.key);
        let total = values.len();
        let cycling = !self.cursor_cycle.is_empty();
        let offset = match &query.pagination.cursor {
            Some(cursor) if !cycling => cursor.parse::<usize>().unwrap_or(total),
            _ => 0,
        };
        let size = self.page_size.unwrap_or(total.max(1));
        let end = (offset + size).min(total);

        let cursor = if cycling {
            let next = query
                .pagination
                .cursor
                .as_ref()
                .and_then(|c| self.cursor_cycle.iter().position(|x| x == c))
                .map_or(0, |i| (i + 1) % self.cursor_cycle.len());
            Some(self.cursor_cycle[next].clone())
        } else if end < total {
            Some(end.to_string())
        } else {
            None
        };

        Ok(FakePage {
            groups: vec![FakeGroup {
                key: query.key.clone(),
                value: values[offset.min(end)..end].to_vec(),
            }],
            result_count: Some(total as i64),
            cursor,
        })
    }

    fn apply(
        &self,
        key: &str,
        value: &[String],
        action: PatchAction,
        global: bool,
    ) -> Result<(), ApiError> {
        self.mutations.lock().unwrap().push(Mutation {
            key: key.to_string(),
            value: value.to_vec(),
            action,
            global,
        });

        if self.failure == Some(Failure::MutateRejected) {
            return Err(ApiError::ApiError {
                status: 400,
                message: "Invalid value".to_string(),
                details: None,
            });
        }

        let mut members = self.members.lock().unwrap();
        let entry = members.entry(key.to_string()).or_default();
        for member in value {
            match action {
                PatchAction::Add => entry.push(member.clone()),
                PatchAction::Remove => {
                    if let Some(pos) = entry.iter().position(|m| m == member) {
                        entry.remove(pos);
                    }
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl MemberCollection for FakeCollection {
    type Page = FakePage;
    type GlobalPage = FakeGlobalPage;
    type Patch = FakePatch;
    type GlobalPatch = FakeGlobalPatch;

    fn kind(&self) -> &'static str {
        "ContextProfileCustomAttribute"
    }

    fn allowed_keys(&self) -> &'static [&'static str] {
        &["DOMAIN_NAME", "CUSTOM_URL"]
    }

    fn source(&self) -> &'static str {
        "CUSTOM"
    }

    fn build_patch(&self, key: &str, member: &str) -> FakePatch {
        FakePatch {
            key: key.to_string(),
            value: vec![member.to_string()],
        }
    }

    async fn list(&self, query: &MemberQuery) -> Result<FakePage, ApiError> {
        self.local_calls.fetch_add(1, Ordering::SeqCst);
        self.serve(query)
    }

    async fn list_global(&self, query: &MemberQuery) -> Result<FakeGlobalPage, ApiError> {
        self.global_calls.fetch_add(1, Ordering::SeqCst);
        let page = self.serve(query)?;
        let result_count = if self.failure == Some(Failure::IncompatibleGlobalPage) {
            Some(serde_json::json!("many"))
        } else {
            page.result_count.map(serde_json::Value::from)
        };
        Ok(FakeGlobalPage {
            groups: page.groups,
            result_count,
            cursor: page.cursor,
        })
    }

    async fn mutate(&self, patch: &FakePatch, action: PatchAction) -> Result<(), ApiError> {
        self.local_calls.fetch_add(1, Ordering::SeqCst);
        self.apply(&patch.key, &patch.value, action, false)
    }

    async fn mutate_global(
        &self,
        patch: &FakeGlobalPatch,
        action: PatchAction,
    ) -> Result<(), ApiError> {
        self.global_calls.fetch_add(1, Ordering::SeqCst);
        self.apply(&patch.key, &patch.value, action, true)
    }
}
