//! Existence checks against server-owned member collections

use std::collections::HashSet;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::binding::{convert, Topology};
use super::error::{Result, SubResourceError};
use crate::api::{ApiError, PaginationParams, PatchAction};

/// One page of a listed collection
pub trait MemberPage {
    fn result_count(&self) -> Option<i64>;

    /// Cursor of the next page, if any
    fn cursor(&self) -> Option<&str>;

    /// Whether any group tagged `key` on this page lists `member`
    fn contains_member(&self, key: &str, member: &str) -> bool;
}

/// List filter for one key of a collection
#[derive(Debug, Clone, PartialEq)]
pub struct MemberQuery {
    pub key: String,
    pub source: String,
    pub pagination: PaginationParams,
}

impl MemberQuery {
    pub fn new(key: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            source: source.into(),
            pagination: PaginationParams::default(),
        }
    }
}

/// A server-side collection that only supports listing and add/remove of
/// members under a key, reachable through both the Local Manager and the
/// Global Manager model types.
#[async_trait]
pub trait MemberCollection: Send + Sync {
    type Page: MemberPage + Serialize + DeserializeOwned + Send;
    type GlobalPage: Serialize + DeserializeOwned + Send;
    type Patch: Serialize + DeserializeOwned + Send + Sync;
    type GlobalPatch: Serialize + DeserializeOwned + Send + Sync;

    /// Resource kind used in log lines and error messages
    fn kind(&self) -> &'static str;

    fn allowed_keys(&self) -> &'static [&'static str];

    /// Source discriminator that scopes list queries
    fn source(&self) -> &'static str;

    fn build_patch(&self, key: &str, member: &str) -> Self::Patch;

    async fn list(&self, query: &MemberQuery) -> std::result::Result<Self::Page, ApiError>;

    async fn list_global(
        &self,
        query: &MemberQuery,
    ) -> std::result::Result<Self::GlobalPage, ApiError>;

    async fn mutate(
        &self,
        patch: &Self::Patch,
        action: PatchAction,
    ) -> std::result::Result<(), ApiError>;

    async fn mutate_global(
        &self,
        patch: &Self::GlobalPatch,
        action: PatchAction,
    ) -> std::result::Result<(), ApiError>;
}

async fn fetch_page<C>(collection: &C, topology: Topology, query: &MemberQuery) -> Result<C::Page>
where
    C: MemberCollection + ?Sized,
{
    match topology {
        Topology::LocalManager => Ok(collection.list(query).await?),
        Topology::GlobalManager => {
            let page = collection.list_global(query).await?;
            Ok(convert(&page)?)
        }
    }
}

/// Scan the collection for `member` under `key`, following cursors until a
/// match or the last page.
///
/// A missing collection and an empty result both mean the member is absent.
/// Every other failure is returned as is.
pub async fn find_entry<C>(
    collection: &C,
    topology: Topology,
    key: &str,
    member: &str,
) -> Result<bool>
where
    C: MemberCollection + ?Sized,
{
    let mut query = MemberQuery::new(key, collection.source());
    let mut requested = HashSet::new();

    loop {
        let page = match fetch_page(collection, topology, &query).await {
            Ok(page) => page,
            Err(SubResourceError::Remote(e)) if e.is_not_found() => {
                tracing::debug!("{} collection for key {} not found", collection.kind(), key);
                return Ok(false);
            }
            Err(e) => return Err(e),
        };

        if page.result_count() == Some(0) {
            return Ok(false);
        }
        if page.contains_member(key, member) {
            return Ok(true);
        }

        match page.cursor() {
            Some(next) if !next.is_empty() && requested.insert(next.to_string()) => {
                query.pagination.cursor = Some(next.to_string());
            }
            Some(next) if !next.is_empty() => {
                tracing::warn!("{} listing revisited cursor {}", collection.kind(), next);
                return Ok(false);
            }
            _ => return Ok(false),
        }
    }
}
