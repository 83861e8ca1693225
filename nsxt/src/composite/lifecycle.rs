//! Create/read/delete of members inside a shared remote collection

use serde::Serialize;

use super::binding::{convert, Topology};
use super::error::{Result, SubResourceError};
use super::id::CompositeId;
use super::scanner::{find_entry, MemberCollection};
use crate::api::{ApiError, PatchAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberState {
    #[default]
    Unknown,
    Exists,
    Absent,
    Destroyed,
}

/// Local view of one collection member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubResource {
    pub id: CompositeId,
    pub state: MemberState,
}

impl SubResource {
    pub fn new(id: CompositeId) -> Self {
        Self {
            id,
            state: MemberState::Unknown,
        }
    }

    fn with_state(mut self, state: MemberState) -> Self {
        self.state = state;
        self
    }
}

enum PreparedPatch<C: MemberCollection> {
    Local(C::Patch),
    Global(C::GlobalPatch),
}

/// Drives one kind of sub-resource through its lifecycle against a
/// [`MemberCollection`], converting payloads for the Global Manager when the
/// topology is federated.
pub struct SubResourceController<C> {
    collection: C,
    topology: Topology,
}

impl<C: MemberCollection> SubResourceController<C> {
    pub fn new(collection: C, topology: Topology) -> Self {
        Self {
            collection,
            topology,
        }
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    pub fn validate_key(&self, key: &str) -> Result<()> {
        let allowed = self.collection.allowed_keys();
        if allowed.contains(&key) {
            return Ok(());
        }
        Err(SubResourceError::Validation {
            field: "key",
            message: format!("expected key to be one of {:?}, got {}", allowed, key),
        })
    }

    fn prepare(&self, key: &str, member: &str) -> Result<PreparedPatch<C>> {
        let patch = self.collection.build_patch(key, member);
        match self.topology {
            Topology::LocalManager => Ok(PreparedPatch::Local(patch)),
            Topology::GlobalManager => Ok(PreparedPatch::Global(convert(&patch)?)),
        }
    }

    async fn send(
        &self,
        patch: &PreparedPatch<C>,
        action: PatchAction,
    ) -> std::result::Result<(), ApiError> {
        match patch {
            PreparedPatch::Local(p) => self.collection.mutate(p, action).await,
            PreparedPatch::Global(p) => self.collection.mutate_global(p, action).await,
        }
    }

    fn decode(&self, id: &str) -> Result<CompositeId> {
        let id: CompositeId = id.parse()?;
        self.validate_key(id.key())?;
        Ok(id)
    }

    /// Add `member` under `key`, then read it back.
    pub async fn create(&self, key: &str, member: &str) -> Result<SubResource> {
        self.validate_key(key)?;
        let id = CompositeId::new(key, member)?;
        let kind = self.collection.kind();

        tracing::info!("Creating {} with ID {}", kind, member);
        let patch = self.prepare(key, member)?;
        self.send(&patch, PatchAction::Add)
            .await
            .map_err(|e| SubResourceError::Create {
                kind,
                member: member.to_string(),
                source: Box::new(e.into()),
            })?;

        self.read_id(id).await
    }

    async fn read_id(&self, id: CompositeId) -> Result<SubResource> {
        let kind = self.collection.kind();
        tracing::info!("Reading {} with ID {}", kind, id);

        if find_entry(&self.collection, self.topology, id.key(), id.member()).await? {
            Ok(SubResource::new(id).with_state(MemberState::Exists))
        } else {
            Err(SubResourceError::NotFound {
                kind,
                id: id.to_string(),
            })
        }
    }

    /// Fails with [`SubResourceError::NotFound`] when the member is absent.
    pub async fn read(&self, id: &str) -> Result<SubResource> {
        let id = self.decode(id)?;
        self.read_id(id).await
    }

    /// Like [`read`](Self::read) but reports absence as `false`.
    pub async fn exists(&self, id: &str) -> Result<bool> {
        let id = self.decode(id)?;
        find_entry(&self.collection, self.topology, id.key(), id.member()).await
    }

    /// Remove the member. Deleting a member that is already gone succeeds
    /// without a remote mutation.
    pub async fn delete(&self, id: &str) -> Result<SubResource> {
        let id = self.decode(id)?;
        let kind = self.collection.kind();

        tracing::info!("Deleting {} with ID {}", kind, id.member());
        match self.read_id(id.clone()).await {
            Ok(_) => {}
            Err(SubResourceError::NotFound { .. }) => {
                tracing::warn!("{} {} is already absent", kind, id);
                return Ok(SubResource::new(id).with_state(MemberState::Absent));
            }
            Err(e) => return Err(e),
        }

        let patch = self.prepare(id.key(), id.member())?;
        self.send(&patch, PatchAction::Remove)
            .await
            .map_err(|e| SubResourceError::Delete {
                kind,
                member: id.member().to_string(),
                source: Box::new(e.into()),
            })?;

        Ok(SubResource::new(id).with_state(MemberState::Destroyed))
    }

    /// Adopt an existing member by its composite id.
    pub async fn import(&self, id: &str) -> Result<SubResource> {
        self.read(id).await
    }
}
