//! Conversion between Local Manager and Global Manager model types

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Which NSX deployment the provider is talking to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Topology {
    #[default]
    LocalManager,
    GlobalManager,
}

impl Topology {
    pub fn from_global_manager(global_manager: bool) -> Self {
        if global_manager {
            Topology::GlobalManager
        } else {
            Topology::LocalManager
        }
    }

    pub fn is_federated(&self) -> bool {
        matches!(self, Topology::GlobalManager)
    }
}

#[derive(Debug, Error)]
#[error("Failed to convert {source_shape} to {target_shape}: {cause}")]
pub struct ConversionError {
    pub source_shape: &'static str,
    pub target_shape: &'static str,
    #[source]
    pub cause: serde_json::Error,
}

/// Convert a value into a structurally parallel type by way of its JSON
/// representation. Fails if the target shape cannot hold what the source
/// carries, which signals diverging model versions.
pub fn convert<S, T>(value: &S) -> Result<T, ConversionError>
where
    S: Serialize,
    T: DeserializeOwned,
{
    let failed = |cause| ConversionError {
        source_shape: std::any::type_name::<S>(),
        target_shape: std::any::type_name::<T>(),
        cause,
    };

    let intermediate = serde_json::to_value(value).map_err(failed)?;
    serde_json::from_value(intermediate).map_err(failed)
}
