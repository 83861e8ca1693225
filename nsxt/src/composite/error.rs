use thiserror::Error;

use super::binding::ConversionError;
use super::id::IdError;
use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum SubResourceError {
    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error(transparent)]
    MalformedId(#[from] IdError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Failed to create {kind} {member}: {source}")]
    Create {
        kind: &'static str,
        member: String,
        #[source]
        source: Box<SubResourceError>,
    },

    #[error("Failed to delete {kind} {member}: {source}")]
    Delete {
        kind: &'static str,
        member: String,
        #[source]
        source: Box<SubResourceError>,
    },

    #[error(transparent)]
    Remote(#[from] ApiError),
}

impl SubResourceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SubResourceError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, SubResourceError>;
