//! Composite identifiers for sub-resources

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Joins the key and member of a composite identifier
pub const SEPARATOR: char = '~';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("Invalid composite id {id:?}: expected <key>~<attribute>")]
    MissingSeparator { id: String },

    #[error("Invalid composite id {id:?}: {part} must not be empty")]
    EmptyPart { id: String, part: &'static str },

    #[error("Key {key:?} must not contain '~'")]
    SeparatorInKey { key: String },
}

/// Local identity of one member of a server-side collection: `<key>~<member>`.
///
/// Decoding splits on the first separator, so a member that itself contains
/// `~` still decodes to the original pair as long as the key does not.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeId {
    key: String,
    member: String,
}

impl CompositeId {
    pub fn new(key: impl Into<String>, member: impl Into<String>) -> Result<Self, IdError> {
        let key = key.into();
        let member = member.into();

        if key.contains(SEPARATOR) {
            return Err(IdError::SeparatorInKey { key });
        }
        if key.is_empty() {
            return Err(IdError::EmptyPart {
                id: format!("{}{}{}", key, SEPARATOR, member),
                part: "key",
            });
        }
        if member.is_empty() {
            return Err(IdError::EmptyPart {
                id: format!("{}{}{}", key, SEPARATOR, member),
                part: "attribute",
            });
        }

        Ok(Self { key, member })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn member(&self) -> &str {
        &self.member
    }

    pub fn into_parts(self) -> (String, String) {
        (self.key, self.member)
    }
}

impl fmt::Display for CompositeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.key, SEPARATOR, self.member)
    }
}

impl FromStr for CompositeId {
    type Err = IdError;

    fn from_str(id: &str) -> Result<Self, Self::Err> {
        let (key, member) = id
            .split_once(SEPARATOR)
            .ok_or_else(|| IdError::MissingSeparator { id: id.to_string() })?;

        if key.is_empty() {
            return Err(IdError::EmptyPart {
                id: id.to_string(),
                part: "key",
            });
        }
        if member.is_empty() {
            return Err(IdError::EmptyPart {
                id: id.to_string(),
                part: "attribute",
            });
        }

        Ok(Self {
            key: key.to_string(),
            member: member.to_string(),
        })
    }
}

impl Serialize for CompositeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
