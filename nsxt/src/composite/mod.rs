//! Sub-resources that live as members of a shared server-side collection
//!
//! Such a resource has no REST object of its own. Its identity is a
//! [`CompositeId`] of the collection key and the member value, existence is
//! decided by scanning the listed collection, and it is created and destroyed
//! with `add`/`remove` actions against the collection.

pub mod binding;
pub mod error;
pub mod id;
pub mod lifecycle;
pub mod scanner;

#[cfg(test)]
pub mod testing;

pub use binding::{convert, ConversionError, Topology};
pub use error::SubResourceError;
pub use id::{CompositeId, IdError, SEPARATOR};
pub use lifecycle::{MemberState, SubResource, SubResourceController};
pub use scanner::{find_entry, MemberCollection, MemberPage, MemberQuery};
