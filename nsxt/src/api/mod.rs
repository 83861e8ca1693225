//! NSX Policy API client

pub mod client;
pub mod common;
pub mod error;
pub mod global_infra;
pub mod gm_model;
pub mod infra;
pub mod model;
pub mod response;

#[cfg(test)]
pub mod test_helpers;

pub use client::{Client, ClientConfig};
pub use common::{ApiErrorDetails, ApiQueryParams, PaginationParams, PatchAction};
pub use error::ApiError;
pub use response::NsxResponseHandler;
