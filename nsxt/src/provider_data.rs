//! Provider data structure passed to resources

use crate::api::Client;
use crate::composite::Topology;
use std::sync::Arc;

#[derive(Clone)]
pub struct NsxtProviderData {
    pub client: Arc<Client>,
    pub topology: Topology,
}

impl NsxtProviderData {
    pub fn new(client: Client, global_manager: bool) -> Self {
        Self {
            client: Arc::new(client),
            topology: Topology::from_global_manager(global_manager),
        }
    }
}
