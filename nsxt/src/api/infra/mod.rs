pub mod custom_attributes;

use crate::api::Client;

/// Local Manager `/infra` APIs
pub struct InfraApi<'a> {
    client: &'a Client,
}

impl<'a> InfraApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Context profile custom attribute operations
    pub fn custom_attributes(&self) -> custom_attributes::CustomAttributesApi<'a> {
        custom_attributes::CustomAttributesApi::new(self.client)
    }
}
