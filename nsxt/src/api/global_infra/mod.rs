pub mod custom_attributes;

use crate::api::Client;

/// Global Manager `/global-infra` APIs
pub struct GlobalInfraApi<'a> {
    client: &'a Client,
}

impl<'a> GlobalInfraApi<'a> {
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn custom_attributes(&self) -> custom_attributes::GlobalCustomAttributesApi<'a> {
        custom_attributes::GlobalCustomAttributesApi::new(self.client)
    }
}
