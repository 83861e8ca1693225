//! Test helpers for the NSX API

use super::{Client, ClientConfig};
use std::time::Duration;

pub fn test_config(url: &str) -> ClientConfig {
    ClientConfig {
        host: url.to_string(),
        username: "admin".to_string(),
        password: "secret".to_string(),
        allow_unverified_ssl: true,
        timeout: Duration::from_secs(5),
    }
}

pub fn create_test_client(url: &str) -> Client {
    Client::new(&test_config(url)).unwrap()
}

/// A custom-attribute list page holding the given values under one key
pub fn custom_attribute_page(key: &str, values: &[&str]) -> String {
    serde_json::json!({
        "results": [{
            "id": "infra-custom-attributes",
            "resource_type": "PolicyContextProfile",
            "attributes": [{
                "key": key,
                "datatype": "STRING",
                "value": values,
            }],
        }],
        "result_count": 1,
    })
    .to_string()
}
