//! Provider configuration resolved from Terraform config and environment

use std::time::Duration;

use tfplug::types::{AttributePath, Diagnostic, Dynamic, DynamicValue};

use crate::api::ClientConfig;

pub const ENV_HOST: &str = "NSXT_MANAGER_HOST";
pub const ENV_USERNAME: &str = "NSXT_USERNAME";
pub const ENV_PASSWORD: &str = "NSXT_PASSWORD";
pub const ENV_ALLOW_UNVERIFIED_SSL: &str = "NSXT_ALLOW_UNVERIFIED_SSL";
pub const ENV_GLOBAL_MANAGER: &str = "NSXT_GLOBAL_MANAGER";
pub const ENV_REQUEST_TIMEOUT: &str = "NSXT_REQUEST_TIMEOUT";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub allow_unverified_ssl: bool,
    pub global_manager: bool,
    pub request_timeout: Duration,
}

impl ProviderConfig {
    /// Resolve every setting from the provider block, falling back to its
    /// environment variable. All problems are reported at once.
    pub fn from_terraform(config: &DynamicValue) -> Result<Self, Vec<Diagnostic>> {
        let mut diags = Vec::new();

        let host = required_string(config, "host", ENV_HOST, &mut diags);
        let username = required_string(config, "username", ENV_USERNAME, &mut diags);
        let password = required_string(config, "password", ENV_PASSWORD, &mut diags);
        let allow_unverified_ssl =
            bool_setting(config, "allow_unverified_ssl", ENV_ALLOW_UNVERIFIED_SSL, &mut diags);
        let global_manager =
            bool_setting(config, "global_manager", ENV_GLOBAL_MANAGER, &mut diags);
        let request_timeout = timeout_setting(config, &mut diags);

        match (host, username, password) {
            (Some(host), Some(username), Some(password)) if diags.is_empty() => Ok(Self {
                host,
                username,
                password,
                allow_unverified_ssl,
                global_manager,
                request_timeout,
            }),
            _ => Err(diags),
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            host: self.host.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            allow_unverified_ssl: self.allow_unverified_ssl,
            timeout: self.request_timeout,
        }
    }
}

fn configured<'a>(config: &'a DynamicValue, name: &str) -> Option<&'a Dynamic> {
    config
        .get(&AttributePath::new(name))
        .filter(|value| value.is_set())
}

fn env_value(env: &str) -> Option<String> {
    std::env::var(env).ok().filter(|v| !v.is_empty())
}

fn required_string(
    config: &DynamicValue,
    name: &str,
    env: &str,
    diags: &mut Vec<Diagnostic>,
) -> Option<String> {
    let value = configured(config, name)
        .and_then(Dynamic::as_str)
        .map(str::to_string)
        .or_else(|| env_value(env));

    if value.is_none() {
        diags.push(
            Diagnostic::error(
                format!("Missing {}", name),
                format!(
                    "{} is required (set in provider config or {} env var)",
                    name, env
                ),
            )
            .with_attribute(AttributePath::new(name)),
        );
    }
    value
}

fn bool_setting(config: &DynamicValue, name: &str, env: &str, diags: &mut Vec<Diagnostic>) -> bool {
    if let Some(value) = configured(config, name).and_then(Dynamic::as_bool) {
        return value;
    }

    match env_value(env) {
        Some(raw) => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" => true,
            "false" | "0" => false,
            _ => {
                diags.push(Diagnostic::error(
                    format!("Invalid {}", env),
                    format!("expected a boolean, got {:?}", raw),
                ));
                false
            }
        },
        None => false,
    }
}

fn timeout_setting(config: &DynamicValue, diags: &mut Vec<Diagnostic>) -> Duration {
    if let Some(seconds) = configured(config, "request_timeout").and_then(Dynamic::as_number) {
        if seconds > 0.0 {
            if let Ok(timeout) = Duration::try_from_secs_f64(seconds) {
                return timeout;
            }
        }
        diags.push(
            Diagnostic::error(
                "Invalid request_timeout",
                format!("expected a positive number of seconds, got {}", seconds),
            )
            .with_attribute(AttributePath::new("request_timeout")),
        );
        return DEFAULT_REQUEST_TIMEOUT;
    }

    match env_value(ENV_REQUEST_TIMEOUT) {
        Some(raw) => match raw.parse::<u64>() {
            Ok(seconds) if seconds > 0 => Duration::from_secs(seconds),
            _ => {
                diags.push(Diagnostic::error(
                    format!("Invalid {}", ENV_REQUEST_TIMEOUT),
                    format!("expected a positive number of seconds, got {:?}", raw),
                ));
                DEFAULT_REQUEST_TIMEOUT
            }
        },
        None => DEFAULT_REQUEST_TIMEOUT,
    }
}
