use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use nsxt::api::Client;
use nsxt::composite::{SubResourceController, Topology};
use nsxt::config::{
    ProviderConfig, ENV_ALLOW_UNVERIFIED_SSL, ENV_GLOBAL_MANAGER, ENV_HOST, ENV_PASSWORD,
    ENV_REQUEST_TIMEOUT, ENV_USERNAME,
};
use nsxt::resources::context_profile::ContextProfileCustomAttributes;
use tracing_subscriber::EnvFilter;

/// Manage NSX-T Policy sub-resources from the command line
#[derive(Parser, Debug)]
#[command(name = "nsxt-policy", version, about, long_about = None)]
pub struct Args {
    /// NSX Manager host name or URL
    #[arg(long, env = ENV_HOST)]
    pub host: String,

    #[arg(long, env = ENV_USERNAME)]
    pub username: String,

    #[arg(long, env = ENV_PASSWORD, hide_env_values = true)]
    pub password: String,

    /// Skip TLS certificate verification
    #[arg(long, env = ENV_ALLOW_UNVERIFIED_SSL)]
    pub allow_unverified_ssl: bool,

    /// Target a Global Manager
    #[arg(long, env = ENV_GLOBAL_MANAGER)]
    pub global_manager: bool,

    /// Per-request timeout in seconds
    #[arg(
        long,
        env = ENV_REQUEST_TIMEOUT,
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub request_timeout: u64,

    /// Log level, overridden by RUST_LOG
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Context profile custom attributes
    #[command(subcommand)]
    CustomAttribute(CustomAttributeCommand),
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum CustomAttributeCommand {
    /// Add an attribute value under a key
    Create {
        #[arg(long)]
        key: String,
        #[arg(long)]
        attribute: String,
    },
    /// Read an attribute by its <key>~<attribute> id
    Read { id: String },
    /// Remove an attribute by its <key>~<attribute> id
    Delete { id: String },
    /// Report whether an attribute exists
    Exists { id: String },
}

impl Args {
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            host: self.host.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            allow_unverified_ssl: self.allow_unverified_ssl,
            global_manager: self.global_manager,
            request_timeout: Duration::from_secs(self.request_timeout),
        }
    }
}

pub fn setup_logging(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run one command and return its result as JSON
pub async fn run(
    args: &Args,
) -> Result<serde_json::Value, Box<dyn std::error::Error + Send + Sync>> {
    let config = args.provider_config();
    let client = Client::new(&config.client_config())?;
    let controller = SubResourceController::new(
        ContextProfileCustomAttributes::new(Arc::new(client)),
        Topology::from_global_manager(config.global_manager),
    );

    let output = match &args.command {
        Command::CustomAttribute(command) => match command {
            CustomAttributeCommand::Create { key, attribute } => {
                serde_json::to_value(controller.create(key, attribute).await?)?
            }
            CustomAttributeCommand::Read { id } => {
                serde_json::to_value(controller.read(id).await?)?
            }
            CustomAttributeCommand::Delete { id } => {
                serde_json::to_value(controller.delete(id).await?)?
            }
            CustomAttributeCommand::Exists { id } => serde_json::json!({
                "id": id,
                "exists": controller.exists(id).await?,
            }),
        },
    };

    Ok(output)
}
