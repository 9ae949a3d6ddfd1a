//! pubsub-ctl - command-line driver for the gateway's pub-sub extension.
//!
//! Every subcommand issues one request and prints the HTTP status followed by
//! the response body. Gateway error statuses are printed like any other
//! response; the process only fails when no response could be obtained or a
//! name was rejected before sending.
//!
//! # Usage
//!
//! ```text
//! pubsub-ctl topic set mytopic --endpoint http://consumer:9001
//! pubsub-ctl notification set mybucket mytopic --events OBJECT_CREATE
//! pubsub-ctl subscription events mysub mytopic --max-entries 10
//! pubsub-ctl s3-notification get mybucket n1 --all
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `PUBSUB_HOST` | `localhost` | Gateway host |
//! | `PUBSUB_PORT` | `8000` | Gateway port |
//! | `PUBSUB_ACCESS_KEY` | `test` | Access key ID |
//! | `PUBSUB_SECRET_KEY` | `test` | Secret access key |
//! | `PUBSUB_REGION` | `us-east-1` | Region for the S3 SDK |
//! | `PUBSUB_WIRE_TRACE` | `false` | Log request and response lines at debug level |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |
//!
//! Flags given on the command line override the environment.

mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use pubsub_client::{ClientConfig, PubSubClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::commands::Command;

#[derive(Debug, Parser)]
#[command(name = "pubsub-ctl", version, about = "Drive the pub-sub extension of an object-storage gateway", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Gateway host
    #[arg(long, global = true)]
    host: Option<String>,

    /// Gateway port
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Access key ID
    #[arg(long, global = true)]
    access_key: Option<String>,

    /// Secret access key
    #[arg(long, global = true)]
    secret_key: Option<String>,

    /// Region used by the S3 SDK
    #[arg(long, global = true)]
    region: Option<String>,

    /// Log request and response lines at debug level
    #[arg(long, global = true)]
    wire_trace: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

impl Cli {
    /// Overlay the command-line flags on `config`.
    fn apply(&self, mut config: ClientConfig) -> ClientConfig {
        if let Some(host) = &self.host {
            config.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(access_key) = &self.access_key {
            config.access_key.clone_from(access_key);
        }
        if let Some(secret_key) = &self.secret_key {
            config.secret_key.clone_from(secret_key);
        }
        if let Some(region) = &self.region {
            config.region.clone_from(region);
        }
        if self.wire_trace {
            config.wire_trace = true;
        }
        if let Some(log_level) = &self.log_level {
            config.log_level.clone_from(log_level);
        }
        config
    }
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.apply(ClientConfig::from_env());

    init_tracing(&config.log_level)?;

    let client = PubSubClient::new(&config).context("failed to build pub-sub client")?;
    info!(connection = %client.connection().describe(), "connected");

    let outcome = commands::run(&client, cli.command)
        .await
        .context("request failed")?;

    println!("{}", outcome.status);
    if !outcome.body.is_empty() {
        println!("{}", outcome.body);
    }

    Ok(())
}
