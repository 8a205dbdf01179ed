//! Courier CLI
//!
//! Runs one notification request through the dispatch pipeline and prints
//! the result document to stdout. Logs go to stderr.

mod config;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use courier_core::{DispatchError, DispatchOutcome};
use courier_dispatch::Dispatcher;
use courier_provider::{HttpFileSource, LogRelay, MailRelay};
use courier_relay::{RelayClient, RelayConfig};
use courier_transport::ResilientTransport;
use courier_workflow::{WorkflowClient, WorkflowConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::CourierConfig;

/// Courier: send a card's notification email and record delivery on the card.
#[derive(Parser, Debug)]
#[command(name = "courier", version, about)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "courier.toml")]
    config: PathBuf,

    /// Request JSON file. Reads stdin when omitted.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Log the composed message instead of submitting it to the relay.
    #[arg(long)]
    dry_run: bool,

    /// Workflow API bearer token.
    #[arg(long, env = "PIPEFY_TOKEN", hide_env_values = true)]
    workflow_token: String,

    /// SMTP host handed to the relay.
    #[arg(long, env = "RELAY_SMTP_HOST")]
    smtp_host: Option<String>,

    /// SMTP username handed to the relay; also the sender address.
    #[arg(long, env = "RELAY_SMTP_USERNAME")]
    smtp_username: Option<String>,

    /// SMTP password handed to the relay.
    #[arg(long, env = "RELAY_SMTP_PASSWORD", hide_env_values = true)]
    smtp_password: Option<String>,

    /// Value of the relay's `Authorization` header.
    #[arg(long, env = "RELAY_AUTHORIZATION", hide_env_values = true)]
    relay_authorization: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CourierConfig::load(&cli.config)?;
    if !cli.config.exists() {
        info!(path = %cli.config.display(), "config file not found, using defaults");
    }

    let raw = read_input(cli.input.as_deref())?;

    let transport = ResilientTransport::new(config.transport.to_config())?;
    let workflow = WorkflowClient::new(
        config
            .workflow
            .apply(WorkflowConfig::new(cli.workflow_token.clone())),
        transport.clone(),
    )?;
    let relay = build_relay(&cli, &config, transport.clone())?;
    let files = HttpFileSource::new(transport);

    // A dry run sends nothing, so it must not record a delivery on the card.
    let dispatcher = Dispatcher::new(
        config.dispatch,
        Arc::new(workflow),
        relay,
        Arc::new(files),
    )
    .with_writeback(!cli.dry_run);

    let outcome = match serde_json::from_str(&raw) {
        Ok(input) => dispatcher.dispatch(input).await,
        Err(e) => DispatchOutcome::from(DispatchError::InvalidInput(e.to_string())),
    };

    println!("{}", serde_json::to_string_pretty(&outcome.to_response())?);

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn build_relay(
    cli: &Cli,
    config: &CourierConfig,
    transport: ResilientTransport,
) -> anyhow::Result<Arc<dyn MailRelay>> {
    if cli.dry_run {
        info!("dry run: messages will be logged, not sent");
        return Ok(Arc::new(LogRelay::new("dry-run")));
    }

    let host = cli
        .smtp_host
        .clone()
        .context("RELAY_SMTP_HOST is required unless --dry-run is set")?;
    let username = cli
        .smtp_username
        .clone()
        .context("RELAY_SMTP_USERNAME is required unless --dry-run is set")?;
    let password = cli
        .smtp_password
        .clone()
        .context("RELAY_SMTP_PASSWORD is required unless --dry-run is set")?;

    let mut relay_config = config
        .relay
        .apply(RelayConfig::new(host, username, password));
    if let Some(value) = &cli.relay_authorization {
        relay_config = relay_config.with_authorization(value);
    }

    Ok(Arc::new(RelayClient::new(relay_config, transport)?))
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read request from stdin")?;
            Ok(buf)
        }
    }
}
