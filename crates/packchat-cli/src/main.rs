#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod command;
mod config;
mod oneshot;
mod repl;
mod telemetry;

use std::process;

use anyhow::Context;
use packchat_chat::ChatController;
use packchat_reqwest::ReqwestClient;

use crate::config::{Cli, Command};

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "packchat_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "packchat_cli::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "packchat_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::debug!(
            target: TRACING_TARGET_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %format!("{error:#}"),
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    telemetry::init_tracing()?;
    cli.log();

    let client = ReqwestClient::new(cli.http.clone()).context("failed to create HTTP client")?;

    match cli.command.unwrap_or_default() {
        Command::Chat => {
            let controller = ChatController::new(
                client.clone().into_auth_service(),
                client.clone().into_query_service(),
                client.into_suggestion_service(),
            );
            repl::run(controller).await
        }
        Command::Oneshot => {
            let auth = client.clone().into_auth_service();
            let query = client.into_query_service();

            let mut input = std::io::stdin().lock();
            let mut output = std::io::stdout().lock();
            oneshot::run(&auth, &query, &mut input, &mut output).await
        }
    }
}
