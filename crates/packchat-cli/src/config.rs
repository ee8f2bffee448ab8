//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── command: Command        # chat (default) | oneshot
//! └── http: ReqwestConfig     # service URLs, timeout, user agent
//! ```
//!
//! All configuration can be provided via CLI arguments or environment
//! variables. Use `--help` to see all available options.

use std::process;

use clap::{Parser, Subcommand};
use packchat_reqwest::ReqwestConfig;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_STARTUP};

/// What the binary does once configured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Interactive chat with login and pack selection (default).
    #[default]
    Chat,
    /// Read credentials, one message, history and pack id from stdin,
    /// send a single query and print the result.
    Oneshot,
}

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "packchat")]
#[command(about = "Chat with your data packs from the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// HTTP client and service endpoint configuration.
    #[clap(flatten)]
    pub http: ReqwestConfig,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Logs configuration at debug level (no sensitive information).
    pub fn log(&self) {
        tracing::debug!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );

        tracing::debug!(
            target: TRACING_TARGET_CONFIG,
            command = ?self.command.unwrap_or_default(),
            http_timeout_secs = self.http.effective_timeout().as_secs(),
            user_agent = %self.http.effective_user_agent(),
            api_url_override = ?self.http.api_url,
            llm_api_url_override = ?self.http.llm_api_url,
            openai_base_url_override = ?self.http.openai_base_url,
            "HTTP configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [
            cfg!(feature = "dotenv").then_some("dotenv"),
            cfg!(feature = "pdf").then_some("pdf"),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_chat() {
        let cli = Cli::try_parse_from(["packchat"]).unwrap();
        assert_eq!(cli.command.unwrap_or_default(), Command::Chat);
    }

    #[test]
    fn test_endpoint_overrides() {
        let cli = Cli::try_parse_from([
            "packchat",
            "--api-url",
            "http://auth.local",
            "--llm-api-url",
            "http://llm.local",
            "--http-timeout",
            "5",
            "oneshot",
        ])
        .unwrap();

        assert_eq!(cli.command, Some(Command::Oneshot));
        assert_eq!(cli.http.api_url.as_deref(), Some("http://auth.local"));
        assert_eq!(cli.http.llm_api_url.as_deref(), Some("http://llm.local"));
        assert_eq!(cli.http.http_timeout, 5);
    }
}
