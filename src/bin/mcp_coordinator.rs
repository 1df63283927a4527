//! Runs the MCP coordinator HTTP service.
//!
//! Usage:
//!
//! ```text
//! mcp-coordinator [--config <path>] [--listen-addr <addr>] [--database-path <path>]
//! ```
//!
//! Settings are layered: built-in defaults, then the TOML file, then
//! `MCP_COORDINATOR_*` environment variables, then command-line flags.

use anyhow::Context;
use clap::Parser;
use mcp_coordinator::{config::CoordinatorConfig, logging::init_tracing, server::run_server};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "mcp-coordinator", version, about = "MCP adapter coordinator")]
struct Args {
    /// TOML configuration file.
    #[arg(short, long, env = "MCP_COORDINATOR_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. `0.0.0.0:9000`.
    #[arg(long)]
    listen_addr: Option<String>,

    /// `SQLite` database file.
    #[arg(long)]
    database_path: Option<PathBuf>,

    /// Emit JSON log lines.
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn apply(self, mut config: CoordinatorConfig) -> CoordinatorConfig {
        if let Some(addr) = self.listen_addr {
            config.server.listen_addr = addr;
        }
        if let Some(path) = self.database_path {
            config.storage.database_path = path;
        }
        if self.log_json {
            config.logging.json = true;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = Args::parse();
    let file = args.config.take();
    let loaded = CoordinatorConfig::load(file.as_deref())
        .with_context(|| match &file {
            Some(path) => format!("failed to load configuration from {}", path.display()),
            None => "failed to load configuration".to_owned(),
        })?;
    let config = args.apply(loaded);

    init_tracing(&config.logging).context("failed to install tracing subscriber")?;
    run_server(config).await
}
