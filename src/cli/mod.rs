//! Command-line interface for the ClickUp MCP server.
//!
//! Two subcommands, one per transport: `stdio` (the default when no
//! subcommand is given) and `serve` for Streamable HTTP. Credential
//! flags are global; they form the process tier that per-session
//! headers and query parameters override.

mod commands;
pub mod error;

use std::net::IpAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::clickup::client::ApiClient;
use crate::clickup::hierarchy::BranchErrorPolicy;
use crate::credentials::PartialCredentials;

#[derive(Parser)]
#[command(name = "clickup-mcp")]
#[command(author, version, about = "ClickUp MCP server", long_about = None)]
pub struct Cli {
    /// Override the ClickUp API URL (default: CLICKUP_API_URL env or https://api.clickup.com/api/v2)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// ClickUp API key (fallback tier; per-session headers and query parameters win)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// ClickUp team (workspace) id
    #[arg(long, global = true)]
    pub team_id: Option<String>,

    /// Fail get_workspace_hierarchy when a folder or list fetch errors, instead of rendering that branch as empty
    #[arg(long, global = true)]
    pub strict_hierarchy: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP over stdio (default)
    Stdio,
    /// Serve MCP over Streamable HTTP
    Serve {
        /// Host address to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: IpAddr,

        /// Port to listen on
        #[arg(short, long, default_value = "8000")]
        port: u16,
    },
}

/// Initialize tracing subscriber with env filter
///
/// On the stdio transport stdout carries the protocol, so log output
/// goes to stderr there.
fn init_tracing(to_stderr: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "clickup_mcp=info,tower_http=info".into());
    if to_stderr {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

pub async fn run() -> miette::Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Stdio);

    init_tracing(matches!(command, Commands::Stdio));

    let client = Arc::new(ApiClient::new(cli.api_url));
    let process = PartialCredentials {
        api_key: cli.api_key,
        team_id: cli.team_id,
    };
    let branch_policy = if cli.strict_hierarchy {
        BranchErrorPolicy::Fail
    } else {
        BranchErrorPolicy::EmptyBranch
    };

    match command {
        Commands::Stdio => commands::stdio::run(client, process, branch_policy).await?,
        Commands::Serve { host, port } => {
            commands::serve::run(client, process, branch_policy, host, port).await?
        }
    }

    Ok(())
}
