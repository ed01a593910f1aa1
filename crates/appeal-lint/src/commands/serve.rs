//! Serve command: MCP server on stdio.

use clap::Args;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::{info, instrument};

use appeal_lint_core::config::Config;

use crate::server::AppealServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Run the MCP server until the client disconnects.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    _args: ServeArgs,
    max_input_bytes: Option<usize>,
    config: Config,
) -> anyhow::Result<()> {
    info!(max_input_bytes = ?max_input_bytes, "starting MCP server on stdio");

    let server = AppealServer::new(config, max_input_bytes);
    server.serve(stdio()).await?.waiting().await?;

    info!("MCP server stopped");
    Ok(())
}
