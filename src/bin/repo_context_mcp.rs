//! Binary entrypoint for the `repo-context-mcp` tool server.

use std::process::ExitCode;

use repo_context::config::ContextConfig;
use repo_context::context::ServiceContext;
use repo_context::logging::{init_logging, LoggingConfig};
use repo_context::mcp::McpServer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let config = match ContextConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("MCP server failed: {err}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(&LoggingConfig::from_config(&config));

    let server = McpServer::new(ServiceContext::live(), config);
    match server.serve_stdio().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("MCP server failed: {err}");
            ExitCode::FAILURE
        }
    }
}
