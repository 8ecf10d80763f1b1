//! Line-delimited JSON-RPC server over stdio.

use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use super::protocol::{methods, McpRequest, McpResponse, McpRpcError, MCP_PROTOCOL_VERSION};
use super::tools::{call_tool, tool_definitions, ToolArguments};
use crate::config::ContextConfig;
use crate::context::ServiceContext;

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "repo-context";

/// Serves the repository tools to one client.
pub struct McpServer {
    ctx: ServiceContext,
    config: ContextConfig,
}

/// `tools/call` parameters.
#[derive(Debug, serde::Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

impl McpServer {
    /// Creates a server answering through `ctx`.
    #[must_use]
    pub fn new(ctx: ServiceContext, config: ContextConfig) -> Self {
        Self { ctx, config }
    }

    /// Handles one input line. Returns the serialized response, if any.
    #[must_use]
    pub fn handle_line(&self, line: &str) -> Option<String> {
        let response = match serde_json::from_str::<Value>(line) {
            Err(err) => {
                debug!(error = %err, "unparsable message");
                Some(McpResponse::error(None, McpRpcError::parse_error()))
            }
            Ok(value) => {
                let id = value.get("id").cloned().and_then(|id| serde_json::from_value(id).ok());
                match serde_json::from_value::<McpRequest>(value) {
                    Ok(request) => self.handle_request(request),
                    Err(err) => {
                        debug!(error = %err, "malformed request");
                        Some(McpResponse::error(id, McpRpcError::invalid_request()))
                    }
                }
            }
        }?;

        match serde_json::to_string(&response) {
            Ok(json) => Some(json),
            Err(err) => {
                warn!(error = %err, "failed to serialize response");
                None
            }
        }
    }

    /// Handles a decoded request. Notifications get no response.
    #[must_use]
    pub fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        let Some(id) = request.id else {
            debug!(method = %request.method, "notification ignored");
            return None;
        };
        info!(method = %request.method, id = %id, "request");

        let result = match request.method.as_str() {
            methods::INITIALIZE => Ok(json!({
                "protocolVersion": MCP_PROTOCOL_VERSION,
                "capabilities": { "tools": {} },
                "serverInfo": { "name": SERVER_NAME, "version": env!("CARGO_PKG_VERSION") }
            })),
            methods::PING => Ok(json!({})),
            methods::TOOLS_LIST => Ok(tool_definitions()),
            methods::TOOLS_CALL => self.call(request.params),
            _ => Err(McpRpcError::method_not_found().with_data(json!({ "method": &request.method }))),
        };

        Some(match result {
            Ok(value) => McpResponse::success(Some(id), value),
            Err(error) => McpResponse::error(Some(id), error),
        })
    }

    fn call(&self, params: Option<Value>) -> Result<Value, McpRpcError> {
        let params: CallParams = params
            .and_then(|p| serde_json::from_value(p).ok())
            .ok_or_else(McpRpcError::invalid_params)?;
        let args: ToolArguments = match params.arguments {
            Some(arguments) => serde_json::from_value(arguments)
                .map_err(|e| McpRpcError::invalid_params().with_data(json!(e.to_string())))?,
            None => ToolArguments::default(),
        };

        let result = call_tool(&self.ctx, &self.config, &params.name, &args)
            .map_err(|e| McpRpcError::internal_error().with_data(json!(e.to_string())))?;
        serde_json::to_value(result)
            .map_err(|e| McpRpcError::internal_error().with_data(json!(e.to_string())))
    }

    /// Reads requests line by line until EOF, writing one response line each.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing the stream fails.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(line.trim()) {
                writer.write_all(response.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }
        info!("input closed, shutting down");
        Ok(())
    }

    /// Serves on the process stdin and stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if stdio fails.
    pub async fn serve_stdio(&self) -> std::io::Result<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        self.serve(stdin, tokio::io::stdout()).await
    }
}
