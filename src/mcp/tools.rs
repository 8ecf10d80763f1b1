//! Tool catalogue and invocation for the MCP server.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::config::ContextConfig;
use crate::context::ServiceContext;
use crate::error::ContextError;
use crate::history;
use crate::snapshot::{build_repo_context, resolve_root};
use crate::stack::detect_stack;

/// Full snapshot tool.
pub const GET_CONTEXT: &str = "get_context";
/// Stack-only tool.
pub const GET_STACK: &str = "get_stack";
/// Hot-paths tool with an optional `days` window.
pub const GET_HOT_PATHS: &str = "get_hot_paths";
/// Conventions-only tool.
pub const GET_CONVENTIONS: &str = "get_conventions";

/// Content item of a tool result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum McpContent {
    /// Text content
    #[serde(rename = "text")]
    Text {
        /// The text.
        text: String,
    },
}

impl McpContent {
    /// Create text content
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// Result of a `tools/call` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    /// Content items
    pub content: Vec<McpContent>,
    /// `{result: value}` for successful calls
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_content: Option<Value>,
    /// Whether the call failed
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl CallToolResult {
    /// Successful result carrying `value` both as pretty JSON text and structured.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` cannot be pretty-printed.
    pub fn success(value: Value) -> Result<Self, ContextError> {
        Ok(Self {
            content: vec![McpContent::text(serde_json::to_string_pretty(&value)?)],
            structured_content: Some(json!({ "result": value })),
            is_error: false,
        })
    }

    /// Failed result with a text explanation.
    pub fn error(message: impl Into<String>) -> Self {
        Self { content: vec![McpContent::text(message)], structured_content: None, is_error: true }
    }
}

/// Arguments accepted by every tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ToolArguments {
    /// Repository to inspect; defaults to `.`.
    #[serde(default)]
    pub repo_path: Option<String>,
    /// Hot-path window in days, for `get_hot_paths`. Fractional values
    /// are truncated; anything below one day is rejected.
    #[serde(default, deserialize_with = "whole_days")]
    pub days: Option<u32>,
}

fn whole_days<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let Some(days) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let whole = days.trunc();
    if !(1.0..=f64::from(u32::MAX)).contains(&whole) {
        return Err(serde::de::Error::custom(format!("days must be at least 1, got {days}")));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let days = whole as u32;
    Ok(Some(days))
}

impl ToolArguments {
    /// Repository root the tool should inspect.
    #[must_use]
    pub fn root(&self) -> std::path::PathBuf {
        resolve_root(Path::new(self.repo_path.as_deref().unwrap_or(".")))
    }
}

fn repo_path_schema(extra: Value) -> Value {
    let mut properties = json!({ "repo_path": { "type": "string" } });
    if let (Some(props), Value::Object(extra)) = (properties.as_object_mut(), extra) {
        props.extend(extra);
    }
    json!({ "type": "object", "properties": properties })
}

/// Definitions returned by `tools/list`.
#[must_use]
pub fn tool_definitions() -> Value {
    json!({
        "tools": [
            {
                "name": GET_CONTEXT,
                "description": "Return complete repo context",
                "inputSchema": repo_path_schema(json!({}))
            },
            {
                "name": GET_STACK,
                "description": "Return stack section only",
                "inputSchema": repo_path_schema(json!({}))
            },
            {
                "name": GET_HOT_PATHS,
                "description": "Return hot files",
                "inputSchema": repo_path_schema(json!({ "days": { "type": "integer", "minimum": 1 } }))
            },
            {
                "name": GET_CONVENTIONS,
                "description": "Return conventions section",
                "inputSchema": repo_path_schema(json!({}))
            }
        ]
    })
}

/// Runs the named tool.
///
/// Unknown tool names produce an error result rather than an `Err`.
///
/// # Errors
///
/// Returns an error only if the tool output cannot be serialized.
pub fn call_tool(
    ctx: &ServiceContext,
    config: &ContextConfig,
    name: &str,
    args: &ToolArguments,
) -> Result<CallToolResult, ContextError> {
    let root = args.root();
    info!(tool = name, root = %root.display(), "tool call");

    let value = match name {
        GET_CONTEXT => serde_json::to_value(build_repo_context(ctx, &root, config))?,
        GET_STACK => serde_json::to_value(detect_stack(ctx, &root))?,
        GET_HOT_PATHS => {
            let days = args.days.unwrap_or(config.hot_days);
            serde_json::to_value(history::get_hot_paths(ctx, &root, days, config.hot_top_n))?
        }
        GET_CONVENTIONS => serde_json::to_value(history::get_conventions(
            ctx,
            &root,
            config.convention_window,
            config.since.as_deref(),
        ))?,
        _ => return Ok(CallToolResult::error(format!("Unknown tool: {name}"))),
    };
    CallToolResult::success(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::config::CassetteConfig;
    use crate::cassette::recorder::CassetteRecorder;

    fn replay_git(dir: &Path, method: &str, output: Value) -> ServiceContext {
        let path = dir.join("git.cassette.yaml");
        let mut recorder = CassetteRecorder::new(&path, "tools", "abc");
        recorder.record("git", method, json!({}), output);
        recorder.finish().unwrap();
        ServiceContext::replaying_from(&CassetteConfig { git: Some(path), ..Default::default() })
            .unwrap()
    }

    #[test]
    fn lists_four_tools_with_repo_path() {
        let defs = tool_definitions();
        let tools = defs["tools"].as_array().unwrap();
        let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec![GET_CONTEXT, GET_STACK, GET_HOT_PATHS, GET_CONVENTIONS]);
        for tool in tools {
            assert_eq!(tool["inputSchema"]["properties"]["repo_path"]["type"], "string");
        }
        assert_eq!(tools[2]["inputSchema"]["properties"]["days"]["type"], "number");
    }

    #[test]
    fn hot_paths_tool_returns_structured_result() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = replay_git(dir.path(), "changed_paths", json!({"Ok": "a.ts\nb.ts\na.ts\n"}));
        let args = ToolArguments {
            repo_path: Some(dir.path().to_string_lossy().into_owned()),
            days: Some(7),
        };

        let result = call_tool(&ctx, &ContextConfig::default(), GET_HOT_PATHS, &args).unwrap();

        assert!(!result.is_error);
        let expected = json!([{"file": "a.ts", "commits_30d": 2}, {"file": "b.ts", "commits_30d": 1}]);
        assert_eq!(result.structured_content, Some(json!({ "result": expected })));
        let McpContent::Text { text } = &result.content[0];
        assert_eq!(serde_json::from_str::<Value>(text).unwrap(), expected);
    }

    #[test]
    fn conventions_tool() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = replay_git(dir.path(), "commit_subjects", json!({"Ok": ""}));
        let result = call_tool(
            &ctx,
            &ContextConfig::default(),
            GET_CONVENTIONS,
            &ToolArguments::default(),
        )
        .unwrap();
        assert_eq!(
            result.structured_content.unwrap()["result"]["commit_pattern"],
            json!("unknown")
        );
    }

    #[test]
    fn unknown_tool_is_an_error_result() {
        let ctx = ServiceContext::live();
        let result =
            call_tool(&ctx, &ContextConfig::default(), "get_weather", &ToolArguments::default())
                .unwrap();
        assert!(result.is_error);
        assert_eq!(result.content, vec![McpContent::text("Unknown tool: get_weather")]);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"content": [{"type": "text", "text": "Unknown tool: get_weather"}], "isError": true})
        );
    }

    #[test]
    fn arguments_default_to_current_directory() {
        let args: ToolArguments = serde_json::from_value(json!({})).unwrap();
        assert_eq!(args.root(), resolve_root(Path::new(".")));
    }

    #[test]
    fn days_accepts_whole_and_fractional_numbers() {
        let parse = |days: Value| serde_json::from_value::<ToolArguments>(json!({ "days": days }));
        assert_eq!(parse(json!(14)).unwrap().days, Some(14));
        assert_eq!(parse(json!(14.0)).unwrap().days, Some(14));
        assert_eq!(parse(json!(7.5)).unwrap().days, Some(7));
        assert_eq!(parse(Value::Null).unwrap().days, None);
        assert!(parse(json!(0)).is_err());
        assert!(parse(json!(-3)).is_err());
        assert!(parse(json!("7")).is_err());
    }

    #[test]
    fn hot_paths_schema_advertises_an_integer_window() {
        let tools = tool_definitions();
        let hot = tools["tools"]
            .as_array()
            .unwrap()
            .iter()
            .find(|tool| tool["name"] == GET_HOT_PATHS)
            .unwrap();
        assert_eq!(hot["inputSchema"]["properties"]["days"], json!({"type": "integer", "minimum": 1}));
    }
}
