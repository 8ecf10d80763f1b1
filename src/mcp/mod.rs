//! Model Context Protocol tool server.
//!
//! Exposes the extraction pipeline as four tools over line-delimited
//! JSON-RPC on stdio. Responses go to stdout; logs go to stderr.

pub mod protocol;
pub mod server;
pub mod tools;

pub use server::McpServer;
