//! Call envelope for the remote expense-tracking MCP endpoint
//!
//! The server speaks JSON-RPC 2.0 over a single streamable-HTTP URL. Tool
//! invocations and resource reads use differently-shaped params; everything
//! else about the protocol (result shapes, server errors) is opaque to this
//! crate and passed through to the caller.
//!
//! # Wire Format
//!
//! ## Tool call
//! ```json
//! {"jsonrpc": "2.0", "id": "<uuid>", "method": "tools/call",
//!  "params": {"name": "add_expense", "arguments": {...}}}
//! ```
//!
//! ## Resource read
//! ```json
//! {"jsonrpc": "2.0", "id": "<uuid>", "method": "resources/read",
//!  "params": {"uri": "expense://categories"}}
//! ```

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value, json};
use uuid::Uuid;

/// Protocol version tag carried by every envelope
pub const JSONRPC_VERSION: &str = "2.0";

/// Resource URI for the server's category list
pub const CATEGORIES_URI: &str = "expense://categories";

/// Tools exposed by the remote expense server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    AddExpense,
    ListExpenses,
    GetExpense,
    UpdateExpense,
    DeleteExpense,
    DeleteExpensesByDateRange,
    Summarize,
    GetStatistics,
    ExportExpenses,
}

impl Tool {
    /// Wire name of the tool
    pub fn as_str(self) -> &'static str {
        match self {
            Tool::AddExpense => "add_expense",
            Tool::ListExpenses => "list_expenses",
            Tool::GetExpense => "get_expense",
            Tool::UpdateExpense => "update_expense",
            Tool::DeleteExpense => "delete_expense",
            Tool::DeleteExpensesByDateRange => "delete_expenses_by_date_range",
            Tool::Summarize => "summarize",
            Tool::GetStatistics => "get_statistics",
            Tool::ExportExpenses => "export_expenses",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formats accepted by `export_expenses`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One JSON-RPC call envelope
///
/// Envelopes are built immediately before a call and discarded after; every
/// constructor mints a fresh v4 UUID so no two calls share an id.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub id: String,
    pub method: String,
    pub params: Value,
}

impl RpcRequest {
    /// Envelope for a `tools/call` invocation
    pub fn call_tool(tool: Tool, arguments: Map<String, Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Uuid::new_v4().to_string(),
            method: "tools/call".to_string(),
            params: json!({
                "name": tool.as_str(),
                "arguments": arguments,
            }),
        }
    }

    /// Envelope for a `resources/read` invocation
    pub fn read_resource(uri: &str) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Uuid::new_v4().to_string(),
            method: "resources/read".to_string(),
            params: json!({ "uri": uri }),
        }
    }
}
