//! High-level client: one method per remote action
//!
//! Stateless - each method builds its envelope immediately before the call
//! and nothing is cached between calls.

use serde_json::{Map, Value, json};

use crate::protocol::{CATEGORIES_URI, ExportFormat, RpcRequest, Tool};
use crate::requests::{AddExpense, DateRange, Summarize, UpdateExpense};
use crate::transport::{Outcome, Transport};

/// Client for the remote expense-tracking server
pub struct ExpenseClient {
    transport: Transport,
}

impl ExpenseClient {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Record a new expense
    pub fn add_expense(&self, req: &AddExpense) -> Outcome {
        self.call_tool(Tool::AddExpense, req.arguments())
    }

    /// List all expenses
    pub fn list_expenses(&self) -> Outcome {
        self.call_tool(Tool::ListExpenses, Map::new())
    }

    /// Fetch a single expense by id
    pub fn get_expense(&self, expense_id: u64) -> Outcome {
        self.call_tool(Tool::GetExpense, id_arguments(expense_id))
    }

    /// Update fields on an existing expense
    pub fn update_expense(&self, req: &UpdateExpense) -> Outcome {
        self.call_tool(Tool::UpdateExpense, req.arguments())
    }

    /// Delete an expense by id
    pub fn delete_expense(&self, expense_id: u64) -> Outcome {
        self.call_tool(Tool::DeleteExpense, id_arguments(expense_id))
    }

    /// Delete every expense in a date range
    pub fn delete_range(&self, range: &DateRange) -> Outcome {
        self.call_tool(Tool::DeleteExpensesByDateRange, range.arguments())
    }

    /// Summarize spending over a date range
    pub fn summarize(&self, req: &Summarize) -> Outcome {
        self.call_tool(Tool::Summarize, req.arguments())
    }

    /// Overall statistics
    pub fn statistics(&self) -> Outcome {
        self.call_tool(Tool::GetStatistics, Map::new())
    }

    /// Export all expenses in the given format
    pub fn export(&self, format: ExportFormat) -> Outcome {
        let mut args = Map::new();
        args.insert("format".into(), json!(format.as_str()));
        self.call_tool(Tool::ExportExpenses, args)
    }

    /// Fetch the server's category list
    pub fn categories(&self) -> Outcome {
        self.read_resource(CATEGORIES_URI)
    }

    /// Invoke an arbitrary tool with a prebuilt arguments mapping
    pub fn call_tool(&self, tool: Tool, arguments: Map<String, Value>) -> Outcome {
        self.transport.post(&RpcRequest::call_tool(tool, arguments))
    }

    /// Read an arbitrary resource by URI
    pub fn read_resource(&self, uri: &str) -> Outcome {
        self.transport.post(&RpcRequest::read_resource(uri))
    }
}

fn id_arguments(expense_id: u64) -> Map<String, Value> {
    let mut args = Map::new();
    args.insert("expense_id".into(), json!(expense_id));
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_arguments_single_field() {
        let args = id_arguments(42);
        assert_eq!(args.len(), 1);
        assert_eq!(args["expense_id"], json!(42));
    }
}
