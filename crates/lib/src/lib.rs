pub mod client;
pub mod config;
pub mod protocol;
pub mod requests;
pub mod transport;

pub use client::ExpenseClient;
pub use config::Config;
pub use protocol::{CATEGORIES_URI, ExportFormat, RpcRequest, Tool};
pub use transport::{Outcome, Transport};
