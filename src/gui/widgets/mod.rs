//! Widget components for the GUI
//!
//! ## Available Widgets
//!
//! - `TransactionTable` - Transaction rows with selection checkboxes and clear buttons

mod transaction_table;

pub use transaction_table::{TableCommand, TableOutput, TransactionTable};
