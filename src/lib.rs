//! Portola clearing desk.
//!
//! A native window over the Portola transactions API: lists transactions,
//! clears pending ones one at a time or in bulk, and keeps the list in step
//! with the server by polling without disturbing the operator mid-click.

pub mod clear_policy;
pub mod client;
pub mod config;
pub mod desk_controller;
pub mod error;
pub mod gui;
pub mod hover_guard;
pub mod presentation;
pub mod types;
pub mod utils;
pub mod view_state;

pub use client::{HttpTransactionSource, TransactionSource};
pub use config::Config;
pub use desk_controller::{DeskController, DeskSettings};
pub use error::ApiError;
pub use types::{ClearedTransaction, Transaction, TransactionId, TransactionStatus};
