//! GUI module for the Portola clearing desk
//!
//! This module provides the graphical user interface built with egui/eframe.
//!
//! ## Module Structure
//!
//! - `app` - Main GuiApp struct: owns the tokio runtime and the desk controller
//! - `theme` - Centralized theme and styling system (AppTheme)
//! - `notifications` - Notification history for clear outcomes
//! - `widgets` - Reusable UI widgets (TransactionTable)
//!
//! ## Usage
//!
//! ```no_run
//! use portola::config::Config;
//! use portola::gui;
//!
//! let config = Config::default();
//! gui::launch(config).expect("Failed to launch GUI");
//! ```

mod app;
pub mod notifications;
pub mod theme;
pub mod widgets;

// Re-export main public API
pub use app::{launch, GuiApp};

pub use notifications::NotificationEntry;
pub use theme::{configure_style, AppTheme};
pub use widgets::TransactionTable;
