//! What the desk shows, computed from [`ViewState`] without touching egui.
//!
//! The GUI draws exactly this model, so which controls exist on which row is
//! decided (and tested) here.

use crate::types::{TransactionId, TransactionStatus};
use crate::utils::{format_amount, format_timestamp};
use crate::view_state::ViewState;

pub const LOADING_MESSAGE: &str = "Loading transactions…";
pub const EMPTY_MESSAGE: &str = "No transactions yet";
pub const CLEAR_LABEL: &str = "Clear Funds";
pub const CLEARING_LABEL: &str = "Processing...";

/// Which screen the desk renders
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loading,
    Failed(String),
    Table,
}

/// Checkbox and clear button of a clearable row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowControls {
    pub selected: bool,
    pub clearing: bool,
}

impl RowControls {
    pub fn button_label(&self) -> &'static str {
        if self.clearing {
            CLEARING_LABEL
        } else {
            CLEAR_LABEL
        }
    }

    pub fn button_enabled(&self) -> bool {
        !self.clearing
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: TransactionId,
    pub client_name: String,
    pub amount: String,
    pub status: TransactionStatus,
    pub timestamp: String,
    pub high_amount: bool,
    /// `None` when the row cannot be cleared
    pub controls: Option<RowControls>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkButton {
    pub enabled: bool,
    pub label: String,
}

pub fn screen(state: &ViewState) -> Screen {
    if state.loading {
        Screen::Loading
    } else if let Some(error) = &state.load_error {
        Screen::Failed(format!("Error: {}", error))
    } else {
        Screen::Table
    }
}

pub fn rows(state: &ViewState) -> Vec<RowView> {
    state
        .transactions
        .iter()
        .map(|t| RowView {
            id: t.id,
            client_name: t.client_name.clone(),
            amount: format_amount(t.amount),
            status: t.status.clone(),
            timestamp: format_timestamp(t.timestamp),
            high_amount: state.policy.is_high_amount(t),
            controls: state.can_clear(t).then(|| RowControls {
                selected: state.selected.contains(&t.id),
                clearing: state.clearing == Some(t.id),
            }),
        })
        .collect()
}

pub fn bulk_button(state: &ViewState) -> BulkButton {
    let count = state.selected.len();
    let label = if state.bulk_clearing {
        "Clearing...".to_string()
    } else if count > 0 {
        format!("Clear Selected ({})", count)
    } else {
        "Clear Selected".to_string()
    };
    BulkButton {
        enabled: count > 0 && !state.bulk_clearing,
        label,
    }
}
