//! View state for the clearing desk and the transitions that change it.
//!
//! `ViewState` is only ever replaced through [`ViewState::apply`], so every
//! ordering question (stale fetches, overlapping clears, bulk completion) is
//! answered in one place.

use crate::clear_policy::ClearPolicy;
use crate::error::ApiError;
use crate::types::{ClearedTransaction, Transaction, TransactionId};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Why a list fetch was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOrigin {
    Initial,
    Poll,
}

/// Result of one bulk clear batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkReport {
    pub cleared: Vec<TransactionId>,
    pub failed: Vec<(TransactionId, String)>,
}

impl BulkReport {
    pub fn attempted(&self) -> usize {
        self.cleared.len() + self.failed.len()
    }

    pub fn summary(&self) -> String {
        if self.failed.is_empty() {
            format!("Cleared {} of {} selected transactions.", self.cleared.len(), self.attempted())
        } else {
            let ids: Vec<String> = self.failed.iter().map(|(id, _)| format!("#{}", id)).collect();
            format!(
                "Cleared {} of {} selected transactions; failed: {}.",
                self.cleared.len(),
                self.attempted(),
                ids.join(", ")
            )
        }
    }
}

/// A state transition. User commands and job completions alike.
#[derive(Debug)]
pub enum Action {
    FetchSettled {
        seq: u64,
        origin: FetchOrigin,
        result: Result<Vec<Transaction>, ApiError>,
    },
    ClearStarted(TransactionId),
    ClearSettled {
        id: TransactionId,
        result: Result<ClearedTransaction, ApiError>,
    },
    BulkStarted,
    BulkSettled(Vec<(TransactionId, Result<ClearedTransaction, ApiError>)>),
    ToggleSelected(TransactionId),
    SetSuperAdmin(bool),
    DismissActionError,
}

#[derive(Debug, Clone)]
pub struct ViewState {
    pub policy: ClearPolicy,
    /// True until the first fetch settles
    pub loading: bool,
    /// Initial load failure; the whole view shows this instead of the table
    pub load_error: Option<String>,
    /// Single clear failure shown above the table
    pub action_error: Option<String>,
    pub transactions: Vec<Transaction>,
    pub selected: BTreeSet<TransactionId>,
    /// Single clear in flight
    pub clearing: Option<TransactionId>,
    pub bulk_clearing: bool,
    pub super_admin: bool,
    pub last_bulk: Option<BulkReport>,
    /// Sequence number of the newest fetch whose result was applied
    applied_seq: u64,
}

impl ViewState {
    pub fn new(policy: ClearPolicy) -> Self {
        Self {
            policy,
            loading: true,
            load_error: None,
            action_error: None,
            transactions: Vec::new(),
            selected: BTreeSet::new(),
            clearing: None,
            bulk_clearing: false,
            super_admin: false,
            last_bulk: None,
            applied_seq: 0,
        }
    }

    pub fn find(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn can_clear(&self, tx: &Transaction) -> bool {
        self.policy.can_clear(tx, self.super_admin)
    }

    pub fn is_clearable(&self, id: TransactionId) -> bool {
        self.find(id).map(|t| self.can_clear(t)).unwrap_or(false)
    }

    /// Any single or bulk clear in flight
    pub fn is_busy(&self) -> bool {
        self.clearing.is_some() || self.bulk_clearing
    }

    pub fn applied_seq(&self) -> u64 {
        self.applied_seq
    }

    pub fn apply(mut self, action: Action) -> Self {
        match action {
            Action::FetchSettled { seq, origin, result } => {
                if seq <= self.applied_seq {
                    debug!(seq, applied = self.applied_seq, "ignoring stale {:?} fetch", origin);
                    return self;
                }
                match result {
                    Ok(list) => {
                        self.applied_seq = seq;
                        self.transactions = list;
                        self.loading = false;
                        if origin == FetchOrigin::Initial {
                            self.load_error = None;
                        }
                        self.prune_selection();
                    }
                    Err(e) => match origin {
                        FetchOrigin::Initial => {
                            warn!("Initial transaction load failed: {}", e);
                            self.loading = false;
                            self.load_error = Some(e.to_string());
                        }
                        FetchOrigin::Poll => {
                            debug!("Poll failed, keeping previous list: {}", e);
                        }
                    },
                }
            }
            Action::ClearStarted(id) => {
                self.clearing = Some(id);
            }
            Action::ClearSettled { id, result } => {
                match result {
                    Ok(updated) => {
                        info!("Transaction {} is now {}", updated.id, updated.status);
                        self.merge_status(&updated);
                        self.prune_selection();
                    }
                    Err(e) => {
                        warn!("Clearing transaction {} failed: {}", id, e);
                        self.action_error = Some(e.to_string());
                    }
                }
                if self.clearing == Some(id) {
                    self.clearing = None;
                }
            }
            Action::BulkStarted => {
                self.bulk_clearing = true;
            }
            Action::BulkSettled(outcomes) => {
                let mut report = BulkReport::default();
                for (id, result) in outcomes {
                    match result {
                        Ok(updated) => {
                            self.merge_status(&updated);
                            report.cleared.push(id);
                        }
                        Err(e) => report.failed.push((id, e.to_string())),
                    }
                }
                if report.failed.is_empty() {
                    info!("{}", report.summary());
                } else {
                    warn!("{}", report.summary());
                }
                self.selected.clear();
                self.bulk_clearing = false;
                self.last_bulk = Some(report);
            }
            Action::ToggleSelected(id) => {
                if !self.selected.remove(&id) {
                    if self.is_clearable(id) {
                        self.selected.insert(id);
                    } else {
                        debug!("Ignoring selection of non-clearable transaction {}", id);
                    }
                }
            }
            Action::SetSuperAdmin(enabled) => {
                self.super_admin = enabled;
                self.prune_selection();
            }
            Action::DismissActionError => {
                self.action_error = None;
            }
        }
        self
    }

    fn merge_status(&mut self, updated: &ClearedTransaction) {
        if let Some(tx) = self.transactions.iter_mut().find(|t| t.id == updated.id) {
            tx.status = updated.status.clone();
        }
    }

    /// Keep only ids that are still present and clearable.
    fn prune_selection(&mut self) {
        if self.bulk_clearing || self.selected.is_empty() {
            return;
        }
        let keep: BTreeSet<TransactionId> = self
            .selected
            .iter()
            .copied()
            .filter(|id| self.is_clearable(*id))
            .collect();
        self.selected = keep;
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(ClearPolicy::default())
    }
}
