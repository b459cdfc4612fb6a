//! Transaction view controller.
//!
//! Owns the [`ViewState`], dispatches API calls onto a tokio runtime and folds
//! their results back in through [`ViewState::apply`]. The GUI calls
//! [`DeskController::tick`] once per frame; every other method is a user
//! command.
//!
//! Every spawned job is tied to the controller's cancellation token, so after
//! [`DeskController::teardown`] no late result reaches the state.

use crate::clear_policy::ClearPolicy;
use crate::client::TransactionSource;
use crate::config::Config;
use crate::hover_guard::HoverGuard;
use crate::types::TransactionId;
use crate::view_state::{Action, BulkReport, FetchOrigin, ViewState};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Timing and policy knobs for the controller
#[derive(Debug, Clone, Copy)]
pub struct DeskSettings {
    pub poll_interval: Duration,
    pub hover_grace: Duration,
    pub policy: ClearPolicy,
}

impl From<&Config> for DeskSettings {
    fn from(config: &Config) -> Self {
        Self {
            poll_interval: config.poll_interval,
            hover_grace: config.hover_grace,
            policy: ClearPolicy::new(config.high_amount_threshold),
        }
    }
}

impl Default for DeskSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

pub struct DeskController {
    source: Arc<dyn TransactionSource>,
    runtime: Handle,
    settings: DeskSettings,
    state: ViewState,
    hover: HoverGuard,
    /// Pointer was over a critical control on the previous frame
    pointer_over_controls: bool,
    events_tx: UnboundedSender<Action>,
    events_rx: UnboundedReceiver<Action>,
    cancel: CancellationToken,
    next_fetch_seq: u64,
    next_poll_at: Option<Instant>,
    /// Bulk report not yet handed to the GUI
    unseen_bulk: Option<BulkReport>,
}

impl DeskController {
    pub fn new(source: Arc<dyn TransactionSource>, runtime: Handle, settings: DeskSettings) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            source,
            runtime,
            settings,
            state: ViewState::new(settings.policy),
            hover: HoverGuard::new(settings.hover_grace),
            pointer_over_controls: false,
            events_tx,
            events_rx,
            cancel: CancellationToken::new(),
            next_fetch_seq: 0,
            next_poll_at: None,
            unseen_bulk: None,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.next_poll_at.is_some() && !self.cancel.is_cancelled()
    }

    /// Issue the initial load and start the poll schedule.
    pub fn mount(&mut self) {
        if self.is_mounted() || self.cancel.is_cancelled() {
            return;
        }
        info!("Mounting transaction desk");
        self.next_poll_at = Some(Instant::now() + self.settings.poll_interval);
        self.dispatch_fetch(FetchOrigin::Initial);
    }

    /// Cancel every in-flight job and the hover release. The controller is inert afterwards.
    pub fn teardown(&mut self) {
        if self.cancel.is_cancelled() {
            return;
        }
        info!("Tearing down transaction desk");
        self.cancel.cancel();
        self.hover.cancel();
        self.pointer_over_controls = false;
        self.next_poll_at = None;
    }

    /// Per-frame driver: apply finished jobs, then run the poll schedule.
    pub fn tick(&mut self) {
        self.drain_events();
        let Some(due) = self.next_poll_at else {
            return;
        };
        let now = Instant::now();
        if now >= due {
            // Missed ticks are skipped, not replayed
            self.next_poll_at = Some(now + self.settings.poll_interval);
            self.poll_tick();
        }
    }

    /// One poll interval elapsed. Returns whether a fetch was dispatched.
    pub fn poll_tick(&mut self) -> bool {
        if !self.is_mounted() {
            return false;
        }
        if self.refresh_suppressed(Instant::now()) {
            debug!("Skipping poll: interaction in progress");
            return false;
        }
        self.dispatch_fetch(FetchOrigin::Poll);
        true
    }

    pub fn refresh_suppressed(&mut self, now: Instant) -> bool {
        self.hover.is_active(now) || self.state.is_busy()
    }

    pub fn hover_enter(&mut self) {
        self.hover.enter();
    }

    pub fn hover_leave(&mut self) {
        self.hover.leave(Instant::now());
    }

    /// Per-frame hover report from the table. Only changes reach the guard, so a
    /// pointer resting off the controls does not keep pushing the release back.
    pub fn set_pointer_over_controls(&mut self, over: bool) {
        if over == self.pointer_over_controls {
            return;
        }
        self.pointer_over_controls = over;
        if over {
            self.hover_enter();
        } else {
            self.hover_leave();
        }
    }

    pub fn toggle_selected(&mut self, id: TransactionId) {
        self.update(Action::ToggleSelected(id));
    }

    pub fn set_super_admin(&mut self, enabled: bool) {
        self.update(Action::SetSuperAdmin(enabled));
    }

    pub fn dismiss_error(&mut self) {
        self.update(Action::DismissActionError);
    }

    /// Clear one transaction. Returns false when the row is not clearable or already clearing.
    pub fn clear_funds(&mut self, id: TransactionId) -> bool {
        if !self.is_mounted() || self.state.clearing == Some(id) || !self.state.is_clearable(id) {
            return false;
        }
        info!("Clearing funds for transaction {}", id);
        self.update(Action::ClearStarted(id));
        let source = Arc::clone(&self.source);
        self.spawn_job(async move {
            let result = source.clear_funds(id).await;
            Action::ClearSettled { id, result }
        });
        true
    }

    /// Clear every selected transaction concurrently. Returns false on an empty selection.
    pub fn clear_selected(&mut self) -> bool {
        if !self.is_mounted() || self.state.bulk_clearing {
            return false;
        }
        let ids: Vec<TransactionId> = self.state.selected.iter().copied().collect();
        if ids.is_empty() {
            return false;
        }
        info!("Bulk clearing {} transactions", ids.len());
        self.update(Action::BulkStarted);
        let source = Arc::clone(&self.source);
        self.spawn_job(async move {
            let mut set = JoinSet::new();
            for id in ids.iter().copied() {
                let source = Arc::clone(&source);
                set.spawn(async move { (id, source.clear_funds(id).await) });
            }
            let mut outcomes = Vec::with_capacity(ids.len());
            while let Some(joined) = set.join_next().await {
                match joined {
                    Ok(outcome) => outcomes.push(outcome),
                    Err(e) => warn!("Bulk clear task panicked: {}", e),
                }
            }
            Action::BulkSettled(outcomes)
        });
        true
    }

    /// Take the latest bulk report if it has not been taken yet.
    pub fn take_bulk_report(&mut self) -> Option<BulkReport> {
        self.unseen_bulk.take()
    }

    /// Wait for the next job to finish and apply it.
    ///
    /// Headless drivers and tests use this instead of spinning on `tick`.
    pub async fn next_event(&mut self) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        match self.events_rx.recv().await {
            Some(action) => {
                self.update(action);
                true
            }
            None => false,
        }
    }

    fn drain_events(&mut self) {
        if self.cancel.is_cancelled() {
            return;
        }
        while let Ok(action) = self.events_rx.try_recv() {
            self.update(action);
        }
    }

    fn update(&mut self, action: Action) {
        let is_bulk = matches!(action, Action::BulkSettled(_));
        let state = std::mem::take(&mut self.state);
        self.state = state.apply(action);
        if is_bulk {
            self.unseen_bulk = self.state.last_bulk.clone();
        }
    }

    fn dispatch_fetch(&mut self, origin: FetchOrigin) {
        self.next_fetch_seq += 1;
        let seq = self.next_fetch_seq;
        let source = Arc::clone(&self.source);
        self.spawn_job(async move {
            let result = source.list_transactions().await;
            Action::FetchSettled { seq, origin, result }
        });
    }

    fn spawn_job<F>(&self, job: F)
    where
        F: Future<Output = Action> + Send + 'static,
    {
        let tx = self.events_tx.clone();
        let cancel = self.cancel.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!("Job dropped: desk torn down");
                }
                action = job => {
                    let _ = tx.send(action);
                }
            }
        });
    }
}

impl Drop for DeskController {
    fn drop(&mut self) {
        self.teardown();
    }
}
