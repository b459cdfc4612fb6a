//! Debounced "pointer is over a critical control" flag.
//!
//! Entering a checkbox or clear button raises the flag at once. Leaving arms a
//! release deadline `grace` later; re-entering or leaving again replaces the
//! armed deadline, so moving from a checkbox to the neighbouring button never
//! opens a refresh window.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct HoverGuard {
    grace: Duration,
    hovering: bool,
    /// Armed release; `None` while the pointer is over a control or when idle.
    release_at: Option<Instant>,
}

impl HoverGuard {
    pub fn new(grace: Duration) -> Self {
        Self {
            grace,
            hovering: false,
            release_at: None,
        }
    }

    pub fn enter(&mut self) {
        self.release_at = None;
        self.hovering = true;
    }

    pub fn leave(&mut self, now: Instant) {
        if self.hovering {
            self.release_at = Some(now + self.grace);
        }
    }

    /// Drop any armed release and lower the flag.
    pub fn cancel(&mut self) {
        self.release_at = None;
        self.hovering = false;
    }

    /// Whether refreshes must be held back at `now`. Fires an expired release.
    pub fn is_active(&mut self, now: Instant) -> bool {
        if let Some(deadline) = self.release_at {
            if now >= deadline {
                self.cancel();
            }
        }
        self.hovering
    }

    pub fn release_pending(&self) -> bool {
        self.release_at.is_some()
    }
}
