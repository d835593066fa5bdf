//! Per-model minimum-interval gate.
//!
//! Each model has its own slot holding the instant of its last dispatch.
//! Slots are independent, so a wait on one model never delays another.
//! Waiters on the same model queue on a fair async mutex and are released
//! in arrival order, one interval apart.

use lore_domain::Model;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tracing::debug;

type Slot = Arc<tokio::sync::Mutex<Option<Instant>>>;

/// Enforces a minimum spacing between dispatches to the same model.
///
/// State lives for the lifetime of the gate (the process, in practice) and
/// is never persisted.
pub struct ThrottleGate {
    min_interval: Duration,
    slots: Mutex<HashMap<Model, Slot>>,
}

impl ThrottleGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until `model` may be called again, then mark it as called now.
    ///
    /// The mark is unconditional: the attempt consumes the window whether or
    /// not the call that follows succeeds. Returns the recorded instant.
    pub async fn acquire(&self, model: &Model) -> Instant {
        let slot = self.slot(model);
        let mut last = slot.lock().await;

        if let Some(previous) = *last {
            let ready_at = previous + self.min_interval;
            let now = Instant::now();
            if ready_at > now {
                let wait = ready_at - now;
                debug!(
                    "Throttle: {} is cooling down, waiting {}s",
                    model,
                    wait.as_secs_f32().ceil()
                );
                sleep_until(ready_at).await;
            }
        }

        let now = Instant::now();
        *last = Some(now);
        now
    }

    /// Instant of the last dispatch recorded for `model`, if any.
    ///
    /// Returns `None` while another caller holds the model's slot.
    pub fn last_dispatch(&self, model: &Model) -> Option<Instant> {
        let slot = self.slots.lock().ok()?.get(model).cloned()?;
        let last = slot.try_lock().ok()?;
        *last
    }

    fn slot(&self, model: &Model) -> Slot {
        let mut slots = match self.slots.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Arc::clone(slots.entry(model.clone()).or_default())
    }
}

impl Default for ThrottleGate {
    fn default() -> Self {
        Self::new(Duration::from_secs(31))
    }
}
