//! One attach of the tracker to persisted state.
//!
//! `attach` loads the stored record, reconciles drift exactly once, and
//! `commit` snapshots the result. Embedders (the CLI, a UI binding) go
//! through this instead of wiring the store and tracker by hand.

use chrono::NaiveDate;
use tracing::info;

use crate::clock::Clock;
use crate::error::Result;
use crate::momentum::{ActivityKind, Momentum, MomentumEvent, MomentumReport, MomentumTracker};
use crate::storage::{Config, StateStore, StoredMomentum};

pub struct MomentumSession {
    store: StateStore,
    config: Config,
    tracker: MomentumTracker,
    stored_history: Vec<MomentumEvent>,
    today: NaiveDate,
    drift: Option<MomentumEvent>,
}

impl MomentumSession {
    /// Load state from `store` and apply startup drift for `clock.today()`.
    pub fn attach<C: Clock + ?Sized>(store: StateStore, config: Config, clock: &C) -> Result<Self> {
        let today = clock.today();
        let params = config.momentum;

        let (mut tracker, stored_history) = match store.load()? {
            Some(stored) => (
                MomentumTracker::restore_reconciled(
                    stored.momentum,
                    params,
                    stored.drift_applied_through,
                ),
                stored.history,
            ),
            None => {
                info!(%today, "no stored momentum, starting fresh");
                (MomentumTracker::with_params(params, today), Vec::new())
            }
        };
        tracker.set_history_enabled(config.history.enabled);
        let drift = tracker.apply_startup_drift(today);

        Ok(Self {
            store,
            config,
            tracker,
            stored_history,
            today,
            drift,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn momentum(&self) -> &Momentum {
        self.tracker.momentum()
    }

    /// Drift reconciled by this attach, if any.
    pub fn drift(&self) -> Option<&MomentumEvent> {
        self.drift.as_ref()
    }

    pub fn log_activity(&mut self, kind: ActivityKind) -> MomentumEvent {
        self.tracker.log_activity(self.today, kind)
    }

    pub fn reset(&mut self) -> MomentumEvent {
        self.tracker.reset(self.today)
    }

    pub fn report(&self) -> MomentumReport {
        MomentumReport::new(self.tracker.momentum(), &self.config.palette)
    }

    /// Persisted events followed by this attach's events, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &MomentumEvent> {
        self.stored_history.iter().chain(self.tracker.history())
    }

    /// Save the record, drift marker, and trimmed history.
    pub fn commit(mut self) -> Result<StoredMomentum> {
        let mut stored = StoredMomentum {
            momentum: *self.tracker.momentum(),
            drift_applied_through: self.tracker.drift_applied_through(),
            history: std::mem::take(&mut self.stored_history),
        };
        stored.append_history(self.tracker.take_history(), self.config.history.max_events);
        self.store.save(&stored)?;
        Ok(stored)
    }
}
