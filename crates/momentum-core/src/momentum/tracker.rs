//! Stateful momentum tracker.
//!
//! Owns one [`Momentum`] record for the lifetime of an attach. The embedder
//! restores a record, calls [`MomentumTracker::apply_startup_drift`] once,
//! then forwards activity as it happens.
//!
//! ```ignore
//! let mut tracker = MomentumTracker::from_state(stored, params, today);
//! tracker.apply_startup_drift(today);
//! tracker.log_activity(today, ActivityKind::Workout);
//! save(tracker.momentum());
//! ```

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::events::MomentumEvent;
use super::model::{
    drift_by_days, log_activity_with_boost, ActivityKind, ClockRollbackPolicy, Momentum,
    ACTIVITY_BOOST, DEFAULT_DRIFT_RATE, INITIAL_LEVEL,
};

/// Tuning applied to new records and to activity boosts.
///
/// Drift always uses the record's own `drift_rate`; `drift_rate` here only
/// seeds fresh records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MomentumParams {
    #[serde(default = "default_drift_rate")]
    pub drift_rate: f64,
    #[serde(default = "default_activity_boost")]
    pub activity_boost: f64,
    #[serde(default = "default_initial_level")]
    pub initial_level: f64,
    #[serde(default)]
    pub rollback_policy: ClockRollbackPolicy,
}

fn default_drift_rate() -> f64 {
    DEFAULT_DRIFT_RATE
}
fn default_activity_boost() -> f64 {
    ACTIVITY_BOOST
}
fn default_initial_level() -> f64 {
    INITIAL_LEVEL
}

impl Default for MomentumParams {
    fn default() -> Self {
        Self {
            drift_rate: DEFAULT_DRIFT_RATE,
            activity_boost: ACTIVITY_BOOST,
            initial_level: INITIAL_LEVEL,
            rollback_policy: ClockRollbackPolicy::Ignore,
        }
    }
}

/// Momentum tracker for a single embedder.
pub struct MomentumTracker {
    params: MomentumParams,
    state: Momentum,
    /// Date through which drift has already been applied since
    /// `last_active_date`. Cleared by activity.
    drift_applied_through: Option<NaiveDate>,
    startup_drift_done: bool,
    history: Vec<MomentumEvent>,
    record_history: bool,
}

impl MomentumTracker {
    /// Fresh tracker with default params.
    pub fn new(today: NaiveDate) -> Self {
        Self::with_params(MomentumParams::default(), today)
    }

    /// Fresh tracker whose record is seeded from `params`.
    pub fn with_params(params: MomentumParams, today: NaiveDate) -> Self {
        let state = Momentum::with_start(today, params.initial_level, params.drift_rate);
        Self::restore(state, params)
    }

    /// Attach to a rehydrated record, used as-is.
    pub fn restore(state: Momentum, params: MomentumParams) -> Self {
        Self::restore_reconciled(state, params, None)
    }

    /// Attach to a rehydrated record that an earlier attach already drifted
    /// through `drift_applied_through`.
    pub fn restore_reconciled(
        state: Momentum,
        params: MomentumParams,
        drift_applied_through: Option<NaiveDate>,
    ) -> Self {
        Self {
            params,
            state,
            drift_applied_through,
            startup_drift_done: false,
            history: Vec::new(),
            record_history: true,
        }
    }

    /// Restore `state` when present, otherwise start fresh on `today`.
    pub fn from_state(state: Option<Momentum>, params: MomentumParams, today: NaiveDate) -> Self {
        match state {
            Some(state) => Self::restore(state, params),
            None => Self::with_params(params, today),
        }
    }

    pub fn set_history_enabled(&mut self, enabled: bool) {
        self.record_history = enabled;
    }

    pub fn momentum(&self) -> &Momentum {
        &self.state
    }

    pub fn params(&self) -> &MomentumParams {
        &self.params
    }

    pub fn drift_applied_through(&self) -> Option<NaiveDate> {
        self.drift_applied_through
    }

    /// Reconcile days missed since the last activity. One-shot per tracker:
    /// a second call is refused and returns `None`.
    ///
    /// Returns `None` when nothing drifted.
    pub fn apply_startup_drift(&mut self, today: NaiveDate) -> Option<MomentumEvent> {
        if self.startup_drift_done {
            warn!(%today, "startup drift already applied for this attach, ignoring");
            return None;
        }
        self.startup_drift_done = true;

        let policy = self.params.rollback_policy;
        if today < self.state.last_active_date {
            warn!(
                %today,
                last_active = %self.state.last_active_date,
                ?policy,
                "calendar date is earlier than last activity"
            );
        }

        let total = self.state.missed_days(today, policy);
        let already = self
            .drift_applied_through
            .map(|through| self.state.missed_days(through, policy))
            .unwrap_or(0);
        if total > already {
            self.drift_applied_through = Some(today);
        }

        let missed_days = total.saturating_sub(already);
        if missed_days == 0 {
            debug!(%today, total, already, "no drift to apply");
            return None;
        }

        let level_before = self.state.current_level;
        self.state = drift_by_days(self.state, missed_days);
        info!(
            missed_days,
            level_before,
            level_after = self.state.current_level,
            "applied momentum drift"
        );

        let event = MomentumEvent::DriftApplied {
            missed_days,
            level_before,
            level_after: self.state.current_level,
            on: today,
            at: Utc::now(),
        };
        self.record(event.clone());
        Some(event)
    }

    /// Record one tracked action on `today`.
    pub fn log_activity(&mut self, today: NaiveDate, kind: ActivityKind) -> MomentumEvent {
        let level_before = self.state.current_level;
        let new_day = self.state.last_active_date != today;
        self.state = log_activity_with_boost(self.state, today, self.params.activity_boost);
        self.drift_applied_through = None;

        if new_day {
            info!(
                %today,
                total_active_days = self.state.total_active_days,
                "new active day"
            );
        }
        debug!(
            %kind,
            level_before,
            level_after = self.state.current_level,
            "logged activity"
        );

        let event = MomentumEvent::ActivityLogged {
            kind,
            level_before,
            level_after: self.state.current_level,
            new_day,
            on: today,
            at: Utc::now(),
        };
        self.record(event.clone());
        event
    }

    /// Replace the record with a fresh one seeded from the params.
    pub fn reset(&mut self, today: NaiveDate) -> MomentumEvent {
        let level_before = self.state.current_level;
        self.state = Momentum::with_start(today, self.params.initial_level, self.params.drift_rate);
        self.drift_applied_through = None;
        info!(%today, level_before, "momentum reset");

        let event = MomentumEvent::Reset {
            level_before,
            on: today,
            at: Utc::now(),
        };
        self.record(event.clone());
        event
    }

    /// Events recorded during this attach.
    pub fn history(&self) -> &[MomentumEvent] {
        &self.history
    }

    /// Drain events recorded during this attach.
    pub fn take_history(&mut self) -> Vec<MomentumEvent> {
        std::mem::take(&mut self.history)
    }

    fn record(&mut self, event: MomentumEvent) {
        if self.record_history {
            self.history.push(event);
        }
    }
}
