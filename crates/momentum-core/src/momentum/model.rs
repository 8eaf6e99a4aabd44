//! The momentum record and its pure transition functions.
//!
//! Momentum is a bounded [0, 100] engagement score. Each activity adds a
//! fixed boost; each missed calendar day drifts the score down by
//! `drift_rate * 100` points. A missed day never resets the score to zero.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::days_between;
use crate::error::ValidationError;

pub const MIN_MOMENTUM: f64 = 0.0;
pub const MAX_MOMENTUM: f64 = 100.0;
/// Fraction of the scale lost per missed day (5 points).
pub const DEFAULT_DRIFT_RATE: f64 = 0.05;
/// Fraction of the scale gained per logged activity (15 points).
pub const ACTIVITY_BOOST: f64 = 0.15;
pub const INITIAL_LEVEL: f64 = 50.0;

/// Convert a fraction of the scale to points.
///
/// The result is `fraction * 100` rounded to the nearest micro-point
/// (1e-6). `0.15` becomes exactly `15.0` instead of `15.000000000000002`.
/// A rate with more than eight decimal places therefore drifts slightly
/// differently from the unrounded `missed_days * rate * 100`; for example
/// `0.123456789` yields `12.345679` points per day.
pub fn fraction_to_points(fraction: f64) -> f64 {
    (fraction * MAX_MOMENTUM * 1e6).round() / 1e6
}

fn clamp_level(level: f64) -> f64 {
    level.clamp(MIN_MOMENTUM, MAX_MOMENTUM)
}

/// What to do when today is earlier than `last_active_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockRollbackPolicy {
    /// A backward gap counts as zero missed days.
    #[default]
    Ignore,
    /// The absolute gap drifts, as if the clock had moved forward.
    Absolute,
}

impl ClockRollbackPolicy {
    /// Missed days for a signed calendar gap.
    pub fn missed_days(self, gap: i64) -> u32 {
        let days = match self {
            ClockRollbackPolicy::Ignore => gap.max(0),
            ClockRollbackPolicy::Absolute => gap.abs(),
        };
        u32::try_from(days).unwrap_or(u32::MAX)
    }
}

/// Kind of tracked action. Only labels the event; every kind boosts equally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Chat,
    Workout,
    Mood,
    Journal,
    Meditate,
    Recovery,
    #[default]
    Other,
}

impl ActivityKind {
    pub const ALL: [ActivityKind; 7] = [
        ActivityKind::Chat,
        ActivityKind::Workout,
        ActivityKind::Mood,
        ActivityKind::Journal,
        ActivityKind::Meditate,
        ActivityKind::Recovery,
        ActivityKind::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Chat => "chat",
            ActivityKind::Workout => "workout",
            ActivityKind::Mood => "mood",
            ActivityKind::Journal => "journal",
            ActivityKind::Meditate => "meditate",
            ActivityKind::Recovery => "recovery",
            ActivityKind::Other => "other",
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        ActivityKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lower)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "kind".into(),
                message: format!(
                    "unknown activity kind '{s}', expected one of \
                     chat/workout/mood/journal/meditate/recovery/other"
                ),
            })
    }
}

/// Persisted momentum record.
///
/// Keys are camelCase so records written by the mobile app load unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Momentum {
    /// Present engagement, always within [0, 100].
    pub current_level: f64,
    /// Highest `current_level` ever reached. Drift never lowers it.
    pub peak_level: f64,
    /// Fraction of the scale lost per missed calendar day.
    pub drift_rate: f64,
    /// Date of the most recent logged activity.
    pub last_active_date: NaiveDate,
    /// Distinct calendar dates with at least one logged activity.
    pub total_active_days: u32,
}

impl Momentum {
    /// Fresh record for a user with no history.
    pub fn new(today: NaiveDate) -> Self {
        Self::with_start(today, INITIAL_LEVEL, DEFAULT_DRIFT_RATE)
    }

    pub fn with_start(today: NaiveDate, initial_level: f64, drift_rate: f64) -> Self {
        let level = clamp_level(initial_level);
        Self {
            current_level: level,
            peak_level: level,
            drift_rate,
            last_active_date: today,
            total_active_days: 1,
        }
    }

    /// Points lost per missed day.
    pub fn drift_points_per_day(&self) -> f64 {
        fraction_to_points(self.drift_rate)
    }

    /// Missed days between `last_active_date` and `today` under `policy`.
    pub fn missed_days(&self, today: NaiveDate, policy: ClockRollbackPolicy) -> u32 {
        policy.missed_days(days_between(self.last_active_date, today))
    }

    /// Check the record against the data-model bounds.
    ///
    /// Rehydrated records are used as-is by the tracker, so the storage
    /// layer calls this before handing one over.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let in_range = |v: f64| v.is_finite() && (MIN_MOMENTUM..=MAX_MOMENTUM).contains(&v);
        if !in_range(self.current_level) {
            return Err(ValidationError::InvalidValue {
                field: "currentLevel".into(),
                message: format!("{} is outside [0, 100]", self.current_level),
            });
        }
        if !in_range(self.peak_level) {
            return Err(ValidationError::InvalidValue {
                field: "peakLevel".into(),
                message: format!("{} is outside [0, 100]", self.peak_level),
            });
        }
        if !self.drift_rate.is_finite() || self.drift_rate <= 0.0 || self.drift_rate > 1.0 {
            return Err(ValidationError::InvalidValue {
                field: "driftRate".into(),
                message: format!("{} must be in (0, 1]", self.drift_rate),
            });
        }
        Ok(())
    }
}

/// Drift `state` down by `days` missed days. Peak and dates are untouched.
pub fn drift_by_days(state: Momentum, days: u32) -> Momentum {
    if days == 0 {
        return state;
    }
    let drift_amount = f64::from(days) * state.drift_points_per_day();
    Momentum {
        current_level: clamp_level(state.current_level - drift_amount),
        ..state
    }
}

/// Apply drift for every day missed between `last_active_date` and `today`.
///
/// `last_active_date` is not advanced, so calling this twice for the same
/// `today` drifts twice. Callers reconcile exactly once per attach.
pub fn apply_drift(state: Momentum, today: NaiveDate, policy: ClockRollbackPolicy) -> Momentum {
    drift_by_days(state, state.missed_days(today, policy))
}

/// Record one activity on `today` with the standard 15-point boost.
pub fn log_activity(state: Momentum, today: NaiveDate) -> Momentum {
    log_activity_with_boost(state, today, ACTIVITY_BOOST)
}

/// Record one activity on `today`, boosting by `boost` (a fraction of the scale).
pub fn log_activity_with_boost(state: Momentum, today: NaiveDate, boost: f64) -> Momentum {
    let current_level = clamp_level(state.current_level + fraction_to_points(boost));
    let is_new_day = state.last_active_date != today;
    Momentum {
        current_level,
        peak_level: state.peak_level.max(current_level),
        last_active_date: today,
        total_active_days: if is_new_day {
            state.total_active_days.saturating_add(1)
        } else {
            state.total_active_days
        },
        ..state
    }
}
