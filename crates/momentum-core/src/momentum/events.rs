use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::model::ActivityKind;

/// Every momentum mutation produces an event. The store keeps a bounded
/// history of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MomentumEvent {
    /// Missed days were reconciled at attach time.
    DriftApplied {
        missed_days: u32,
        level_before: f64,
        level_after: f64,
        on: NaiveDate,
        at: DateTime<Utc>,
    },
    ActivityLogged {
        kind: ActivityKind,
        level_before: f64,
        level_after: f64,
        /// First activity on this calendar date.
        new_day: bool,
        on: NaiveDate,
        at: DateTime<Utc>,
    },
    /// State replaced by a fresh record.
    Reset {
        level_before: f64,
        on: NaiveDate,
        at: DateTime<Utc>,
    },
}

impl MomentumEvent {
    /// Calendar date the event was evaluated against.
    pub fn on(&self) -> NaiveDate {
        match self {
            MomentumEvent::DriftApplied { on, .. }
            | MomentumEvent::ActivityLogged { on, .. }
            | MomentumEvent::Reset { on, .. } => *on,
        }
    }

    /// Human-readable one-line summary.
    pub fn describe(&self) -> String {
        match self {
            MomentumEvent::DriftApplied {
                missed_days,
                level_before,
                level_after,
                ..
            } => {
                let unit = if *missed_days == 1 { "day" } else { "days" };
                format!(
                    "Drifted {:.1} -> {:.1} after {} missed {}",
                    level_before, level_after, missed_days, unit
                )
            }
            MomentumEvent::ActivityLogged {
                kind,
                level_before,
                level_after,
                new_day,
                ..
            } => {
                let suffix = if *new_day { " (new active day)" } else { "" };
                format!(
                    "Logged {}: {:.1} -> {:.1}{}",
                    kind, level_before, level_after, suffix
                )
            }
            MomentumEvent::Reset { level_before, .. } => {
                format!("Reset from {:.1}", level_before)
            }
        }
    }
}
