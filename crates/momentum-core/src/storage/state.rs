//! JSON persistence for the momentum record.
//!
//! The tracker never touches disk; this store is the collaborator that
//! rehydrates a record before attach and snapshots it afterwards.
//!
//! File layout (`<data_dir>/momentum.json`):
//!
//! ```text
//! {
//!   "momentum": { "currentLevel": 45.0, "peakLevel": 65.0, ... },
//!   "driftAppliedThrough": "2024-06-03",
//!   "history": [ { "type": "DriftApplied", ... } ]
//! }
//! ```
//!
//! A bare momentum record (as the mobile app stores it) is also accepted.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::data_dir;
use crate::error::{Result, StateError};
use crate::momentum::{Momentum, MomentumEvent};

const STATE_FILE: &str = "momentum.json";

/// Everything persisted between attaches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMomentum {
    pub momentum: Momentum,
    /// Date through which drift has already been applied.
    #[serde(default)]
    pub drift_applied_through: Option<NaiveDate>,
    /// Oldest first.
    #[serde(default)]
    pub history: Vec<MomentumEvent>,
}

impl StoredMomentum {
    pub fn new(momentum: Momentum) -> Self {
        Self {
            momentum,
            drift_applied_through: None,
            history: Vec::new(),
        }
    }

    /// Append events, keeping at most `max_events` of the newest.
    pub fn append_history<I>(&mut self, events: I, max_events: usize)
    where
        I: IntoIterator<Item = MomentumEvent>,
    {
        self.history.extend(events);
        if self.history.len() > max_events {
            let excess = self.history.len() - max_events;
            self.history.drain(..excess);
        }
    }

    /// The newest `limit` events, oldest first.
    pub fn recent_history(&self, limit: usize) -> &[MomentumEvent] {
        let start = self.history.len().saturating_sub(limit);
        &self.history[start..]
    }
}

/// File-backed store for [`StoredMomentum`].
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/momentum.json`.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(data_dir()?.join(STATE_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored record. `Ok(None)` if nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// `StateError::Corrupt` if the file cannot be decoded (including a
    /// malformed `lastActiveDate`), a validation error if the record is out
    /// of bounds.
    pub fn load(&self) -> Result<Option<StoredMomentum>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored momentum");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let corrupt = |message: String| StateError::Corrupt {
            path: self.path.clone(),
            message,
        };

        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| corrupt(e.to_string()))?;
        let stored = if value.get("momentum").is_some() {
            serde_json::from_value::<StoredMomentum>(value).map_err(|e| corrupt(e.to_string()))?
        } else {
            let momentum =
                serde_json::from_value::<Momentum>(value).map_err(|e| corrupt(e.to_string()))?;
            StoredMomentum::new(momentum)
        };

        stored.momentum.validate()?;
        Ok(Some(stored))
    }

    /// Write atomically via a sibling temp file.
    pub fn save(&self, stored: &StoredMomentum) -> Result<()> {
        let write_failed = |message: String| StateError::WriteFailed {
            path: self.path.clone(),
            message,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| write_failed(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(stored)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| write_failed(e.to_string()))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| write_failed(e.to_string()))?;
        debug!(path = %self.path.display(), "saved momentum");
        Ok(())
    }

    /// Delete the stored record. Missing file is not an error.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use chrono::Utc;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn store() -> (tempfile::TempDir, StateStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join(STATE_FILE));
        (dir, store)
    }

    fn reset_event(level: f64) -> MomentumEvent {
        MomentumEvent::Reset {
            level_before: level,
            on: date("2024-06-01"),
            at: Utc::now(),
        }
    }

    #[test]
    fn missing_file_loads_as_none() {
        let (_dir, store) = store();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load() {
        let (_dir, store) = store();
        let mut stored = StoredMomentum::new(Momentum::new(date("2024-06-01")));
        stored.drift_applied_through = Some(date("2024-06-04"));
        store.save(&stored).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, stored);
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn bare_app_record_is_accepted() {
        let (_dir, store) = store();
        std::fs::write(
            store.path(),
            r#"{"currentLevel":62.5,"peakLevel":80,"driftRate":0.05,
                "lastActiveDate":"2024-06-01","totalActiveDays":12}"#,
        )
        .unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.momentum.current_level, 62.5);
        assert_eq!(loaded.momentum.total_active_days, 12);
        assert!(loaded.drift_applied_through.is_none());
        assert!(loaded.history.is_empty());
    }

    #[test]
    fn malformed_date_is_corrupt() {
        let (_dir, store) = store();
        std::fs::write(
            store.path(),
            r#"{"currentLevel":50,"peakLevel":50,"driftRate":0.05,
                "lastActiveDate":"June 1st","totalActiveDays":1}"#,
        )
        .unwrap();
        let err = store.load().unwrap_err();
        assert!(matches!(err, CoreError::State(StateError::Corrupt { .. })));
    }

    #[test]
    fn out_of_range_record_fails_validation() {
        let (_dir, store) = store();
        std::fs::write(
            store.path(),
            r#"{"currentLevel":150,"peakLevel":150,"driftRate":0.05,
                "lastActiveDate":"2024-06-01","totalActiveDays":1}"#,
        )
        .unwrap();
        assert!(matches!(store.load().unwrap_err(), CoreError::Validation(_)));
    }

    #[test]
    fn history_keeps_newest_events() {
        let mut stored = StoredMomentum::new(Momentum::new(date("2024-06-01")));
        stored.append_history((0..5).map(|i| reset_event(i as f64)), 3);
        assert_eq!(stored.history.len(), 3);
        assert!(matches!(
            stored.history[0],
            MomentumEvent::Reset { level_before, .. } if level_before == 2.0
        ));
        assert_eq!(stored.recent_history(2).len(), 2);
        assert_eq!(stored.recent_history(10).len(), 3);
    }

    #[test]
    fn clear_is_idempotent() {
        let (_dir, store) = store();
        store.save(&StoredMomentum::new(Momentum::new(date("2024-06-01")))).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
