//! Integration tests for the momentum model, store and session.

use chrono::NaiveDate;
use momentum_core::{
    apply_drift, log_activity, ActivityKind, ClockRollbackPolicy, Config, FixedClock, Momentum,
    MomentumColor, MomentumEvent, MomentumSession, MomentumTier, MomentumTracker, StateStore,
};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn at_level(level: f64, last: &str) -> Momentum {
    Momentum {
        current_level: level,
        peak_level: level,
        drift_rate: 0.05,
        last_active_date: date(last),
        total_active_days: 1,
    }
}

fn temp_store() -> (tempfile::TempDir, StateStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = StateStore::new(dir.path().join("momentum.json"));
    (dir, store)
}

#[test]
fn test_documented_scenarios() {
    // 50 with one missed day drifts to 45
    let m = apply_drift(
        at_level(50.0, "2024-01-01"),
        date("2024-01-02"),
        ClockRollbackPolicy::Ignore,
    );
    assert_eq!(m.current_level, 45.0);
    assert_eq!(m.days_until_zero(), 9);

    // 10 with five missed days clamps to 0
    let m = apply_drift(
        at_level(10.0, "2024-01-01"),
        date("2024-01-06"),
        ClockRollbackPolicy::Ignore,
    );
    assert_eq!(m.current_level, 0.0);
    assert_eq!(m.days_until_zero(), 0);

    // 90 plus one activity caps at 100
    let m = log_activity(at_level(90.0, "2024-01-01"), date("2024-01-01"));
    assert_eq!(m.current_level, 100.0);
    assert_eq!(m.peak_level, 100.0);
}

#[test]
fn test_tier_boundaries() {
    let at = |level| at_level(level, "2024-01-01");

    assert_eq!(at(80.0).tier(), MomentumTier::EscapeVelocity);
    assert_eq!(at(80.0).color(), MomentumColor::Green);
    assert_eq!(at(79.0).tier(), MomentumTier::BreakingAtmosphere);
    assert_eq!(at(79.0).color(), MomentumColor::Purple);
    assert_eq!(at(59.0).tier(), MomentumTier::BuildingMomentum);
    assert_eq!(at(59.0).color(), MomentumColor::Yellow);
    assert_eq!(at(20.0).tier(), MomentumTier::Drifting);
    assert_eq!(at(20.0).color(), MomentumColor::Red);
    assert!(at(10.0).status_message().contains("Ready for liftoff"));
}

#[test]
fn test_week_of_activity_and_drift() {
    let mut tracker = MomentumTracker::new(date("2024-03-01"));

    // Active three days in a row
    tracker.log_activity(date("2024-03-01"), ActivityKind::Chat);
    tracker.log_activity(date("2024-03-02"), ActivityKind::Workout);
    tracker.log_activity(date("2024-03-03"), ActivityKind::Mood);
    assert_eq!(tracker.momentum().current_level, 95.0);
    assert_eq!(tracker.momentum().total_active_days, 3);

    // Away for four days, then back
    let mut tracker = MomentumTracker::restore(*tracker.momentum(), *tracker.params());
    tracker.apply_startup_drift(date("2024-03-07"));
    assert_eq!(tracker.momentum().current_level, 75.0);
    assert_eq!(tracker.momentum().peak_level, 95.0);

    tracker.log_activity(date("2024-03-07"), ActivityKind::Recovery);
    assert_eq!(tracker.momentum().current_level, 90.0);
    assert_eq!(tracker.momentum().total_active_days, 4);
}

#[test]
fn test_session_first_attach_starts_fresh() {
    let (_dir, store) = temp_store();
    let session =
        MomentumSession::attach(store.clone(), Config::default(), &FixedClock(date("2024-04-10")))
            .unwrap();
    assert!(session.drift().is_none());
    assert_eq!(session.momentum().current_level, 50.0);

    let stored = session.commit().unwrap();
    assert_eq!(stored.momentum.last_active_date, date("2024-04-10"));
    assert!(store.load().unwrap().is_some());
}

#[test]
fn test_session_reconciles_drift_once_per_day() {
    let (_dir, store) = temp_store();
    let config = Config::default();

    let mut session =
        MomentumSession::attach(store.clone(), config.clone(), &FixedClock(date("2024-04-10")))
            .unwrap();
    session.log_activity(ActivityKind::Workout);
    session.commit().unwrap();

    // Three days later, attach twice on the same day
    for _ in 0..2 {
        let session =
            MomentumSession::attach(store.clone(), config.clone(), &FixedClock(date("2024-04-13")))
                .unwrap();
        assert_eq!(session.momentum().current_level, 50.0);
        session.commit().unwrap();
    }

    // One more day: only the new day drifts
    let session =
        MomentumSession::attach(store.clone(), config.clone(), &FixedClock(date("2024-04-14")))
            .unwrap();
    assert_eq!(session.momentum().current_level, 45.0);
    let stored = session.commit().unwrap();
    assert_eq!(stored.drift_applied_through, Some(date("2024-04-14")));

    let drift_events = stored
        .history
        .iter()
        .filter(|e| matches!(e, MomentumEvent::DriftApplied { .. }))
        .count();
    assert_eq!(drift_events, 2);
}

#[test]
fn test_session_history_is_bounded() {
    let (_dir, store) = temp_store();
    let mut config = Config::default();
    config.history.max_events = 3;

    let mut session =
        MomentumSession::attach(store.clone(), config.clone(), &FixedClock(date("2024-04-10")))
            .unwrap();
    for _ in 0..5 {
        session.log_activity(ActivityKind::Journal);
    }
    assert_eq!(session.history().count(), 5);
    let stored = session.commit().unwrap();
    assert_eq!(stored.history.len(), 3);
    assert_eq!(stored.momentum.current_level, 100.0);
}

#[test]
fn test_session_reset_persists_fresh_record() {
    let (_dir, store) = temp_store();
    let mut session =
        MomentumSession::attach(store.clone(), Config::default(), &FixedClock(date("2024-04-10")))
            .unwrap();
    session.log_activity(ActivityKind::Meditate);
    session.reset();
    let stored = session.commit().unwrap();
    assert_eq!(stored.momentum.current_level, 50.0);
    assert!(matches!(stored.history.last(), Some(MomentumEvent::Reset { .. })));
}

#[test]
fn test_session_rejects_corrupt_state() {
    let (_dir, store) = temp_store();
    std::fs::write(store.path(), "{ not json").unwrap();
    let result =
        MomentumSession::attach(store, Config::default(), &FixedClock(date("2024-04-10")));
    assert!(result.is_err());
}
