//! # Momentum Core Library
//!
//! Drift-based engagement scoring for a wellness companion. Momentum is a
//! bounded [0, 100] score: every tracked activity boosts it, every missed
//! calendar day drifts it down a little instead of breaking a streak.
//!
//! ## Architecture
//!
//! - **Model**: the persisted [`Momentum`] record and pure transition
//!   functions ([`apply_drift`], [`log_activity`])
//! - **Tracker**: [`MomentumTracker`], a stateful owner of one record with a
//!   one-shot startup drift and an event history
//! - **Storage**: TOML configuration and the JSON state store that
//!   rehydrates and snapshots the record
//! - **Session**: [`MomentumSession`] ties store, config and clock together
//!   for an embedder
//!
//! ## Key Components
//!
//! - [`MomentumTracker`]: drift and activity state machine
//! - [`MomentumTier`] / [`MomentumColor`]: derived display bands
//! - [`Config`]: application configuration management
//! - [`StateStore`]: persisted momentum record

pub mod clock;
pub mod error;
pub mod momentum;
pub mod session;
pub mod storage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, StateError, ValidationError};
pub use momentum::{
    apply_drift, days_until_zero, log_activity, ActivityKind, ClockRollbackPolicy, Momentum,
    MomentumColor, MomentumEvent, MomentumParams, MomentumReport, MomentumTier, MomentumTracker,
    Palette,
};
pub use session::MomentumSession;
pub use storage::{Config, StateStore, StoredMomentum};
