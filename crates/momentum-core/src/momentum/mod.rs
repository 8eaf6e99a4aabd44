mod events;
mod model;
mod report;
mod tier;
mod tracker;

pub use events::MomentumEvent;
pub use model::{
    apply_drift, drift_by_days, fraction_to_points, log_activity, log_activity_with_boost,
    ActivityKind, ClockRollbackPolicy, Momentum, ACTIVITY_BOOST, DEFAULT_DRIFT_RATE,
    INITIAL_LEVEL, MAX_MOMENTUM, MIN_MOMENTUM,
};
pub use report::MomentumReport;
pub use tier::{days_until_zero, MomentumColor, MomentumTier, Palette};
pub use tracker::{MomentumParams, MomentumTracker};
