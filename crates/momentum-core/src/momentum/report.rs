use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::model::Momentum;
use super::tier::{MomentumColor, MomentumTier, Palette};

/// Snapshot of the record plus every derived view, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentumReport {
    pub current_level: f64,
    pub peak_level: f64,
    pub drift_rate: f64,
    pub last_active_date: NaiveDate,
    pub total_active_days: u32,
    pub tier: MomentumTier,
    pub status_message: String,
    pub color: MomentumColor,
    pub color_hex: String,
    pub days_until_zero: u32,
}

impl MomentumReport {
    pub fn new(momentum: &Momentum, palette: &Palette) -> Self {
        let color = momentum.color();
        Self {
            current_level: momentum.current_level,
            peak_level: momentum.peak_level,
            drift_rate: momentum.drift_rate,
            last_active_date: momentum.last_active_date,
            total_active_days: momentum.total_active_days,
            tier: momentum.tier(),
            status_message: momentum.status_message().to_string(),
            color,
            color_hex: color.hex(palette).to_string(),
            days_until_zero: momentum.days_until_zero(),
        }
    }

    /// Fixed-width level bar, e.g. `[#########-----------]`.
    pub fn level_bar(&self, width: usize) -> String {
        let filled = ((self.current_level / 100.0) * width as f64).round() as usize;
        let filled = filled.min(width);
        format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
    }
}
