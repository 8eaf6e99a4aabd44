//! Read-only views derived from the current level.

use serde::{Deserialize, Serialize};

use super::model::{fraction_to_points, Momentum};

/// Narrative band of the current level. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumTier {
    /// 80 and above
    EscapeVelocity,
    /// 60 to below 80
    BreakingAtmosphere,
    /// 40 to below 60
    BuildingMomentum,
    /// 20 to below 40
    Drifting,
    /// below 20
    ReadyForLiftoff,
}

impl MomentumTier {
    pub fn from_level(level: f64) -> Self {
        if level >= 80.0 {
            MomentumTier::EscapeVelocity
        } else if level >= 60.0 {
            MomentumTier::BreakingAtmosphere
        } else if level >= 40.0 {
            MomentumTier::BuildingMomentum
        } else if level >= 20.0 {
            MomentumTier::Drifting
        } else {
            MomentumTier::ReadyForLiftoff
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            MomentumTier::EscapeVelocity => "🚀 You've achieved escape velocity! Keep soaring!",
            MomentumTier::BreakingAtmosphere => {
                "🌙 Great altitude! You're breaking through the atmosphere."
            }
            MomentumTier::BuildingMomentum => {
                "🛫 Building momentum. Each activity gets you higher."
            }
            MomentumTier::Drifting => {
                "🌍 You're drifting a bit. One activity can change your trajectory."
            }
            MomentumTier::ReadyForLiftoff => {
                "🌱 Ready for liftoff? Your next action starts the engines."
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MomentumTier::EscapeVelocity => "escape velocity",
            MomentumTier::BreakingAtmosphere => "breaking atmosphere",
            MomentumTier::BuildingMomentum => "building momentum",
            MomentumTier::Drifting => "drifting",
            MomentumTier::ReadyForLiftoff => "ready for liftoff",
        }
    }
}

/// Four-band color of the current level. Shares the 80/60/40 bounds with
/// [`MomentumTier`]; everything below 40 is red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumColor {
    Green,
    Purple,
    Yellow,
    Red,
}

impl MomentumColor {
    pub fn from_level(level: f64) -> Self {
        if level >= 80.0 {
            MomentumColor::Green
        } else if level >= 60.0 {
            MomentumColor::Purple
        } else if level >= 40.0 {
            MomentumColor::Yellow
        } else {
            MomentumColor::Red
        }
    }

    pub fn hex<'a>(&self, palette: &'a Palette) -> &'a str {
        match self {
            MomentumColor::Green => &palette.escape_velocity,
            MomentumColor::Purple => &palette.breaking_atmosphere,
            MomentumColor::Yellow => &palette.building_momentum,
            MomentumColor::Red => &palette.drifting,
        }
    }
}

/// Hex values for each color band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    #[serde(default = "default_green")]
    pub escape_velocity: String,
    #[serde(default = "default_purple")]
    pub breaking_atmosphere: String,
    #[serde(default = "default_yellow")]
    pub building_momentum: String,
    #[serde(default = "default_red")]
    pub drifting: String,
}

fn default_green() -> String {
    "#00d26a".into()
}
fn default_purple() -> String {
    "#6b5ce7".into()
}
fn default_yellow() -> String {
    "#ffc107".into()
}
fn default_red() -> String {
    "#e94560".into()
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            escape_velocity: default_green(),
            breaking_atmosphere: default_purple(),
            building_momentum: default_yellow(),
            drifting: default_red(),
        }
    }
}

/// Days of pure drift until `level` reaches zero, assuming no activity and
/// a fixed `drift_rate`. Saturates at `u32::MAX` for a non-positive rate.
pub fn days_until_zero(level: f64, drift_rate: f64) -> u32 {
    if level <= 0.0 {
        return 0;
    }
    let per_day = fraction_to_points(drift_rate);
    if per_day <= 0.0 {
        return u32::MAX;
    }
    // Float-to-int casts saturate.
    (level / per_day).ceil() as u32
}

impl Momentum {
    pub fn tier(&self) -> MomentumTier {
        MomentumTier::from_level(self.current_level)
    }

    pub fn status_message(&self) -> &'static str {
        self.tier().message()
    }

    pub fn color(&self) -> MomentumColor {
        MomentumColor::from_level(self.current_level)
    }

    pub fn days_until_zero(&self) -> u32 {
        days_until_zero(self.current_level, self.drift_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_bounds_are_inclusive_at_the_upper_tier() {
        assert_eq!(MomentumTier::from_level(80.0), MomentumTier::EscapeVelocity);
        assert_eq!(MomentumTier::from_level(79.0), MomentumTier::BreakingAtmosphere);
        assert_eq!(MomentumTier::from_level(60.0), MomentumTier::BreakingAtmosphere);
        assert_eq!(MomentumTier::from_level(59.9), MomentumTier::BuildingMomentum);
        assert_eq!(MomentumTier::from_level(40.0), MomentumTier::BuildingMomentum);
        assert_eq!(MomentumTier::from_level(20.0), MomentumTier::Drifting);
        assert_eq!(MomentumTier::from_level(19.99), MomentumTier::ReadyForLiftoff);
        assert_eq!(MomentumTier::from_level(0.0), MomentumTier::ReadyForLiftoff);
    }

    #[test]
    fn messages_match_tiers() {
        assert!(MomentumTier::EscapeVelocity.message().contains("escape velocity"));
        assert!(MomentumTier::BreakingAtmosphere
            .message()
            .contains("breaking through the atmosphere"));
        assert!(MomentumTier::BuildingMomentum.message().contains("Building momentum"));
        assert!(MomentumTier::Drifting.message().contains("drifting"));
        assert!(MomentumTier::ReadyForLiftoff.message().contains("Ready for liftoff"));
    }

    #[test]
    fn color_bands() {
        assert_eq!(MomentumColor::from_level(100.0), MomentumColor::Green);
        assert_eq!(MomentumColor::from_level(80.0), MomentumColor::Green);
        assert_eq!(MomentumColor::from_level(79.0), MomentumColor::Purple);
        assert_eq!(MomentumColor::from_level(60.0), MomentumColor::Purple);
        assert_eq!(MomentumColor::from_level(40.0), MomentumColor::Yellow);
        assert_eq!(MomentumColor::from_level(39.0), MomentumColor::Red);
        assert_eq!(MomentumColor::from_level(5.0), MomentumColor::Red);
    }

    #[test]
    fn default_palette_hex() {
        let palette = Palette::default();
        assert_eq!(MomentumColor::Green.hex(&palette), "#00d26a");
        assert_eq!(MomentumColor::Red.hex(&palette), "#e94560");
    }

    #[test]
    fn days_until_zero_projection() {
        assert_eq!(days_until_zero(45.0, 0.05), 9);
        assert_eq!(days_until_zero(46.0, 0.05), 10);
        assert_eq!(days_until_zero(0.0, 0.05), 0);
        assert_eq!(days_until_zero(100.0, 0.05), 20);
        assert_eq!(days_until_zero(50.0, 0.0), u32::MAX);
    }
}
