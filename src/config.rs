//! Round tuning. Everything the game loop needs to know about pacing and
//! geometry lives in [`RoundConfig`]; the defaults reproduce the classic
//! 30-second round.

use std::ops::Range;

/// localStorage key holding the best score.
pub const HIGH_SCORE_KEY: &str = "tapfruits_high";

/// Tunables for one round. Positions are percentages of the play area, sizes
/// are pixels, intervals are milliseconds.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RoundConfig {
    pub round_secs: u32,
    pub spawn_interval_ms: f64,
    pub countdown_interval_ms: f64,
    pub max_fruits: usize,
    pub fall_rate: f64,    // multiplier applied to each fruit's speed per frame
    pub offscreen_y: f64,  // fruits at or below this are discarded
    pub spawn_y: f64,      // just above the visible area
    pub spawn_x: Range<f64>,
    pub size_px: Range<f64>,
    pub speed: Range<f64>,
    pub hit_tolerance: f64, // extra percentage points around each fruit
    pub storage_key: String,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            round_secs: 30,
            spawn_interval_ms: 700.0,
            countdown_interval_ms: 1000.0,
            max_fruits: 12,
            fall_rate: 1.4,
            offscreen_y: 120.0,
            spawn_y: -10.0,
            spawn_x: 8.0..92.0,
            size_px: 36.0..72.0,
            speed: 0.2..0.8,
            hit_tolerance: 6.0,
            storage_key: HIGH_SCORE_KEY.to_string(),
        }
    }
}

impl RoundConfig {
    /// Replace values that would stall or break the loop with their defaults.
    pub fn validate(mut self) -> Self {
        let d = Self::default();
        if self.round_secs == 0 {
            self.round_secs = d.round_secs;
        }
        if !(self.spawn_interval_ms > 0.0) {
            self.spawn_interval_ms = d.spawn_interval_ms;
        }
        if !(self.countdown_interval_ms > 0.0) {
            self.countdown_interval_ms = d.countdown_interval_ms;
        }
        if self.max_fruits == 0 {
            self.max_fruits = d.max_fruits;
        }
        if !(self.fall_rate > 0.0) {
            self.fall_rate = d.fall_rate;
        }
        if !(self.hit_tolerance.is_finite() && self.hit_tolerance >= 0.0) {
            self.hit_tolerance = d.hit_tolerance;
        }
        if !valid_range(&self.spawn_x) {
            self.spawn_x = d.spawn_x;
        }
        if !valid_range(&self.size_px) || self.size_px.start <= 0.0 {
            self.size_px = d.size_px;
        }
        if !valid_range(&self.speed) || self.speed.start <= 0.0 {
            self.speed = d.speed;
        }
        if self.storage_key.is_empty() {
            self.storage_key = d.storage_key;
        }
        self
    }

    /// Parse a (possibly partial) JSON config; missing fields keep defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let cfg: RoundConfig = serde_json::from_str(json)?;
        Ok(cfg.validate())
    }
}

// rand's gen_range panics on empty ranges
fn valid_range(r: &Range<f64>) -> bool {
    r.start.is_finite() && r.end.is_finite() && r.start < r.end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_already_valid() {
        assert_eq!(RoundConfig::default().validate(), RoundConfig::default());
    }

    #[test]
    fn validate_restores_broken_values() {
        let cfg = RoundConfig {
            round_secs: 0,
            spawn_interval_ms: 0.0,
            max_fruits: 0,
            speed: 0.8..0.2,
            size_px: f64::NAN..10.0,
            ..RoundConfig::default()
        }
        .validate();
        assert_eq!(cfg, RoundConfig::default());
    }

    #[test]
    fn infinite_tolerance_is_rejected() {
        let cfg = RoundConfig {
            hit_tolerance: f64::INFINITY,
            ..RoundConfig::default()
        }
        .validate();
        assert_eq!(cfg.hit_tolerance, 6.0);
        let cfg = RoundConfig {
            hit_tolerance: -1.0,
            ..RoundConfig::default()
        }
        .validate();
        assert_eq!(cfg.hit_tolerance, 6.0);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = RoundConfig::from_json(r#"{"round_secs": 45, "max_fruits": 6}"#).unwrap();
        assert_eq!(cfg.round_secs, 45);
        assert_eq!(cfg.max_fruits, 6);
        assert_eq!(cfg.spawn_interval_ms, 700.0);
        assert_eq!(cfg.storage_key, HIGH_SCORE_KEY);
    }
}
