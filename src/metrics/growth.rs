use serde::{Deserialize, Serialize};

use crate::TimeSeries;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// How many samples back the "previous" value is taken from.
    pub lookback_points: usize,
    /// Growth within `±flat_band_percent` counts as flat.
    pub flat_band_percent: f64,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            lookback_points: 4,
            flat_band_percent: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    #[default]
    Flat,
}

impl TrendDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            TrendDirection::Up => "↑",
            TrendDirection::Down => "↓",
            TrendDirection::Flat => "→",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthMetrics {
    pub current_value: f64,
    pub previous_value: f64,
    /// Percent change from `previous_value`; 0 when there is no previous value.
    pub growth_rate: f64,
    pub trend_direction: TrendDirection,
}

/// Growth of the latest sample against the one `lookback_points` earlier.
///
/// Zero samples are gaps, not measurements: the current value is the last
/// non-zero sample and the previous value walks back past zero runs.
pub fn calculate_growth_rate(series: &TimeSeries, config: &GrowthConfig) -> GrowthMetrics {
    let Some((current_idx, current)) = series.last_present() else {
        return GrowthMetrics::default();
    };
    let current_value = current.value;

    let earlier = &series.points()[..current_idx];
    let target = current_idx.saturating_sub(config.lookback_points.max(1));
    let previous_value = earlier
        .iter()
        .take(target + 1)
        .rev()
        .chain(earlier.iter().skip(target + 1))
        .map(|point| point.value)
        .find(|value| *value > 0.0)
        .unwrap_or(0.0);

    let growth_rate = if previous_value > 0.0 {
        (current_value - previous_value) / previous_value * 100.0
    } else {
        0.0
    };

    let band = config.flat_band_percent.abs();
    let trend_direction = if growth_rate > band {
        TrendDirection::Up
    } else if growth_rate < -band {
        TrendDirection::Down
    } else {
        TrendDirection::Flat
    };

    GrowthMetrics {
        current_value,
        previous_value,
        growth_rate,
        trend_direction,
    }
}
