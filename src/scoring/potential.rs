use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::metrics::calculate_seasonality;
use crate::scoring::grade::{weighted, ScoreResult};
use crate::{log_scale, RisingQuery, TimeSeries};

pub const FACTOR_RISING: &str = "rising_queries";
pub const FACTOR_MOMENTUM: &str = "momentum";
pub const FACTOR_SEASONALITY: &str = "seasonality";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PotentialConfig {
    pub rising_weight: f64,
    pub momentum_weight: f64,
    /// Effective rising-query count that maps to a full rising sub-score.
    pub rising_saturation: f64,
    /// Weight of a "Breakout" query relative to a regular rising one.
    pub breakout_multiplier: f64,
    pub peak_bonus: f64,
    pub trough_penalty: f64,
}

impl Default for PotentialConfig {
    fn default() -> Self {
        Self {
            rising_weight: 0.5,
            momentum_weight: 0.5,
            rising_saturation: 20.0,
            breakout_multiplier: 2.0,
            peak_bonus: 10.0,
            trough_penalty: 5.0,
        }
    }
}

/// Forward-looking score: leading indicators (rising queries), current
/// momentum and where the calendar sits relative to the seasonal peaks.
pub fn calculate_potential_score(
    series: &TimeSeries,
    rising_queries: &[RisingQuery],
    current_value: f64,
    is_seasonal: bool,
    config: &ScoringConfig,
) -> ScoreResult {
    let potential = &config.potential;

    let effective_rising: f64 = rising_queries
        .iter()
        .filter(|query| !query.query.trim().is_empty())
        .map(|query| {
            if query.breakout {
                potential.breakout_multiplier.max(1.0)
            } else {
                1.0
            }
        })
        .sum();
    let rising_sub = log_scale(effective_rising, potential.rising_saturation);

    ScoreResult::from_factors([
        (FACTOR_RISING, weighted(potential.rising_weight, rising_sub)),
        (FACTOR_MOMENTUM, weighted(potential.momentum_weight, current_value)),
        (FACTOR_SEASONALITY, seasonal_adjustment(series, is_seasonal, config)),
    ])
}

fn seasonal_adjustment(series: &TimeSeries, is_seasonal: bool, config: &ScoringConfig) -> f64 {
    if !is_seasonal {
        return 0.0;
    }
    let Some((_, latest)) = series.last_present() else {
        return 0.0;
    };

    let seasonality = calculate_seasonality(series, &config.seasonality);
    let month = latest.date.month();
    if seasonality.is_near_peak(month) {
        config.potential.peak_bonus.abs()
    } else if seasonality.is_trough(month, config.seasonality.trough_ratio) {
        -config.potential.trough_penalty.abs()
    } else {
        0.0
    }
}
