use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::metrics::calculate_growth_rate;
use crate::scoring::grade::{weighted, ScoreResult};
use crate::{clamp_score, log_scale, mean, TimeSeries};

pub const FACTOR_SEARCH_LEVEL: &str = "search_level";
pub const FACTOR_GROWTH: &str = "growth";
pub const FACTOR_RELATED: &str = "related_queries";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    pub level_weight: f64,
    pub growth_weight: f64,
    pub related_weight: f64,
    /// Number of trailing non-zero samples averaged for the level factor.
    pub recent_window: usize,
    /// Related-query count that maps to a full related sub-score.
    pub related_saturation: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            level_weight: 0.4,
            growth_weight: 0.3,
            related_weight: 0.3,
            recent_window: 4,
            related_saturation: 25.0,
        }
    }
}

/// Blend of how much the keyword is searched now, how fast it is growing and
/// how many related searches it drags along.
pub fn calculate_trend_score(
    series: &TimeSeries,
    related_count: usize,
    config: &ScoringConfig,
) -> ScoreResult {
    let trend = &config.trend;

    let present: Vec<f64> = series.present_values().collect();
    let window = trend.recent_window.max(1);
    let recent = &present[present.len().saturating_sub(window)..];
    let level = clamp_score(mean(recent));

    let growth = calculate_growth_rate(series, &config.growth);
    let growth_sub = clamp_score(growth.growth_rate);

    let related_sub = log_scale(related_count as f64, trend.related_saturation);

    ScoreResult::from_factors([
        (FACTOR_SEARCH_LEVEL, weighted(trend.level_weight, level)),
        (FACTOR_GROWTH, weighted(trend.growth_weight, growth_sub)),
        (FACTOR_RELATED, weighted(trend.related_weight, related_sub)),
    ])
}
