use serde::Serialize;
use std::cmp::Ordering;

use crate::config::Region;
use crate::metrics::{calculate_growth_rate, GrowthConfig, GrowthMetrics};
use crate::{mean, TimeSeries};

/// Search interest for one keyword in one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionInterest {
    pub region: Region,
    pub current_level: f64,
    /// Mean of the non-zero samples.
    pub average_level: f64,
    pub growth: GrowthMetrics,
    pub samples: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RegionInterest {
    pub fn from_series(region: Region, series: &TimeSeries, config: &GrowthConfig) -> Self {
        let growth = calculate_growth_rate(series, config);
        let present: Vec<f64> = series.present_values().collect();
        Self {
            region,
            current_level: growth.current_value,
            average_level: mean(&present),
            growth,
            samples: series.len(),
            error: None,
        }
    }

    pub fn unavailable(region: Region, error: impl Into<String>) -> Self {
        Self {
            region,
            current_level: 0.0,
            average_level: 0.0,
            growth: GrowthMetrics::default(),
            samples: 0,
            error: Some(error.into()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.error.is_none()
    }
}

/// Highest current level first. Failed regions go last; ties keep their
/// input order.
pub fn rank_regions(mut regions: Vec<RegionInterest>) -> Vec<RegionInterest> {
    regions.sort_by(|a, b| {
        b.is_available().cmp(&a.is_available()).then_with(|| {
            b.current_level
                .partial_cmp(&a.current_level)
                .unwrap_or(Ordering::Equal)
        })
    });
    regions
}
