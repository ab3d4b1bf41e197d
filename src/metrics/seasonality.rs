use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{mean, TimeSeries};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonalityConfig {
    /// Max monthly average over overall average above which the series is seasonal.
    pub seasonal_ratio: f64,
    /// Months above `peak_ratio` times the overall average are peaks.
    pub peak_ratio: f64,
    /// Months below `trough_ratio` times the overall average are troughs.
    pub trough_ratio: f64,
    /// Distinct months with data needed before seasonality is judged.
    pub min_months: usize,
}

impl Default for SeasonalityConfig {
    fn default() -> Self {
        Self {
            seasonal_ratio: 1.5,
            peak_ratio: 1.2,
            trough_ratio: 0.8,
            min_months: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAverage {
    pub month: u32,
    pub average: f64,
    pub samples: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonalityMetrics {
    pub is_seasonal: bool,
    /// Calendar months (1-12) whose average clears the peak threshold.
    pub peak_periods: Vec<u32>,
    pub variance_ratio: f64,
    pub overall_average: f64,
    pub monthly_averages: Vec<MonthlyAverage>,
}

impl SeasonalityMetrics {
    pub fn month_average(&self, month: u32) -> Option<f64> {
        self.monthly_averages
            .iter()
            .find(|entry| entry.month == month)
            .map(|entry| entry.average)
    }

    /// `month` is a peak or directly next to one (December wraps to January).
    pub fn is_near_peak(&self, month: u32) -> bool {
        let before = if month == 1 { 12 } else { month - 1 };
        let after = if month == 12 { 1 } else { month + 1 };
        [before, month, after]
            .iter()
            .any(|candidate| self.peak_periods.contains(candidate))
    }

    pub fn is_trough(&self, month: u32, trough_ratio: f64) -> bool {
        if self.overall_average <= 0.0 {
            return false;
        }
        self.month_average(month)
            .map(|average| average < self.overall_average * trough_ratio)
            .unwrap_or(false)
    }
}

/// Compares per-month averages against the overall average.
///
/// Series that do not cover `min_months` distinct months report
/// `is_seasonal = false` with no peaks.
pub fn calculate_seasonality(series: &TimeSeries, config: &SeasonalityConfig) -> SeasonalityMetrics {
    let mut buckets: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for point in series.points().iter().filter(|point| point.value > 0.0) {
        buckets.entry(point.date.month()).or_default().push(point.value);
    }

    let monthly_averages: Vec<MonthlyAverage> = buckets
        .iter()
        .map(|(month, values)| MonthlyAverage {
            month: *month,
            average: mean(values),
            samples: values.len(),
        })
        .collect();

    let present: Vec<f64> = series.present_values().collect();
    let overall_average = mean(&present);

    if monthly_averages.len() < config.min_months.max(1) || overall_average <= 0.0 {
        return SeasonalityMetrics {
            overall_average,
            monthly_averages,
            ..SeasonalityMetrics::default()
        };
    }

    let max_average = monthly_averages
        .iter()
        .map(|entry| entry.average)
        .fold(0.0_f64, f64::max);
    let variance_ratio = max_average / overall_average;

    let peak_periods = monthly_averages
        .iter()
        .filter(|entry| entry.average > overall_average * config.peak_ratio)
        .map(|entry| entry.month)
        .collect();

    SeasonalityMetrics {
        is_seasonal: variance_ratio > config.seasonal_ratio,
        peak_periods,
        variance_ratio,
        overall_average,
        monthly_averages,
    }
}
