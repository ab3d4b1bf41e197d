use chrono::NaiveDate;
use trend_hunter::metrics::{
    calculate_growth_rate, calculate_seasonality, GrowthConfig, SeasonalityConfig, TrendDirection,
};
use trend_hunter::{DataPoint, TimeSeries};

fn weekly(values: &[f64]) -> TimeSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    TimeSeries::from_values(start, 7, values)
}

fn monthly(start_year: i32, start_month: u32, values: &[f64]) -> TimeSeries {
    let points = values
        .iter()
        .enumerate()
        .map(|(idx, value)| {
            let offset = start_month - 1 + idx as u32;
            DataPoint {
                date: NaiveDate::from_ymd_opt(start_year + (offset / 12) as i32, offset % 12 + 1, 1)
                    .unwrap(),
                value: *value,
            }
        })
        .collect();
    TimeSeries::new(points)
}

#[test]
fn growth_compares_against_lookback_sample() {
    let growth = calculate_growth_rate(&weekly(&[10.0, 20.0, 30.0, 40.0, 50.0]), &GrowthConfig::default());

    assert_eq!(growth.current_value, 50.0);
    assert_eq!(growth.previous_value, 10.0);
    assert!((growth.growth_rate - 400.0).abs() < 1e-9);
    assert_eq!(growth.trend_direction, TrendDirection::Up);
}

#[test]
fn growth_skips_zero_gaps() {
    let growth = calculate_growth_rate(
        &weekly(&[10.0, 0.0, 0.0, 0.0, 0.0, 20.0]),
        &GrowthConfig::default(),
    );
    assert_eq!(growth.previous_value, 10.0);
    assert!((growth.growth_rate - 100.0).abs() < 1e-9);

    let trailing = calculate_growth_rate(&weekly(&[10.0, 20.0, 0.0]), &GrowthConfig::default());
    assert_eq!(trailing.current_value, 20.0);
    assert_eq!(trailing.previous_value, 10.0);
}

#[test]
fn growth_without_previous_value_is_zero() {
    let growth = calculate_growth_rate(&weekly(&[0.0, 0.0, 0.0, 0.0, 30.0]), &GrowthConfig::default());
    assert_eq!(growth.current_value, 30.0);
    assert_eq!(growth.previous_value, 0.0);
    assert_eq!(growth.growth_rate, 0.0);
    assert_eq!(growth.trend_direction, TrendDirection::Flat);
}

#[test]
fn empty_and_all_zero_series_are_neutral() {
    for series in [TimeSeries::default(), weekly(&[0.0; 12])] {
        let growth = calculate_growth_rate(&series, &GrowthConfig::default());
        assert_eq!(growth.current_value, 0.0);
        assert_eq!(growth.growth_rate, 0.0);
        assert_eq!(growth.trend_direction, TrendDirection::Flat);

        let seasonality = calculate_seasonality(&series, &SeasonalityConfig::default());
        assert!(!seasonality.is_seasonal);
        assert!(seasonality.peak_periods.is_empty());
    }
}

#[test]
fn small_moves_stay_flat() {
    let growth = calculate_growth_rate(
        &weekly(&[50.0, 50.0, 50.0, 50.0, 52.0]),
        &GrowthConfig::default(),
    );
    assert_eq!(growth.trend_direction, TrendDirection::Flat);

    let down = calculate_growth_rate(
        &weekly(&[80.0, 70.0, 60.0, 50.0, 40.0]),
        &GrowthConfig::default(),
    );
    assert!((down.growth_rate + 50.0).abs() < 1e-9);
    assert_eq!(down.trend_direction, TrendDirection::Down);
}

#[test]
fn december_spike_is_seasonal() {
    let mut values = vec![20.0; 24];
    values[11] = 80.0;
    values[23] = 80.0;
    let seasonality = calculate_seasonality(&monthly(2022, 1, &values), &SeasonalityConfig::default());

    assert!(seasonality.is_seasonal);
    assert_eq!(seasonality.peak_periods, vec![12]);
    assert!((seasonality.overall_average - 25.0).abs() < 1e-9);
    assert!((seasonality.variance_ratio - 3.2).abs() < 1e-9);
    assert!(seasonality.is_near_peak(1));
    assert!(seasonality.is_near_peak(11));
    assert!(!seasonality.is_near_peak(6));
}

#[test]
fn flat_year_is_not_seasonal() {
    let seasonality = calculate_seasonality(&monthly(2023, 1, &[40.0; 12]), &SeasonalityConfig::default());
    assert!(!seasonality.is_seasonal);
    assert!(seasonality.peak_periods.is_empty());
    assert!((seasonality.variance_ratio - 1.0).abs() < 1e-9);
}

#[test]
fn short_history_is_not_judged() {
    let seasonality = calculate_seasonality(
        &monthly(2024, 1, &[10.0, 90.0, 10.0, 10.0, 10.0, 10.0]),
        &SeasonalityConfig::default(),
    );
    assert!(!seasonality.is_seasonal);
    assert!(seasonality.peak_periods.is_empty());
    assert_eq!(seasonality.variance_ratio, 0.0);
    assert_eq!(seasonality.monthly_averages.len(), 6);
}
