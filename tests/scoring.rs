use chrono::NaiveDate;
use trend_hunter::config::ScoringConfig;
use trend_hunter::scoring::opportunity::OpportunityBand;
use trend_hunter::scoring::potential::{FACTOR_MOMENTUM, FACTOR_RISING, FACTOR_SEASONALITY};
use trend_hunter::scoring::trend::{FACTOR_GROWTH, FACTOR_RELATED, FACTOR_SEARCH_LEVEL};
use trend_hunter::scoring::{
    calculate_opportunity_level, calculate_potential_score, calculate_trend_score, Grade,
    OpportunityWeights,
};
use trend_hunter::{DataPoint, RisingQuery, TimeSeries};

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

fn rising(count: usize, breakout: bool) -> Vec<RisingQuery> {
    (0..count)
        .map(|idx| RisingQuery {
            query: format!("query {}", idx),
            extracted_value: 300.0,
            breakout,
        })
        .collect()
}

#[test]
fn grade_boundaries() {
    assert_eq!(Grade::from_score(100), Grade::A);
    assert_eq!(Grade::from_score(80), Grade::A);
    assert_eq!(Grade::from_score(79), Grade::B);
    assert_eq!(Grade::from_score(60), Grade::B);
    assert_eq!(Grade::from_score(59), Grade::C);
    assert_eq!(Grade::from_score(40), Grade::C);
    assert_eq!(Grade::from_score(39), Grade::D);
    assert_eq!(Grade::from_score(20), Grade::D);
    assert_eq!(Grade::from_score(19), Grade::F);
    assert_eq!(Grade::from_score(0), Grade::F);
}

#[test]
fn trend_score_of_empty_series_is_zero() {
    let result = calculate_trend_score(&TimeSeries::default(), 0, &ScoringConfig::default());
    assert_eq!(result.score, 0);
    assert_eq!(result.grade, Grade::F);
    assert_eq!(result.factor(FACTOR_SEARCH_LEVEL), 0.0);
    assert_eq!(result.factor(FACTOR_GROWTH), 0.0);
    assert_eq!(result.factor(FACTOR_RELATED), 0.0);
}

#[test]
fn trend_factors_sum_to_score() {
    let result = calculate_trend_score(&weekly(&[50.0; 8]), 25, &ScoringConfig::default());

    assert!((result.factor(FACTOR_SEARCH_LEVEL) - 20.0).abs() < 1e-9);
    assert_eq!(result.factor(FACTOR_GROWTH), 0.0);
    assert!((result.factor(FACTOR_RELATED) - 30.0).abs() < 1e-9);
    assert_eq!(result.score, 50);
    assert_eq!(result.grade, Grade::C);
    assert_eq!(result.score, result.raw_total().round() as u8);
}

#[test]
fn trend_growth_factor_caps_at_its_weight() {
    let result = calculate_trend_score(
        &weekly(&[1.0, 1.0, 1.0, 1.0, 100.0]),
        500,
        &ScoringConfig::default(),
    );
    assert!((result.factor(FACTOR_GROWTH) - 30.0).abs() < 1e-9);
    assert!((result.factor(FACTOR_RELATED) - 30.0).abs() < 1e-9);
    assert_eq!(result.score, 70);
    assert_eq!(result.grade, Grade::B);
}

#[test]
fn potential_without_signals_is_zero() {
    let result = calculate_potential_score(&TimeSeries::default(), &[], 0.0, false, &ScoringConfig::default());
    assert_eq!(result.score, 0);
    assert_eq!(result.grade, Grade::F);
}

#[test]
fn breakout_queries_count_double() {
    let config = ScoringConfig::default();
    let regular = calculate_potential_score(&TimeSeries::default(), &rising(20, false), 60.0, false, &config);
    let breakout = calculate_potential_score(&TimeSeries::default(), &rising(10, true), 60.0, false, &config);

    assert!((regular.factor(FACTOR_RISING) - 50.0).abs() < 1e-9);
    assert!((breakout.factor(FACTOR_RISING) - regular.factor(FACTOR_RISING)).abs() < 1e-9);
    assert!((regular.factor(FACTOR_MOMENTUM) - 30.0).abs() < 1e-9);
    assert_eq!(regular.score, 80);
    assert_eq!(regular.grade, Grade::A);
}

#[test]
fn seasonal_peak_adds_bonus() {
    let mut values = vec![20.0; 24];
    values[11] = 80.0;
    values[23] = 80.0;
    let series = monthly(2022, 1, &values);

    let result = calculate_potential_score(&series, &[], 80.0, true, &ScoringConfig::default());
    assert!((result.factor(FACTOR_SEASONALITY) - 10.0).abs() < 1e-9);
    assert_eq!(result.score, 50);
}

#[test]
fn potential_score_clamps_at_100() {
    let mut values = vec![20.0; 24];
    values[11] = 80.0;
    values[23] = 80.0;
    let series = monthly(2022, 1, &values);

    let result = calculate_potential_score(&series, &rising(40, true), 100.0, true, &ScoringConfig::default());
    assert!((result.factor(FACTOR_RISING) - 50.0).abs() < 1e-9);
    assert!((result.factor(FACTOR_MOMENTUM) - 50.0).abs() < 1e-9);
    assert!((result.raw_total() - 110.0).abs() < 1e-9);
    assert_eq!(result.score, 100);
    assert_eq!(result.grade, Grade::A);
}

#[test]
fn seasonal_trough_subtracts_penalty() {
    let mut values = vec![15.0; 24];
    // July 2022 start: indexes 5 and 17 are December.
    values[5] = 90.0;
    values[17] = 90.0;
    let series = monthly(2022, 7, &values);

    let result = calculate_potential_score(&series, &[], 15.0, true, &ScoringConfig::default());
    assert!((result.factor(FACTOR_SEASONALITY) + 5.0).abs() < 1e-9);
}

#[test]
fn non_seasonal_series_gets_no_adjustment() {
    let result = calculate_potential_score(&weekly(&[40.0; 10]), &[], 40.0, false, &ScoringConfig::default());
    assert_eq!(result.factor(FACTOR_SEASONALITY), 0.0);
}

#[test]
fn opportunity_extremes() {
    let weights = OpportunityWeights::default();

    let low = calculate_opportunity_level(0.0, 0.0, &weights);
    assert_eq!(low.level, OpportunityBand::MuyBaja);
    assert_eq!(low.combined_score, 0.0);
    assert_eq!(low.level.label(), "MUY BAJA");
    assert_eq!(low.color, "#EF4444");
    assert_eq!(low.icon, "❄️");
    assert_eq!(low.action, "Not a priority");

    let high = calculate_opportunity_level(100.0, 100.0, &weights);
    assert_eq!(high.level, OpportunityBand::MuyAlta);
    assert_eq!(high.combined_score, 100.0);
}

#[test]
fn opportunity_band_boundaries() {
    let weights = OpportunityWeights::default();
    assert_eq!(calculate_opportunity_level(80.0, 80.0, &weights).level, OpportunityBand::MuyAlta);
    assert_eq!(calculate_opportunity_level(80.0, 79.0, &weights).level, OpportunityBand::Alta);
    assert_eq!(calculate_opportunity_level(40.0, 40.0, &weights).level, OpportunityBand::Media);
    assert_eq!(calculate_opportunity_level(21.0, 19.0, &weights).level, OpportunityBand::Baja);
    assert_eq!(calculate_opportunity_level(10.0, 10.0, &weights).level, OpportunityBand::MuyBaja);
}

#[test]
fn opportunity_clamps_out_of_range_inputs() {
    let weights = OpportunityWeights::default();
    let level = calculate_opportunity_level(150.0, -20.0, &weights);
    assert_eq!(level.combined_score, 50.0);
    assert_eq!(level.level, OpportunityBand::Media);

    let nan = calculate_opportunity_level(f64::NAN, 60.0, &weights);
    assert_eq!(nan.combined_score, 30.0);
}

#[test]
fn opportunity_level_serializes_with_wire_names() {
    let level = calculate_opportunity_level(90.0, 90.0, &OpportunityWeights::default());
    let json = serde_json::to_value(&level).unwrap();
    assert_eq!(json["level"], "MUY_ALTA");
    assert_eq!(json["color"], "#7C3AED");
}
