pub mod collector;
pub mod config;
pub mod demo;
pub mod error;
pub mod history;
pub mod metrics;
pub mod news;
pub mod providers;
pub mod ranking;
pub mod regions;
pub mod report;
pub mod scoring;
pub mod social;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, ScoringConfig};
use crate::metrics::{calculate_growth_rate, calculate_seasonality, GrowthMetrics, SeasonalityMetrics};
use crate::news::{analyze_news_sentiment, NewsArticle, NewsSentiment};
use crate::scoring::{
    calculate_opportunity_level, calculate_potential_score, calculate_trend_score, OpportunityLevel,
    ScoreResult,
};
use crate::social::{SocialMetrics, SocialScoreCalculator, SocialScoreResult};

pub const MAX_KEYWORD_CHARS: usize = 200;

/// One search-interest sample. `value` is on the provider's relative 0-100
/// scale where 0 means "no data".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Search-interest samples ordered by date, values clamped to `[0, 100]`.
///
/// This is the only series type the extractors and calculators accept, so
/// every provider payload has to pass through [`TimeSeries::new`] first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<DataPoint>", into = "Vec<DataPoint>")]
pub struct TimeSeries {
    points: Vec<DataPoint>,
}

impl TimeSeries {
    pub fn new(mut points: Vec<DataPoint>) -> Self {
        for point in points.iter_mut() {
            point.value = sanitize_sample(point.value);
        }
        points.sort_by_key(|point| point.date);
        Self { points }
    }

    /// Evenly spaced samples starting at `start`.
    pub fn from_values(start: NaiveDate, step_days: i64, values: &[f64]) -> Self {
        let points = values
            .iter()
            .enumerate()
            .map(|(idx, value)| DataPoint {
                date: start + Duration::days(step_days * idx as i64),
                value: *value,
            })
            .collect();
        Self::new(points)
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when at least one sample carries data.
    pub fn has_data(&self) -> bool {
        self.points.iter().any(|point| point.value > 0.0)
    }

    /// Index and sample of the last non-zero entry.
    pub fn last_present(&self) -> Option<(usize, &DataPoint)> {
        self.points
            .iter()
            .enumerate()
            .rev()
            .find(|(_, point)| point.value > 0.0)
    }

    pub fn present_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points
            .iter()
            .map(|point| point.value)
            .filter(|value| *value > 0.0)
    }

    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|point| point.date)
    }
}

impl From<Vec<DataPoint>> for TimeSeries {
    fn from(points: Vec<DataPoint>) -> Self {
        Self::new(points)
    }
}

impl From<TimeSeries> for Vec<DataPoint> {
    fn from(series: TimeSeries) -> Self {
        series.points
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RisingQuery {
    pub query: String,
    /// Growth percentage reported by the provider (e.g. 250 for "+250%").
    #[serde(default)]
    pub extracted_value: f64,
    /// Provider flagged the query as "Breakout" (growth above 5000%).
    #[serde(default)]
    pub breakout: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopQuery {
    pub query: String,
    #[serde(default)]
    pub value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelatedQueries {
    #[serde(default)]
    pub rising: Vec<RisingQuery>,
    #[serde(default)]
    pub top: Vec<TopQuery>,
}

/// Everything one analysis needs, already validated at the boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub keyword: String,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub series: TimeSeries,
    #[serde(default)]
    pub related: RelatedQueries,
    #[serde(default)]
    pub youtube: Option<SocialMetrics>,
    #[serde(default)]
    pub tiktok: Option<SocialMetrics>,
    #[serde(default)]
    pub news: Vec<NewsArticle>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub keyword: String,
    pub analysis: AnalysisConfig,
    pub series: TimeSeries,
    pub growth: GrowthMetrics,
    pub seasonality: SeasonalityMetrics,
    pub trend_score: ScoreResult,
    pub potential_score: ScoreResult,
    pub opportunity: OpportunityLevel,
    pub social: SocialScoreResult,
    pub youtube: Option<SocialMetrics>,
    pub tiktok: Option<SocialMetrics>,
    pub related: RelatedQueries,
    pub news: Vec<NewsArticle>,
    pub news_sentiment: NewsSentiment,
}

/// Runs every extractor and calculator over one analysis input.
pub fn analyze(input: &AnalysisInput, config: &ScoringConfig) -> AnalysisReport {
    let growth = calculate_growth_rate(&input.series, &config.growth);
    let seasonality = calculate_seasonality(&input.series, &config.seasonality);

    let trend_score = calculate_trend_score(&input.series, input.related.rising.len(), config);
    let potential_score = calculate_potential_score(
        &input.series,
        &input.related.rising,
        growth.current_value,
        seasonality.is_seasonal,
        config,
    );
    let opportunity = calculate_opportunity_level(
        f64::from(trend_score.score),
        f64::from(potential_score.score),
        &config.opportunity,
    );

    let social = SocialScoreCalculator::new(config.social.clone()).calculate(
        &input.keyword,
        input.youtube.as_ref(),
        input.tiktok.as_ref(),
        growth.current_value,
    );

    let news_sentiment = analyze_news_sentiment(&input.news);

    AnalysisReport {
        keyword: input.keyword.clone(),
        analysis: input.analysis,
        series: input.series.clone(),
        growth,
        seasonality,
        trend_score,
        potential_score,
        opportunity,
        social,
        youtube: input.youtube.clone(),
        tiktok: input.tiktok.clone(),
        related: input.related.clone(),
        news: input.news.clone(),
        news_sentiment,
    }
}

/// Normalizes a user supplied keyword before it reaches a provider query or
/// the history list. Returns `None` when nothing usable is left.
pub fn sanitize_keyword(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|ch| !ch.is_control())
        .filter(|ch| !matches!(ch, '<' | '>' | '"' | '\'' | '`' | '{' | '}' | '\\'))
        .collect();
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    let truncated: String = collapsed.chars().take(MAX_KEYWORD_CHARS).collect();
    let trimmed = truncated.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub(crate) fn sanitize_sample(value: f64) -> f64 {
    if value.is_nan() || value <= 0.0 {
        return 0.0;
    }
    value.min(100.0)
}

pub(crate) fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(100.0)
}

pub(crate) fn round_score(value: f64) -> u8 {
    clamp_score(value).round() as u8
}

/// Maps a count onto `[0, 100]` with diminishing returns, reaching 100 at
/// `saturation`.
pub(crate) fn log_scale(count: f64, saturation: f64) -> f64 {
    if count <= 0.0 || saturation <= 0.0 {
        return 0.0;
    }
    clamp_score(100.0 * (count + 1.0).ln() / (saturation + 1.0).ln())
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn normalize_text(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn stable_hash64(value: &str) -> u64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}
