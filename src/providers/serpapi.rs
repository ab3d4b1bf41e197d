use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use tracing::debug;

use crate::config::{AnalysisConfig, ProviderConfig};
use crate::error::ProviderError;
use crate::news::NewsArticle;
use crate::providers::{build_http_client, env_key, read_json};
use crate::{DataPoint, RelatedQueries, RisingQuery, TimeSeries, TopQuery};

const PROVIDER: &str = "SerpAPI";

/// Google Trends and Google News through SerpAPI.
#[derive(Clone)]
pub struct SerpApiClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    news_limit: usize,
}

impl SerpApiClient {
    pub fn new(api_key: impl Into<String>, config: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_http_client(PROVIDER, config.timeout_ms)?,
            api_base: config.serpapi_base.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            news_limit: config.news_limit,
        })
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Result<Self, ProviderError> {
        let config = ProviderConfig {
            serpapi_base: base_url.to_string(),
            ..ProviderConfig::default()
        };
        Self::new(api_key, &config)
    }

    /// Reads `SERPAPI_KEY`; `None` when the key is missing or blank.
    pub fn from_env(config: &ProviderConfig) -> Option<Self> {
        let api_key = env_key("SERPAPI_KEY")?;
        match Self::new(api_key, config) {
            Ok(client) => Some(client),
            Err(err) => {
                tracing::warn!(error = %err, "SerpAPI client unavailable");
                None
            }
        }
    }

    pub async fn interest_over_time(
        &self,
        keyword: &str,
        analysis: &AnalysisConfig,
    ) -> Result<TimeSeries, ProviderError> {
        let body: TrendsResponse = self
            .search(&[
                ("engine", "google_trends"),
                ("data_type", "TIMESERIES"),
                ("q", keyword),
                ("geo", analysis.region.code()),
                ("date", analysis.timeframe.query_value()),
            ])
            .await?;
        check_error(body.error)?;

        let timeline = body
            .interest_over_time
            .map(|interest| interest.timeline_data)
            .unwrap_or_default();
        let mut points = Vec::with_capacity(timeline.len());
        for entry in timeline {
            let Some(date) = parse_timestamp(&entry.timestamp) else {
                debug!(timestamp = %entry.timestamp, "skipping trends sample without a valid timestamp");
                continue;
            };
            let value = entry
                .values
                .first()
                .map(TimelineValue::numeric)
                .unwrap_or(0.0);
            points.push(DataPoint { date, value });
        }

        debug!(keyword, samples = points.len(), "fetched interest over time");
        Ok(TimeSeries::new(points))
    }

    pub async fn related_queries(
        &self,
        keyword: &str,
        analysis: &AnalysisConfig,
    ) -> Result<RelatedQueries, ProviderError> {
        let body: TrendsResponse = self
            .search(&[
                ("engine", "google_trends"),
                ("data_type", "RELATED_QUERIES"),
                ("q", keyword),
                ("geo", analysis.region.code()),
                ("date", analysis.timeframe.query_value()),
            ])
            .await?;
        check_error(body.error)?;

        let Some(related) = body.related_queries else {
            return Ok(RelatedQueries::default());
        };

        let rising = related
            .rising
            .into_iter()
            .filter(|entry| !entry.query.trim().is_empty())
            .map(|entry| {
                let breakout = entry
                    .value
                    .as_deref()
                    .map(|value| value.trim().eq_ignore_ascii_case("breakout"))
                    .unwrap_or(false);
                let extracted_value = entry
                    .extracted_value
                    .or_else(|| entry.value.as_deref().and_then(parse_percent))
                    .unwrap_or(0.0);
                RisingQuery {
                    query: entry.query,
                    extracted_value,
                    breakout,
                }
            })
            .collect();

        let top = related
            .top
            .into_iter()
            .filter(|entry| !entry.query.trim().is_empty())
            .map(|entry| TopQuery {
                value: entry
                    .extracted_value
                    .or_else(|| entry.value.as_deref().and_then(parse_percent))
                    .unwrap_or(0.0),
                query: entry.query,
            })
            .collect();

        Ok(RelatedQueries { rising, top })
    }

    pub async fn search_news(
        &self,
        keyword: &str,
        analysis: &AnalysisConfig,
    ) -> Result<Vec<NewsArticle>, ProviderError> {
        let body: NewsResponse = self
            .search(&[
                ("engine", "google_news"),
                ("q", keyword),
                ("gl", analysis.region.language()),
                ("hl", analysis.region.language()),
            ])
            .await?;
        check_error(body.error)?;

        let articles: Vec<NewsArticle> = body
            .news_results
            .into_iter()
            .filter(|item| !item.title.trim().is_empty())
            .take(self.news_limit)
            .map(|item| NewsArticle {
                title: item.title,
                source: item.source.map(|source| source.name).unwrap_or_default(),
                link: item.link,
                date: item.date,
                snippet: item.snippet,
            })
            .collect();
        debug!(keyword, articles = articles.len(), "fetched news");
        Ok(articles)
    }

    async fn search<T: serde::de::DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let response = self
            .client
            .get(format!("{}/search.json", self.api_base))
            .query(params)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|source| ProviderError::Http {
                provider: PROVIDER,
                source,
            })?;
        read_json(PROVIDER, response).await
    }
}

fn check_error(error: Option<String>) -> Result<(), ProviderError> {
    match error {
        Some(message) if !message.trim().is_empty() => Err(ProviderError::Api {
            provider: PROVIDER,
            message,
        }),
        _ => Ok(()),
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDate> {
    let seconds = raw.trim().parse::<i64>().ok()?;
    DateTime::from_timestamp(seconds, 0).map(|moment| moment.date_naive())
}

/// `"+250%"` -> `250.0`, `"1,200"` -> `1200.0`.
fn parse_percent(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.')
        .collect();
    cleaned.parse().ok()
}

#[derive(Deserialize)]
struct TrendsResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    interest_over_time: Option<InterestOverTime>,
    #[serde(default)]
    related_queries: Option<RelatedQueriesPayload>,
}

#[derive(Deserialize)]
struct InterestOverTime {
    #[serde(default)]
    timeline_data: Vec<TimelineEntry>,
}

#[derive(Deserialize)]
struct TimelineEntry {
    timestamp: String,
    #[serde(default)]
    values: Vec<TimelineValue>,
}

#[derive(Deserialize)]
struct TimelineValue {
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    extracted_value: Option<f64>,
}

impl TimelineValue {
    fn numeric(&self) -> f64 {
        self.extracted_value
            .or_else(|| self.value.as_deref().and_then(parse_percent))
            .unwrap_or(0.0)
    }
}

#[derive(Deserialize)]
struct RelatedQueriesPayload {
    #[serde(default)]
    rising: Vec<RelatedQueryEntry>,
    #[serde(default)]
    top: Vec<RelatedQueryEntry>,
}

#[derive(Deserialize)]
struct RelatedQueryEntry {
    query: String,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    extracted_value: Option<f64>,
}

#[derive(Deserialize)]
struct NewsResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    news_results: Vec<NewsItem>,
}

#[derive(Deserialize)]
struct NewsItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    source: Option<NewsSource>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
}

#[derive(Deserialize)]
struct NewsSource {
    #[serde(default)]
    name: String,
}
