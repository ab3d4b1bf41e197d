use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{AnalysisConfig, ProviderConfig, Region, Timeframe};
use crate::demo::{demo_input, demo_series};
use crate::metrics::GrowthConfig;
use crate::providers::{SerpApiClient, YouTubeClient};
use crate::regions::{rank_regions, RegionInterest};
use crate::social::{Platform, SocialMetrics};
use crate::AnalysisInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectStage {
    Start,
    Trends,
    RelatedQueries,
    YouTube,
    News,
    Demo,
    Done,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressEvent {
    pub stage: CollectStage,
    pub message: String,
    pub failed: bool,
}

impl ProgressEvent {
    fn ok(stage: CollectStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
            failed: false,
        }
    }

    fn failed(stage: CollectStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
            failed: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Collection {
    pub input: AnalysisInput,
    pub warnings: Vec<String>,
    pub demo: bool,
}

#[derive(Debug, Clone)]
pub struct RegionComparison {
    /// Every supported region, ranked by current search level.
    pub regions: Vec<RegionInterest>,
    pub warnings: Vec<String>,
    pub demo: bool,
}

/// Gathers one analysis input from the configured providers.
///
/// Calls run one after another. A failing provider never aborts the
/// collection: it adds a warning and leaves the neutral value in place.
#[derive(Clone, Default)]
pub struct SignalCollector {
    serpapi: Option<SerpApiClient>,
    youtube: Option<YouTubeClient>,
}

impl SignalCollector {
    pub fn new(serpapi: Option<SerpApiClient>, youtube: Option<YouTubeClient>) -> Self {
        Self { serpapi, youtube }
    }

    pub fn from_env(config: &ProviderConfig) -> Self {
        Self::new(SerpApiClient::from_env(config), YouTubeClient::from_env(config))
    }

    pub fn has_providers(&self) -> bool {
        self.serpapi.is_some() || self.youtube.is_some()
    }

    /// Live collection, or demo data when asked for or when no provider key
    /// is configured.
    pub async fn collect_or_demo<F>(
        &self,
        keyword: &str,
        analysis: &AnalysisConfig,
        today: NaiveDate,
        force_demo: bool,
        mut progress: F,
    ) -> Collection
    where
        F: FnMut(ProgressEvent),
    {
        if force_demo || !self.has_providers() {
            let mut warnings = Vec::new();
            if !force_demo {
                warnings.push(
                    "No provider keys configured (SERPAPI_KEY, YOUTUBE_API_KEY); showing demo data"
                        .to_string(),
                );
            }
            progress(ProgressEvent::ok(CollectStage::Demo, "Generating demo data"));
            let input = demo_input(keyword, analysis, today);
            progress(ProgressEvent::ok(CollectStage::Done, "Collection complete"));
            return Collection {
                input,
                warnings,
                demo: true,
            };
        }

        self.collect(keyword, analysis, today, progress).await
    }

    pub async fn collect<F>(
        &self,
        keyword: &str,
        analysis: &AnalysisConfig,
        today: NaiveDate,
        mut progress: F,
    ) -> Collection
    where
        F: FnMut(ProgressEvent),
    {
        let mut input = AnalysisInput {
            keyword: keyword.to_string(),
            analysis: *analysis,
            ..AnalysisInput::default()
        };
        let mut warnings = Vec::new();
        progress(ProgressEvent::ok(
            CollectStage::Start,
            format!("Analyzing '{}' in {}", keyword, analysis.region.label()),
        ));

        match &self.serpapi {
            Some(client) => {
                progress(ProgressEvent::ok(CollectStage::Trends, "Fetching search interest"));
                match client.interest_over_time(keyword, analysis).await {
                    Ok(series) => input.series = series,
                    Err(err) => {
                        warn!(keyword, error = %err, "search interest unavailable");
                        warnings.push(format!("Search interest unavailable: {}", err));
                        progress(ProgressEvent::failed(CollectStage::Trends, "Search interest failed"));
                    }
                }

                progress(ProgressEvent::ok(
                    CollectStage::RelatedQueries,
                    "Fetching related queries",
                ));
                match client.related_queries(keyword, analysis).await {
                    Ok(related) => input.related = related,
                    Err(err) => {
                        warn!(keyword, error = %err, "related queries unavailable");
                        warnings.push(format!("Related queries unavailable: {}", err));
                        progress(ProgressEvent::failed(
                            CollectStage::RelatedQueries,
                            "Related queries failed",
                        ));
                    }
                }

                progress(ProgressEvent::ok(CollectStage::News, "Fetching news"));
                match client.search_news(keyword, analysis).await {
                    Ok(news) => input.news = news,
                    Err(err) => {
                        warn!(keyword, error = %err, "news unavailable");
                        warnings.push(format!("News unavailable: {}", err));
                        progress(ProgressEvent::failed(CollectStage::News, "News failed"));
                    }
                }
            }
            None => warnings.push(
                "Google Trends not configured: set SERPAPI_KEY".to_string(),
            ),
        }

        match &self.youtube {
            Some(client) => {
                progress(ProgressEvent::ok(CollectStage::YouTube, "Searching YouTube"));
                let metrics = match client.search_brand(keyword, analysis).await {
                    Ok(videos) => SocialMetrics::from_videos(Platform::YouTube, &videos, today),
                    Err(err) => {
                        warn!(keyword, error = %err, "youtube unavailable");
                        warnings.push(format!("YouTube unavailable: {}", err));
                        progress(ProgressEvent::failed(CollectStage::YouTube, "YouTube failed"));
                        SocialMetrics::with_error(Platform::YouTube, err.to_string())
                    }
                };
                input.youtube = Some(metrics);
            }
            None => warnings.push("YouTube not configured: set YOUTUBE_API_KEY".to_string()),
        }

        info!(
            keyword,
            samples = input.series.len(),
            rising = input.related.rising.len(),
            news = input.news.len(),
            warnings = warnings.len(),
            "collection finished"
        );
        progress(ProgressEvent::ok(CollectStage::Done, "Collection complete"));

        Collection {
            input,
            warnings,
            demo: false,
        }
    }

    /// Search interest for `keyword` in every supported region over the same
    /// timeframe. Uses demo series when asked for or when Google Trends is
    /// not configured.
    pub async fn compare_regions(
        &self,
        keyword: &str,
        timeframe: Timeframe,
        today: NaiveDate,
        growth: &GrowthConfig,
        force_demo: bool,
    ) -> RegionComparison {
        let mut warnings = Vec::new();
        let client = match &self.serpapi {
            Some(client) if !force_demo => Some(client),
            Some(_) => None,
            None => {
                if !force_demo {
                    warnings.push(
                        "Google Trends not configured (SERPAPI_KEY); region comparison uses demo data"
                            .to_string(),
                    );
                }
                None
            }
        };

        let mut regions = Vec::with_capacity(Region::ALL.len());
        for region in Region::ALL {
            let analysis = AnalysisConfig { region, timeframe };
            let interest = match client {
                Some(client) => match client.interest_over_time(keyword, &analysis).await {
                    Ok(series) => RegionInterest::from_series(region, &series, growth),
                    Err(err) => {
                        warn!(keyword, region = region.code(), error = %err, "regional interest unavailable");
                        warnings.push(format!("{} search interest unavailable: {}", region.label(), err));
                        RegionInterest::unavailable(region, err.to_string())
                    }
                },
                None => RegionInterest::from_series(
                    region,
                    &demo_series(keyword, &analysis, today),
                    growth,
                ),
            };
            regions.push(interest);
        }

        info!(keyword, regions = regions.len(), warnings = warnings.len(), "region comparison finished");
        RegionComparison {
            regions: rank_regions(regions),
            warnings,
            demo: client.is_none(),
        }
    }
}
