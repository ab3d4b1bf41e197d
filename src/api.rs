use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use trend_hunter::config::{AnalysisConfig, Region, Timeframe};
use trend_hunter::history::HistoryEntry;
use trend_hunter::news::NewsArticle;
use trend_hunter::ranking::{prepare_keywords, RankedKeyword};
use trend_hunter::regions::RegionInterest;
use trend_hunter::report::{trends_explore_url, youtube_search_url};
use trend_hunter::social::{Platform, SocialMetrics};
use trend_hunter::{
    sanitize_keyword, AnalysisInput, AnalysisReport, DataPoint, RelatedQueries, TimeSeries,
};

#[derive(Debug, Deserialize)]
pub struct ApiAnalysisRequest {
    pub keyword: Option<String>,
    pub request_id: Option<String>,
    pub region: Option<String>,
    pub timeframe: Option<String>,
    pub demo: Option<bool>,
    /// Also fetch search interest for every supported region.
    pub compare_regions: Option<bool>,
    /// Pre-collected signals; skips the providers when present.
    pub input: Option<ApiInputPayload>,
}

pub struct AnalysisRequest {
    pub keyword: String,
    pub analysis: AnalysisConfig,
    pub demo: bool,
    pub compare_regions: bool,
    pub input: Option<AnalysisInput>,
}

impl ApiAnalysisRequest {
    pub fn into_request(self, defaults: &AnalysisConfig) -> Result<AnalysisRequest, String> {
        let keyword = self
            .keyword
            .as_deref()
            .and_then(sanitize_keyword)
            .ok_or_else(|| "keyword is required".to_string())?;
        let analysis = parse_analysis(self.region.as_deref(), self.timeframe.as_deref(), defaults)?;
        let input = self
            .input
            .map(|payload| payload.into_input(&keyword, &analysis));

        Ok(AnalysisRequest {
            keyword,
            analysis,
            demo: self.demo.unwrap_or(false),
            compare_regions: self.compare_regions.unwrap_or(false),
            input,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiRankRequest {
    #[serde(default)]
    pub keywords: Vec<String>,
    pub region: Option<String>,
    pub timeframe: Option<String>,
    pub demo: Option<bool>,
}

pub struct RankRequest {
    pub keywords: Vec<String>,
    pub analysis: AnalysisConfig,
    pub demo: bool,
}

impl ApiRankRequest {
    pub fn into_request(self, defaults: &AnalysisConfig) -> Result<RankRequest, String> {
        let keywords = prepare_keywords(&self.keywords);
        if keywords.is_empty() {
            return Err("at least one keyword is required".to_string());
        }
        let analysis = parse_analysis(self.region.as_deref(), self.timeframe.as_deref(), defaults)?;
        Ok(RankRequest {
            keywords,
            analysis,
            demo: self.demo.unwrap_or(false),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ApiRankResponse {
    pub demo: bool,
    pub ranking: Vec<RankedKeyword>,
    pub warnings: Vec<String>,
}

pub fn parse_analysis(
    region: Option<&str>,
    timeframe: Option<&str>,
    defaults: &AnalysisConfig,
) -> Result<AnalysisConfig, String> {
    let mut analysis = *defaults;
    if let Some(region) = region.filter(|value| !value.trim().is_empty()) {
        analysis.region =
            Region::from_str(region).ok_or_else(|| format!("invalid region: {}", region))?;
    }
    if let Some(timeframe) = timeframe.filter(|value| !value.trim().is_empty()) {
        analysis.timeframe = Timeframe::from_str(timeframe)
            .ok_or_else(|| format!("invalid timeframe: {}", timeframe))?;
    }
    Ok(analysis)
}

/// Signals supplied by the caller instead of the providers. Counts are
/// accepted as signed integers and clamped at zero.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiInputPayload {
    pub series: Vec<ApiDataPoint>,
    pub related: RelatedQueries,
    pub youtube: Option<ApiSocialMetrics>,
    pub tiktok: Option<ApiSocialMetrics>,
    pub news: Vec<NewsArticle>,
}

#[derive(Debug, Deserialize)]
pub struct ApiDataPoint {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiSocialMetrics {
    pub total_videos: Option<i64>,
    pub total_views: Option<i64>,
    pub recent_videos_30d: Option<i64>,
    pub content_score: Option<f64>,
    pub has_reviews: bool,
    pub has_unboxings: bool,
    pub has_comparisons: bool,
    pub top_channels: Vec<String>,
    pub api_error: Option<String>,
}

impl ApiInputPayload {
    pub fn into_input(self, keyword: &str, analysis: &AnalysisConfig) -> AnalysisInput {
        let points = self
            .series
            .into_iter()
            .map(|point| DataPoint {
                date: point.date,
                value: point.value,
            })
            .collect();

        AnalysisInput {
            keyword: keyword.to_string(),
            analysis: *analysis,
            series: TimeSeries::new(points),
            related: self.related,
            youtube: self
                .youtube
                .map(|metrics| metrics.into_metrics(Platform::YouTube)),
            tiktok: self
                .tiktok
                .map(|metrics| metrics.into_metrics(Platform::TikTok)),
            news: self.news,
        }
    }
}

impl ApiSocialMetrics {
    pub fn into_metrics(self, platform: Platform) -> SocialMetrics {
        let content_score = match self.content_score {
            Some(value) if value.is_finite() => value.clamp(0.0, 100.0).round() as u8,
            _ => 0,
        };
        SocialMetrics {
            platform,
            total_videos: non_negative(self.total_videos),
            total_views: non_negative(self.total_views),
            recent_videos_30d: non_negative(self.recent_videos_30d),
            content_score,
            has_reviews: self.has_reviews,
            has_unboxings: self.has_unboxings,
            has_comparisons: self.has_comparisons,
            top_channels: self.top_channels.into_iter().take(5).collect(),
            api_error: self.api_error.filter(|err| !err.trim().is_empty()),
        }
    }
}

fn non_negative(value: Option<i64>) -> u64 {
    value.unwrap_or(0).max(0) as u64
}

#[derive(Debug, Serialize)]
pub struct ApiAnalysisResponse {
    pub request_id: String,
    pub demo: bool,
    pub explore_url: String,
    pub youtube_url: String,
    pub report: AnalysisReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<RegionInterest>>,
    pub warnings: Vec<String>,
    pub history: Vec<HistoryEntry>,
}

impl ApiAnalysisResponse {
    pub fn from_report(
        report: AnalysisReport,
        warnings: Vec<String>,
        history: Vec<HistoryEntry>,
        request_id: String,
        demo: bool,
    ) -> Self {
        Self {
            request_id,
            demo,
            explore_url: trends_explore_url(&report.keyword, &report.analysis),
            youtube_url: youtube_search_url(&report.keyword),
            report,
            regions: None,
            warnings,
            history,
        }
    }
}
