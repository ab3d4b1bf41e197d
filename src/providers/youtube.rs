use chrono::{DateTime, NaiveDate};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use crate::config::{AnalysisConfig, ProviderConfig};
use crate::error::ProviderError;
use crate::providers::{build_http_client, env_key, read_json};
use crate::social::{Video, VideoKind};

const PROVIDER: &str = "YouTube Data API";

#[derive(Clone)]
pub struct YouTubeClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    results_per_query: u32,
}

impl YouTubeClient {
    pub fn new(api_key: impl Into<String>, config: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_http_client(PROVIDER, config.timeout_ms)?,
            api_base: config.youtube_base.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            results_per_query: config.youtube_results_per_query.clamp(1, 50),
        })
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Result<Self, ProviderError> {
        let config = ProviderConfig {
            youtube_base: base_url.to_string(),
            ..ProviderConfig::default()
        };
        Self::new(api_key, &config)
    }

    pub fn from_env(config: &ProviderConfig) -> Option<Self> {
        let api_key = env_key("YOUTUBE_API_KEY")?;
        match Self::new(api_key, config) {
            Ok(client) => Some(client),
            Err(err) => {
                tracing::warn!(error = %err, "YouTube client unavailable");
                None
            }
        }
    }

    /// Runs one search per [`VideoKind`] and attaches view counts.
    ///
    /// Videos are returned in query order; the same id may appear under more
    /// than one kind.
    pub async fn search_brand(
        &self,
        keyword: &str,
        analysis: &AnalysisConfig,
    ) -> Result<Vec<Video>, ProviderError> {
        let mut videos = Vec::new();
        for kind in VideoKind::ALL {
            let query = match kind.query_suffix() {
                Some(suffix) => format!("{} {}", keyword, suffix),
                None => keyword.to_string(),
            };
            let found = self.search(&query, kind, analysis).await?;
            debug!(query = %query, found = found.len(), "youtube search");
            videos.extend(found);
        }

        if videos.is_empty() {
            return Ok(videos);
        }

        let mut ids: Vec<&str> = Vec::new();
        for video in &videos {
            if !ids.contains(&video.id.as_str()) {
                ids.push(video.id.as_str());
            }
        }
        let mut views: HashMap<String, u64> = HashMap::new();
        for chunk in ids.chunks(50) {
            views.extend(self.view_counts(chunk).await?);
        }

        for video in videos.iter_mut() {
            video.views = views.get(&video.id).copied().unwrap_or(0);
        }
        Ok(videos)
    }

    async fn search(
        &self,
        query: &str,
        kind: VideoKind,
        analysis: &AnalysisConfig,
    ) -> Result<Vec<Video>, ProviderError> {
        let max_results = self.results_per_query.to_string();
        let response = self
            .client
            .get(format!("{}/search", self.api_base))
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("q", query),
                ("regionCode", analysis.region.code()),
                ("relevanceLanguage", analysis.region.language()),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|source| ProviderError::Http {
                provider: PROVIDER,
                source,
            })?;
        let body: SearchResponse = read_json(PROVIDER, response).await?;

        Ok(body
            .items
            .into_iter()
            .filter_map(|item| {
                let id = item.id.video_id?;
                let snippet = item.snippet.unwrap_or_default();
                Some(Video {
                    link: Some(format!("https://www.youtube.com/watch?v={}", id)),
                    id,
                    title: snippet.title,
                    channel: snippet.channel_title,
                    views: 0,
                    published: snippet.published_at.as_deref().and_then(parse_published),
                    kind,
                    thumbnail: snippet
                        .thumbnails
                        .and_then(|thumbs| thumbs.medium.or(thumbs.default))
                        .map(|thumb| thumb.url),
                })
            })
            .collect())
    }

    async fn view_counts(&self, ids: &[&str]) -> Result<HashMap<String, u64>, ProviderError> {
        let joined = ids.join(",");
        let response = self
            .client
            .get(format!("{}/videos", self.api_base))
            .query(&[
                ("part", "statistics"),
                ("id", joined.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|source| ProviderError::Http {
                provider: PROVIDER,
                source,
            })?;
        let body: VideosResponse = read_json(PROVIDER, response).await?;

        Ok(body
            .items
            .into_iter()
            .map(|item| {
                let views = item
                    .statistics
                    .and_then(|stats| stats.view_count)
                    .and_then(|raw| raw.parse::<u64>().ok())
                    .unwrap_or(0);
                (item.id, views)
            })
            .collect())
    }
}

fn parse_published(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|moment| moment.date_naive())
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: SearchItemId,
    #[serde(default)]
    snippet: Option<Snippet>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    #[serde(default)]
    video_id: Option<String>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    channel_title: String,
    #[serde(default)]
    published_at: Option<String>,
    #[serde(default)]
    thumbnails: Option<Thumbnails>,
}

#[derive(Deserialize)]
struct Thumbnails {
    #[serde(default)]
    default: Option<Thumbnail>,
    #[serde(default)]
    medium: Option<Thumbnail>,
}

#[derive(Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Deserialize)]
struct VideoItem {
    id: String,
    #[serde(default)]
    statistics: Option<Statistics>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    #[serde(default)]
    view_count: Option<String>,
}
