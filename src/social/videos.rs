use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::social::{Platform, SocialMetrics};
use crate::{clamp_score, log_scale, round_score};

const VOLUME_SATURATION: f64 = 50.0;
const REACH_SATURATION_LOG10: f64 = 7.0;
const RECENT_DAYS: i64 = 30;
const TOP_CHANNELS: usize = 5;

const VOLUME_WEIGHT: f64 = 0.35;
const REACH_WEIGHT: f64 = 0.35;
const RECENCY_WEIGHT: f64 = 0.15;
const COVERAGE_WEIGHT: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoKind {
    Review,
    Unboxing,
    Comparison,
    General,
}

impl VideoKind {
    pub const ALL: [VideoKind; 4] = [
        VideoKind::Review,
        VideoKind::Unboxing,
        VideoKind::Comparison,
        VideoKind::General,
    ];

    /// Search phrase appended to the keyword to find this kind of video.
    pub fn query_suffix(self) -> Option<&'static str> {
        match self {
            VideoKind::Review => Some("review"),
            VideoKind::Unboxing => Some("unboxing"),
            VideoKind::Comparison => Some("vs"),
            VideoKind::General => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub published: Option<NaiveDate>,
    pub kind: VideoKind,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl SocialMetrics {
    /// Aggregates a platform's search results into [`SocialMetrics`].
    ///
    /// Videos found by more than one query are counted once, keeping the
    /// first kind they were found under.
    pub fn from_videos(platform: Platform, videos: &[Video], today: NaiveDate) -> Self {
        let mut seen = HashSet::new();
        let unique: Vec<&Video> = videos
            .iter()
            .filter(|video| seen.insert(video.id.as_str()))
            .collect();

        if unique.is_empty() {
            return SocialMetrics::empty(platform);
        }

        let total_videos = unique.len() as u64;
        let total_views = unique
            .iter()
            .fold(0u64, |acc, video| acc.saturating_add(video.views));
        let recent_videos_30d = unique
            .iter()
            .filter(|video| {
                video
                    .published
                    .map(|date| (0..=RECENT_DAYS).contains(&(today - date).num_days()))
                    .unwrap_or(false)
            })
            .count() as u64;

        let has_kind = |kind: VideoKind| unique.iter().any(|video| video.kind == kind);
        let has_reviews = has_kind(VideoKind::Review);
        let has_unboxings = has_kind(VideoKind::Unboxing);
        let has_comparisons = has_kind(VideoKind::Comparison);

        let volume = log_scale(total_videos as f64, VOLUME_SATURATION);
        let reach = clamp_score(100.0 * ((total_views as f64) + 1.0).log10() / REACH_SATURATION_LOG10);
        let recency = 100.0 * recent_videos_30d as f64 / total_videos as f64;
        let covered = [has_reviews, has_unboxings, has_comparisons]
            .iter()
            .filter(|flag| **flag)
            .count();
        let coverage = 100.0 * covered as f64 / 3.0;

        let content_score = round_score(
            VOLUME_WEIGHT * volume
                + REACH_WEIGHT * reach
                + RECENCY_WEIGHT * recency
                + COVERAGE_WEIGHT * coverage,
        );

        SocialMetrics {
            platform,
            total_videos,
            total_views,
            recent_videos_30d,
            content_score,
            has_reviews,
            has_unboxings,
            has_comparisons,
            top_channels: top_channels(&unique),
            api_error: None,
        }
    }
}

fn top_channels(videos: &[&Video]) -> Vec<String> {
    let mut views_by_channel: HashMap<&str, u64> = HashMap::new();
    for video in videos {
        let channel = video.channel.trim();
        if channel.is_empty() {
            continue;
        }
        let entry = views_by_channel.entry(channel).or_insert(0);
        *entry = entry.saturating_add(video.views);
    }

    let mut ranked: Vec<(&str, u64)> = views_by_channel.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(TOP_CHANNELS)
        .map(|(channel, _)| channel.to_string())
        .collect()
}
