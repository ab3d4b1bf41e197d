pub mod videos;

use serde::{Deserialize, Serialize};

use crate::{clamp_score, round_score};

pub use videos::{Video, VideoKind};

pub const DEFAULT_YOUTUBE_WEIGHT: f64 = 0.6;
pub const DEFAULT_TIKTOK_WEIGHT: f64 = 0.4;
/// Score separating "low" from "high" on both the trends and social axes.
pub const DEFAULT_SPLIT: f64 = 50.0;
/// Half-width of the band around the split that counts as neither low nor high.
pub const DEFAULT_NEUTRAL_BAND: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    YouTube,
    TikTok,
}

impl Platform {
    pub fn label(self) -> &'static str {
        match self {
            Platform::YouTube => "YouTube",
            Platform::TikTok => "TikTok",
        }
    }
}

/// Engagement signals for one video platform.
///
/// For TikTok `content_score` carries the platform's viral score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialMetrics {
    pub platform: Platform,
    #[serde(default)]
    pub total_videos: u64,
    #[serde(default)]
    pub total_views: u64,
    #[serde(default)]
    pub recent_videos_30d: u64,
    #[serde(default)]
    pub content_score: u8,
    #[serde(default)]
    pub has_reviews: bool,
    #[serde(default)]
    pub has_unboxings: bool,
    #[serde(default)]
    pub has_comparisons: bool,
    #[serde(default)]
    pub top_channels: Vec<String>,
    #[serde(default)]
    pub api_error: Option<String>,
}

impl SocialMetrics {
    pub fn empty(platform: Platform) -> Self {
        Self {
            platform,
            total_videos: 0,
            total_views: 0,
            recent_videos_30d: 0,
            content_score: 0,
            has_reviews: false,
            has_unboxings: false,
            has_comparisons: false,
            top_channels: Vec::new(),
            api_error: None,
        }
    }

    pub fn with_error(platform: Platform, error: impl Into<String>) -> Self {
        Self {
            api_error: Some(error.into()),
            ..Self::empty(platform)
        }
    }

    /// Metrics that came back without a provider error count as a measurement,
    /// even when no videos were found.
    pub fn is_available(&self) -> bool {
        self.api_error.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityType {
    EarlyOpportunity,
    ContentGap,
    Established,
    Emerging,
    LowTraction,
    None,
}

impl OpportunityType {
    pub fn label(self) -> &'static str {
        match self {
            OpportunityType::EarlyOpportunity => "Early opportunity",
            OpportunityType::ContentGap => "Content gap",
            OpportunityType::Established => "Established",
            OpportunityType::Emerging => "Emerging",
            OpportunityType::LowTraction => "Low traction",
            OpportunityType::None => "No data",
        }
    }

    pub fn describe(self, keyword: &str) -> String {
        match self {
            OpportunityType::EarlyOpportunity => format!(
                "🚀 Early opportunity: creators already talk about '{}' but search demand has not caught up. Position before the boom.",
                keyword
            ),
            OpportunityType::ContentGap => format!(
                "📝 Content gap: people search for '{}' but there is little video content. Reviews and guides will stand out.",
                keyword
            ),
            OpportunityType::Established => format!(
                "📈 Established: '{}' is strong in search and in social content. Compete on price and availability.",
                keyword
            ),
            OpportunityType::Emerging => format!(
                "🌱 Emerging: '{}' shows mixed search and social signals. Keep it on the watch list.",
                keyword
            ),
            OpportunityType::LowTraction => format!(
                "📉 Low traction: '{}' has little search interest and little social content. Look at other markets.",
                keyword
            ),
            OpportunityType::None => format!("No social media data available for '{}'.", keyword),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocialScoreResult {
    pub social_score: u8,
    pub opportunity_type: OpportunityType,
    pub opportunity_description: String,
    /// Platforms that contributed to the score.
    pub platforms: Vec<Platform>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    pub youtube_weight: f64,
    pub tiktok_weight: f64,
    pub split: f64,
    pub neutral_band: f64,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            youtube_weight: DEFAULT_YOUTUBE_WEIGHT,
            tiktok_weight: DEFAULT_TIKTOK_WEIGHT,
            split: DEFAULT_SPLIT,
            neutral_band: DEFAULT_NEUTRAL_BAND,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignalLevel {
    Low,
    Mid,
    High,
}

#[derive(Debug, Clone)]
pub struct SocialScoreCalculator {
    config: SocialConfig,
}

impl SocialScoreCalculator {
    pub fn new(config: SocialConfig) -> Self {
        Self { config }
    }

    /// Blends the available platforms into one score and places
    /// (trends, social) in the opportunity matrix.
    ///
    /// A missing or failed platform hands its weight to the others instead
    /// of counting as a zero.
    pub fn calculate(
        &self,
        keyword: &str,
        youtube: Option<&SocialMetrics>,
        tiktok: Option<&SocialMetrics>,
        trends_score: f64,
    ) -> SocialScoreResult {
        let present: Vec<(&SocialMetrics, f64)> = [
            (youtube, self.config.youtube_weight),
            (tiktok, self.config.tiktok_weight),
        ]
        .into_iter()
        .filter_map(|(metrics, weight)| {
            metrics
                .filter(|metrics| metrics.is_available())
                .map(|metrics| (metrics, weight.max(0.0)))
        })
        .collect();

        if present.is_empty() {
            return SocialScoreResult {
                social_score: 0,
                opportunity_type: OpportunityType::None,
                opportunity_description: OpportunityType::None.describe(keyword),
                platforms: Vec::new(),
            };
        }

        let total_weight: f64 = present.iter().map(|(_, weight)| weight).sum();
        let blended = if total_weight > 0.0 {
            present
                .iter()
                .map(|(metrics, weight)| platform_score(metrics) * weight)
                .sum::<f64>()
                / total_weight
        } else {
            present
                .iter()
                .map(|(metrics, _)| platform_score(metrics))
                .sum::<f64>()
                / present.len() as f64
        };
        let social_score = round_score(blended);

        let opportunity_type = self.classify(trends_score, f64::from(social_score));
        SocialScoreResult {
            social_score,
            opportunity_type,
            opportunity_description: opportunity_type.describe(keyword),
            platforms: present.iter().map(|(metrics, _)| metrics.platform).collect(),
        }
    }

    pub fn classify(&self, trends_score: f64, social_score: f64) -> OpportunityType {
        match (self.level(trends_score), self.level(social_score)) {
            (SignalLevel::Low, SignalLevel::High) => OpportunityType::EarlyOpportunity,
            (SignalLevel::High, SignalLevel::Low) => OpportunityType::ContentGap,
            (SignalLevel::High, SignalLevel::High) => OpportunityType::Established,
            (SignalLevel::Low, SignalLevel::Low) => OpportunityType::LowTraction,
            _ => OpportunityType::Emerging,
        }
    }

    fn level(&self, value: f64) -> SignalLevel {
        let value = clamp_score(value);
        let band = self.config.neutral_band.abs();
        if value >= self.config.split + band {
            SignalLevel::High
        } else if value < self.config.split - band {
            SignalLevel::Low
        } else {
            SignalLevel::Mid
        }
    }
}

impl Default for SocialScoreCalculator {
    fn default() -> Self {
        Self::new(SocialConfig::default())
    }
}

fn platform_score(metrics: &SocialMetrics) -> f64 {
    clamp_score(f64::from(metrics.content_score))
}
