use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::metrics::{GrowthConfig, SeasonalityConfig};
use crate::scoring::{OpportunityWeights, PotentialConfig, TrendConfig};
use crate::social::SocialConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Es,
    Pt,
    Fr,
    It,
    De,
}

impl Region {
    pub const ALL: [Region; 5] = [Region::Es, Region::Pt, Region::Fr, Region::It, Region::De];

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "ES" => Some(Region::Es),
            "PT" => Some(Region::Pt),
            "FR" => Some(Region::Fr),
            "IT" => Some(Region::It),
            "DE" => Some(Region::De),
            _ => None,
        }
    }

    /// ISO 3166 code used as `geo` / `regionCode` by the providers.
    pub fn code(self) -> &'static str {
        match self {
            Region::Es => "ES",
            Region::Pt => "PT",
            Region::Fr => "FR",
            Region::It => "IT",
            Region::De => "DE",
        }
    }

    pub fn language(self) -> &'static str {
        match self {
            Region::Es => "es",
            Region::Pt => "pt",
            Region::Fr => "fr",
            Region::It => "it",
            Region::De => "de",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Region::Es => "Spain",
            Region::Pt => "Portugal",
            Region::Fr => "France",
            Region::It => "Italy",
            Region::De => "Germany",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "today 1-m")]
    LastMonth,
    #[serde(rename = "today 3-m")]
    LastQuarter,
    #[serde(rename = "today 12-m")]
    LastYear,
    #[serde(rename = "today 5-y")]
    LastFiveYears,
}

impl Timeframe {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "today 1-m" | "1m" | "1-m" => Some(Timeframe::LastMonth),
            "today 3-m" | "3m" | "3-m" => Some(Timeframe::LastQuarter),
            "today 12-m" | "12m" | "12-m" | "1y" => Some(Timeframe::LastYear),
            "today 5-y" | "5y" | "5-y" => Some(Timeframe::LastFiveYears),
            _ => None,
        }
    }

    /// Value of the Google Trends `date` parameter.
    pub fn query_value(self) -> &'static str {
        match self {
            Timeframe::LastMonth => "today 1-m",
            Timeframe::LastQuarter => "today 3-m",
            Timeframe::LastYear => "today 12-m",
            Timeframe::LastFiveYears => "today 5-y",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Timeframe::LastMonth => "Last month",
            Timeframe::LastQuarter => "Last 3 months",
            Timeframe::LastYear => "Last year",
            Timeframe::LastFiveYears => "Last 5 years",
        }
    }

    pub fn days(self) -> i64 {
        match self {
            Timeframe::LastMonth => 30,
            Timeframe::LastQuarter => 90,
            Timeframe::LastYear => 365,
            Timeframe::LastFiveYears => 5 * 365,
        }
    }
}

/// Per-analysis selection made by the user, passed explicitly into every
/// collection and scoring call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub region: Region,
    pub timeframe: Timeframe,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            region: Region::Es,
            timeframe: Timeframe::LastYear,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub serpapi_base: String,
    pub youtube_base: String,
    pub timeout_ms: u64,
    pub youtube_results_per_query: u32,
    pub news_limit: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            serpapi_base: "https://serpapi.com".to_string(),
            youtube_base: "https://www.googleapis.com/youtube/v3".to_string(),
            timeout_ms: 15_000,
            youtube_results_per_query: 10,
            news_limit: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub analysis: AnalysisConfig,
    pub growth: GrowthConfig,
    pub seasonality: SeasonalityConfig,
    pub trend: TrendConfig,
    pub potential: PotentialConfig,
    pub opportunity: OpportunityWeights,
    pub social: SocialConfig,
    pub providers: ProviderConfig,
    pub history: HistoryConfig,
}

impl ScoringConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                Self::from_toml(&contents)?
            }
            _ => ScoringConfig::default(),
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        let payload = toml::to_string_pretty(self)?;
        std::fs::write(path, payload).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(region) = env::var("TREND_REGION") {
            if let Some(value) = Region::from_str(&region) {
                self.analysis.region = value;
            }
        }
        if let Ok(timeframe) = env::var("TREND_TIMEFRAME") {
            if let Some(value) = Timeframe::from_str(&timeframe) {
                self.analysis.timeframe = value;
            }
        }
        if let Ok(limit) = env::var("HISTORY_LIMIT") {
            if let Ok(value) = limit.parse::<usize>() {
                self.history.limit = value;
            }
        }
        if let Ok(base) = env::var("SERPAPI_BASE") {
            if !base.trim().is_empty() {
                self.providers.serpapi_base = base;
            }
        }
        if let Ok(base) = env::var("YOUTUBE_API_BASE") {
            if !base.trim().is_empty() {
                self.providers.youtube_base = base;
            }
        }
        if let Ok(timeout) = env::var("PROVIDER_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.providers.timeout_ms = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("TREND_HUNTER_CONFIG")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/trend_hunter.toml")))
}
