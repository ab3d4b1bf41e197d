use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, info};

use crate::collector::SignalCollector;
use crate::config::{AnalysisConfig, ScoringConfig};
use crate::scoring::OpportunityBand;
use crate::{analyze, normalize_text, sanitize_keyword, AnalysisReport};

pub const MAX_RANKED_KEYWORDS: usize = 20;

/// One row of a keyword ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedKeyword {
    pub rank: usize,
    pub keyword: String,
    pub trend_score: u8,
    pub potential_score: u8,
    pub combined_score: f64,
    pub level: OpportunityBand,
    pub social_score: u8,
    pub growth_rate: f64,
}

impl RankedKeyword {
    fn from_report(report: &AnalysisReport) -> Self {
        Self {
            rank: 0,
            keyword: report.keyword.clone(),
            trend_score: report.trend_score.score,
            potential_score: report.potential_score.score,
            combined_score: report.opportunity.combined_score,
            level: report.opportunity.level,
            social_score: report.social.social_score,
            growth_rate: report.growth.growth_rate,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ranking {
    pub entries: Vec<RankedKeyword>,
    pub warnings: Vec<String>,
    pub demo: bool,
}

/// Sanitizes a keyword list, drops blanks and repeats (case- and
/// whitespace-insensitive) and keeps at most [`MAX_RANKED_KEYWORDS`].
pub fn prepare_keywords<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.iter()
        .filter_map(|keyword| sanitize_keyword(keyword.as_ref()))
        .filter(|keyword| seen.insert(normalize_text(keyword)))
        .take(MAX_RANKED_KEYWORDS)
        .collect()
}

/// Orders reports by combined opportunity score, highest first. Ties go to
/// the higher trend score, then to the keyword in alphabetical order.
pub fn rank_reports(reports: &[AnalysisReport]) -> Vec<RankedKeyword> {
    let mut entries: Vec<RankedKeyword> = reports.iter().map(RankedKeyword::from_report).collect();
    entries.sort_by(|a, b| {
        b.combined_score
            .partial_cmp(&a.combined_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.trend_score.cmp(&a.trend_score))
            .then_with(|| a.keyword.cmp(&b.keyword))
    });
    for (idx, entry) in entries.iter_mut().enumerate() {
        entry.rank = idx + 1;
    }
    entries
}

/// Collects and analyses each keyword in turn, then ranks the reports.
///
/// Keywords are expected to come from [`prepare_keywords`]. Collection
/// warnings are kept, prefixed with their keyword.
pub async fn rank_keywords(
    collector: &SignalCollector,
    keywords: &[String],
    analysis: &AnalysisConfig,
    today: NaiveDate,
    force_demo: bool,
    config: &ScoringConfig,
) -> Ranking {
    let mut reports = Vec::with_capacity(keywords.len());
    let mut warnings = Vec::new();
    let mut demo = false;

    for keyword in keywords {
        let collection = collector
            .collect_or_demo(keyword, analysis, today, force_demo, |event| {
                debug!(keyword = %keyword, stage = ?event.stage, failed = event.failed, "{}", event.message)
            })
            .await;
        demo |= collection.demo;
        warnings.extend(
            collection
                .warnings
                .into_iter()
                .map(|warning| format!("{}: {}", keyword, warning)),
        );
        reports.push(analyze(&collection.input, config));
    }

    let entries = rank_reports(&reports);
    info!(
        keywords = entries.len(),
        top = entries.first().map(|entry| entry.keyword.as_str()).unwrap_or(""),
        "ranking complete"
    );

    Ranking {
        entries,
        warnings,
        demo,
    }
}
