//! Read-only formatting of an [`AnalysisReport`] for terminals and the
//! dashboard. Nothing here feeds back into scoring.

use std::fmt::Write;

use crate::config::AnalysisConfig;
use crate::ranking::RankedKeyword;
use crate::regions::RegionInterest;
use crate::social::{OpportunityType, SocialMetrics};
use crate::AnalysisReport;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTone {
    Strong,
    Moderate,
    Weak,
}

impl ScoreTone {
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            ScoreTone::Strong
        } else if score >= 40 {
            ScoreTone::Moderate
        } else {
            ScoreTone::Weak
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ScoreTone::Strong => "🎯",
            ScoreTone::Moderate | ScoreTone::Weak => "📊",
        }
    }
}

/// `1234` -> `1.2K`, `2_500_000` -> `2.5M`.
pub fn format_compact(value: u64) -> String {
    let value_f = value as f64;
    if value >= 1_000_000_000 {
        format!("{:.1}B", value_f / 1_000_000_000.0)
    } else if value >= 1_000_000 {
        format!("{:.1}M", value_f / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}K", value_f / 1_000.0)
    } else {
        value.to_string()
    }
}

/// Signed percentage for values already expressed in percent.
pub fn format_growth(rate: f64) -> String {
    format!("{:+.1}%", rate)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}

pub fn month_label(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_LABELS.get(idx as usize))
        .copied()
        .unwrap_or("?")
}

pub fn trends_explore_url(keyword: &str, analysis: &AnalysisConfig) -> String {
    format!(
        "https://trends.google.com/trends/explore?q={}&geo={}&date={}",
        urlencoding::encode(keyword),
        analysis.region.code(),
        urlencoding::encode(analysis.timeframe.query_value())
    )
}

pub fn youtube_search_url(keyword: &str) -> String {
    format!(
        "https://www.youtube.com/results?search_query={}",
        urlencoding::encode(keyword)
    )
}

/// One-line platform summary; absent or failed platforms read "N/A".
pub fn platform_summary(metrics: Option<&SocialMetrics>) -> String {
    match metrics {
        None => "N/A".to_string(),
        Some(metrics) if !metrics.is_available() => "N/A (provider error)".to_string(),
        Some(metrics) => {
            let mut line = format!(
                "{} videos · {} views · score {}",
                metrics.total_videos,
                format_compact(metrics.total_views),
                metrics.content_score
            );
            if metrics.recent_videos_30d > 0 {
                let _ = write!(line, " · +{} (30d)", metrics.recent_videos_30d);
            }
            line
        }
    }
}

pub fn render_text(report: &AnalysisReport, details: bool) -> String {
    let mut out = String::new();
    let analysis = &report.analysis;

    let _ = writeln!(
        out,
        "Analysis: {} ({} · {})",
        report.keyword,
        analysis.region.label(),
        analysis.timeframe.label()
    );
    let _ = writeln!(out, "Explore: {}", trends_explore_url(&report.keyword, analysis));

    if !report.series.has_data() {
        let _ = writeln!(out, "No search interest data for this keyword.");
    }

    let growth = &report.growth;
    let _ = writeln!(
        out,
        "Search interest: {} now vs {} before ({} {})",
        format_float(growth.current_value, 0),
        format_float(growth.previous_value, 0),
        format_growth(growth.growth_rate),
        growth.trend_direction.arrow()
    );

    let _ = writeln!(
        out,
        "Trend score: {}/100 ({}) | Potential score: {}/100 ({})",
        report.trend_score.score,
        report.trend_score.grade.label(),
        report.potential_score.score,
        report.potential_score.grade.label()
    );
    let _ = writeln!(
        out,
        "Opportunity: {} {} ({}) -> {}",
        report.opportunity.icon,
        report.opportunity.level.label(),
        format_float(report.opportunity.combined_score, 1),
        report.opportunity.action
    );

    let seasonality = &report.seasonality;
    if seasonality.is_seasonal {
        let peaks: Vec<&str> = seasonality.peak_periods.iter().map(|m| month_label(*m)).collect();
        let _ = writeln!(
            out,
            "Seasonality: seasonal (ratio {}), peaks in {}",
            format_float(seasonality.variance_ratio, 2),
            peaks.join(", ")
        );
    } else {
        let _ = writeln!(out, "Seasonality: no clear seasonal pattern");
    }

    let social = &report.social;
    let tone = ScoreTone::from_score(social.social_score);
    let _ = writeln!(
        out,
        "Social: {} {}/100 ({}) | YouTube: {} | TikTok: {}",
        tone.icon(),
        social.social_score,
        social.opportunity_type.label(),
        platform_summary(report.youtube.as_ref()),
        platform_summary(report.tiktok.as_ref())
    );
    if social.opportunity_type != OpportunityType::None {
        let _ = writeln!(out, "{}", social.opportunity_description);
    }

    let news = &report.news_sentiment;
    if news.total() > 0 {
        let _ = writeln!(
            out,
            "News: {} articles ({} positive, {} negative, {} neutral)",
            news.total(),
            news.positive,
            news.negative,
            news.neutral
        );
    }

    if details {
        let _ = writeln!(out, "\nTrend factors:");
        for (name, value) in &report.trend_score.factors {
            let _ = writeln!(out, "  {}: {}", name, format_float(*value, 1));
        }
        let _ = writeln!(out, "Potential factors:");
        for (name, value) in &report.potential_score.factors {
            let _ = writeln!(out, "  {}: {}", name, format_float(*value, 1));
        }
        if !report.related.rising.is_empty() {
            let _ = writeln!(out, "Rising queries:");
            for query in report.related.rising.iter().take(10) {
                let growth = if query.breakout {
                    "Breakout".to_string()
                } else {
                    format!("+{}%", format_float(query.extracted_value, 0))
                };
                let _ = writeln!(out, "  {} ({})", query.query, growth);
            }
        }
        if !social.platforms.is_empty() {
            let platforms: Vec<&str> = social.platforms.iter().map(|platform| platform.label()).collect();
            let _ = writeln!(out, "Social platforms: {}", platforms.join(" + "));
        }
        if let Some(youtube) = report.youtube.as_ref() {
            if !youtube.top_channels.is_empty() {
                let _ = writeln!(out, "Top channels: {}", youtube.top_channels.join(", "));
            }
        }
        for article in report.news.iter().take(6) {
            let _ = writeln!(out, "  - {} ({})", article.title, article.source);
        }
    }

    out
}

pub fn render_regions(regions: &[RegionInterest]) -> String {
    let mut out = String::from("Region comparison:\n");
    for interest in regions {
        if let Some(error) = &interest.error {
            let _ = writeln!(out, "  {}: N/A ({})", interest.region.label(), error);
            continue;
        }
        let _ = writeln!(
            out,
            "  {}: {} now ({} {}), average {}",
            interest.region.label(),
            format_float(interest.current_level, 0),
            format_growth(interest.growth.growth_rate),
            interest.growth.trend_direction.arrow(),
            format_float(interest.average_level, 0)
        );
    }
    out
}

pub fn render_ranking(entries: &[RankedKeyword]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{:>2}. {} | {} {} {} | trend {} | potential {} | social {} | growth {}",
            entry.rank,
            entry.keyword,
            entry.level.icon(),
            entry.level.label(),
            format_float(entry.combined_score, 1),
            entry.trend_score,
            entry.potential_score,
            entry.social_score,
            format_growth(entry.growth_rate)
        );
    }
    out
}
