use chrono::{Datelike, Duration, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::AnalysisConfig;
use crate::news::NewsArticle;
use crate::social::{Platform, SocialMetrics, Video, VideoKind};
use crate::{
    normalize_text, stable_hash64, AnalysisInput, DataPoint, RelatedQueries, RisingQuery,
    TimeSeries, TopQuery,
};

const QUERY_SUFFIXES: [&str; 8] = [
    "precio", "review", "oferta", "vs", "opiniones", "2025", "mini", "pro",
];
const CHANNELS: [&str; 8] = [
    "TechLab", "Gadget Hub", "Unbox Daily", "PC Corner", "Review Zone", "Mini PC World",
    "Hardware360", "La Tech Box",
];
const HEADLINES: [&str; 6] = [
    "{} launches new model with powerful upgrade",
    "{} sales hit record in Europe",
    "Is {} worth it? Our review",
    "{} shipments delayed by chip shortage",
    "{} discount deal spotted for the holidays",
    "Users report overheating issues with {}",
];
const BREAKOUT_CHANCE: f64 = 0.15;

/// Synthetic but stable analysis input for a keyword.
///
/// The same keyword, region and timeframe always produce the same input for
/// a given `today`, so demo runs can be compared and tested.
pub fn demo_input(keyword: &str, analysis: &AnalysisConfig, today: NaiveDate) -> AnalysisInput {
    let mut rng = seeded_rng(keyword, analysis);

    let series = synthetic_series(&mut rng, analysis, today);
    let related = synthetic_related(&mut rng, keyword);
    let videos = synthetic_videos(&mut rng, keyword, today);
    let youtube = SocialMetrics::from_videos(Platform::YouTube, &videos, today);
    let tiktok = synthetic_tiktok(&mut rng);
    let news = synthetic_news(&mut rng, keyword, today);

    AnalysisInput {
        keyword: keyword.to_string(),
        analysis: *analysis,
        series,
        related,
        youtube: Some(youtube),
        tiktok,
        news,
    }
}

/// The search series [`demo_input`] would produce for the same arguments.
pub fn demo_series(keyword: &str, analysis: &AnalysisConfig, today: NaiveDate) -> TimeSeries {
    let mut rng = seeded_rng(keyword, analysis);
    synthetic_series(&mut rng, analysis, today)
}

fn seeded_rng(keyword: &str, analysis: &AnalysisConfig) -> StdRng {
    let seed = stable_hash64(&format!(
        "{}|{}|{}",
        normalize_text(keyword),
        analysis.region.code(),
        analysis.timeframe.query_value()
    ));
    StdRng::seed_from_u64(seed)
}

fn synthetic_series(rng: &mut StdRng, analysis: &AnalysisConfig, today: NaiveDate) -> TimeSeries {
    let days = analysis.timeframe.days();
    let step = if days <= 90 { 1 } else { 7 };
    let samples = (days / step).max(1);
    let start = today - Duration::days(days);

    let base: f64 = rng.gen_range(20.0..70.0);
    let slope: f64 = rng.gen_range(-0.4..0.8);
    let amplitude: f64 = if rng.gen::<f64>() < 0.5 {
        rng.gen_range(10.0..30.0)
    } else {
        rng.gen_range(0.0..5.0)
    };
    let peak_month: u32 = rng.gen_range(1..=12);

    let mut points = Vec::with_capacity(samples as usize);
    for idx in 0..samples {
        let date = start + Duration::days(idx * step);
        let progress = idx as f64 / samples as f64;
        let month_offset = (date.month() as f64 - peak_month as f64) / 12.0;
        let seasonal = amplitude * (std::f64::consts::TAU * month_offset).cos();
        let noise: f64 = rng.gen_range(-4.0..4.0);
        let value = (base * (1.0 + slope * progress) + seasonal + noise).clamp(1.0, 100.0);
        points.push(DataPoint { date, value: value.round() });
    }
    TimeSeries::new(points)
}

fn synthetic_related(rng: &mut StdRng, keyword: &str) -> RelatedQueries {
    let rising_count = rng.gen_range(0..=QUERY_SUFFIXES.len());
    let rising = QUERY_SUFFIXES
        .iter()
        .take(rising_count)
        .map(|suffix| {
            let breakout = rng.gen::<f64>() < BREAKOUT_CHANCE;
            RisingQuery {
                query: format!("{} {}", keyword, suffix),
                extracted_value: if breakout {
                    5_000.0
                } else {
                    rng.gen_range(40..=900) as f64
                },
                breakout,
            }
        })
        .collect();

    let mut value = 100.0;
    let top = QUERY_SUFFIXES
        .iter()
        .rev()
        .take(5)
        .map(|suffix| {
            let query = TopQuery {
                query: format!("{} {}", keyword, suffix),
                value,
            };
            value = (value * rng.gen_range(0.4..0.9)).round();
            query
        })
        .collect();

    RelatedQueries { rising, top }
}

fn synthetic_videos(rng: &mut StdRng, keyword: &str, today: NaiveDate) -> Vec<Video> {
    let count = rng.gen_range(0..40);
    (0..count)
        .map(|idx| {
            let kind = VideoKind::ALL[rng.gen_range(0..VideoKind::ALL.len())];
            let views = 10f64.powf(rng.gen_range(2.0..6.5)) as u64;
            let age_days = rng.gen_range(0..365);
            let channel = CHANNELS[rng.gen_range(0..CHANNELS.len())];
            let title = match kind.query_suffix() {
                Some(suffix) => format!("{} {}", keyword, suffix),
                None => keyword.to_string(),
            };
            Video {
                id: format!("demo-{}", idx),
                title,
                channel: channel.to_string(),
                views,
                published: Some(today - Duration::days(age_days)),
                kind,
                link: None,
                thumbnail: None,
            }
        })
        .collect()
}

fn synthetic_tiktok(rng: &mut StdRng) -> Option<SocialMetrics> {
    if rng.gen::<f64>() < 0.4 {
        return None;
    }
    let total_videos = rng.gen_range(0..200u64);
    let total_views = total_videos * rng.gen_range(500..50_000u64);
    Some(SocialMetrics {
        total_videos,
        total_views,
        recent_videos_30d: total_videos / rng.gen_range(2..6u64),
        content_score: rng.gen_range(0..=100),
        ..SocialMetrics::empty(Platform::TikTok)
    })
}

fn synthetic_news(rng: &mut StdRng, keyword: &str, today: NaiveDate) -> Vec<NewsArticle> {
    let count = rng.gen_range(0..=HEADLINES.len());
    let offset = rng.gen_range(0..HEADLINES.len());
    (0..count)
        .map(|idx| {
            let template = HEADLINES[(offset + idx) % HEADLINES.len()];
            NewsArticle {
                title: template.replace("{}", keyword),
                source: "Demo News".to_string(),
                link: None,
                date: Some((today - Duration::days(idx as i64 * 3)).to_string()),
                snippet: None,
            }
        })
        .collect()
}
