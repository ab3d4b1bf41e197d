use chrono::NaiveDate;
use std::sync::{Arc, Mutex};
use trend_hunter::collector::{CollectStage, ProgressEvent, SignalCollector};
use trend_hunter::config::{AnalysisConfig, Region, ScoringConfig, Timeframe};
use trend_hunter::demo::{demo_input, demo_series};
use trend_hunter::metrics::GrowthConfig;
use trend_hunter::news::{NewsArticle, SentimentLabel};
use trend_hunter::providers::{SerpApiClient, YouTubeClient};
use trend_hunter::report::render_text;
use trend_hunter::scoring::OpportunityBand;
use trend_hunter::social::{OpportunityType, Platform, SocialMetrics};
use trend_hunter::{analyze, AnalysisInput, RelatedQueries, RisingQuery, TimeSeries};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

fn sample_input() -> AnalysisInput {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    AnalysisInput {
        keyword: "mini pc".to_string(),
        analysis: AnalysisConfig::default(),
        series: TimeSeries::from_values(start, 7, &[10.0, 12.0, 15.0, 20.0, 30.0, 40.0]),
        related: RelatedQueries {
            rising: vec![RisingQuery {
                query: "mini pc n100".to_string(),
                extracted_value: 450.0,
                breakout: false,
            }],
            top: Vec::new(),
        },
        youtube: Some(SocialMetrics {
            total_videos: 30,
            total_views: 2_000_000,
            content_score: 80,
            ..SocialMetrics::empty(Platform::YouTube)
        }),
        tiktok: None,
        news: vec![NewsArticle {
            title: "Beelink launches powerful new mini PC".to_string(),
            source: "Tech".to_string(),
            link: None,
            date: None,
            snippet: None,
        }],
    }
}

#[test]
fn analyze_links_every_stage() {
    let config = ScoringConfig::default();
    let report = analyze(&sample_input(), &config);

    assert_eq!(report.growth.current_value, 40.0);
    assert_eq!(report.growth.previous_value, 12.0);
    assert!(report.growth.growth_rate > 200.0);
    assert!(!report.seasonality.is_seasonal);

    let expected_combined =
        (f64::from(report.trend_score.score) + f64::from(report.potential_score.score)) / 2.0;
    assert!((report.opportunity.combined_score - expected_combined).abs() < 0.051);
    assert_eq!(report.opportunity.level, OpportunityBand::from_score(report.opportunity.combined_score));

    // A current search level of 40 is inside the neutral band.
    assert_eq!(report.social.social_score, 80);
    assert_eq!(report.social.opportunity_type, OpportunityType::Emerging);
    assert_eq!(report.news_sentiment.overall, SentimentLabel::Positive);
}

#[test]
fn analyze_without_data_is_neutral() {
    let input = AnalysisInput {
        keyword: "nothing".to_string(),
        ..AnalysisInput::default()
    };
    let report = analyze(&input, &ScoringConfig::default());

    assert_eq!(report.trend_score.score, 0);
    assert_eq!(report.potential_score.score, 0);
    assert_eq!(report.opportunity.level, OpportunityBand::MuyBaja);
    assert_eq!(report.social.opportunity_type, OpportunityType::None);
    assert_eq!(report.news_sentiment.total(), 0);

    let text = render_text(&report, true);
    assert!(text.contains("No search interest data"));
    assert!(text.contains("YouTube: N/A"));
}

#[test]
fn rendered_report_mentions_headline_numbers() {
    let report = analyze(&sample_input(), &ScoringConfig::default());
    let text = render_text(&report, true);

    assert!(text.contains("Analysis: mini pc (Spain · Last year)"));
    assert!(text.contains(&format!("Trend score: {}/100", report.trend_score.score)));
    assert!(text.contains(report.opportunity.level.label()));
    assert!(text.contains("TikTok: N/A"));
    assert!(text.contains("/100 (Emerging) | YouTube:"));
    assert!(text.contains("Social platforms: YouTube\n"));
    assert!(text.contains("mini pc n100 (+450%)"));
    assert!(text.contains("q=mini%20pc"));
}

#[test]
fn demo_data_is_deterministic_per_keyword() {
    let analysis = AnalysisConfig::default();
    let first = demo_input("Steam Deck", &analysis, today());
    let second = demo_input("  steam   deck ", &analysis, today());
    let other = demo_input("Rog Ally", &analysis, today());

    assert_eq!(first.series, second.series);
    assert_eq!(first.related.rising.len(), second.related.rising.len());
    assert_eq!(first.youtube, second.youtube);
    assert_ne!(first.series, other.series);

    assert_eq!(first.series.len(), 52);
    assert!(first.series.has_data());
    assert!(first.series.points().iter().all(|point| point.value <= 100.0));
}

#[test]
fn demo_series_follows_timeframe_granularity() {
    let analysis = AnalysisConfig {
        timeframe: Timeframe::LastMonth,
        ..AnalysisConfig::default()
    };
    let input = demo_input("mini pc", &analysis, today());
    assert_eq!(input.series.len(), 30);
    assert!(input.series.latest_date().unwrap() < today());
}

#[tokio::test]
async fn collector_falls_back_to_demo_without_keys() {
    let collector = SignalCollector::default();
    let mut stages = Vec::new();
    let collection = collector
        .collect_or_demo("mini pc", &AnalysisConfig::default(), today(), false, |event| {
            stages.push(event.stage)
        })
        .await;

    assert!(collection.demo);
    assert_eq!(collection.warnings.len(), 1);
    assert!(collection.input.series.has_data());
    assert_eq!(stages, vec![CollectStage::Demo, CollectStage::Done]);
}

#[tokio::test]
async fn collector_turns_provider_failures_into_warnings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/yt/search"))
        .respond_with(ResponseTemplate::new(403).set_body_string("quotaExceeded"))
        .mount(&server)
        .await;

    let serpapi = SerpApiClient::with_base_url("key", &server.uri()).unwrap();
    let youtube = YouTubeClient::with_base_url("key", &format!("{}/yt", server.uri())).unwrap();
    let collector = SignalCollector::new(Some(serpapi), Some(youtube));

    let events: Arc<Mutex<Vec<ProgressEvent>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let collection = collector
        .collect("mini pc", &AnalysisConfig::default(), today(), move |event| {
            sink.lock().unwrap().push(event)
        })
        .await;

    assert!(!collection.demo);
    assert!(collection.input.series.is_empty());
    assert!(collection.input.related.rising.is_empty());
    assert!(collection.input.news.is_empty());
    assert_eq!(collection.warnings.len(), 4);
    assert!(collection.warnings[0].starts_with("Search interest unavailable"));

    let youtube = collection.input.youtube.as_ref().expect("failed platform is still reported");
    assert!(!youtube.is_available());

    let failed: Vec<CollectStage> = events
        .lock()
        .unwrap()
        .iter()
        .filter(|event| event.failed)
        .map(|event| event.stage)
        .collect();
    assert_eq!(
        failed,
        vec![
            CollectStage::Trends,
            CollectStage::RelatedQueries,
            CollectStage::News,
            CollectStage::YouTube
        ]
    );

    let report = analyze(&collection.input, &ScoringConfig::default());
    assert_eq!(report.social.opportunity_type, OpportunityType::None);
    assert_eq!(report.opportunity.level, OpportunityBand::MuyBaja);
}

#[tokio::test]
async fn demo_region_comparison_covers_every_region() {
    let comparison = SignalCollector::default()
        .compare_regions("mini pc", Timeframe::LastYear, today(), &GrowthConfig::default(), false)
        .await;

    assert!(comparison.demo);
    assert_eq!(comparison.warnings.len(), 1);
    assert_eq!(comparison.regions.len(), Region::ALL.len());
    assert!(comparison
        .regions
        .windows(2)
        .all(|pair| pair[0].current_level >= pair[1].current_level));

    // The comparison row for the analysed region matches the demo analysis.
    let analysis = AnalysisConfig::default();
    let spain = comparison
        .regions
        .iter()
        .find(|interest| interest.region == analysis.region)
        .unwrap();
    let report = analyze(&demo_input("mini pc", &analysis, today()), &ScoringConfig::default());
    assert_eq!(spain.growth, report.growth);
    assert_eq!(demo_series("mini pc", &analysis, today()), report.series);
}

#[tokio::test]
async fn region_comparison_keeps_failed_regions() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "interest_over_time": {
            "timeline_data": [
                { "timestamp": "1704067200", "values": [{ "extracted_value": 30 }] },
                { "timestamp": "1704672000", "values": [{ "extracted_value": 60 }] }
            ]
        }
    });
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("geo", "FR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let serpapi = SerpApiClient::with_base_url("key", &server.uri()).unwrap();
    let comparison = SignalCollector::new(Some(serpapi), None)
        .compare_regions("mini pc", Timeframe::LastQuarter, today(), &GrowthConfig::default(), false)
        .await;

    assert!(!comparison.demo);
    assert_eq!(comparison.warnings.len(), Region::ALL.len() - 1);

    let first = &comparison.regions[0];
    assert_eq!(first.region, Region::Fr);
    assert_eq!(first.current_level, 60.0);
    assert!((first.growth.growth_rate - 100.0).abs() < 1e-9);
    assert!(comparison.regions[1..].iter().all(|interest| !interest.is_available()));
}
