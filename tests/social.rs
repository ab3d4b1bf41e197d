use chrono::NaiveDate;
use trend_hunter::social::{
    OpportunityType, Platform, SocialMetrics, SocialScoreCalculator, Video, VideoKind,
};

fn metrics(platform: Platform, content_score: u8) -> SocialMetrics {
    SocialMetrics {
        total_videos: 12,
        total_views: 48_000,
        content_score,
        ..SocialMetrics::empty(platform)
    }
}

fn video(id: &str, channel: &str, views: u64, kind: VideoKind, published: NaiveDate) -> Video {
    Video {
        id: id.to_string(),
        title: format!("video {}", id),
        channel: channel.to_string(),
        views,
        published: Some(published),
        kind,
        link: None,
        thumbnail: None,
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn single_platform_gets_full_weight() {
    let youtube = metrics(Platform::YouTube, 80);
    let result = SocialScoreCalculator::default().calculate("mini pc", Some(&youtube), None, 20.0);

    assert_eq!(result.social_score, 80);
    assert_eq!(result.opportunity_type, OpportunityType::EarlyOpportunity);
    assert_eq!(result.platforms, vec![Platform::YouTube]);
    assert!(result.opportunity_description.contains("mini pc"));
}

#[test]
fn no_platform_data_is_none() {
    let calculator = SocialScoreCalculator::default();
    let result = calculator.calculate("mini pc", None, None, 80.0);
    assert_eq!(result.social_score, 0);
    assert_eq!(result.opportunity_type, OpportunityType::None);
    assert!(result.platforms.is_empty());

    let failed_youtube = SocialMetrics::with_error(Platform::YouTube, "quota exceeded");
    let failed_tiktok = SocialMetrics::with_error(Platform::TikTok, "timeout");
    let result = calculator.calculate("mini pc", Some(&failed_youtube), Some(&failed_tiktok), 80.0);
    assert_eq!(result.social_score, 0);
    assert_eq!(result.opportunity_type, OpportunityType::None);
}

#[test]
fn both_platforms_blend_by_weight() {
    let youtube = metrics(Platform::YouTube, 80);
    let tiktok = metrics(Platform::TikTok, 30);
    let result = SocialScoreCalculator::default().calculate("handheld", Some(&youtube), Some(&tiktok), 70.0);

    assert_eq!(result.social_score, 60);
    assert_eq!(result.opportunity_type, OpportunityType::Established);
    assert_eq!(result.platforms, vec![Platform::YouTube, Platform::TikTok]);
}

#[test]
fn failed_platform_hands_weight_to_the_other() {
    let youtube = SocialMetrics::with_error(Platform::YouTube, "403 Forbidden");
    let tiktok = metrics(Platform::TikTok, 50);
    let result = SocialScoreCalculator::default().calculate("handheld", Some(&youtube), Some(&tiktok), 50.0);

    assert_eq!(result.social_score, 50);
    assert_eq!(result.platforms, vec![Platform::TikTok]);
    assert_eq!(result.opportunity_type, OpportunityType::Emerging);
}

#[test]
fn platform_with_zero_videos_still_counts() {
    let youtube = SocialMetrics::empty(Platform::YouTube);
    let tiktok = metrics(Platform::TikTok, 100);
    let result = SocialScoreCalculator::default().calculate("handheld", Some(&youtube), Some(&tiktok), 50.0);

    assert_eq!(result.social_score, 40);
    assert_eq!(result.platforms.len(), 2);
}

#[test]
fn matrix_quadrants() {
    let calculator = SocialScoreCalculator::default();
    assert_eq!(calculator.classify(20.0, 80.0), OpportunityType::EarlyOpportunity);
    assert_eq!(calculator.classify(90.0, 10.0), OpportunityType::ContentGap);
    assert_eq!(calculator.classify(75.0, 75.0), OpportunityType::Established);
    assert_eq!(calculator.classify(10.0, 10.0), OpportunityType::LowTraction);
    assert_eq!(calculator.classify(50.0, 80.0), OpportunityType::Emerging);
    assert_eq!(calculator.classify(60.0, 39.9), OpportunityType::ContentGap);
    assert_eq!(calculator.classify(59.9, 40.0), OpportunityType::Emerging);
}

#[test]
fn opportunity_type_serializes_snake_case() {
    let json = serde_json::to_value(OpportunityType::EarlyOpportunity).unwrap();
    assert_eq!(json, "early_opportunity");
    let json = serde_json::to_value(OpportunityType::ContentGap).unwrap();
    assert_eq!(json, "content_gap");
}

#[test]
fn videos_aggregate_into_metrics() {
    let today = day(2024, 6, 30);
    let videos = vec![
        video("a", "TechLab", 120_000, VideoKind::Review, day(2024, 6, 20)),
        video("b", "Gadget Hub", 40_000, VideoKind::Unboxing, day(2024, 1, 5)),
        video("a", "TechLab", 120_000, VideoKind::General, day(2024, 6, 20)),
        video("c", "TechLab", 5_000, VideoKind::General, day(2024, 6, 29)),
    ];

    let metrics = SocialMetrics::from_videos(Platform::YouTube, &videos, today);
    assert_eq!(metrics.total_videos, 3);
    assert_eq!(metrics.total_views, 165_000);
    assert_eq!(metrics.recent_videos_30d, 2);
    assert!(metrics.has_reviews);
    assert!(metrics.has_unboxings);
    assert!(!metrics.has_comparisons);
    assert_eq!(metrics.top_channels, vec!["TechLab".to_string(), "Gadget Hub".to_string()]);
    assert!(metrics.content_score > 0 && metrics.content_score <= 100);
    assert!(metrics.is_available());
}

#[test]
fn top_channels_are_capped() {
    let today = day(2024, 6, 30);
    let videos: Vec<Video> = (0..8)
        .map(|idx| {
            video(
                &format!("v{}", idx),
                &format!("channel {}", idx),
                1_000 * (idx + 1) as u64,
                VideoKind::General,
                today,
            )
        })
        .collect();

    let metrics = SocialMetrics::from_videos(Platform::YouTube, &videos, today);
    assert_eq!(metrics.top_channels.len(), 5);
    assert_eq!(metrics.top_channels[0], "channel 7");
}

#[test]
fn more_reach_never_lowers_content_score() {
    let today = day(2024, 6, 30);
    let small = vec![video("a", "x", 100, VideoKind::Review, today)];
    let large = vec![video("a", "x", 10_000_000, VideoKind::Review, today)];

    let small = SocialMetrics::from_videos(Platform::YouTube, &small, today);
    let large = SocialMetrics::from_videos(Platform::YouTube, &large, today);
    assert!(large.content_score >= small.content_score);
}

#[test]
fn no_videos_is_an_empty_measurement() {
    let metrics = SocialMetrics::from_videos(Platform::YouTube, &[], day(2024, 6, 30));
    assert_eq!(metrics, SocialMetrics::empty(Platform::YouTube));
    assert!(metrics.is_available());
}

#[test]
fn future_dated_videos_are_not_recent() {
    let today = day(2024, 6, 30);
    let videos = vec![
        video("a", "TechLab", 1_000, VideoKind::Review, day(2030, 1, 1)),
        video("b", "TechLab", 1_000, VideoKind::Review, day(2024, 6, 1)),
        video("c", "TechLab", 1_000, VideoKind::Review, day(2024, 5, 1)),
    ];

    let metrics = SocialMetrics::from_videos(Platform::YouTube, &videos, today);
    assert_eq!(metrics.total_videos, 3);
    assert_eq!(metrics.recent_videos_30d, 1);
}
