use trend_virality::config::ScoringConfig;
use trend_virality::scoring::diversity::{
    creator_diversity_index, top_creator_dominance, CreatorConcentration, CreatorPost,
};
use trend_virality::scoring::drivers::{content_pattern_match, creator_factor, timing_factor};
use trend_virality::scoring::{TrendStage, VolumePoint};
use trend_virality::{
    EngagementData, GrowthData, HashtagVolumeSample, PostMetrics, PostSignals, PredictionLabel,
    InvalidMetricError, ScoringEngine, ScoringInput, ViralDrivers,
};

fn sample_input() -> ScoringInput {
    ScoringInput {
        post: PostMetrics {
            views: 10_000,
            likes: 1_500,
            comments: 200,
            shares: 50,
            ..PostMetrics::default()
        },
        hashtag: HashtagVolumeSample {
            posts_now: 20,
            posts_12h_ago: 14,
            posts_24h_ago: 10,
            posts_48h_ago: None,
        },
        ..ScoringInput::default()
    }
}

#[test]
fn score_runs_the_full_pipeline() {
    let engine = ScoringEngine::default();
    let report = engine.score(&sample_input()).unwrap();

    assert!((report.attribution.engagement_rate - 0.175).abs() < 1e-12);
    assert!((report.growth.growth_velocity_pct - 100.0).abs() < 1e-9);
    assert!((report.growth.acceleration - 50.0 / 7.0).abs() < 1e-6);

    let result = &report.result;
    assert!((result.components.growth - 100.0).abs() < 1e-9);
    assert!((result.components.quality - 60.0).abs() < 1e-9);
    assert_eq!(result.components.creator, 0.0);
    assert!((result.master_virality_score - 67.1).abs() < 1e-9);
    assert_eq!(result.prediction_label, PredictionLabel::Promising);
    assert_eq!(result.trend_stage, TrendStage::Growing);
}

#[test]
fn score_is_deterministic() {
    let engine = ScoringEngine::default();
    let input = sample_input();
    let first = engine.score(&input).unwrap();
    let second = engine.score(&input).unwrap();
    assert_eq!(first, second);
}

#[test]
fn score_prefers_supplied_hashtag_aggregates() {
    let engine = ScoringEngine::default();
    let mut input = sample_input();
    input.engagement = Some(EngagementData {
        avg_engagement_rate: 0.0,
        engagement_velocity: 0.0,
        current_volume: 20,
        avg_views: 0.0,
        total_engagement: 0.0,
    });

    let report = engine.score(&input).unwrap();
    assert_eq!(report.result.components.quality, 0.0);
    assert!((report.result.viral_coefficient - 1.0 / 3.0).abs() < 1e-12);
}

#[test]
fn score_rejects_negative_hashtag_counts() {
    let engine = ScoringEngine::default();
    let mut input = sample_input();
    input.hashtag.posts_12h_ago = -1;

    let err = engine.score(&input).unwrap_err();
    assert_eq!(err.field(), "posts_12h_ago");
}

#[test]
fn config_changes_cta_credit_and_thresholds() {
    let mut config = ScoringConfig::default();
    config.attribution.cta_multiplier = 0.3;
    config.classification.viral = 80.0;
    let engine = ScoringEngine::new(&config);

    let signals = PostSignals {
        has_call_to_action: true,
        ..PostSignals::default()
    };
    let attribution = engine
        .engagement_attribution(&sample_input().post, &signals, None)
        .unwrap();
    assert!((attribution.cta_effectiveness - 0.0525).abs() < 1e-12);

    let result = engine
        .master_virality_score(
            &GrowthData {
                growth_velocity: 50.0,
                acceleration: 10.0,
                breakout_score: 0.8,
                momentum_index: 0.5,
            },
            &EngagementData {
                avg_engagement_rate: 0.05,
                engagement_velocity: 400.0,
                current_volume: 20,
                avg_views: 25_000.0,
                total_engagement: 1.0,
            },
            &attribution,
            &ViralDrivers {
                creator_diversity: 10,
                ..ViralDrivers::default()
            },
        )
        .unwrap();
    assert!((result.master_virality_score - 72.8).abs() < 1e-9);
    assert_eq!(result.prediction_label, PredictionLabel::Promising);
}

#[test]
fn engine_momentum_matches_sample_growth() {
    let engine = ScoringEngine::default();
    let growth = engine
        .sample_growth(&sample_input().hashtag, None)
        .unwrap();
    let momentum = engine
        .momentum_index(&[
            VolumePoint {
                count: 20,
                hours_ago: 0.0,
            },
            VolumePoint {
                count: 10,
                hours_ago: 24.0,
            },
            VolumePoint {
                count: 14,
                hours_ago: 12.0,
            },
        ])
        .unwrap();
    assert_eq!(growth.momentum_index, momentum);
}

#[test]
fn timing_factor_favours_evening_posts() {
    assert_eq!(timing_factor(18).unwrap(), 0.8);
    assert_eq!(timing_factor(21).unwrap(), 0.8);
    assert_eq!(timing_factor(16).unwrap(), 0.6);
    assert_eq!(timing_factor(22).unwrap(), 0.6);
    assert_eq!(timing_factor(3).unwrap(), 0.3);
    assert!(timing_factor(24).is_err());
}

#[test]
fn content_pattern_match_counts_whole_words() {
    let score = content_pattern_match("Day 12 of building my Startup!");
    assert!((score - 3.0 / 7.0).abs() < 1e-12);
    assert_eq!(content_pattern_match("birthday party"), 0.0);
    assert_eq!(content_pattern_match(""), 0.0);
}

#[test]
fn creator_factor_prefers_mid_sized_accounts() {
    assert!((creator_factor(50_000, 0.05).unwrap() - 0.65).abs() < 1e-12);
    assert!((creator_factor(500, 0.2).unwrap() - 0.7).abs() < 1e-12);
    assert!((creator_factor(2_000_000, 0.0).unwrap() - 0.3).abs() < 1e-12);
    assert!(creator_factor(500, -0.1).is_err());
}

#[test]
fn creator_concentration_aggregates_views_per_creator() {
    let posts = vec![
        CreatorPost {
            creator: "alpha".to_string(),
            views: 100,
        },
        CreatorPost {
            creator: "beta".to_string(),
            views: 100,
        },
        CreatorPost {
            creator: "alpha".to_string(),
            views: 200,
        },
    ];
    let concentration = CreatorConcentration::from_posts(&posts).unwrap();
    assert_eq!(concentration.unique_creators, 2);
    assert!((concentration.diversity_index - 0.375).abs() < 1e-12);
    assert!((concentration.top_creator_dominance - 0.75).abs() < 1e-12);

    assert_eq!(creator_diversity_index(&[]), 0.0);
    assert_eq!(top_creator_dominance(&[0, 0]), 0.0);
    assert!((creator_diversity_index(&[5, 5, 5, 5]) - 0.75).abs() < 1e-12);

    let bad = vec![CreatorPost {
        creator: "gamma".to_string(),
        views: -3,
    }];
    assert!(CreatorConcentration::from_posts(&bad).is_err());
}

#[test]
fn creator_concentration_handles_views_near_i64_max() {
    let posts: Vec<CreatorPost> = ["alpha", "beta", "gamma"]
        .iter()
        .map(|creator| CreatorPost {
            creator: creator.to_string(),
            views: i64::MAX,
        })
        .collect();
    let concentration = CreatorConcentration::from_posts(&posts).unwrap();
    assert_eq!(concentration.unique_creators, 3);
    assert!((concentration.diversity_index - 2.0 / 3.0).abs() < 1e-9);
    assert!((concentration.top_creator_dominance - 1.0 / 3.0).abs() < 1e-9);

    let twice = vec![
        CreatorPost {
            creator: "alpha".to_string(),
            views: i64::MAX,
        };
        2
    ];
    assert!(CreatorConcentration::from_posts(&twice).is_ok());

    let thrice = vec![
        CreatorPost {
            creator: "alpha".to_string(),
            views: i64::MAX,
        };
        3
    ];
    assert_eq!(
        CreatorConcentration::from_posts(&thrice).unwrap_err(),
        InvalidMetricError::Overflow {
            field: "creator views"
        }
    );
}

#[test]
fn engine_exposes_coefficient_and_quality() {
    let engine = ScoringEngine::default();

    let coefficient = engine.viral_coefficient(0.05, 10, 20).unwrap();
    assert!((coefficient - 2.0 / 3.0).abs() < 1e-9);

    let quality = engine.content_quality(25_000.0, 0.5, 10).unwrap();
    assert!((quality - 50.0).abs() < 1e-9);

    assert_eq!(
        engine.viral_coefficient(0.05, 10, -1).unwrap_err().field(),
        "current_volume"
    );
    assert_eq!(
        engine.content_quality(-1.0, 0.5, 10).unwrap_err().field(),
        "avg_views"
    );
}
