use trend_virality::scoring::{
    breakout_score, compute_acceleration, growth_velocity_pct, trend_stage, TrendStage,
    VolumePoint, VolumeTrend,
};
use trend_virality::{
    compute_hashtag_growth, HashtagVolumeSample, InvalidMetricError, ScoringEngine,
};

#[test]
fn growth_velocity_matches_reference_hashtag() {
    let growth = compute_hashtag_growth(800, 950, 1_200, None).unwrap();

    assert!((growth.growth_velocity_pct - 50.0).abs() < 1e-9);
    assert!((growth.growth_velocity_per_hour - 50.0 / 24.0).abs() < 1e-9);
    assert_eq!(growth.recent_increment, 250);
    assert_eq!(growth.prior_increment, 150);
    assert_eq!(growth.volume_trend, VolumeTrend::Rising);
}

#[test]
fn breakout_score_compares_consecutive_increments() {
    let growth = compute_hashtag_growth(800, 950, 1_200, None).unwrap();
    let expected = ((250.0 - 150.0) / 150.0 + 1.0) / 2.0;
    assert!((growth.breakout_score - expected).abs() < 1e-9);

    // Steady growth sits in the middle of the scale.
    assert!((breakout_score(100, 200, 300) - 0.5).abs() < 1e-12);
    // A sharp slowdown bottoms out.
    assert_eq!(breakout_score(0, 1_000, 1_000), 0.0);
    // A sharp speed-up saturates.
    assert_eq!(breakout_score(100, 100, 10_000), 1.0);
}

#[test]
fn zero_base_growth_uses_emergence_value() {
    for posts_now in [0_i64, 1, 7, 5_000] {
        let growth = compute_hashtag_growth(0, 0, posts_now, None).unwrap();
        assert!(growth.growth_velocity_pct.is_finite());
        assert!(growth.growth_velocity_pct >= 0.0);
        assert_eq!(growth.growth_velocity_pct, posts_now as f64 * 100.0);
    }
}

#[test]
fn increasing_posts_now_never_lowers_scores() {
    let mut last_breakout = f64::MIN;
    let mut last_velocity = f64::MIN;
    for posts_now in (0..3_000).step_by(25) {
        let growth = compute_hashtag_growth(800, 950, posts_now, None).unwrap();
        assert!(growth.breakout_score >= last_breakout);
        assert!(growth.growth_velocity_pct >= last_velocity);
        assert!((0.0..=1.0).contains(&growth.breakout_score));
        last_breakout = growth.breakout_score;
        last_velocity = growth.growth_velocity_pct;
    }
}

#[test]
fn shrinking_hashtag_is_tolerated() {
    let growth = compute_hashtag_growth(100, 80, 50, None).unwrap();

    assert!((growth.growth_velocity_pct + 50.0).abs() < 1e-9);
    assert_eq!(growth.volume_trend, VolumeTrend::Declining);
    assert_eq!(growth.acceleration, 0.0);
    assert!((0.0..=1.0).contains(&growth.breakout_score));
}

#[test]
fn acceleration_from_three_buckets() {
    let growth = compute_hashtag_growth(800, 950, 1_200, None).unwrap();
    assert!((growth.acceleration - 40.350_877).abs() < 1e-4);
}

#[test]
fn acceleration_averages_two_older_rates_with_48h_bucket() {
    let sample = HashtagVolumeSample {
        posts_now: 1_200,
        posts_12h_ago: 950,
        posts_24h_ago: 800,
        posts_48h_ago: Some(400),
    };
    let growth = ScoringEngine::default().sample_growth(&sample, None).unwrap();

    assert!((growth.acceleration + 23.444_976).abs() < 1e-4);
    assert!((growth.growth_velocity_pct - 50.0).abs() < 1e-9);
}

#[test]
fn standalone_acceleration_is_guarded_and_capped() {
    assert!((compute_acceleration(30.0, &[20.0, 10.0]).unwrap() - 100.0).abs() < 1e-9);
    assert_eq!(compute_acceleration(30.0, &[20.0, -5.0]).unwrap(), 0.0);
    assert_eq!(compute_acceleration(30.0, &[0.0, 10.0]).unwrap(), 0.0);
    assert_eq!(compute_acceleration(5.0, &[]).unwrap(), 0.0);
    assert_eq!(compute_acceleration(1_000.0, &[1.0, 1.0]).unwrap(), 200.0);
    assert_eq!(compute_acceleration(-50.0, &[10.0]).unwrap(), -100.0);
    assert!(matches!(
        compute_acceleration(f64::INFINITY, &[10.0]),
        Err(InvalidMetricError::NonFinite { .. })
    ));
}

#[test]
fn momentum_index_weights_recent_growth() {
    let growth = compute_hashtag_growth(800, 950, 1_200, None).unwrap();
    assert!((growth.momentum_index - 0.254_139).abs() < 1e-5);

    let engine = ScoringEngine::default();
    let shuffled = [
        VolumePoint {
            count: 1_200,
            hours_ago: 0.0,
        },
        VolumePoint {
            count: 800,
            hours_ago: 24.0,
        },
        VolumePoint {
            count: 950,
            hours_ago: 12.0,
        },
    ];
    let momentum = engine.momentum_index(&shuffled).unwrap();
    assert!((momentum - growth.momentum_index).abs() < 1e-12);

    let short = &shuffled[..2];
    assert_eq!(engine.momentum_index(short).unwrap(), 0.0);
}

#[test]
fn trend_stage_thresholds() {
    assert_eq!(growth_velocity_pct(0, 0), 0.0);
    assert_eq!(trend_stage(50.0, 3), TrendStage::Emerging);
    assert_eq!(trend_stage(31.0, 10), TrendStage::Growing);
    assert_eq!(trend_stage(10.0, 25), TrendStage::Peak);
    assert_eq!(trend_stage(10.0, 10), TrendStage::Declining);
    assert_eq!(trend_stage(-5.0, 50), TrendStage::Declining);
}

#[test]
fn negative_counts_and_windows_are_rejected() {
    let err = compute_hashtag_growth(-1, 10, 20, None).unwrap_err();
    assert!(matches!(
        err,
        InvalidMetricError::Negative {
            field: "posts_24h_ago",
            ..
        }
    ));

    let err = compute_hashtag_growth(10, 10, 20, Some(-24.0)).unwrap_err();
    assert_eq!(err.field(), "growth_window_hours");

    let sample = HashtagVolumeSample {
        posts_now: 10,
        posts_12h_ago: 5,
        posts_24h_ago: 1,
        posts_48h_ago: Some(-3),
    };
    let err = ScoringEngine::default().sample_growth(&sample, None).unwrap_err();
    assert_eq!(err.field(), "posts_48h_ago");
}
