use crate::error::{require_count, require_non_negative, InvalidMetricError};

const SWEET_SPOT_MIN: u64 = 5;
const SWEET_SPOT_MAX: u64 = 30;
const NICHE_FACTOR: f64 = 0.6;
const SATURATION_FLOOR: f64 = 0.3;
const SATURATION_SPAN: f64 = 100.0;

const CREATOR_SATURATION: f64 = 20.0;
const VIEW_SATURATION: f64 = 50_000.0;

/// How likely a hashtag's content is to keep spreading, in [0, 1].
pub fn compute_viral_coefficient(
    avg_engagement_rate: f64,
    unique_creator_count: i64,
    current_volume: i64,
) -> Result<f64, InvalidMetricError> {
    let engagement = require_non_negative("avg_engagement_rate", avg_engagement_rate)?;
    let creators = require_count("unique_creator_count", unique_creator_count)?;
    let volume = require_count("current_volume", current_volume)?;
    Ok(viral_coefficient(engagement, creators, volume))
}

/// Content quality on a 0-100 scale from average reach and engagement per post.
pub fn compute_content_quality(
    avg_views: f64,
    total_engagement: f64,
    current_volume: i64,
) -> Result<f64, InvalidMetricError> {
    let views = require_non_negative("avg_views", avg_views)?;
    let engagement = require_non_negative("total_engagement", total_engagement)?;
    let volume = require_count("current_volume", current_volume)?;
    Ok(content_quality(views, engagement, volume))
}

pub(crate) fn viral_coefficient(avg_engagement_rate: f64, creators: u64, volume: u64) -> f64 {
    let engagement_factor = (avg_engagement_rate * 10.0).min(1.0);
    let creator_factor = creator_factor(creators);
    (engagement_factor + creator_factor + volume_factor(volume)) / 3.0
}

pub(crate) fn creator_factor(creators: u64) -> f64 {
    (creators as f64 / CREATOR_SATURATION).min(1.0)
}

/// 5-30 posts is the sweet spot; fewer is too niche, more decays towards 0.3.
pub fn volume_factor(volume: u64) -> f64 {
    if (SWEET_SPOT_MIN..=SWEET_SPOT_MAX).contains(&volume) {
        1.0
    } else if volume < SWEET_SPOT_MIN {
        NICHE_FACTOR
    } else {
        let excess = (volume - SWEET_SPOT_MAX) as f64;
        (1.0 - excess / SATURATION_SPAN).max(SATURATION_FLOOR)
    }
}

pub(crate) fn content_quality(avg_views: f64, total_engagement: f64, volume: u64) -> f64 {
    let view_score = (avg_views / VIEW_SATURATION).min(1.0);
    // An empty hashtag contributes nothing on the engagement side.
    let engagement_score = if volume == 0 {
        0.0
    } else {
        (total_engagement / volume as f64 * 10.0).min(1.0)
    };
    (view_score + engagement_score) / 2.0 * 100.0
}
