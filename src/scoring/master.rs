use serde::{Deserialize, Serialize};

use crate::config::MasterWeights;
use crate::error::{
    require_count, require_finite, require_non_negative, require_range, InvalidMetricError,
};
use crate::scoring::attribution::AttributionResult;
use crate::scoring::classify::{Confidence, PredictionLabel, ViralityClassifier};
use crate::scoring::coefficient::{content_quality, creator_factor, viral_coefficient};
use crate::scoring::drivers::ViralDrivers;
use crate::scoring::growth::{trend_stage, GrowthResult, TrendStage};

const GROWTH_SATURATION_PCT: f64 = 50.0;
const ACCELERATION_OFFSET: f64 = 50.0;
const CREATOR_SATURATION: f64 = 15.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthData {
    pub growth_velocity: f64,
    pub acceleration: f64,
    pub breakout_score: f64,
    pub momentum_index: f64,
}

impl From<&GrowthResult> for GrowthData {
    fn from(growth: &GrowthResult) -> Self {
        Self {
            growth_velocity: growth.growth_velocity_pct,
            acceleration: growth.acceleration,
            breakout_score: growth.breakout_score,
            momentum_index: growth.momentum_index,
        }
    }
}

/// Aggregate engagement over the posts seen under one hashtag.
///
/// `total_engagement` is the sum of per-post engagement rates, so
/// `total_engagement / current_volume` is the mean rate per post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementData {
    pub avg_engagement_rate: f64,
    pub engagement_velocity: f64,
    pub current_volume: i64,
    pub avg_views: f64,
    pub total_engagement: f64,
}

/// Each master-score input normalised to 0-100 before weighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub growth: f64,
    pub acceleration: f64,
    pub viral: f64,
    pub quality: f64,
    pub creator: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViralityResult {
    pub engagement_rate: f64,
    pub growth_velocity: f64,
    pub acceleration: f64,
    pub breakout_score: f64,
    pub momentum_index: f64,
    pub hashtag_momentum: f64,
    pub viral_coefficient: f64,
    pub content_quality_score: f64,
    pub engagement_quality: f64,
    pub viral_driver_score: f64,
    pub components: ScoreComponents,
    pub master_virality_score: f64,
    pub prediction_label: PredictionLabel,
    pub confidence: Confidence,
    pub recommended_action: String,
    pub breakout_probability: f64,
    pub trend_stage: TrendStage,
}

#[derive(Debug, Clone)]
pub struct MasterScorer {
    weights: MasterWeights,
    classifier: ViralityClassifier,
}

impl MasterScorer {
    pub fn new(weights: MasterWeights, classifier: ViralityClassifier) -> Self {
        Self {
            weights,
            classifier,
        }
    }

    pub fn score(
        &self,
        growth: &GrowthData,
        engagement: &EngagementData,
        attribution: &AttributionResult,
        drivers: &ViralDrivers,
    ) -> Result<ViralityResult, InvalidMetricError> {
        let growth_velocity = require_finite("growth_velocity", growth.growth_velocity)?;
        let acceleration = require_finite("acceleration", growth.acceleration)?;
        let breakout = require_range("breakout_score", growth.breakout_score, 0.0, 1.0)?;
        let momentum = require_finite("momentum_index", growth.momentum_index)?;

        let avg_rate = require_non_negative("avg_engagement_rate", engagement.avg_engagement_rate)?;
        let velocity = require_non_negative("engagement_velocity", engagement.engagement_velocity)?;
        let volume = require_count("current_volume", engagement.current_volume)?;
        let avg_views = require_non_negative("avg_views", engagement.avg_views)?;
        let total_engagement = require_non_negative("total_engagement", engagement.total_engagement)?;

        let engagement_rate = require_non_negative("engagement_rate", attribution.engagement_rate)?;

        let timing = require_range("timing_factor", drivers.timing_factor, 0.0, 1.0)?;
        let creators = require_count("creator_diversity", drivers.creator_diversity)?;
        let pattern = require_range("content_pattern_match", drivers.content_pattern_match, 0.0, 1.0)?;
        let combination = require_range(
            "hashtag_combination_strength",
            drivers.hashtag_combination_strength,
            0.0,
            1.0,
        )?;

        let viral_coefficient = viral_coefficient(avg_rate, creators, volume);
        let content_quality_score = content_quality(avg_views, total_engagement, volume);

        let components = ScoreComponents {
            growth: (growth_velocity / GROWTH_SATURATION_PCT * 100.0).clamp(0.0, 100.0),
            acceleration: (acceleration + ACCELERATION_OFFSET).clamp(0.0, 100.0),
            viral: viral_coefficient * 100.0,
            quality: content_quality_score,
            creator: (creators as f64 / CREATOR_SATURATION * 100.0).min(100.0),
        };
        let master_virality_score = self.weighted_total(&components);
        let prediction = self.classifier.classify(master_virality_score)?;

        Ok(ViralityResult {
            engagement_rate,
            growth_velocity,
            acceleration,
            breakout_score: breakout,
            momentum_index: momentum,
            hashtag_momentum: clamp01(breakout * 0.4 + momentum * 0.6),
            viral_coefficient,
            content_quality_score,
            engagement_quality: (avg_rate * 5.0 + (velocity / 1000.0).min(0.5)).min(1.0),
            viral_driver_score: (timing + creator_factor(creators) + pattern + combination) / 4.0,
            components,
            master_virality_score,
            prediction_label: prediction.label,
            confidence: prediction.confidence,
            recommended_action: prediction.recommended_action,
            breakout_probability: prediction.breakout_probability,
            trend_stage: trend_stage(growth_velocity, volume),
        })
    }

    fn weighted_total(&self, components: &ScoreComponents) -> f64 {
        let total = components.growth * self.weights.growth
            + components.acceleration * self.weights.acceleration
            + components.viral * self.weights.viral
            + components.quality * self.weights.quality
            + components.creator * self.weights.creator;
        round_tenth(total).clamp(0.0, 100.0)
    }
}

/// Longer-horizon composite in [0, 1]; each input is clamped to the unit
/// interval before weighting.
pub fn viral_potential_score(
    momentum: f64,
    novelty: f64,
    diversity: f64,
    engagement: f64,
) -> Result<f64, InvalidMetricError> {
    let momentum = require_finite("momentum", momentum)?;
    let novelty = require_finite("novelty", novelty)?;
    let diversity = require_finite("diversity", diversity)?;
    let engagement = require_finite("engagement", engagement)?;
    Ok(0.35 * clamp01(momentum)
        + 0.25 * clamp01(novelty)
        + 0.20 * clamp01(diversity)
        + 0.20 * clamp01(engagement))
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
