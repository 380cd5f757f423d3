use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ScoringConfig;
use crate::error::InvalidMetricError;
use crate::scoring::attribution::{AttributionCalculator, AttributionResult};
use crate::scoring::classify::{ViralityClassifier, ViralityPrediction};
use crate::scoring::coefficient::{compute_content_quality, compute_viral_coefficient};
use crate::scoring::drivers::ViralDrivers;
use crate::scoring::growth::{GrowthCalculator, GrowthResult, VolumePoint};
use crate::scoring::master::{EngagementData, GrowthData, MasterScorer, ViralityResult};
use crate::{HashtagVolumeSample, PostMetrics, PostSignals};

/// Everything needed to score one post seen under one hashtag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringInput {
    pub post: PostMetrics,
    #[serde(default)]
    pub signals: PostSignals,
    #[serde(default)]
    pub time_period_hours: Option<f64>,
    pub hashtag: HashtagVolumeSample,
    #[serde(default)]
    pub growth_window_hours: Option<f64>,
    /// Hashtag-wide aggregates; derived from the single post when absent.
    #[serde(default)]
    pub engagement: Option<EngagementData>,
    #[serde(default)]
    pub drivers: ViralDrivers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub attribution: AttributionResult,
    pub growth: GrowthResult,
    pub result: ViralityResult,
}

/// Stateless scorer holding only the fixed weights and thresholds.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    attribution: AttributionCalculator,
    growth: GrowthCalculator,
    classifier: ViralityClassifier,
    master: MasterScorer,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

impl ScoringEngine {
    pub fn new(config: &ScoringConfig) -> Self {
        let classifier = ViralityClassifier::new(config.classification.clone());
        Self {
            attribution: AttributionCalculator::new(config.attribution.cta_multiplier),
            growth: GrowthCalculator::new(
                config.growth.default_window_hours,
                config.growth.momentum_window_hours,
            ),
            master: MasterScorer::new(config.weights.clone(), classifier.clone()),
            classifier,
        }
    }

    pub fn engagement_attribution(
        &self,
        post: &PostMetrics,
        signals: &PostSignals,
        time_period_hours: Option<f64>,
    ) -> Result<AttributionResult, InvalidMetricError> {
        self.attribution
            .attribute(post, signals, time_period_hours)
            .inspect_err(|err| warn!(%err, "rejected post metrics"))
    }

    pub fn hashtag_growth(
        &self,
        posts_24h_ago: i64,
        posts_12h_ago: i64,
        posts_now: i64,
        growth_window_hours: Option<f64>,
    ) -> Result<GrowthResult, InvalidMetricError> {
        self.growth
            .hashtag_growth(posts_24h_ago, posts_12h_ago, posts_now, growth_window_hours)
            .inspect_err(|err| warn!(%err, "rejected hashtag volumes"))
    }

    pub fn sample_growth(
        &self,
        sample: &HashtagVolumeSample,
        growth_window_hours: Option<f64>,
    ) -> Result<GrowthResult, InvalidMetricError> {
        self.growth
            .sample_growth(sample, growth_window_hours)
            .inspect_err(|err| warn!(%err, "rejected hashtag volumes"))
    }

    pub fn momentum_index(&self, points: &[VolumePoint]) -> Result<f64, InvalidMetricError> {
        self.growth.momentum_index(points)
    }

    pub fn viral_coefficient(
        &self,
        avg_engagement_rate: f64,
        unique_creator_count: i64,
        current_volume: i64,
    ) -> Result<f64, InvalidMetricError> {
        compute_viral_coefficient(avg_engagement_rate, unique_creator_count, current_volume)
    }

    pub fn content_quality(
        &self,
        avg_views: f64,
        total_engagement: f64,
        current_volume: i64,
    ) -> Result<f64, InvalidMetricError> {
        compute_content_quality(avg_views, total_engagement, current_volume)
    }

    pub fn master_virality_score(
        &self,
        growth: &GrowthData,
        engagement: &EngagementData,
        attribution: &AttributionResult,
        drivers: &ViralDrivers,
    ) -> Result<ViralityResult, InvalidMetricError> {
        let result = self
            .master
            .score(growth, engagement, attribution, drivers)
            .inspect_err(|err| warn!(%err, "rejected scoring inputs"))?;
        debug!(
            score = result.master_virality_score,
            label = result.prediction_label.label(),
            "computed master virality score"
        );
        Ok(result)
    }

    pub fn classify(&self, master_score: f64) -> Result<ViralityPrediction, InvalidMetricError> {
        self.classifier.classify(master_score)
    }

    /// Runs attribution, growth and composite scoring for one post.
    pub fn score(&self, input: &ScoringInput) -> Result<ScoreReport, InvalidMetricError> {
        let attribution =
            self.engagement_attribution(&input.post, &input.signals, input.time_period_hours)?;
        let growth = self.sample_growth(&input.hashtag, input.growth_window_hours)?;
        let engagement = input
            .engagement
            .clone()
            .unwrap_or_else(|| single_post_engagement(&input.post, &input.hashtag, &attribution));
        let result = self.master_virality_score(
            &GrowthData::from(&growth),
            &engagement,
            &attribution,
            &input.drivers,
        )?;

        Ok(ScoreReport {
            attribution,
            growth,
            result,
        })
    }
}

/// Treats the post as representative of every post under the hashtag.
fn single_post_engagement(
    post: &PostMetrics,
    hashtag: &HashtagVolumeSample,
    attribution: &AttributionResult,
) -> EngagementData {
    EngagementData {
        avg_engagement_rate: attribution.engagement_rate,
        engagement_velocity: attribution.engagement_velocity,
        current_volume: hashtag.posts_now,
        avg_views: post.views as f64,
        total_engagement: attribution.engagement_rate * hashtag.posts_now as f64,
    }
}
