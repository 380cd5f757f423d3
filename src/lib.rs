pub mod config;
pub mod error;
pub mod scoring;

use serde::{Deserialize, Serialize};

pub use crate::error::InvalidMetricError;
pub use crate::scoring::{
    compute_acceleration, compute_content_quality, compute_viral_coefficient, AttributionResult,
    Confidence, EngagementData, GrowthData, GrowthResult, PredictionLabel, ScoreReport,
    ScoringEngine, ScoringInput, ViralDrivers, ViralityPrediction, ViralityResult,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Educational,
    Entertainment,
    #[default]
    Other,
}

impl ContentType {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "educational" | "education" | "tutorial" => Some(ContentType::Educational),
            "entertainment" | "fun" => Some(ContentType::Entertainment),
            "other" | "none" => Some(ContentType::Other),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContentType::Educational => "educational",
            ContentType::Entertainment => "entertainment",
            ContentType::Other => "other",
        }
    }
}

/// One observed post at one point in time.
///
/// Counts are signed because upstream scrapers occasionally report `-1` for
/// unknown values; scoring rejects anything negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostMetrics {
    pub views: i64,
    pub likes: i64,
    pub comments: i64,
    pub shares: i64,
    #[serde(default)]
    pub saves: i64,
    #[serde(default)]
    pub description_text: String,
    #[serde(default)]
    pub content_type: ContentType,
}

/// Content signals derived upstream from the post's text and video.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostSignals {
    /// In [-1, 1].
    pub sentiment_score: f64,
    pub has_call_to_action: bool,
    /// In [0, 1].
    pub hook_strength: f64,
}

/// Cumulative hashtag post counts relative to now.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HashtagVolumeSample {
    pub posts_now: i64,
    pub posts_12h_ago: i64,
    pub posts_24h_ago: i64,
    #[serde(default)]
    pub posts_48h_ago: Option<i64>,
}

pub fn compute_engagement_attribution(
    post: &PostMetrics,
    signals: &PostSignals,
    time_period_hours: Option<f64>,
) -> Result<AttributionResult, InvalidMetricError> {
    ScoringEngine::default().engagement_attribution(post, signals, time_period_hours)
}

pub fn compute_hashtag_growth(
    posts_24h_ago: i64,
    posts_12h_ago: i64,
    posts_now: i64,
    growth_window_hours: Option<f64>,
) -> Result<GrowthResult, InvalidMetricError> {
    ScoringEngine::default().hashtag_growth(
        posts_24h_ago,
        posts_12h_ago,
        posts_now,
        growth_window_hours,
    )
}

pub fn compute_master_virality_score(
    growth: &GrowthData,
    engagement: &EngagementData,
    attribution: &AttributionResult,
    drivers: &ViralDrivers,
) -> Result<ViralityResult, InvalidMetricError> {
    ScoringEngine::default().master_virality_score(growth, engagement, attribution, drivers)
}

pub fn classify_virality(master_score: f64) -> Result<ViralityPrediction, InvalidMetricError> {
    ScoringEngine::default().classify(master_score)
}

pub fn format_number(value: f64) -> String {
    let rounded = value.round().max(0.0) as i64;
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
