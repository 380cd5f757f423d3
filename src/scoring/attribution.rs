use serde::{Deserialize, Serialize};

use crate::error::{
    checked_total, require_count, require_positive, require_range, InvalidMetricError,
};
use crate::{ContentType, PostMetrics, PostSignals};

const POSITIVE_SENTIMENT: f64 = 0.3;
const NEGATIVE_SENTIMENT: f64 = -0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentTone {
    Positive,
    Controversial,
    Neutral,
}

impl SentimentTone {
    pub fn label(self) -> &'static str {
        match self {
            SentimentTone::Positive => "positive",
            SentimentTone::Controversial => "controversial",
            SentimentTone::Neutral => "neutral",
        }
    }
}

/// Relative pull of each engagement kind for a content category.
#[derive(Debug, Clone, Copy)]
struct ContentMultipliers {
    likes: f64,
    comments: f64,
    shares: f64,
}

fn content_multipliers(content_type: ContentType) -> Option<ContentMultipliers> {
    match content_type {
        ContentType::Educational => Some(ContentMultipliers {
            likes: 1.0,
            comments: 1.5,
            shares: 1.3,
        }),
        ContentType::Entertainment => Some(ContentMultipliers {
            likes: 1.4,
            comments: 1.0,
            shares: 1.2,
        }),
        ContentType::Other => None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionResult {
    pub total_engagement: u64,
    pub engagement_rate: f64,
    pub engagement_velocity: f64,
    pub likes_ratio: f64,
    pub comments_ratio: f64,
    pub shares_ratio: f64,
    pub cta_effectiveness: f64,
    pub hook_impact: f64,
    pub sentiment_score: f64,
    pub sentiment_tone: SentimentTone,
    pub sentiment_boost: f64,
    pub content_type: ContentType,
    pub content_fit: Option<f64>,
    pub weighted_viral_score: f64,
}

#[derive(Debug, Clone)]
pub struct AttributionCalculator {
    cta_multiplier: f64,
}

impl AttributionCalculator {
    pub fn new(cta_multiplier: f64) -> Self {
        Self { cta_multiplier }
    }

    /// Breaks a post's engagement down into the factors credited for it.
    ///
    /// `time_period_hours` defaults to one hour. A post with zero views
    /// yields zero rate-derived fields rather than an error.
    pub fn attribute(
        &self,
        post: &PostMetrics,
        signals: &PostSignals,
        time_period_hours: Option<f64>,
    ) -> Result<AttributionResult, InvalidMetricError> {
        let views = require_count("views", post.views)?;
        let likes = require_count("likes", post.likes)?;
        let comments = require_count("comments", post.comments)?;
        let shares = require_count("shares", post.shares)?;
        let saves = require_count("saves", post.saves)?;
        let sentiment = require_range("sentiment_score", signals.sentiment_score, -1.0, 1.0)?;
        let hook_strength = require_range("hook_strength", signals.hook_strength, 0.0, 1.0)?;
        let period = require_positive("time_period_hours", time_period_hours.unwrap_or(1.0))?;

        let total = checked_total("total_engagement", &[likes, comments, shares, saves])?;
        let engagement_rate = engagement_rate(total, views);
        let denominator = total.max(1) as f64;

        let cta_effectiveness = if signals.has_call_to_action {
            engagement_rate * self.cta_multiplier
        } else {
            0.0
        };

        let (sentiment_tone, sentiment_boost) = sentiment_attribution(sentiment, engagement_rate);

        let content_fit = content_multipliers(post.content_type).map(|multipliers| {
            let expected = (likes as f64 * multipliers.likes
                + comments as f64 * multipliers.comments
                + shares as f64 * multipliers.shares)
                / 3.0;
            (expected / denominator).min(2.0)
        });

        Ok(AttributionResult {
            total_engagement: total,
            engagement_rate,
            engagement_velocity: total as f64 / period,
            likes_ratio: likes as f64 / denominator,
            comments_ratio: comments as f64 / denominator,
            shares_ratio: shares as f64 / denominator,
            cta_effectiveness,
            hook_impact: hook_strength * engagement_rate,
            sentiment_score: sentiment,
            sentiment_tone,
            sentiment_boost,
            content_type: post.content_type,
            content_fit,
            weighted_viral_score: weighted_viral_score(likes, comments, shares, views),
        })
    }
}

fn engagement_rate(total: u64, views: u64) -> f64 {
    if views == 0 {
        0.0
    } else {
        total as f64 / views as f64
    }
}

fn sentiment_attribution(sentiment: f64, engagement_rate: f64) -> (SentimentTone, f64) {
    if sentiment > POSITIVE_SENTIMENT {
        (
            SentimentTone::Positive,
            (sentiment * engagement_rate * 2.0).min(1.0),
        )
    } else if sentiment < NEGATIVE_SENTIMENT {
        (
            SentimentTone::Controversial,
            (sentiment.abs() * engagement_rate * 1.5).min(1.0),
        )
    } else {
        (SentimentTone::Neutral, engagement_rate * 0.5)
    }
}

/// Comments count triple and shares five times a like.
fn weighted_viral_score(likes: u64, comments: u64, shares: u64, views: u64) -> f64 {
    if views == 0 {
        return 0.0;
    }
    let weighted = likes as f64 + comments as f64 * 3.0 + shares as f64 * 5.0;
    (weighted / views as f64 * 100.0).min(100.0)
}
