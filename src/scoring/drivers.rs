use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{require_count, require_non_negative, require_range, InvalidMetricError};

const VIRAL_KEYWORDS: [&str; 7] = [
    "day", "building", "startup", "behind", "scenes", "revenue", "tips",
];
const MIN_COMBINATION_TAGS: usize = 3;
const MIN_SHARED_TAGS: usize = 2;

/// Contextual factors that historically accompany viral posts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViralDrivers {
    pub timing_factor: f64,
    pub creator_diversity: i64,
    pub content_pattern_match: f64,
    pub hashtag_combination_strength: f64,
}

/// Evening posting (17:00-21:00) performs best, its shoulder hours less so.
pub fn timing_factor(hour: u8) -> Result<f64, InvalidMetricError> {
    let hour = require_range("hour", hour as f64, 0.0, 23.0)? as u8;
    let factor = match hour {
        17..=21 => 0.8,
        16 | 22 => 0.6,
        _ => 0.3,
    };
    Ok(factor)
}

/// Mid-sized accounts (10k-100k followers) tend to get the strongest engagement.
pub fn creator_factor(followers: u64, avg_engagement_rate: f64) -> Result<f64, InvalidMetricError> {
    let engagement = require_non_negative("avg_engagement_rate", avg_engagement_rate)?;
    let follower_score = if (10_000..=100_000).contains(&followers) {
        0.8
    } else if followers < 10_000 {
        0.4
    } else {
        0.6
    };
    let engagement_score = (engagement * 10.0).min(1.0);
    Ok((follower_score + engagement_score) / 2.0)
}

pub fn content_pattern_match(text: &str) -> f64 {
    let lowercase = text.to_lowercase();
    let words: Vec<&str> = lowercase
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();
    let matches = VIRAL_KEYWORDS
        .iter()
        .filter(|keyword| words.contains(keyword))
        .count();
    matches as f64 / VIRAL_KEYWORDS.len() as f64
}

/// A past post with a known outcome, used to rate hashtag combinations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalPost {
    pub hashtags: Vec<String>,
    pub viral_score: f64,
}

/// Mean outcome of past posts sharing at least two of this post's hashtags,
/// each scaled by its share of the post's tags and capped at 1.
///
/// Posts with fewer than three distinct hashtags score 0. Tags compare
/// case-insensitively and without a leading `#`.
pub fn hashtag_combination_strength(
    hashtags: &[String],
    history: &[HistoricalPost],
) -> Result<f64, InvalidMetricError> {
    for past in history {
        require_non_negative("viral_score", past.viral_score)?;
    }

    let current: HashSet<String> = hashtags.iter().map(|tag| normalize_hashtag(tag)).collect();
    if current.len() < MIN_COMBINATION_TAGS {
        return Ok(0.0);
    }

    let scores: Vec<f64> = history
        .iter()
        .filter_map(|past| {
            let past_tags: HashSet<String> =
                past.hashtags.iter().map(|tag| normalize_hashtag(tag)).collect();
            let shared = past_tags.intersection(&current).count();
            (shared >= MIN_SHARED_TAGS)
                .then(|| past.viral_score * shared as f64 / current.len() as f64)
        })
        .collect();
    if scores.is_empty() {
        return Ok(0.0);
    }
    Ok((scores.iter().sum::<f64>() / scores.len() as f64).min(1.0))
}

fn normalize_hashtag(tag: &str) -> String {
    tag.trim().trim_start_matches('#').to_lowercase()
}

/// Format signals that business and founder content tends to go viral on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupContentSignals {
    pub revenue_mention: bool,
    pub growth_metrics_shown: bool,
    pub behind_scenes: bool,
    pub day_in_life_format: bool,
    /// In [0, 1].
    pub educational_value: f64,
    /// In [0, 1].
    pub authenticity_score: f64,
}

pub fn startup_content_virality(
    signals: &StartupContentSignals,
) -> Result<f64, InvalidMetricError> {
    let educational = require_range("educational_value", signals.educational_value, 0.0, 1.0)?;
    let authenticity =
        require_range("authenticity_score", signals.authenticity_score, 0.0, 1.0)?;

    let mut score = 0.0;
    if signals.revenue_mention {
        score += 0.25;
    }
    if signals.growth_metrics_shown {
        score += 0.20;
    }
    if signals.behind_scenes {
        score += 0.20;
    }
    if signals.day_in_life_format {
        score += 0.15;
    }
    score += educational * 0.10 + authenticity * 0.10;
    Ok(score.min(1.0))
}

/// Gini coefficient of post counts over the hours of day that saw activity.
///
/// Hours without posts are left out, so activity in a single hour scores 0.
pub fn time_concentration_index(post_hours: &[u8]) -> Result<f64, InvalidMetricError> {
    let mut per_hour = [0u64; 24];
    for hour in post_hours {
        let hour = require_range("hour", f64::from(*hour), 0.0, 23.0)? as usize;
        per_hour[hour] += 1;
    }
    if post_hours.is_empty() {
        return Ok(0.0);
    }

    let total = post_hours.len() as f64;
    let mut ratios: Vec<f64> = per_hour
        .iter()
        .filter(|count| **count > 0)
        .map(|count| *count as f64 / total)
        .collect();
    ratios.sort_by(f64::total_cmp);

    let n = ratios.len() as f64;
    let ranked: f64 = ratios
        .iter()
        .enumerate()
        .map(|(idx, ratio)| (idx + 1) as f64 * ratio)
        .sum();
    let ratio_sum: f64 = ratios.iter().sum();
    Ok(2.0 * ranked / (n * ratio_sum) - (n + 1.0) / n)
}

/// Weekend over weekday views. `None` when only weekends saw views; 1.0 when
/// neither did.
pub fn weekend_effect(
    weekend_views: i64,
    weekday_views: i64,
) -> Result<Option<f64>, InvalidMetricError> {
    let weekend = require_count("weekend_views", weekend_views)?;
    let weekday = require_count("weekday_views", weekday_views)?;
    if weekday == 0 {
        return Ok((weekend == 0).then_some(1.0));
    }
    Ok(Some(weekend as f64 / weekday as f64))
}
