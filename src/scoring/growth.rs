use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{
    require_count, require_finite, require_non_negative, require_positive, InvalidMetricError,
};
use crate::HashtagVolumeSample;

const ACCELERATION_FLOOR: f64 = -100.0;
const ACCELERATION_CEILING: f64 = 200.0;
const HALF_LIFE_UNRESOLVED_HOURS: f64 = 48.0;
const TREND_STRENGTH_CEILING: f64 = 10.0;
const TREND_VOLUME_DECADES: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeTrend {
    Rising,
    Stable,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendStage {
    Emerging,
    Growing,
    Peak,
    Declining,
}

impl TrendStage {
    pub fn label(self) -> &'static str {
        match self {
            TrendStage::Emerging => "emerging",
            TrendStage::Growing => "growing",
            TrendStage::Peak => "peak",
            TrendStage::Declining => "declining",
        }
    }
}

/// A hashtag post count observed `hours_ago` before now.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumePoint {
    pub count: u64,
    pub hours_ago: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthResult {
    pub growth_velocity_pct: f64,
    pub growth_velocity_per_hour: f64,
    pub recent_increment: i64,
    pub prior_increment: i64,
    pub breakout_score: f64,
    pub acceleration: f64,
    pub momentum_index: f64,
    pub volume_trend: VolumeTrend,
}

#[derive(Debug, Clone)]
pub struct GrowthCalculator {
    default_window_hours: f64,
    momentum_window_hours: f64,
}

impl GrowthCalculator {
    pub fn new(default_window_hours: f64, momentum_window_hours: f64) -> Self {
        Self {
            default_window_hours,
            momentum_window_hours,
        }
    }

    pub fn hashtag_growth(
        &self,
        posts_24h_ago: i64,
        posts_12h_ago: i64,
        posts_now: i64,
        growth_window_hours: Option<f64>,
    ) -> Result<GrowthResult, InvalidMetricError> {
        let sample = HashtagVolumeSample {
            posts_now,
            posts_12h_ago,
            posts_24h_ago,
            posts_48h_ago: None,
        };
        self.sample_growth(&sample, growth_window_hours)
    }

    pub fn sample_growth(
        &self,
        sample: &HashtagVolumeSample,
        growth_window_hours: Option<f64>,
    ) -> Result<GrowthResult, InvalidMetricError> {
        let now = require_count("posts_now", sample.posts_now)?;
        let twelve = require_count("posts_12h_ago", sample.posts_12h_ago)?;
        let day = require_count("posts_24h_ago", sample.posts_24h_ago)?;
        let two_days = sample
            .posts_48h_ago
            .map(|value| require_count("posts_48h_ago", value))
            .transpose()?;
        let window = require_positive(
            "growth_window_hours",
            growth_window_hours.unwrap_or(self.default_window_hours),
        )?;

        let mut points = Vec::with_capacity(4);
        if let Some(count) = two_days {
            points.push(VolumePoint {
                count,
                hours_ago: 48.0,
            });
        }
        points.push(VolumePoint {
            count: day,
            hours_ago: 24.0,
        });
        points.push(VolumePoint {
            count: twelve,
            hours_ago: 12.0,
        });
        points.push(VolumePoint {
            count: now,
            hours_ago: 0.0,
        });

        let growth_velocity_pct = growth_velocity_pct(day, now);
        let acceleration = series_acceleration(&points);

        Ok(GrowthResult {
            growth_velocity_pct,
            growth_velocity_per_hour: growth_velocity_pct / window,
            recent_increment: now as i64 - twelve as i64,
            prior_increment: twelve as i64 - day as i64,
            breakout_score: breakout_score(day, twelve, now),
            acceleration,
            momentum_index: weighted_momentum(&points, self.momentum_window_hours),
            volume_trend: volume_trend(growth_velocity_pct),
        })
    }

    /// Recency-weighted mean of consecutive growth ratios.
    ///
    /// Points may arrive in any order; they are sorted oldest first. Fewer
    /// than three points carry no momentum.
    pub fn momentum_index(&self, points: &[VolumePoint]) -> Result<f64, InvalidMetricError> {
        let ordered = oldest_first(points)?;
        Ok(weighted_momentum(&ordered, self.momentum_window_hours))
    }
}

/// Percentage change from `previous` to `current`.
///
/// A zero base reports `current * 100` so that emergence from nothing reads
/// as a large positive signal.
pub fn growth_velocity_pct(previous: u64, current: u64) -> f64 {
    if previous == 0 {
        return current as f64 * 100.0;
    }
    (current as f64 - previous as f64) / previous as f64 * 100.0
}

/// Compares the last 12h increment with the 12h before it.
///
/// The relative change is clamped to [-1, 1] and rescaled to [0, 1], so 0.5
/// means steady growth, above 0.5 means the hashtag is speeding up.
pub fn breakout_score(posts_24h_ago: u64, posts_12h_ago: u64, posts_now: u64) -> f64 {
    let recent = posts_now as f64 - posts_12h_ago as f64;
    let prior = posts_12h_ago as f64 - posts_24h_ago as f64;
    let relative = ((recent - prior) / prior.abs().max(1.0)).clamp(-1.0, 1.0);
    (relative + 1.0) / 2.0
}

/// Percent change of the most recent growth rate over the mean of older ones.
///
/// Returns 0 unless every older rate is positive; the result is capped to
/// [-100, 200].
pub fn compute_acceleration(recent_rate: f64, older_rates: &[f64]) -> Result<f64, InvalidMetricError> {
    require_finite("recent_rate", recent_rate)?;
    for rate in older_rates {
        require_finite("older_rate", *rate)?;
    }
    Ok(acceleration(recent_rate, older_rates))
}

pub fn trend_stage(growth_velocity_pct: f64, current_volume: u64) -> TrendStage {
    if current_volume < 5 {
        TrendStage::Emerging
    } else if growth_velocity_pct > 30.0 {
        TrendStage::Growing
    } else if growth_velocity_pct > 0.0 && current_volume > 20 {
        TrendStage::Peak
    } else {
        TrendStage::Declining
    }
}

/// Hours from the peak count until the series first falls to half of it.
///
/// 0 with fewer than three points or when the peak is the newest point; a
/// series still above half its peak at the end reports 48 hours.
pub fn half_life(points: &[VolumePoint]) -> Result<f64, InvalidMetricError> {
    let ordered = oldest_first(points)?;
    if ordered.len() < 3 {
        return Ok(0.0);
    }
    let peak_idx = peak_index(ordered.iter().map(|point| point.count));
    if peak_idx >= ordered.len() - 1 {
        return Ok(0.0);
    }

    let peak = ordered[peak_idx];
    let target = peak.count as f64 * 0.5;
    let drop = ordered[peak_idx + 1..]
        .iter()
        .find(|point| point.count as f64 <= target);
    Ok(match drop {
        Some(point) => peak.hours_ago - point.hours_ago,
        None => HALF_LIFE_UNRESOLVED_HOURS,
    })
}

/// Per-step exponential decay constant right after the peak, never negative.
///
/// Needs at least two points after the peak.
pub fn decay_rate(counts: &[u64]) -> f64 {
    if counts.len() < 3 {
        return 0.0;
    }
    let peak_idx = peak_index(counts.iter().copied());
    if peak_idx >= counts.len() - 2 {
        return 0.0;
    }
    let (peak, next) = (counts[peak_idx], counts[peak_idx + 1]);
    if peak == 0 || next == 0 {
        return 0.0;
    }
    (-(next as f64 / peak as f64).ln()).max(0.0)
}

/// Growth speed scaled by log volume (one million posts counts in full),
/// capped to [0, 10].
pub fn trend_strength(
    velocity: f64,
    acceleration: f64,
    volume: i64,
) -> Result<f64, InvalidMetricError> {
    let velocity = require_finite("velocity", velocity)?;
    let acceleration = require_finite("acceleration", acceleration)?;
    let volume = require_count("volume", volume)?;
    let scale = ((volume.max(1) as f64).log10() / TREND_VOLUME_DECADES).min(1.0);
    Ok(((velocity + acceleration) / 2.0 * scale).clamp(0.0, TREND_STRENGTH_CEILING))
}

/// Short-horizon momentum in [0, 1].
///
/// `velocity` is a growth ratio (1.0 = doubled) saturating at 5x,
/// `acceleration` a relative change in [-1, 1]; the other two are already
/// unit-scaled.
pub fn momentum_score(
    velocity: f64,
    acceleration: f64,
    engagement_efficiency: f64,
    creator_diversity: f64,
) -> Result<f64, InvalidMetricError> {
    let velocity = require_finite("velocity", velocity)?;
    let acceleration = require_finite("acceleration", acceleration)?;
    let engagement = require_finite("engagement_efficiency", engagement_efficiency)?;
    let diversity = require_finite("creator_diversity", creator_diversity)?;

    Ok(0.4 * (velocity / 5.0).clamp(0.0, 1.0)
        + 0.3 * ((acceleration + 1.0) / 2.0).clamp(0.0, 1.0)
        + 0.2 * engagement.clamp(0.0, 1.0)
        + 0.1 * diversity.clamp(0.0, 1.0))
}

fn oldest_first(points: &[VolumePoint]) -> Result<Vec<VolumePoint>, InvalidMetricError> {
    for point in points {
        require_non_negative("hours_ago", point.hours_ago)?;
    }
    let mut ordered = points.to_vec();
    ordered.sort_by(|a, b| {
        b.hours_ago
            .partial_cmp(&a.hours_ago)
            .unwrap_or(Ordering::Equal)
    });
    Ok(ordered)
}

/// First index holding the maximum.
fn peak_index(counts: impl Iterator<Item = u64>) -> usize {
    let mut best: Option<(usize, u64)> = None;
    for (idx, count) in counts.enumerate() {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((idx, count));
        }
    }
    best.map_or(0, |(idx, _)| idx)
}

fn volume_trend(growth_velocity_pct: f64) -> VolumeTrend {
    if growth_velocity_pct > 0.0 {
        VolumeTrend::Rising
    } else if growth_velocity_pct < 0.0 {
        VolumeTrend::Declining
    } else {
        VolumeTrend::Stable
    }
}

fn acceleration(recent_rate: f64, older_rates: &[f64]) -> f64 {
    if older_rates.is_empty() || older_rates.iter().any(|rate| *rate <= 0.0) {
        return 0.0;
    }
    let older_avg = older_rates.iter().sum::<f64>() / older_rates.len() as f64;
    ((recent_rate - older_avg) / older_avg * 100.0).clamp(ACCELERATION_FLOOR, ACCELERATION_CEILING)
}

/// Points must be ordered oldest first. Each period rate is a per-hour
/// percentage so the 24h and 12h intervals compare fairly.
fn series_acceleration(points: &[VolumePoint]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let rates: Vec<f64> = points
        .windows(2)
        .map(|pair| {
            let hours = (pair[0].hours_ago - pair[1].hours_ago).max(1.0);
            growth_velocity_pct(pair[0].count, pair[1].count) / hours
        })
        .collect();
    let (recent, older) = match rates.split_last() {
        Some(split) => split,
        None => return 0.0,
    };
    let start = older.len().saturating_sub(2);
    acceleration(*recent, &older[start..])
}

fn weighted_momentum(points: &[VolumePoint], window_hours: f64) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let newest = points[points.len() - 1].hours_ago;
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    for pair in points.windows(2) {
        let (previous, current) = (pair[0], pair[1]);
        if previous.count == 0 {
            continue;
        }
        let ratio = (current.count as f64 - previous.count as f64) / previous.count as f64;
        let weight = (-(current.hours_ago - newest) / window_hours).exp();
        weighted_sum += ratio * weight;
        weight_total += weight;
    }

    if weight_total <= 0.0 {
        0.0
    } else {
        weighted_sum / weight_total
    }
}
