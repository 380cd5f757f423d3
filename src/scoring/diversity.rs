use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::error::{require_count, InvalidMetricError};

/// One post observed under a hashtag, attributed to its creator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorPost {
    pub creator: String,
    pub views: i64,
}

/// How evenly a hashtag's views are spread across its creators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorConcentration {
    pub unique_creators: usize,
    /// 1 - Herfindahl index: 0 when one creator holds every view.
    pub diversity_index: f64,
    pub top_creator_dominance: f64,
}

impl CreatorConcentration {
    pub fn from_posts(posts: &[CreatorPost]) -> Result<Self, InvalidMetricError> {
        let mut creator_views: HashMap<&str, u64> = HashMap::new();
        for post in posts {
            let views = require_count("creator views", post.views)?;
            let entry = creator_views.entry(post.creator.as_str()).or_insert(0);
            *entry = (*entry)
                .checked_add(views)
                .ok_or(InvalidMetricError::Overflow {
                    field: "creator views",
                })?;
        }

        let counts: Vec<u64> = creator_views.values().copied().collect();
        Ok(Self {
            unique_creators: counts.len(),
            diversity_index: creator_diversity_index(&counts),
            top_creator_dominance: top_creator_dominance(&counts),
        })
    }
}

fn total_views(view_counts: &[u64]) -> u128 {
    view_counts.iter().map(|count| u128::from(*count)).sum()
}

pub fn creator_diversity_index(view_counts: &[u64]) -> f64 {
    let total = total_views(view_counts);
    if total == 0 {
        return 0.0;
    }
    let hhi: f64 = view_counts
        .iter()
        .map(|count| {
            let share = *count as f64 / total as f64;
            share * share
        })
        .sum();
    1.0 - hhi
}

pub fn top_creator_dominance(view_counts: &[u64]) -> f64 {
    let total = total_views(view_counts);
    if total == 0 {
        return 0.0;
    }
    let top = view_counts.iter().copied().max().unwrap_or(0);
    top as f64 / total as f64
}

/// Share of a hashtag's creators who had not posted under it before.
pub fn creator_novelty_ratio(
    new_creators: i64,
    total_creators: i64,
) -> Result<f64, InvalidMetricError> {
    let new_creators = require_count("new_creators", new_creators)?;
    let total = require_count("total_creators", total_creators)?;
    if total == 0 {
        return Ok(0.0);
    }
    Ok(new_creators as f64 / total as f64)
}

/// 1 - Jaccard overlap between the current and baseline creator sets.
pub fn novelty_index<T: Eq + Hash>(current: &HashSet<T>, baseline: &HashSet<T>) -> f64 {
    let union = current.union(baseline).count();
    if union == 0 {
        return 0.0;
    }
    let shared = current.intersection(baseline).count();
    1.0 - shared as f64 / union as f64
}

/// Fraction of a hashtag's creators not also driving other trending hashtags.
pub fn cross_hashtag_novelty<T: Eq + Hash>(
    hashtag_creators: &HashSet<T>,
    trending_creators: &HashSet<T>,
) -> f64 {
    if hashtag_creators.is_empty() {
        return 0.0;
    }
    let unique = hashtag_creators.difference(trending_creators).count();
    unique as f64 / hashtag_creators.len() as f64
}

/// Fraction of sound uses (repeats included) whose sound is absent from the baseline.
pub fn sound_novelty_score<S: AsRef<str>>(hashtag_sounds: &[S], baseline_sounds: &[S]) -> f64 {
    if hashtag_sounds.is_empty() {
        return 0.0;
    }
    let baseline: HashSet<&str> = baseline_sounds.iter().map(|sound| sound.as_ref()).collect();
    let fresh = hashtag_sounds
        .iter()
        .filter(|sound| {
            let sound: &str = (*sound).as_ref();
            !baseline.contains(sound)
        })
        .count();
    fresh as f64 / hashtag_sounds.len() as f64
}
