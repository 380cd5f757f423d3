use serde::{Deserialize, Serialize};
use trend_virality::scoring::diversity::{CreatorConcentration, CreatorPost};
use trend_virality::scoring::drivers::{
    content_pattern_match, hashtag_combination_strength, timing_factor, HistoricalPost,
};
use trend_virality::scoring::GrowthResult;
use trend_virality::{
    AttributionResult, ContentType, EngagementData, HashtagVolumeSample, PostMetrics, PostSignals,
    ScoreReport, ScoringInput, ViralDrivers, ViralityResult,
};

/// JSON scoring request as handed over by the ingestion side.
#[derive(Debug, Default, Deserialize)]
pub struct ScoreRequest {
    pub views: Option<i64>,
    pub likes: Option<i64>,
    pub comments: Option<i64>,
    pub shares: Option<i64>,
    pub saves: Option<i64>,
    pub description: Option<String>,
    pub content_type: Option<String>,
    pub sentiment: Option<f64>,
    pub has_call_to_action: Option<bool>,
    pub hook_strength: Option<f64>,
    pub period_hours: Option<f64>,
    pub posts_now: Option<i64>,
    pub posts_12h_ago: Option<i64>,
    pub posts_24h_ago: Option<i64>,
    pub posts_48h_ago: Option<i64>,
    pub window_hours: Option<f64>,
    pub engagement: Option<EngagementData>,
    pub post_hour: Option<u8>,
    pub unique_creators: Option<i64>,
    pub hashtag_combination_strength: Option<f64>,
    pub hashtags: Option<Vec<String>>,
    pub history: Option<Vec<HistoricalPost>>,
    pub creators: Option<Vec<CreatorPost>>,
}

pub struct PreparedRequest {
    pub input: ScoringInput,
    pub creator_concentration: Option<CreatorConcentration>,
}

impl ScoreRequest {
    pub fn into_input(self) -> Result<PreparedRequest, String> {
        let views = self.views.ok_or_else(|| "views is required".to_string())?;
        let posts_now = self
            .posts_now
            .ok_or_else(|| "posts_now is required".to_string())?;

        let content_type = match self.content_type.as_deref() {
            Some(value) => ContentType::from_str(value)
                .ok_or_else(|| format!("invalid content type: {}", value))?,
            None => ContentType::Other,
        };
        let description = self.description.unwrap_or_default();

        let creator_concentration = match self.creators.as_deref() {
            Some(posts) => {
                Some(CreatorConcentration::from_posts(posts).map_err(|err| err.to_string())?)
            }
            None => None,
        };

        let mut drivers = ViralDrivers {
            content_pattern_match: content_pattern_match(&description),
            ..ViralDrivers::default()
        };
        if let Some(hour) = self.post_hour {
            drivers.timing_factor = timing_factor(hour).map_err(|err| err.to_string())?;
        }
        drivers.hashtag_combination_strength =
            match (self.hashtag_combination_strength, self.hashtags.as_deref()) {
                (Some(strength), _) => strength,
                (None, Some(hashtags)) => hashtag_combination_strength(
                    hashtags,
                    self.history.as_deref().unwrap_or_default(),
                )
                .map_err(|err| err.to_string())?,
                (None, None) => 0.0,
            };
        drivers.creator_diversity = match (self.unique_creators, creator_concentration.as_ref()) {
            (Some(value), _) => value,
            (None, Some(concentration)) => concentration.unique_creators as i64,
            (None, None) => 1,
        };

        let input = ScoringInput {
            post: PostMetrics {
                views,
                likes: self.likes.unwrap_or(0),
                comments: self.comments.unwrap_or(0),
                shares: self.shares.unwrap_or(0),
                saves: self.saves.unwrap_or(0),
                description_text: description,
                content_type,
            },
            signals: PostSignals {
                sentiment_score: self.sentiment.unwrap_or(0.0),
                has_call_to_action: self.has_call_to_action.unwrap_or(false),
                hook_strength: self.hook_strength.unwrap_or(0.0),
            },
            time_period_hours: self.period_hours,
            hashtag: HashtagVolumeSample {
                posts_now,
                posts_12h_ago: self.posts_12h_ago.unwrap_or(posts_now),
                posts_24h_ago: self.posts_24h_ago.unwrap_or(posts_now),
                posts_48h_ago: self.posts_48h_ago,
            },
            growth_window_hours: self.window_hours,
            engagement: self.engagement,
            drivers,
        };

        Ok(PreparedRequest {
            input,
            creator_concentration,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub attribution: AttributionResult,
    pub growth: GrowthResult,
    pub result: ViralityResult,
    pub creator_concentration: Option<CreatorConcentration>,
}

impl ScoreResponse {
    pub fn from_report(report: ScoreReport, creator_concentration: Option<CreatorConcentration>) -> Self {
        Self {
            attribution: report.attribution,
            growth: report.growth,
            result: report.result,
            creator_concentration,
        }
    }
}
