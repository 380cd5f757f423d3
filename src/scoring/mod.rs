pub mod attribution;
pub mod classify;
pub mod coefficient;
pub mod diversity;
pub mod drivers;
pub mod engine;
pub mod growth;
pub mod master;

pub use attribution::{AttributionCalculator, AttributionResult, SentimentTone};
pub use classify::{Confidence, PredictionLabel, ViralityClassifier, ViralityPrediction};
pub use coefficient::{compute_content_quality, compute_viral_coefficient, volume_factor};
pub use diversity::{
    creator_novelty_ratio, cross_hashtag_novelty, novelty_index, sound_novelty_score,
    CreatorConcentration, CreatorPost,
};
pub use drivers::{
    hashtag_combination_strength, startup_content_virality, time_concentration_index,
    weekend_effect, HistoricalPost, StartupContentSignals, ViralDrivers,
};
pub use engine::{ScoreReport, ScoringEngine, ScoringInput};
pub use growth::{
    breakout_score, compute_acceleration, decay_rate, growth_velocity_pct, half_life,
    momentum_score, trend_stage, trend_strength, GrowthCalculator, GrowthResult, TrendStage,
    VolumePoint, VolumeTrend,
};
pub use master::{
    viral_potential_score, EngagementData, GrowthData, MasterScorer, ScoreComponents,
    ViralityResult,
};
