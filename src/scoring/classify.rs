use serde::{Deserialize, Serialize};

use crate::config::ClassificationConfig;
use crate::error::{require_range, InvalidMetricError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredictionLabel {
    Viral,
    Promising,
    Watch,
    Skip,
}

impl PredictionLabel {
    pub fn label(self) -> &'static str {
        match self {
            PredictionLabel::Viral => "VIRAL",
            PredictionLabel::Promising => "PROMISING",
            PredictionLabel::Watch => "WATCH",
            PredictionLabel::Skip => "SKIP",
        }
    }

    pub fn recommended_action(self) -> &'static str {
        match self {
            PredictionLabel::Viral => "Create content now",
            PredictionLabel::Promising => "Monitor closely, prepare content",
            PredictionLabel::Watch => "Watch for acceleration",
            PredictionLabel::Skip => "Not trending, deprioritize",
        }
    }

    pub fn confidence(self) -> Confidence {
        match self {
            PredictionLabel::Viral => Confidence::High,
            PredictionLabel::Promising => Confidence::Medium,
            PredictionLabel::Watch | PredictionLabel::Skip => Confidence::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn label(self) -> &'static str {
        match self {
            Confidence::High => "HIGH",
            Confidence::Medium => "MEDIUM",
            Confidence::Low => "LOW",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViralityPrediction {
    pub label: PredictionLabel,
    pub confidence: Confidence,
    pub recommended_action: String,
    pub breakout_probability: f64,
}

#[derive(Debug, Clone)]
pub struct ViralityClassifier {
    thresholds: ClassificationConfig,
}

impl ViralityClassifier {
    pub fn new(thresholds: ClassificationConfig) -> Self {
        Self { thresholds }
    }

    /// Maps a 0-100 master score onto a label. Boundary scores belong to the
    /// higher bucket.
    pub fn classify(&self, master_score: f64) -> Result<ViralityPrediction, InvalidMetricError> {
        let score = require_range("master_virality_score", master_score, 0.0, 100.0)?;
        let label = self.label_for(score);
        Ok(ViralityPrediction {
            label,
            confidence: label.confidence(),
            recommended_action: label.recommended_action().to_string(),
            breakout_probability: (score / 100.0).min(self.thresholds.probability_cap),
        })
    }

    fn label_for(&self, score: f64) -> PredictionLabel {
        if score >= self.thresholds.viral {
            PredictionLabel::Viral
        } else if score >= self.thresholds.promising {
            PredictionLabel::Promising
        } else if score >= self.thresholds.watch {
            PredictionLabel::Watch
        } else {
            PredictionLabel::Skip
        }
    }
}
