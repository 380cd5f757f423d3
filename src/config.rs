use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Weights of the five master-score components. Defaults sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MasterWeights {
    pub growth: f64,
    pub acceleration: f64,
    pub viral: f64,
    pub quality: f64,
    pub creator: f64,
}

impl Default for MasterWeights {
    fn default() -> Self {
        Self {
            growth: 0.30,
            acceleration: 0.20,
            viral: 0.25,
            quality: 0.15,
            creator: 0.10,
        }
    }
}

impl MasterWeights {
    fn values(&self) -> [(&'static str, f64); 5] {
        [
            ("weights.growth", self.growth),
            ("weights.acceleration", self.acceleration),
            ("weights.viral", self.viral),
            ("weights.quality", self.quality),
            ("weights.creator", self.creator),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributionConfig {
    /// Share of the engagement rate credited to a call to action.
    pub cta_multiplier: f64,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            cta_multiplier: 0.15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    pub default_window_hours: f64,
    pub momentum_window_hours: f64,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            default_window_hours: 24.0,
            momentum_window_hours: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    pub viral: f64,
    pub promising: f64,
    pub watch: f64,
    pub probability_cap: f64,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            viral: 70.0,
            promising: 50.0,
            watch: 30.0,
            probability_cap: 0.95,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: MasterWeights,
    pub attribution: AttributionConfig,
    pub growth: GrowthConfig,
    pub classification: ClassificationConfig,
}

impl ScoringConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                Self::from_toml(&contents)?
            } else {
                ScoringConfig::default()
            }
        } else {
            ScoringConfig::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok((config, config_path))
    }

    pub fn from_toml(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|err| format!("failed to parse config: {}", err))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|err| format!("failed to create config dir: {}", err))?;
            }
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload).map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in self.weights.values() {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("invalid {}: {}", name, value));
            }
        }

        let cta = self.attribution.cta_multiplier;
        if !cta.is_finite() || cta < 0.0 {
            return Err(format!("invalid attribution.cta_multiplier: {}", cta));
        }

        for (name, value) in [
            ("growth.default_window_hours", self.growth.default_window_hours),
            ("growth.momentum_window_hours", self.growth.momentum_window_hours),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("invalid {}: {}", name, value));
            }
        }

        let thresholds = &self.classification;
        let ordered = thresholds.viral <= 100.0
            && thresholds.viral > thresholds.promising
            && thresholds.promising > thresholds.watch
            && thresholds.watch > 0.0;
        if !ordered {
            return Err(format!(
                "classification thresholds must satisfy 100 >= viral > promising > watch > 0, got {} / {} / {}",
                thresholds.viral, thresholds.promising, thresholds.watch
            ));
        }

        let cap = thresholds.probability_cap;
        if !cap.is_finite() || cap <= 0.0 || cap > 1.0 {
            return Err(format!("invalid classification.probability_cap: {}", cap));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(multiplier) = env::var("VIRALITY_CTA_MULTIPLIER") {
            if let Ok(value) = multiplier.parse::<f64>() {
                self.attribution.cta_multiplier = value;
            }
        }
        if let Ok(cap) = env::var("VIRALITY_PROBABILITY_CAP") {
            if let Ok(value) = cap.parse::<f64>() {
                self.classification.probability_cap = value;
            }
        }
        if let Ok(window) = env::var("VIRALITY_GROWTH_WINDOW_HOURS") {
            if let Ok(value) = window.parse::<f64>() {
                self.growth.default_window_hours = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("SCORING_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/scoring.toml")))
}
