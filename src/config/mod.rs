use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    errors::{ProjectionError, Result},
    utils::paths::{config_file_in, ensure_dir, resolve_base, write_atomic},
};

/// Tunables for the projection engine. Every field falls back to its default when
/// missing from the stored file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectionConfig {
    pub low_balance_threshold: Decimal,
    pub default_window_days: u32,
    pub upcoming_days: u32,
    pub upcoming_limit: usize,
    pub confidence: ConfidenceSettings,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            low_balance_threshold: dec!(500),
            default_window_days: 90,
            upcoming_days: 7,
            upcoming_limit: 10,
            confidence: ConfidenceSettings::default(),
        }
    }
}

impl ProjectionConfig {
    /// Rejects scores outside `[0, 1]`, negative decay and a negative threshold.
    pub fn validate(&self) -> Result<()> {
        if self.low_balance_threshold < Decimal::ZERO {
            return Err(ProjectionError::Config(format!(
                "low_balance_threshold must not be negative, got {}",
                self.low_balance_threshold
            )));
        }
        self.confidence.validate()
    }
}

/// Lowest confidence any projected event or day may carry.
pub const MIN_CONFIDENCE_FLOOR: Decimal = dec!(0.3);

/// Base scores and decay parameters used by the confidence model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConfidenceSettings {
    pub pending: Decimal,
    pub auto_recurring: Decimal,
    pub manual_recurring: Decimal,
    pub new_recurring: Decimal,
    /// Observed occurrences needed before an auto-detected series counts as established.
    pub established_occurrences: u32,
    pub decay_per_day: Decimal,
    /// Configurable only within `[MIN_CONFIDENCE_FLOOR, 1]`.
    pub floor: Decimal,
}

impl Default for ConfidenceSettings {
    fn default() -> Self {
        Self {
            pending: dec!(0.95),
            auto_recurring: dec!(0.85),
            manual_recurring: dec!(0.70),
            new_recurring: dec!(0.50),
            established_occurrences: 3,
            decay_per_day: dec!(0.002),
            floor: MIN_CONFIDENCE_FLOOR,
        }
    }
}

impl ConfidenceSettings {
    fn validate(&self) -> Result<()> {
        let scores = [
            ("pending", self.pending),
            ("auto_recurring", self.auto_recurring),
            ("manual_recurring", self.manual_recurring),
            ("new_recurring", self.new_recurring),
            ("floor", self.floor),
        ];
        for (name, value) in scores {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(ProjectionError::Config(format!(
                    "confidence.{} must lie in [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.floor < MIN_CONFIDENCE_FLOOR {
            return Err(ProjectionError::Config(format!(
                "confidence.floor must be at least {}, got {}",
                MIN_CONFIDENCE_FLOOR, self.floor
            )));
        }
        if self.decay_per_day < Decimal::ZERO {
            return Err(ProjectionError::Config(format!(
                "confidence.decay_per_day must not be negative, got {}",
                self.decay_per_day
            )));
        }
        Ok(())
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::from_base(None)
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        Self::from_base(Some(base))
    }

    fn from_base(base: Option<PathBuf>) -> Result<Self> {
        let base = resolve_base(base);
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<ProjectionConfig> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            let config: ProjectionConfig = serde_json::from_str(&data)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!(path = %self.path.display(), "config file missing, using defaults");
            Ok(ProjectionConfig::default())
        }
    }

    pub fn save(&self, config: &ProjectionConfig) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
