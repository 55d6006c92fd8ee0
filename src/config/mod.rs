use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::{
    domain::nutrition::NutritionGoals,
    errors::{Result, VitalityError},
    utils::{ensure_dir, write_atomic, PathResolver},
    wizard::ProfileLayout,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn format_height(&self, cm: f64) -> String {
        match self {
            UnitSystem::Metric => format!("{cm:.1} cm"),
            UnitSystem::Imperial => {
                let total_inches = (cm / 2.54).round() as i64;
                format!("{} ft {} in", total_inches / 12, total_inches % 12)
            }
        }
    }

    pub fn format_weight(&self, kg: f64) -> String {
        match self {
            UnitSystem::Metric => format!("{kg:.1} kg"),
            UnitSystem::Imperial => format!("{:.1} lb", kg * 2.204_622_6),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub unit_system: UnitSystem,
    pub default_layout: ProfileLayout,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub nutrition_goals: NutritionGoals,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unit_system: UnitSystem::Metric,
            default_layout: ProfileLayout::StepByStep,
            recommendations_file: None,
            data_dir: None,
            nutrition_goals: NutritionGoals::default(),
        }
    }
}

impl Config {
    /// Rejects values the nutrition arithmetic cannot work with.
    pub fn validate(&self) -> Result<()> {
        let goals = &self.nutrition_goals;
        if goals.daily_kcal <= 0.0 {
            return Err(VitalityError::ConfigError(
                "daily calorie goal must be positive".into(),
            ));
        }
        let split = goals.protein_pct + goals.carbs_pct + goals.fat_pct;
        if (split - 100.0).abs() > 0.5 {
            return Err(VitalityError::ConfigError(format!(
                "macro split must add up to 100% (got {split:.1}%)"
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
        Self::from_base(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    /// Defaults when no file has been written yet.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)
            .map_err(|err| VitalityError::ConfigError(format!("{}: {err}", self.path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
