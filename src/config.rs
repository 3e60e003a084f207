//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every section has defaults, so a missing file or section falls back to
//! a European wheel, a $10 initial bet and the $5–$20 random range.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::data::wheel::Wheel;
use crate::strategy::{validate_initial_bet, BetRange};
use crate::types::TableLimit;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationConfig,
    pub data: DataConfig,
    pub scraper: ScraperConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SimulationConfig {
    pub initial_bet: i64,
    /// Limits swept by the table-limit variants.
    pub table_limits: Vec<i64>,
    pub random_bet_min: i64,
    pub random_bet_max: i64,
    /// Seed for the no-strategy RNG; random per run when absent.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_bet: 10,
            table_limits: vec![100, 500, 1000, 5000],
            random_bet_min: 5,
            random_bet_max: 20,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn bet_range(&self) -> Result<BetRange> {
        Ok(BetRange::new(self.random_bet_min, self.random_bet_max)?)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DataConfig {
    /// Recorded spins; when absent, spins are generated from `wheel`.
    pub spins_path: Option<PathBuf>,
    pub wheel: Wheel,
    pub generate_spins: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            spins_path: None,
            wheel: Wheel::European,
            generate_spins: 1000,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScraperConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "SPINLAB/0.1.0 (table-limit-scraper)".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load from `path`, or fall back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "No config file found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameters outside the simulators' domain before any run.
    pub fn validate(&self) -> Result<()> {
        validate_initial_bet(self.simulation.initial_bet)?;
        for &limit in &self.simulation.table_limits {
            TableLimit::new(limit)?;
        }
        self.simulation.bet_range()?;
        if self.scraper.timeout_secs == 0 {
            anyhow::bail!("scraper.timeout_secs must be positive");
        }
        Ok(())
    }
}
