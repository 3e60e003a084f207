//! Spin sequence sources.
//!
//! Defines the `SpinSource` trait with two implementations: a JSON spin
//! file of recorded outcomes and a seeded wheel generator. The file
//! format is one record per spin with the columns `"Red Bet Win"`,
//! `"Black Bet Win"`, `"Even Bet Win"` and `"Odd Bet Win"`, each `0/1` or
//! `true/false`, plus an optional informational `"Number"`.

pub mod wheel;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::types::{SimError, SpinOutcome};
use wheel::Pocket;

const RED_FIELD: &str = "Red Bet Win";
const BLACK_FIELD: &str = "Black Bet Win";
const EVEN_FIELD: &str = "Even Bet Win";
const ODD_FIELD: &str = "Odd Bet Win";

/// Anything that can hand the simulators an ordered spin sequence.
pub trait SpinSource {
    /// Human-readable description for logging.
    fn name(&self) -> String;

    fn spins(&mut self) -> Result<Vec<SpinOutcome>>;
}

// ---------------------------------------------------------------------------
// On-disk record
// ---------------------------------------------------------------------------

/// A win flag as it appears in recorded data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Int(i64),
}

impl Flag {
    fn to_bool(&self, index: usize, field: &'static str) -> Result<bool, SimError> {
        match self {
            Flag::Bool(b) => Ok(*b),
            Flag::Int(1) => Ok(true),
            Flag::Int(0) => Ok(false),
            Flag::Int(other) => Err(SimError::MalformedField {
                index,
                field,
                value: other.to_string(),
            }),
        }
    }
}

impl From<bool> for Flag {
    fn from(won: bool) -> Self {
        Flag::Int(i64::from(won))
    }
}

/// One row of a spin file.
///
/// Flags are optional at the serde level so a missing column can be
/// reported with the record index instead of a generic parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpinRecord {
    #[serde(rename = "Number", default, skip_serializing_if = "Option::is_none")]
    pub number: Option<serde_json::Value>,
    #[serde(rename = "Red Bet Win", default)]
    pub red: Option<Flag>,
    #[serde(rename = "Black Bet Win", default)]
    pub black: Option<Flag>,
    #[serde(rename = "Even Bet Win", default)]
    pub even: Option<Flag>,
    #[serde(rename = "Odd Bet Win", default)]
    pub odd: Option<Flag>,
}

impl SpinRecord {
    /// Convert to an outcome, failing fast on a missing or malformed flag.
    pub fn to_outcome(&self, index: usize) -> Result<SpinOutcome, SimError> {
        let flag = |value: &Option<Flag>, field: &'static str| -> Result<bool, SimError> {
            value
                .as_ref()
                .ok_or(SimError::MissingField { index, field })?
                .to_bool(index, field)
        };

        Ok(SpinOutcome {
            red: flag(&self.red, RED_FIELD)?,
            black: flag(&self.black, BLACK_FIELD)?,
            even: flag(&self.even, EVEN_FIELD)?,
            odd: flag(&self.odd, ODD_FIELD)?,
        })
    }

    pub fn from_pocket(pocket: Pocket) -> Self {
        let outcome = pocket.outcome();
        Self {
            number: Some(serde_json::Value::String(pocket.to_string())),
            red: Some(outcome.red.into()),
            black: Some(outcome.black.into()),
            even: Some(outcome.even.into()),
            odd: Some(outcome.odd.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing and file IO
// ---------------------------------------------------------------------------

/// Parse a JSON array of spin records.
pub fn parse_spins(json: &str) -> Result<Vec<SpinOutcome>> {
    let records: Vec<SpinRecord> =
        serde_json::from_str(json).context("Failed to parse spin records")?;
    let spins = records
        .iter()
        .enumerate()
        .map(|(i, r)| r.to_outcome(i))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(spins)
}

/// Load spins from a JSON file.
pub fn load_spins(path: &Path) -> Result<Vec<SpinOutcome>> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read spin file: {}", path.display()))?;
    let spins = parse_spins(&json)
        .with_context(|| format!("Invalid spin file: {}", path.display()))?;
    info!(path = %path.display(), spins = spins.len(), "Spins loaded");
    Ok(spins)
}

/// Write spin records as a JSON array (used to produce input fixtures).
pub fn save_spins(path: &Path, records: &[SpinRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("Failed to serialise spins")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write spin file: {}", path.display()))?;
    info!(path = %path.display(), spins = records.len(), "Spins saved");
    Ok(())
}

/// Recorded spins read from a JSON file.
pub struct SpinFile {
    path: PathBuf,
}

impl SpinFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SpinSource for SpinFile {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn spins(&mut self) -> Result<Vec<SpinOutcome>> {
        load_spins(&self.path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
