//! Shared types for SPINLAB.
//!
//! These types form the data model used across all modules: bet types,
//! spin outcomes, the per-bet-type map that every simulator fills, and
//! the domain error enum. They are kept free of strategy logic so that
//! data, strategy, and backtest modules can depend on them without
//! circular references.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// Cumulative net profit after each spin. Always starts with a `0` entry.
pub type Trajectory = Vec<i64>;

// ---------------------------------------------------------------------------
// Bet types
// ---------------------------------------------------------------------------

/// The four even-money bets simulated in parallel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetType {
    Red,
    Black,
    Even,
    Odd,
}

impl BetType {
    /// All bet types in canonical order (red, black, even, odd).
    pub const ALL: [BetType; 4] = [BetType::Red, BetType::Black, BetType::Even, BetType::Odd];

    /// Lower-case name used as the trajectory key.
    pub fn as_str(&self) -> &'static str {
        match self {
            BetType::Red => "red",
            BetType::Black => "black",
            BetType::Even => "even",
            BetType::Odd => "odd",
        }
    }

    /// Whether this bet won on the given spin.
    pub fn wins(&self, spin: &SpinOutcome) -> bool {
        match self {
            BetType::Red => spin.red,
            BetType::Black => spin.black,
            BetType::Even => spin.even,
            BetType::Odd => spin.odd,
        }
    }

    fn slot(self) -> usize {
        match self {
            BetType::Red => 0,
            BetType::Black => 1,
            BetType::Even => 2,
            BetType::Odd => 3,
        }
    }
}

impl fmt::Display for BetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Attempt to parse a string into a BetType (case-insensitive).
impl std::str::FromStr for BetType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "red" => Ok(BetType::Red),
            "black" => Ok(BetType::Black),
            "even" => Ok(BetType::Even),
            "odd" => Ok(BetType::Odd),
            _ => Err(anyhow::anyhow!("Unknown bet type: {s}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-bet-type map
// ---------------------------------------------------------------------------

/// Exactly one `T` per [`BetType`].
///
/// Used both for the mutable strategy state carried across spins and for
/// the resulting trajectories, so the four tracks can never drift apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BetTypeMap<T> {
    values: [T; 4],
}

impl<T> BetTypeMap<T> {
    /// Build a map by calling `f` once per bet type, in canonical order.
    pub fn from_fn(mut f: impl FnMut(BetType) -> T) -> Self {
        Self {
            values: BetType::ALL.map(&mut f),
        }
    }

    pub fn get(&self, bet_type: BetType) -> &T {
        &self.values[bet_type.slot()]
    }

    pub fn get_mut(&mut self, bet_type: BetType) -> &mut T {
        &mut self.values[bet_type.slot()]
    }

    /// Iterate `(bet_type, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (BetType, &T)> {
        BetType::ALL.into_iter().zip(self.values.iter())
    }

    pub fn map<U>(&self, mut f: impl FnMut(BetType, &T) -> U) -> BetTypeMap<U> {
        BetTypeMap::from_fn(|bet_type| f(bet_type, self.get(bet_type)))
    }
}

impl<T> Index<BetType> for BetTypeMap<T> {
    type Output = T;

    fn index(&self, bet_type: BetType) -> &T {
        self.get(bet_type)
    }
}

impl<T> IndexMut<BetType> for BetTypeMap<T> {
    fn index_mut(&mut self, bet_type: BetType) -> &mut T {
        self.get_mut(bet_type)
    }
}

// ---------------------------------------------------------------------------
// Spin outcome
// ---------------------------------------------------------------------------

/// Which even-money bets would have won a single spin.
///
/// Flags are treated independently; complementary pairs are not
/// cross-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpinOutcome {
    pub red: bool,
    pub black: bool,
    pub even: bool,
    pub odd: bool,
}

impl SpinOutcome {
    /// A spin on which every even-money bet won.
    pub fn all_win() -> Self {
        Self { red: true, black: true, even: true, odd: true }
    }

    /// A spin on which every even-money bet lost (e.g. a zero pocket).
    pub fn all_lose() -> Self {
        Self::default()
    }
}

impl fmt::Display for SpinOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let winners: Vec<&str> = BetType::ALL
            .iter()
            .filter(|b| b.wins(self))
            .map(|b| b.as_str())
            .collect();
        if winners.is_empty() {
            write!(f, "no winners")
        } else {
            write!(f, "{}", winners.join("+"))
        }
    }
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// The four betting progressions under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyKind {
    NoStrategy,
    Martingale,
    Fibonacci,
    DAlembert,
}

impl StrategyKind {
    /// All strategies in presentation order.
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::NoStrategy,
        StrategyKind::Martingale,
        StrategyKind::Fibonacci,
        StrategyKind::DAlembert,
    ];
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::NoStrategy => write!(f, "No Strategy"),
            StrategyKind::Martingale => write!(f, "Martingale"),
            StrategyKind::Fibonacci => write!(f, "Fibonacci"),
            StrategyKind::DAlembert => write!(f, "D'Alembert"),
        }
    }
}

// ---------------------------------------------------------------------------
// Table limit
// ---------------------------------------------------------------------------

/// Maximum wager a table accepts. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableLimit(i64);

impl TableLimit {
    pub fn new(limit: i64) -> Result<Self, SimError> {
        if limit <= 0 {
            return Err(SimError::InvalidParameter {
                name: "table_limit",
                value: limit.to_string(),
            });
        }
        Ok(Self(limit))
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Cap an amount at this limit.
    pub fn cap(&self, amount: i64) -> i64 {
        amount.min(self.0)
    }
}

impl fmt::Display for TableLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Apply an optional table limit.
pub fn clamp_to(limit: Option<TableLimit>, amount: i64) -> i64 {
    match limit {
        Some(l) => l.cap(amount),
        None => amount,
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the simulators and spin data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    #[error("Spin {index}: missing field \"{field}\"")]
    MissingField { index: usize, field: &'static str },

    #[error("Spin {index}: malformed field \"{field}\": {value}")]
    MalformedField {
        index: usize,
        field: &'static str,
        value: String,
    },

    #[error("Invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Invalid random bet range: [{min}, {max}]")]
    InvalidRange { min: i64, max: i64 },

    #[error("{strategy} overflowed at spin {spin}")]
    Overflow { strategy: StrategyKind, spin: usize },
}

/// Failures of the table-limit scrapers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScrapeError {
    #[error("HTTP error ({source_name}): {message}")]
    Http { source_name: String, message: String },

    #[error("Markup error ({source_name}): {message}")]
    Markup { source_name: String, message: String },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
