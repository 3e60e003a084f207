//! Fibonacci progression.
//!
//! Bets walk an append-only Fibonacci sequence: one step forward on a
//! loss (extending the sequence when needed), two steps back on a win.
//! Under a table limit only the wager is capped; the index keeps
//! advancing, so a long losing streak still has to be walked back.

use super::{replay, sweep_table_limits, validate_initial_bet, LimitSweep, Progression};
use crate::types::{clamp_to, BetTypeMap, SimError, SpinOutcome, StrategyKind, TableLimit, Trajectory};

// ---------------------------------------------------------------------------
// Sequence
// ---------------------------------------------------------------------------

/// Growable Fibonacci sequence seeded `[1, 1]` with a cursor into it.
///
/// `terms[index]` is always defined; terms are never removed.
#[derive(Debug, Clone)]
pub struct FibonacciSequence {
    terms: Vec<i64>,
    index: usize,
}

impl Default for FibonacciSequence {
    fn default() -> Self {
        Self { terms: vec![1, 1], index: 0 }
    }
}

impl FibonacciSequence {
    pub fn current(&self) -> i64 {
        self.terms[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn terms(&self) -> &[i64] {
        &self.terms
    }

    /// Step forward, appending the next term if the cursor runs off the end.
    pub fn advance(&mut self) -> Option<()> {
        self.index += 1;
        if self.index >= self.terms.len() {
            let n = self.terms.len();
            let next = self.terms[n - 1].checked_add(self.terms[n - 2])?;
            self.terms.push(next);
        }
        Some(())
    }

    /// Step back two, floored at the start.
    pub fn retreat(&mut self) {
        self.index = self.index.saturating_sub(2);
    }
}

// ---------------------------------------------------------------------------
// Progression
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Fibonacci {
    unit: i64,
    sequence: FibonacciSequence,
}

impl Fibonacci {
    pub fn new(initial_bet: i64) -> Self {
        Self { unit: initial_bet, sequence: FibonacciSequence::default() }
    }

    pub fn sequence(&self) -> &FibonacciSequence {
        &self.sequence
    }
}

impl Progression for Fibonacci {
    fn wager(&self, limit: Option<TableLimit>) -> Option<i64> {
        let bet = self.sequence.current().checked_mul(self.unit)?;
        Some(clamp_to(limit, bet))
    }

    fn settle(&mut self, won: bool, _limit: Option<TableLimit>) -> Option<()> {
        if won {
            self.sequence.retreat();
            Some(())
        } else {
            self.sequence.advance()
        }
    }
}

// ---------------------------------------------------------------------------
// Simulators
// ---------------------------------------------------------------------------

/// Simulate an uncapped Fibonacci progression for every bet type.
pub fn fibonacci(spins: &[SpinOutcome], initial_bet: i64) -> Result<BetTypeMap<Trajectory>, SimError> {
    validate_initial_bet(initial_bet)?;
    replay(StrategyKind::Fibonacci, spins, None, |_| Fibonacci::new(initial_bet))
}

/// Simulate a Fibonacci progression under each table limit independently.
pub fn fibonacci_with_table_limits(
    spins: &[SpinOutcome],
    initial_bet: i64,
    table_limits: &[i64],
) -> Result<LimitSweep, SimError> {
    sweep_table_limits(StrategyKind::Fibonacci, spins, initial_bet, table_limits, |_| {
        Fibonacci::new(initial_bet)
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
