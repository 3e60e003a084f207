//! Martingale progression: double on loss, reset on win.
//!
//! Under a table limit the doubling itself is capped, so after a long
//! losing streak the bet stays pinned at the limit until a win resets it.

use super::{replay, sweep_table_limits, validate_initial_bet, LimitSweep, Progression};
use crate::types::{clamp_to, BetTypeMap, SimError, SpinOutcome, StrategyKind, TableLimit, Trajectory};

#[derive(Debug, Clone)]
pub struct Martingale {
    initial_bet: i64,
    bet: i64,
}

impl Martingale {
    pub fn new(initial_bet: i64) -> Self {
        Self { initial_bet, bet: initial_bet }
    }

    /// Current (unclamped) progression bet.
    pub fn current_bet(&self) -> i64 {
        self.bet
    }
}

impl Progression for Martingale {
    fn wager(&self, limit: Option<TableLimit>) -> Option<i64> {
        Some(clamp_to(limit, self.bet))
    }

    fn settle(&mut self, won: bool, limit: Option<TableLimit>) -> Option<()> {
        self.bet = if won {
            self.initial_bet
        } else {
            clamp_to(limit, self.bet.checked_mul(2)?)
        };
        Some(())
    }
}

/// Simulate an uncapped Martingale for every bet type.
pub fn martingale(spins: &[SpinOutcome], initial_bet: i64) -> Result<BetTypeMap<Trajectory>, SimError> {
    validate_initial_bet(initial_bet)?;
    replay(StrategyKind::Martingale, spins, None, |_| Martingale::new(initial_bet))
}

/// Simulate a Martingale under each table limit independently.
pub fn martingale_with_table_limits(
    spins: &[SpinOutcome],
    initial_bet: i64,
    table_limits: &[i64],
) -> Result<LimitSweep, SimError> {
    sweep_table_limits(StrategyKind::Martingale, spins, initial_bet, table_limits, |_| {
        Martingale::new(initial_bet)
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
