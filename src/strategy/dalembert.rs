//! D'Alembert progression: add one unit on loss, remove one on win.

use super::{replay, validate_initial_bet, Progression};
use crate::types::{clamp_to, BetTypeMap, SimError, SpinOutcome, StrategyKind, TableLimit, Trajectory};

#[derive(Debug, Clone)]
pub struct DAlembert {
    unit: i64,
    bet: i64,
}

impl DAlembert {
    pub fn new(initial_bet: i64) -> Self {
        Self { unit: initial_bet, bet: initial_bet }
    }

    pub fn current_bet(&self) -> i64 {
        self.bet
    }
}

impl Progression for DAlembert {
    fn wager(&self, limit: Option<TableLimit>) -> Option<i64> {
        Some(clamp_to(limit, self.bet))
    }

    fn settle(&mut self, won: bool, _limit: Option<TableLimit>) -> Option<()> {
        self.bet = if won {
            // Never below one unit.
            self.unit.max(self.bet - self.unit)
        } else {
            self.bet.checked_add(self.unit)?
        };
        Some(())
    }
}

/// Simulate D'Alembert for every bet type.
pub fn dalembert(spins: &[SpinOutcome], initial_bet: i64) -> Result<BetTypeMap<Trajectory>, SimError> {
    validate_initial_bet(initial_bet)?;
    replay(StrategyKind::DAlembert, spins, None, |_| DAlembert::new(initial_bet))
}
