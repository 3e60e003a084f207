//! Strategy comparison driver.
//!
//! Replays one spin sequence through every strategy (or through the
//! table-limited variants for a set of limits) and collects the
//! trajectories for presentation. No computation beyond dispatch.

use rand::Rng;
use tracing::info;

use super::summary::TrajectorySummary;
use crate::config::SimulationConfig;
use crate::strategy::{
    fibonacci_with_table_limits, martingale_with_table_limits, run_strategy, validate_initial_bet,
    BetRange, LimitSweep,
};
use crate::types::{BetType, BetTypeMap, SimError, SpinOutcome, StrategyKind, Trajectory};

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// One strategy's trajectories for all four bet types.
#[derive(Debug, Clone)]
pub struct StrategyRun {
    pub kind: StrategyKind,
    pub trajectories: BetTypeMap<Trajectory>,
}

impl StrategyRun {
    pub fn summaries(&self) -> BetTypeMap<TrajectorySummary> {
        self.trajectories.map(|_, t| TrajectorySummary::from_trajectory(t))
    }
}

/// One table-limited strategy's trajectories, keyed by limit.
#[derive(Debug, Clone)]
pub struct LimitRun {
    pub kind: StrategyKind,
    pub sweep: LimitSweep,
}

// ---------------------------------------------------------------------------
// Backtester
// ---------------------------------------------------------------------------

pub struct Backtester {
    initial_bet: i64,
    range: BetRange,
}

impl Backtester {
    pub fn new(initial_bet: i64, range: BetRange) -> Self {
        Self { initial_bet, range }
    }

    pub fn from_config(config: &SimulationConfig) -> anyhow::Result<Self> {
        validate_initial_bet(config.initial_bet)?;
        Ok(Self::new(config.initial_bet, config.bet_range()?))
    }

    pub fn initial_bet(&self) -> i64 {
        self.initial_bet
    }

    /// Run all four strategies over the same spins, in presentation order.
    pub fn compare_strategies<R: Rng + ?Sized>(
        &self,
        spins: &[SpinOutcome],
        rng: &mut R,
    ) -> Result<Vec<StrategyRun>, SimError> {
        let mut runs = Vec::with_capacity(StrategyKind::ALL.len());
        for kind in StrategyKind::ALL {
            let trajectories = run_strategy(kind, spins, self.initial_bet, self.range, rng)?;
            info!(
                strategy = %kind,
                spins = spins.len(),
                red = final_balance(&trajectories, BetType::Red),
                black = final_balance(&trajectories, BetType::Black),
                even = final_balance(&trajectories, BetType::Even),
                odd = final_balance(&trajectories, BetType::Odd),
                "Strategy simulated"
            );
            runs.push(StrategyRun { kind, trajectories });
        }
        Ok(runs)
    }

    /// Run the table-limited Martingale and Fibonacci variants.
    pub fn compare_table_limits(
        &self,
        spins: &[SpinOutcome],
        table_limits: &[i64],
    ) -> Result<Vec<LimitRun>, SimError> {
        let martingale = martingale_with_table_limits(spins, self.initial_bet, table_limits)?;
        let fibonacci = fibonacci_with_table_limits(spins, self.initial_bet, table_limits)?;
        info!(
            spins = spins.len(),
            limits = ?table_limits,
            "Table-limit sweep complete"
        );
        Ok(vec![
            LimitRun { kind: StrategyKind::Martingale, sweep: martingale },
            LimitRun { kind: StrategyKind::Fibonacci, sweep: fibonacci },
        ])
    }
}

fn final_balance(trajectories: &BetTypeMap<Trajectory>, bet_type: BetType) -> i64 {
    trajectories[bet_type].last().copied().unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
