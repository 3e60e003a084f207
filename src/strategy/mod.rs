//! Strategy engine: bet-sizing progressions replayed over a spin sequence.
//!
//! Every strategy implements [`Progression`]: it reports the amount it
//! risks on the next spin and updates its internal state once the spin is
//! settled. A single replay loop drives all of them, with an optional
//! [`TableLimit`] threaded through both calls so the capped variants share
//! the same code path as the unconstrained ones.

pub mod dalembert;
pub mod fibonacci;
pub mod flat;
pub mod martingale;

use std::collections::BTreeMap;

use rand::Rng;
use tracing::debug;

use crate::types::{BetType, BetTypeMap, SimError, SpinOutcome, StrategyKind, TableLimit, Trajectory};

pub use dalembert::{dalembert, DAlembert};
pub use fibonacci::{fibonacci, fibonacci_with_table_limits, Fibonacci, FibonacciSequence};
pub use flat::{no_strategy, wager_rng, BetRange, ScheduledBets};
pub use martingale::{martingale, martingale_with_table_limits, Martingale};

/// Trajectories for every bet type, keyed by table limit.
pub type LimitSweep = BTreeMap<i64, BetTypeMap<Trajectory>>;

// ---------------------------------------------------------------------------
// Progression
// ---------------------------------------------------------------------------

/// Per-bet-type bet-sizing state machine.
///
/// Both methods return `None` when the arithmetic would overflow `i64`.
pub trait Progression {
    /// Amount risked on the next spin.
    fn wager(&self, limit: Option<TableLimit>) -> Option<i64>;

    /// Advance the internal state after a spin settles.
    fn settle(&mut self, won: bool, limit: Option<TableLimit>) -> Option<()>;
}

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

/// Reject bets outside the intended (positive) domain.
pub fn validate_initial_bet(initial_bet: i64) -> Result<(), SimError> {
    if initial_bet <= 0 {
        return Err(SimError::InvalidParameter {
            name: "initial_bet",
            value: initial_bet.to_string(),
        });
    }
    Ok(())
}

/// Replay `spins` for all four bet types with fresh state from `make`.
///
/// Each trajectory has `spins.len() + 1` entries and starts at `0`.
pub fn replay<P, F>(
    kind: StrategyKind,
    spins: &[SpinOutcome],
    limit: Option<TableLimit>,
    make: F,
) -> Result<BetTypeMap<Trajectory>, SimError>
where
    P: Progression,
    F: FnMut(BetType) -> P,
{
    let mut states = BetTypeMap::from_fn(make);
    let mut balances = BetTypeMap::from_fn(|_| 0i64);
    let mut trajectories = BetTypeMap::from_fn(|_| {
        let mut t = Vec::with_capacity(spins.len() + 1);
        t.push(0);
        t
    });

    for (spin, outcome) in spins.iter().enumerate() {
        let overflow = SimError::Overflow { strategy: kind, spin };
        for bet_type in BetType::ALL {
            let state = &mut states[bet_type];
            let wager = state.wager(limit).ok_or_else(|| overflow.clone())?;
            let won = bet_type.wins(outcome);

            let balance = &mut balances[bet_type];
            *balance = if won {
                balance.checked_add(wager)
            } else {
                balance.checked_sub(wager)
            }
            .ok_or_else(|| overflow.clone())?;
            trajectories[bet_type].push(*balance);

            state.settle(won, limit).ok_or_else(|| overflow.clone())?;
        }
    }

    debug!(
        strategy = %kind,
        spins = spins.len(),
        limit = ?limit.map(|l| l.value()),
        red = balances[BetType::Red],
        black = balances[BetType::Black],
        even = balances[BetType::Even],
        odd = balances[BetType::Odd],
        "Replay complete"
    );

    Ok(trajectories)
}

/// Run one independent replay per table limit.
///
/// Limits are validated before any replay starts; duplicates collapse
/// into a single entry.
pub fn sweep_table_limits<P, F>(
    kind: StrategyKind,
    spins: &[SpinOutcome],
    initial_bet: i64,
    table_limits: &[i64],
    make: F,
) -> Result<LimitSweep, SimError>
where
    P: Progression,
    F: Fn(BetType) -> P,
{
    validate_initial_bet(initial_bet)?;
    let limits = table_limits
        .iter()
        .map(|&l| TableLimit::new(l))
        .collect::<Result<Vec<_>, _>>()?;

    let mut sweep = LimitSweep::new();
    for limit in limits {
        let trajectories = replay(kind, spins, Some(limit), &make)?;
        sweep.insert(limit.value(), trajectories);
    }
    Ok(sweep)
}

/// Dispatch to the simulator for `kind`.
///
/// `rng` and `range` are only consulted by [`StrategyKind::NoStrategy`].
pub fn run_strategy<R: Rng + ?Sized>(
    kind: StrategyKind,
    spins: &[SpinOutcome],
    initial_bet: i64,
    range: BetRange,
    rng: &mut R,
) -> Result<BetTypeMap<Trajectory>, SimError> {
    match kind {
        StrategyKind::NoStrategy => no_strategy(spins, initial_bet, range, rng),
        StrategyKind::Martingale => martingale(spins, initial_bet),
        StrategyKind::Fibonacci => fibonacci(spins, initial_bet),
        StrategyKind::DAlembert => dalembert(spins, initial_bet),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
