//! No-strategy (flat/random) betting.
//!
//! The first spin wagers the initial bet; every later spin wagers an
//! amount drawn uniformly from an inclusive range, independently for each
//! bet type. The draws are taken up front from an injected RNG so the
//! replay itself stays deterministic.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{replay, validate_initial_bet, Progression};
use crate::types::{
    clamp_to, BetType, BetTypeMap, SimError, SpinOutcome, StrategyKind, TableLimit, Trajectory,
};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Inclusive range random wagers are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetRange {
    min: i64,
    max: i64,
}

impl Default for BetRange {
    fn default() -> Self {
        Self { min: 5, max: 20 }
    }
}

impl BetRange {
    pub fn new(min: i64, max: i64) -> Result<Self, SimError> {
        if min <= 0 || max < min {
            return Err(SimError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn contains(&self, amount: i64) -> bool {
        (self.min..=self.max).contains(&amount)
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        rng.gen_range(self.min..=self.max)
    }
}

// ---------------------------------------------------------------------------
// Progression
// ---------------------------------------------------------------------------

/// Plays back a pre-drawn list of wagers, ignoring outcomes.
///
/// Past the end of the schedule the last wager repeats; an empty schedule
/// wagers nothing.
#[derive(Debug, Clone)]
pub struct ScheduledBets {
    wagers: Vec<i64>,
    next: usize,
}

impl ScheduledBets {
    pub fn new(wagers: Vec<i64>) -> Self {
        Self { wagers, next: 0 }
    }
}

impl Progression for ScheduledBets {
    fn wager(&self, limit: Option<TableLimit>) -> Option<i64> {
        let amount = self
            .wagers
            .get(self.next)
            .or_else(|| self.wagers.last())
            .copied()
            .unwrap_or(0);
        Some(clamp_to(limit, amount))
    }

    fn settle(&mut self, _won: bool, _limit: Option<TableLimit>) -> Option<()> {
        self.next += 1;
        Some(())
    }
}

// ---------------------------------------------------------------------------
// Simulator
// ---------------------------------------------------------------------------

/// ChaCha stream reserved for wager draws. Seeded wheels use stream 0, so
/// a shared seed still gives the wheel and the wagers unrelated draws.
pub const WAGER_STREAM: u64 = 1;

/// RNG for the no-strategy wagers; OS entropy when unseeded.
pub fn wager_rng(seed: Option<u64>) -> ChaCha8Rng {
    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    rng.set_stream(WAGER_STREAM);
    rng
}

/// Simulate flat/random betting for every bet type.
pub fn no_strategy<R: Rng + ?Sized>(
    spins: &[SpinOutcome],
    initial_bet: i64,
    range: BetRange,
    rng: &mut R,
) -> Result<BetTypeMap<Trajectory>, SimError> {
    validate_initial_bet(initial_bet)?;

    let mut schedules = BetTypeMap::from_fn(|_| Vec::with_capacity(spins.len()));
    for spin in 0..spins.len() {
        for bet_type in BetType::ALL {
            let bet = if spin == 0 { initial_bet } else { range.draw(rng) };
            schedules[bet_type].push(bet);
        }
    }

    replay(StrategyKind::NoStrategy, spins, None, |bet_type| {
        ScheduledBets::new(std::mem::take(&mut schedules[bet_type]))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
