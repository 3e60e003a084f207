//! Seeded roulette wheel for generating spin sequences.
//!
//! Draws pockets uniformly from a European (single zero) or American
//! (double zero) wheel and derives the even-money flags from the pocket.
//! Zero pockets lose every even-money bet.

use anyhow::Result;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::SpinSource;
use crate::types::SpinOutcome;

/// Red numbers on a roulette wheel.
const RED_NUMBERS: [u8; 18] = [1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36];

// ---------------------------------------------------------------------------
// Wheel layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Wheel {
    #[default]
    European,
    American,
}

impl Wheel {
    /// Number of pockets on the wheel.
    pub fn pockets(&self) -> u8 {
        match self {
            Wheel::European => 37,
            Wheel::American => 38,
        }
    }
}

impl fmt::Display for Wheel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wheel::European => write!(f, "european"),
            Wheel::American => write!(f, "american"),
        }
    }
}

/// A single wheel pocket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pocket {
    Zero,
    DoubleZero,
    Number(u8),
}

impl Pocket {
    /// Map a drawn slot (`0..wheel.pockets()`) to a pocket; slot 37 is `00`.
    fn from_slot(slot: u8) -> Self {
        match slot {
            0 => Pocket::Zero,
            37 => Pocket::DoubleZero,
            n => Pocket::Number(n),
        }
    }

    pub fn is_red(&self) -> bool {
        matches!(self, Pocket::Number(n) if RED_NUMBERS.contains(n))
    }

    /// Even-money flags for this pocket.
    pub fn outcome(&self) -> SpinOutcome {
        match *self {
            Pocket::Zero | Pocket::DoubleZero => SpinOutcome::all_lose(),
            Pocket::Number(n) => SpinOutcome {
                red: self.is_red(),
                black: !self.is_red(),
                even: n % 2 == 0,
                odd: n % 2 == 1,
            },
        }
    }
}

impl fmt::Display for Pocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pocket::Zero => write!(f, "0"),
            Pocket::DoubleZero => write!(f, "00"),
            Pocket::Number(n) => write!(f, "{n}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Produces `count` spins from a seeded wheel.
pub struct WheelGenerator {
    wheel: Wheel,
    count: usize,
    rng: ChaCha8Rng,
}

impl WheelGenerator {
    /// Without a seed the generator draws from OS entropy.
    pub fn new(wheel: Wheel, count: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        Self { wheel, count, rng }
    }

    pub fn spin(&mut self) -> Pocket {
        Pocket::from_slot(self.rng.gen_range(0..self.wheel.pockets()))
    }

    /// Draw `count` pockets.
    pub fn pockets(&mut self) -> Vec<Pocket> {
        (0..self.count).map(|_| self.spin()).collect()
    }
}

impl SpinSource for WheelGenerator {
    fn name(&self) -> String {
        format!("{} wheel", self.wheel)
    }

    fn spins(&mut self) -> Result<Vec<SpinOutcome>> {
        let spins: Vec<SpinOutcome> = self.pockets().iter().map(Pocket::outcome).collect();
        debug!(wheel = %self.wheel, count = spins.len(), "Generated spins");
        Ok(spins)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
