//! Trajectory summaries and text rendering.
//!
//! Condenses a balance trajectory into the figures a reader compares
//! across strategies (final, peak, trough, max drawdown, largest wager)
//! and renders them as fixed-width tables for the terminal.

use std::fmt;
use std::fmt::Write as _;

use super::runner::{LimitRun, StrategyRun};
use crate::types::{BetTypeMap, Trajectory};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrajectorySummary {
    pub spins: usize,
    pub final_balance: i64,
    pub peak: i64,
    pub trough: i64,
    /// Largest drop from a running peak to a later balance.
    pub max_drawdown: i64,
    pub largest_wager: i64,
}

impl TrajectorySummary {
    pub fn from_trajectory(trajectory: &[i64]) -> Self {
        let mut peak = 0i64;
        let mut trough = 0i64;
        let mut running_peak = 0i64;
        let mut max_drawdown = 0i64;

        for &balance in trajectory {
            peak = peak.max(balance);
            trough = trough.min(balance);
            running_peak = running_peak.max(balance);
            max_drawdown = max_drawdown.max(running_peak.saturating_sub(balance));
        }

        let largest_wager = trajectory
            .windows(2)
            .map(|w| w[1].abs_diff(w[0]))
            .max()
            .map(|w| i64::try_from(w).unwrap_or(i64::MAX))
            .unwrap_or(0);

        Self {
            spins: trajectory.len().saturating_sub(1),
            final_balance: trajectory.last().copied().unwrap_or(0),
            peak,
            trough,
            max_drawdown,
            largest_wager,
        }
    }
}

impl fmt::Display for TrajectorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>12} {:>12} {:>12} {:>12} {:>12}",
            money(self.final_balance),
            money(self.peak),
            money(self.trough),
            money(self.max_drawdown),
            money(self.largest_wager),
        )
    }
}

fn money(amount: i64) -> String {
    if amount < 0 {
        format!("-${}", amount.unsigned_abs())
    } else {
        format!("${amount}")
    }
}

fn header(out: &mut String, label: &str) {
    let _ = writeln!(
        out,
        "{label:<12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "final", "peak", "trough", "max dd", "max wager"
    );
}

fn rows(out: &mut String, trajectories: &BetTypeMap<Trajectory>) {
    for (bet_type, trajectory) in trajectories.iter() {
        let _ = writeln!(out, "{:<12} {}", bet_type, TrajectorySummary::from_trajectory(trajectory));
    }
}

/// One table per strategy, one row per bet type.
pub fn render_comparison(runs: &[StrategyRun]) -> String {
    let mut out = String::new();
    for run in runs {
        let spins = run.trajectories.iter().next().map(|(_, t)| t.len().saturating_sub(1)).unwrap_or(0);
        let _ = writeln!(out, "== Net profit using {} ({spins} spins) ==", run.kind);
        header(&mut out, "bet");
        rows(&mut out, &run.trajectories);
        out.push('\n');
    }
    out
}

/// One table per (strategy, table limit).
pub fn render_limit_sweeps(runs: &[LimitRun]) -> String {
    let mut out = String::new();
    for run in runs {
        for (limit, trajectories) in &run.sweep {
            let _ = writeln!(out, "== {} strategy, table limit {} ==", run.kind, money(*limit));
            header(&mut out, "bet");
            rows(&mut out, trajectories);
            out.push('\n');
        }
    }
    out
}
