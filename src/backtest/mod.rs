//! Strategy comparison over a spin sequence, plus text summaries.

pub mod runner;
pub mod summary;

pub use runner::{Backtester, LimitRun, StrategyRun};
pub use summary::{render_comparison, render_limit_sweeps, TrajectorySummary};
