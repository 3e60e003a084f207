//! Integration test harness.
//!
//! Single test binary; each submodule exercises one end-to-end path
//! through the public library API or the `spinlab` binary.

mod cli;
mod fake_fetcher;
mod scraping;
mod simulation;
