//! End-to-end simulation runs.
//!
//! Drives recorded and generated spin sequences through the backtester
//! and checks the trajectories it hands to the renderer.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

use spinlab::backtest::{render_comparison, render_limit_sweeps, Backtester};
use spinlab::config::AppConfig;
use spinlab::data::wheel::{Pocket, Wheel, WheelGenerator};
use spinlab::data::{parse_spins, save_spins, SpinFile, SpinRecord, SpinSource};
use spinlab::strategy::BetRange;
use spinlab::types::{BetType, SpinOutcome, StrategyKind};

fn temp_path() -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("spinlab_it_{}.json", uuid::Uuid::new_v4()));
    p
}

fn backtester(initial_bet: i64) -> Backtester {
    Backtester::new(initial_bet, BetRange::default())
}

#[test]
fn test_generated_spins_run_through_every_strategy() {
    let spins = WheelGenerator::new(Wheel::European, 200, Some(7)).spins().unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let runs = backtester(10).compare_strategies(&spins, &mut rng).unwrap();

    let kinds: Vec<_> = runs.iter().map(|r| r.kind).collect();
    assert_eq!(kinds, StrategyKind::ALL.to_vec());
    for run in &runs {
        for (_, trajectory) in run.trajectories.iter() {
            assert_eq!(trajectory.len(), 201);
            assert_eq!(trajectory[0], 0);
        }
    }
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let run = |seed| {
        let spins = WheelGenerator::new(Wheel::American, 150, Some(seed)).spins().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        backtester(5).compare_strategies(&spins, &mut rng).unwrap()
    };

    let a = run(42);
    let b = run(42);
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.trajectories, y.trajectories);
    }
}

#[test]
fn test_zero_pocket_loses_every_bet_for_every_strategy() {
    let spins = vec![Pocket::Zero.outcome(); 3];
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let runs = backtester(10).compare_strategies(&spins, &mut rng).unwrap();

    let martingale = &runs[1];
    assert_eq!(martingale.kind, StrategyKind::Martingale);
    for bet_type in BetType::ALL {
        assert_eq!(martingale.trajectories[bet_type], vec![0, -10, -30, -70]);
    }
    for run in &runs {
        for (_, trajectory) in run.trajectories.iter() {
            assert!(trajectory.windows(2).all(|w| w[1] < w[0]));
        }
    }
}

#[test]
fn test_spin_file_feeds_the_same_outcomes_as_the_wheel() {
    let path = temp_path();
    let mut generator = WheelGenerator::new(Wheel::European, 60, Some(99));
    let records: Vec<SpinRecord> = generator.pockets().into_iter().map(SpinRecord::from_pocket).collect();
    save_spins(&path, &records).unwrap();

    let from_file = SpinFile::new(&path).spins().unwrap();
    let generated = WheelGenerator::new(Wheel::European, 60, Some(99)).spins().unwrap();
    assert_eq!(from_file, generated);

    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let runs = backtester(10).compare_strategies(&from_file, &mut rng).unwrap();
    assert_eq!(runs.len(), 4);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_recorded_alternating_red_with_martingale() {
    let json = r#"[
        {"Number": 1,  "Red Bet Win": 1, "Black Bet Win": 0, "Even Bet Win": 0, "Odd Bet Win": 1},
        {"Number": 2,  "Red Bet Win": 0, "Black Bet Win": 1, "Even Bet Win": 1, "Odd Bet Win": 0},
        {"Number": 4,  "Red Bet Win": 0, "Black Bet Win": 1, "Even Bet Win": 1, "Odd Bet Win": 0},
        {"Number": 9,  "Red Bet Win": 1, "Black Bet Win": 0, "Even Bet Win": 0, "Odd Bet Win": 1}
    ]"#;
    let spins = parse_spins(json).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let runs = backtester(10).compare_strategies(&spins, &mut rng).unwrap();
    let martingale = &runs[1].trajectories;

    // Win, loss, loss, win: the final win recovers both losses plus one unit.
    assert_eq!(martingale[BetType::Red], vec![0, 10, 0, -20, 20]);
    assert_eq!(martingale[BetType::Black], vec![0, -10, 10, 20, 10]);
}

#[test]
fn test_table_limit_sweep_caps_wagers_and_collapses_duplicates() {
    let spins = vec![SpinOutcome::all_lose(); 5];

    let runs = backtester(10).compare_table_limits(&spins, &[100, 25, 25]).unwrap();

    assert_eq!(runs[0].kind, StrategyKind::Martingale);
    assert_eq!(runs[1].kind, StrategyKind::Fibonacci);
    for run in &runs {
        assert_eq!(run.sweep.keys().copied().collect::<Vec<_>>(), vec![25, 100]);
    }

    let martingale = &runs[0].sweep;
    // 10, 20, 25, 25, 25
    assert_eq!(martingale[&25][BetType::Red], vec![0, -10, -30, -55, -80, -105]);
    // 10, 20, 40, 80, 100
    assert_eq!(martingale[&100][BetType::Red], vec![0, -10, -30, -70, -150, -250]);

    let fibonacci = &runs[1].sweep;
    // 10, 10, 20, 25, 25
    assert_eq!(fibonacci[&25][BetType::Odd], vec![0, -10, -20, -40, -65, -90]);
    // 10, 10, 20, 30, 50
    assert_eq!(fibonacci[&100][BetType::Odd], vec![0, -10, -20, -40, -70, -120]);
}

#[test]
fn test_config_drives_backtester_and_rendering() {
    let cfg = AppConfig::from_toml(
        r#"
        [simulation]
        initial_bet = 5
        table_limits = [50]
        random_bet_min = 1
        random_bet_max = 3
        seed = 11
        "#,
    )
    .unwrap();
    let backtester = Backtester::from_config(&cfg.simulation).unwrap();
    assert_eq!(backtester.initial_bet(), 5);

    let spins = WheelGenerator::new(cfg.data.wheel, 20, cfg.simulation.seed).spins().unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let runs = backtester.compare_strategies(&spins, &mut rng).unwrap();

    let text = render_comparison(&runs);
    for heading in [
        "== Net profit using No Strategy (20 spins) ==",
        "== Net profit using Martingale (20 spins) ==",
        "== Net profit using Fibonacci (20 spins) ==",
        "== Net profit using D'Alembert (20 spins) ==",
    ] {
        assert!(text.contains(heading), "missing {heading:?}");
    }

    // No-strategy opens with the initial bet, then stays inside the range.
    for (_, trajectory) in runs[0].trajectories.iter() {
        assert_eq!(trajectory[1].abs(), 5);
        assert!(trajectory[1..].windows(2).all(|w| (1..=3).contains(&w[1].abs_diff(w[0]))));
    }

    let sweeps = backtester
        .compare_table_limits(&spins, &cfg.simulation.table_limits)
        .unwrap();
    let text = render_limit_sweeps(&sweeps);
    assert!(text.contains("== Martingale strategy, table limit $50 =="));
    assert!(text.contains("== Fibonacci strategy, table limit $50 =="));
}

#[test]
fn test_invalid_initial_bet_in_config_is_rejected() {
    let cfg = AppConfig::default();
    let mut sim = cfg.simulation.clone();
    sim.initial_bet = 0;
    assert!(Backtester::from_config(&sim).is_err());

    let spins = vec![SpinOutcome::all_win()];
    assert!(backtester(-1).compare_table_limits(&spins, &[100]).is_err());
}
