use std::collections::HashSet;

use border_life::{BorderLife, BorderLifeConfig, Grid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn build_grid(rows: usize, cols: usize, live: &[(usize, usize)]) -> Grid {
    let mut grid = Grid::new(rows, cols).expect("test grid dimensions");
    for &(row, col) in live {
        grid.set_alive(row, col, true);
    }
    grid
}

fn live_set(grid: &Grid) -> HashSet<(usize, usize)> {
    let mut out = HashSet::new();
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            if grid.is_alive(row, col) {
                out.insert((row, col));
            }
        }
    }
    out
}

fn random_grid(rows: usize, cols: usize, density: f64, seed: u64) -> Grid {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut grid = Grid::new(rows, cols).expect("test grid dimensions");
    for row in 0..rows {
        for col in 0..cols {
            if rng.random::<f64>() < density {
                grid.set_alive(row, col, true);
            }
        }
    }
    grid
}

/// Starting board used throughout:
/// ```text
/// xxx..
/// .....
/// ..xxx
/// x.xx.
/// ```
const START_4X5: &[(usize, usize)] = &[
    (0, 0),
    (0, 1),
    (0, 2),
    (2, 2),
    (2, 3),
    (2, 4),
    (3, 0),
    (3, 2),
    (3, 3),
];

/// The board above after one generation:
/// ```text
/// .x...
/// .....
/// .xx.x
/// .xx.x
/// ```
const AFTER_ONE: &[(usize, usize)] = &[(0, 1), (2, 1), (2, 2), (2, 4), (3, 1), (3, 2), (3, 4)];

/// And after three generations total:
/// ```text
/// .....
/// .xx..
/// x..x.
/// .xx..
/// ```
const AFTER_THREE: &[(usize, usize)] = &[(1, 1), (1, 2), (2, 0), (2, 3), (3, 1), (3, 2)];

#[test]
fn known_board_after_one_step() {
    let mut engine = BorderLife::new(build_grid(4, 5, START_4X5));
    let grid = engine.step();
    assert_eq!(live_set(grid), AFTER_ONE.iter().copied().collect());
}

#[test]
fn known_board_after_three_steps() {
    let mut engine = BorderLife::new(build_grid(4, 5, START_4X5));
    engine.step();
    let grid = engine.step_n(2);
    assert_eq!(live_set(grid), AFTER_THREE.iter().copied().collect());
}

#[test]
fn blinker_oscillates_inside_the_border() {
    let mut engine = BorderLife::new(build_grid(3, 3, &[(1, 0), (1, 1), (1, 2)]));

    engine.step();
    assert_eq!(
        live_set(engine.grid()),
        [(0, 1), (1, 1), (2, 1)].into_iter().collect()
    );

    engine.step();
    assert_eq!(
        live_set(engine.grid()),
        [(1, 0), (1, 1), (1, 2)].into_iter().collect()
    );
}

#[test]
fn deterministic_across_thread_counts() {
    let reference = {
        let start = random_grid(24, 31, 0.35, 0xD37E_A515);
        let config = BorderLifeConfig::default().thread_count(1);
        let mut engine = BorderLife::with_config(start, config).unwrap();
        engine.step_n(12);
        live_set(engine.grid())
    };

    // Includes counts above the row total; the extra workers own no rows.
    for threads in [2usize, 4, 7, 64] {
        let start = random_grid(24, 31, 0.35, 0xD37E_A515);
        let config = BorderLifeConfig::default().thread_count(threads);
        let mut engine = BorderLife::with_config(start, config).unwrap();
        engine.step_n(12);
        assert_eq!(
            live_set(engine.grid()),
            reference,
            "thread count {threads} changed the outcome"
        );
    }
}

#[test]
fn changing_threads_mid_run_does_not_change_states() {
    let reference = {
        let mut engine = BorderLife::new(random_grid(16, 16, 0.4, 0xA1));
        engine.step_n(8);
        live_set(engine.grid())
    };

    let mut engine = BorderLife::new(random_grid(16, 16, 0.4, 0xA1));
    engine.step_n(3);
    engine.set_threads(5).unwrap();
    engine.step_n(5);
    assert_eq!(live_set(engine.grid()), reference);
}

#[test]
fn generation_counter_tracks_advances() {
    let mut engine = BorderLife::new(build_grid(4, 5, START_4X5));
    assert_eq!(engine.generation(), 0);
    engine.step();
    assert_eq!(engine.generation(), 1);
    engine.step_n(7);
    assert_eq!(engine.generation(), 8);
    engine.step_n(0);
    assert_eq!(engine.generation(), 8);
}

#[test]
fn zero_noise_runs_are_reproducible() {
    let mut first = BorderLife::new(random_grid(20, 20, 0.3, 0xBEEF));
    let mut second = BorderLife::new(random_grid(20, 20, 0.3, 0xBEEF));
    first.step_n(15);
    second.step_n(15);
    assert_eq!(live_set(first.grid()), live_set(second.grid()));
}

#[test]
fn noise_toggles_exactly_that_many_cells() {
    // Noise coordinates are distinct within one generation, so regardless
    // of which cells the rng picks, exactly `noise` cells must differ from
    // the deterministic outcome of the same generation.
    let mut engine = BorderLife::new(build_grid(4, 5, START_4X5));
    engine.set_noise(10).unwrap();
    let grid = engine.step();

    let expected: HashSet<(usize, usize)> = AFTER_ONE.iter().copied().collect();
    let mut differing = 0;
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            if grid.is_alive(row, col) != expected.contains(&(row, col)) {
                differing += 1;
            }
        }
    }
    assert_eq!(differing, 10);
}

#[test]
fn noise_differs_by_its_count_on_a_random_board() {
    let start = random_grid(12, 12, 0.3, 0xC0DE);
    let noiseless = {
        let mut engine = BorderLife::new(random_grid(12, 12, 0.3, 0xC0DE));
        engine.step();
        live_set(engine.grid())
    };

    let config = BorderLifeConfig::default().noise(3).seed(7);
    let mut engine = BorderLife::with_config(start, config).unwrap();
    let grid = engine.step();

    let mut differing = 0;
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            if grid.is_alive(row, col) != noiseless.contains(&(row, col)) {
                differing += 1;
            }
        }
    }
    assert_eq!(differing, 3);
}

#[test]
fn alive_chance_zero_and_one_are_exact() {
    let engine = BorderLife::random(6, 9, 0.0).unwrap();
    assert_eq!(engine.grid().population(), 0);

    let engine = BorderLife::random(6, 9, 1.0).unwrap();
    assert_eq!(engine.grid().population(), 6 * 9);
}

#[test]
fn seeded_random_engines_match() {
    let config = BorderLifeConfig::default().seed(0x5EED);
    let first = BorderLife::random_with(10, 10, 0.5, config.clone()).unwrap();
    let second = BorderLife::random_with(10, 10, 0.5, config).unwrap();
    assert_eq!(live_set(first.grid()), live_set(second.grid()));
}

#[test]
fn empty_board_stays_empty() {
    let mut engine = BorderLife::new(build_grid(8, 8, &[]));
    engine.step_n(10);
    assert_eq!(engine.grid().population(), 0);
}
