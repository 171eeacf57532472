use std::time::Instant;

use border_life::{BorderLife, BorderLifeConfig};

const SIDE: usize = 1024;
const DENSITY: f64 = 0.42;
const ITERATIONS: u64 = 100;
const SEED: u64 = 0x5EED_1234_ABCD_EF01;

fn bench_threads(threads: usize) -> (f64, usize) {
    let config = BorderLifeConfig::default()
        .thread_count(threads)
        .seed(SEED);
    let mut engine =
        BorderLife::random_with(SIDE, SIDE, DENSITY, config).expect("bench engine construction");

    let start = Instant::now();
    engine.step_n(ITERATIONS);
    let duration = start.elapsed();

    let total_ms = duration.as_secs_f64() * 1000.0;
    (total_ms, engine.grid().population())
}

fn main() {
    let thread_counts = [1usize, 2, 4, 8];

    println!(
        "{:<10} {:>8} {:>12} {:>12} {:>10}",
        "Grid", "Threads", "Iters", "Total(ms)", "Avg(ms)"
    );
    println!("{}", "-".repeat(56));

    let mut reference_pop = None;
    for &threads in &thread_counts {
        let (total_ms, pop) = bench_threads(threads);
        let avg_ms = total_ms / ITERATIONS as f64;
        println!(
            "{:<10} {:>8} {:>12} {:>12.1} {:>10.4}",
            format!("{SIDE}x{SIDE}"),
            threads,
            ITERATIONS,
            total_ms,
            avg_ms
        );
        // Same seed, so every thread count must land on the same board.
        match reference_pop {
            None => reference_pop = Some(pop),
            Some(expected) => assert_eq!(pop, expected, "thread count changed the outcome"),
        }
    }
}
