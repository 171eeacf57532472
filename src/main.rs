#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;
use std::time::Instant;

use border_life::engine::DEFAULT_ALIVE_CHANCE;
use border_life::{BorderLife, BorderLifeConfig, pattern};

const USAGE: &str = "usage: border-life --rows N --cols N [options]

options:
  --rows N             number of rows in the grid (required)
  --cols N             number of columns in the grid (required)
  --threads N          worker threads per generation (default: platform cores)
  --noise N            random cells toggled each generation (default: 0)
  --sleep MS           pause between generations in milliseconds (default: 100)
  --iterations N       stop after N generations (default: run forever)
  --suppress-output    do not print the board each generation
  --start-alive P      chance each cell starts alive, 0.0 to 1.0 (default: 0.25)
  --grid FILE          load the starting state from a pattern file
                       ('x' = alive, anything else = dead)
  --seed N             seed the random source for reproducible runs
  --help               show this message";

struct MainArgs {
    rows: usize,
    cols: usize,
    config: BorderLifeConfig,
    sleep_ms: u64,
    iterations: Option<u64>,
    suppress_output: bool,
    start_alive: f64,
    grid_file: Option<PathBuf>,
}

fn parse_args() -> MainArgs {
    let args: Vec<String> = std::env::args().collect();
    let next_arg = |i: usize, flag: &str| -> &str {
        args.get(i)
            .map(String::as_str)
            .unwrap_or_else(|| panic!("{flag} requires a value"))
    };

    let mut rows = None;
    let mut cols = None;
    let mut config = BorderLifeConfig::default();
    let mut sleep_ms = 100;
    let mut iterations = None;
    let mut suppress_output = false;
    let mut start_alive = DEFAULT_ALIVE_CHANCE;
    let mut grid_file = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--rows" => {
                i += 1;
                rows = Some(
                    next_arg(i, "--rows")
                        .parse()
                        .expect("--rows requires a positive integer"),
                );
            }
            "--cols" => {
                i += 1;
                cols = Some(
                    next_arg(i, "--cols")
                        .parse()
                        .expect("--cols requires a positive integer"),
                );
            }
            "--threads" => {
                i += 1;
                let n: usize = next_arg(i, "--threads")
                    .parse()
                    .expect("--threads requires a positive integer");
                config = config.thread_count(n);
            }
            "--noise" => {
                i += 1;
                let n: usize = next_arg(i, "--noise")
                    .parse()
                    .expect("--noise requires a non-negative integer");
                config = config.noise(n);
            }
            "--sleep" => {
                i += 1;
                sleep_ms = next_arg(i, "--sleep")
                    .parse()
                    .expect("--sleep requires a number of milliseconds");
            }
            "--iterations" => {
                i += 1;
                iterations = Some(
                    next_arg(i, "--iterations")
                        .parse()
                        .expect("--iterations requires a non-negative integer"),
                );
            }
            "--suppress-output" => {
                suppress_output = true;
            }
            "--start-alive" => {
                i += 1;
                start_alive = next_arg(i, "--start-alive")
                    .parse()
                    .expect("--start-alive requires a number between 0.0 and 1.0");
            }
            "--grid" => {
                i += 1;
                grid_file = Some(PathBuf::from(next_arg(i, "--grid")));
            }
            "--seed" => {
                i += 1;
                let seed: u64 = next_arg(i, "--seed")
                    .parse()
                    .expect("--seed requires an integer");
                config = config.seed(seed);
            }
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => panic!("unknown argument: {other}\n{USAGE}"),
        }
        i += 1;
    }

    let rows = rows.unwrap_or_else(|| panic!("--rows is required\n{USAGE}"));
    let cols = cols.unwrap_or_else(|| panic!("--cols is required\n{USAGE}"));

    MainArgs {
        rows,
        cols,
        config,
        sleep_ms,
        iterations,
        suppress_output,
        start_alive,
        grid_file,
    }
}

fn main() {
    let args = parse_args();

    let engine = match &args.grid_file {
        Some(path) => pattern::load(path, args.rows, args.cols)
            .and_then(|grid| BorderLife::with_config(grid, args.config.clone())),
        None => {
            BorderLife::random_with(args.rows, args.cols, args.start_alive, args.config.clone())
        }
    };
    let mut engine = match engine {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let start = Instant::now();
    if !args.suppress_output {
        println!("{} {}", args.rows, args.cols);
    }
    while args.iterations.is_none_or(|max| engine.generation() < max) {
        if !args.suppress_output {
            println!("{}", engine.grid().render_parallel());
        }
        engine.step();
        std::thread::sleep(std::time::Duration::from_millis(args.sleep_ms));
    }
    println!("{}ms", start.elapsed().as_millis());
}
