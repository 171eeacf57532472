//! Double-buffered generation engine with row-partitioned parallel compute.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::LifeError;
use crate::grid::Grid;
use crate::platform;

/// Shares the scratch buffer's base pointer with scoped workers.
struct SendPtr<T> {
    inner: *mut T,
}
unsafe impl<T> Send for SendPtr<T> {}
unsafe impl<T> Sync for SendPtr<T> {}
impl<T> Copy for SendPtr<T> {}
impl<T> Clone for SendPtr<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> SendPtr<T> {
    #[inline(always)]
    fn new(ptr: *mut T) -> Self {
        Self { inner: ptr }
    }
    #[inline(always)]
    fn get(&self) -> *mut T {
        self.inner
    }
}

/// Chance for each cell to start alive when no explicit value is given.
pub const DEFAULT_ALIVE_CHANCE: f64 = 0.25;

/// Configuration for a BorderLife engine instance.
///
/// Use `BorderLifeConfig::default()` for auto-tuned defaults, or customise
/// individual knobs via the builder methods.
#[derive(Clone, Debug, Default)]
pub struct BorderLifeConfig {
    /// Number of worker threads per generation.
    /// `None` means the platform parallelism hint.
    pub thread_count: Option<usize>,
    /// Number of random cells toggled after each generation's compute.
    pub noise: usize,
    /// Seed for the random source (initial population and noise selection).
    /// `None` means OS entropy.
    pub seed: Option<u64>,
}

impl BorderLifeConfig {
    /// Set an explicit worker thread count.
    pub fn thread_count(mut self, n: usize) -> Self {
        self.thread_count = Some(n);
        self
    }

    /// Set the per-generation noise cell count.
    pub fn noise(mut self, n: usize) -> Self {
        self.noise = n;
        self
    }

    /// Seed the random source for reproducible runs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// The Game of Life engine.
///
/// Owns two same-shaped grids: `current` is the authoritative state,
/// `next` is write-only scratch during an advance. Each generation the
/// roles swap by reference exchange; cell data is never copied.
pub struct BorderLife {
    current: Grid,
    next: Grid,
    generation: u64,
    threads: usize,
    noise: usize,
    pool: rayon::ThreadPool,
    rng: StdRng,
}

impl BorderLife {
    /// Create an engine from a starting grid with default configuration.
    pub fn new(start: Grid) -> Self {
        let threads = platform::parallelism_hint();
        Self::build(start, threads, 0, None)
    }

    /// Create an engine from a starting grid with explicit configuration.
    pub fn with_config(start: Grid, config: BorderLifeConfig) -> Result<Self, LifeError> {
        let threads = config
            .thread_count
            .unwrap_or_else(platform::parallelism_hint);
        validate_threads(threads)?;
        validate_noise(config.noise, start.rows() * start.cols())?;
        Ok(Self::build(start, threads, config.noise, config.seed))
    }

    /// Create an engine over a randomly populated `rows x cols` grid where
    /// each cell independently starts alive with probability `alive_chance`.
    pub fn random(rows: usize, cols: usize, alive_chance: f64) -> Result<Self, LifeError> {
        Self::random_with(rows, cols, alive_chance, BorderLifeConfig::default())
    }

    /// Randomly populated engine with explicit configuration.
    pub fn random_with(
        rows: usize,
        cols: usize,
        alive_chance: f64,
        config: BorderLifeConfig,
    ) -> Result<Self, LifeError> {
        let grid = Grid::new(rows, cols)?;
        let mut engine = Self::with_config(grid, config)?;
        for row in 0..rows {
            for col in 0..cols {
                let alive = engine.rng.random::<f64>() < alive_chance;
                engine.current.set_alive(row, col, alive);
            }
        }
        Ok(engine)
    }

    fn build(start: Grid, threads: usize, noise: usize, seed: Option<u64>) -> Self {
        let next = start.same_shape();
        Self {
            current: start,
            next,
            generation: 0,
            threads,
            noise,
            pool: build_pool(threads),
            rng: match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            },
        }
    }

    /// Set the worker thread count for subsequent advances.
    ///
    /// Never changes the computed sequence of states, only the row/worker
    /// assignment and wall-clock performance.
    pub fn set_threads(&mut self, threads: usize) -> Result<(), LifeError> {
        validate_threads(threads)?;
        self.threads = threads;
        self.pool = build_pool(threads);
        Ok(())
    }

    /// Set the number of random cells toggled after each advance.
    ///
    /// Noise coordinates are sampled distinct within one generation, so a
    /// count above the board's cell total could never be satisfied and is
    /// rejected here.
    pub fn set_noise(&mut self, noise: usize) -> Result<(), LifeError> {
        validate_noise(noise, self.current.rows() * self.current.cols())?;
        self.noise = noise;
        Ok(())
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn noise(&self) -> usize {
        self.noise
    }

    /// The current authoritative grid.
    pub fn grid(&self) -> &Grid {
        &self.current
    }

    /// Number of generations advanced so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance one generation and return the resulting grid.
    ///
    /// Rows are assigned round-robin (`worker = row % threads`); workers
    /// read only `current` and write disjoint rows of `next`, so the
    /// compute phase needs no locking. The call blocks until every worker
    /// has finished; a panicking worker propagates out of the scope and
    /// aborts the advance before noise, swap, or counter update.
    pub fn step(&mut self) -> &Grid {
        let rows = self.current.rows();
        let cols = self.current.cols();
        let threads = self.threads;
        let src = &self.current;
        let dst = SendPtr::new(self.next.storage_mut_ptr());

        self.pool.scope(|scope| {
            for worker in 0..threads {
                scope.spawn(move |_| {
                    let dst = dst.get();
                    let mut row = worker;
                    while row < rows {
                        for col in 0..cols {
                            let surrounding = src.alive_surrounding(row, col);
                            let next_alive = if src.is_alive(row, col) {
                                surrounding == 2 || surrounding == 3
                            } else {
                                surrounding == 3
                            };
                            // Safety: each row belongs to exactly one worker
                            // (row % threads == worker), so no slot is written
                            // by two tasks, and `dst` outlives the scope.
                            unsafe {
                                *dst.add(src.storage_index(row, col)) = next_alive;
                            }
                        }
                        row += threads;
                    }
                });
            }
        });

        if self.noise > 0 {
            self.inject_noise();
        }

        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
        &self.current
    }

    /// Advance `n` generations and return the resulting grid.
    pub fn step_n(&mut self, n: u64) -> &Grid {
        for _ in 0..n {
            self.step();
        }
        &self.current
    }

    /// Toggle `noise` random cells of the freshly computed buffer.
    ///
    /// Coordinates are rejection-sampled to be distinct within this batch
    /// only; across generations the same cell may be picked again. At most
    /// `noise` cells differ from the pre-noise state afterwards.
    fn inject_noise(&mut self) {
        let rows = self.current.rows();
        let cols = self.current.cols();
        let mut chosen: Vec<(usize, usize)> = Vec::with_capacity(self.noise);
        while chosen.len() < self.noise {
            let row = self.rng.random_range(0..rows);
            let col = self.rng.random_range(0..cols);
            if chosen.iter().any(|&cell| cell == (row, col)) {
                continue;
            }
            let alive = self.next.is_alive(row, col);
            self.next.set_alive(row, col, !alive);
            chosen.push((row, col));
        }
    }
}

fn build_pool(threads: usize) -> rayon::ThreadPool {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .expect("failed to build border-life rayon thread pool")
}

fn validate_threads(threads: usize) -> Result<(), LifeError> {
    if threads == 0 {
        return Err(LifeError::InvalidConfiguration(
            "thread count must be at least 1".into(),
        ));
    }
    Ok(())
}

fn validate_noise(noise: usize, cells: usize) -> Result<(), LifeError> {
    if noise > cells {
        return Err(LifeError::InvalidConfiguration(format!(
            "noise count {noise} exceeds the {cells} cells on the board"
        )));
    }
    Ok(())
}
