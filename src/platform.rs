//! Platform parallelism hint, resolved once at startup.

use std::sync::OnceLock;

static PARALLELISM_HINT: OnceLock<usize> = OnceLock::new();

/// Default degree of parallelism for compute and rendering.
///
/// Resolved on first use: the `BORDER_LIFE_THREADS` environment variable
/// when set to a positive integer, otherwise the physical core count.
/// Explicit per-engine or per-call thread counts override this hint.
pub fn parallelism_hint() -> usize {
    *PARALLELISM_HINT.get_or_init(|| {
        env_thread_override().unwrap_or_else(|| num_cpus::get_physical().max(1))
    })
}

fn env_thread_override() -> Option<usize> {
    std::env::var("BORDER_LIFE_THREADS")
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
}
