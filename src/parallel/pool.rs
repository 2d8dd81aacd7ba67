//! Rayon thread pool sizing for batch report parsing.
//!
//! Use [WorkerPool::install] to parse independent documents on a fixed number
//! of threads, or rely on Rayon's default (all CPU cores).

use rayon::ThreadPoolBuilder;
use tracing::warn;

/// Configures how many worker threads parse documents concurrently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerPool {
    /// Number of worker threads. If 0, use the Rayon default (num_cpus).
    pub workers: usize,
}

impl WorkerPool {
    /// Use exactly `n` worker threads.
    pub fn with_workers(n: usize) -> Self {
        Self { workers: n }
    }

    /// Run a closure on a thread pool with this worker count. If
    /// [workers](WorkerPool::workers) is 0, or a dedicated pool cannot be
    /// built, the global Rayon pool is used.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            return f();
        }
        match ThreadPoolBuilder::new().num_threads(self.workers).build() {
            Ok(pool) => pool.install(f),
            Err(err) => {
                warn!(workers = self.workers, error = %err, "falling back to the global rayon pool");
                f()
            }
        }
    }
}
