use std::thread::available_parallelism;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::{Error, Result};

/// Chunk count used when the machine has fewer cores than this.
pub const DEFAULT_CHUNK_COUNT: usize = 40;

/// Capacity of each worker's `BufReader`.
pub const DEFAULT_READ_BUFFER: usize = 2 * 1024 * 1024;

/// Tunables for one aggregation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// How many line-aligned chunks to split the input into. Small inputs may yield fewer.
    pub chunk_count: usize,
    /// Worker threads; `None` sizes the pool to the available cores.
    pub threads: Option<usize>,
    pub read_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            chunk_count: default_chunk_count(),
            threads: None,
            read_buffer: DEFAULT_READ_BUFFER,
        }
    }
}

/// At least one chunk per core, and never fewer than [`DEFAULT_CHUNK_COUNT`].
pub fn default_chunk_count() -> usize {
    let cores = available_parallelism().map(|n| n.get()).unwrap_or(1);
    DEFAULT_CHUNK_COUNT.max(cores)
}

impl Config {
    pub fn with_chunk_count(mut self, chunk_count: usize) -> Self {
        self.chunk_count = chunk_count;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_read_buffer(mut self, read_buffer: usize) -> Self {
        self.read_buffer = read_buffer;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.chunk_count == 0 {
            return Err(Error::InvalidConfig("chunk count must be positive".into()));
        }
        if self.threads == Some(0) {
            return Err(Error::InvalidConfig("thread count must be positive".into()));
        }
        if self.read_buffer == 0 {
            return Err(Error::InvalidConfig("read buffer must be positive".into()));
        }
        Ok(())
    }

    pub(crate) fn build_pool(&self) -> Result<ThreadPool> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(self.threads.unwrap_or(0))
            .thread_name(|i| format!("chunk-worker-{i}"))
            .build()?;
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_covers_every_core() {
        let config = Config::default();
        assert!(config.chunk_count >= DEFAULT_CHUNK_COUNT);
        assert!(config.chunk_count >= available_parallelism().map(|n| n.get()).unwrap_or(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_values_are_rejected() {
        let base = Config::default();
        for config in [
            base.clone().with_chunk_count(0),
            base.clone().with_threads(0),
            base.with_read_buffer(0),
        ] {
            assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        }
    }

    #[test]
    fn pool_honours_thread_count() {
        let pool = Config::default().with_threads(3).build_pool().unwrap();
        assert_eq!(pool.current_num_threads(), 3);
    }
}
