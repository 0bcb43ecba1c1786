//! Configuration for graph construction and clustering runs

/// Default configuration for MST computation and clustering.
///
/// Point dimensionality is threaded explicitly from here (or from ingestion
/// arguments) instead of living in global mutable state.
pub struct Config {
    /// Dimensionality of ingested points
    pub dimension: usize,

    /// Worker count for the distributed algorithm (0 = one per core)
    pub workers: usize,

    /// Node count above which quality metrics switch to the parallel path
    pub parallel_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dimension: 2,
            workers: 0,
            parallel_threshold: 1000,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(dimension: usize, workers: usize, parallel_threshold: usize) -> Self {
        Self {
            dimension,
            workers,
            parallel_threshold,
        }
    }
}
