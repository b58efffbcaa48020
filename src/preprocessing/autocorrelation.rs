// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-vibspec project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Chunked parallel autocorrelation of a dipole moment transient
//!
//! Long molecular dynamics transients (tens of millions of points) make a full
//! autocorrelation impractical, so the signal is split into contiguous chunks
//! and each chunk's one-sided autocorrelation is computed independently on a
//! worker pool. The per-chunk results are then summed elementwise into a
//! single lag-indexed profile.
//!
//! Note that the reduction aligns every chunk at lag 0: a chunk's local lag
//! index is treated as the global lag index, so all chunks accumulate onto the
//! same early region of the output. The result is a locally-averaged
//! autocorrelation profile, not the autocorrelation of the whole signal. This
//! aliasing is intentional and downstream peak positions depend on it; do not
//! "fix" it by offsetting chunks to their original positions.

use log::debug;
use rayon::prelude::*;
use std::ops::Range;
use thiserror::Error;

/// Errors produced by the autocorrelation engine
#[derive(Debug, Error)]
pub enum AutocorrError {
    /// The input series contained no samples
    #[error("cannot autocorrelate an empty series")]
    EmptyInput,

    /// The worker pool could not be constructed
    #[error("failed to build worker pool: {0}")]
    PoolBuild(String),
}

/// Chunked autocorrelation engine backed by a fixed-size worker pool
///
/// The engine partitions the input into contiguous chunks of at least
/// [`ChunkedAutocorrelation::MIN_CHUNK_LEN`] samples, computes each chunk's
/// one-sided autocorrelation in parallel and reduces the results into one
/// output array of the same length as the input. The reduction only starts
/// after every worker has returned; a panic in any worker aborts the whole
/// computation with no partial result.
pub struct ChunkedAutocorrelation {
    workers: usize,
}

impl ChunkedAutocorrelation {
    /// Minimum number of samples per chunk
    pub const MIN_CHUNK_LEN: usize = 1000;

    /// Create a new engine using all available hardware parallelism
    pub fn new() -> Self {
        Self {
            workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }

    /// Set the number of workers in the pool
    ///
    /// A value of zero is treated as one worker.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Number of workers this engine will use
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Partition `[0, n)` into contiguous, non-overlapping chunk ranges
    ///
    /// Chunk size is `max(MIN_CHUNK_LEN, n / (10 * workers))`; the final chunk
    /// absorbs the remainder and may be shorter.
    pub fn chunk_ranges(&self, n: usize) -> Vec<Range<usize>> {
        let chunk_size = Self::MIN_CHUNK_LEN.max(n / (10 * self.workers));
        let mut ranges = Vec::with_capacity(n / chunk_size + 1);
        let mut start = 0;
        while start < n {
            let end = (start + chunk_size).min(n);
            ranges.push(start..end);
            start = end;
        }
        ranges
    }

    /// Compute the chunked autocorrelation of a mean-centered signal
    ///
    /// Returns a vector of the same length as `signal`. Summation order over
    /// chunks does not affect the result; accumulation is done in f64 to keep
    /// cancellation error negligible on long transients.
    pub fn compute(&self, signal: &[f64]) -> Result<Vec<f64>, AutocorrError> {
        if signal.is_empty() {
            return Err(AutocorrError::EmptyInput);
        }

        let ranges = self.chunk_ranges(signal.len());
        debug!(
            "autocorrelation: {} samples, {} chunks, {} workers",
            signal.len(),
            ranges.len(),
            self.workers
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|e| AutocorrError::PoolBuild(e.to_string()))?;

        // Parallel map over chunks. collect() is the join point: every worker
        // has finished before the reduction below starts, and a worker panic
        // propagates out of install() before any output is produced.
        let partials: Vec<Vec<f64>> = pool.install(|| {
            ranges
                .par_iter()
                .map(|r| one_sided_autocorrelation(&signal[r.clone()]))
                .collect()
        });

        // Reduce: every chunk result is summed starting at index 0, so local
        // lag aliases onto global lag (see module docs).
        let mut autocorr = vec![0.0f64; signal.len()];
        for partial in &partials {
            for (acc, &value) in autocorr.iter_mut().zip(partial.iter()) {
                *acc += value;
            }
        }

        Ok(autocorr)
    }
}

impl Default for ChunkedAutocorrelation {
    fn default() -> Self {
        Self::new()
    }
}

/// One-sided autocorrelation of a single chunk
///
/// For lag `k` this is `sum over i of x[i] * x[i + k]`, i.e. the non-negative
/// lag half of the full self-correlation. Index 0 of the result is lag 0 (the
/// sum of squared samples, the largest magnitude value).
fn one_sided_autocorrelation(chunk: &[f64]) -> Vec<f64> {
    let n = chunk.len();
    let mut result = Vec::with_capacity(n);
    for lag in 0..n {
        let mut sum = 0.0f64;
        for i in 0..n - lag {
            sum += chunk[i] * chunk[i + lag];
        }
        result.push(sum);
    }
    result
}
