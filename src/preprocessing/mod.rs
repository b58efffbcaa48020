// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-vibspec project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Signal preprocessing module
//!
//! This module handles preprocessing of the dipole moment transient before
//! spectral analysis: mean-centering and the chunked parallel autocorrelation.

pub mod autocorrelation;

pub use autocorrelation::{AutocorrError, ChunkedAutocorrelation};

/// Subtract the mean from a signal
///
/// The dipole magnitude carries a large static offset; removing it before
/// autocorrelation and windowing keeps the DC bin from swamping the spectrum.
pub fn mean_center(signal: &[f64]) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }
    let mean = signal.iter().sum::<f64>() / signal.len() as f64;
    signal.iter().map(|x| x - mean).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_center_removes_offset() {
        let signal = vec![10.0, 11.0, 12.0, 13.0];
        let centered = mean_center(&signal);
        let sum: f64 = centered.iter().sum();
        assert!(sum.abs() < 1e-12);
        assert_eq!(centered[0], -1.5);
        assert_eq!(centered[3], 1.5);
    }

    #[test]
    fn test_mean_center_empty_is_empty() {
        assert!(mean_center(&[]).is_empty());
    }
}
