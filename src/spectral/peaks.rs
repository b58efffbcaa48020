// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-vibspec project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Band-wise peak detection over a wavenumber spectrum
//!
//! The display range is partitioned into fixed-width bands and each band is
//! searched for strict local maxima. The primary configuration keeps the
//! single highest maximum per band; the width-aware configuration keeps the
//! top two and computes each one's full width at half maximum. Bands without
//! a qualifying maximum are skipped silently.

use log::debug;
use serde::Serialize;

use super::transform::{Spectrum, SpectrumError};

/// A detected peak and the band that produced it
#[derive(Debug, Clone, Serialize)]
pub struct PeakCandidate {
    /// Peak position in cm⁻¹; always inside `[band.0, band.1)`
    pub wavenumber: f64,
    /// Spectral amplitude at the peak
    pub amplitude: f64,
    /// Half-open wavenumber interval of the owning band
    pub band: (f64, f64),
    /// Full width at half maximum in cm⁻¹, when width computation is enabled
    pub width: Option<f64>,
}

/// Band-partitioned local-maximum peak detector
pub struct BandPeakDetector {
    /// Width of each band in cm⁻¹
    band_width: f64,
    /// Bands cover `[0, upper_bound)`
    upper_bound: f64,
    /// Maximum number of peaks kept per band
    peaks_per_band: usize,
    /// Compute the full width at half maximum for each kept peak
    compute_widths: bool,
    /// Minimum amplitude for a local maximum to qualify
    min_amplitude: f64,
}

impl BandPeakDetector {
    /// Primary configuration: 500 cm⁻¹ bands up to 6000 cm⁻¹, one peak per band
    pub fn new() -> Self {
        Self {
            band_width: 500.0,
            upper_bound: 6000.0,
            peaks_per_band: 1,
            compute_widths: false,
            min_amplitude: 0.0,
        }
    }

    /// Width-aware configuration: bands up to 4000 cm⁻¹, two peaks per band
    /// with full-width-at-half-maximum estimation
    pub fn width_aware() -> Self {
        Self {
            band_width: 500.0,
            upper_bound: 4000.0,
            peaks_per_band: 2,
            compute_widths: true,
            min_amplitude: 0.0,
        }
    }

    /// Set the band width in cm⁻¹
    pub fn with_band_width(mut self, band_width: f64) -> Self {
        self.band_width = band_width;
        self
    }

    /// Set the upper bound of the banded range in cm⁻¹
    pub fn with_upper_bound(mut self, upper_bound: f64) -> Self {
        self.upper_bound = upper_bound;
        self
    }

    /// Set the maximum number of peaks kept per band
    pub fn with_peaks_per_band(mut self, peaks_per_band: usize) -> Self {
        self.peaks_per_band = peaks_per_band.max(1);
        self
    }

    /// Enable or disable full-width-at-half-maximum computation
    pub fn with_widths(mut self, compute_widths: bool) -> Self {
        self.compute_widths = compute_widths;
        self
    }

    /// Detect per-band dominant peaks, ordered by wavenumber
    ///
    /// Fails with [`SpectrumError::NonAscendingAxis`] if the input violates
    /// the strictly-ascending axis contract.
    pub fn detect(&self, spectrum: &Spectrum) -> Result<Vec<PeakCandidate>, SpectrumError> {
        spectrum.check_ascending()?;

        let mut peaks = Vec::new();
        let mut lower = 0.0f64;
        while lower < self.upper_bound {
            let upper = lower + self.band_width;
            self.detect_in_band(spectrum, lower, upper, &mut peaks);
            lower = upper;
        }

        peaks.sort_by(|a, b| a.wavenumber.total_cmp(&b.wavenumber));
        debug!("peak detection: {} peaks across banded range", peaks.len());
        Ok(peaks)
    }

    /// Detect peaks within one band's half-open interval `[lower, upper)`
    fn detect_in_band(
        &self,
        spectrum: &Spectrum,
        lower: f64,
        upper: f64,
        peaks: &mut Vec<PeakCandidate>,
    ) {
        let start = spectrum.wavenumbers.partition_point(|&w| w < lower);
        let end = spectrum.wavenumbers.partition_point(|&w| w < upper);
        if end <= start {
            return;
        }
        let sub_wn = &spectrum.wavenumbers[start..end];
        let sub_amp = &spectrum.amplitudes[start..end];

        let maxima = local_maxima(sub_amp, self.min_amplitude);
        if maxima.is_empty() {
            return;
        }
        // The width-aware variant only reports bands with at least two maxima
        if self.compute_widths && maxima.len() < 2 {
            return;
        }

        // Highest amplitude first; equal amplitudes prefer lower wavenumber
        let mut ranked = maxima;
        ranked.sort_by(|&a, &b| {
            sub_amp[b].total_cmp(&sub_amp[a]).then(a.cmp(&b))
        });
        ranked.truncate(self.peaks_per_band);

        for idx in ranked {
            let width = if self.compute_widths {
                Some(half_maximum_width(sub_amp, sub_wn, idx))
            } else {
                None
            };
            peaks.push(PeakCandidate {
                wavenumber: sub_wn[idx],
                amplitude: sub_amp[idx],
                band: (lower, upper),
                width,
            });
        }
    }
}

impl Default for BandPeakDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Indices of strict local maxima with amplitude at or above the threshold
///
/// A sample qualifies when it is strictly greater than both neighbors;
/// endpoints never qualify.
fn local_maxima(amplitudes: &[f64], threshold: f64) -> Vec<usize> {
    let mut maxima = Vec::new();
    for i in 1..amplitudes.len().saturating_sub(1) {
        if amplitudes[i] > amplitudes[i - 1]
            && amplitudes[i] > amplitudes[i + 1]
            && amplitudes[i] >= threshold
        {
            maxima.push(i);
        }
    }
    maxima
}

/// Full width at half maximum of the peak at `idx`, in wavenumber units
///
/// Walks outward from the peak to the half-maximum crossings, interpolating
/// the fractional bin position, and scales the crossing distance by the
/// band's local bin spacing. Crossings that run off the band are clamped to
/// its edge.
fn half_maximum_width(amplitudes: &[f64], wavenumbers: &[f64], idx: usize) -> f64 {
    let half = amplitudes[idx] / 2.0;

    // Left crossing
    let mut left = 0.0f64;
    for i in (0..idx).rev() {
        if amplitudes[i] <= half {
            let frac = (half - amplitudes[i]) / (amplitudes[i + 1] - amplitudes[i]);
            left = i as f64 + frac;
            break;
        }
    }

    // Right crossing
    let mut right = (amplitudes.len() - 1) as f64;
    for i in idx + 1..amplitudes.len() {
        if amplitudes[i] <= half {
            let frac = (amplitudes[i - 1] - half) / (amplitudes[i - 1] - amplitudes[i]);
            right = (i - 1) as f64 + frac;
            break;
        }
    }

    let spacing = if wavenumbers.len() >= 2 {
        wavenumbers[1] - wavenumbers[0]
    } else {
        0.0
    };
    (right - left) * spacing
}
