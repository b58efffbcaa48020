// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-vibspec project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Windowed spectral transform of a dipole transient
//!
//! Turns a real time-domain signal into an amplitude spectrum on a wavenumber
//! axis:
//!
//! 1. Apply a Hann window to reduce spectral leakage
//! 2. Forward FFT, keeping only the non-negative frequency bins
//! 3. Zero out everything below the low-frequency cutoff (DC and drift)
//! 4. Convert the axis from Hz to THz to wavenumbers (cm⁻¹)
//! 5. Restrict to the display range and scale the amplitudes
//!
//! The transform is run twice per transient: once on the autocorrelation
//! output and once on the raw mean-centered signal.

use log::debug;
use rustfft::{num_complex::Complex, FftPlanner};
use serde::Serialize;
use thiserror::Error;

/// Conversion factor from THz to wavenumbers: ṽ [cm⁻¹] = f [THz] / 0.03
const THZ_PER_WAVENUMBER: f64 = 0.03;

/// Errors produced by the spectral stages
#[derive(Debug, Error)]
pub enum SpectrumError {
    /// The input signal contained no samples
    #[error("cannot transform an empty signal")]
    EmptyInput,

    /// Wavenumber axis violated the strictly-ascending contract
    #[error("wavenumber axis is not strictly ascending at index {0}")]
    NonAscendingAxis(usize),
}

/// An amplitude spectrum on a wavenumber axis
///
/// `wavenumbers` is strictly ascending and `amplitudes` is non-negative; both
/// have the same length and are restricted to the display range.
#[derive(Debug, Clone, Serialize)]
pub struct Spectrum {
    /// Wavenumber axis in cm⁻¹
    pub wavenumbers: Vec<f64>,
    /// Spectral amplitude in arbitrary display units
    pub amplitudes: Vec<f64>,
}

impl Spectrum {
    /// Number of spectral bins
    pub fn len(&self) -> usize {
        self.wavenumbers.len()
    }

    /// Whether the spectrum holds no bins
    pub fn is_empty(&self) -> bool {
        self.wavenumbers.is_empty()
    }

    /// Verify the strictly-ascending axis contract
    pub fn check_ascending(&self) -> Result<(), SpectrumError> {
        for (i, pair) in self.wavenumbers.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(SpectrumError::NonAscendingAxis(i + 1));
            }
        }
        Ok(())
    }
}

/// Windowed FFT transform producing a wavenumber-axis spectrum
pub struct SpectralTransformer {
    /// Sample interval of the transient in seconds
    time_step: f64,
    /// Bins strictly below this frequency (Hz) are zeroed before conversion
    cutoff_frequency_hz: f64,
    /// Upper bound of the wavenumber display range in cm⁻¹
    max_wavenumber: f64,
    /// Fixed amplitude scale applied after the 2/N normalization
    display_scale: f64,
}

impl SpectralTransformer {
    /// Create a transformer for the given sample interval
    ///
    /// Defaults match the molecular dynamics pipeline: 3 THz low-frequency
    /// cutoff, 6000 cm⁻¹ display range, 1e4 display scale.
    pub fn new(time_step: f64) -> Self {
        Self {
            time_step,
            cutoff_frequency_hz: 3e12,
            max_wavenumber: 6000.0,
            display_scale: 1e4,
        }
    }

    /// Set the low-frequency cutoff in Hz
    pub fn with_cutoff_frequency(mut self, cutoff_hz: f64) -> Self {
        self.cutoff_frequency_hz = cutoff_hz;
        self
    }

    /// Set the upper bound of the wavenumber display range
    pub fn with_max_wavenumber(mut self, max_wavenumber: f64) -> Self {
        self.max_wavenumber = max_wavenumber;
        self
    }

    /// Set the fixed amplitude display scale
    pub fn with_display_scale(mut self, scale: f64) -> Self {
        self.display_scale = scale;
        self
    }

    /// Apply a Hann window to the signal
    ///
    /// The window is 1 at the center and tapers smoothly to 0 at both ends.
    pub fn apply_window(&self, signal: &[f64]) -> Vec<f64> {
        let n = signal.len();
        if n == 1 {
            // Degenerate single-sample window is all-pass
            return signal.to_vec();
        }
        signal
            .iter()
            .enumerate()
            .map(|(i, &x)| {
                let w = 0.5
                    * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / (n - 1) as f64).cos());
                x * w
            })
            .collect()
    }

    /// Forward FFT of a real signal
    fn compute_fft(&self, signal: &[f64]) -> Vec<Complex<f64>> {
        let mut buffer: Vec<Complex<f64>> =
            signal.iter().map(|&x| Complex::new(x, 0.0)).collect();

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(signal.len());
        fft.process(&mut buffer);

        buffer
    }

    /// Transform a real signal into a display-range amplitude spectrum
    ///
    /// The signal is windowed and transformed; the first `N/2` bins are kept
    /// at spacing `1/(N·Δt)` Hz, bins below the cutoff are zeroed, the axis is
    /// converted to cm⁻¹ and both arrays are restricted to the display range.
    /// Amplitude is `(2/N)·|bin|` times the display scale.
    pub fn transform(&self, signal: &[f64]) -> Result<Spectrum, SpectrumError> {
        if signal.is_empty() {
            return Err(SpectrumError::EmptyInput);
        }

        let n = signal.len();
        let windowed = self.apply_window(signal);
        let fft_output = self.compute_fft(&windowed);

        let half = n / 2;
        let df = 1.0 / (n as f64 * self.time_step);

        // Last bin strictly below the cutoff, plus one: everything in
        // [0, cutoff_index) is zeroed to remove DC and slow drift.
        let cutoff_index = (0..half)
            .take_while(|&i| (i as f64) * df < self.cutoff_frequency_hz)
            .count();

        let mut wavenumbers = Vec::with_capacity(half);
        let mut amplitudes = Vec::with_capacity(half);
        for i in 0..half {
            let freq_hz = i as f64 * df;
            let wavenumber = freq_hz * 1e-12 / THZ_PER_WAVENUMBER;
            if wavenumber > self.max_wavenumber {
                break;
            }
            let magnitude = if i < cutoff_index {
                0.0
            } else {
                fft_output[i].norm()
            };
            wavenumbers.push(wavenumber);
            amplitudes.push(2.0 / n as f64 * magnitude * self.display_scale);
        }

        debug!(
            "spectral transform: {} samples, {} display bins, cutoff at bin {}",
            n,
            wavenumbers.len(),
            cutoff_index
        );

        Ok(Spectrum {
            wavenumbers,
            amplitudes,
        })
    }
}
