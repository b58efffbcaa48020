// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-vibspec project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Peak detection configuration module
//!
//! Both pipeline variants share one parameterized detector: the primary
//! variant keeps the single highest peak per 500 cm⁻¹ band up to 6000 cm⁻¹,
//! the width-aware variant keeps the top two per band up to 4000 cm⁻¹ and
//! adds a full-width-at-half-maximum estimate.

use serde::{Deserialize, Serialize};

/// Configuration of the band-wise peak detector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeakConfig {
    /// Width of each search band in cm⁻¹
    #[serde(default = "default_band_width")]
    pub band_width: f64,

    /// Bands cover `[0, upper_bound)` in cm⁻¹
    #[serde(default = "default_upper_bound")]
    pub upper_bound: f64,

    /// Maximum number of peaks kept per band
    #[serde(default = "default_peaks_per_band")]
    pub peaks_per_band: usize,

    /// Compute the full width at half maximum for each kept peak
    #[serde(default)]
    pub compute_widths: bool,
}

// Default value functions
fn default_band_width() -> f64 {
    500.0
}

fn default_upper_bound() -> f64 {
    6000.0
}

fn default_peaks_per_band() -> usize {
    1
}

impl Default for PeakConfig {
    fn default() -> Self {
        Self {
            band_width: default_band_width(),
            upper_bound: default_upper_bound(),
            peaks_per_band: default_peaks_per_band(),
            compute_widths: false,
        }
    }
}

impl PeakConfig {
    /// Width-aware variant: two peaks per band with widths, up to 4000 cm⁻¹
    pub fn width_aware() -> Self {
        Self {
            band_width: default_band_width(),
            upper_bound: 4000.0,
            peaks_per_band: 2,
            compute_widths: true,
        }
    }
}
