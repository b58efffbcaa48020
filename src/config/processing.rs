// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-vibspec project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Processing configuration module
//!
//! Parameters of the autocorrelation and spectral-transform stages. The
//! defaults encode the molecular dynamics pipeline constants: a 2 fs sample
//! interval, a 3 THz low-frequency cutoff and a 6000 cm⁻¹ display range.

use serde::{Deserialize, Serialize};

/// Configuration for the autocorrelation and spectral transform stages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Number of autocorrelation workers; `None` uses all available cores
    #[serde(default)]
    pub workers: Option<usize>,

    /// Sample interval of the transient in seconds
    #[serde(default = "default_time_step")]
    pub time_step: f64,

    /// Low-frequency cutoff in Hz; bins strictly below it are zeroed
    #[serde(default = "default_cutoff_frequency_hz")]
    pub cutoff_frequency_hz: f64,

    /// Upper bound of the wavenumber display range in cm⁻¹
    #[serde(default = "default_max_wavenumber")]
    pub max_wavenumber: f64,

    /// Fixed amplitude scale applied after the 2/N normalization
    #[serde(default = "default_display_scale")]
    pub display_scale: f64,
}

// Default value functions
fn default_time_step() -> f64 {
    2e-15 // 2 fs per trajectory frame
}

fn default_cutoff_frequency_hz() -> f64 {
    3e12 // 3 THz
}

fn default_max_wavenumber() -> f64 {
    6000.0
}

fn default_display_scale() -> f64 {
    1e4
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            workers: None,
            time_step: default_time_step(),
            cutoff_frequency_hz: default_cutoff_frequency_hz(),
            max_wavenumber: default_max_wavenumber(),
            display_scale: default_display_scale(),
        }
    }
}
