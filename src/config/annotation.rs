// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-vibspec project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Annotation layout configuration module
//!
//! Named constants of the label placement heuristic. The defaults were tuned
//! against the reference plot aspect ratio and amplitude scale; there is no
//! documented derivation for them, so treat them as a matched set rather than
//! independently adjustable knobs.

use serde::{Deserialize, Serialize};

/// Constants of the annotation placement heuristic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationConfig {
    /// Horizontal label shift in wavenumber units (applied as ±shift)
    #[serde(default = "default_horizontal_shift")]
    pub horizontal_shift: f64,

    /// Default vertical rise above the peak, as a fraction of the global
    /// maximum amplitude
    #[serde(default = "default_rise")]
    pub default_rise: f64,

    /// Vertical rise used when neighboring labels would collide
    #[serde(default = "default_crowded_rise")]
    pub crowded_rise: f64,

    /// Absolute label level for low-frequency peaks, as a fraction of the
    /// global maximum amplitude
    #[serde(default = "default_low_freq_level")]
    pub low_freq_level: f64,

    /// Peaks below this wavenumber use the low-frequency placement rule
    #[serde(default = "default_low_freq_limit")]
    pub low_freq_limit: f64,

    /// Peaks below this wavenumber (and above the low-frequency limit) are
    /// shifted left instead of raised
    #[serde(default = "default_mid_freq_limit")]
    pub mid_freq_limit: f64,

    /// Gap to the previous peak below which labels are considered crowded
    #[serde(default = "default_crowding_gap")]
    pub crowding_gap: f64,

    /// Clamping margin at the axis bounds, as a fraction of the upper bound
    #[serde(default = "default_clamp_margin")]
    pub clamp_margin: f64,

    /// Clamping margin for the low-frequency rule, as a fraction of the
    /// upper bound
    #[serde(default = "default_low_freq_clamp_margin")]
    pub low_freq_clamp_margin: f64,

    /// Length factor applied to shortened arrows
    #[serde(default = "default_arrow_shorten_factor")]
    pub arrow_shorten_factor: f64,
}

// Default value functions
fn default_horizontal_shift() -> f64 {
    40.0
}

fn default_rise() -> f64 {
    0.06
}

fn default_crowded_rise() -> f64 {
    0.26
}

fn default_low_freq_level() -> f64 {
    0.5
}

fn default_low_freq_limit() -> f64 {
    200.0
}

fn default_mid_freq_limit() -> f64 {
    1000.0
}

fn default_crowding_gap() -> f64 {
    350.0
}

fn default_clamp_margin() -> f64 {
    0.05
}

fn default_low_freq_clamp_margin() -> f64 {
    0.10
}

fn default_arrow_shorten_factor() -> f64 {
    0.8 // 20% shorter
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            horizontal_shift: default_horizontal_shift(),
            default_rise: default_rise(),
            crowded_rise: default_crowded_rise(),
            low_freq_level: default_low_freq_level(),
            low_freq_limit: default_low_freq_limit(),
            mid_freq_limit: default_mid_freq_limit(),
            crowding_gap: default_crowding_gap(),
            clamp_margin: default_clamp_margin(),
            low_freq_clamp_margin: default_low_freq_clamp_margin(),
            arrow_shorten_factor: default_arrow_shorten_factor(),
        }
    }
}
