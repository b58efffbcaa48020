// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-vibspec project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Collision-aware label layout for spectrum peaks
//!
//! Converts an ordered peak list into placement instructions for an external
//! renderer. Each peak gets one label (its wavenumber to two decimals) with a
//! position, an optional dashed connecting arrow, and clamping against the
//! axis bounds. The heuristic walks the peaks in frequency order, tracking
//! the previous peak for crowding decisions and the two globally largest
//! peaks for apex-level labeling.
//!
//! Placement rules, evaluated in order with later matches overriding earlier
//! settings (the low-frequency rule alone is terminal):
//!
//! 1. Wavenumber below the low-frequency limit: shift right, lift the label
//!    to a fixed fraction of the tallest peak.
//! 2. Wavenumber below the mid-frequency limit: small rise, shift left.
//! 3. Crowded (gap to previous peak below the crowding gap): large rise,
//!    dashed arrow shortened by 20%, shifted away from the neighbor.
//! 4. One of the two tallest peaks: label sits at the apex, no arrow; a
//!    horizontal shift from rules 2–3 is kept.
//!
//! Afterwards the label is clamped into the axis bounds with a small margin;
//! clamping at the top also forces the right shift so the label clears the
//! peak it would otherwise cover.

use log::debug;
use serde::Serialize;

use crate::config::AnnotationConfig;
use crate::spectral::PeakCandidate;

/// Vertical axis bounds of the target plot
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AxisBounds {
    /// Lower bound of the vertical axis
    pub lower: f64,
    /// Upper bound of the vertical axis
    pub upper: f64,
}

impl AxisBounds {
    /// Bounds a renderer with default 5% margins would pick for amplitudes
    /// in `[0, max_amplitude]`
    pub fn from_max_amplitude(max_amplitude: f64) -> Self {
        Self {
            lower: -0.05 * max_amplitude,
            upper: 1.05 * max_amplitude,
        }
    }
}

/// A label placement instruction for one peak
#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    /// Wavenumber of the annotated peak in cm⁻¹
    pub wavenumber: f64,
    /// Amplitude of the annotated peak
    pub amplitude: f64,
    /// Label text: the wavenumber formatted to two decimals
    pub label: String,
    /// Horizontal label position
    pub text_x: f64,
    /// Vertical label position
    pub text_y: f64,
    /// Draw a dashed arrow from the label to the peak apex
    pub draw_arrow: bool,
    /// Shorten the arrow by the configured factor
    pub shorten_arrow: bool,
}

impl Annotation {
    /// Arrow endpoints derived from the final label position and the peak's
    /// raw coordinates: `(start, end)` as `((x, y), (x, y))`
    pub fn arrow_endpoints(&self, shorten_factor: f64) -> ((f64, f64), (f64, f64)) {
        let factor = if self.shorten_arrow {
            shorten_factor
        } else {
            1.0
        };
        (
            (self.text_x, self.text_y * factor),
            (self.wavenumber, self.amplitude),
        )
    }
}

/// Layout engine turning peaks into annotation instructions
pub struct AnnotationLayoutEngine {
    constants: AnnotationConfig,
}

impl AnnotationLayoutEngine {
    /// Create an engine with the given layout constants
    pub fn new(constants: AnnotationConfig) -> Self {
        Self { constants }
    }

    /// Produce one annotation per peak
    ///
    /// `peaks` must be ordered by wavenumber (as the band detector returns
    /// them). Deterministic: identical input yields identical output.
    pub fn layout(&self, peaks: &[PeakCandidate], bounds: AxisBounds) -> Vec<Annotation> {
        if peaks.is_empty() {
            return Vec::new();
        }
        let c = &self.constants;

        let max_amplitude = peaks
            .iter()
            .map(|p| p.amplitude)
            .fold(f64::NEG_INFINITY, f64::max);
        let apex_indices = two_largest_by_amplitude(peaks);

        let mut annotations = Vec::with_capacity(peaks.len());
        let mut previous_wavenumber: Option<f64> = None;

        for (i, peak) in peaks.iter().enumerate() {
            let freq = peak.wavenumber;
            let amp = peak.amplitude;

            // Rule 1: low-frequency peaks get an absolute level and a right
            // shift so the label stays inside the left axis edge
            if freq < c.low_freq_limit {
                let mut text_y = max_amplitude * c.low_freq_level;
                if text_y > bounds.upper {
                    text_y = bounds.upper - bounds.upper * c.low_freq_clamp_margin;
                }
                annotations.push(self.make(peak, c.horizontal_shift, text_y, false, false));
                previous_wavenumber = Some(freq);
                continue;
            }

            let mut rise = max_amplitude * c.default_rise;
            let mut dx = 0.0;
            let mut draw_arrow = false;
            let mut shorten_arrow = false;

            // Rule 2: mid-frequency peaks shift left so the label clears the
            // crowded fingerprint region
            if freq < c.mid_freq_limit {
                dx = -c.horizontal_shift;
            }

            // Rule 3: crowded neighbors get a taller rise and a shortened
            // arrow, shifted away from the previous label
            if let Some(prev) = previous_wavenumber {
                if freq - prev < c.crowding_gap {
                    rise = max_amplitude * c.crowded_rise;
                    draw_arrow = true;
                    shorten_arrow = true;
                    dx = if freq < prev {
                        -c.horizontal_shift
                    } else {
                        c.horizontal_shift
                    };
                }
            }

            // Rule 4: the two tallest peaks are labeled at their apex with no
            // arrow; the horizontal shift from rules 2-3 is kept
            if apex_indices.contains(&i) {
                rise = 0.0;
                draw_arrow = false;
                shorten_arrow = false;
            }

            // Axis clamping; clamping at the top also forces the right shift
            let mut text_y = amp + rise;
            if text_y > bounds.upper {
                text_y = bounds.upper - bounds.upper * c.clamp_margin;
                dx = c.horizontal_shift;
            } else if text_y < bounds.lower {
                text_y = bounds.lower + bounds.upper * c.clamp_margin;
            }

            annotations.push(self.make(peak, dx, text_y, draw_arrow, shorten_arrow));
            previous_wavenumber = Some(freq);
        }

        debug!("annotation layout: {} labels placed", annotations.len());
        annotations
    }

    fn make(
        &self,
        peak: &PeakCandidate,
        dx: f64,
        text_y: f64,
        draw_arrow: bool,
        shorten_arrow: bool,
    ) -> Annotation {
        Annotation {
            wavenumber: peak.wavenumber,
            amplitude: peak.amplitude,
            label: format!("{:.2}", peak.wavenumber),
            text_x: peak.wavenumber + dx,
            text_y,
            draw_arrow,
            shorten_arrow,
        }
    }

    /// The configured arrow shortening factor, for renderers deriving the
    /// arrow endpoints
    pub fn arrow_shorten_factor(&self) -> f64 {
        self.constants.arrow_shorten_factor
    }
}

/// Indices of the two largest peaks by amplitude (fewer if there are fewer
/// peaks); ties resolve to the later index
fn two_largest_by_amplitude(peaks: &[PeakCandidate]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..peaks.len()).collect();
    indices.sort_by(|&a, &b| {
        peaks[a]
            .amplitude
            .total_cmp(&peaks[b].amplitude)
            .then(a.cmp(&b))
    });
    indices.iter().rev().take(2).copied().collect()
}
