//! Rust Vibspec library
//!
//! This library turns molecular dynamics dipole moment transients into
//! annotated vibrational power spectra: chunked parallel autocorrelation,
//! windowed spectral transform onto a wavenumber axis, band-wise peak
//! detection, and collision-aware label layout for an external renderer.

pub mod acquisition;
pub mod annotation;
pub mod config;
pub mod preprocessing;
pub mod processing;
pub mod spectral;
