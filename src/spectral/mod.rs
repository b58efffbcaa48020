// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-vibspec project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Spectral analysis module
//!
//! This module handles the frequency-domain half of the pipeline: the
//! windowed Fourier transform onto a wavenumber axis and the band-wise
//! detection of dominant peaks.

pub mod peaks;
pub mod transform;

pub use peaks::{BandPeakDetector, PeakCandidate};
pub use transform::{SpectralTransformer, Spectrum, SpectrumError};
