// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-vibspec project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration management for the vibrational spectrum analyzer
//!
//! The configuration is backed by a YAML file with one section per pipeline
//! stage. Every field has a default, so a minimal or missing file works out
//! of the box; loading a missing file writes the defaults to disk first.
//!
//! ## Usage
//!
//! ```no_run
//! use rust_vibspec::config::Config;
//! use std::path::Path;
//!
//! // Load config from file, creates a default one if not found
//! let mut config = Config::from_file(Path::new("vibspec.yaml")).unwrap();
//!
//! // Apply command line overrides if needed
//! config.apply_args(Some(8), true);
//!
//! println!("Band width: {} cm⁻¹", config.peaks.band_width);
//! ```

pub mod annotation;
pub mod peaks;
pub mod processing;

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};

// Re-export all types for public API
pub use annotation::AnnotationConfig;
pub use peaks::PeakConfig;
pub use processing::ProcessingConfig;

/// Root configuration structure for the analyzer
///
/// Each section uses default values when not explicitly specified in the
/// configuration file, allowing for minimal configuration when custom
/// settings are not required.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Autocorrelation and spectral transform settings
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Band-wise peak detection settings
    #[serde(default)]
    pub peaks: PeakConfig,

    /// Annotation layout constants
    #[serde(default)]
    pub annotation: AnnotationConfig,
}

impl Config {
    /// Load configuration from a file
    ///
    /// If the file does not exist, a default configuration is written there
    /// and returned.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(
                "Configuration file not found at {:?}, creating default",
                path
            );
            let default_config = Self::default();
            default_config.save_to_file(path)?;
            return Ok(default_config);
        }

        debug!("Loading configuration from {:?}", path);
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file at {:?}", path))?;

        let config: Config = serde_yml::from_str(&contents)
            .with_context(|| format!("Failed to parse YAML configuration from {:?}", path))?;

        config.validate()?;
        Ok(config)
    }

    /// Save the configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml =
            serde_yml::to_string(self).context("Failed to serialize configuration to YAML")?;

        let mut file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create config file at {:?}", path.as_ref()))?;

        file.write_all(yaml.as_bytes())
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Apply command line overrides on top of the file-based configuration
    pub fn apply_args(&mut self, workers: Option<usize>, width_aware: bool) {
        if workers.is_some() {
            self.processing.workers = workers;
        }
        if width_aware {
            self.peaks = PeakConfig::width_aware();
        }
    }

    /// Check structural constraints that serde types alone cannot express
    pub fn validate(&self) -> Result<()> {
        if self.processing.time_step <= 0.0 {
            anyhow::bail!("processing.time_step must be positive");
        }
        if self.peaks.band_width <= 0.0 {
            anyhow::bail!("peaks.band_width must be positive");
        }
        if self.peaks.upper_bound <= 0.0 {
            anyhow::bail!("peaks.upper_bound must be positive");
        }
        if self.peaks.peaks_per_band == 0 {
            anyhow::bail!("peaks.peaks_per_band must be at least 1");
        }
        Ok(())
    }
}
