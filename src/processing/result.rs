// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-vibspec project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Result rows and the shared results log
//!
//! Every detected peak becomes one plain-text row,
//! `identifier -- frequency -- amplitude`, with a trailing `-- width` field
//! when the width-aware detector produced one. Rows from every processed file
//! are appended to a single results log owned by the caller.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::spectral::PeakCandidate;

/// One results-log row for a detected peak
#[derive(Debug, Clone, Serialize)]
pub struct PeakRecord {
    /// Identifier of the producing run (file stem, prefixed for the run
    /// without autocorrelation)
    pub identifier: String,
    /// Peak position in cm⁻¹
    pub wavenumber: f64,
    /// Spectral amplitude at the peak
    pub amplitude: f64,
    /// Full width at half maximum in cm⁻¹, width-aware variant only
    pub width: Option<f64>,
    /// When the row was produced
    pub timestamp: DateTime<Utc>,
}

impl PeakRecord {
    /// Build one record per peak for a run identified by `identifier`
    pub fn from_peaks(identifier: &str, peaks: &[PeakCandidate]) -> Vec<Self> {
        peaks
            .iter()
            .map(|p| Self {
                identifier: identifier.to_string(),
                wavenumber: p.wavenumber,
                amplitude: p.amplitude,
                width: p.width,
                timestamp: Utc::now(),
            })
            .collect()
    }

    /// Format the row as it appears in the results log
    pub fn format_row(&self) -> String {
        match self.width {
            Some(width) => format!(
                "{} -- {:.2} -- {:.2} -- {:.2}",
                self.identifier, self.wavenumber, self.amplitude, width
            ),
            None => format!(
                "{} -- {:.2} -- {:.2}",
                self.identifier, self.wavenumber, self.amplitude
            ),
        }
    }
}

/// Append-only plain-text results log
pub struct ResultsLog {
    path: PathBuf,
}

impl ResultsLog {
    /// Use (or create) the log at the given path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Append one row per record
    pub fn append(&self, records: &[PeakRecord]) -> Result<()> {
        if records.is_empty() {
            return Ok(());
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open results log at {:?}", self.path))?;
        for record in records {
            writeln!(file, "{}", record.format_row())
                .with_context(|| format!("Failed to write to results log at {:?}", self.path))?;
        }
        Ok(())
    }

    /// Path of the underlying log file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(wavenumber: f64, amplitude: f64, width: Option<f64>) -> PeakCandidate {
        PeakCandidate {
            wavenumber,
            amplitude,
            band: (0.0, 500.0),
            width,
        }
    }

    #[test]
    fn test_row_format_without_width() {
        let records = PeakRecord::from_peaks("gly_12_water", &[candidate(432.1, 7.6543, None)]);
        assert_eq!(records[0].format_row(), "gly_12_water -- 432.10 -- 7.65");
    }

    #[test]
    fn test_row_format_with_width() {
        let records =
            PeakRecord::from_peaks("corr_gly_12_water", &[candidate(432.1, 7.6543, Some(12.345))]);
        assert_eq!(
            records[0].format_row(),
            "corr_gly_12_water -- 432.10 -- 7.65 -- 12.35"
        );
    }

    #[test]
    fn test_results_log_appends_across_calls() {
        let dir = tempfile::tempdir().unwrap();
        let log = ResultsLog::new(dir.path().join("peak_data.txt"));

        log.append(&PeakRecord::from_peaks("a", &[candidate(100.0, 1.0, None)]))
            .unwrap();
        log.append(&PeakRecord::from_peaks("b", &[candidate(200.0, 2.0, None)]))
            .unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec!["a -- 100.00 -- 1.00", "b -- 200.00 -- 2.00"]);
    }
}
