use anyhow::Result;
use rust_vibspec::config::{Config, PeakConfig};
use tempfile::tempdir;

#[test]
fn test_config_load_and_save() -> Result<()> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("vibspec.yaml");

    // Create a custom config
    let mut config = Config::default();
    config.processing.workers = Some(8);
    config.peaks.band_width = 250.0;
    config.annotation.crowding_gap = 300.0;

    // Save config to file
    config.save_to_file(&config_path)?;

    // Load config from file
    let loaded = Config::from_file(&config_path)?;
    assert_eq!(loaded.processing.workers, Some(8));
    assert_eq!(loaded.peaks.band_width, 250.0);
    assert_eq!(loaded.annotation.crowding_gap, 300.0);

    // Untouched fields keep their defaults
    assert_eq!(loaded.processing.time_step, 2e-15);
    assert_eq!(loaded.peaks.upper_bound, 6000.0);

    Ok(())
}

#[test]
fn test_missing_config_creates_default_file() -> Result<()> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("nonexistent.yaml");

    let config = Config::from_file(&config_path)?;
    assert!(config_path.exists());
    assert_eq!(config.processing.cutoff_frequency_hz, 3e12);
    assert_eq!(config.peaks.peaks_per_band, 1);
    assert!(!config.peaks.compute_widths);

    Ok(())
}

#[test]
fn test_apply_args_overrides() {
    let mut config = Config::default();
    config.apply_args(Some(16), true);

    assert_eq!(config.processing.workers, Some(16));
    // Width-aware preset replaces the peaks section
    assert_eq!(config.peaks.upper_bound, 4000.0);
    assert_eq!(config.peaks.peaks_per_band, 2);
    assert!(config.peaks.compute_widths);

    // No overrides leaves the config untouched
    let mut config = Config::default();
    config.apply_args(None, false);
    assert_eq!(config.processing.workers, None);
    assert_eq!(config.peaks.upper_bound, 6000.0);
}

#[test]
fn test_invalid_config_is_rejected() -> Result<()> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("vibspec.yaml");

    let mut config = Config::default();
    config.peaks = PeakConfig {
        band_width: -5.0,
        ..PeakConfig::default()
    };
    config.save_to_file(&config_path)?;

    assert!(Config::from_file(&config_path).is_err());
    Ok(())
}

#[test]
fn test_partial_yaml_fills_defaults() -> Result<()> {
    let temp_dir = tempdir()?;
    let config_path = temp_dir.path().join("partial.yaml");
    std::fs::write(&config_path, "peaks:\n  band_width: 100.0\n")?;

    let config = Config::from_file(&config_path)?;
    assert_eq!(config.peaks.band_width, 100.0);
    assert_eq!(config.peaks.upper_bound, 6000.0);
    assert_eq!(config.processing.time_step, 2e-15);
    assert_eq!(config.annotation.horizontal_shift, 40.0);

    Ok(())
}
