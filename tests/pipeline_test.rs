use anyhow::Result;
use rust_vibspec::acquisition::{load_dipole_series, TimeSeries};
use rust_vibspec::config::Config;
use rust_vibspec::processing::{Pipeline, ResultsLog};
use std::io::Write;
use tempfile::tempdir;

const TIME_STEP: f64 = 2e-15;

/// Synthetic transient with two tones on FFT bins and a static offset
fn two_tone_series(n: usize, bin1: usize, bin2: usize) -> TimeSeries {
    let f1 = bin1 as f64 / (n as f64 * TIME_STEP);
    let f2 = bin2 as f64 / (n as f64 * TIME_STEP);
    let samples = (0..n)
        .map(|i| {
            let t = i as f64 * TIME_STEP;
            2.5 + (2.0 * std::f64::consts::PI * f1 * t).sin()
                + 0.6 * (2.0 * std::f64::consts::PI * f2 * t).sin()
        })
        .collect();
    TimeSeries::new(samples, TIME_STEP).unwrap()
}

#[test]
fn test_end_to_end_results_log() -> Result<()> {
    let temp_dir = tempdir()?;
    let log = ResultsLog::new(temp_dir.path().join("peak_data.txt"));

    let config = Config::default();
    let pipeline = Pipeline::new(&config);
    let series = two_tone_series(4096, 500, 900);

    let report = pipeline.process(&series, "gly_12_water")?;
    log.append(&report.with_autocorrelation.records)?;
    log.append(&report.without_autocorrelation.records)?;

    let contents = std::fs::read_to_string(log.path())?;
    let lines: Vec<&str> = contents.lines().collect();
    assert!(!lines.is_empty());

    // Rows from the autocorrelation run come first, then the AKF-prefixed
    // rows of the raw run; each row has the id -- frequency -- amplitude shape
    assert!(lines[0].starts_with("gly_12_water -- "));
    assert!(lines.iter().any(|l| l.starts_with("AKF gly_12_water -- ")));
    for line in &lines {
        let fields: Vec<&str> = line.split(" -- ").collect();
        assert_eq!(fields.len(), 3, "unexpected row: {}", line);
        fields[1].parse::<f64>().unwrap();
        fields[2].parse::<f64>().unwrap();
    }

    Ok(())
}

#[test]
fn test_width_aware_variant_emits_width_column() -> Result<()> {
    let mut config = Config::default();
    config.apply_args(None, true);
    let pipeline = Pipeline::new(&config);

    // Tones in the same 500 cm⁻¹ band so the width-aware detector keeps both
    let series = two_tone_series(4096, 500, 520);
    let report = pipeline.process(&series, "pep_4_linear")?;

    let run = &report.without_autocorrelation;
    assert!(!run.peaks.is_empty());
    assert!(run.peaks.iter().all(|p| p.width.is_some()));

    let row = run.records[0].format_row();
    let fields: Vec<&str> = row.split(" -- ").collect();
    assert_eq!(fields.len(), 4, "width column missing: {}", row);

    Ok(())
}

#[test]
fn test_pipeline_is_deterministic() -> Result<()> {
    let config = Config::default();
    let pipeline = Pipeline::new(&config);
    let series = two_tone_series(2048, 300, 700);

    let first = pipeline.process(&series, "sample")?;
    let second = pipeline.process(&series, "sample")?;

    // Peaks and annotations must be byte-identical between runs
    let peaks_a = serde_json::to_string(&first.without_autocorrelation.peaks)?;
    let peaks_b = serde_json::to_string(&second.without_autocorrelation.peaks)?;
    assert_eq!(peaks_a, peaks_b);

    let ann_a = serde_json::to_string(&first.without_autocorrelation.annotations)?;
    let ann_b = serde_json::to_string(&second.without_autocorrelation.annotations)?;
    assert_eq!(ann_a, ann_b);

    Ok(())
}

#[test]
fn test_empty_series_fails_before_any_computation() {
    // The TimeSeries constructor already rejects empties
    assert!(TimeSeries::new(Vec::new(), TIME_STEP).is_err());
}

#[test]
fn test_dat_file_to_report() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("ala_8_vac.dat");
    let mut file = std::fs::File::create(&path)?;
    writeln!(file, "# frame  dip_x  dip_y  dip_z  |dip|")?;
    let n = 2048;
    let freq = 400.0 / (n as f64 * TIME_STEP);
    for i in 0..n {
        let t = i as f64 * TIME_STEP;
        let magnitude = 5.0 + (2.0 * std::f64::consts::PI * freq * t).sin();
        writeln!(file, "{}  0.0  0.0  {:.6}  {:.6}", i, magnitude, magnitude)?;
    }
    drop(file);

    let series = load_dipole_series(&path, TIME_STEP)?;
    assert_eq!(series.len(), n);

    let pipeline = Pipeline::new(&Config::default());
    let report = pipeline.process(&series, "ala_8_vac")?;
    assert_eq!(report.title, "ALA VACUUM N=8");

    // The injected tone dominates the raw-signal spectrum
    let run = &report.without_autocorrelation;
    let expected = 400.0 / (n as f64 * TIME_STEP) * 1e-12 / 0.03;
    let bin_width = 1.0 / (n as f64 * TIME_STEP) * 1e-12 / 0.03;
    let tallest = run
        .peaks
        .iter()
        .max_by(|a, b| a.amplitude.partial_cmp(&b.amplitude).unwrap())
        .expect("peaks detected");
    assert!(
        (tallest.wavenumber - expected).abs() <= bin_width,
        "tallest peak at {} cm⁻¹, expected {}",
        tallest.wavenumber,
        expected
    );

    Ok(())
}
