use super::compare::ScalarComparison;
use super::config::{chart_cli, ChartConfig};
use super::error::Result;
use super::table::MeasurementTable;
use super::AVERAGE_COLUMN;
use std::path::PathBuf;
use tracing::info;

/// Takes the CLI arguments of the two-bar comparison.
pub fn parse_cli() -> (ChartConfig, bool) {
    chart_cli(
        "apst_scalar",
        "cli app to compare the average app start time of two builds",
        ChartConfig::scalar(),
        std::env::args_os(),
    )
}

/// Load, validate, extract and draw; nothing is written unless every check passes.
pub fn run(config: &ChartConfig) -> Result<PathBuf> {
    let table = MeasurementTable::from_csv(&config.input)?;
    let column = config
        .metrics
        .first()
        .map(|m| m.column.as_str())
        .unwrap_or(AVERAGE_COLUMN);
    let comparison = ScalarComparison::from_table(&table, config.labels, column)?;
    info!(
        "{}: {} ms, {}: {} ms, difference {:+.1} ms",
        comparison.baseline.label,
        comparison.baseline.ms,
        comparison.candidate.label,
        comparison.candidate.ms,
        comparison.difference()
    );
    super::export::save(&comparison.layout(), &config.output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompareError;
    use tempfile::TempDir;

    fn config_in(tmp: &TempDir, csv: Option<&str>) -> ChartConfig {
        let mut config = ChartConfig::scalar();
        config.input = tmp.path().join("data").join("comparison.csv");
        config.output = tmp.path().join("data").join("app_start_time_comparison.png");
        config.show = false;
        if let Some(csv) = csv {
            std::fs::create_dir_all(tmp.path().join("data")).unwrap();
            std::fs::write(&config.input, csv).unwrap();
        }
        config
    }

    #[test]
    fn draws_the_chart_and_overwrites_it_on_rerun() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(
            &tmp,
            Some("Type,Average App Start Time (ms)\nPlaystore,3000\nRelease,2500\n"),
        );
        assert_eq!(run(&config).unwrap(), config.output);
        assert!(config.output.exists());
        assert_eq!(run(&config).unwrap(), config.output);
    }

    #[test]
    fn missing_release_row_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(
            &tmp,
            Some("Type,Average App Start Time (ms)\nPlaystore,3000\n"),
        );
        match run(&config) {
            Err(CompareError::MissingRequiredLabel { label }) => assert_eq!(label, "Release"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(!config.output.exists());
    }

    #[test]
    fn missing_column_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(&tmp, Some("Type,Splash (ms)\nPlaystore,3000\nRelease,2500\n"));
        assert!(matches!(
            run(&config),
            Err(CompareError::MissingRequiredColumn { .. })
        ));
        assert!(!config.output.exists());
    }

    #[test]
    fn infinite_or_nan_value_writes_nothing() {
        for cell in ["inf", "NaN"].iter() {
            let tmp = TempDir::new().unwrap();
            let csv = format!(
                "Type,Average App Start Time (ms)\nPlaystore,{}\nRelease,2500\n",
                cell
            );
            let config = config_in(&tmp, Some(&csv));
            match run(&config) {
                Err(CompareError::InvalidValue { label, value, .. }) => {
                    assert_eq!(label, "Playstore");
                    assert_eq!(value, *cell);
                }
                other => panic!("unexpected {:?}", other),
            }
            assert!(!config.output.exists());
        }
    }

    #[test]
    fn missing_file_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let config = config_in(&tmp, None);
        assert!(matches!(
            run(&config),
            Err(CompareError::MissingInputFile { .. })
        ));
        assert!(!config.output.exists());
    }
}
