use super::compare::CategoricalComparison;
use super::config::{chart_cli, ChartConfig};
use super::error::Result;
use super::table::MeasurementTable;
use std::path::PathBuf;
use tracing::info;

/// Takes the CLI arguments of the grouped comparison.
pub fn parse_cli() -> (ChartConfig, bool) {
    chart_cli(
        "apst_categories",
        "cli app to compare the splash, onboarding and home start times of two builds",
        ChartConfig::categorical(),
        std::env::args_os(),
    )
}

pub fn run(config: &ChartConfig) -> Result<PathBuf> {
    let table = MeasurementTable::from_csv(&config.input)?;
    let comparison = CategoricalComparison::from_table(&table, config.labels, &config.metrics)?;
    for (i, category) in comparison.categories.iter().enumerate() {
        info!(
            "{}: {} {} ms, {} {} ms",
            category,
            comparison.baseline.label,
            comparison.baseline.values[i],
            comparison.candidate.label,
            comparison.candidate.values[i]
        );
    }
    super::export::save(&comparison.layout(), &config.output)
}
