use std::fmt;
use std::str::FromStr;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
pub mod average;
pub mod categories;
pub mod compare;
pub mod config;
pub mod error;
pub mod export;
pub mod extract;
pub mod logcat;
pub mod palette;
pub mod render;
pub mod scalar;
pub mod table;
pub mod tabulate;

pub use config::{ChartConfig, Metric};
pub use error::{CompareError, Result};

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

pub const DATA_DIR: &str = "data";
pub const COMPARISON_CSV: &str = "data/comparison.csv";
pub const COMPARISON_PNG: &str = "data/app_start_time_comparison.png";

/// Name of the column holding the build label.
pub const TYPE_COLUMN: &str = "Type";
pub const AVERAGE_COLUMN: &str = "Average App Start Time (ms)";

/// The build a measurement row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Playstore,
    Release,
}

impl Label {
    pub const ALL: [Label; 2] = [Label::Playstore, Label::Release];

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Playstore => "Playstore",
            Label::Release => "Release",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Label::ALL
            .iter()
            .copied()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| format!("unknown build label '{}'", s))
    }
}

/// smallest and largest element of the slice, None when empty
pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

/// Installs the stderr subscriber used by all the binaries.
/// RUST_LOG wins over the verbose flag.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("could not set the log subscriber: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_round_trips_through_its_name() {
        assert_eq!("Playstore".parse::<Label>(), Ok(Label::Playstore));
        assert_eq!("Release".parse::<Label>(), Ok(Label::Release));
        assert!("release".parse::<Label>().is_err());
        assert_eq!(Label::Release.to_string(), "Release");
    }

    #[test]
    fn min_and_max_of_values() {
        assert_eq!(min_and_max(&[3000., 2500., 2700.]), Some((2500., 3000.)));
        assert_eq!(min_and_max::<f64>(&[]), None);
    }
}
