use super::average::{write_comparison, BuildSamples};
use super::config::ChartConfig;
use super::error::Result;
use super::{Label, COMPARISON_CSV, DATA_DIR, VERSION};
use clap::{App, Arg};
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::info;

/// Where the launch samples of each build are and where the comparison goes.
#[derive(Debug, Clone, PartialEq)]
pub struct TabulateConfig {
    pub inputs: Vec<(Label, PathBuf)>,
    pub output: PathBuf,
    /// single column files averaged into one value per build,
    /// otherwise one average per activity column
    pub scalar: bool,
}

/// data/Playstore_AppStartTime.csv and the like
pub fn samples_path(label: Label) -> PathBuf {
    PathBuf::from(DATA_DIR).join(format!("{}_AppStartTime.csv", label))
}

impl Default for TabulateConfig {
    fn default() -> Self {
        TabulateConfig {
            inputs: Label::ALL.iter().map(|&l| (l, samples_path(l))).collect(),
            output: PathBuf::from(COMPARISON_CSV),
            scalar: false,
        }
    }
}

/// Takes the CLI arguments that set the per-build inputs and the output table.
pub fn parse_cli() -> (TabulateConfig, bool) {
    cli_from(std::env::args_os())
}

pub fn cli_from<I, T>(args: I) -> (TabulateConfig, bool)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let arg_playstore = Arg::with_name("playstore_csvfile")
        .help("launch samples of the Playstore build")
        .short("p")
        .long("playstore")
        .takes_value(true);
    let arg_release = Arg::with_name("release_csvfile")
        .help("launch samples of the Release build")
        .short("r")
        .long("release")
        .takes_value(true);
    let arg_csvout = Arg::with_name("output_csvfile")
        .help("name of the output comparison csv file")
        .short("o")
        .long("csvfile")
        .takes_value(true)
        .default_value(COMPARISON_CSV);
    let arg_scalar = Arg::with_name("scalar")
        .help("inputs hold one start time per line, write a single average per build")
        .long("scalar")
        .takes_value(false);
    let arg_verbose = Arg::with_name("verbose")
        .help("print debug information")
        .short("v")
        .long("verbose")
        .takes_value(false);
    let cli_args = App::new("apst_tabulate")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to average the launch samples of each build into the comparison csv")
        .arg(arg_playstore)
        .arg(arg_release)
        .arg(arg_csvout)
        .arg(arg_scalar)
        .arg(arg_verbose)
        .get_matches_from(args);
    let input = |arg: &str, label: Label| match cli_args.value_of(arg) {
        Some(p) => PathBuf::from(p),
        None => samples_path(label),
    };
    let config = TabulateConfig {
        inputs: vec![
            (Label::Playstore, input("playstore_csvfile", Label::Playstore)),
            (Label::Release, input("release_csvfile", Label::Release)),
        ],
        output: PathBuf::from(cli_args.value_of("output_csvfile").unwrap_or(COMPARISON_CSV)),
        scalar: cli_args.is_present("scalar"),
    };
    (config, cli_args.is_present("verbose"))
}

/// Averages every build and writes the comparison csv in the layout the
/// matching chart binary expects. Fails before writing if any input is missing.
pub fn run(config: &TabulateConfig) -> Result<PathBuf> {
    let chart = if config.scalar {
        ChartConfig::scalar()
    } else {
        ChartConfig::categorical()
    };
    let columns: Vec<&str> = chart.columns();
    let mut rows = Vec::with_capacity(config.inputs.len());
    for (label, fin) in config.inputs.iter() {
        let samples = BuildSamples::from_csv(fin, !config.scalar)?;
        let averages: Vec<f64> = if config.scalar {
            vec![samples.average(0)]
        } else {
            // column 0 is the iteration number
            (1..=columns.len()).map(|c| samples.average(c)).collect()
        };
        info!("{} averages over {} launches: {:?}", label, samples.len(), averages);
        rows.push((*label, averages));
    }
    write_comparison(&config.output, &columns, &rows)?;
    Ok(config.output.clone())
}
