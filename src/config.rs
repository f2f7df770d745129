use super::{Label, AVERAGE_COLUMN, COMPARISON_CSV, COMPARISON_PNG, VERSION};
use clap::{App, Arg};
use std::ffi::OsString;
use std::path::PathBuf;

/// A numeric column of the comparison csv and the name shown on the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub column: String,
    pub name: String,
}

impl Metric {
    pub fn new(column: &str, name: &str) -> Metric {
        Metric {
            column: column.to_string(),
            name: name.to_string(),
        }
    }
}

/// Everything a comparator needs to know about its input and output.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    /// baseline first, then the candidate build
    pub labels: [Label; 2],
    pub metrics: Vec<Metric>,
    /// open the image in the system viewer after saving
    pub show: bool,
}

impl ChartConfig {
    /// one aggregate start time per build
    pub fn scalar() -> ChartConfig {
        ChartConfig {
            input: PathBuf::from(COMPARISON_CSV),
            output: PathBuf::from(COMPARISON_PNG),
            labels: Label::ALL,
            metrics: vec![Metric::new(AVERAGE_COLUMN, "Average")],
            show: true,
        }
    }

    /// splash, onboarding and home start times per build
    pub fn categorical() -> ChartConfig {
        ChartConfig {
            input: PathBuf::from(COMPARISON_CSV),
            output: PathBuf::from(COMPARISON_PNG),
            labels: Label::ALL,
            metrics: vec![
                Metric::new("Splash (ms)", "Splash"),
                Metric::new("Onboarding (ms)", "Onboarding"),
                Metric::new("Home (ms)", "Home"),
            ],
            show: true,
        }
    }

    pub fn columns(&self) -> Vec<&str> {
        self.metrics.iter().map(|m| m.column.as_str()).collect()
    }
}

/// Optional overrides of the input and output paths shared by the chart
/// binaries; with no arguments the defaults are used untouched.
/// Returns the config and the verbose flag.
pub fn chart_cli<I, T>(
    name: &str,
    about: &str,
    defaults: ChartConfig,
    args: I,
) -> (ChartConfig, bool)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let arg_csvin = Arg::with_name("input_csvfile")
        .help("name of the comparison csv file")
        .short("f")
        .long("csvfile")
        .takes_value(true)
        .default_value(COMPARISON_CSV);
    let arg_pngout = Arg::with_name("output_pngfile")
        .help("name of the output png file, overwritten if present")
        .short("o")
        .long("pngfile")
        .takes_value(true)
        .default_value(COMPARISON_PNG);
    let arg_no_show = Arg::with_name("no_show")
        .help("do not open the image after saving it")
        .long("no-show")
        .takes_value(false);
    let arg_verbose = Arg::with_name("verbose")
        .help("print debug information")
        .short("v")
        .long("verbose")
        .takes_value(false);
    let cli_args = App::new(name)
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about(about)
        .arg(arg_csvin)
        .arg(arg_pngout)
        .arg(arg_no_show)
        .arg(arg_verbose)
        .get_matches_from(args);
    let mut config = defaults;
    if let Some(p) = cli_args.value_of("input_csvfile") {
        config.input = PathBuf::from(p);
    }
    if let Some(p) = cli_args.value_of("output_pngfile") {
        config.output = PathBuf::from(p);
    }
    config.show = !cli_args.is_present("no_show");
    (config, cli_args.is_present("verbose"))
}
