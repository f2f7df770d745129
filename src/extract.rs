use super::average::BuildSamples;
use super::error::{CompareError, Result};
use super::logcat::{cell, default_activities, LogcatParser, DEFAULT_PACKAGE};
use super::tabulate::samples_path;
use super::{Label, VERSION};
use clap::{App, Arg};
use csv::WriterBuilder;
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Header of the iteration files, one column per tracked activity.
pub const ITERATION_COLUMN: &str = "Iteration";

/// One logcat dump turned into one launch row of a build's samples file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractConfig {
    pub logcat: PathBuf,
    pub label: Label,
    pub output: PathBuf,
    pub package: String,
    /// iteration number of the row, next after the rows already there when unset
    pub iteration: Option<u32>,
    /// single launch time per line instead of an iteration row
    pub scalar: bool,
}

impl ExtractConfig {
    pub fn new(logcat: &Path, label: Label) -> ExtractConfig {
        ExtractConfig {
            logcat: logcat.to_path_buf(),
            label,
            output: samples_path(label),
            package: DEFAULT_PACKAGE.to_string(),
            iteration: None,
            scalar: false,
        }
    }
}

pub fn parse_cli() -> (ExtractConfig, bool) {
    cli_from(std::env::args_os())
}

pub fn cli_from<I, T>(args: I) -> (ExtractConfig, bool)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let arg_logcat = Arg::with_name("logcat_file")
        .help("saved output of adb logcat -d taken after one launch")
        .short("l")
        .long("logcat")
        .takes_value(true)
        .required(true);
    let arg_build = Arg::with_name("build")
        .help("build the launch belongs to")
        .short("b")
        .long("build")
        .takes_value(true)
        .possible_values(&["Playstore", "Release"])
        .default_value("Playstore");
    let arg_csvout = Arg::with_name("output_csvfile")
        .help("samples file to append to, data/<build>_AppStartTime.csv by default")
        .short("o")
        .long("csvfile")
        .takes_value(true);
    let arg_package = Arg::with_name("package")
        .help("package name the activities are logged under")
        .long("package")
        .takes_value(true)
        .default_value(DEFAULT_PACKAGE);
    let arg_iteration = Arg::with_name("iteration")
        .help("iteration number of the row")
        .short("i")
        .long("iteration")
        .takes_value(true)
        .validator(|s| {
            s.parse::<u32>()
                .map(|_| ())
                .map_err(|_| format!("'{}' is not an iteration number", s))
        });
    let arg_scalar = Arg::with_name("scalar")
        .help("append the launch time of the last displayed activity as a single value")
        .long("scalar")
        .takes_value(false);
    let arg_verbose = Arg::with_name("verbose")
        .help("print debug information")
        .short("v")
        .long("verbose")
        .takes_value(false);
    let cli_args = App::new("apst_extract")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to append the launch times found in a logcat dump to the samples of a build")
        .arg(arg_logcat)
        .arg(arg_build)
        .arg(arg_csvout)
        .arg(arg_package)
        .arg(arg_iteration)
        .arg(arg_scalar)
        .arg(arg_verbose)
        .get_matches_from(args);
    let label = cli_args
        .value_of("build")
        .and_then(|b| b.parse::<Label>().ok())
        .unwrap_or(Label::Playstore);
    let mut config = ExtractConfig::new(
        Path::new(cli_args.value_of("logcat_file").unwrap_or_default()),
        label,
    );
    if let Some(o) = cli_args.value_of("output_csvfile") {
        config.output = PathBuf::from(o);
    }
    if let Some(p) = cli_args.value_of("package") {
        config.package = p.to_string();
    }
    config.iteration = cli_args.value_of("iteration").and_then(|i| i.parse().ok());
    config.scalar = cli_args.is_present("scalar");
    (config, cli_args.is_present("verbose"))
}

fn read_dump(fin: &Path) -> Result<String> {
    std::fs::read_to_string(fin).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CompareError::MissingInputFile {
            path: fin.to_path_buf(),
        },
        _ => CompareError::Io(e),
    })
}

fn is_blank(fout: &Path) -> bool {
    match fout.metadata() {
        Ok(m) => m.len() == 0,
        Err(_) => true,
    }
}

/// Launch rows already in the samples file, 0 when there is none yet.
fn recorded_launches(fout: &Path, has_headers: bool) -> Result<usize> {
    if is_blank(fout) {
        return Ok(0);
    }
    Ok(BuildSamples::from_csv(fout, has_headers)?.len())
}

/// Parses the dump and appends its row to the samples file, writing the
/// header first when the file is new. Returns the appended cells.
pub fn run(config: &ExtractConfig) -> Result<Vec<String>> {
    let dump = read_dump(&config.logcat)?;
    let parser = LogcatParser::new(&config.package, &default_activities())?;
    if let Some(dir) = config.output.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let header = is_blank(&config.output);

    let row = if config.scalar {
        let time = parser.launch_time(&dump);
        if time.is_none() {
            warn!("no displayed activity in {}", config.logcat.display());
        }
        vec![cell(time)]
    } else {
        let iteration = match config.iteration {
            Some(i) => i as usize,
            None => recorded_launches(&config.output, true)? + 1,
        };
        let times = parser.activity_times(&dump);
        for (column, time) in parser.columns().iter().zip(times.iter()) {
            if time.is_none() {
                warn!("{} not displayed in {}", column, config.logcat.display());
            }
        }
        std::iter::once(iteration.to_string())
            .chain(times.into_iter().map(cell))
            .collect()
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.output)?;
    let mut wtr = WriterBuilder::new().flexible(true).from_writer(file);
    if header && !config.scalar {
        let mut names = vec![ITERATION_COLUMN];
        names.extend(parser.columns());
        debug!("new samples file {}, writing {:?}", config.output.display(), names);
        wtr.write_record(&names)?;
    }
    wtr.write_record(&row)?;
    wtr.flush()?;
    info!("{} launch {:?} appended to {}", config.label, row, config.output.display());
    Ok(row)
}
