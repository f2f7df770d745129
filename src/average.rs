use super::error::{CompareError, Result};
use super::{Label, TYPE_COLUMN};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Marker written by the recorder when an activity did not show up in a run.
pub const NOT_AVAILABLE: &str = "N/A";

/// The samples recorded for one build, one csv row per launch.
#[derive(Debug, Clone, Default)]
pub struct BuildSamples {
    rows: Vec<Vec<String>>,
}

impl BuildSamples {
    /// `has_headers` skips the first line, the iteration files have
    /// `Iteration,<activity>...` there while the single column files have none.
    pub fn from_csv(fin: &Path, has_headers: bool) -> Result<BuildSamples> {
        let file = File::open(fin).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CompareError::MissingInputFile {
                path: fin.to_path_buf(),
            },
            _ => CompareError::Io(e),
        })?;
        let samples = BuildSamples::from_reader(file, has_headers)?;
        debug!("read {} launches from {}", samples.len(), fin.display());
        Ok(samples)
    }

    pub fn from_reader<R: Read>(rdr: R, has_headers: bool) -> Result<BuildSamples> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(has_headers)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(rdr);
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            if record.iter().all(|f| f.is_empty()) {
                continue;
            }
            rows.push(record.iter().map(|f| f.to_string()).collect());
        }
        Ok(BuildSamples { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Valid values of a column; N/A, missing, unparsable and non-finite cells are left out.
    pub fn column(&self, column: usize) -> Vec<f64> {
        let mut values = Vec::with_capacity(self.rows.len());
        for row in self.rows.iter() {
            let cell = match row.get(column) {
                Some(c) if !c.eq_ignore_ascii_case(NOT_AVAILABLE) => c,
                _ => continue,
            };
            match cell.parse::<f64>() {
                Ok(v) if v.is_finite() => values.push(v),
                _ => warn!("invalid number '{}' in launch {:?}", cell, row),
            }
        }
        values
    }

    /// Mean of the valid values of a column, 0 when there are none.
    pub fn average(&self, column: usize) -> f64 {
        let values = self.column(column);
        if values.is_empty() {
            warn!("no valid data in column {}", column);
            return 0.;
        }
        debug!("values for column {}: {:?}", column, values);
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Writes the comparison csv read back by the chart binaries,
/// one row per build in the given order.
pub fn write_comparison(fout: &Path, columns: &[&str], rows: &[(Label, Vec<f64>)]) -> Result<()> {
    if let Some(dir) = fout.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let mut wtr = WriterBuilder::new().from_path(fout)?;
    let header: Vec<&str> = std::iter::once(TYPE_COLUMN)
        .chain(columns.iter().copied())
        .collect();
    wtr.write_record(&header)?;
    for (label, values) in rows.iter() {
        let record: Vec<String> = std::iter::once(label.to_string())
            .chain(values.iter().map(|v| v.to_string()))
            .collect();
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}
