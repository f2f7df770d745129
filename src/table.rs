use super::error::{CompareError, Result};
use super::{Label, TYPE_COLUMN};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::debug;

/// The comparison csv: a `Type` column naming the build and numeric columns in ms.
#[derive(Debug, Clone)]
pub struct MeasurementTable {
    header: StringRecord,
    rows: Vec<StringRecord>,
}

impl MeasurementTable {
    /// Reads the table from csv, a missing file is reported with its path.
    pub fn from_csv(fin: &Path) -> Result<MeasurementTable> {
        let file = File::open(fin).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CompareError::MissingInputFile {
                path: fin.to_path_buf(),
            },
            _ => CompareError::Io(e),
        })?;
        let table = MeasurementTable::from_reader(file)?;
        debug!(
            "read {} rows with columns {:?} from {}",
            table.rows.len(),
            table.header,
            fin.display()
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(rdr: R) -> Result<MeasurementTable> {
        let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(rdr);
        let header = rdr.headers()?.clone();
        let mut rows = Vec::new();
        for record in rdr.records() {
            rows.push(record?);
        }
        Ok(MeasurementTable { header, rows })
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.header.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, column: &str) -> Option<usize> {
        self.header.iter().position(|h| h == column)
    }

    /// Checks that `Type` and all the given columns are in the header.
    /// The error lists every required column, not only the missing ones.
    pub fn require_columns(&self, columns: &[&str]) -> Result<()> {
        let required: Vec<&str> = std::iter::once(TYPE_COLUMN)
            .chain(columns.iter().copied())
            .collect();
        if required.iter().all(|c| self.column_index(c).is_some()) {
            Ok(())
        } else {
            Err(CompareError::MissingRequiredColumn {
                required: required.iter().map(|c| c.to_string()).collect(),
            })
        }
    }

    /// The single row with the given label in the `Type` column.
    pub fn row(&self, label: Label) -> Result<&StringRecord> {
        let type_idx = self
            .column_index(TYPE_COLUMN)
            .ok_or_else(|| CompareError::MissingRequiredColumn {
                required: vec![TYPE_COLUMN.to_string()],
            })?;
        let mut matching = self
            .rows
            .iter()
            .filter(|r| r.get(type_idx) == Some(label.as_str()));
        let row = matching
            .next()
            .ok_or_else(|| CompareError::MissingRequiredLabel {
                label: label.to_string(),
            })?;
        if matching.next().is_some() {
            return Err(CompareError::DuplicateLabel {
                label: label.to_string(),
            });
        }
        Ok(row)
    }

    pub fn value(&self, label: Label, column: &str) -> Result<f64> {
        let idx = self
            .column_index(column)
            .ok_or_else(|| CompareError::MissingRequiredColumn {
                required: vec![TYPE_COLUMN.to_string(), column.to_string()],
            })?;
        let raw = self.row(label)?.get(idx).unwrap_or("");
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(CompareError::InvalidValue {
                label: label.to_string(),
                column: column.to_string(),
                value: raw.to_string(),
            }),
        }
    }

    /// Values of the row in the order of `columns`, looked up by header name.
    pub fn values(&self, label: Label, columns: &[&str]) -> Result<Vec<f64>> {
        columns.iter().map(|c| self.value(label, c)).collect()
    }

    /// Fails early when any of the labels has no (or more than one) row.
    pub fn require_labels(&self, labels: &[Label]) -> Result<()> {
        for &label in labels {
            self.row(label)?;
        }
        Ok(())
    }
}
