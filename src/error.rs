use plotters::drawing::DrawingAreaErrorKind;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompareError>;

/// Every failure stops the run; the binaries print the message and exit.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("File '{}' not found!", .path.display())]
    MissingInputFile { path: PathBuf },

    #[error("CSV does not have the required {} columns!", quoted_list(.required))]
    MissingRequiredColumn { required: Vec<String> },

    #[error("CSV has no row with Type '{label}'")]
    MissingRequiredLabel { label: String },

    #[error("CSV has more than one row with Type '{label}'")]
    DuplicateLabel { label: String },

    #[error("invalid value '{value}' in column '{column}' of the '{label}' row")]
    InvalidValue {
        label: String,
        column: String,
        value: String,
    },

    #[error("{label} has {found} values for {expected} categories")]
    SeriesLength {
        label: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid log pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("could not read csv: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("could not draw the chart: {0}")]
    Render(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for CompareError
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        CompareError::Render(e.to_string())
    }
}

/// 'a', 'a' and 'b', 'a', 'b' and 'c'
fn quoted_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|i| format!("'{}'", i)).collect();
    match quoted.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_names_all_of_them() {
        let e = CompareError::MissingRequiredColumn {
            required: vec!["Type".into(), "Average App Start Time (ms)".into()],
        };
        assert_eq!(
            e.to_string(),
            "CSV does not have the required 'Type' and 'Average App Start Time (ms)' columns!"
        );
    }

    #[test]
    fn missing_file_message_names_the_path() {
        let e = CompareError::MissingInputFile {
            path: PathBuf::from("data/comparison.csv"),
        };
        assert_eq!(e.to_string(), "File 'data/comparison.csv' not found!");
    }

    #[test]
    fn quoted_list_joins_with_and() {
        let items: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
        assert_eq!(quoted_list(&items), "'a', 'b' and 'c'");
        assert_eq!(quoted_list(&items[..1]), "'a'");
    }
}
