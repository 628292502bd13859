//! Spreadsheet row export.
//!
//! Rows are written as CSV with the header
//! `Date,Steps,HeartRate,Weight,SystolicBP,DiastolicBP,SleepHours`.
//! Numbers use the shortest `f64` representation that parses back to the
//! same value, so [`parse_rows`] of [`write_rows`] output is lossless.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use thiserror::Error;

use super::reading::Vitals;
use super::series::Series;
use crate::error::Error;

/// Column headers in export order.
pub const HEADER: [&str; 7] = [
    "Date",
    "Steps",
    "HeartRate",
    "Weight",
    "SystolicBP",
    "DiastolicBP",
    "SleepHours",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors while exporting or re-reading rows.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("series entry for {date} cannot be exported: {source}")]
    Incomplete {
        date: NaiveDate,
        #[source]
        source: Error,
    },

    #[error("invalid header: expected 'Date,Steps,HeartRate,Weight,SystolicBP,DiastolicBP,SleepHours', got '{0}'")]
    InvalidHeader(String),

    #[error("line {0}: expected 7 fields, got {1}")]
    InvalidFieldCount(usize, usize),

    #[error("line {line}: failed to parse date '{value}'")]
    InvalidDate { line: usize, value: String },

    #[error("line {line}: failed to parse {column} '{value}'")]
    InvalidNumber {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One exported row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportRow {
    pub date: NaiveDate,
    pub vitals: Vitals,
}

impl ExportRow {
    fn to_line(&self) -> String {
        let v = &self.vitals;
        format!(
            "{},{},{},{},{},{},{}",
            self.date.format(DATE_FORMAT),
            v.steps,
            v.heart_rate,
            v.weight,
            v.systolic_bp,
            v.diastolic_bp,
            v.sleep_hours
        )
    }

    fn parse_line(line: &str, line_no: usize) -> Result<Self, ExportError> {
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != HEADER.len() {
            return Err(ExportError::InvalidFieldCount(line_no, fields.len()));
        }

        let date = NaiveDate::parse_from_str(fields[0], DATE_FORMAT).map_err(|_| {
            ExportError::InvalidDate {
                line: line_no,
                value: fields[0].to_string(),
            }
        })?;

        let number = |index: usize| -> Result<f64, ExportError> {
            fields[index].parse::<f64>().map_err(|_| ExportError::InvalidNumber {
                line: line_no,
                column: HEADER[index],
                value: fields[index].to_string(),
            })
        };

        Ok(Self {
            date,
            vitals: Vitals {
                steps: number(1)?,
                heart_rate: number(2)?,
                weight: number(3)?,
                systolic_bp: number(4)?,
                diastolic_bp: number(5)?,
                sleep_hours: number(6)?,
            },
        })
    }
}

/// Build export rows from a series. Every entry must be complete.
pub fn rows_from_series(series: &Series) -> Result<Vec<ExportRow>, ExportError> {
    series
        .entries()
        .map(|entry| -> Result<ExportRow, ExportError> {
            let vitals = Vitals::try_from(&entry.readings).map_err(|source| {
                ExportError::Incomplete {
                    date: entry.date,
                    source,
                }
            })?;
            Ok(ExportRow {
                date: entry.date,
                vitals,
            })
        })
        .collect()
}

/// Render rows as CSV text, header included.
pub fn write_rows(rows: &[ExportRow]) -> String {
    let mut out = HEADER.join(",");
    out.push('\n');
    for row in rows {
        out.push_str(&row.to_line());
        out.push('\n');
    }
    out
}

/// Parse CSV text produced by [`write_rows`].
pub fn parse_rows(text: &str) -> Result<Vec<ExportRow>, ExportError> {
    let mut lines = text.lines().enumerate().filter(|(_, l)| !l.trim().is_empty());

    let header = lines.next().map(|(_, l)| l.trim()).unwrap_or_default();
    if header != HEADER.join(",") {
        return Err(ExportError::InvalidHeader(header.to_string()));
    }

    lines.map(|(index, line)| ExportRow::parse_line(line, index + 1)).collect()
}

/// Export a series to a CSV file, returning the number of rows written.
pub fn export_series(series: &Series, path: &Path) -> Result<usize, ExportError> {
    let rows = rows_from_series(series)?;
    fs::write(path, write_rows(&rows))?;
    tracing::info!(rows = rows.len(), path = %path.display(), "exported series rows");
    Ok(rows.len())
}

/// Read rows back from a CSV file.
pub fn import_rows(path: &Path) -> Result<Vec<ExportRow>, ExportError> {
    let text = fs::read_to_string(path)?;
    parse_rows(&text)
}

/// Rebuild a series from exported rows.
pub fn series_from_rows(rows: &[ExportRow]) -> Series {
    let mut series = Series::new();
    for row in rows {
        series.push(row.date, row.vitals.into());
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reading::{Metric, ReadingSet};
    use crate::data::series::{MonthlyPattern, SampleGenerator};
    use tempfile::NamedTempFile;

    #[test]
    fn header_matches_export_contract() {
        let text = write_rows(&[]);
        assert_eq!(text, "Date,Steps,HeartRate,Weight,SystolicBP,DiastolicBP,SleepHours\n");
    }

    #[test]
    fn rows_follow_column_order() {
        let series = MonthlyPattern::default().generate();
        let rows = rows_from_series(&series).unwrap();
        let text = write_rows(&rows[..1]);
        assert_eq!(text.lines().nth(1), Some("2025-01-01,8000,70,75,120,80,6"));
    }

    #[test]
    fn export_then_reparse_is_exact() {
        let series = MonthlyPattern::default().generate();
        let rows = rows_from_series(&series).unwrap();

        let parsed = parse_rows(&write_rows(&rows)).unwrap();
        assert_eq!(parsed, rows);

        // Fractional weights such as 75 - 0.2 * 29 survive bit for bit
        let last = parsed.last().unwrap();
        assert_eq!(last.vitals.weight.to_bits(), rows[29].vitals.weight.to_bits());
        assert_eq!(series_from_rows(&parsed), series);
    }

    #[test]
    fn incomplete_entry_cannot_be_exported() {
        let mut series = Series::new();
        let date = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
        series.push(date, ReadingSet::new().with(Metric::Steps, 4000.0));

        match rows_from_series(&series) {
            Err(ExportError::Incomplete { date: d, source }) => {
                assert_eq!(d, date);
                assert_eq!(source, Error::MissingReading(Metric::HeartRate));
            }
            other => panic!("expected Incomplete, got {:?}", other),
        }
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(matches!(parse_rows("Date,Steps\n"), Err(ExportError::InvalidHeader(_))));

        let header = HEADER.join(",");
        let short = format!("{}\n2025-01-01,1,2\n", header);
        assert!(matches!(parse_rows(&short), Err(ExportError::InvalidFieldCount(2, 3))));

        let bad_date = format!("{}\n01/02/2025,1,2,3,4,5,6\n", header);
        assert!(matches!(parse_rows(&bad_date), Err(ExportError::InvalidDate { line: 2, .. })));

        let bad_number = format!("{}\n2025-01-01,lots,2,3,4,5,6\n", header);
        match parse_rows(&bad_number) {
            Err(ExportError::InvalidNumber { column, value, .. }) => {
                assert_eq!(column, "Steps");
                assert_eq!(value, "lots");
            }
            other => panic!("expected InvalidNumber, got {:?}", other),
        }
    }

    #[test]
    fn export_series_writes_file() {
        let file = NamedTempFile::new().unwrap();
        let series = MonthlyPattern::default().generate();

        let count = export_series(&series, file.path()).unwrap();
        assert_eq!(count, 30);

        let rows = import_rows(file.path()).unwrap();
        assert_eq!(rows.len(), 30);
    }
}
