//! CSV-backed tables.

use std::path::Path;

use crate::error::{ReportError, Result};

/// Header and rows read from a CSV file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableData {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    /// Reads a CSV file. The first row is the header.
    ///
    /// # Errors
    ///
    /// - [`ReportError::MissingResource`] if the file does not exist
    /// - [`ReportError::EmptyTable`] if it has no header row
    /// - [`ReportError::Table`] on malformed CSV, including rows whose
    ///   length differs from the header
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ReportError::MissingResource {
                path: path.to_path_buf(),
            });
        }

        let table_err = |source| ReportError::Table {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(table_err)?;

        let header: Vec<String> = reader
            .headers()
            .map_err(table_err)?
            .iter()
            .map(str::to_string)
            .collect();
        if header.is_empty() {
            return Err(ReportError::EmptyTable {
                path: path.to_path_buf(),
            });
        }

        let rows = reader
            .records()
            .map(|record| {
                record
                    .map(|r| r.iter().map(str::to_string).collect())
                    .map_err(table_err)
            })
            .collect::<Result<Vec<Vec<String>>>>()?;

        Ok(Self { header, rows })
    }

    pub fn columns(&self) -> usize {
        self.header.len()
    }

    /// The `longtable` column specification.
    ///
    /// Without a width the first column is right-aligned and the rest
    /// centred. With a width every column is a ruled paragraph column of
    /// that many centimetres.
    ///
    /// ```rust
    /// use texreport::TableData;
    ///
    /// let data = TableData { header: vec!["a".into(), "b".into(), "c".into()], rows: vec![] };
    /// assert_eq!(data.column_spec(None), "rcc");
    /// assert_eq!(data.column_spec(Some(2.5)), "|p{2.5cm}|p{2.5cm}|p{2.5cm}|");
    /// ```
    pub fn column_spec(&self, width_cm: Option<f32>) -> String {
        let rest = self.columns().saturating_sub(1);
        match width_cm {
            None => format!("r{}", "c".repeat(rest)),
            Some(w) => format!("|p{{{w}cm}}|{}", format!("p{{{w}cm}}|").repeat(rest)),
        }
    }
}
