//! CSV rendering for tabular reports.
//!
//! Columns are written in the order given, never in the order a record's
//! fields happen to be stored. A field is quoted only when it contains a
//! comma, a double quote or a line break, and embedded quotes are doubled.
//! Every record, the header included, ends with a single `\n`. A record
//! made of one empty field is written as `""` so it does not read back as
//! a blank line.

use crate::utils::error::{Result, RosterError};
use std::fmt::Display;

type Accessor<R> = Box<dyn Fn(&R) -> std::result::Result<String, String> + Send + Sync>;

/// A header label plus the accessor that turns a record into that column's text.
pub struct Column<R> {
    label: String,
    accessor: Accessor<R>,
}

impl<R> Column<R> {
    pub fn new<F>(label: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            accessor: Box::new(move |row| Ok(accessor(row))),
        }
    }

    /// Column whose accessor may fail. A failure aborts the whole render
    /// with [`RosterError::AccessorFailed`] instead of leaving a blank cell.
    pub fn try_new<F, E>(label: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&R) -> std::result::Result<String, E> + Send + Sync + 'static,
        E: Display,
    {
        Self {
            label: label.into(),
            accessor: Box::new(move |row| accessor(row).map_err(|e| e.to_string())),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<R> std::fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column").field("label", &self.label).finish()
    }
}

/// Renders `rows` as CSV text under `columns`.
///
/// No columns yields an empty string; no rows yields the header line alone.
pub fn render<R>(columns: &[Column<R>], rows: &[R]) -> Result<String> {
    if columns.is_empty() {
        return Ok(String::new());
    }

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(columns.iter().map(Column::label))?;

    let mut fields: Vec<String> = Vec::with_capacity(columns.len());
    for (index, row) in rows.iter().enumerate() {
        fields.clear();
        for column in columns {
            let value = (column.accessor)(row).map_err(|message| RosterError::AccessorFailed {
                column: column.label.clone(),
                row: index,
                message,
            })?;
            fields.push(value);
        }
        writer.write_record(&fields)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| RosterError::IoError(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
