//! CSV export of result rows
//!
//! Only list-valued payloads export. The list is found by checking
//! [`EXPORT_FIELDS`] in order on the serialized response; a response with
//! none of them (or an empty one) exports nothing.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use super::format::cell_text;
use crate::response::TaskResponse;
use crate::tasks::TaskKind;

/// Exportable list fields, checked in this order
pub const EXPORT_FIELDS: [&str; 4] = ["forecast", "recommendations", "promos", "price_moves"];

/// Errors producing or writing an export
#[derive(Debug, Error)]
pub enum ExportError {
    /// Response could not be serialized
    #[error("Failed to serialize response: {0}")]
    Encode(#[from] serde_json::Error),

    /// CSV writer failed
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// CSV buffer could not be finalized
    #[error("Failed to finish CSV: {0}")]
    Finish(String),

    /// Export file could not be written
    #[error("Failed to write export to {path}: {source}")]
    Write {
        /// Target path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
}

/// A rendered CSV export
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CsvExport {
    /// Task the rows came from
    pub task: TaskKind,
    /// Suggested file name (`<task>_export.csv`)
    pub file_name: String,
    /// Header and rows
    pub contents: String,
    /// Data rows, excluding the header
    pub rows: usize,
}

/// File name for a task's export
#[must_use]
pub fn export_file_name(task: TaskKind) -> String {
    format!("{}_export.csv", task.as_str())
}

/// Render the response's exportable list as CSV
///
/// Columns come from the first row's keys; cells missing from later rows are
/// left empty and nested arrays are comma-joined.
///
/// # Errors
///
/// Fails only if serialization or the CSV writer fails.
pub fn export_csv(response: &TaskResponse) -> Result<Option<CsvExport>, ExportError> {
    let value = serde_json::to_value(response)?;

    let Some(rows) = EXPORT_FIELDS
        .iter()
        .find_map(|field| value.get(*field).and_then(Value::as_array))
    else {
        return Ok(None);
    };

    let Some(Value::Object(first)) = rows.first() else {
        return Ok(None);
    };
    let header: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(&header)?;
    for row in rows {
        let record: Vec<String> = header
            .iter()
            .map(|key| row.get(*key).map(cell_text).unwrap_or_default())
            .collect();
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Finish(e.to_string()))?;
    let contents = String::from_utf8(bytes).map_err(|e| ExportError::Finish(e.to_string()))?;

    let task = response.kind();
    Ok(Some(CsvExport {
        task,
        file_name: export_file_name(task),
        contents,
        rows: rows.len(),
    }))
}

/// Write an export into `dir`, creating it if needed
///
/// # Errors
///
/// Fails if the directory or file cannot be written.
pub async fn write_export(dir: &Path, export: &CsvExport) -> Result<PathBuf, ExportError> {
    let path = dir.join(&export.file_name);

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;
    tokio::fs::write(&path, export.contents.as_bytes())
        .await
        .map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

    tracing::info!(path = %path.display(), rows = export.rows, "Exported result rows");
    Ok(path)
}
