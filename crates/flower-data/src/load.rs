use std::path::Path;

use flower_core::{Cell, Table};

use crate::error::PipelineError;

/// Read a CSV file with a header row into a [`Table`].
pub fn load_csv(path: &Path) -> Result<Table, PipelineError> {
    if !path.exists() {
        return Err(PipelineError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut data = Vec::new();
    for record in reader.records() {
        let record = record?;
        data.push(record.iter().map(Cell::parse).collect());
    }

    tracing::debug!(path = %path.display(), rows = data.len(), columns = columns.len(), "dataset loaded");
    Ok(Table::new(columns, data))
}
