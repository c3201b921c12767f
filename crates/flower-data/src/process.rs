use flower_core::{Cell, Table};

use crate::error::PipelineError;

/// Strip every leading `prefix` from `name`, case-sensitively.
fn strip_column_prefix<'a>(name: &'a str, prefix: &str) -> &'a str {
    let mut name = name;
    while !prefix.is_empty() {
        match name.strip_prefix(prefix) {
            Some(rest) => name = rest,
            None => break,
        }
    }
    name
}

/// Strip every leading `prefix` from `value`, ignoring ASCII case.
fn strip_value_prefix<'a>(value: &'a str, prefix: &str) -> &'a str {
    let mut value = value;
    while !prefix.is_empty() {
        match value.get(..prefix.len()) {
            Some(head) if head.eq_ignore_ascii_case(prefix) => value = &value[prefix.len()..],
            _ => break,
        }
    }
    value
}

/// Remove the vendor prefix from column names and from the label column's
/// values. Applying it twice gives the same table as applying it once.
pub fn strip_prefix(table: &Table, label_column: &str, prefix: &str) -> Result<Table, PipelineError> {
    let columns: Vec<String> = table
        .columns
        .iter()
        .map(|c| strip_column_prefix(c, prefix).to_string())
        .collect();
    let label_pos = columns
        .iter()
        .position(|c| c == label_column)
        .ok_or_else(|| PipelineError::Process(label_column.to_string()))?;

    let data = table
        .data
        .iter()
        .map(|row| {
            let mut row = row.clone();
            if let Cell::Text(value) = &row[label_pos] {
                row[label_pos] = Cell::Text(strip_value_prefix(value, prefix).to_string());
            }
            row
        })
        .collect();

    Ok(Table {
        columns,
        index: table.index.clone(),
        data,
    })
}
