//! Tabular data in the pandas-style "split" JSON layout.
//!
//! A [`Table`] serializes as `{"columns": [...], "index": [...], "data": [[...]]}`
//! and a [`Series`] as `{"name": ..., "index": [...], "data": [...]}`. The
//! index holds the row position in the source file and survives row
//! selection, so train and test subsets can be traced back to input rows.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A single table cell: a number when the source text parses as one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
}

impl Cell {
    /// Parse raw text into a cell. Only finite values become numbers, so
    /// `nan` and `inf` stay text.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map_or_else(|| Self::Text(raw.to_string()), Self::Number)
    }

    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Table {
    pub columns: Vec<String>,
    pub index: Vec<usize>,
    pub data: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a table with a positional index `0..rows`.
    #[must_use]
    pub fn new(columns: Vec<String>, data: Vec<Vec<Cell>>) -> Self {
        let index = (0..data.len()).collect();
        Self {
            columns,
            index,
            data,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Extract one column as a series.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Series> {
        let pos = self.column_position(name)?;
        Some(Series {
            name: name.to_string(),
            index: self.index.clone(),
            data: self.data.iter().map(|row| row[pos].clone()).collect(),
        })
    }

    /// Copy of the table without the named column.
    #[must_use]
    pub fn without_column(&self, name: &str) -> Option<Self> {
        let pos = self.column_position(name)?;
        let mut columns = self.columns.clone();
        columns.remove(pos);
        let data = self
            .data
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.remove(pos);
                row
            })
            .collect();
        Some(Self {
            columns,
            index: self.index.clone(),
            data,
        })
    }

    /// Rows at the given positions, in that order, keeping their index labels.
    #[must_use]
    pub fn take(&self, positions: &[usize]) -> Self {
        Self {
            columns: self.columns.clone(),
            index: positions.iter().map(|&p| self.index[p]).collect(),
            data: positions.iter().map(|&p| self.data[p].clone()).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Series {
    pub name: String,
    pub index: Vec<usize>,
    pub data: Vec<Cell>,
}

impl Series {
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn take(&self, positions: &[usize]) -> Self {
        Self {
            name: self.name.clone(),
            index: positions.iter().map(|&p| self.index[p]).collect(),
            data: positions.iter().map(|&p| self.data[p].clone()).collect(),
        }
    }
}

/// Train/test partition of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Split {
    pub x_train: Table,
    pub x_test: Table,
    pub y_train: Series,
    pub y_test: Series,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Table {
        Table::new(
            vec!["a".into(), "b".into(), "label".into()],
            vec![
                vec![Cell::Number(1.0), Cell::Number(2.0), Cell::Text("x".into())],
                vec![Cell::Number(3.0), Cell::Number(4.0), Cell::Text("y".into())],
                vec![Cell::Number(5.0), Cell::Number(6.0), Cell::Text("z".into())],
            ],
        )
    }

    #[test]
    fn cell_parse_numbers_and_text() {
        assert_eq!(Cell::parse("5.1"), Cell::Number(5.1));
        assert_eq!(Cell::parse(" 3 "), Cell::Number(3.0));
        assert_eq!(Cell::parse("setosa"), Cell::Text("setosa".into()));
    }

    #[test]
    fn non_finite_values_stay_text() {
        for raw in ["nan", "NaN", "inf", "-inf", "infinity"] {
            assert_eq!(Cell::parse(raw), Cell::Text(raw.into()), "{raw}");
        }
        assert_eq!(Cell::parse("1e400"), Cell::Text("1e400".into()));
    }

    #[test]
    fn split_layout_serialization() {
        let table = Table::new(
            vec!["a".into(), "s".into()],
            vec![vec![Cell::Number(1.5), Cell::Text("x".into())]],
        );
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"columns": ["a", "s"], "index": [0], "data": [[1.5, "x"]]})
        );
    }

    #[test]
    fn column_and_without_column() {
        let table = sample();
        let labels = table.column("label").unwrap();
        assert_eq!(labels.data.len(), 3);
        assert_eq!(labels.data[1].to_string(), "y");

        let features = table.without_column("label").unwrap();
        assert_eq!(features.columns, vec!["a", "b"]);
        assert_eq!(features.data[2], vec![Cell::Number(5.0), Cell::Number(6.0)]);
        assert!(table.without_column("missing").is_none());
    }

    #[test]
    fn take_keeps_index_labels() {
        let table = sample();
        let subset = table.take(&[2, 0]);
        assert_eq!(subset.index, vec![2, 0]);
        assert_eq!(subset.data[0][2], Cell::Text("z".into()));

        let again = subset.take(&[1]);
        assert_eq!(again.index, vec![0]);
    }
}
