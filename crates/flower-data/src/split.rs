use flower_core::{Split, Table};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::PipelineError;

/// Number of rows held out for testing: `ceil(rows * percent / 100)`,
/// kept within `1..rows` so neither side is empty.
pub fn test_size(rows: usize, test_percent: u8) -> usize {
    (rows * usize::from(test_percent))
        .div_ceil(100)
        .clamp(1, rows.saturating_sub(1).max(1))
}

/// Partition `table` into train and test sets.
///
/// The row order is a seeded shuffle, so the same table, seed and percentage
/// always produce the same membership. Test rows come first in the shuffled
/// order.
pub fn train_test_split(
    table: &Table,
    label_column: &str,
    seed: u64,
    test_percent: u8,
) -> Result<Split, PipelineError> {
    let labels = table
        .column(label_column)
        .ok_or_else(|| PipelineError::Split(format!("missing column '{label_column}'")))?;
    let features = table
        .without_column(label_column)
        .ok_or_else(|| PipelineError::Split(format!("missing column '{label_column}'")))?;

    let rows = table.len();
    if rows < 2 {
        return Err(PipelineError::Split(format!(
            "need at least 2 rows, got {rows}"
        )));
    }

    let mut positions: Vec<usize> = (0..rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    positions.shuffle(&mut rng);

    let (test, train) = positions.split_at(test_size(rows, test_percent));
    tracing::debug!(rows, train = train.len(), test = test.len(), seed, "dataset split");

    Ok(Split {
        x_train: features.take(train),
        x_test: features.take(test),
        y_train: labels.take(train),
        y_test: labels.take(test),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flower_core::Cell;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn table(rows: usize) -> Table {
        Table::new(
            vec!["x".into(), "Species".into()],
            (0..rows)
                .map(|i| {
                    #[allow(clippy::cast_precision_loss)]
                    let x = i as f64;
                    vec![Cell::Number(x), Cell::Text(format!("class-{}", i % 3))]
                })
                .collect(),
        )
    }

    #[rstest]
    #[case(3, 1)]
    #[case(5, 1)]
    #[case(10, 2)]
    #[case(11, 3)]
    #[case(150, 30)]
    #[case(2, 1)]
    fn test_size_rounds_up(#[case] rows: usize, #[case] expected: usize) {
        assert_eq!(test_size(rows, 20), expected);
    }

    #[test]
    fn test_size_never_empties_train() {
        assert_eq!(test_size(2, 99), 1);
        assert_eq!(test_size(10, 99), 9);
    }

    #[test]
    fn features_exclude_label_and_rows_stay_aligned() {
        let split = train_test_split(&table(10), "Species", 42, 20).unwrap();

        assert_eq!(split.x_train.columns, vec!["x"]);
        assert_eq!(split.y_train.name, "Species");
        assert_eq!(split.x_train.index, split.y_train.index);
        assert_eq!(split.x_test.index, split.y_test.index);
        for (row, label) in split.x_train.data.iter().zip(&split.y_train.data) {
            let x = row[0].as_f64().unwrap();
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let i = x as usize;
            assert_eq!(label, &Cell::Text(format!("class-{}", i % 3)));
        }
    }

    #[test]
    fn different_seeds_give_different_partitions() {
        let a = train_test_split(&table(50), "Species", 42, 20).unwrap();
        let b = train_test_split(&table(50), "Species", 7, 20).unwrap();
        assert_ne!(a.x_test.index, b.x_test.index);
    }

    #[test]
    fn missing_label_column_fails() {
        let err = train_test_split(&table(10), "label", 42, 20).unwrap_err();
        assert!(matches!(err, PipelineError::Split(_)));
    }

    #[test]
    fn single_row_cannot_be_split() {
        let err = train_test_split(&table(1), "Species", 42, 20).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error splitting dataset: need at least 2 rows, got 1"
        );
    }
}
