//! Random forest classifier over string labels.
//!
//! The learner works on `u32` class indices; [`Classifier`] keeps the sorted
//! class names next to the fitted forest and translates in both directions.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use flower_core::{Criterion, Hyperparameters, Series, Table};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::tree::decision_tree_classifier::SplitCriterion;

use crate::error::ModelError;

/// Seed of bootstrap sampling and feature selection inside the forest.
const FOREST_SEED: u64 = 42;

type Forest = RandomForestClassifier<f64, u32, DenseMatrix<f64>, Vec<u32>>;

/// A fitted forest plus everything needed to interpret its input and output.
#[derive(Debug, Serialize, Deserialize)]
pub struct Classifier {
    pub feature_names: Vec<String>,
    pub label_name: String,
    pub classes: Vec<String>,
    pub hyperparameters: Hyperparameters,
    pub trained_at: DateTime<Utc>,
    /// Absent when the training labels hold a single class; the learner
    /// needs at least two.
    forest: Option<Forest>,
}

const fn split_criterion(criterion: Criterion) -> SplitCriterion {
    match criterion {
        Criterion::Gini => SplitCriterion::Gini,
        // Log loss and entropy select the same splits.
        Criterion::Entropy | Criterion::LogLoss => SplitCriterion::Entropy,
    }
}

fn feature_matrix(features: &Table) -> Result<Vec<Vec<f64>>, ModelError> {
    features
        .data
        .iter()
        .zip(&features.index)
        .map(|(row, index)| {
            row.iter()
                .zip(&features.columns)
                .map(|(cell, column)| {
                    cell.as_f64().ok_or_else(|| {
                        ModelError::Train(format!(
                            "non-numeric value '{cell}' in column '{column}' at row {index}"
                        ))
                    })
                })
                .collect()
        })
        .collect()
}

impl Classifier {
    /// Fit a forest on `features` and `labels`.
    ///
    /// # Errors
    ///
    /// [`ModelError::Train`] if the hyperparameters are out of range, the
    /// inputs are empty, misaligned or non-numeric, or the learner fails.
    pub fn fit(
        features: &Table,
        labels: &Series,
        params: &Hyperparameters,
    ) -> Result<Self, ModelError> {
        params.validate().map_err(|e| ModelError::Train(e.to_string()))?;
        if features.is_empty() {
            return Err(ModelError::Train("training set is empty".into()));
        }
        if features.columns.is_empty() {
            return Err(ModelError::Train("training set has no feature columns".into()));
        }
        if features.len() != labels.len() {
            return Err(ModelError::Train(format!(
                "{} feature rows but {} labels",
                features.len(),
                labels.len()
            )));
        }

        let rows = feature_matrix(features)?;
        let names: Vec<String> = labels.data.iter().map(ToString::to_string).collect();
        let classes: Vec<String> = names
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let y: Vec<u32> = names
            .iter()
            .map(|name| {
                let pos = classes.binary_search(name).unwrap_or_default();
                u32::try_from(pos).map_err(|_| ModelError::Train("too many classes".into()))
            })
            .collect::<Result<_, _>>()?;

        let mut parameters = RandomForestClassifierParameters::default()
            .with_n_trees(params.n_estimators)
            .with_criterion(split_criterion(params.criterion))
            .with_seed(FOREST_SEED);
        if let Some(depth) = params.max_depth {
            parameters = parameters.with_max_depth(depth);
        }

        let forest = if classes.len() > 1 {
            let x = DenseMatrix::from_2d_vec(&rows);
            Some(Forest::fit(&x, &y, parameters).map_err(|e| ModelError::Train(e.to_string()))?)
        } else {
            None
        };

        Ok(Self {
            feature_names: features.columns.clone(),
            label_name: labels.name.clone(),
            classes,
            hyperparameters: params.clone(),
            trained_at: Utc::now(),
            forest,
        })
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Predict one label per row.
    ///
    /// # Errors
    ///
    /// [`ModelError::Predict`] if a row's length differs from
    /// [`Self::n_features`] or the learner fails.
    pub fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<String>, ModelError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let expected = self.n_features();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != expected) {
            return Err(ModelError::Predict(format!(
                "expected {expected} features, got {} in row {i}",
                row.len()
            )));
        }

        let Some(forest) = &self.forest else {
            let class = self
                .classes
                .first()
                .ok_or_else(|| ModelError::Predict("model has no classes".into()))?;
            return Ok(vec![class.clone(); rows.len()]);
        };
        let x = DenseMatrix::from_2d_vec(&rows.to_vec());
        let predicted = forest
            .predict(&x)
            .map_err(|e| ModelError::Predict(e.to_string()))?;

        predicted
            .into_iter()
            .map(|class| {
                usize::try_from(class)
                    .ok()
                    .and_then(|pos| self.classes.get(pos))
                    .cloned()
                    .ok_or_else(|| ModelError::Predict(format!("unknown class index {class}")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flower_core::Cell;
    use pretty_assertions::assert_eq;

    fn two_clusters() -> (Table, Series) {
        let mut data = Vec::new();
        let mut labels = Vec::new();
        for i in 0..10 {
            let jitter = f64::from(i) * 0.1;
            data.push(vec![Cell::Number(jitter), Cell::Number(1.0 + jitter)]);
            labels.push(Cell::Text("small".into()));
            data.push(vec![Cell::Number(100.0 + jitter), Cell::Number(90.0 - jitter)]);
            labels.push(Cell::Text("large".into()));
        }
        let table = Table::new(vec!["a".into(), "b".into()], data);
        let series = Series {
            name: "Species".into(),
            index: table.index.clone(),
            data: labels,
        };
        (table, series)
    }

    fn small_params() -> Hyperparameters {
        Hyperparameters {
            n_estimators: 10,
            ..Hyperparameters::default()
        }
    }

    #[test]
    fn separates_clusters() {
        let (table, labels) = two_clusters();
        let model = Classifier::fit(&table, &labels, &small_params()).unwrap();

        assert_eq!(model.classes, vec!["large", "small"]);
        assert_eq!(model.n_features(), 2);
        let predictions = model.predict(&[vec![0.3, 1.2], vec![100.5, 89.0]]).unwrap();
        assert_eq!(predictions, vec!["small", "large"]);
    }

    #[test]
    fn entropy_criterion_trains() {
        let (table, labels) = two_clusters();
        let params = Hyperparameters {
            criterion: Criterion::Entropy,
            max_depth: Some(3),
            ..small_params()
        };
        let model = Classifier::fit(&table, &labels, &params).unwrap();
        assert_eq!(model.predict(&[vec![0.0, 1.0]]).unwrap(), vec!["small"]);
    }

    #[test]
    fn rejects_wrong_feature_count() {
        let (table, labels) = two_clusters();
        let model = Classifier::fit(&table, &labels, &small_params()).unwrap();

        let err = model.predict(&[vec![1.0, 2.0], vec![1.0]]).unwrap_err();
        assert!(matches!(err, ModelError::Predict(_)));
        assert_eq!(
            err.to_string(),
            "Error predicting: expected 2 features, got 1 in row 1"
        );
    }

    #[test]
    fn empty_input_predicts_nothing() {
        let (table, labels) = two_clusters();
        let model = Classifier::fit(&table, &labels, &small_params()).unwrap();
        assert!(model.predict(&[]).unwrap().is_empty());
    }

    #[test]
    fn non_numeric_features_fail_training() {
        let table = Table::new(
            vec!["a".into()],
            vec![vec![Cell::Text("x".into())], vec![Cell::Number(1.0)]],
        );
        let labels = Series {
            name: "Species".into(),
            index: vec![0, 1],
            data: vec![Cell::Text("a".into()), Cell::Text("b".into())],
        };
        let err = Classifier::fit(&table, &labels, &small_params()).unwrap_err();
        assert!(err.to_string().contains("non-numeric value 'x' in column 'a'"));
    }

    #[test]
    fn single_class_predicts_that_class() {
        let table = Table::new(
            vec!["a".into()],
            vec![vec![Cell::Number(1.0)], vec![Cell::Number(2.0)]],
        );
        let labels = Series {
            name: "Species".into(),
            index: vec![0, 1],
            data: vec![Cell::Text("setosa".into()), Cell::Text("setosa".into())],
        };
        let model = Classifier::fit(&table, &labels, &small_params()).unwrap();
        assert_eq!(model.classes, vec!["setosa"]);
        assert_eq!(
            model.predict(&[vec![9.0], vec![-1.0]]).unwrap(),
            vec!["setosa", "setosa"]
        );
        assert!(model.predict(&[vec![9.0, 1.0]]).is_err());
    }

    #[test]
    fn zero_depth_fails_training() {
        let (table, labels) = two_clusters();
        let params = Hyperparameters {
            max_depth: Some(0),
            ..small_params()
        };
        let err = Classifier::fit(&table, &labels, &params).unwrap_err();
        assert!(matches!(err, ModelError::Train(message) if message.contains("max_depth")));
    }

    #[test]
    fn empty_training_set_fails() {
        let table = Table::new(vec!["a".into()], Vec::new());
        let err = Classifier::fit(&table, &Series::default(), &small_params()).unwrap_err();
        assert!(matches!(err, ModelError::Train(_)));
    }
}
