//! Random Forest - bagged linfa decision trees
//!
//! Each member is a `linfa_trees::DecisionTree` grown with Gini splits on its
//! own bootstrap sample. The forest probability is the share of trees voting
//! CKD.

use linfa::prelude::*;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::features::{FeatureRow, Label, FEATURE_COUNT};

use super::classifier::{check_training_input, Classifier, ModelError};

// ============================================================================
// PARAMETERS
// ============================================================================

pub const DEFAULT_N_ESTIMATORS: usize = 100;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_estimators: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_estimators: DEFAULT_N_ESTIMATORS,
            seed: DEFAULT_SEED,
        }
    }
}

type Tree = DecisionTree<f64, bool>;

// ============================================================================
// FOREST
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    params: ForestParams,
    trees: Vec<Tree>,
}

impl RandomForest {
    pub fn new(params: ForestParams) -> Self {
        Self {
            params,
            trees: Vec::new(),
        }
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    /// Deserialized forests are checked before use: at least one tree, and
    /// no split on a column outside the layout.
    pub fn is_well_formed(&self) -> bool {
        !self.trees.is_empty()
            && self
                .trees
                .iter()
                .all(|tree| tree.features().iter().all(|&f| f < FEATURE_COUNT))
    }
}

impl Default for RandomForest {
    fn default() -> Self {
        Self::new(ForestParams::default())
    }
}

fn to_records(rows: &[FeatureRow]) -> Array2<f64> {
    Array2::from_shape_fn((rows.len(), FEATURE_COUNT), |(i, j)| rows[i][j])
}

fn backend_error<E: std::fmt::Display>(err: E) -> ModelError {
    ModelError::Backend(err.to_string())
}

impl Classifier for RandomForest {
    fn fit(&mut self, rows: &[FeatureRow], labels: &[Label]) -> Result<(), ModelError> {
        check_training_input(rows, labels)?;
        if self.params.n_estimators == 0 {
            return Err(ModelError::InvalidParameter("n_estimators must be at least 1".into()));
        }

        let records = to_records(rows);
        let targets: Array1<bool> = labels.iter().map(Label::is_positive).collect();
        let tree_params = Tree::params().split_quality(SplitQuality::Gini);
        let n = rows.len();

        // One seed per tree, drawn up front so tree i is reproducible on its own
        let mut master = StdRng::seed_from_u64(self.params.seed);
        let seeds: Vec<u64> = (0..self.params.n_estimators).map(|_| master.gen()).collect();

        let mut trees = Vec::with_capacity(seeds.len());
        for seed in seeds {
            let mut rng = StdRng::seed_from_u64(seed);
            let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            let bag = Dataset::new(
                records.select(Axis(0), &sample),
                targets.select(Axis(0), &sample),
            );
            trees.push(tree_params.fit(&bag).map_err(backend_error)?);
        }
        self.trees = trees;

        tracing::debug!("Fitted {} trees on {} rows", self.trees.len(), n);

        Ok(())
    }

    fn predict_proba(&self, row: &FeatureRow) -> Result<f64, ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::NotFitted);
        }

        let record = to_records(std::slice::from_ref(row));
        let votes = self
            .trees
            .iter()
            .filter(|tree| {
                let predicted: Array1<bool> = tree.predict(&record);
                predicted[0]
            })
            .count();

        Ok(votes as f64 / self.trees.len() as f64)
    }

    fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Positive when sc is high and hemo is low
    fn toy_data() -> (Vec<FeatureRow>, Vec<Label>) {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for i in 0..60 {
            let ckd = i % 2 == 0;
            let mut row = [0.0; FEATURE_COUNT];
            row[0] = 30.0 + (i % 17) as f64;
            row[11] = if ckd { 3.0 + (i % 5) as f64 * 0.3 } else { 0.8 + (i % 4) as f64 * 0.1 };
            row[14] = if ckd { 9.0 + (i % 3) as f64 * 0.5 } else { 14.5 + (i % 3) as f64 * 0.5 };
            rows.push(row);
            labels.push(if ckd { Label::Ckd } else { Label::NotCkd });
        }
        (rows, labels)
    }

    #[test]
    fn test_unfitted_forest_errors() {
        let forest = RandomForest::default();
        assert!(!forest.is_fitted());
        assert!(!forest.is_well_formed());
        assert_eq!(forest.predict_proba(&[0.0; FEATURE_COUNT]), Err(ModelError::NotFitted));
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        let mut forest = RandomForest::default();
        assert_eq!(forest.fit(&[], &[]), Err(ModelError::EmptyTrainingSet));
        assert!(matches!(
            forest.fit(&[[0.0; FEATURE_COUNT]], &[]),
            Err(ModelError::LengthMismatch { rows: 1, labels: 0 })
        ));

        let mut empty = RandomForest::new(ForestParams { n_estimators: 0, ..ForestParams::default() });
        assert!(matches!(
            empty.fit(&[[0.0; FEATURE_COUNT]], &[Label::Ckd]),
            Err(ModelError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_forest_learns_separable_data() {
        let (rows, labels) = toy_data();
        let mut forest = RandomForest::default();
        forest.fit(&rows, &labels).unwrap();

        assert_eq!(forest.trees().len(), DEFAULT_N_ESTIMATORS);
        assert!(forest.is_well_formed());

        let correct = rows
            .iter()
            .zip(&labels)
            .filter(|(row, label)| forest.predict(row).unwrap() == **label)
            .count();
        assert_eq!(correct, rows.len());

        for row in &rows {
            let p = forest.predict_proba(row).unwrap();
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_same_seed_same_forest() {
        let (rows, labels) = toy_data();
        let mut a = RandomForest::default();
        let mut b = RandomForest::default();
        a.fit(&rows, &labels).unwrap();
        b.fit(&rows, &labels).unwrap();
        assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());

        let row = rows[3];
        assert_eq!(a.predict_proba(&row).unwrap(), b.predict_proba(&row).unwrap());
    }
}
