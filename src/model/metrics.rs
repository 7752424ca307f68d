//! Hold-out evaluation for the positive (CKD) class.

use serde::{Deserialize, Serialize};

use crate::dataset::EncodedDataset;
use crate::features::Label;

use super::classifier::{Classifier, ModelError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_positive: usize,
    pub false_positive: usize,
    pub true_negative: usize,
    pub false_negative: usize,
}

impl ConfusionMatrix {
    pub fn record(&mut self, actual: Label, predicted: Label) {
        match (actual.is_positive(), predicted.is_positive()) {
            (true, true) => self.true_positive += 1,
            (false, true) => self.false_positive += 1,
            (false, false) => self.true_negative += 1,
            (true, false) => self.false_negative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub samples: usize,
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub confusion: ConfusionMatrix,
}

impl EvaluationReport {
    pub fn from_confusion(confusion: ConfusionMatrix) -> Self {
        let ratio = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f64 / den as f64 };

        let c = &confusion;
        let accuracy = ratio(c.true_positive + c.true_negative, c.total());
        let precision = ratio(c.true_positive, c.true_positive + c.false_positive);
        let recall = ratio(c.true_positive, c.true_positive + c.false_negative);
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        Self {
            samples: c.total(),
            accuracy,
            precision,
            recall,
            f1,
            confusion,
        }
    }
}

/// Score `model` against every row of `dataset`
pub fn evaluate<C: Classifier>(model: &C, dataset: &EncodedDataset) -> Result<EvaluationReport, ModelError> {
    let mut confusion = ConfusionMatrix::default();
    for (row, actual) in dataset.rows.iter().zip(&dataset.labels) {
        confusion.record(*actual, model.predict(row)?);
    }
    Ok(EvaluationReport::from_confusion(confusion))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_from_confusion() {
        let confusion = ConfusionMatrix {
            true_positive: 8,
            false_positive: 2,
            true_negative: 9,
            false_negative: 1,
        };
        let report = EvaluationReport::from_confusion(confusion);

        assert_eq!(report.samples, 20);
        assert!((report.accuracy - 0.85).abs() < 1e-12);
        assert!((report.precision - 0.8).abs() < 1e-12);
        assert!((report.recall - 8.0 / 9.0).abs() < 1e-12);
        assert!(report.f1 > 0.84 && report.f1 < 0.85);
    }

    #[test]
    fn test_empty_confusion_has_zero_scores() {
        let report = EvaluationReport::from_confusion(ConfusionMatrix::default());
        assert_eq!(report.accuracy, 0.0);
        assert_eq!(report.f1, 0.0);
    }

    #[test]
    fn test_record() {
        let mut c = ConfusionMatrix::default();
        c.record(Label::Ckd, Label::Ckd);
        c.record(Label::Ckd, Label::NotCkd);
        c.record(Label::NotCkd, Label::Ckd);
        c.record(Label::NotCkd, Label::NotCkd);
        assert_eq!(c, ConfusionMatrix { true_positive: 1, false_positive: 1, true_negative: 1, false_negative: 1 });
    }
}
