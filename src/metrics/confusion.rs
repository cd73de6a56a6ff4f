use crate::data::Value;
use crate::error::{Result, TreeError};
use nalgebra::DMatrix;
use std::collections::BTreeSet;

type ConfusionMatrix = DMatrix<usize>;

/// Classification metrics over predicted and true class labels.
///
/// Classes index the confusion matrix in ascending order. With two classes the
/// greater one is the positive class; with more, precision and recall are
/// macro-averaged.
pub trait ClassificationMetrics {
    /// Computes the confusion matrix based on the true labels and predicted labels.
    ///
    /// Rows are true classes, columns predicted classes.
    ///
    /// # Errors
    ///
    /// `LengthMismatch` if the two slices differ in length.
    fn confusion_matrix(&self, y_true: &[Value], y_pred: &[Value]) -> Result<ConfusionMatrix> {
        if y_true.len() != y_pred.len() {
            return Err(TreeError::LengthMismatch);
        }

        let classes = y_true
            .iter()
            .chain(y_pred)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>();
        let index_of = |label: &Value| classes.iter().position(|class| *class == label);

        let mut matrix = DMatrix::zeros(classes.len(), classes.len());
        for (y_t, y_p) in y_true.iter().zip(y_pred) {
            if let (Some(row), Some(col)) = (index_of(y_t), index_of(y_p)) {
                matrix[(row, col)] += 1;
            }
        }

        Ok(matrix)
    }

    /// Computes the accuracy based on the true labels and predicted labels.
    ///
    /// An empty input has accuracy 0.
    fn accuracy(&self, y_true: &[Value], y_pred: &[Value]) -> Result<f64> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;
        if y_true.is_empty() {
            return Ok(0.0);
        }

        let correct = matrix.diagonal().sum();

        Ok(correct as f64 / y_true.len() as f64)
    }

    /// Computes the precision based on the true labels and predicted labels.
    fn precision(&self, y_true: &[Value], y_pred: &[Value]) -> Result<f64> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;

        let num_classes = matrix.nrows();
        if num_classes == 0 {
            return Ok(0.0);
        }

        if num_classes == 2 {
            let tp = matrix[(1, 1)];
            let fp = matrix[(0, 1)];

            if tp + fp > 0 {
                return Ok(tp as f64 / (tp + fp) as f64);
            }
        }

        let mut precision_total = 0.0;
        for class in 0..num_classes {
            let tp = matrix[(class, class)];
            let fp = matrix.column(class).sum() - tp;

            if tp + fp > 0 {
                precision_total += tp as f64 / (tp + fp) as f64;
            }
        }

        Ok(precision_total / num_classes as f64)
    }

    /// Computes the recall based on the true labels and predicted labels.
    fn recall(&self, y_true: &[Value], y_pred: &[Value]) -> Result<f64> {
        let matrix = self.confusion_matrix(y_true, y_pred)?;

        let num_classes = matrix.nrows();
        if num_classes == 0 {
            return Ok(0.0);
        }

        if num_classes == 2 {
            let tp = matrix[(1, 1)];
            let fn_ = matrix[(1, 0)];

            if tp + fn_ > 0 {
                return Ok(tp as f64 / (tp + fn_) as f64);
            }
        }

        let mut recall_total = 0.0;
        for class in 0..num_classes {
            let tp = matrix[(class, class)];
            let fn_ = matrix.row(class).sum() - tp;

            if tp + fn_ > 0 {
                recall_total += tp as f64 / (tp + fn_) as f64;
            }
        }

        Ok(recall_total / num_classes as f64)
    }

    /// Computes the F1 score based on the true labels and predicted labels.
    ///
    /// # Errors
    ///
    /// `UndefinedF1` when precision and recall are both 0.
    fn f1_score(&self, y_true: &[Value], y_pred: &[Value]) -> Result<f64> {
        let precision = self.precision(y_true, y_pred)?;
        let recall = self.recall(y_true, y_pred)?;

        if (precision + recall).abs() < f64::EPSILON {
            return Err(TreeError::UndefinedF1);
        }
        Ok(2.0 * (precision * recall) / (precision + recall))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct MockClassifier;

    impl ClassificationMetrics for MockClassifier {}

    fn labels(values: &[&str]) -> Vec<Value> {
        values.iter().map(|&value| Value::from(value)).collect()
    }

    fn binary() -> (Vec<Value>, Vec<Value>) {
        (
            labels(&["yes", "no", "yes", "no", "yes"]),
            labels(&["yes", "yes", "no", "no", "yes"]),
        )
    }

    fn multiclass() -> (Vec<Value>, Vec<Value>) {
        (
            labels(&["a", "b", "c", "b", "a", "c"]),
            labels(&["a", "c", "b", "b", "a", "c"]),
        )
    }

    #[test]
    fn test_confusion_matrix() {
        let (y_true, y_pred) = binary();
        let result = MockClassifier.confusion_matrix(&y_true, &y_pred).unwrap();
        // column-major: [no->no, yes->no, no->yes, yes->yes]
        let expected = DMatrix::from_vec(2, 2, vec![1, 1, 1, 2]);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_confusion_matrix_unequal() {
        let y_true = labels(&["a", "b", "a"]);
        let y_pred = labels(&["a", "b"]);
        assert!(matches!(
            MockClassifier.confusion_matrix(&y_true, &y_pred),
            Err(TreeError::LengthMismatch)
        ));
    }

    #[test]
    fn test_confusion_matrix_multiclass() {
        let (y_true, y_pred) = multiclass();
        let result = MockClassifier.confusion_matrix(&y_true, &y_pred).unwrap();
        let expected = DMatrix::from_vec(3, 3, vec![2, 0, 0, 0, 1, 1, 0, 1, 1]);
        assert_eq!(result, expected);
    }

    #[test]
    fn test_confusion_matrix_mixed_labels() {
        let y_true = vec![Value::from(1), Value::from("x"), Value::from(0)];
        let y_pred = vec![Value::from(1), Value::from(0), Value::from(0)];
        let result = MockClassifier.confusion_matrix(&y_true, &y_pred).unwrap();
        // numbers sort before categories
        assert_eq!(result.nrows(), 3);
        assert_eq!(result[(0, 0)], 1);
        assert_eq!(result[(1, 1)], 1);
        assert_eq!(result[(2, 0)], 1);
    }

    #[test]
    fn test_accuracy() {
        let (y_true, y_pred) = binary();
        assert_relative_eq!(MockClassifier.accuracy(&y_true, &y_pred).unwrap(), 0.6);
        assert_relative_eq!(MockClassifier.accuracy(&y_true, &y_true).unwrap(), 1.0);
        assert_relative_eq!(MockClassifier.accuracy(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_precision_and_recall() {
        let (y_true, y_pred) = binary();
        assert_relative_eq!(MockClassifier.precision(&y_true, &y_pred).unwrap(), 2.0 / 3.0);
        assert_relative_eq!(MockClassifier.recall(&y_true, &y_pred).unwrap(), 2.0 / 3.0);
    }

    #[test]
    fn test_no_positive_predictions() {
        let y_true = labels(&["yes", "yes", "yes"]);
        let y_pred = labels(&["no", "no", "no"]);
        assert_relative_eq!(MockClassifier.precision(&y_true, &y_pred).unwrap(), 0.0);
        assert_relative_eq!(MockClassifier.recall(&y_true, &y_pred).unwrap(), 0.0);
        assert!(matches!(
            MockClassifier.f1_score(&y_true, &y_pred),
            Err(TreeError::UndefinedF1)
        ));
    }

    #[test]
    fn test_multiclass_macro_average() {
        let (y_true, y_pred) = multiclass();
        let expected = (2.0 / 2.0 + 1.0 / 2.0 + 1.0 / 2.0) / 3.0;
        assert_relative_eq!(MockClassifier.precision(&y_true, &y_pred).unwrap(), expected);
        assert_relative_eq!(MockClassifier.recall(&y_true, &y_pred).unwrap(), expected);
        assert_relative_eq!(MockClassifier.f1_score(&y_true, &y_pred).unwrap(), expected);
    }

    #[test]
    fn test_f1_score() {
        let (y_true, y_pred) = binary();
        assert_relative_eq!(MockClassifier.f1_score(&y_true, &y_pred).unwrap(), 2.0 / 3.0);
        assert_relative_eq!(MockClassifier.f1_score(&y_true, &y_true).unwrap(), 1.0);
    }
}
