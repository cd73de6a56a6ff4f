/// Confusion matrix, accuracy, precision, recall and F1
pub mod confusion;

pub use confusion::ClassificationMetrics;
