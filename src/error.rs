//! Errors
//!
//! Error type shared by the data layer, the tree engine and the metrics.
use thiserror::Error;

/// Errors that can occur while loading data, training, pruning or predicting.
///
/// Attributes without an admissible split and categories never seen during
/// training are not errors: the builder skips such attributes and the
/// predictor falls back to the tree's majority class.
#[derive(Debug, Error)]
pub enum TreeError {
    /// `predict` or `prune` was called before `fit`.
    #[error("The model must be trained with `fit` before it can be used.")]
    UntrainedModel,
    /// A tree node was requested for an empty partition and the variant does not
    /// degrade to a majority-class leaf.
    #[error("Cannot build a tree node from an empty partition.")]
    EmptyDataset,
    /// Row index and target attribute name.
    #[error("Row {0} has no value for the target attribute '{1}'.")]
    MissingTargetValue(usize, String),
    /// Row index and attribute name.
    #[error("Row {0} has no value for the attribute '{1}'.")]
    MissingAttributeValue(usize, String),
    /// Candidate attribute that no training row carries.
    #[error("Attribute '{0}' is not present in the dataset.")]
    UnknownAttribute(String),
    /// First value is the name of the parameter, second is expected, third is what was passed.
    #[error("Invalid parameter value passed for {0}, expected {1} but {2} provided.")]
    InvalidParameter(String, String, String),
    /// Predicted and true label sequences differ in length.
    #[error("Predictions and labels are of different sizes.")]
    LengthMismatch,
    #[error("Precision and recall are both 0, F1 score undefined.")]
    UndefinedF1,
    /// The CSV source could not be read or parsed.
    #[error("Unable to read dataset: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TreeError>;
