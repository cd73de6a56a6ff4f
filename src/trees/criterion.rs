//! Splitting criteria distinguishing the ID3, C4.5 and CART variants.
use super::impurity::{partition_gain, partition_gain_ratio, weighted_impurity, Impurity};
use super::split::{best_split, Candidate};
use crate::data::{DataView, Domain};
use std::fmt::{self, Display};

/// How a categorical attribute is partitioned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CategoricalSplit {
    /// One branch per observed value.
    Multiway,
    /// `== value` against `!= value`.
    Binary,
}

/// Scores candidate partitions of a node.
///
/// Numeric attributes are always split on a single threshold. The criterion
/// decides how categorical attributes are partitioned, how a partition is
/// scored and which of two scores is better.
pub trait SplitCriterion: Send + Sync {
    fn name(&self) -> &'static str;

    fn measure(&self) -> Impurity;

    fn categorical_split(&self) -> CategoricalSplit;

    /// Score of splitting `parent` into `parts`.
    fn score(&self, parent: &DataView, parts: &[DataView]) -> f64;

    /// Whether `candidate` strictly beats `incumbent`.
    fn prefers(&self, candidate: f64, incumbent: f64) -> bool {
        candidate > incumbent
    }

    /// Best admissible split of `attribute`, or `None` when the attribute cannot
    /// be split under `min_samples_leaf`.
    fn evaluate(
        &self,
        view: &DataView,
        attribute: &str,
        domain: Domain,
        min_samples_leaf: usize,
    ) -> Option<Candidate> {
        best_split(self, view, attribute, domain, min_samples_leaf)
    }
}

/// ID3: entropy reduction, multiway categorical splits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InformationGain;

impl SplitCriterion for InformationGain {
    fn name(&self) -> &'static str {
        "information gain"
    }

    fn measure(&self) -> Impurity {
        Impurity::Entropy
    }

    fn categorical_split(&self) -> CategoricalSplit {
        CategoricalSplit::Multiway
    }

    fn score(&self, parent: &DataView, parts: &[DataView]) -> f64 {
        partition_gain(Impurity::Entropy, parent, parts)
    }
}

/// C4.5: information gain normalised by split information.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GainRatio;

impl SplitCriterion for GainRatio {
    fn name(&self) -> &'static str {
        "gain ratio"
    }

    fn measure(&self) -> Impurity {
        Impurity::Entropy
    }

    fn categorical_split(&self) -> CategoricalSplit {
        CategoricalSplit::Multiway
    }

    fn score(&self, parent: &DataView, parts: &[DataView]) -> f64 {
        partition_gain_ratio(parent, parts)
    }
}

/// CART: weighted Gini impurity of the children, lower is better.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GiniImpurity;

impl SplitCriterion for GiniImpurity {
    fn name(&self) -> &'static str {
        "gini impurity"
    }

    fn measure(&self) -> Impurity {
        Impurity::Gini
    }

    fn categorical_split(&self) -> CategoricalSplit {
        CategoricalSplit::Binary
    }

    fn score(&self, parent: &DataView, parts: &[DataView]) -> f64 {
        weighted_impurity(Impurity::Gini, parts, parent.len())
    }

    fn prefers(&self, candidate: f64, incumbent: f64) -> bool {
        candidate < incumbent
    }
}

impl Display for InformationGain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Display for GainRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Display for GiniImpurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
