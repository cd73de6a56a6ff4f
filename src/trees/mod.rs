/// Recursive tree induction
pub mod builder;
/// ID3, C4.5 and CART classifiers
pub mod classifier;
/// Split criteria of the three variants
pub mod criterion;
/// Entropy, Gini impurity, gain and gain ratio
pub mod impurity;
/// Tree nodes and the tree dump
pub mod node;
/// Builder hyperparameters
pub mod params;
/// Pessimistic and cost-complexity pruning
pub mod prune;
/// Candidate splits of a single attribute
pub mod split;
/// Trained trees and prediction
pub mod tree;

pub use classifier::{Cart, DecisionTreeClassifier, Id3, C45};
pub use criterion::{GainRatio, GiniImpurity, InformationGain, SplitCriterion};
pub use params::{EmptyPartition, TreeParams};
pub use tree::DecisionTree;
