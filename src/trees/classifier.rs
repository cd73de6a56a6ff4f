//! Decision Tree Classifier
use super::builder::TreeBuilder;
use super::criterion::{GainRatio, GiniImpurity, InformationGain, SplitCriterion};
use super::params::TreeParams;
use super::tree::DecisionTree;
use crate::data::{Dataset, Row, Value};
use crate::error::{Result, TreeError};
use crate::metrics::ClassificationMetrics;

/// Decision tree classifier over labeled rows, generic over its split criterion.
#[derive(Clone, Debug)]
pub struct DecisionTreeClassifier<C: SplitCriterion> {
    criterion: C,
    params: TreeParams,
    tree: Option<DecisionTree>,
}

/// ID3: information gain with multiway categorical splits.
pub type Id3 = DecisionTreeClassifier<InformationGain>;
/// C4.5: gain ratio, degrading to the parent's majority on empty partitions.
pub type C45 = DecisionTreeClassifier<GainRatio>;
/// CART: Gini impurity with binary splits and attribute reuse.
pub type Cart = DecisionTreeClassifier<GiniImpurity>;

impl<C: SplitCriterion> ClassificationMetrics for DecisionTreeClassifier<C> {}

impl Id3 {
    /// Creates an unbounded ID3 classifier.
    pub fn new() -> Self {
        Self::with_params(InformationGain, TreeParams::id3())
    }
}

impl Default for Id3 {
    fn default() -> Self {
        Self::new()
    }
}

impl C45 {
    /// Creates an unbounded C4.5 classifier.
    pub fn new() -> Self {
        Self::with_params(GainRatio, TreeParams::c45())
    }
}

impl Default for C45 {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Creates a CART classifier.
    ///
    /// # Arguments
    ///
    /// * `max_depth` - The maximum depth of the tree, unbounded when `None`.
    /// * `min_samples_leaf` - The minimum number of rows in each leaf.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `max_depth` is 0 or `min_samples_leaf` is 0.
    pub fn new(max_depth: Option<usize>, min_samples_leaf: usize) -> Result<Self> {
        Ok(Self::with_params(
            GiniImpurity,
            TreeParams::cart(max_depth, min_samples_leaf)?,
        ))
    }
}

impl Default for Cart {
    /// Unbounded depth with single-row leaves.
    fn default() -> Self {
        let mut params = TreeParams::new();
        params.set_reuse_attributes(true);
        Self::with_params(GiniImpurity, params)
    }
}

impl<C: SplitCriterion> DecisionTreeClassifier<C> {
    /// Creates a classifier from any criterion and parameter combination.
    pub fn with_params(criterion: C, params: TreeParams) -> Self {
        Self {
            criterion,
            params,
            tree: None,
        }
    }

    pub fn params(&self) -> &TreeParams {
        &self.params
    }

    /// The trained tree, if `fit` has succeeded.
    pub fn tree(&self) -> Option<&DecisionTree> {
        self.tree.as_ref()
    }

    /// Builds the decision tree from a dataset.
    ///
    /// # Arguments
    ///
    /// * `dataset` - The labeled training rows.
    /// * `attributes` - The attributes the tree may test.
    ///
    /// # Errors
    ///
    /// This method will return an error if the dataset is empty or a candidate
    /// attribute is absent from some row. A failed fit keeps the previous tree.
    pub fn fit(&mut self, dataset: &Dataset, attributes: &[&str]) -> Result<String> {
        let tree = TreeBuilder::new(&self.criterion, &self.params).build_tree(dataset, attributes)?;
        self.tree = Some(tree);
        Ok("Finished building the tree.".into())
    }

    /// Predicts the class of a single row.
    ///
    /// # Errors
    ///
    /// `UntrainedModel` if the tree wasn't built yet.
    pub fn predict(&self, row: &Row) -> Result<Value> {
        Ok(self.trained()?.predict(row))
    }

    /// Predicts the class of every row, in order.
    ///
    /// # Errors
    ///
    /// `UntrainedModel` if the tree wasn't built yet.
    pub fn predict_batch(&self, rows: &[Row]) -> Result<Vec<Value>> {
        Ok(self.trained()?.predict_batch(rows))
    }

    /// Prunes the trained tree against `holdout`. See [`DecisionTree::prune`].
    ///
    /// # Errors
    ///
    /// `UntrainedModel` if the tree wasn't built yet, `InvalidParameter` for a
    /// negative or non-finite `alpha`.
    pub fn prune(&mut self, holdout: &Dataset, alpha: Option<f64>) -> Result<usize> {
        self.tree
            .as_mut()
            .ok_or(TreeError::UntrainedModel)?
            .prune(holdout, alpha)
    }

    fn trained(&self) -> Result<&DecisionTree> {
        self.tree.as_ref().ok_or(TreeError::UntrainedModel)
    }
}
