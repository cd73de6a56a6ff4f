use crate::error::{Result, TreeError};

/// What the builder does when asked to grow a node from an empty partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyPartition {
    /// Fail with `TreeError::EmptyDataset`.
    Fail,
    /// Emit a leaf predicting the parent's majority class.
    ParentMajority,
}

/// Hyperparameters and variant flags of the tree builder.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeParams {
    max_depth: Option<usize>,
    min_samples_split: usize,
    min_samples_leaf: usize,
    empty_partition: EmptyPartition,
    reuse_attributes: bool,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeParams {
    pub fn new() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            empty_partition: EmptyPartition::Fail,
            reuse_attributes: false,
        }
    }

    /// Unbounded depth, each attribute tested once per path, strict on empty partitions.
    pub fn id3() -> Self {
        Self::new()
    }

    /// Like ID3, but empty partitions degrade to the parent's majority class.
    pub fn c45() -> Self {
        Self {
            empty_partition: EmptyPartition::ParentMajority,
            ..Self::new()
        }
    }

    /// Depth-limited binary splits that may test an attribute again further down.
    pub fn cart(max_depth: Option<usize>, min_samples_leaf: usize) -> Result<Self> {
        let mut params = Self {
            reuse_attributes: true,
            ..Self::new()
        };
        params.set_max_depth(max_depth)?;
        params.set_min_samples_leaf(min_samples_leaf)?;
        Ok(params)
    }

    pub fn set_max_depth(&mut self, max_depth: Option<usize>) -> Result<()> {
        if let Some(depth) = max_depth.filter(|&depth| depth < 1) {
            return Err(TreeError::InvalidParameter(
                "max_depth".to_string(),
                "a value greater than 0".to_string(),
                depth.to_string(),
            ));
        }
        self.max_depth = max_depth;
        Ok(())
    }

    pub fn set_min_samples_split(&mut self, min_samples_split: usize) -> Result<()> {
        if min_samples_split < 2 {
            return Err(TreeError::InvalidParameter(
                "min_samples_split".to_string(),
                "a value greater than 1".to_string(),
                min_samples_split.to_string(),
            ));
        }
        self.min_samples_split = min_samples_split;
        Ok(())
    }

    pub fn set_min_samples_leaf(&mut self, min_samples_leaf: usize) -> Result<()> {
        if min_samples_leaf < 1 {
            return Err(TreeError::InvalidParameter(
                "min_samples_leaf".to_string(),
                "a value greater than 0".to_string(),
                min_samples_leaf.to_string(),
            ));
        }
        self.min_samples_leaf = min_samples_leaf;
        Ok(())
    }

    pub fn set_empty_partition(&mut self, empty_partition: EmptyPartition) {
        self.empty_partition = empty_partition;
    }

    pub fn set_reuse_attributes(&mut self, reuse_attributes: bool) {
        self.reuse_attributes = reuse_attributes;
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn min_samples_split(&self) -> usize {
        self.min_samples_split
    }

    pub fn min_samples_leaf(&self) -> usize {
        self.min_samples_leaf
    }

    pub fn empty_partition(&self) -> EmptyPartition {
        self.empty_partition
    }

    pub fn reuse_attributes(&self) -> bool {
        self.reuse_attributes
    }

    /// Smallest node that can still be split: two leaves must each get
    /// `min_samples_leaf` rows.
    pub(crate) fn min_split_size(&self) -> usize {
        self.min_samples_split.max(2 * self.min_samples_leaf)
    }
}
