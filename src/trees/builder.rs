//! Recursive tree induction shared by every variant.
//!
//! Empty partitions: `build` never recurses into an empty child, it emits a
//! leaf with the parent's majority class instead. When `build` itself is
//! handed an empty view, the variant's `EmptyPartition` policy decides: C4.5
//! degrades to a leaf predicting the parent's majority class, ID3 and CART fail
//! with `TreeError::EmptyDataset`. The root has no parent, so training on an
//! empty dataset fails for every variant.
use super::criterion::SplitCriterion;
use super::node::{Branches, DecisionNode, TreeNode};
use super::params::{EmptyPartition, TreeParams};
use super::split::{Candidate, Split};
use super::tree::DecisionTree;
use crate::data::{DataView, Dataset, Domain, Value};
use crate::error::{Result, TreeError};
use log::{debug, info, log_enabled, warn, Level};
use rayon::prelude::*;
use std::collections::HashMap;

/// Grows a tree with an injected split criterion and builder parameters.
pub struct TreeBuilder<'p, C: SplitCriterion> {
    criterion: &'p C,
    params: &'p TreeParams,
    domains: HashMap<String, Domain>,
}

impl<'p, C: SplitCriterion> TreeBuilder<'p, C> {
    pub fn new(criterion: &'p C, params: &'p TreeParams) -> Self {
        Self {
            criterion,
            params,
            domains: HashMap::new(),
        }
    }

    /// Trains a tree on `dataset` using `attributes` as the candidate splits.
    ///
    /// # Errors
    ///
    /// * `EmptyDataset` if `dataset` has no rows.
    /// * `UnknownAttribute` if no row carries one of the attributes.
    /// * `MissingAttributeValue` if a row lacks one of the attributes.
    pub fn build_tree(&mut self, dataset: &Dataset, attributes: &[&str]) -> Result<DecisionTree> {
        let view = dataset.view();
        let majority_class = view.majority_class().ok_or(TreeError::EmptyDataset)?;
        let candidates = self.prepare_candidates(&view, attributes)?;

        let root = self.build(&view, &candidates, 0, None)?;
        let tree = DecisionTree::new(root, majority_class);
        info!(
            "Built a tree with {} on {} rows: {} nodes, {} leaves, depth {}.",
            self.criterion.name(),
            dataset.len(),
            tree.node_count(),
            tree.leaf_count(),
            tree.depth()
        );
        Ok(tree)
    }

    /// Deduplicates the candidates, drops the target, validates presence and
    /// records each attribute's domain for the whole run.
    fn prepare_candidates(&mut self, view: &DataView, attributes: &[&str]) -> Result<Vec<String>> {
        self.domains.clear();
        let mut candidates: Vec<String> = Vec::with_capacity(attributes.len());
        for &attribute in attributes {
            if attribute == view.target() {
                warn!("Ignoring the target '{}' listed as a candidate attribute.", attribute);
                continue;
            }
            if candidates.iter().any(|candidate| candidate == attribute) {
                continue;
            }
            let domain = view
                .domain(attribute)
                .ok_or_else(|| TreeError::UnknownAttribute(attribute.to_string()))?;
            if let Some(index) = view.rows().iter().position(|row| !row.contains(attribute)) {
                return Err(TreeError::MissingAttributeValue(index, attribute.to_string()));
            }
            self.domains.insert(attribute.to_string(), domain);
            candidates.push(attribute.to_string());
        }
        Ok(candidates)
    }

    /// Builds the subtree for `view`.
    ///
    /// `parent_majority` is the class used when `view` is empty and the
    /// variant degrades instead of failing.
    pub fn build(
        &self,
        view: &DataView,
        candidates: &[String],
        depth: usize,
        parent_majority: Option<&Value>,
    ) -> Result<TreeNode> {
        let majority = match view.majority_class() {
            Some(class) => class,
            None => {
                return match (self.params.empty_partition(), parent_majority) {
                    (EmptyPartition::ParentMajority, Some(class)) => Ok(TreeNode::leaf(class.clone())),
                    _ => Err(TreeError::EmptyDataset),
                }
            }
        };

        if let Some(class) = view.pure_class() {
            return Ok(TreeNode::leaf(class.clone()));
        }

        let depth_reached = self.params.max_depth().is_some_and(|max| depth >= max);
        if candidates.is_empty() || depth_reached || view.len() < self.params.min_split_size() {
            return Ok(TreeNode::leaf(majority));
        }

        let Some(best) = self.select(view, candidates) else {
            return Ok(TreeNode::leaf(majority));
        };

        if log_enabled!(Level::Debug) {
            debug!(
                "depth {}: splitting {} rows (impurity {:.4}) on '{}' with {} {:.4}",
                depth,
                view.len(),
                self.criterion.measure().of(view),
                best.attribute,
                self.criterion.name(),
                best.score
            );
        }

        let remaining = if self.params.reuse_attributes() {
            candidates.to_vec()
        } else {
            candidates
                .iter()
                .filter(|candidate| **candidate != best.attribute)
                .cloned()
                .collect::<Vec<_>>()
        };

        let mut parts = best.split.partition(view, &best.attribute).into_iter();
        let mut grow = || -> Result<TreeNode> {
            match parts.next() {
                Some(part) if !part.is_empty() => {
                    self.build(&part, &remaining, depth + 1, Some(&majority))
                }
                _ => Ok(TreeNode::leaf(majority.clone())),
            }
        };

        let branches = match best.split {
            Split::Threshold(threshold) => Branches::Threshold {
                threshold,
                le: Box::new(grow()?),
                gt: Box::new(grow()?),
            },
            Split::Multiway(values) => Branches::Multiway(
                values
                    .into_iter()
                    .map(|value| -> Result<(Value, TreeNode)> { Ok((value, grow()?)) })
                    .collect::<Result<Vec<_>>>()?,
            ),
            Split::Binary(value) => Branches::Binary {
                value,
                eq: Box::new(grow()?),
                ne: Box::new(grow()?),
            },
        };

        Ok(TreeNode::Decision(DecisionNode::new(&best.attribute, branches)))
    }

    /// Best split over all candidates. Attributes are scored in parallel and
    /// compared in candidate order, so the first attribute wins a tie.
    fn select(&self, view: &DataView, candidates: &[String]) -> Option<Candidate> {
        let min_samples_leaf = self.params.min_samples_leaf();
        let evaluated = candidates
            .par_iter()
            .map(|attribute| {
                let domain = self
                    .domains
                    .get(attribute)
                    .copied()
                    .unwrap_or(Domain::Categorical);
                self.criterion
                    .evaluate(view, attribute, domain, min_samples_leaf)
            })
            .collect::<Vec<_>>();

        evaluated
            .into_iter()
            .flatten()
            .fold(None, |best: Option<Candidate>, candidate| match best {
                Some(incumbent) if !self.criterion.prefers(candidate.score, incumbent.score) => {
                    Some(incumbent)
                }
                _ => Some(candidate),
            })
    }
}
