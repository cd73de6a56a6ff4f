//! Post-pruning against a held-out dataset.
//!
//! Both strategies walk the tree bottom-up, threading the holdout rows that
//! reach each node alongside it. A decision node is replaced by a leaf
//! predicting the majority class of its holdout rows when the leaf does no
//! worse than the subtree. Nodes no holdout row reaches are left alone.
use super::node::TreeNode;
use crate::data::{DataView, Value};
use log::debug;

/// Number of rows of `view` the subtree rooted at `node` misclassifies.
///
/// Rows that cannot be routed are charged against `fallback`, the class the
/// predictor would return for them.
pub fn subtree_errors(node: &TreeNode, view: &DataView, fallback: &Value) -> usize {
    match node {
        TreeNode::Leaf { class } => view.misclassified(class),
        TreeNode::Decision(decision) => {
            let (parts, unrouted) = decision.partition(view);
            decision
                .children()
                .into_iter()
                .zip(parts.iter())
                .map(|(child, part)| subtree_errors(child, part, fallback))
                .sum::<usize>()
                + unrouted.misclassified(fallback)
        }
    }
}

/// Pessimistic error pruning. A node collapses when
/// `(e_leaf + 0.5) / n <= e_subtree / n`.
///
/// Returns the number of collapsed nodes.
pub fn prune_pessimistic(node: &mut TreeNode, view: &DataView, fallback: &Value) -> usize {
    prune_with(node, view, fallback, &|leaf_errors, subtree_errors, _leaves, n| {
        let n = n as f64;
        (leaf_errors as f64 + 0.5) / n <= subtree_errors as f64 / n
    })
}

/// Cost-complexity pruning. A node collapses when it has more than one leaf
/// and `e_leaf + alpha <= e_subtree + alpha * leaves`, errors counted in rows.
///
/// Returns the number of collapsed nodes.
pub fn prune_cost_complexity(
    node: &mut TreeNode,
    view: &DataView,
    alpha: f64,
    fallback: &Value,
) -> usize {
    prune_with(node, view, fallback, &|leaf_errors, subtree_errors, leaves, _n| {
        leaves > 1 && leaf_errors as f64 + alpha <= subtree_errors as f64 + alpha * leaves as f64
    })
}

/// Post-order walk shared by both strategies. `collapse` receives the leaf
/// errors, the subtree errors, the subtree's leaf count and the row count.
fn prune_with<F>(node: &mut TreeNode, view: &DataView, fallback: &Value, collapse: &F) -> usize
where
    F: Fn(usize, usize, usize, usize) -> bool,
{
    if view.is_empty() {
        return 0;
    }
    let TreeNode::Decision(decision) = node else {
        return 0;
    };

    let (parts, _) = decision.partition(view);
    let mut collapsed = decision
        .children_mut()
        .into_iter()
        .zip(parts.iter())
        .map(|(child, part)| prune_with(child, part, fallback, collapse))
        .sum::<usize>();

    let Some(class) = view.majority_class() else {
        return collapsed;
    };
    let leaf_errors = view.misclassified(&class);
    let subtree = subtree_errors(node, view, fallback);
    let leaves = node.leaf_count();
    if collapse(leaf_errors, subtree, leaves, view.len()) {
        debug!(
            "collapsing a subtree of {} leaves ({} errors) into leaf '{}' ({} errors) over {} rows",
            leaves,
            subtree,
            class,
            leaf_errors,
            view.len()
        );
        *node = TreeNode::leaf(class);
        collapsed += 1;
    }
    collapsed
}
