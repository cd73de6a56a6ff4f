use super::node::TreeNode;
use super::prune::{prune_cost_complexity, prune_pessimistic};
use crate::data::{Dataset, Row, Value};
use crate::error::{Result, TreeError};
use log::{info, trace};
use std::fmt::{self, Display};

/// A trained tree together with the majority class of its training set.
///
/// The majority class is the fallback prediction whenever a row cannot be
/// routed: a missing attribute, an unseen category or a value of the wrong type.
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionTree {
    root: TreeNode,
    majority_class: Value,
}

impl DecisionTree {
    pub fn new(root: TreeNode, majority_class: Value) -> Self {
        Self {
            root,
            majority_class,
        }
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn majority_class(&self) -> &Value {
        &self.majority_class
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Predicts the class of a single row.
    pub fn predict(&self, row: &Row) -> Value {
        self.make_prediction(row, &self.root).clone()
    }

    /// Predicts the class of every row, in order.
    pub fn predict_batch(&self, rows: &[Row]) -> Vec<Value> {
        rows.iter().map(|row| self.predict(row)).collect()
    }

    fn make_prediction<'t>(&'t self, row: &Row, node: &'t TreeNode) -> &'t Value {
        match node {
            TreeNode::Leaf { class } => class,
            TreeNode::Decision(decision) => {
                match decision.route(row).and_then(|index| decision.child(index)) {
                    Some(child) => self.make_prediction(row, child),
                    None => {
                        trace!(
                            "cannot route {:?} at '{}', falling back to the majority class",
                            row.get(&decision.attribute),
                            decision.attribute
                        );
                        &self.majority_class
                    }
                }
            }
        }
    }

    /// Prunes the tree in place against `holdout`, which must not be the
    /// training data.
    ///
    /// `None` applies pessimistic (C4.5) pruning; `Some(alpha)` applies
    /// cost-complexity (CART) pruning with penalty `alpha` per leaf.
    /// Returns the number of subtrees collapsed into leaves.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `alpha` is negative or not finite.
    pub fn prune(&mut self, holdout: &Dataset, alpha: Option<f64>) -> Result<usize> {
        let view = holdout.view();
        let collapsed = match alpha {
            None => prune_pessimistic(&mut self.root, &view, &self.majority_class),
            Some(alpha) if alpha.is_finite() && alpha >= 0.0 => {
                prune_cost_complexity(&mut self.root, &view, alpha, &self.majority_class)
            }
            Some(alpha) => {
                return Err(TreeError::InvalidParameter(
                    "alpha".to_string(),
                    "a finite value of at least 0.0".to_string(),
                    alpha.to_string(),
                ))
            }
        };
        info!(
            "Pruning on {} rows collapsed {} subtrees, {} leaves remain.",
            holdout.len(),
            collapsed,
            self.leaf_count()
        );
        Ok(collapsed)
    }
}

impl Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.write(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trees::node::{Branches, DecisionNode};

    fn tree() -> DecisionTree {
        let root = TreeNode::Decision(DecisionNode::new(
            "outlook",
            Branches::Multiway(vec![
                (Value::from("sunny"), TreeNode::leaf("no")),
                (
                    Value::from("rainy"),
                    TreeNode::Decision(DecisionNode::new(
                        "temperature",
                        Branches::Threshold {
                            threshold: 20.5,
                            le: Box::new(TreeNode::leaf("no")),
                            gt: Box::new(TreeNode::leaf("yes")),
                        },
                    )),
                ),
            ]),
        ));
        DecisionTree::new(root, Value::from("maybe"))
    }

    #[test]
    fn test_predict() {
        let tree = tree();
        let sunny = Row::new().with("outlook", "sunny").with("temperature", 30);
        let warm = Row::new().with("outlook", "rainy").with("temperature", 25);
        let cold = Row::new().with("outlook", "rainy").with("temperature", 12.5);
        assert_eq!(tree.predict(&sunny), Value::from("no"));
        assert_eq!(tree.predict(&warm), Value::from("yes"));
        assert_eq!(tree.predict(&cold), Value::from("no"));
    }

    #[test]
    fn test_predict_fallbacks() {
        let tree = tree();
        let unseen = Row::new().with("outlook", "overcast");
        let missing_root = Row::new().with("temperature", 25);
        let missing_inner = Row::new().with("outlook", "rainy");
        let wrong_type = Row::new().with("outlook", "rainy").with("temperature", "hot");
        for row in [unseen, missing_root, missing_inner, wrong_type] {
            assert_eq!(tree.predict(&row), Value::from("maybe"));
        }
    }

    #[test]
    fn test_predict_batch() {
        let tree = tree();
        let rows = vec![
            Row::new().with("outlook", "sunny"),
            Row::new().with("outlook", "rainy").with("temperature", 21),
            Row::new(),
        ];
        assert_eq!(
            tree.predict_batch(&rows),
            vec![Value::from("no"), Value::from("yes"), Value::from("maybe")]
        );
    }

    #[test]
    fn test_display() {
        let expected = "\
outlook == sunny
    -> no
outlook == rainy
    temperature <= 20.500
        -> no
    temperature > 20.500
        -> yes
";
        assert_eq!(tree().to_string(), expected);
    }

    #[test]
    fn test_prune_rejects_negative_alpha() {
        let mut tree = tree();
        let holdout = Dataset::new(vec![Row::new().with("outlook", "sunny").with("play", "no")], "play").unwrap();
        assert!(matches!(
            tree.prune(&holdout, Some(-1.0)),
            Err(TreeError::InvalidParameter(..))
        ));
        assert!(tree.prune(&holdout, Some(f64::NAN)).is_err());
    }
}
