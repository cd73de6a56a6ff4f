use crate::data::{DataView, Row, Value};
use std::fmt;

/// Decision tree node
#[derive(Clone, Debug, PartialEq)]
pub enum TreeNode {
    Leaf { class: Value },
    Decision(DecisionNode),
}

/// An internal node: the tested attribute and the children of each outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionNode {
    pub attribute: String,
    pub branches: Branches,
}

/// Children of a decision node, keyed by the outcome of its test.
#[derive(Clone, Debug, PartialEq)]
pub enum Branches {
    /// Numeric test `value <= threshold`.
    Threshold {
        threshold: f64,
        le: Box<TreeNode>,
        gt: Box<TreeNode>,
    },
    /// One child per category observed in training, in first-seen order.
    Multiway(Vec<(Value, TreeNode)>),
    /// Categorical test `value == value`.
    Binary {
        value: Value,
        eq: Box<TreeNode>,
        ne: Box<TreeNode>,
    },
}

impl TreeNode {
    pub fn leaf(class: impl Into<Value>) -> Self {
        TreeNode::Leaf {
            class: class.into(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// The predicted class of a leaf.
    pub fn class(&self) -> Option<&Value> {
        match self {
            TreeNode::Leaf { class } => Some(class),
            TreeNode::Decision(_) => None,
        }
    }

    /// Number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 0,
            TreeNode::Decision(node) => {
                1 + node.children().iter().map(|child| child.depth()).max().unwrap_or(0)
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Decision(node) => node.children().iter().map(|child| child.leaf_count()).sum(),
        }
    }

    pub fn node_count(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Decision(node) => {
                1 + node.children().iter().map(|child| child.node_count()).sum::<usize>()
            }
        }
    }

    pub(crate) fn write(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "    ".repeat(indent);
        match self {
            TreeNode::Leaf { class } => writeln!(f, "{}-> {}", pad, class),
            TreeNode::Decision(node) => {
                let attribute = &node.attribute;
                match &node.branches {
                    Branches::Threshold { threshold, le, gt } => {
                        writeln!(f, "{}{} <= {:.3}", pad, attribute, threshold)?;
                        le.write(f, indent + 1)?;
                        writeln!(f, "{}{} > {:.3}", pad, attribute, threshold)?;
                        gt.write(f, indent + 1)
                    }
                    Branches::Multiway(branches) => {
                        for (value, child) in branches {
                            writeln!(f, "{}{} == {}", pad, attribute, value)?;
                            child.write(f, indent + 1)?;
                        }
                        Ok(())
                    }
                    Branches::Binary { value, eq, ne } => {
                        writeln!(f, "{}{} == {}", pad, attribute, value)?;
                        eq.write(f, indent + 1)?;
                        writeln!(f, "{}{} != {}", pad, attribute, value)?;
                        ne.write(f, indent + 1)
                    }
                }
            }
        }
    }
}

impl DecisionNode {
    pub fn new(attribute: &str, branches: Branches) -> Self {
        Self {
            attribute: attribute.to_string(),
            branches,
        }
    }

    /// Index of the child `value` leads to. `None` for unseen categories and
    /// values of the wrong type.
    pub fn branch_of(&self, value: &Value) -> Option<usize> {
        match &self.branches {
            Branches::Threshold { threshold, .. } => value
                .as_number()
                .map(|number| if number <= *threshold { 0 } else { 1 }),
            Branches::Multiway(branches) => branches.iter().position(|(key, _)| key == value),
            Branches::Binary { value: key, .. } => Some(if value == key { 0 } else { 1 }),
        }
    }

    /// Index of the child `row` is routed to; `None` when the attribute is missing.
    pub fn route(&self, row: &Row) -> Option<usize> {
        row.get(&self.attribute).and_then(|value| self.branch_of(value))
    }

    pub fn child(&self, index: usize) -> Option<&TreeNode> {
        match &self.branches {
            Branches::Threshold { le: first, gt: second, .. }
            | Branches::Binary { eq: first, ne: second, .. } => match index {
                0 => Some(first.as_ref()),
                1 => Some(second.as_ref()),
                _ => None,
            },
            Branches::Multiway(branches) => branches.get(index).map(|(_, child)| child),
        }
    }

    /// Children in branch order.
    pub fn children(&self) -> Vec<&TreeNode> {
        match &self.branches {
            Branches::Threshold { le, gt, .. } => vec![le.as_ref(), gt.as_ref()],
            Branches::Multiway(branches) => branches.iter().map(|(_, child)| child).collect(),
            Branches::Binary { eq, ne, .. } => vec![eq.as_ref(), ne.as_ref()],
        }
    }

    pub fn children_mut(&mut self) -> Vec<&mut TreeNode> {
        match &mut self.branches {
            Branches::Threshold { le, gt, .. } => vec![le.as_mut(), gt.as_mut()],
            Branches::Multiway(branches) => branches.iter_mut().map(|(_, child)| child).collect(),
            Branches::Binary { eq, ne, .. } => vec![eq.as_mut(), ne.as_mut()],
        }
    }

    /// Splits `view` along this node's test: one view per child, plus the rows
    /// that cannot be routed.
    pub fn partition<'a>(&self, view: &DataView<'a>) -> (Vec<DataView<'a>>, DataView<'a>) {
        let parts = (0..self.children().len())
            .map(|index| view.filter(|row| self.route(row) == Some(index)))
            .collect();
        let unrouted = view.filter(|row| self.route(row).is_none());
        (parts, unrouted)
    }
}
