//! Split selection for a single attribute.
use super::criterion::{CategoricalSplit, SplitCriterion};
use crate::data::{DataView, Domain, Row, Value};
use log::trace;

/// The test applied at a decision node, without its children.
#[derive(Clone, Debug, PartialEq)]
pub enum Split {
    /// `<= threshold` (branch 0) against `> threshold` (branch 1).
    Threshold(f64),
    /// One branch per value.
    Multiway(Vec<Value>),
    /// `== value` (branch 0) against `!= value` (branch 1).
    Binary(Value),
}

impl Split {
    /// Index of the branch `value` is routed to, if any.
    pub fn branch_of(&self, value: &Value) -> Option<usize> {
        match self {
            Split::Threshold(threshold) => value
                .as_number()
                .map(|number| if number <= *threshold { 0 } else { 1 }),
            Split::Multiway(values) => values.iter().position(|candidate| candidate == value),
            Split::Binary(target) => Some(if value == target { 0 } else { 1 }),
        }
    }

    pub fn branch_count(&self) -> usize {
        match self {
            Split::Threshold(_) | Split::Binary(_) => 2,
            Split::Multiway(values) => values.len(),
        }
    }

    /// Partitions `view` into one view per branch, in branch order. Rows that
    /// cannot be routed are left out.
    pub fn partition<'a>(&self, view: &DataView<'a>, attribute: &str) -> Vec<DataView<'a>> {
        let route = |row: &Row| row.get(attribute).and_then(|value| self.branch_of(value));
        (0..self.branch_count())
            .map(|branch| view.filter(|row| route(row) == Some(branch)))
            .collect()
    }
}

/// Best split found for one attribute.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub attribute: String,
    pub split: Split,
    pub score: f64,
}

/// Candidate thresholds of a numeric attribute: midpoints between consecutive
/// distinct values, kept only where the class content changes. Values are
/// grouped first, so a boundary exists unless both neighbouring groups are
/// pure in the same class.
pub fn numeric_thresholds(view: &DataView, attribute: &str) -> Vec<f64> {
    let target = view.target();
    let mut points = view
        .rows()
        .iter()
        .filter_map(|row| Some((row.get(attribute)?.as_number()?, row.get(target)?)))
        .collect::<Vec<_>>();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    // Grouped by value rather than scanned row by row, so a value shared by
    // two classes yields boundaries on both sides instead of a midpoint at itself.
    // (value, class when every row with that value shares it)
    let mut groups: Vec<(f64, Option<&Value>)> = Vec::new();
    for (value, class) in points {
        if let Some((last, pure)) = groups.last_mut() {
            if *last == value {
                if *pure != Some(class) {
                    *pure = None;
                }
                continue;
            }
        }
        groups.push((value, Some(class)));
    }

    groups
        .windows(2)
        .filter(|pair| match (pair[0].1, pair[1].1) {
            (Some(a), Some(b)) => a != b,
            _ => true,
        })
        .map(|pair| (pair[0].0 + pair[1].0) / 2.0)
        .collect()
}

/// Best admissible split of `attribute` under `criterion`.
///
/// Candidates producing a branch with fewer than `min_samples_leaf` rows are
/// skipped; ties keep the earliest candidate (ascending thresholds, or
/// first-seen categorical values).
pub fn best_split<C: SplitCriterion + ?Sized>(
    criterion: &C,
    view: &DataView,
    attribute: &str,
    domain: Domain,
    min_samples_leaf: usize,
) -> Option<Candidate> {
    let min_samples_leaf = min_samples_leaf.max(1);

    let splits = match (domain, criterion.categorical_split()) {
        (Domain::Numeric, _) => numeric_thresholds(view, attribute)
            .into_iter()
            .map(Split::Threshold)
            .collect::<Vec<_>>(),
        (Domain::Categorical, CategoricalSplit::Multiway) => {
            let values = view
                .distinct_values(attribute)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>();
            if values.len() < 2 {
                Vec::new()
            } else {
                vec![Split::Multiway(values)]
            }
        }
        (Domain::Categorical, CategoricalSplit::Binary) => view
            .distinct_values(attribute)
            .into_iter()
            .cloned()
            .map(Split::Binary)
            .collect(),
    };

    let mut best: Option<Candidate> = None;
    for split in splits {
        let parts = split.partition(view, attribute);
        if parts.iter().any(|part| part.len() < min_samples_leaf) {
            continue;
        }
        let score = criterion.score(view, &parts);
        let improves = match &best {
            Some(incumbent) => criterion.prefers(score, incumbent.score),
            None => true,
        };
        if improves {
            best = Some(Candidate {
                attribute: attribute.to_string(),
                split,
                score,
            });
        }
    }

    if best.is_none() {
        trace!(
            "attribute '{}' has no admissible split over {} rows",
            attribute,
            view.len()
        );
    }
    best
}
