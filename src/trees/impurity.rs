//! Impurity measures and the split scores derived from them.
//!
//! All functions follow the conventions `0 · log2(0) = 0` and return `0.0`
//! for empty inputs, so they never produce `NaN`.
use crate::data::DataView;

/// Class-disorder measure of a set of labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Impurity {
    /// `-Σ p·log2(p)`
    Entropy,
    /// `1 - Σ p²`
    Gini,
}

impl Impurity {
    pub fn of_counts(&self, counts: &[usize]) -> f64 {
        match self {
            Impurity::Entropy => entropy(counts),
            Impurity::Gini => gini(counts),
        }
    }

    /// Impurity of the target column of `view`.
    pub fn of(&self, view: &DataView) -> f64 {
        let counts = view
            .class_counts()
            .into_iter()
            .map(|(_, count)| count)
            .collect::<Vec<_>>();
        self.of_counts(&counts)
    }
}

pub fn entropy(counts: &[usize]) -> f64 {
    let total = counts.iter().sum::<usize>();
    if total == 0 {
        return 0.0;
    }
    counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total as f64;
            -p * p.log2()
        })
        .sum()
}

pub fn gini(counts: &[usize]) -> f64 {
    let total = counts.iter().sum::<usize>();
    if total == 0 {
        return 0.0;
    }
    let sum_sq = counts
        .iter()
        .map(|&count| {
            let p = count as f64 / total as f64;
            p * p
        })
        .sum::<f64>();
    1.0 - sum_sq
}

/// Impurity of each part weighted by its share of `total` rows.
pub fn weighted_impurity(measure: Impurity, parts: &[DataView], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .map(|part| part.len() as f64 / total as f64 * measure.of(part))
        .sum()
}

/// Impurity left after partitioning `view` by the values of `attribute`.
pub fn conditional_impurity(view: &DataView, attribute: &str, measure: Impurity) -> f64 {
    let parts = view
        .partition(attribute)
        .into_iter()
        .map(|(_, part)| part)
        .collect::<Vec<_>>();
    weighted_impurity(measure, &parts, view.len())
}

pub fn gain(view: &DataView, attribute: &str, measure: Impurity) -> f64 {
    measure.of(view) - conditional_impurity(view, attribute, measure)
}

/// Impurity reduction achieved by splitting `parent` into `parts`.
pub fn partition_gain(measure: Impurity, parent: &DataView, parts: &[DataView]) -> f64 {
    measure.of(parent) - weighted_impurity(measure, parts, parent.len())
}

/// Split information: the entropy of the partition sizes themselves.
pub fn intrinsic_info(sizes: &[usize]) -> f64 {
    entropy(sizes)
}

/// Information gain normalised by the split information. Zero split
/// information yields `0.0`.
pub fn gain_ratio(view: &DataView, attribute: &str) -> f64 {
    let parts = view
        .partition(attribute)
        .into_iter()
        .map(|(_, part)| part)
        .collect::<Vec<_>>();
    partition_gain_ratio(view, &parts)
}

pub fn partition_gain_ratio(parent: &DataView, parts: &[DataView]) -> f64 {
    let sizes = parts.iter().map(DataView::len).collect::<Vec<_>>();
    let split_info = intrinsic_info(&sizes);
    if split_info == 0.0 {
        return 0.0;
    }
    partition_gain(Impurity::Entropy, parent, parts) / split_info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Dataset, Row};
    use approx::assert_relative_eq;

    fn weather() -> Dataset {
        let rows = vec![
            Row::new().with("outlook", "sunny").with("windy", false).with("play", "no"),
            Row::new().with("outlook", "rainy").with("windy", false).with("play", "yes"),
            Row::new().with("outlook", "rainy").with("windy", true).with("play", "no"),
            Row::new().with("outlook", "overcast").with("windy", true).with("play", "yes"),
        ];
        Dataset::new(rows, "play").unwrap()
    }

    #[test]
    fn test_impurity_empty_and_pure() {
        assert_eq!(entropy(&[]), 0.0);
        assert_eq!(gini(&[]), 0.0);
        assert_eq!(entropy(&[7]), 0.0);
        assert_eq!(gini(&[7]), 0.0);
        assert_eq!(entropy(&[0, 5]), 0.0);
    }

    #[test]
    fn test_impurity_uniform_is_maximal() {
        for k in 2..6 {
            let counts = vec![3; k];
            assert_relative_eq!(entropy(&counts), (k as f64).log2(), epsilon = 1e-12);
            assert_relative_eq!(gini(&counts), 1.0 - 1.0 / k as f64, epsilon = 1e-12);

            let mut skewed = counts.clone();
            skewed[0] += 2;
            assert!(entropy(&skewed) < entropy(&counts));
            assert!(gini(&skewed) < gini(&counts));
        }
    }

    #[test]
    fn test_gini_from_counts() {
        assert_relative_eq!(gini(&[3, 1]), 0.375, epsilon = 1e-12);
    }

    #[test]
    fn test_conditional_impurity_and_gain() {
        let dataset = weather();
        let view = dataset.view();

        assert_relative_eq!(Impurity::Entropy.of(&view), 1.0);
        // sunny {no}, rainy {yes, no}, overcast {yes}
        assert_relative_eq!(conditional_impurity(&view, "outlook", Impurity::Entropy), 0.5);
        assert_relative_eq!(gain(&view, "outlook", Impurity::Entropy), 0.5);
        // false {no, yes}, true {no, yes}
        assert_relative_eq!(gain(&view, "windy", Impurity::Entropy), 0.0);
        assert_relative_eq!(gain(&view, "outlook", Impurity::Gini), 0.25);
    }

    #[test]
    fn test_gain_is_never_negative() {
        let rows = vec![
            Row::new().with("a", "x").with("b", 1).with("y", "p"),
            Row::new().with("a", "y").with("b", 2).with("y", "q"),
            Row::new().with("a", "x").with("b", 1).with("y", "q"),
            Row::new().with("a", "z").with("b", 2).with("y", "p"),
            Row::new().with("a", "y").with("b", 3).with("y", "r"),
        ];
        let dataset = Dataset::new(rows, "y").unwrap();
        let view = dataset.view();
        for attribute in ["a", "b"] {
            for measure in [Impurity::Entropy, Impurity::Gini] {
                assert!(gain(&view, attribute, measure) >= -1e-12);
            }
        }
    }

    #[test]
    fn test_gain_ratio() {
        let dataset = weather();
        let view = dataset.view();
        let split_info = intrinsic_info(&[1, 2, 1]);
        assert_relative_eq!(split_info, 1.5);
        assert_relative_eq!(gain_ratio(&view, "outlook"), 0.5 / 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_gain_ratio_zero_split_info() {
        let rows = vec![
            Row::new().with("a", "same").with("y", "p"),
            Row::new().with("a", "same").with("y", "q"),
        ];
        let dataset = Dataset::new(rows, "y").unwrap();
        assert_eq!(gain_ratio(&dataset.view(), "a"), 0.0);
    }
}
