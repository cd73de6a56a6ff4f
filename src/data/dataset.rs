use super::value::{Row, Value};
use crate::error::{Result, TreeError};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use std::collections::{BTreeSet, HashMap};
use std::fmt::{self, Debug, Formatter};
use std::io;
use std::path::Path;

/// Whether an attribute is split on thresholds or on category labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Domain {
    Numeric,
    Categorical,
}

/// Rows plus the name of the target attribute.
///
/// Every row is guaranteed to carry a target value.
#[derive(Clone, PartialEq)]
pub struct Dataset {
    rows: Vec<Row>,
    target: String,
}

impl Debug for Dataset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset {{\n    target: {},\n    rows: [", self.target)?;
        for row in &self.rows {
            writeln!(f, "        {:?},", row)?;
        }
        write!(f, "    ]\n}}")
    }
}

impl Dataset {
    /// Creates a dataset, failing with `MissingTargetValue` on the first row
    /// without a target value.
    pub fn new(rows: Vec<Row>, target: &str) -> Result<Self> {
        if let Some(index) = rows.iter().position(|row| !row.contains(target)) {
            return Err(TreeError::MissingTargetValue(index, target.to_string()));
        }
        Ok(Self {
            rows,
            target: target.to_string(),
        })
    }

    /// Loads a dataset from a CSV file with a header row.
    pub fn from_csv<P: AsRef<Path>>(path: P, target: &str) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)?;
        Self::from_csv_reader(reader, target)
    }

    /// Loads a dataset from any CSV source with a header row.
    pub fn from_reader<R: io::Read>(source: R, target: &str) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(source);
        Self::from_csv_reader(reader, target)
    }

    fn from_csv_reader<R: io::Read>(mut reader: csv::Reader<R>, target: &str) -> Result<Self> {
        let headers = reader.headers()?.clone();
        let mut rows = Vec::new();

        for record in reader.records() {
            let record = record?;
            let row = headers
                .iter()
                .zip(record.iter())
                .filter_map(|(name, field)| Value::parse(field).map(|value| (name, value)))
                .collect::<Row>();
            rows.push(row);
        }

        Self::new(rows, target)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every non-target attribute carried by some row, sorted by name.
    pub fn attributes(&self) -> Vec<&str> {
        let names = self
            .rows
            .iter()
            .flat_map(Row::attributes)
            .filter(|&name| name != self.target)
            .collect::<BTreeSet<_>>();
        names.into_iter().collect()
    }

    /// The target values, in row order.
    pub fn labels(&self) -> Vec<Value> {
        self.view().labels().cloned().collect()
    }

    /// Borrowed view over all rows.
    pub fn view(&self) -> DataView<'_> {
        DataView {
            rows: self.rows.iter().collect(),
            target: &self.target,
        }
    }

    /// Shuffles the rows and splits them into a training and a test dataset.
    pub fn train_test_split(&self, train_size: f64, seed: Option<u64>) -> Result<(Self, Self)> {
        if !(0.0..=1.0).contains(&train_size) {
            return Err(TreeError::InvalidParameter(
                "train_size".to_string(),
                "a value between 0.0 and 1.0".to_string(),
                train_size.to_string(),
            ));
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut indices = (0..self.rows.len()).collect::<Vec<_>>();
        indices.shuffle(&mut rng);
        let train_size = (self.rows.len() as f64 * train_size).floor() as usize;

        let select = |indices: &[usize]| Self {
            rows: indices.iter().map(|&index| self.rows[index].clone()).collect(),
            target: self.target.clone(),
        };

        Ok((select(&indices[..train_size]), select(&indices[train_size..])))
    }
}

/// A borrowed subset of a dataset's rows.
///
/// Filtering creates a new view and never touches the underlying rows.
#[derive(Clone, Debug)]
pub struct DataView<'a> {
    rows: Vec<&'a Row>,
    target: &'a str,
}

impl<'a> DataView<'a> {
    pub fn rows(&self) -> &[&'a Row] {
        &self.rows
    }

    pub fn target(&self) -> &'a str {
        self.target
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &'a Value> + '_ {
        let target = self.target;
        self.rows.iter().filter_map(move |row| row.get(target))
    }

    /// Rows for which `predicate` holds, as a new view.
    pub fn filter<F>(&self, mut predicate: F) -> DataView<'a>
    where
        F: FnMut(&Row) -> bool,
    {
        DataView {
            rows: self.rows.iter().copied().filter(|row| predicate(row)).collect(),
            target: self.target,
        }
    }

    /// Occurrences of each class, ordered by class value.
    pub fn class_counts(&self) -> Vec<(&'a Value, usize)> {
        let mut counts = HashMap::new();
        for label in self.labels() {
            *counts.entry(label).or_insert(0) += 1;
        }
        let mut counts = counts.into_iter().collect::<Vec<_>>();
        counts.sort_by(|a, b| a.0.cmp(b.0));
        counts
    }

    /// Most frequent class; ties go to the smallest class value.
    pub fn majority_class(&self) -> Option<Value> {
        self.class_counts()
            .into_iter()
            .fold(None, |best: Option<(&Value, usize)>, (class, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((class, count)),
            })
            .map(|(class, _)| class.clone())
    }

    /// The single class shared by every row, if there is one.
    pub fn pure_class(&self) -> Option<&'a Value> {
        let mut labels = self.labels();
        let first = labels.next()?;
        labels.all(|label| label == first).then_some(first)
    }

    /// Number of rows whose class differs from `class`.
    pub fn misclassified(&self, class: &Value) -> usize {
        self.labels().filter(|label| *label != class).count()
    }

    /// Distinct values of `attribute` in first-seen order. Missing values are skipped.
    pub fn distinct_values(&self, attribute: &str) -> Vec<&'a Value> {
        let mut values: Vec<&'a Value> = Vec::new();
        for value in self.rows.iter().filter_map(|row| row.get(attribute)) {
            if !values.contains(&value) {
                values.push(value);
            }
        }
        values
    }

    /// One view per distinct value of `attribute`, in first-seen order.
    /// Rows missing the attribute belong to no part.
    pub fn partition(&self, attribute: &str) -> Vec<(&'a Value, DataView<'a>)> {
        self.distinct_values(attribute)
            .into_iter()
            .map(|value| (value, self.filter(|row| row.get(attribute) == Some(value))))
            .collect()
    }

    /// `Numeric` when every present value of `attribute` is a number,
    /// `None` when no row carries the attribute.
    pub fn domain(&self, attribute: &str) -> Option<Domain> {
        let mut values = self.rows.iter().filter_map(|row| row.get(attribute)).peekable();
        values.peek()?;
        if values.all(Value::is_number) {
            Some(Domain::Numeric)
        } else {
            Some(Domain::Categorical)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather() -> Dataset {
        let rows = vec![
            Row::new().with("outlook", "sunny").with("windy", false).with("play", "no"),
            Row::new().with("outlook", "rainy").with("windy", false).with("play", "yes"),
            Row::new().with("outlook", "rainy").with("windy", true).with("play", "no"),
        ];
        Dataset::new(rows, "play").unwrap()
    }

    #[test]
    fn test_dataset_new_missing_target() {
        let rows = vec![
            Row::new().with("a", 1).with("y", "x"),
            Row::new().with("a", 2),
        ];
        let result = Dataset::new(rows, "y");
        assert!(matches!(result, Err(TreeError::MissingTargetValue(1, _))));
    }

    #[test]
    fn test_dataset_from_reader() {
        let source = "age,city,label\n20,paris,A\n,rome,B\n31.5,NA,A\n";
        let dataset = Dataset::from_reader(source.as_bytes(), "label").unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.rows()[0].get("age"), Some(&Value::Number(20.0)));
        assert!(!dataset.rows()[1].contains("age"));
        assert!(!dataset.rows()[2].contains("city"));
        assert_eq!(dataset.attributes(), vec!["age", "city"]);
        assert_eq!(dataset.labels(), vec![Value::from("A"), Value::from("B"), Value::from("A")]);
    }

    #[test]
    fn test_dataset_from_reader_missing_target() {
        let source = "age,label\n20,A\n25,\n";
        let result = Dataset::from_reader(source.as_bytes(), "label");
        assert!(matches!(result, Err(TreeError::MissingTargetValue(1, _))));
    }

    #[test]
    fn test_dataset_train_test_split() {
        let rows = (0..8).map(|i| Row::new().with("x", i).with("y", i % 2)).collect();
        let dataset = Dataset::new(rows, "y").unwrap();

        let (train, test) = dataset.train_test_split(0.75, Some(42)).unwrap();
        assert_eq!(train.len(), 6);
        assert_eq!(test.len(), 2);
        assert_eq!(train.target(), "y");

        let (again, _) = dataset.train_test_split(0.75, Some(42)).unwrap();
        assert_eq!(train, again);
    }

    #[test]
    fn test_dataset_train_test_split_invalid_size() {
        let result = weather().train_test_split(1.5, None);
        assert!(matches!(result, Err(TreeError::InvalidParameter(..))));
    }

    #[test]
    fn test_view_filter_leaves_dataset_untouched() {
        let dataset = weather();
        let view = dataset.view();
        let rainy = view.filter(|row| row.get("outlook") == Some(&Value::from("rainy")));
        assert_eq!(rainy.len(), 2);
        assert_eq!(view.len(), 3);
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn test_view_majority_class() {
        let dataset = weather();
        assert_eq!(dataset.view().majority_class(), Some(Value::from("no")));

        let tied = dataset
            .view()
            .filter(|row| row.get("outlook") == Some(&Value::from("rainy")));
        assert_eq!(tied.majority_class(), Some(Value::from("no")));

        let empty = dataset.view().filter(|_| false);
        assert_eq!(empty.majority_class(), None);
    }

    #[test]
    fn test_view_pure_class() {
        let dataset = weather();
        assert_eq!(dataset.view().pure_class(), None);
        let sunny = dataset
            .view()
            .filter(|row| row.get("outlook") == Some(&Value::from("sunny")));
        assert_eq!(sunny.pure_class(), Some(&Value::from("no")));
    }

    #[test]
    fn test_view_distinct_values_and_domain() {
        let rows = vec![
            Row::new().with("n", 3).with("c", "b").with("y", 1),
            Row::new().with("n", 1).with("c", "a").with("y", 0),
            Row::new().with("n", 3).with("c", 7).with("y", 0),
        ];
        let dataset = Dataset::new(rows, "y").unwrap();
        let view = dataset.view();
        assert_eq!(view.distinct_values("n"), vec![&Value::from(3), &Value::from(1)]);
        assert_eq!(view.domain("n"), Some(Domain::Numeric));
        assert_eq!(view.domain("c"), Some(Domain::Categorical));
        assert_eq!(view.domain("missing"), None);
        assert_eq!(view.misclassified(&Value::from(0)), 1);
    }
}
