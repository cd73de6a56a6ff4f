use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};

/// A single cell of a tabular dataset: a number or a category label.
///
/// Values are totally ordered (numbers first, then categories) and hashable,
/// so they can be used as partition keys and class labels.
#[derive(Clone, Debug)]
pub enum Value {
    Number(f64),
    Category(String),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(number) => Some(*number),
            Value::Category(_) => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Parses a raw text field: numbers become `Number`, anything else a `Category`.
    /// Empty, `NA` and `NaN` fields are missing and yield `None`.
    pub fn parse(field: &str) -> Option<Self> {
        let field = field.trim();
        if field.is_empty() || field.eq_ignore_ascii_case("na") {
            return None;
        }
        match field.parse::<f64>() {
            Ok(number) if number.is_nan() => None,
            Ok(number) => Some(Value::Number(number)),
            Err(_) => Some(Value::Category(field.to_string())),
        }
    }

    // -0.0 and 0.0 must compare and hash equal.
    fn number_key(number: f64) -> f64 {
        if number == 0.0 {
            0.0
        } else {
            number
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                Self::number_key(*a).total_cmp(&Self::number_key(*b))
            }
            (Value::Number(_), Value::Category(_)) => Ordering::Less,
            (Value::Category(_), Value::Number(_)) => Ordering::Greater,
            (Value::Category(a), Value::Category(b)) => a.cmp(b),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Value::Number(number) => {
                0u8.hash(state);
                Self::number_key(*number).to_bits().hash(state);
            }
            Value::Category(category) => {
                1u8.hash(state);
                category.hash(state);
            }
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(number) => write!(f, "{}", number),
            Value::Category(category) => write!(f, "{}", category),
        }
    }
}

macro_rules! impl_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(number: $t) -> Self {
                    Value::Number(number as f64)
                }
            }
        )*
    };
}

impl_from_number!(f64, f32, i32, i64, u8, u32, u64, usize);

impl From<&str> for Value {
    fn from(category: &str) -> Self {
        Value::Category(category.to_string())
    }
}

impl From<String> for Value {
    fn from(category: String) -> Self {
        Value::Category(category)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Category(flag.to_string())
    }
}

/// One record of a dataset, mapping attribute names to values.
/// An attribute absent from the row is a missing value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    values: HashMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, attribute: &str, value: impl Into<Value>) -> Self {
        self.insert(attribute, value);
        self
    }

    pub fn insert(&mut self, attribute: &str, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(attribute.to_string(), value.into())
    }

    pub fn get(&self, attribute: &str) -> Option<&Value> {
        self.values.get(attribute)
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.values.contains_key(attribute)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Attribute names present in the row, in no particular order.
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(attribute, value)| (attribute.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_parse() {
        assert_eq!(Value::parse("3.5"), Some(Value::Number(3.5)));
        assert_eq!(Value::parse(" sunny "), Some(Value::from("sunny")));
        assert_eq!(Value::parse(""), None);
        assert_eq!(Value::parse("NA"), None);
        assert_eq!(Value::parse("NaN"), None);
    }

    #[test]
    fn test_value_ordering() {
        let mut values = vec![
            Value::from("b"),
            Value::from(2),
            Value::from("a"),
            Value::from(-1.5),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Value::from(-1.5),
                Value::from(2),
                Value::from("a"),
                Value::from("b")
            ]
        );
    }

    #[test]
    fn test_value_zero_equality() {
        use std::collections::HashSet;

        assert_eq!(Value::Number(0.0), Value::Number(-0.0));
        let set: HashSet<_> = [Value::Number(0.0), Value::Number(-0.0)].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_value_from_bool() {
        assert_eq!(Value::from(false), Value::from("false"));
        assert_eq!(Value::from(true).to_string(), "true");
    }

    #[test]
    fn test_row_builder() {
        let row = Row::new().with("outlook", "sunny").with("humidity", 85);
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("outlook"), Some(&Value::from("sunny")));
        assert_eq!(row.get("humidity").and_then(Value::as_number), Some(85.0));
        assert!(!row.contains("windy"));
    }

    #[test]
    fn test_row_from_iter() {
        let row: Row = vec![("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(row.get("b"), Some(&Value::Number(2.0)));
    }
}
