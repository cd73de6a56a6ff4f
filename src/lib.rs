//! # Rusty-tree
//!
//! `rusty-tree` induces, prunes and applies decision-tree classifiers over labeled,
//! tabular data in the style of ID3, C4.5 and CART.
//! It also contains utilities for loading and splitting datasets and for evaluating predictions.
//!
//! ## Getting Started
//!
//! To use `rusty-tree`, add the following to your `Cargo.toml` file:
//!
//! ```toml
//! [dependencies]
//! rusty-tree = "*"
//! ```
//!
//! ## Example Usage
//!
//! As a quick example, here's how you can use `rusty-tree` to train an ID3 tree on a small dataset:
//!
//! ```rust
//!
//! use rusty_tree::data::{Dataset, Row, Value};
//! use rusty_tree::trees::Id3;
//!
//! let rows = vec![
//!     Row::new().with("outlook", "sunny").with("windy", false).with("play", "no"),
//!     Row::new().with("outlook", "rainy").with("windy", false).with("play", "yes"),
//!     Row::new().with("outlook", "rainy").with("windy", true).with("play", "no"),
//! ];
//! let dataset = Dataset::new(rows, "play").unwrap();
//!
//! let mut model = Id3::new();
//!
//! model.fit(&dataset, &["outlook", "windy"]).unwrap();
//!
//! let row = Row::new().with("outlook", "rainy").with("windy", false);
//!
//! let prediction = model.predict(&row).unwrap();
//! assert_eq!(prediction, Value::from("yes"));
//! ```

/// Cell values, rows, datasets and borrowed views
pub mod data;
/// Error type shared by the crate
pub mod error;
/// Functions for evaluating model performance
pub mod metrics;
/// Decision trees
pub mod trees;

pub use error::{Result, TreeError};
