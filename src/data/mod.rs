/// Tabular datasets, borrowed views, CSV loading and train/test splitting
pub mod dataset;
/// Cell values and rows
pub mod value;

pub use dataset::{DataView, Dataset, Domain};
pub use value::{Row, Value};
