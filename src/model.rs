//! Capabilities a loaded artifact has to provide.
//!
//! The prediction service only talks to these two traits. Implementations
//! are shared read-only across requests and must be `Send + Sync`.

use crate::errors::ModelResult;

/// A pre-fitted feature transform applied before classification
pub trait Transformer: Send + Sync {
    fn transform(&self, features: &[f64]) -> ModelResult<Vec<f64>>;

    /// Short human-readable summary for status reports
    fn describe(&self) -> String;
}

/// A pre-trained model mapping a feature vector to a class id
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &[f64]) -> ModelResult<i64>;

    fn describe(&self) -> String;
}
