//! Library root for the `crop_advisor` crate
//! Crop recommendation from seven soil and weather readings

// Core error handling
pub mod api_errors;
pub mod errors;

// Inputs and labels
pub mod crop_catalog;
pub mod feature_vector;

// Model artifacts
pub mod artifact_loader;
pub mod linear_model;
pub mod model;
pub mod onnx_model;

// Prediction & rendering
pub mod prediction_service;
pub mod result_exporter;

// Configuration, logging & CLI
pub mod cli;
pub mod config;
pub mod logging;

// Web server interface
pub mod web;


pub use artifact_loader::{load_artifacts, ArtifactPaths, PredictionContext};
pub use errors::{ArtifactLoadError, ModelError, PredictionError};
pub use feature_vector::{FeatureVector, SoilReadings};
pub use model::{Classifier, Transformer};
pub use prediction_service::{PredictionResult, PredictionService};
