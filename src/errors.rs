//! Error handling for the crop advisor
//!
//! Load-time failures, artifact-level inference failures and the
//! request-level prediction outcome each have their own enum. A missing
//! artifact and an artifact that loaded but is unusable are distinct
//! variants of [`ArtifactLoadError`].

use std::path::PathBuf;
use thiserror::Error;

/// Why an artifact could not be loaded at startup.
#[derive(Error, Debug)]
pub enum ArtifactLoadError {
    #[error("Artifact not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Artifact {} could not be deserialized: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("Artifact {} violates its contract: {reason}", path.display())]
    ContractViolation { path: PathBuf, reason: String },
}

impl ArtifactLoadError {
    /// Classify an I/O failure, separating a missing file from other read errors
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn contract(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ContractViolation {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Failure raised by a loaded artifact while transforming or classifying.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("expected {expected} features, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("{message}")]
    Backend { message: String },
}

impl ModelError {
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

pub type ModelResult<T> = Result<T, ModelError>;

/// Outcome of a failed prediction request.
///
/// Both variants are terminal for the request that raised them only; the
/// loaded artifacts stay usable for the next request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("Model unavailable: no classifier is loaded")]
    ModelUnavailable,

    #[error("Inference failed: {message}")]
    InferenceFailure { message: String },
}

impl PredictionError {
    pub fn inference(message: impl Into<String>) -> Self {
        Self::InferenceFailure {
            message: message.into(),
        }
    }
}

impl From<ModelError> for PredictionError {
    fn from(err: ModelError) -> Self {
        PredictionError::inference(err.to_string())
    }
}

/// Crate-level error for everything outside a single prediction.
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O operation failed: {operation}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Logging setup failed: {message}")]
    Logging { message: String },
}

pub type AdvisorResult<T> = Result<T, AdvisorError>;

impl AdvisorError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn io(operation: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}

impl From<figment::Error> for AdvisorError {
    fn from(err: figment::Error) -> Self {
        AdvisorError::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ArtifactLoadError::from_io("model.json", io_err);
        assert!(err.is_not_found());
        assert!(err.to_string().contains("model.json"));
    }

    #[test]
    fn test_other_io_failure_is_not_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ArtifactLoadError::from_io("scaler.json", io_err);
        assert!(!err.is_not_found());
        assert!(matches!(err, ArtifactLoadError::Io { .. }));
    }

    #[test]
    fn test_model_error_becomes_inference_failure() {
        let err: PredictionError = ModelError::DimensionMismatch {
            expected: 7,
            actual: 6,
        }
        .into();
        assert_eq!(
            err,
            PredictionError::inference("expected 7 features, got 6")
        );
    }

    #[test]
    fn test_error_chaining() {
        use std::error::Error;

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err = AdvisorError::io("writing export", io_err);

        assert!(err.source().is_some());
        assert!(err.to_string().contains("I/O operation failed"));
    }
}
