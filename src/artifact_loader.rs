//! Startup loading of the classifier and scaler artifacts.
//!
//! Loading never aborts the process: a missing or unusable classifier leaves
//! the context "not ready", a missing or unusable scaler disables scaling.
//! Every outcome is recorded in a [`LoadReport`] for operators.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{error, info, warn};

use crate::errors::ArtifactLoadError;
use crate::linear_model::{ClassifierArtifact, ScalerArtifact};
use crate::model::{Classifier, Transformer};
use crate::onnx_model::OnnxClassifier;

/// Where to look for the two artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model.json"),
            scaler_path: PathBuf::from("scaler.json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ArtifactStatus {
    Loaded { description: String, sha256: String },
    Missing,
    Rejected { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtifactReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: ArtifactStatus,
}

impl ArtifactReport {
    pub fn is_loaded(&self) -> bool {
        matches!(self.status, ArtifactStatus::Loaded { .. })
    }

    fn failed(path: &Path, err: &ArtifactLoadError) -> Self {
        let status = if err.is_not_found() {
            ArtifactStatus::Missing
        } else {
            ArtifactStatus::Rejected {
                reason: err.to_string(),
            }
        };
        Self {
            path: path.to_path_buf(),
            status,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub classifier: ArtifactReport,
    pub scaler: ArtifactReport,
    pub loaded_at: DateTime<Utc>,
}

impl LoadReport {
    pub fn ready(&self) -> bool {
        self.classifier.is_loaded()
    }
}

/// Immutable artifact state shared by every prediction request
pub struct PredictionContext {
    pub classifier: Option<Arc<dyn Classifier>>,
    pub scaler: Option<Arc<dyn Transformer>>,
    pub report: LoadReport,
}

impl PredictionContext {
    /// Build a context from already-constructed artifacts
    pub fn from_parts(
        classifier: Option<Arc<dyn Classifier>>,
        scaler: Option<Arc<dyn Transformer>>,
    ) -> Self {
        let report = LoadReport {
            classifier: in_memory_report("<in-memory classifier>", classifier.as_ref().map(|c| c.describe())),
            scaler: in_memory_report("<in-memory scaler>", scaler.as_ref().map(|s| s.describe())),
            loaded_at: Utc::now(),
        };
        Self {
            classifier,
            scaler,
            report,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.classifier.is_some()
    }
}

fn in_memory_report(label: &str, description: Option<String>) -> ArtifactReport {
    ArtifactReport {
        path: PathBuf::from(label),
        status: match description {
            Some(description) => ArtifactStatus::Loaded {
                description,
                sha256: String::new(),
            },
            None => ArtifactStatus::Missing,
        },
    }
}

fn read_artifact(path: &Path) -> Result<(Vec<u8>, String), ArtifactLoadError> {
    let bytes = std::fs::read(path).map_err(|e| ArtifactLoadError::from_io(path, e))?;
    let digest = format!("{:x}", Sha256::digest(&bytes));
    Ok((bytes, digest))
}

fn is_onnx(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("onnx"))
        .unwrap_or(false)
}

/// Load a classifier artifact, choosing the format by file extension
pub fn load_classifier(path: &Path) -> Result<(Arc<dyn Classifier>, String), ArtifactLoadError> {
    let (bytes, digest) = read_artifact(path)?;

    if is_onnx(path) {
        let model = OnnxClassifier::from_bytes(path, &bytes)?;
        return Ok((Arc::new(model), digest));
    }

    let artifact: ClassifierArtifact = serde_json::from_slice(&bytes)
        .map_err(|e| ArtifactLoadError::malformed(path, e.to_string()))?;
    artifact
        .validate()
        .map_err(|reason| ArtifactLoadError::contract(path, reason))?;

    Ok((Arc::from(artifact.into_classifier()), digest))
}

/// Load a scaler artifact (JSON only)
pub fn load_scaler(path: &Path) -> Result<(Arc<dyn Transformer>, String), ArtifactLoadError> {
    let (bytes, digest) = read_artifact(path)?;

    let artifact: ScalerArtifact = serde_json::from_slice(&bytes)
        .map_err(|e| ArtifactLoadError::malformed(path, e.to_string()))?;
    artifact
        .validate()
        .map_err(|reason| ArtifactLoadError::contract(path, reason))?;

    Ok((Arc::from(artifact.into_transformer()), digest))
}

/// Load both artifacts and build the shared prediction context
pub fn load_artifacts(paths: &ArtifactPaths) -> PredictionContext {
    let (classifier, classifier_report) = match load_classifier(&paths.model_path) {
        Ok((model, sha256)) => {
            info!(path = %paths.model_path.display(), model = %model.describe(), "Model loaded");
            let report = ArtifactReport {
                path: paths.model_path.clone(),
                status: ArtifactStatus::Loaded {
                    description: model.describe(),
                    sha256,
                },
            };
            (Some(model), report)
        }
        Err(e) => {
            error!("Model not found or invalid, predictions disabled: {e}");
            (None, ArtifactReport::failed(&paths.model_path, &e))
        }
    };

    let (scaler, scaler_report) = match load_scaler(&paths.scaler_path) {
        Ok((scaler, sha256)) => {
            info!(path = %paths.scaler_path.display(), scaler = %scaler.describe(), "Scaler loaded");
            let report = ArtifactReport {
                path: paths.scaler_path.clone(),
                status: ArtifactStatus::Loaded {
                    description: scaler.describe(),
                    sha256,
                },
            };
            (Some(scaler), report)
        }
        Err(e) => {
            warn!("Scaler not available, inputs will not be scaled: {e}");
            (None, ArtifactReport::failed(&paths.scaler_path, &e))
        }
    };

    PredictionContext {
        classifier,
        scaler,
        report: LoadReport {
            classifier: classifier_report,
            scaler: scaler_report,
            loaded_at: Utc::now(),
        },
    }
}
