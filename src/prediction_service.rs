//! prediction_service.rs
//! Turns one set of soil readings into a crop recommendation using the
//! artifacts held by a [`PredictionContext`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::artifact_loader::{LoadReport, PredictionContext};
use crate::crop_catalog::crop_name;
use crate::errors::PredictionError;
use crate::feature_vector::{SoilReadings, FEATURE_COUNT};
use crate::result_exporter::advice_text;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub class_id: i64,
    pub crop_label: String,
    pub advice_text: String,
}

/// Cheap to clone; every clone shares the same read-only context
#[derive(Clone)]
pub struct PredictionService {
    context: Arc<PredictionContext>,
}

impl PredictionService {
    pub fn new(context: Arc<PredictionContext>) -> Self {
        Self { context }
    }

    pub fn is_ready(&self) -> bool {
        self.context.is_ready()
    }

    pub fn report(&self) -> &LoadReport {
        &self.context.report
    }

    #[allow(clippy::too_many_arguments)]
    pub fn predict_values(
        &self,
        n: f64,
        p: f64,
        k: f64,
        temperature: f64,
        humidity: f64,
        ph: f64,
        rainfall: f64,
    ) -> Result<PredictionResult, PredictionError> {
        self.predict(&SoilReadings::new(n, p, k, temperature, humidity, ph, rainfall))
    }

    pub fn predict(&self, readings: &SoilReadings) -> Result<PredictionResult, PredictionError> {
        let classifier = self
            .context
            .classifier
            .as_ref()
            .ok_or(PredictionError::ModelUnavailable)?;

        let mut features = readings.to_feature_vector().to_vec();

        if let Some(scaler) = &self.context.scaler {
            features = scaler.transform(&features).map_err(|e| {
                warn!("Scaler failed: {e}");
                PredictionError::inference(format!("scaler: {e}"))
            })?;

            if features.len() != FEATURE_COUNT {
                warn!(len = features.len(), "Scaler changed feature count");
                return Err(PredictionError::inference(format!(
                    "scaler produced {} features, expected {FEATURE_COUNT}",
                    features.len()
                )));
            }
        }

        let class_id = classifier.predict(&features).map_err(|e| {
            warn!("Classifier failed: {e}");
            PredictionError::inference(format!("classifier: {e}"))
        })?;

        let crop_label = crop_name(class_id).to_string();
        debug!(class_id, crop = %crop_label, "Prediction complete");

        Ok(PredictionResult {
            class_id,
            crop_label,
            advice_text: advice_text(),
        })
    }
}
