//! JSON-encoded model artifacts: a linear multi-class classifier and the two
//! common feature scalers. Parameters are laid out the way scikit-learn
//! stores them (`coef_`, `intercept_`, `mean_`, `scale_`, `min_`).

use crate::errors::{ModelError, ModelResult};
use crate::feature_vector::FEATURE_COUNT;
use crate::model::{Classifier, Transformer};
use serde::{Deserialize, Serialize};

/// Classifier artifact document, tagged by `kind`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    Linear(LinearClassifier),
}

impl ClassifierArtifact {
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ClassifierArtifact::Linear(model) => model.validate(),
        }
    }

    pub fn into_classifier(self) -> Box<dyn Classifier> {
        match self {
            ClassifierArtifact::Linear(model) => Box::new(model),
        }
    }
}

/// Scaler artifact document, tagged by `kind`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScalerArtifact {
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
}

impl ScalerArtifact {
    pub fn validate(&self) -> Result<(), String> {
        match self {
            ScalerArtifact::Standard(s) => {
                check_params("mean", &s.mean)?;
                check_params("scale", &s.scale)
            }
            ScalerArtifact::MinMax(s) => {
                check_params("scale", &s.scale)?;
                check_params("min", &s.min)
            }
        }
    }

    pub fn into_transformer(self) -> Box<dyn Transformer> {
        match self {
            ScalerArtifact::Standard(s) => Box::new(s),
            ScalerArtifact::MinMax(s) => Box::new(s),
        }
    }
}

fn check_params(name: &str, values: &[f64]) -> Result<(), String> {
    if values.len() != FEATURE_COUNT {
        return Err(format!(
            "`{name}` has {} entries, expected {FEATURE_COUNT}",
            values.len()
        ));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(format!("`{name}` contains non-finite values"));
    }
    Ok(())
}

fn check_len(features: &[f64], expected: usize) -> ModelResult<()> {
    if features.len() != expected {
        return Err(ModelError::DimensionMismatch {
            expected,
            actual: features.len(),
        });
    }
    Ok(())
}

/// Linear model scoring `intercept + w·x` per class.
///
/// With two classes a single coefficient row is accepted (binary decision
/// function): a positive score selects the second class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    pub classes: Vec<i64>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

impl LinearClassifier {
    pub fn new(classes: Vec<i64>, coefficients: Vec<Vec<f64>>, intercepts: Vec<f64>) -> Self {
        Self {
            classes,
            coefficients,
            intercepts,
        }
    }

    fn is_binary(&self) -> bool {
        self.classes.len() == 2 && self.coefficients.len() == 1
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("classifier declares no classes".to_string());
        }
        let rows = if self.is_binary() { 1 } else { self.classes.len() };
        if self.coefficients.len() != rows {
            return Err(format!(
                "{} coefficient rows for {} classes",
                self.coefficients.len(),
                self.classes.len()
            ));
        }
        if self.intercepts.len() != rows {
            return Err(format!(
                "{} intercepts for {} coefficient rows",
                self.intercepts.len(),
                rows
            ));
        }
        for (i, row) in self.coefficients.iter().enumerate() {
            check_params(&format!("coefficients[{i}]"), row)?;
        }
        if self.intercepts.iter().any(|v| !v.is_finite()) {
            return Err("`intercepts` contains non-finite values".to_string());
        }
        Ok(())
    }

    /// Raw decision scores, one per coefficient row
    pub fn decision_function(&self, features: &[f64]) -> ModelResult<Vec<f64>> {
        check_len(features, FEATURE_COUNT)?;
        Ok(self
            .coefficients
            .iter()
            .zip(self.intercepts.iter())
            .map(|(row, bias)| {
                bias + row
                    .iter()
                    .zip(features.iter())
                    .map(|(w, x)| w * x)
                    .sum::<f64>()
            })
            .collect())
    }
}

impl Classifier for LinearClassifier {
    fn predict(&self, features: &[f64]) -> ModelResult<i64> {
        let scores = self.decision_function(features)?;
        if scores.iter().any(|s| s.is_nan()) {
            return Err(ModelError::backend("decision score is NaN"));
        }

        if self.is_binary() {
            let index = if scores[0] > 0.0 { 1 } else { 0 };
            return Ok(self.classes[index]);
        }

        // First maximum wins on ties
        let mut best = 0;
        for (i, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = i;
            }
        }
        self.classes
            .get(best)
            .copied()
            .ok_or_else(|| ModelError::backend("no class for best score"))
    }

    fn describe(&self) -> String {
        format!("linear classifier ({} classes)", self.classes.len())
    }
}

/// `(x - mean) / scale`, zero scales treated as one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl Transformer for StandardScaler {
    fn transform(&self, features: &[f64]) -> ModelResult<Vec<f64>> {
        check_len(features, self.mean.len())?;
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(x, (mean, scale))| {
                let scale = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / scale
            })
            .collect())
    }

    fn describe(&self) -> String {
        "standard scaler".to_string()
    }
}

/// `x * scale + min`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub scale: Vec<f64>,
    pub min: Vec<f64>,
}

impl Transformer for MinMaxScaler {
    fn transform(&self, features: &[f64]) -> ModelResult<Vec<f64>> {
        check_len(features, self.scale.len())?;
        Ok(features
            .iter()
            .zip(self.scale.iter().zip(self.min.iter()))
            .map(|(x, (scale, min))| x * scale + min)
            .collect())
    }

    fn describe(&self) -> String {
        "min-max scaler".to_string()
    }
}
