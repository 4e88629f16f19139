use serde::{Deserialize, Serialize};

/// Number of features the classifier was trained on
pub const FEATURE_COUNT: usize = 7;

/// Soil and weather readings entered for one prediction.
///
/// Every field defaults to 0.0 when omitted. No range checks are applied;
/// negative or implausible values reach the model as given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoilReadings {
    #[serde(alias = "N", alias = "nitrogen")]
    pub n: f64,
    #[serde(alias = "P", alias = "phosphorus")]
    pub p: f64,
    #[serde(alias = "K", alias = "potassium")]
    pub k: f64,
    pub temperature: f64, // °C
    pub humidity: f64,    // %
    pub ph: f64,
    pub rainfall: f64, // mm
}

impl SoilReadings {
    pub fn new(
        n: f64,
        p: f64,
        k: f64,
        temperature: f64,
        humidity: f64,
        ph: f64,
        rainfall: f64,
    ) -> Self {
        Self {
            n,
            p,
            k,
            temperature,
            humidity,
            ph,
            rainfall,
        }
    }

    pub fn to_feature_vector(&self) -> FeatureVector {
        FeatureVector([
            self.n,
            self.p,
            self.k,
            self.temperature,
            self.humidity,
            self.ph,
            self.rainfall,
        ])
    }
}

/// The ordered model input: nitrogen, phosphorus, potassium, temperature,
/// humidity, ph, rainfall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }
}
