//! Trained regression model artifact

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::models::{Feature, FeatureRow, FEATURE_COUNT, FEATURE_ORDER};

/// Errors that can occur loading or running the model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read model artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid model artifact: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model expects {expected} coefficients, artifact has {actual}")]
    CoefficientCount { expected: usize, actual: usize },

    #[error("model feature {position} is '{actual}', expected '{expected}'")]
    FeatureMismatch {
        position: usize,
        expected: &'static str,
        actual: String,
    },

    #[error("Input contains a missing value for feature '{0}'")]
    MissingInput(Feature),
}

/// A fitted model that maps one scaled feature row to a price
pub trait PriceModel: Send + Sync {
    fn name(&self) -> &str;

    fn predict(&self, row: &FeatureRow) -> Result<f64, ModelError>;
}

/// Linear regressor exported from the training notebook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    #[serde(default = "default_model_name")]
    pub name: String,
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

fn default_model_name() -> String {
    "linear_regressor".to_string()
}

impl LinearRegressor {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, ModelError> {
        let model = Self {
            name: default_model_name(),
            feature_names: None,
            coefficients,
            intercept,
        };
        model.validate()?;
        Ok(model)
    }

    /// Load a JSON model artifact from disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let model = Self::from_json(&text)?;
        tracing::info!(
            model = %model.name,
            path = %path.display(),
            "Model loaded successfully"
        );
        Ok(model)
    }

    pub fn from_json(text: &str) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_str(text)?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::CoefficientCount {
                expected: FEATURE_COUNT,
                actual: self.coefficients.len(),
            });
        }

        if let Some(names) = &self.feature_names {
            if names.len() != FEATURE_COUNT {
                return Err(ModelError::CoefficientCount {
                    expected: FEATURE_COUNT,
                    actual: names.len(),
                });
            }
            for (position, (name, feature)) in names.iter().zip(FEATURE_ORDER).enumerate() {
                if name != feature.name() {
                    return Err(ModelError::FeatureMismatch {
                        position,
                        expected: feature.name(),
                        actual: name.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl PriceModel for LinearRegressor {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, row: &FeatureRow) -> Result<f64, ModelError> {
        let mut total = self.intercept;
        for ((value, coefficient), feature) in row.iter().zip(&self.coefficients).zip(FEATURE_ORDER) {
            let value = value.ok_or(ModelError::MissingInput(feature))?;
            total += coefficient * value;
        }
        Ok(total)
    }
}
