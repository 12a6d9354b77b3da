use thiserror::Error;

use crate::core::stats::{mean, population_std};
use crate::models::{Feature, FeatureRow, FEATURE_COUNT, FEATURE_ORDER};

/// Errors raised while fitting the scaler
#[derive(Debug, Error, PartialEq)]
pub enum ScalingError {
    #[error("no values to scale feature '{0}'")]
    EmptyColumn(Feature),
}

/// Per-column mean/deviation standardization
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    means: [f64; FEATURE_COUNT],
    scales: [f64; FEATURE_COUNT],
}

impl StandardScaler {
    /// Fit on encoded rows, ignoring missing values
    ///
    /// Fails on the first column that has no values at all.
    pub fn fit(rows: &[FeatureRow]) -> Result<Self, ScalingError> {
        let mut means = [0.0; FEATURE_COUNT];
        let mut scales = [1.0; FEATURE_COUNT];

        for column in 0..FEATURE_COUNT {
            let values: Vec<f64> = rows.iter().filter_map(|row| row[column]).collect();
            let empty = || ScalingError::EmptyColumn(FEATURE_ORDER[column]);
            let mu = mean(&values).ok_or_else(empty)?;
            let sigma = population_std(&values).ok_or_else(empty)?;

            means[column] = mu;
            // constant columns are centred but left unscaled
            scales[column] = if sigma == 0.0 { 1.0 } else { sigma };
        }

        Ok(Self { means, scales })
    }

    /// Standardize one row. Missing values stay missing.
    pub fn transform(&self, row: &FeatureRow) -> FeatureRow {
        let mut scaled = [None; FEATURE_COUNT];
        for (column, value) in row.iter().enumerate() {
            scaled[column] = value.map(|v| (v - self.means[column]) / self.scales[column]);
        }
        scaled
    }

    pub fn means(&self) -> &[f64; FEATURE_COUNT] {
        &self.means
    }

    pub fn scales(&self) -> &[f64; FEATURE_COUNT] {
        &self.scales
    }
}
