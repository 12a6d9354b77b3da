use thiserror::Error;

use crate::core::{
    encoding::{encode, normalize},
    outliers::IqrBounds,
    scaling::{ScalingError, StandardScaler},
    stats::{mean, mode},
};
use crate::models::{CategoricalField, Feature, FeatureRow, NumericField, PhoneRecord, FEATURE_COUNT, FEATURE_ORDER};
use crate::services::ReferenceTable;

/// Errors raised while fitting the preprocessing step
#[derive(Debug, Error, PartialEq)]
pub enum PreprocessError {
    #[error("reference column '{0}' has no values")]
    EmptyColumn(&'static str),

    #[error(transparent)]
    Scaling(#[from] ScalingError),
}

/// Values used to fill missing fields
#[derive(Debug, Clone, PartialEq)]
pub struct Imputation {
    categorical: Vec<String>,
    numeric: Vec<f64>,
}

impl Imputation {
    /// Most frequent category and mean value of each reference column
    fn fit(reference: &ReferenceTable) -> Result<Self, PreprocessError> {
        let categorical = CategoricalField::ALL
            .iter()
            .map(|&field| {
                mode(reference.records().filter_map(|r| r.categorical(field)))
                    .ok_or(PreprocessError::EmptyColumn(field.name()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let numeric = NumericField::ALL
            .iter()
            .map(|&field| {
                let values: Vec<f64> = reference.records().filter_map(|r| r.numeric(field)).collect();
                mean(&values).ok_or(PreprocessError::EmptyColumn(field.name()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { categorical, numeric })
    }

    pub fn categorical(&self, field: CategoricalField) -> &str {
        &self.categorical[field.index()]
    }

    pub fn numeric(&self, field: NumericField) -> f64 {
        self.numeric[field.index()]
    }

    fn apply(&self, record: &mut PhoneRecord) {
        for field in CategoricalField::ALL {
            let slot = record.categorical_mut(field);
            if slot.is_none() {
                *slot = Some(self.categorical(field).to_string());
            }
        }
        for field in NumericField::ALL {
            let slot = record.numeric_mut(field);
            if slot.is_none() {
                *slot = Some(self.numeric(field));
            }
        }
    }
}

/// Preprocessing state fitted on the reference table
///
/// # Pipeline Stages
/// 1. Impute missing values (mode for categories, mean for numbers)
/// 2. Fix known typos
/// 3. Replace IQR outliers with the reference median
/// 4. Encode categories to integer codes
/// 5. Standard-scale every column
///
/// Fitting is deterministic in the reference table, so one fitted instance
/// can be shared by every request.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    imputation: Imputation,
    bounds: Vec<IqrBounds>,
    reference_bounds: Vec<IqrBounds>,
    scaler: StandardScaler,
}

impl Preprocessor {
    /// Fit imputation values, outlier bounds and the scaler on the reference
    pub fn fit(reference: &ReferenceTable) -> Result<Self, PreprocessError> {
        let imputation = Imputation::fit(reference)?;

        // Stage 3 for submitted records: bounds over the reference as loaded
        let bounds = fit_bounds(&reference.records().collect::<Vec<_>>())?;

        // Stage 1 & 2 on every reference row
        let mut cleaned: Vec<PhoneRecord> = reference.records().cloned().collect();
        for record in &mut cleaned {
            imputation.apply(record);
            normalize_typos(record);
        }

        // Stage 3 for the reference itself uses bounds of the imputed rows
        let reference_bounds = fit_bounds(&cleaned.iter().collect::<Vec<_>>())?;

        // Stage 4 & 5: the scaler sees the reference with outliers replaced
        let encoded: Vec<FeatureRow> = cleaned
            .iter_mut()
            .map(|record| {
                replace_outliers(record, &reference_bounds);
                encode_record(record)
            })
            .collect();
        let scaler = StandardScaler::fit(&encoded)?;

        tracing::debug!(rows = reference.len(), "Preprocessor fitted on reference data");

        Ok(Self {
            imputation,
            bounds,
            reference_bounds,
            scaler,
        })
    }

    /// Stages 1-3: impute, fix typos and replace outliers
    pub fn clean(&self, mut record: PhoneRecord) -> PhoneRecord {
        self.imputation.apply(&mut record);
        normalize_typos(&mut record);
        replace_outliers(&mut record, &self.bounds);
        record
    }

    /// Run the whole pipeline on one record
    ///
    /// Categories without a code come out as `None`; rejecting them is left
    /// to the model.
    pub fn transform(&self, record: PhoneRecord) -> FeatureRow {
        let cleaned = self.clean(record);
        self.scaler.transform(&encode_record(&cleaned))
    }

    pub fn imputation(&self) -> &Imputation {
        &self.imputation
    }

    /// Outlier bounds applied to submitted records
    pub fn bounds(&self, field: NumericField) -> &IqrBounds {
        &self.bounds[field.index()]
    }

    /// Outlier bounds applied to the imputed reference before scaling
    pub fn reference_bounds(&self, field: NumericField) -> &IqrBounds {
        &self.reference_bounds[field.index()]
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }
}

fn fit_bounds(records: &[&PhoneRecord]) -> Result<Vec<IqrBounds>, PreprocessError> {
    NumericField::ALL
        .iter()
        .map(|&field| {
            let values: Vec<f64> = records.iter().filter_map(|r| r.numeric(field)).collect();
            IqrBounds::from_values(&values).ok_or(PreprocessError::EmptyColumn(field.name()))
        })
        .collect()
}

fn normalize_typos(record: &mut PhoneRecord) {
    for field in CategoricalField::ALL {
        if let Some(value) = record.categorical_mut(field) {
            normalize(field, value);
        }
    }
}

fn replace_outliers(record: &mut PhoneRecord, bounds: &[IqrBounds]) {
    for field in NumericField::ALL {
        if let Some(value) = record.numeric_mut(field) {
            *value = bounds[field.index()].clamp_to_median(*value);
        }
    }
}

/// Lay a cleaned record out in model column order
pub fn encode_record(record: &PhoneRecord) -> FeatureRow {
    let mut row = [None; FEATURE_COUNT];
    for (column, feature) in FEATURE_ORDER.iter().enumerate() {
        row[column] = match *feature {
            Feature::Numeric(field) => record.numeric(field),
            Feature::Categorical(field) => record.categorical(field).and_then(|v| encode(field, v)),
        };
    }
    row
}
