use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::core::preprocess::{PreprocessError, Preprocessor};
use crate::models::{PhoneRecord, PredictForm, RequestError};
use crate::services::{LinearRegressor, ModelError, PriceModel, ReferenceError, ReferenceTable};

/// Anything that can go wrong between receiving a form and returning a price
#[derive(Debug, Error)]
pub enum PredictError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    Preprocess(#[from] PreprocessError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Fitted preprocessing plus the trained model
///
/// Both parts are immutable after construction and cheap to clone.
#[derive(Clone)]
pub struct Predictor {
    preprocessor: Arc<Preprocessor>,
    model: Arc<dyn PriceModel>,
    reference_rows: usize,
    price_range: Option<(f64, f64)>,
}

impl Predictor {
    /// Fit the preprocessing step on `reference` and pair it with `model`
    pub fn new(reference: &ReferenceTable, model: Arc<dyn PriceModel>) -> Result<Self, PredictError> {
        let preprocessor = Preprocessor::fit(reference)?;

        Ok(Self {
            preprocessor: Arc::new(preprocessor),
            model,
            reference_rows: reference.len(),
            price_range: reference.price_range(),
        })
    }

    /// Load both artifacts from disk
    pub fn load<P, Q>(model_path: P, reference_path: Q) -> Result<Self, PredictError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let model = LinearRegressor::from_path(model_path)?;
        let reference = ReferenceTable::from_path(reference_path)?;
        Self::new(&reference, Arc::new(model))
    }

    /// Coerce a submitted form and predict its price
    pub fn predict_form(&self, form: PredictForm) -> Result<f64, PredictError> {
        let record = form.into_record()?;
        self.predict(record)
    }

    /// Predict the price of one record
    pub fn predict(&self, record: PhoneRecord) -> Result<f64, PredictError> {
        let row = self.preprocessor.transform(record);
        let price = self.model.predict(&row)?;

        tracing::debug!(model = %self.model.name(), price, "Prediction complete");
        Ok(price)
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn reference_rows(&self) -> usize {
        self.reference_rows
    }

    /// Lowest and highest price seen in the reference data
    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.price_range
    }
}

impl std::fmt::Debug for Predictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predictor")
            .field("model", &self.model.name())
            .field("reference_rows", &self.reference_rows)
            .finish()
    }
}
