// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{CategoricalField, Feature, FeatureRow, NumericField, PhoneRecord, FEATURE_COUNT, FEATURE_ORDER};
pub use requests::{PredictForm, RequestError};
pub use responses::{format_price, round_price, HealthResponse, PredictResponse};
