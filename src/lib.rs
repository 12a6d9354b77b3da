//! Mobile Price - price prediction service for mobile phone listings
//!
//! Loads a trained linear model and a reference dataset at startup, then
//! prices one submitted listing per request. Each listing goes through the
//! same cleaning, encoding and scaling steps the model was trained with.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{PredictError, Predictor, Preprocessor};
pub use models::{PhoneRecord, PredictForm, PredictResponse};
pub use services::{LinearRegressor, PriceModel, ReferenceTable};
