// Core algorithm exports
pub mod encoding;
pub mod outliers;
pub mod predictor;
pub mod preprocess;
pub mod scaling;
pub mod stats;

pub use encoding::{encode, normalize};
pub use outliers::IqrBounds;
pub use predictor::{PredictError, Predictor};
pub use preprocess::{encode_record, Imputation, PreprocessError, Preprocessor};
pub use scaling::{ScalingError, StandardScaler};
