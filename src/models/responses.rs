use serde::{Deserialize, Serialize};

/// Response envelope for the predict endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Success {
        success: bool,
        predicted_price: f64,
        predicted_price_formatted: String,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl PredictResponse {
    /// Build a success envelope from a raw model output
    pub fn success(prediction: f64) -> Self {
        let rounded = round_price(prediction);
        PredictResponse::Success {
            success: true,
            predicted_price: rounded,
            predicted_price_formatted: format_price(rounded),
        }
    }

    pub fn failure(error: impl ToString) -> Self {
        PredictResponse::Failure {
            success: false,
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PredictResponse::Success { .. })
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub model: String,
    pub reference_rows: usize,
}

/// Round to cents, ties to even on the exact binary value
///
/// Only values whose eighths are whole (`x.125`, `x.375`, ...) sit exactly
/// halfway between two cents. A product that lands on `.5` through rounding
/// is resolved with the exact remainder of the multiplication.
pub fn round_price(value: f64) -> f64 {
    let scaled = value * 100.0;
    let remainder = value.mul_add(100.0, -scaled);
    let cents = if (scaled - scaled.trunc()).abs() == 0.5 && remainder != 0.0 {
        if remainder > 0.0 {
            scaled.ceil()
        } else {
            scaled.floor()
        }
    } else {
        scaled.round_ties_even()
    };
    cents / 100.0
}

/// Format a price as euros with comma thousands separators
///
/// The decimal part keeps its shortest representation, so `300.0` renders
/// as `€300.0` and `1234.5` as `€1,234.5`.
pub fn format_price(value: f64) -> String {
    let repr = format!("{:?}", value.abs());
    let (int_part, frac_part) = match repr.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (repr.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value.is_sign_negative() && value != 0.0 { "-" } else { "" };
    match frac_part {
        Some(frac) => format!("€{}{}.{}", sign, grouped, frac),
        None => format!("€{}{}", sign, grouped),
    }
}
