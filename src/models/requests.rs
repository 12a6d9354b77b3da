use std::collections::HashMap;
use thiserror::Error;

use crate::models::domain::{CategoricalField, NumericField, PhoneRecord};

/// Errors raised while coercing submitted form fields
#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    #[error("missing form field '{0}'")]
    MissingField(&'static str),

    #[error("could not convert '{value}' to a number for field '{field}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("could not convert '{value}' to an integer for field '{field}'")]
    InvalidInteger { field: &'static str, value: String },
}

/// Raw `POST /predict` form body
#[derive(Debug, Clone, Default)]
pub struct PredictForm {
    fields: HashMap<String, String>,
}

impl PredictForm {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Coerce the form into a phone record
    ///
    /// Every field must be present. A blank value is kept as missing so the
    /// preprocessing step can impute it.
    pub fn into_record(self) -> Result<PhoneRecord, RequestError> {
        let mut record = PhoneRecord::default();

        for field in NumericField::ALL {
            let raw = self.value(field.name())?;
            *record.numeric_mut(field) = match raw {
                Some(text) => Some(parse_numeric(field, text)?),
                None => None,
            };
        }

        for field in CategoricalField::ALL {
            *record.categorical_mut(field) = self.value(field.name())?.map(str::to_string);
        }

        Ok(record)
    }

    fn value(&self, name: &'static str) -> Result<Option<&str>, RequestError> {
        let raw = self
            .fields
            .get(name)
            .ok_or(RequestError::MissingField(name))?
            .trim();
        Ok(if raw.is_empty() { None } else { Some(raw) })
    }
}

impl From<HashMap<String, String>> for PredictForm {
    fn from(fields: HashMap<String, String>) -> Self {
        Self::new(fields)
    }
}

fn parse_numeric(field: NumericField, text: &str) -> Result<f64, RequestError> {
    if field.is_integer() {
        parse_integer(text).ok_or_else(|| RequestError::InvalidInteger {
            field: field.name(),
            value: text.to_string(),
        })
    } else {
        text.parse::<f64>()
            .ok()
            .filter(|v| !v.is_nan())
            .ok_or_else(|| RequestError::InvalidNumber {
                field: field.name(),
                value: text.to_string(),
            })
    }
}

/// Whole numbers of any size; values beyond `i64` keep their magnitude as `f64`
fn parse_integer(text: &str) -> Option<f64> {
    if let Ok(value) = text.parse::<i64>() {
        return Some(value as f64);
    }
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse::<f64>().ok()
}
