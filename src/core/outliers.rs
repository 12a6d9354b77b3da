use crate::core::stats::{median, quantile};

/// Multiplier applied to the interquartile range
const IQR_FACTOR: f64 = 1.5;

/// Tukey fences for one numeric column, with the replacement value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrBounds {
    pub lower: f64,
    pub upper: f64,
    pub median: f64,
}

impl IqrBounds {
    /// Compute `[Q1 - 1.5 * IQR, Q3 + 1.5 * IQR]` and the median of a column
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let q1 = quantile(values, 0.25)?;
        let q3 = quantile(values, 0.75)?;
        let iqr = q3 - q1;

        Some(Self {
            lower: q1 - IQR_FACTOR * iqr,
            upper: q3 + IQR_FACTOR * iqr,
            median: median(values)?,
        })
    }

    #[inline]
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }

    /// Replace a value outside the fences with the column median
    #[inline]
    pub fn clamp_to_median(&self, value: f64) -> f64 {
        if self.is_outlier(value) {
            self.median
        } else {
            value
        }
    }
}
