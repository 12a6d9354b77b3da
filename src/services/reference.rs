use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

use crate::models::PhoneRecord;

/// Name of the target column in the reference CSV
pub const TARGET_COLUMN: &str = "approx_price_EUR";

/// Errors that can occur loading the reference dataset
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("Failed to open reference data {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid {column} value '{value}' on data row {row}")]
    InvalidPrice {
        column: &'static str,
        row: usize,
        value: String,
    },

    #[error("Reference data has no rows")]
    Empty,
}

/// One historical listing with its observed price
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRow {
    pub record: PhoneRecord,
    pub price: Option<f64>,
}

/// Static table of historical listings used to fit the preprocessing step
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    rows: Vec<ReferenceRow>,
}

impl ReferenceTable {
    pub fn new(rows: Vec<ReferenceRow>) -> Result<Self, ReferenceError> {
        if rows.is_empty() {
            return Err(ReferenceError::Empty);
        }
        Ok(Self { rows })
    }

    /// Load the table from a CSV file on disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ReferenceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ReferenceError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let table = Self::from_reader(file)?;
        tracing::info!(
            path = %path.display(),
            rows = table.len(),
            "Reference data loaded"
        );
        Ok(table)
    }

    /// Load the table from CSV text. Columns are matched by header name.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ReferenceError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = rdr.headers()?.clone();
        let target_idx = headers.iter().position(|h| h == TARGET_COLUMN);

        let mut rows = Vec::new();
        for (line, result) in rdr.records().enumerate() {
            let raw = result?;
            let record: PhoneRecord = raw.deserialize(Some(&headers))?;
            let price = match target_idx.and_then(|idx| raw.get(idx)) {
                Some(text) if !text.is_empty() => {
                    Some(text.parse::<f64>().map_err(|_| ReferenceError::InvalidPrice {
                        column: TARGET_COLUMN,
                        row: line + 1,
                        value: text.to_string(),
                    })?)
                }
                _ => None,
            };
            rows.push(ReferenceRow { record, price });
        }

        Self::new(rows)
    }

    pub fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    pub fn records(&self) -> impl Iterator<Item = &PhoneRecord> {
        self.rows.iter().map(|row| &row.record)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Lowest and highest observed price
    pub fn price_range(&self) -> Option<(f64, f64)> {
        self.rows
            .iter()
            .filter_map(|row| row.price)
            .fold(None, |range, price| match range {
                None => Some((price, price)),
                Some((lo, hi)) => Some((lo.min(price), hi.max(price))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
weight_g,SIM,display_type,display_resolution,display_size_ppi,OS,CPU,memory_card,internal_memory_GB,RAM_GB,primary_camera,secondary_camera,battery,approx_price_EUR
150,Dual,IPS,5.0,400,Nougat,Octa-core,64,32,3,13,8,3000,450.5
140,Sengle,,4.7,,Lollipop,Quad-core,32,16,2,8,5,,199
";

    #[test]
    fn test_load_from_reader() {
        let table = ReferenceTable::from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        let first = &table.rows()[0];
        assert_eq!(first.record.weight_g, Some(150.0));
        assert_eq!(first.record.os.as_deref(), Some("Nougat"));
        assert_eq!(first.price, Some(450.5));
    }

    #[test]
    fn test_empty_cells_are_missing() {
        let table = ReferenceTable::from_reader(SAMPLE.as_bytes()).unwrap();
        let second = &table.rows()[1].record;

        assert_eq!(second.display_type, None);
        assert_eq!(second.display_size_ppi, None);
        assert_eq!(second.battery, None);
        assert_eq!(second.sim.as_deref(), Some("Sengle"));
    }

    #[test]
    fn test_columns_matched_by_name() {
        let reordered = "\
approx_price_EUR,battery,secondary_camera,primary_camera,RAM_GB,internal_memory_GB,memory_card,CPU,OS,display_size_ppi,display_resolution,display_type,SIM,weight_g
300,2500,5,8,2,16,0,Quad-core,KitKat,300,4.5,TFT,Single,135
";
        let table = ReferenceTable::from_reader(reordered.as_bytes()).unwrap();
        let record = &table.rows()[0].record;

        assert_eq!(record.weight_g, Some(135.0));
        assert_eq!(record.battery, Some(2500.0));
        assert_eq!(record.display_type.as_deref(), Some("TFT"));
    }

    #[test]
    fn test_price_range() {
        let table = ReferenceTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.price_range(), Some((199.0, 450.5)));
    }

    #[test]
    fn test_header_only_is_empty() {
        let header_only = SAMPLE.lines().next().unwrap();
        let err = ReferenceTable::from_reader(header_only.as_bytes()).unwrap_err();
        assert!(matches!(err, ReferenceError::Empty));
    }

    #[test]
    fn test_non_numeric_cell_fails() {
        let bad = SAMPLE.replace("150,Dual", "heavy,Dual");
        assert!(matches!(
            ReferenceTable::from_reader(bad.as_bytes()),
            Err(ReferenceError::Csv(_))
        ));
    }

    #[test]
    fn test_malformed_price_fails_load() {
        let data = SAMPLE.replace("450.5", "n/a");

        let err = ReferenceTable::from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, ReferenceError::InvalidPrice { row: 1, .. }));
        assert_eq!(err.to_string(), "Invalid approx_price_EUR value 'n/a' on data row 1");
    }
}
