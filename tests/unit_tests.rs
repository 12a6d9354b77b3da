// Unit tests for Mobile Price

use mobile_price::core::{
    encoding::{encode, normalize},
    outliers::IqrBounds,
    stats::{median, mode, quantile},
    Preprocessor,
};
use mobile_price::models::{format_price, CategoricalField, PhoneRecord};
use mobile_price::services::{ReferenceRow, ReferenceTable};

fn phone(weight_g: f64, display_type: &str, cpu: &str) -> PhoneRecord {
    PhoneRecord {
        weight_g: Some(weight_g),
        sim: Some("Dual".to_string()),
        display_type: Some(display_type.to_string()),
        display_resolution: Some(5.2),
        display_size_ppi: Some(420.0),
        os: Some("Marshmallow".to_string()),
        cpu: Some(cpu.to_string()),
        memory_card: Some(128.0),
        internal_memory_gb: Some(32.0),
        ram_gb: Some(3.0),
        primary_camera: Some(13.0),
        secondary_camera: Some(5.0),
        battery: Some(3000.0),
    }
}

fn reference(records: Vec<PhoneRecord>) -> ReferenceTable {
    ReferenceTable::new(
        records
            .into_iter()
            .map(|record| ReferenceRow { record, price: None })
            .collect(),
    )
    .unwrap()
}

#[test]
fn test_quantile_matches_linear_interpolation() {
    let values = [10.0, 20.0, 30.0, 40.0, 50.0];

    assert_eq!(quantile(&values, 0.25), Some(20.0));
    assert_eq!(quantile(&values, 0.1), Some(14.0));
    assert_eq!(median(&values), Some(30.0));
}

#[test]
fn test_iqr_bounds_on_skewed_column() {
    let values = [1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 4.0, 100.0];
    let bounds = IqrBounds::from_values(&values).unwrap();

    assert!(bounds.is_outlier(100.0));
    assert!(!bounds.is_outlier(4.0));
    assert_eq!(bounds.clamp_to_median(100.0), 3.0);
}

#[test]
fn test_mode_of_categories() {
    let values = ["IPS", "TFT", "IPS", "AMOLED"];
    assert_eq!(mode(values), Some("IPS".to_string()));
}

#[test]
fn test_encoding_tables() {
    assert_eq!(encode(CategoricalField::Sim, "Single"), Some(0.0));
    assert_eq!(encode(CategoricalField::DisplayType, "AMOLED"), Some(3.0));
    assert_eq!(encode(CategoricalField::Os, "Ice Cream Sandwich"), Some(4.0));
    assert_eq!(encode(CategoricalField::Cpu, "Octa-core"), Some(3.0));
    assert_eq!(encode(CategoricalField::Cpu, "Deca-core"), None);
}

#[test]
fn test_normalize_then_encode() {
    let mut sim = "Sengle".to_string();
    normalize(CategoricalField::Sim, &mut sim);
    assert_eq!(encode(CategoricalField::Sim, &sim), Some(0.0));
}

#[test]
fn test_missing_display_type_takes_mode() {
    let table = reference(vec![
        phone(140.0, "AMOLED", "Quad-core"),
        phone(150.0, "TFT", "Quad-core"),
        phone(160.0, "TFT", "Octa-core"),
        phone(170.0, "IPS", "Octa-core"),
    ]);
    let pre = Preprocessor::fit(&table).unwrap();

    let mut record = phone(150.0, "IPS", "Quad-core");
    record.display_type = None;
    assert_eq!(pre.clean(record).display_type.as_deref(), Some("TFT"));

    // Octa-core and Quad-core tie; the smaller label wins
    let mut record = phone(150.0, "IPS", "Quad-core");
    record.cpu = None;
    assert_eq!(pre.clean(record).cpu.as_deref(), Some("Octa-core"));
}

#[test]
fn test_scaled_row_is_standardized() {
    let table = reference(vec![
        phone(140.0, "IPS", "Quad-core"),
        phone(160.0, "IPS", "Quad-core"),
    ]);
    let pre = Preprocessor::fit(&table).unwrap();

    // weight mean 150, population std 10
    let row = pre.transform(phone(160.0, "IPS", "Quad-core"));
    assert_eq!(row[0], Some(1.0));
    // constant columns centre to zero
    assert_eq!(row[3], Some(0.0));
}

#[test]
fn test_price_formatting() {
    assert_eq!(format_price(561.05), "€561.05");
    assert_eq!(format_price(12345.0), "€12,345.0");
}
