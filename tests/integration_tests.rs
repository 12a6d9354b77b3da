// Integration tests for Mobile Price, run against the bundled artifacts

use mobile_price::core::Predictor;
use mobile_price::models::{NumericField, PhoneRecord, PredictForm, PredictResponse};
use mobile_price::services::{LinearRegressor, PriceModel, ReferenceTable};
use std::collections::HashMap;

const MODEL_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/sgd_regressor_model.json");
const REFERENCE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/regression_mobile_price.csv");

fn load_predictor() -> Predictor {
    Predictor::load(MODEL_PATH, REFERENCE_PATH).expect("bundled artifacts should load")
}

fn known_good_form() -> HashMap<String, String> {
    [
        ("weight_g", "160"),
        ("SIM", "Dual"),
        ("display_type", "IPS"),
        ("display_resolution", "5.5"),
        ("display_size_ppi", "400"),
        ("OS", "Marshmallow"),
        ("CPU", "Octa-core"),
        ("memory_card", "128"),
        ("internal_memory_GB", "32"),
        ("RAM_GB", "3"),
        ("primary_camera", "13"),
        ("secondary_camera", "8"),
        ("battery", "3000"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn form_with(field: &str, value: &str) -> PredictForm {
    let mut fields = known_good_form();
    fields.insert(field.to_string(), value.to_string());
    PredictForm::new(fields)
}

fn known_good_record() -> PhoneRecord {
    PredictForm::new(known_good_form()).into_record().unwrap()
}

#[test]
fn test_bundled_artifacts_load() {
    let reference = ReferenceTable::from_path(REFERENCE_PATH).unwrap();
    assert_eq!(reference.len(), 60);

    let model = LinearRegressor::from_path(MODEL_PATH).unwrap();
    assert_eq!(model.name(), "sgd_regressor");
}

#[test]
fn test_known_good_input_within_observed_range() {
    let predictor = load_predictor();
    let (low, high) = predictor.price_range().expect("reference has prices");

    let price = predictor.predict_form(PredictForm::new(known_good_form())).unwrap();

    assert!(price.is_finite());
    assert!(
        price >= low && price <= high,
        "price {} outside observed range {}..{}",
        price,
        low,
        high
    );
}

#[test]
fn test_out_of_range_value_replaced_by_median() {
    let predictor = load_predictor();
    // median of the non-missing reference batteries, imputed rows excluded
    let bounds = *predictor.preprocessor().bounds(NumericField::Battery);
    assert_eq!(bounds.median, 2750.0);
    assert_eq!(predictor.preprocessor().reference_bounds(NumericField::Battery).median, 2850.0);
    assert!(bounds.is_outlier(20000.0));

    let mut record = known_good_record();
    record.battery = Some(20000.0);
    let cleaned = predictor.preprocessor().clean(record.clone());
    assert_eq!(cleaned.battery, Some(2750.0));

    let mut at_median = known_good_record();
    at_median.battery = Some(2750.0);
    assert_eq!(
        predictor.predict(record).unwrap(),
        predictor.predict(at_median).unwrap()
    );
}

#[test]
fn test_oversized_integer_replaced_by_median() {
    let predictor = load_predictor();

    let huge = predictor
        .predict_form(form_with("memory_card", "99999999999999999999"))
        .unwrap();
    let median = predictor.predict_form(form_with("memory_card", "96")).unwrap();

    assert_eq!(huge, median);
}

#[test]
fn test_sengle_typo_normalized() {
    let predictor = load_predictor();

    let typo = predictor.predict_form(form_with("SIM", "Sengle")).unwrap();
    let fixed = predictor.predict_form(form_with("SIM", "Single")).unwrap();

    assert_eq!(typo, fixed);
}

#[test]
fn test_missing_categorical_filled_with_mode() {
    let predictor = load_predictor();
    assert_eq!(predictor.preprocessor().imputation().categorical(mobile_price::models::CategoricalField::Sim), "Dual");

    let mut record = known_good_record();
    record.sim = None;
    let cleaned = predictor.preprocessor().clean(record);
    assert_eq!(cleaned.sim.as_deref(), Some("Dual"));

    let blank = predictor.predict_form(form_with("SIM", "")).unwrap();
    let dual = predictor.predict_form(form_with("SIM", "Dual")).unwrap();
    assert_eq!(blank, dual);
}

#[test]
fn test_malformed_numeric_fails() {
    let predictor = load_predictor();

    let result = predictor.predict_form(form_with("weight_g", "one hundred"));
    let response = match result {
        Ok(price) => PredictResponse::success(price),
        Err(e) => PredictResponse::failure(e),
    };

    assert!(!response.is_success());
}

#[test]
fn test_unknown_category_fails() {
    let predictor = load_predictor();

    let err = predictor.predict_form(form_with("OS", "Oreo")).unwrap_err();
    assert!(err.to_string().contains("OS"));
}

#[test]
fn test_reference_rows_are_cleaned_before_scaling() {
    let predictor = load_predictor();
    let reference = ReferenceTable::from_path(REFERENCE_PATH).unwrap();

    // the reference contains weight and battery outliers; after cleaning every
    // row sits inside the fences
    for record in reference.records() {
        let cleaned = predictor.preprocessor().clean(record.clone());
        for field in NumericField::ALL {
            let bounds = predictor.preprocessor().bounds(field);
            let value = cleaned.numeric(field).unwrap();
            assert!(!bounds.is_outlier(value), "{} = {} is still an outlier", field.name(), value);
        }
    }
}
