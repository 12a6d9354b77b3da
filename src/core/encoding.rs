use crate::models::CategoricalField;

const SIM_CODES: &[(&str, u8)] = &[("Dual", 1), ("Single", 0)];

const DISPLAY_TYPE_CODES: &[(&str, u8)] = &[
    ("IPS", 2),
    ("TFT", 1),
    ("Capacitive", 0),
    ("Super AMOLED", 4),
    ("AMOLED", 3),
];

const OS_CODES: &[(&str, u8)] = &[
    ("Marshmallow", 0),
    ("Lollipop", 1),
    ("KitKat", 2),
    ("Jelly Bean", 3),
    ("Ice Cream Sandwich", 4),
    ("Nougat", 5),
];

const CPU_CODES: &[(&str, u8)] = &[
    ("Quad-core", 1),
    ("Octa-core", 3),
    ("Dual-core", 0),
    ("Hexa-core", 2),
];

/// Known data-entry typo in the SIM column
const SIM_TYPO: (&str, &str) = ("Sengle", "Single");

fn codes(field: CategoricalField) -> &'static [(&'static str, u8)] {
    match field {
        CategoricalField::Sim => SIM_CODES,
        CategoricalField::DisplayType => DISPLAY_TYPE_CODES,
        CategoricalField::Os => OS_CODES,
        CategoricalField::Cpu => CPU_CODES,
    }
}

/// Integer code for a category, `None` if the category is not in the table
#[inline]
pub fn encode(field: CategoricalField, value: &str) -> Option<f64> {
    codes(field)
        .iter()
        .find(|(label, _)| *label == value)
        .map(|(_, code)| *code as f64)
}

/// Apply the fixed spelling corrections for a categorical value
pub fn normalize(field: CategoricalField, value: &mut String) {
    if field == CategoricalField::Sim && *value == SIM_TYPO.0 {
        *value = SIM_TYPO.1.to_string();
    }
}
