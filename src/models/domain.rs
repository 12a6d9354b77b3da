use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric fields of a phone record, the ones subject to outlier replacement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    WeightG,
    DisplayResolution,
    DisplaySizePpi,
    MemoryCard,
    InternalMemoryGb,
    RamGb,
    PrimaryCamera,
    SecondaryCamera,
    Battery,
}

impl NumericField {
    pub const ALL: [NumericField; 9] = [
        NumericField::WeightG,
        NumericField::DisplayResolution,
        NumericField::DisplaySizePpi,
        NumericField::MemoryCard,
        NumericField::InternalMemoryGb,
        NumericField::RamGb,
        NumericField::PrimaryCamera,
        NumericField::SecondaryCamera,
        NumericField::Battery,
    ];

    /// Column name as it appears in the form and the reference CSV
    pub fn name(self) -> &'static str {
        match self {
            NumericField::WeightG => "weight_g",
            NumericField::DisplayResolution => "display_resolution",
            NumericField::DisplaySizePpi => "display_size_ppi",
            NumericField::MemoryCard => "memory_card",
            NumericField::InternalMemoryGb => "internal_memory_GB",
            NumericField::RamGb => "RAM_GB",
            NumericField::PrimaryCamera => "primary_camera",
            NumericField::SecondaryCamera => "secondary_camera",
            NumericField::Battery => "battery",
        }
    }

    /// Whether form input for this field must be a whole number
    pub fn is_integer(self) -> bool {
        matches!(self, NumericField::DisplaySizePpi | NumericField::MemoryCard)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Categorical fields of a phone record, each with a fixed integer encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalField {
    Sim,
    DisplayType,
    Os,
    Cpu,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 4] = [
        CategoricalField::Sim,
        CategoricalField::DisplayType,
        CategoricalField::Os,
        CategoricalField::Cpu,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CategoricalField::Sim => "SIM",
            CategoricalField::DisplayType => "display_type",
            CategoricalField::Os => "OS",
            CategoricalField::Cpu => "CPU",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// A model input column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Numeric(NumericField),
    Categorical(CategoricalField),
}

impl Feature {
    pub fn name(self) -> &'static str {
        match self {
            Feature::Numeric(field) => field.name(),
            Feature::Categorical(field) => field.name(),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Number of columns the model consumes
pub const FEATURE_COUNT: usize = 13;

/// Column order of the model input. Coefficients are aligned to this order.
pub const FEATURE_ORDER: [Feature; FEATURE_COUNT] = [
    Feature::Numeric(NumericField::WeightG),
    Feature::Categorical(CategoricalField::Sim),
    Feature::Categorical(CategoricalField::DisplayType),
    Feature::Numeric(NumericField::DisplayResolution),
    Feature::Numeric(NumericField::DisplaySizePpi),
    Feature::Categorical(CategoricalField::Os),
    Feature::Categorical(CategoricalField::Cpu),
    Feature::Numeric(NumericField::MemoryCard),
    Feature::Numeric(NumericField::InternalMemoryGb),
    Feature::Numeric(NumericField::RamGb),
    Feature::Numeric(NumericField::PrimaryCamera),
    Feature::Numeric(NumericField::SecondaryCamera),
    Feature::Numeric(NumericField::Battery),
];

/// A single phone listing. Any field may be missing until imputation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhoneRecord {
    pub weight_g: Option<f64>,
    #[serde(rename = "SIM")]
    pub sim: Option<String>,
    pub display_type: Option<String>,
    pub display_resolution: Option<f64>,
    pub display_size_ppi: Option<f64>,
    #[serde(rename = "OS")]
    pub os: Option<String>,
    #[serde(rename = "CPU")]
    pub cpu: Option<String>,
    pub memory_card: Option<f64>,
    #[serde(rename = "internal_memory_GB")]
    pub internal_memory_gb: Option<f64>,
    #[serde(rename = "RAM_GB")]
    pub ram_gb: Option<f64>,
    pub primary_camera: Option<f64>,
    pub secondary_camera: Option<f64>,
    pub battery: Option<f64>,
}

impl PhoneRecord {
    pub fn numeric(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::WeightG => self.weight_g,
            NumericField::DisplayResolution => self.display_resolution,
            NumericField::DisplaySizePpi => self.display_size_ppi,
            NumericField::MemoryCard => self.memory_card,
            NumericField::InternalMemoryGb => self.internal_memory_gb,
            NumericField::RamGb => self.ram_gb,
            NumericField::PrimaryCamera => self.primary_camera,
            NumericField::SecondaryCamera => self.secondary_camera,
            NumericField::Battery => self.battery,
        }
    }

    pub fn numeric_mut(&mut self, field: NumericField) -> &mut Option<f64> {
        match field {
            NumericField::WeightG => &mut self.weight_g,
            NumericField::DisplayResolution => &mut self.display_resolution,
            NumericField::DisplaySizePpi => &mut self.display_size_ppi,
            NumericField::MemoryCard => &mut self.memory_card,
            NumericField::InternalMemoryGb => &mut self.internal_memory_gb,
            NumericField::RamGb => &mut self.ram_gb,
            NumericField::PrimaryCamera => &mut self.primary_camera,
            NumericField::SecondaryCamera => &mut self.secondary_camera,
            NumericField::Battery => &mut self.battery,
        }
    }

    pub fn categorical(&self, field: CategoricalField) -> Option<&str> {
        match field {
            CategoricalField::Sim => self.sim.as_deref(),
            CategoricalField::DisplayType => self.display_type.as_deref(),
            CategoricalField::Os => self.os.as_deref(),
            CategoricalField::Cpu => self.cpu.as_deref(),
        }
    }

    pub fn categorical_mut(&mut self, field: CategoricalField) -> &mut Option<String> {
        match field {
            CategoricalField::Sim => &mut self.sim,
            CategoricalField::DisplayType => &mut self.display_type,
            CategoricalField::Os => &mut self.os,
            CategoricalField::Cpu => &mut self.cpu,
        }
    }
}

/// Encoded model input, one value per column of `FEATURE_ORDER`.
/// `None` marks a value that had no numeric code.
pub type FeatureRow = [Option<f64>; FEATURE_COUNT];
