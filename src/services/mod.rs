// Service exports
pub mod model;
pub mod reference;

pub use model::{LinearRegressor, ModelError, PriceModel};
pub use reference::{ReferenceError, ReferenceRow, ReferenceTable, TARGET_COLUMN};
