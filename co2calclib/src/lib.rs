//! co2calclib: household CO2 emission engine with factor catalog, monthly
//! calculation, fiscal-year aggregation and report formats (JSON, CSV, XML).

pub mod calc;
pub mod catalog;
pub mod error;
pub mod fiscal;
pub mod model;
pub mod traits;
pub mod validate;

pub mod formats {
    pub mod csv;
    pub mod json;
    pub mod xml;
}

pub use calc::{calculate_annual_emissions, calculate_monthly_emission, round3};
pub use catalog::FactorCatalog;
pub use error::{Co2Error, ErrorKind, ErrorResponse, Result};
