pub mod models;
pub mod services;

pub use models::{FlatTaxes, TaxData, TaxLineData, TaxRate, TaxType};
pub use services::FlatTaxCalculator;
