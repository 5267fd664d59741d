pub mod tax_calculator;

pub use tax_calculator::{compute, FlatTaxCalculator};
