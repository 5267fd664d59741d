pub mod previous_value;

pub use previous_value::AlreadyTaxed;
