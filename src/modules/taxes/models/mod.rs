pub mod flat_taxes;
pub mod tax;

pub use flat_taxes::{FlatTaxes, FLAT_TAXES_FIELD};
pub use tax::{
    TaxData, TaxLineData, TaxRate, TaxType, DEFAULT_TAX_RATE_NAME, META_CODE_KEY,
    META_DESCRIPTION_KEY,
};
