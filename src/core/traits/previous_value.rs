use rust_decimal::Decimal;

use crate::core::money::TaxedMoney;
use crate::modules::taxes::models::TaxData;

/// Tells whether a previous plugin in the chain already produced taxes.
///
/// A plugin hands the previous value back untouched when this returns true.
pub trait AlreadyTaxed {
    fn already_taxed(&self) -> bool;
}

impl AlreadyTaxed for TaxedMoney {
    fn already_taxed(&self) -> bool {
        self.is_taxed()
    }
}

// Rates carry no net/gross split to inspect
impl AlreadyTaxed for Decimal {
    fn already_taxed(&self) -> bool {
        false
    }
}

impl AlreadyTaxed for TaxData {
    fn already_taxed(&self) -> bool {
        false
    }
}

impl<T: AlreadyTaxed> AlreadyTaxed for Option<T> {
    fn already_taxed(&self) -> bool {
        self.as_ref().is_some_and(AlreadyTaxed::already_taxed)
    }
}
