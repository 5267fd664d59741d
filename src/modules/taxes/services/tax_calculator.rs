use rust_decimal::Decimal;
use tracing::debug;

use crate::core::{Money, PluginError, Result, TaxedMoney};
use crate::modules::taxes::models::TaxRate;

/// Applies one flat rate to money amounts.
///
/// The rate is read from configuration by the caller; the calculator itself
/// holds no other state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatTaxCalculator {
    rate: TaxRate,
    prices_entered_with_tax: bool,
}

impl FlatTaxCalculator {
    pub fn new(rate: TaxRate, prices_entered_with_tax: bool) -> Self {
        Self {
            rate,
            prices_entered_with_tax,
        }
    }

    pub fn rate(&self) -> TaxRate {
        self.rate
    }

    pub fn prices_entered_with_tax(&self) -> bool {
        self.prices_entered_with_tax
    }

    /// Split `amount` into net, gross and tax.
    ///
    /// With prices entered with tax, `amount` is the gross and the net is
    /// `amount / (1 + rate)`. Otherwise `amount` is the net and the tax is
    /// `amount * rate`. Rounding to the currency's minor unit happens once, on
    /// the derived side, so `gross == net + tax` holds exactly.
    pub fn compute(&self, amount: Money) -> Result<TaxedMoney> {
        if amount.amount < Decimal::ZERO {
            return Err(PluginError::validation(format!(
                "Amount to tax cannot be negative, got {}",
                amount.amount
            )));
        }

        let currency = amount.currency;
        let rate = self.rate.as_fraction();

        let taxed = if self.prices_entered_with_tax {
            let gross = amount.quantize();
            let net = amount
                .amount
                .checked_div(Decimal::ONE + rate)
                .ok_or_else(|| overflow(amount))?;
            TaxedMoney::new(Money::new(currency.round(net), currency), gross)?
        } else {
            let net = amount.quantize();
            let tax = amount.checked_mul(rate)?.quantize();
            TaxedMoney::new(net, net.checked_add(tax)?)?
        };

        debug!(
            currency = %currency,
            rate = %self.rate,
            prices_entered_with_tax = self.prices_entered_with_tax,
            net = %taxed.net.amount,
            gross = %taxed.gross.amount,
            "Applied flat tax"
        );

        Ok(taxed)
    }

    /// Re-tax a value that already has a net/gross split.
    ///
    /// The gross is kept when prices are entered with tax, the net otherwise.
    pub fn compute_taxed(&self, base: TaxedMoney) -> Result<TaxedMoney> {
        let anchor = if self.prices_entered_with_tax {
            base.gross
        } else {
            base.net
        };
        self.compute(anchor)
    }
}

fn overflow(amount: Money) -> PluginError {
    PluginError::validation(format!("Tax computation overflowed on {}", amount.amount))
}

/// One-shot form of [`FlatTaxCalculator::compute`] taking a raw fraction.
///
/// Fails with a configuration error when `rate` lies outside `[0, 1)`.
pub fn compute(amount: Money, rate: Decimal, prices_entered_with_tax: bool) -> Result<TaxedMoney> {
    let rate = TaxRate::new(rate)?;
    FlatTaxCalculator::new(rate, prices_entered_with_tax).compute(amount)
}
