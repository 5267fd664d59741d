use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{Currency, PluginError, Result};

/// An amount in a single currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: Decimal,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Rounds the amount to the currency's minor unit
    pub fn quantize(&self) -> Self {
        Self::new(self.currency.round(self.amount), self.currency)
    }

    /// Adds amounts of the same currency; fails on mismatch or overflow
    pub fn checked_add(&self, other: Money) -> Result<Money> {
        self.ensure_same_currency(other.currency)?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| self.overflow("addition"))?;
        Ok(Self::new(amount, self.currency))
    }

    pub fn checked_sub(&self, other: Money) -> Result<Money> {
        self.ensure_same_currency(other.currency)?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| self.overflow("subtraction"))?;
        Ok(Self::new(amount, self.currency))
    }

    /// Multiplies by a decimal factor, failing on overflow
    pub fn checked_mul(&self, factor: Decimal) -> Result<Money> {
        let amount = self
            .amount
            .checked_mul(factor)
            .ok_or_else(|| self.overflow("multiplication"))?;
        Ok(Self::new(amount, self.currency))
    }

    /// Subtracts, flooring the result at zero
    pub fn saturating_sub(&self, other: Money) -> Result<Money> {
        let diff = self.checked_sub(other)?;
        Ok(diff.max_zero())
    }

    pub fn max_zero(&self) -> Self {
        Self::new(self.amount.max(Decimal::ZERO), self.currency)
    }

    pub fn times(&self, quantity: u32) -> Result<Money> {
        self.checked_mul(Decimal::from(quantity))
    }

    fn overflow(&self, operation: &str) -> PluginError {
        PluginError::validation(format!(
            "{} {} overflowed on amount {}",
            self.currency, operation, self.amount
        ))
    }

    fn ensure_same_currency(&self, other: Currency) -> Result<()> {
        if self.currency != other {
            return Err(PluginError::CurrencyMismatch {
                expected: self.currency,
                found: other,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.currency.format_amount(self.amount))
    }
}

/// A price with both its net and gross side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxedMoney {
    pub net: Money,
    pub gross: Money,
}

impl TaxedMoney {
    pub fn new(net: Money, gross: Money) -> Result<Self> {
        net.ensure_same_currency(gross.currency)?;
        Ok(Self { net, gross })
    }

    /// Net and gross set to the same amount, as the host does before taxes apply
    pub fn untaxed(base: Money) -> Self {
        Self {
            net: base,
            gross: base,
        }
    }

    pub fn zero(currency: Currency) -> Self {
        Self::untaxed(Money::zero(currency))
    }

    pub fn currency(&self) -> Currency {
        self.net.currency
    }

    /// Tax portion, always `gross - net`
    pub fn tax(&self) -> Money {
        Money::new(self.gross.amount - self.net.amount, self.currency())
    }

    /// Whether a plugin already split this price into net and gross
    pub fn is_taxed(&self) -> bool {
        self.net != self.gross
    }

    pub fn checked_add(&self, other: TaxedMoney) -> Result<TaxedMoney> {
        Ok(Self {
            net: self.net.checked_add(other.net)?,
            gross: self.gross.checked_add(other.gross)?,
        })
    }

    /// Sums taxed values; an empty iterator yields zero in `currency`
    pub fn sum<I>(currency: Currency, values: I) -> Result<TaxedMoney>
    where
        I: IntoIterator<Item = TaxedMoney>,
    {
        values
            .into_iter()
            .try_fold(TaxedMoney::zero(currency), |acc, value| acc.checked_add(value))
    }
}
