use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{PluginError, Result};

/// Metadata key holding the tax code assigned to a product or product type
pub const META_CODE_KEY: &str = "flattax.code";

/// Metadata key holding the tax code description
pub const META_DESCRIPTION_KEY: &str = "flattax.description";

/// Rate name used for shipping and as fallback for unknown codes
pub const DEFAULT_TAX_RATE_NAME: &str = "standard";

/// A flat tax rate stored as a fraction (0.08 for 8%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct TaxRate(Decimal);

impl TaxRate {
    pub const ZERO: TaxRate = TaxRate(Decimal::ZERO);

    /// Build a rate from a fraction; must lie in `[0, 1)`
    pub fn new(fraction: Decimal) -> Result<Self> {
        if fraction < Decimal::ZERO {
            return Err(PluginError::invalid(
                "tax_rate",
                format!("Tax rate cannot be negative, got {}", fraction),
            ));
        }

        if fraction >= Decimal::ONE {
            return Err(PluginError::invalid(
                "tax_rate",
                format!("Tax rate must be below 1.0 (100%), got {}", fraction),
            ));
        }

        Ok(Self(fraction))
    }

    /// Build a rate from a percentage as entered by an administrator (10 for 10%)
    pub fn from_percentage(percentage: Decimal) -> Result<Self> {
        Self::new(percentage / Decimal::ONE_HUNDRED)
    }

    pub fn as_fraction(&self) -> Decimal {
        self.0
    }

    /// Rate in percent; the host expects 10 rather than 0.10 in tax breakdowns
    pub fn as_percentage(&self) -> Decimal {
        (self.0 * Decimal::ONE_HUNDRED).normalize()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl TryFrom<Decimal> for TaxRate {
    type Error = PluginError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

impl From<TaxRate> for Decimal {
    fn from(rate: TaxRate) -> Self {
        rate.0
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage())
    }
}

/// A selectable tax class, one per configured rate name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaxType {
    pub code: Option<String>,
    pub description: Option<String>,
}

impl TaxType {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            description: Some(description.into()),
        }
    }

    pub fn empty() -> Self {
        Self {
            code: None,
            description: None,
        }
    }
}

/// Tax breakdown of one order line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLineData {
    pub total_net_amount: Decimal,
    pub total_gross_amount: Decimal,
    /// Percent, not fraction
    pub tax_rate: Decimal,
}

/// Tax breakdown of a whole order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxData {
    pub shipping_price_net_amount: Decimal,
    pub shipping_price_gross_amount: Decimal,
    /// Percent, not fraction
    pub shipping_tax_rate: Decimal,
    pub lines: Vec<TaxLineData>,
}
