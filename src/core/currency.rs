use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::error::PluginError;

/// Currencies known to the plugin, with their minor-unit precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Indonesian Rupiah (no decimal places)
    IDR,
    /// Japanese Yen (no decimal places)
    JPY,
    /// Malaysian Ringgit (2 decimal places)
    MYR,
    /// US Dollar (2 decimal places)
    USD,
    /// Euro (2 decimal places)
    EUR,
    /// Pound Sterling (2 decimal places)
    GBP,
}

impl Currency {
    /// Returns the minor-unit scale for this currency
    /// - IDR/JPY: 0 (no decimals)
    /// - MYR/USD/EUR/GBP: 2
    pub fn scale(&self) -> u32 {
        match self {
            Currency::IDR | Currency::JPY => 0,
            Currency::MYR | Currency::USD | Currency::EUR | Currency::GBP => 2,
        }
    }

    /// Rounds to the minor unit, half up.
    ///
    /// Amounts handled here are never negative, so "midpoint away from zero"
    /// is the same as round-half-up.
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.scale(), RoundingStrategy::MidpointAwayFromZero)
    }

    /// Formats an amount for display with the correct decimal places
    pub fn format_amount(&self, amount: Decimal) -> String {
        let scale = self.scale();
        if scale == 0 {
            format!("{} {}", self, self.round(amount))
        } else {
            format!("{} {:.width$}", self, self.round(amount), width = scale as usize)
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::IDR => "IDR",
            Currency::JPY => "JPY",
            Currency::MYR => "MYR",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = PluginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "IDR" => Ok(Currency::IDR),
            "JPY" => Ok(Currency::JPY),
            "MYR" => Ok(Currency::MYR),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            _ => Err(PluginError::InvalidCurrency(s.to_string())),
        }
    }
}

impl TryFrom<&str> for Currency {
    type Error = PluginError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}
