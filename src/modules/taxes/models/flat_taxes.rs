use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::str::FromStr;

use super::tax::{TaxRate, TaxType, DEFAULT_TAX_RATE_NAME};
use crate::core::{PluginError, Result};

pub const FLAT_TAXES_FIELD: &str = "flat_taxes";

/// Named flat rates, e.g. `{"standard": 10, "reduced": 5}`
///
/// Always holds a `standard` entry; it is the fallback for any name not in
/// the table and the rate applied to shipping. Serializes to the same object
/// of percentages the host stores, and deserializing runs the same checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct FlatTaxes {
    rates: BTreeMap<String, TaxRate>,
}

impl FlatTaxes {
    pub fn new(rates: BTreeMap<String, TaxRate>) -> Result<Self> {
        if !rates.contains_key(DEFAULT_TAX_RATE_NAME) {
            return Err(PluginError::required(
                FLAT_TAXES_FIELD,
                format!("A '{}' tax rate must be configured", DEFAULT_TAX_RATE_NAME),
            ));
        }
        Ok(Self { rates })
    }

    /// Parse the administrator-entered JSON object of percentages
    pub fn from_json(raw: &str) -> Result<Self> {
        let parsed: Value = serde_json::from_str(raw).map_err(|_| {
            PluginError::invalid(FLAT_TAXES_FIELD, "flat_taxes must be a valid JSON string")
        })?;

        let object = parsed.as_object().ok_or_else(|| {
            PluginError::invalid(FLAT_TAXES_FIELD, "flat_taxes must be a JSON object")
        })?;

        Self::from_object(object)
    }

    /// Build from an already parsed object of percentages
    pub fn from_object(object: &Map<String, Value>) -> Result<Self> {
        if !object.values().all(Value::is_number) {
            return Err(PluginError::invalid(
                FLAT_TAXES_FIELD,
                "All tax items must be valid",
            ));
        }

        let mut rates = BTreeMap::new();
        for (name, value) in object {
            let percentage = Decimal::from_str(&value.to_string())
                .or_else(|_| Decimal::from_scientific(&value.to_string()))
                .map_err(|_| {
                    PluginError::invalid(
                        FLAT_TAXES_FIELD,
                        format!("Tax '{}' has an unreadable value {}", name, value),
                    )
                })?;

            let rate = TaxRate::from_percentage(percentage).map_err(|_| {
                PluginError::invalid(
                    FLAT_TAXES_FIELD,
                    format!(
                        "Tax '{}' must be at least 0 and below 100 percent, got {}",
                        name, percentage
                    ),
                )
            })?;
            rates.insert(name.clone(), rate);
        }

        Self::new(rates)
    }

    /// Rate for `name`, falling back to `standard`
    pub fn rate_for(&self, name: &str) -> TaxRate {
        self.rates
            .get(name)
            .copied()
            .unwrap_or_else(|| self.standard())
    }

    pub fn standard(&self) -> TaxRate {
        // Presence is checked in `new`
        self.rates
            .get(DEFAULT_TAX_RATE_NAME)
            .copied()
            .unwrap_or(TaxRate::ZERO)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.rates.contains_key(name)
    }

    /// One tax type per rate name, sorted by code
    pub fn tax_types(&self) -> Vec<TaxType> {
        self.rates
            .keys()
            .map(|name| TaxType::new(name.as_str(), name.as_str()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TaxRate)> {
        self.rates.iter().map(|(name, rate)| (name.as_str(), *rate))
    }

    /// Object of percentages, the form stored by the host
    pub fn to_object(&self) -> Map<String, Value> {
        self.rates
            .iter()
            .map(|(name, rate)| {
                let percentage = rate.as_percentage();
                let value = serde_json::from_str(&percentage.to_string())
                    .unwrap_or_else(|_| Value::String(percentage.to_string()));
                (name.clone(), value)
            })
            .collect()
    }

    pub fn to_json(&self) -> String {
        Value::Object(self.to_object()).to_string()
    }
}

impl TryFrom<Map<String, Value>> for FlatTaxes {
    type Error = PluginError;

    fn try_from(object: Map<String, Value>) -> Result<Self> {
        Self::from_object(&object)
    }
}

impl From<FlatTaxes> for Map<String, Value> {
    fn from(taxes: FlatTaxes) -> Self {
        taxes.to_object()
    }
}
