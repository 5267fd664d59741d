use crate::core::{PluginError, Result};
use crate::modules::taxes::models::{FlatTaxes, TaxRate, FLAT_TAXES_FIELD};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;

pub mod plugin_configuration;

pub use plugin_configuration::{
    config_structure, default_configuration, ConfigurationField, ConfigurationItem,
    ConfigurationTypeField, PluginConfiguration, CHARGE_TAXES_ON_SHIPPING_FIELD,
    PRICES_ENTERED_WITH_TAX_FIELD,
};

/// Validated flat tax plugin configuration
///
/// The serialized form keeps `flat_taxes` as the host's object of
/// percentages, so it can be stored back as a configuration item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub active: bool,
    pub flat_taxes: FlatTaxes,
    /// Catalogue prices are gross amounts
    pub prices_entered_with_tax: bool,
    pub charge_taxes_on_shipping: bool,
}

impl Config {
    /// Build from the host's stored plugin configuration
    pub fn from_configuration(configuration: &PluginConfiguration) -> Result<Self> {
        let flat_taxes = match configuration.get(FLAT_TAXES_FIELD) {
            Some(Value::String(raw)) => FlatTaxes::from_json(raw)?,
            Some(Value::Object(object)) => FlatTaxes::from_object(object)?,
            Some(Value::Null) | None => {
                return Err(PluginError::required(
                    FLAT_TAXES_FIELD,
                    "flat_taxes must be configured",
                ))
            }
            Some(_) => {
                return Err(PluginError::invalid(
                    FLAT_TAXES_FIELD,
                    "flat_taxes must be a valid JSON string",
                ))
            }
        };

        let config = Config {
            active: configuration.active,
            flat_taxes,
            prices_entered_with_tax: read_flag(configuration, PRICES_ENTERED_WITH_TAX_FIELD)?,
            charge_taxes_on_shipping: read_flag(configuration, CHARGE_TAXES_ON_SHIPPING_FIELD)?,
        };
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup using the environment variable names
    ///
    /// - `FLAT_TAX_ACTIVE` (default true)
    /// - `FLAT_TAXES` (required JSON object of percentages)
    /// - `PRICES_ENTERED_WITH_TAX` (default true)
    /// - `CHARGE_TAXES_ON_SHIPPING` (default true)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_taxes = lookup("FLAT_TAXES")
            .ok_or_else(|| PluginError::required(FLAT_TAXES_FIELD, "FLAT_TAXES not set"))?;

        let config = Config {
            active: parse_flag("active", lookup("FLAT_TAX_ACTIVE"))?,
            flat_taxes: FlatTaxes::from_json(&raw_taxes)?,
            prices_entered_with_tax: parse_flag(
                PRICES_ENTERED_WITH_TAX_FIELD,
                lookup("PRICES_ENTERED_WITH_TAX"),
            )?,
            charge_taxes_on_shipping: parse_flag(
                CHARGE_TAXES_ON_SHIPPING_FIELD,
                lookup("CHARGE_TAXES_ON_SHIPPING"),
            )?,
        };
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.flat_taxes.iter().any(|(name, _)| name.trim().is_empty()) {
            return Err(PluginError::invalid(
                FLAT_TAXES_FIELD,
                "Tax names cannot be empty",
            ));
        }

        Ok(())
    }

    /// Configuration a fresh plugin instance starts with
    pub fn defaults() -> Result<Self> {
        Self::from_configuration(&PluginConfiguration::new(true, default_configuration()))
    }

    pub fn standard_rate(&self) -> TaxRate {
        self.flat_taxes.standard()
    }
}

fn read_flag(configuration: &PluginConfiguration, field: &str) -> Result<bool> {
    match configuration.get(field) {
        None | Some(Value::Null) => Ok(true),
        Some(Value::Bool(flag)) => Ok(*flag),
        Some(Value::String(raw)) => parse_flag(field, Some(raw.clone())),
        Some(other) => Err(PluginError::invalid(
            field,
            format!("{} must be a boolean, got {}", field, other),
        )),
    }
}

fn parse_flag(field: &str, raw: Option<String>) -> Result<bool> {
    let Some(raw) = raw else {
        return Ok(true);
    };

    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(PluginError::invalid(
            field,
            format!("{} must be a boolean, got '{}'", field, raw),
        )),
    }
}
