use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const PRICES_ENTERED_WITH_TAX_FIELD: &str = "prices_entered_with_tax";
pub const CHARGE_TAXES_ON_SHIPPING_FIELD: &str = "charge_taxes_on_shipping";

/// One `name`/`value` pair as kept by the host's plugin configuration store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationItem {
    pub name: String,
    pub value: Value,
}

impl ConfigurationItem {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Stored configuration of one plugin instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginConfiguration {
    pub active: bool,
    pub configuration: Vec<ConfigurationItem>,
}

impl PluginConfiguration {
    pub fn new(active: bool, configuration: Vec<ConfigurationItem>) -> Self {
        Self {
            active,
            configuration,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.configuration
            .iter()
            .find(|item| item.name == name)
            .map(|item| &item.value)
    }

    /// Replace or append the item called `name`
    pub fn set(&mut self, name: &str, value: Value) {
        match self.configuration.iter_mut().find(|item| item.name == name) {
            Some(item) => item.value = value,
            None => self.configuration.push(ConfigurationItem::new(name, value)),
        }
    }
}

/// Input widget the host renders for a configuration field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigurationTypeField {
    Multiline,
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationField {
    pub name: &'static str,
    pub field_type: ConfigurationTypeField,
    pub label: &'static str,
    pub help_text: &'static str,
}

/// Configuration installed with a fresh plugin instance
pub fn default_configuration() -> Vec<ConfigurationItem> {
    vec![
        ConfigurationItem::new(
            crate::modules::taxes::models::FLAT_TAXES_FIELD,
            json!(r#"{"standard": 10, "custom": 10}"#),
        ),
        ConfigurationItem::new(PRICES_ENTERED_WITH_TAX_FIELD, json!(true)),
        ConfigurationItem::new(CHARGE_TAXES_ON_SHIPPING_FIELD, json!(true)),
    ]
}

pub fn config_structure() -> Vec<ConfigurationField> {
    vec![
        ConfigurationField {
            name: crate::modules::taxes::models::FLAT_TAXES_FIELD,
            field_type: ConfigurationTypeField::Multiline,
            label: "Flat Taxes",
            help_text: "Enter a valid JSON object with the tax name as key and tax percentage \
                        as value. A \"standard\" tax is required.",
        },
        ConfigurationField {
            name: PRICES_ENTERED_WITH_TAX_FIELD,
            field_type: ConfigurationTypeField::Boolean,
            label: "Prices entered with tax",
            help_text: "Treat catalogue prices as gross amounts and derive the net from them.",
        },
        ConfigurationField {
            name: CHARGE_TAXES_ON_SHIPPING_FIELD,
            field_type: ConfigurationTypeField::Boolean,
            label: "Charge taxes on shipping",
            help_text: "Apply the standard tax to shipping prices.",
        },
    ]
}
