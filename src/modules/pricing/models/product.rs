use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::modules::taxes::models::{DEFAULT_TAX_RATE_NAME, META_CODE_KEY, META_DESCRIPTION_KEY};

pub type Metadata = BTreeMap<String, String>;

/// Host objects carrying free-form metadata
pub trait HasMetadata {
    fn metadata(&self) -> &Metadata;

    fn metadata_mut(&mut self) -> &mut Metadata;

    /// Tax code assumed when the metadata holds none
    fn default_tax_code(&self) -> Option<&'static str> {
        None
    }

    fn get_value_from_metadata(&self, key: &str) -> Option<&str> {
        self.metadata().get(key).map(String::as_str)
    }

    fn store_value_in_metadata(&mut self, items: &[(&str, &str)]) {
        let metadata = self.metadata_mut();
        for (key, value) in items {
            metadata.insert((*key).to_string(), (*value).to_string());
        }
    }

    fn delete_value_from_metadata(&mut self, key: &str) {
        self.metadata_mut().remove(key);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductType {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl ProductType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            metadata: Metadata::new(),
        }
    }

    pub fn with_tax_code(mut self, code: &str) -> Self {
        self.store_value_in_metadata(&[(META_CODE_KEY, code), (META_DESCRIPTION_KEY, code)]);
        self
    }
}

impl HasMetadata for ProductType {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }

    // Product types fall back to the standard rate
    fn default_tax_code(&self) -> Option<&'static str> {
        Some(DEFAULT_TAX_RATE_NAME)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    /// When false the product is sold without tax
    pub charge_taxes: bool,
    #[serde(default)]
    pub metadata: Metadata,
    pub product_type: ProductType,
}

impl Product {
    pub fn new(name: impl Into<String>, product_type: ProductType) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            charge_taxes: true,
            metadata: Metadata::new(),
            product_type,
        }
    }

    pub fn with_tax_code(mut self, code: &str) -> Self {
        self.store_value_in_metadata(&[(META_CODE_KEY, code), (META_DESCRIPTION_KEY, code)]);
        self
    }

    pub fn without_taxes(mut self) -> Self {
        self.charge_taxes = false;
        self
    }
}

impl HasMetadata for Product {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}
