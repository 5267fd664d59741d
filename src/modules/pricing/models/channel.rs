use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::Currency;

/// Sales channel the host prices checkouts and orders in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: Uuid,
    pub slug: String,
    pub currency: Currency,
}

impl Channel {
    pub fn new(slug: impl Into<String>, currency: Currency) -> Self {
        Self {
            id: Uuid::new_v4(),
            slug: slug.into(),
            currency,
        }
    }
}

/// Customer address; flat taxes never look past it, but hooks receive it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// ISO 3166-1 alpha-2 country code
    pub country: String,
    pub city: Option<String>,
    pub postal_code: Option<String>,
}

impl Address {
    pub fn in_country(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            city: None,
            postal_code: None,
        }
    }
}
