use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::channel::{Address, Channel};
use super::product::Product;
use super::voucher::Voucher;
use crate::core::{Currency, Money, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutLine {
    pub id: Uuid,
    pub product: Product,
    pub quantity: u32,
    /// Channel listing price of one unit, before vouchers and taxes
    pub unit_price: Money,
}

impl CheckoutLine {
    pub fn new(product: Product, quantity: u32, unit_price: Money) -> Self {
        Self {
            id: Uuid::new_v4(),
            product,
            quantity,
            unit_price,
        }
    }

    pub fn base_total(&self) -> Result<Money> {
        self.unit_price.times(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryMethod {
    pub name: String,
    pub price: Money,
}

/// Everything the host knows about a checkout when asking for prices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutInfo {
    pub id: Uuid,
    pub channel: Channel,
    pub lines: Vec<CheckoutLine>,
    pub shipping_address: Option<Address>,
    pub delivery_method: Option<DeliveryMethod>,
    pub voucher: Option<Voucher>,
    /// Discount granted by the attached voucher
    pub discount: Money,
}

impl CheckoutInfo {
    pub fn new(channel: Channel) -> Self {
        let currency = channel.currency;
        Self {
            id: Uuid::new_v4(),
            channel,
            lines: Vec::new(),
            shipping_address: None,
            delivery_method: None,
            voucher: None,
            discount: Money::zero(currency),
        }
    }

    pub fn currency(&self) -> Currency {
        self.channel.currency
    }

    pub fn line_index(&self, line_id: Uuid) -> Option<usize> {
        self.lines.iter().position(|line| line.id == line_id)
    }
}
