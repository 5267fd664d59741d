use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::channel::{Address, Channel};
use super::product::Product;
use super::voucher::VoucherType;
use crate::core::{Currency, Money, Result, TaxedMoney};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: Uuid,
    /// None once the variant behind the line has been deleted
    pub product: Option<Product>,
    pub quantity: u32,
    pub base_unit_price: Money,
    pub undiscounted_base_unit_price: Money,
    pub unit_price: TaxedMoney,
    pub undiscounted_unit_price: TaxedMoney,
    pub total_price: TaxedMoney,
    pub undiscounted_total_price: TaxedMoney,
    /// Fraction, not percent
    pub tax_rate: Decimal,
}

impl OrderLine {
    /// Line with untaxed prices, as stored before any tax plugin runs
    pub fn new(product: Option<Product>, quantity: u32, base_unit_price: Money) -> Result<Self> {
        let unit_price = TaxedMoney::untaxed(base_unit_price);
        let total_price = TaxedMoney::untaxed(base_unit_price.times(quantity)?);
        Ok(Self {
            id: Uuid::new_v4(),
            product,
            quantity,
            base_unit_price,
            undiscounted_base_unit_price: base_unit_price,
            unit_price,
            undiscounted_unit_price: unit_price,
            total_price,
            undiscounted_total_price: total_price,
            tax_rate: Decimal::ZERO,
        })
    }

    pub fn base_total(&self) -> Result<Money> {
        self.base_unit_price.times(self.quantity)
    }

    pub fn undiscounted_base_total(&self) -> Result<Money> {
        self.undiscounted_base_unit_price.times(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingMethod {
    pub name: String,
    /// Price in the order's channel
    pub price: Money,
}

/// Discount recorded on an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDiscount {
    pub amount: Money,
    /// Set for voucher discounts, None for manual ones
    pub voucher_type: Option<VoucherType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub channel: Channel,
    pub lines: Vec<OrderLine>,
    pub shipping_method: Option<ShippingMethod>,
    pub shipping_address: Option<Address>,
    pub billing_address: Option<Address>,
    #[serde(default)]
    pub discounts: Vec<OrderDiscount>,
}

impl Order {
    pub fn new(channel: Channel) -> Self {
        Self {
            id: Uuid::new_v4(),
            channel,
            lines: Vec::new(),
            shipping_method: None,
            shipping_address: None,
            billing_address: None,
            discounts: Vec::new(),
        }
    }

    pub fn currency(&self) -> Currency {
        self.channel.currency
    }

    /// Shipping address, or the billing address when nothing is shipped
    pub fn address(&self) -> Option<&Address> {
        self.shipping_address
            .as_ref()
            .or(self.billing_address.as_ref())
    }

    pub fn total_discount_excluding_shipping(&self) -> Result<Money> {
        self.sum_discounts(|discount| discount.voucher_type != Some(VoucherType::Shipping))
    }

    pub fn shipping_discount(&self) -> Result<Money> {
        self.sum_discounts(|discount| discount.voucher_type == Some(VoucherType::Shipping))
    }

    fn sum_discounts(&self, include: impl Fn(&OrderDiscount) -> bool) -> Result<Money> {
        self.discounts
            .iter()
            .filter(|discount| include(discount))
            .try_fold(Money::zero(self.currency()), |acc, discount| {
                acc.checked_add(discount.amount)
            })
    }
}
