use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::product::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoucherType {
    EntireOrder,
    Shipping,
    SpecificProduct,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voucher {
    pub code: String,
    pub voucher_type: VoucherType,
    /// Products a `SpecificProduct` voucher is limited to
    #[serde(default)]
    pub product_ids: Vec<Uuid>,
}

impl Voucher {
    pub fn new(code: impl Into<String>, voucher_type: VoucherType) -> Self {
        Self {
            code: code.into(),
            voucher_type,
            product_ids: Vec::new(),
        }
    }

    pub fn for_products(code: impl Into<String>, product_ids: Vec<Uuid>) -> Self {
        Self {
            code: code.into(),
            voucher_type: VoucherType::SpecificProduct,
            product_ids,
        }
    }

    pub fn is_shipping(&self) -> bool {
        self.voucher_type == VoucherType::Shipping
    }

    /// Whether the voucher discount is spread onto lines with this product
    pub fn applies_to_line(&self, product: &Product) -> bool {
        match self.voucher_type {
            VoucherType::EntireOrder => true,
            VoucherType::Shipping => false,
            VoucherType::SpecificProduct => self.product_ids.contains(&product.id),
        }
    }
}
