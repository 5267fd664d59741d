use rust_decimal::Decimal;

use crate::core::{Money, Result, TaxedMoney};
use crate::modules::pricing::models::{
    Address, CheckoutInfo, CheckoutLine, HasMetadata, Order, OrderLine, Product,
};
use crate::modules::taxes::models::{TaxData, TaxType};

/// Tax extension points the host calls on every registered plugin.
///
/// Each hook receives the value produced by the previous plugin in the chain
/// and returns the value handed to the next one. The defaults pass the
/// previous value through, so a plugin only overrides the hooks it handles.
pub trait TaxPlugin: Send + Sync {
    /// Stable identifier used by the host registry
    fn id(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    fn is_active(&self) -> bool;

    fn calculate_checkout_total(
        &self,
        _checkout: &CheckoutInfo,
        _address: Option<&Address>,
        previous_value: TaxedMoney,
    ) -> Result<TaxedMoney> {
        Ok(previous_value)
    }

    fn calculate_checkout_subtotal(
        &self,
        _checkout: &CheckoutInfo,
        _address: Option<&Address>,
        previous_value: TaxedMoney,
    ) -> Result<TaxedMoney> {
        Ok(previous_value)
    }

    fn calculate_checkout_shipping(
        &self,
        _checkout: &CheckoutInfo,
        _address: Option<&Address>,
        previous_value: TaxedMoney,
    ) -> Result<TaxedMoney> {
        Ok(previous_value)
    }

    fn calculate_checkout_line_total(
        &self,
        _checkout: &CheckoutInfo,
        _line: &CheckoutLine,
        _address: Option<&Address>,
        previous_value: TaxedMoney,
    ) -> Result<TaxedMoney> {
        Ok(previous_value)
    }

    fn calculate_checkout_line_unit_price(
        &self,
        _checkout: &CheckoutInfo,
        _line: &CheckoutLine,
        _address: Option<&Address>,
        previous_value: TaxedMoney,
    ) -> Result<TaxedMoney> {
        Ok(previous_value)
    }

    fn calculate_order_total(
        &self,
        _order: &Order,
        previous_value: TaxedMoney,
    ) -> Result<TaxedMoney> {
        Ok(previous_value)
    }

    fn calculate_order_shipping(
        &self,
        _order: &Order,
        previous_value: TaxedMoney,
    ) -> Result<TaxedMoney> {
        Ok(previous_value)
    }

    fn calculate_order_line_total(
        &self,
        _order: &Order,
        _line: &OrderLine,
        previous_value: TaxedMoney,
    ) -> Result<TaxedMoney> {
        Ok(previous_value)
    }

    /// Rewrite the prices stored on the order lines
    fn update_taxes_for_order_lines(
        &self,
        _order: &Order,
        lines: Vec<OrderLine>,
    ) -> Result<Vec<OrderLine>> {
        Ok(lines)
    }

    fn get_taxes_for_order(
        &self,
        _order: &Order,
        previous_value: Option<TaxData>,
    ) -> Result<Option<TaxData>> {
        Ok(previous_value)
    }

    fn get_checkout_line_tax_rate(
        &self,
        _checkout: &CheckoutInfo,
        _line: &CheckoutLine,
        _address: Option<&Address>,
        previous_value: Decimal,
    ) -> Decimal {
        previous_value
    }

    fn get_order_line_tax_rate(
        &self,
        _order: &Order,
        _product: &Product,
        _address: Option<&Address>,
        previous_value: Decimal,
    ) -> Decimal {
        previous_value
    }

    fn get_checkout_shipping_tax_rate(
        &self,
        _checkout: &CheckoutInfo,
        _address: Option<&Address>,
        previous_value: Decimal,
    ) -> Decimal {
        previous_value
    }

    fn get_order_shipping_tax_rate(&self, _order: &Order, previous_value: Decimal) -> Decimal {
        previous_value
    }

    fn get_tax_rate_type_choices(&self, previous_value: Vec<TaxType>) -> Vec<TaxType> {
        previous_value
    }

    fn show_taxes_on_storefront(&self, previous_value: bool) -> bool {
        previous_value
    }

    fn apply_taxes_to_shipping(
        &self,
        _price: Money,
        _address: Option<&Address>,
        previous_value: TaxedMoney,
    ) -> Result<TaxedMoney> {
        Ok(previous_value)
    }

    fn apply_taxes_to_product(
        &self,
        _product: &Product,
        _price: Money,
        _country: Option<&str>,
        previous_value: TaxedMoney,
    ) -> Result<TaxedMoney> {
        Ok(previous_value)
    }

    fn assign_tax_code_to_object_meta(&self, _obj: &mut dyn HasMetadata, _tax_code: Option<&str>) {}

    fn get_tax_code_from_object_meta(
        &self,
        _obj: &dyn HasMetadata,
        previous_value: TaxType,
    ) -> TaxType {
        previous_value
    }
}

/// Static registration data the host registry discovers plugins by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginDescriptor {
    pub id: &'static str,
    pub name: &'static str,
}
