use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, error, info};

use super::plugin_trait::TaxPlugin;
use crate::core::{Money, PluginError, Result, TaxedMoney};
use crate::modules::pricing::models::{
    Address, CheckoutInfo, CheckoutLine, HasMetadata, Order, OrderLine, Product,
};
use crate::modules::taxes::models::{TaxData, TaxType};

/// Runs each tax hook through the registered plugins in registration order.
///
/// The first plugin receives the host's untaxed value; every later plugin
/// receives whatever the one before it returned.
#[derive(Default)]
pub struct PluginsManager {
    plugins: Vec<Arc<dyn TaxPlugin>>,
}

impl PluginsManager {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Register a plugin at the end of the chain
    pub fn register_plugin(&mut self, plugin: Arc<dyn TaxPlugin>) {
        info!(
            plugin_id = %plugin.id(),
            active = plugin.is_active(),
            position = self.plugins.len(),
            "Registered tax plugin"
        );
        self.plugins.push(plugin);
    }

    /// Get a plugin by id
    pub fn get_plugin(&self, id: &str) -> Result<Arc<dyn TaxPlugin>> {
        self.plugins
            .iter()
            .find(|plugin| plugin.id() == id)
            .cloned()
            .ok_or_else(|| PluginError::NotFound(format!("Plugin '{}' not found", id)))
    }

    pub fn plugins(&self) -> &[Arc<dyn TaxPlugin>] {
        &self.plugins
    }

    fn run_taxed<F>(&self, hook: &'static str, default: TaxedMoney, call: F) -> Result<TaxedMoney>
    where
        F: Fn(&dyn TaxPlugin, TaxedMoney) -> Result<TaxedMoney>,
    {
        let mut value = default;
        for plugin in &self.plugins {
            value = call(plugin.as_ref(), value).map_err(|e| {
                error!(plugin_id = %plugin.id(), hook, error = %e, "Tax hook failed");
                e
            })?;
        }

        debug!(hook, net = %value.net, gross = %value.gross, "Tax hook chain finished");
        Ok(value)
    }

    fn run_rate<F>(&self, default: Decimal, call: F) -> Decimal
    where
        F: Fn(&dyn TaxPlugin, Decimal) -> Decimal,
    {
        self.plugins
            .iter()
            .fold(default, |value, plugin| call(plugin.as_ref(), value))
    }

    pub fn calculate_checkout_total(
        &self,
        checkout: &CheckoutInfo,
        address: Option<&Address>,
    ) -> Result<TaxedMoney> {
        let default = untaxed_checkout_total(checkout)?;
        self.run_taxed("calculate_checkout_total", default, |plugin, previous| {
            plugin.calculate_checkout_total(checkout, address, previous)
        })
    }

    pub fn calculate_checkout_subtotal(
        &self,
        checkout: &CheckoutInfo,
        address: Option<&Address>,
    ) -> Result<TaxedMoney> {
        let default = untaxed_checkout_subtotal(checkout)?;
        self.run_taxed("calculate_checkout_subtotal", default, |plugin, previous| {
            plugin.calculate_checkout_subtotal(checkout, address, previous)
        })
    }

    pub fn calculate_checkout_shipping(
        &self,
        checkout: &CheckoutInfo,
        address: Option<&Address>,
    ) -> Result<TaxedMoney> {
        let default = untaxed_checkout_shipping(checkout);
        self.run_taxed("calculate_checkout_shipping", default, |plugin, previous| {
            plugin.calculate_checkout_shipping(checkout, address, previous)
        })
    }

    pub fn calculate_checkout_line_total(
        &self,
        checkout: &CheckoutInfo,
        line: &CheckoutLine,
        address: Option<&Address>,
    ) -> Result<TaxedMoney> {
        let default = TaxedMoney::untaxed(line.base_total()?);
        self.run_taxed("calculate_checkout_line_total", default, |plugin, previous| {
            plugin.calculate_checkout_line_total(checkout, line, address, previous)
        })
    }

    pub fn calculate_checkout_line_unit_price(
        &self,
        checkout: &CheckoutInfo,
        line: &CheckoutLine,
        address: Option<&Address>,
    ) -> Result<TaxedMoney> {
        let default = TaxedMoney::untaxed(line.unit_price);
        self.run_taxed("calculate_checkout_line_unit_price", default, |plugin, previous| {
            plugin.calculate_checkout_line_unit_price(checkout, line, address, previous)
        })
    }

    pub fn calculate_order_total(&self, order: &Order) -> Result<TaxedMoney> {
        let default = untaxed_order_total(order)?;
        self.run_taxed("calculate_order_total", default, |plugin, previous| {
            plugin.calculate_order_total(order, previous)
        })
    }

    pub fn calculate_order_shipping(&self, order: &Order) -> Result<TaxedMoney> {
        let default = order
            .shipping_method
            .as_ref()
            .map(|method| TaxedMoney::untaxed(method.price))
            .unwrap_or_else(|| TaxedMoney::zero(order.currency()));
        self.run_taxed("calculate_order_shipping", default, |plugin, previous| {
            plugin.calculate_order_shipping(order, previous)
        })
    }

    pub fn calculate_order_line_total(
        &self,
        order: &Order,
        line: &OrderLine,
    ) -> Result<TaxedMoney> {
        let default = TaxedMoney::untaxed(line.base_total()?);
        self.run_taxed("calculate_order_line_total", default, |plugin, previous| {
            plugin.calculate_order_line_total(order, line, previous)
        })
    }

    pub fn update_taxes_for_order_lines(&self, order: &Order) -> Result<Vec<OrderLine>> {
        self.plugins
            .iter()
            .try_fold(order.lines.clone(), |lines, plugin| {
                plugin.update_taxes_for_order_lines(order, lines)
            })
    }

    pub fn get_taxes_for_order(&self, order: &Order) -> Result<Option<TaxData>> {
        self.plugins.iter().try_fold(None, |previous, plugin| {
            plugin.get_taxes_for_order(order, previous)
        })
    }

    pub fn get_checkout_line_tax_rate(
        &self,
        checkout: &CheckoutInfo,
        line: &CheckoutLine,
        address: Option<&Address>,
    ) -> Decimal {
        self.run_rate(Decimal::ZERO, |plugin, previous| {
            plugin.get_checkout_line_tax_rate(checkout, line, address, previous)
        })
    }

    pub fn get_order_line_tax_rate(
        &self,
        order: &Order,
        product: &Product,
        address: Option<&Address>,
    ) -> Decimal {
        self.run_rate(Decimal::ZERO, |plugin, previous| {
            plugin.get_order_line_tax_rate(order, product, address, previous)
        })
    }

    pub fn get_checkout_shipping_tax_rate(
        &self,
        checkout: &CheckoutInfo,
        address: Option<&Address>,
    ) -> Decimal {
        self.run_rate(Decimal::ZERO, |plugin, previous| {
            plugin.get_checkout_shipping_tax_rate(checkout, address, previous)
        })
    }

    pub fn get_order_shipping_tax_rate(&self, order: &Order) -> Decimal {
        self.run_rate(Decimal::ZERO, |plugin, previous| {
            plugin.get_order_shipping_tax_rate(order, previous)
        })
    }

    pub fn get_tax_rate_type_choices(&self) -> Vec<TaxType> {
        self.plugins
            .iter()
            .fold(Vec::new(), |previous, plugin| plugin.get_tax_rate_type_choices(previous))
    }

    pub fn show_taxes_on_storefront(&self) -> bool {
        self.plugins
            .iter()
            .fold(false, |previous, plugin| plugin.show_taxes_on_storefront(previous))
    }

    pub fn apply_taxes_to_shipping(
        &self,
        price: Money,
        address: Option<&Address>,
    ) -> Result<TaxedMoney> {
        let default = TaxedMoney::untaxed(price);
        self.run_taxed("apply_taxes_to_shipping", default, |plugin, previous| {
            plugin.apply_taxes_to_shipping(price, address, previous)
        })
    }

    pub fn apply_taxes_to_product(
        &self,
        product: &Product,
        price: Money,
        country: Option<&str>,
    ) -> Result<TaxedMoney> {
        let default = TaxedMoney::untaxed(price);
        self.run_taxed("apply_taxes_to_product", default, |plugin, previous| {
            plugin.apply_taxes_to_product(product, price, country, previous)
        })
    }

    pub fn assign_tax_code_to_object_meta(
        &self,
        obj: &mut dyn HasMetadata,
        tax_code: Option<&str>,
    ) {
        for plugin in &self.plugins {
            plugin.assign_tax_code_to_object_meta(obj, tax_code);
        }
    }

    pub fn get_tax_code_from_object_meta(&self, obj: &dyn HasMetadata) -> TaxType {
        self.plugins.iter().fold(TaxType::empty(), |previous, plugin| {
            plugin.get_tax_code_from_object_meta(obj, previous)
        })
    }
}

fn untaxed_checkout_subtotal(checkout: &CheckoutInfo) -> Result<TaxedMoney> {
    let totals = checkout
        .lines
        .iter()
        .map(|line| line.base_total().map(TaxedMoney::untaxed))
        .collect::<Result<Vec<_>>>()?;
    TaxedMoney::sum(checkout.currency(), totals)
}

fn untaxed_checkout_shipping(checkout: &CheckoutInfo) -> TaxedMoney {
    checkout
        .delivery_method
        .as_ref()
        .map(|method| TaxedMoney::untaxed(method.price))
        .unwrap_or_else(|| TaxedMoney::zero(checkout.currency()))
}

fn untaxed_checkout_total(checkout: &CheckoutInfo) -> Result<TaxedMoney> {
    let total = untaxed_checkout_subtotal(checkout)?
        .checked_add(untaxed_checkout_shipping(checkout))?
        .gross
        .saturating_sub(checkout.discount)?;
    Ok(TaxedMoney::untaxed(total))
}

fn untaxed_order_total(order: &Order) -> Result<TaxedMoney> {
    let currency = order.currency();
    let line_totals = order
        .lines
        .iter()
        .map(|line| line.base_total().map(TaxedMoney::untaxed))
        .collect::<Result<Vec<_>>>()?;
    let lines = TaxedMoney::sum(currency, line_totals)?;
    let shipping = order
        .shipping_method
        .as_ref()
        .map(|method| method.price)
        .unwrap_or_else(|| Money::zero(currency));
    let discount = order
        .total_discount_excluding_shipping()?
        .checked_add(order.shipping_discount()?)?;

    let total = lines.gross.checked_add(shipping)?.saturating_sub(discount)?;
    Ok(TaxedMoney::untaxed(total))
}
