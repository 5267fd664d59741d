use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::plugin_trait::{PluginDescriptor, TaxPlugin};
use crate::config::{Config, PluginConfiguration};
use crate::core::traits::AlreadyTaxed;
use crate::core::{Money, Result, TaxedMoney};
use crate::modules::pricing::models::{
    Address, Channel, CheckoutInfo, CheckoutLine, HasMetadata, Order, OrderLine, Product,
};
use crate::modules::pricing::services::{
    allocate_discount, apply_checkout_discount_on_checkout_line, checkout_line_discount,
    discounted_line_total, discounted_unit_price,
};
use crate::modules::taxes::models::{
    FlatTaxes, TaxData, TaxLineData, TaxRate, TaxType, META_CODE_KEY, META_DESCRIPTION_KEY,
};
use crate::modules::taxes::services::FlatTaxCalculator;

pub const PLUGIN_ID: &str = "taxes.flattax";
pub const PLUGIN_NAME: &str = "Flat Tax";

pub const DESCRIPTOR: PluginDescriptor = PluginDescriptor {
    id: PLUGIN_ID,
    name: PLUGIN_NAME,
};

/// Applies configured flat rates to every checkout and order price,
/// whatever the customer's country
#[derive(Debug, Clone)]
pub struct FlatTaxPlugin {
    config: Config,
    /// Channel the instance is bound to; None for a global instance
    channel: Option<Channel>,
}

impl FlatTaxPlugin {
    /// Build from the host's stored configuration, failing on invalid values
    pub fn new(configuration: &PluginConfiguration, channel: Option<Channel>) -> Result<Self> {
        let config = Config::from_configuration(configuration)?;
        Ok(Self::from_config(config, channel))
    }

    pub fn from_config(config: Config, channel: Option<Channel>) -> Self {
        Self { config, channel }
    }

    /// Check a configuration before the host saves it
    pub fn validate_plugin_configuration(configuration: &PluginConfiguration) -> Result<()> {
        match Config::from_configuration(configuration) {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!(plugin_id = PLUGIN_ID, error = %e, "Rejected plugin configuration");
                Err(e)
            }
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn channel(&self) -> Option<&Channel> {
        self.channel.as_ref()
    }

    fn skip_plugin(&self, hook: &'static str, previous_value: &impl AlreadyTaxed) -> bool {
        if !self.config.active {
            debug!(plugin_id = PLUGIN_ID, hook, "Plugin inactive, passing through");
            return true;
        }

        // A previous plugin already calculated taxes
        if previous_value.already_taxed() {
            debug!(plugin_id = PLUGIN_ID, hook, "Previous value already taxed, passing through");
            return true;
        }

        false
    }

    fn calculator(&self, rate: TaxRate) -> FlatTaxCalculator {
        FlatTaxCalculator::new(rate, self.config.prices_entered_with_tax)
    }

    /// Rate table (None when the product is sold untaxed) and rate name for a product
    fn tax_data_for_product(&self, product: &Product) -> (Option<&FlatTaxes>, Option<String>) {
        let taxes = product.charge_taxes.then_some(&self.config.flat_taxes);
        let rate_name = self
            .tax_code_from_object_meta(product)
            .code
            .or_else(|| self.tax_code_from_object_meta(&product.product_type).code);
        (taxes, rate_name)
    }

    fn apply_tax_to_price(
        &self,
        taxes: Option<&FlatTaxes>,
        rate_name: Option<&str>,
        price: Money,
    ) -> Result<TaxedMoney> {
        match (taxes, rate_name) {
            (Some(taxes), Some(rate_name)) => {
                self.calculator(taxes.rate_for(rate_name)).compute(price)
            }
            _ => Ok(TaxedMoney::untaxed(price)),
        }
    }

    fn apply_taxes_to_product_price(&self, product: &Product, price: Money) -> Result<TaxedMoney> {
        let (taxes, rate_name) = self.tax_data_for_product(product);
        self.apply_tax_to_price(taxes, rate_name.as_deref(), price)
    }

    /// Shipping always uses the standard rate, and only when shipping is taxed
    fn taxed_shipping_price(&self, price: Money) -> Result<TaxedMoney> {
        if !self.config.charge_taxes_on_shipping {
            return Ok(TaxedMoney::untaxed(price));
        }
        self.calculator(self.config.standard_rate()).compute(price)
    }

    fn tax_rate_for_product(&self, product: &Product, previous_value: Decimal) -> Decimal {
        if self.skip_plugin("tax_rate", &previous_value) {
            return previous_value;
        }

        match self.tax_data_for_product(product) {
            (Some(taxes), Some(rate_name)) => taxes.rate_for(&rate_name).as_fraction(),
            _ => previous_value,
        }
    }

    fn shipping_tax_rate(&self, previous_value: Decimal) -> Decimal {
        if self.skip_plugin("shipping_tax_rate", &previous_value) {
            return previous_value;
        }

        if !self.config.charge_taxes_on_shipping {
            return Decimal::ZERO;
        }
        self.config.standard_rate().as_fraction()
    }

    fn tax_code_from_object_meta(&self, obj: &dyn HasMetadata) -> TaxType {
        let code = obj
            .get_value_from_metadata(META_CODE_KEY)
            .or_else(|| obj.default_tax_code());
        let description = obj
            .get_value_from_metadata(META_DESCRIPTION_KEY)
            .or_else(|| obj.default_tax_code());

        TaxType {
            code: code.map(str::to_string),
            description: description.map(str::to_string),
        }
    }

    /// Taxed unit price of a checkout line after its voucher share
    fn checkout_line_unit_price(
        &self,
        checkout: &CheckoutInfo,
        line: &CheckoutLine,
    ) -> Result<TaxedMoney> {
        let unit_price =
            apply_checkout_discount_on_checkout_line(checkout, line, line.unit_price)?;
        self.apply_taxes_to_product_price(&line.product, unit_price)
    }

    /// Taxed total of a checkout line; the whole discounted total is taxed
    /// so rounding happens once per line
    fn checkout_line_total(
        &self,
        checkout: &CheckoutInfo,
        line: &CheckoutLine,
    ) -> Result<TaxedMoney> {
        let share = checkout_line_discount(checkout, line)?;
        let line_total = discounted_line_total(line.base_total()?, share)?;
        self.apply_taxes_to_product_price(&line.product, line_total)
    }
}

impl TaxPlugin for FlatTaxPlugin {
    fn id(&self) -> &str {
        PLUGIN_ID
    }

    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    fn is_active(&self) -> bool {
        self.config.active
    }

    fn calculate_checkout_total(
        &self,
        checkout: &CheckoutInfo,
        address: Option<&Address>,
        previous_value: TaxedMoney,
    ) -> Result<TaxedMoney> {
        if self.skip_plugin("calculate_checkout_total", &previous_value) {
            return Ok(previous_value);
        }

        let zero = TaxedMoney::zero(checkout.currency());
        let subtotal = self.calculate_checkout_subtotal(checkout, address, zero)?;
        let shipping = self.calculate_checkout_shipping(checkout, address, zero)?;
        subtotal.checked_add(shipping)
    }

    fn calculate_checkout_subtotal(
        &self,
        checkout: &CheckoutInfo,
        address: Option<&Address>,
        previous_value: TaxedMoney,
    ) -> Result<TaxedMoney> {
        if self.skip_plugin("calculate_checkout_subtotal", &previous_value) {
            return Ok(previous_value);
        }

        let currency = checkout.currency();
        let line_totals = checkout
            .lines
            .iter()
            .map(|line| {
                let zero = TaxedMoney::zero(currency);
                self.calculate_checkout_line_total(checkout, line, address, zero)
            })
            .collect::<Result<Vec<_>>>()?;
        TaxedMoney::sum(currency, line_totals)
    }

    fn calculate_checkout_shipping(
        &self,
        checkout: &CheckoutInfo,
        _address: Option<&Address>,
        previous_value: TaxedMoney,
    ) -> Result<TaxedMoney> {
        if self.skip_plugin("calculate_checkout_shipping", &previous_value) {
            return Ok(previous_value);
        }

        let Some(delivery_method) = checkout.delivery_method.as_ref() else {
            return Ok(previous_value);
        };

        let mut shipping_price = delivery_method.price;
        if checkout.voucher.as_ref().is_some_and(|voucher| voucher.is_shipping()) {
            shipping_price = shipping_price.saturating_sub(checkout.discount)?;
        }

        self.taxed_shipping_price(shipping_price)
    }

    fn calculate_checkout_line_total(
        &self,
        checkout: &CheckoutInfo,
        line: &CheckoutLine,
        _address: Option<&Address>,
        previous_value: TaxedMoney,
    ) -> Result<TaxedMoney> {
        if self.skip_plugin("calculate_checkout_line_total", &previous_value) {
            return Ok(previous_value);
        }

        self.checkout_line_total(checkout, line)
    }

    fn calculate_checkout_line_unit_price(
        &self,
        checkout: &CheckoutInfo,
        line: &CheckoutLine,
        _address: Option<&Address>,
        previous_value: TaxedMoney,
    ) -> Result<TaxedMoney> {
        if self.skip_plugin("calculate_checkout_line_unit_price", &previous_value) {
            return Ok(previous_value);
        }

        self.checkout_line_unit_price(checkout, line)
    }

    fn calculate_order_total(
        &self,
        order: &Order,
        previous_value: TaxedMoney,
    ) -> Result<TaxedMoney> {
        if self.skip_plugin("calculate_order_total", &previous_value) {
            return Ok(previous_value);
        }

        let currency = order.currency();
        let lines = self.update_taxes_for_order_lines(order, order.lines.clone())?;
        let subtotal = TaxedMoney::sum(currency, lines.iter().map(|line| line.total_price))?;
        let shipping = self.calculate_order_shipping(order, TaxedMoney::zero(currency))?;
        subtotal.checked_add(shipping)
    }

    fn calculate_order_shipping(
        &self,
        order: &Order,
        previous_value: TaxedMoney,
    ) -> Result<TaxedMoney> {
        if self.skip_plugin("calculate_order_shipping", &previous_value) {
            return Ok(previous_value);
        }

        let Some(shipping_method) = order.shipping_method.as_ref() else {
            return Ok(previous_value);
        };

        let shipping_price = shipping_method
            .price
            .saturating_sub(order.shipping_discount()?)?;
        self.taxed_shipping_price(shipping_price)
    }

    fn calculate_order_line_total(
        &self,
        order: &Order,
        line: &OrderLine,
        previous_value: TaxedMoney,
    ) -> Result<TaxedMoney> {
        if self.skip_plugin("calculate_order_line_total", &previous_value) {
            return Ok(previous_value);
        }

        // Discounts are spread over all lines, so the whole order is recomputed
        let lines = self.update_taxes_for_order_lines(order, order.lines.clone())?;
        Ok(lines
            .into_iter()
            .find(|updated| updated.id == line.id)
            .map(|updated| updated.total_price)
            .unwrap_or(previous_value))
    }

    fn update_taxes_for_order_lines(
        &self,
        order: &Order,
        mut lines: Vec<OrderLine>,
    ) -> Result<Vec<OrderLine>> {
        if !self.config.active {
            return Ok(lines);
        }

        let total_discount = order.total_discount_excluding_shipping()?;
        let line_totals = lines
            .iter()
            .map(OrderLine::base_total)
            .collect::<Result<Vec<Money>>>()?;
        let shares = allocate_discount(&line_totals, total_discount)?;

        for ((line, line_total), share) in lines.iter_mut().zip(line_totals).zip(shares) {
            let Some(product) = line.product.as_ref() else {
                continue;
            };

            let price_with_discounts = if share.is_zero() {
                line.base_unit_price
            } else {
                discounted_unit_price(line_total, share, line.quantity)?
            };

            // Totals are taxed as a whole, not as a rounded unit price times quantity
            let discounted_total = discounted_line_total(line_total, share)?;
            let total_price = self.apply_taxes_to_product_price(product, discounted_total)?;
            let undiscounted_total_price =
                self.apply_taxes_to_product_price(product, line.undiscounted_base_total()?)?;
            let unit_price = self.apply_taxes_to_product_price(product, price_with_discounts)?;
            let undiscounted_unit_price =
                self.apply_taxes_to_product_price(product, line.undiscounted_base_unit_price)?;
            let tax_rate = self.tax_rate_for_product(product, Decimal::ZERO);

            line.unit_price = unit_price;
            line.undiscounted_unit_price = undiscounted_unit_price;
            line.total_price = total_price;
            line.undiscounted_total_price = undiscounted_total_price;
            line.tax_rate = tax_rate;
        }

        debug!(
            plugin_id = PLUGIN_ID,
            order_id = %order.id,
            lines = lines.len(),
            discount = %total_discount.amount,
            "Updated taxes for order lines"
        );

        Ok(lines)
    }

    fn get_taxes_for_order(
        &self,
        order: &Order,
        previous_value: Option<TaxData>,
    ) -> Result<Option<TaxData>> {
        if self.skip_plugin("get_taxes_for_order", &previous_value) {
            return Ok(previous_value);
        }

        if let Some(channel) = self.channel.as_ref() {
            if channel.id != order.channel.id {
                debug!(
                    plugin_id = PLUGIN_ID,
                    channel = %channel.slug,
                    order_channel = %order.channel.slug,
                    "Order belongs to another channel"
                );
                return Ok(previous_value);
            }
        }

        let currency = order.currency();
        let lines = self
            .update_taxes_for_order_lines(order, order.lines.clone())?
            .into_iter()
            .map(|line| TaxLineData {
                total_net_amount: line.total_price.net.amount,
                total_gross_amount: line.total_price.gross.amount,
                tax_rate: percentage(
                    line.product
                        .as_ref()
                        .map(|product| self.tax_rate_for_product(product, Decimal::ZERO))
                        .unwrap_or(Decimal::ZERO),
                ),
            })
            .collect();

        let shipping = self.calculate_order_shipping(order, TaxedMoney::zero(currency))?;

        Ok(Some(TaxData {
            shipping_price_net_amount: shipping.net.amount,
            shipping_price_gross_amount: shipping.gross.amount,
            shipping_tax_rate: percentage(self.shipping_tax_rate(Decimal::ZERO)),
            lines,
        }))
    }

    fn get_checkout_line_tax_rate(
        &self,
        _checkout: &CheckoutInfo,
        line: &CheckoutLine,
        _address: Option<&Address>,
        previous_value: Decimal,
    ) -> Decimal {
        self.tax_rate_for_product(&line.product, previous_value)
    }

    fn get_order_line_tax_rate(
        &self,
        _order: &Order,
        product: &Product,
        _address: Option<&Address>,
        previous_value: Decimal,
    ) -> Decimal {
        self.tax_rate_for_product(product, previous_value)
    }

    fn get_checkout_shipping_tax_rate(
        &self,
        _checkout: &CheckoutInfo,
        _address: Option<&Address>,
        previous_value: Decimal,
    ) -> Decimal {
        self.shipping_tax_rate(previous_value)
    }

    fn get_order_shipping_tax_rate(&self, _order: &Order, previous_value: Decimal) -> Decimal {
        self.shipping_tax_rate(previous_value)
    }

    fn get_tax_rate_type_choices(&self, previous_value: Vec<TaxType>) -> Vec<TaxType> {
        if !self.config.active {
            return previous_value;
        }

        self.config.flat_taxes.tax_types()
    }

    fn show_taxes_on_storefront(&self, previous_value: bool) -> bool {
        if !self.config.active {
            return previous_value;
        }
        false
    }

    fn apply_taxes_to_shipping(
        &self,
        price: Money,
        _address: Option<&Address>,
        previous_value: TaxedMoney,
    ) -> Result<TaxedMoney> {
        if self.skip_plugin("apply_taxes_to_shipping", &previous_value) {
            return Ok(previous_value);
        }

        self.taxed_shipping_price(price)
    }

    fn apply_taxes_to_product(
        &self,
        product: &Product,
        price: Money,
        _country: Option<&str>,
        previous_value: TaxedMoney,
    ) -> Result<TaxedMoney> {
        if self.skip_plugin("apply_taxes_to_product", &previous_value) {
            return Ok(previous_value);
        }

        self.apply_taxes_to_product_price(product, price)
    }

    fn assign_tax_code_to_object_meta(&self, obj: &mut dyn HasMetadata, tax_code: Option<&str>) {
        if !self.config.active {
            return;
        }

        match tax_code {
            None => {
                obj.delete_value_from_metadata(META_CODE_KEY);
                obj.delete_value_from_metadata(META_DESCRIPTION_KEY);
            }
            Some(code) => {
                obj.store_value_in_metadata(&[(META_CODE_KEY, code), (META_DESCRIPTION_KEY, code)]);
            }
        }
    }

    fn get_tax_code_from_object_meta(
        &self,
        obj: &dyn HasMetadata,
        _previous_value: TaxType,
    ) -> TaxType {
        self.tax_code_from_object_meta(obj)
    }
}

/// Fraction to percent, the unit the host's tax breakdown uses
fn percentage(fraction: Decimal) -> Decimal {
    (fraction * Decimal::ONE_HUNDRED).normalize()
}
