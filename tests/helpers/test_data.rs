// Test Data Factory
//
// Builds channels, products, checkouts and orders for plugin tests.
// Rates used throughout: standard 8%, reduced 5%.

use flattax::config::{
    default_configuration, PluginConfiguration, CHARGE_TAXES_ON_SHIPPING_FIELD,
    PRICES_ENTERED_WITH_TAX_FIELD,
};
use flattax::modules::plugins::FlatTaxPlugin;
use flattax::modules::pricing::models::{
    Channel, CheckoutInfo, CheckoutLine, DeliveryMethod, Order, OrderLine, Product, ProductType,
    ShippingMethod,
};
use flattax::modules::taxes::models::FLAT_TAXES_FIELD;
use flattax::{Currency, Money, TaxedMoney};
use rust_decimal::Decimal;
use serde_json::json;

pub const TEST_RATES: &str = r#"{"standard": 8, "reduced": 5}"#;

/// Test data factory for pricing fixtures
pub struct TestDataFactory;

impl TestDataFactory {
    pub fn channel() -> Channel {
        Channel::new("default-channel", Currency::USD)
    }

    pub fn usd(amount: Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    /// Stored host configuration with the test rates
    pub fn configuration(
        prices_entered_with_tax: bool,
        charge_taxes_on_shipping: bool,
    ) -> PluginConfiguration {
        let mut configuration = PluginConfiguration::new(true, default_configuration());
        configuration.set(FLAT_TAXES_FIELD, json!(TEST_RATES));
        configuration.set(PRICES_ENTERED_WITH_TAX_FIELD, json!(prices_entered_with_tax));
        configuration.set(CHARGE_TAXES_ON_SHIPPING_FIELD, json!(charge_taxes_on_shipping));
        configuration
    }

    /// Global plugin instance, shipping taxed
    pub fn plugin(prices_entered_with_tax: bool) -> FlatTaxPlugin {
        FlatTaxPlugin::new(&Self::configuration(prices_entered_with_tax, true), None)
            .expect("test configuration is valid")
    }

    pub fn inactive_plugin() -> FlatTaxPlugin {
        let mut configuration = Self::configuration(false, true);
        configuration.active = false;
        FlatTaxPlugin::new(&configuration, None).expect("test configuration is valid")
    }

    /// Product taxed at the standard rate through its product type
    pub fn product(name: &str) -> Product {
        Product::new(name, ProductType::new("Default"))
    }

    pub fn reduced_product(name: &str) -> Product {
        Product::new(name, ProductType::new("Groceries").with_tax_code("reduced"))
    }

    /// Checkout in USD; each line is (product, quantity, unit price)
    pub fn checkout(
        lines: Vec<(Product, u32, Decimal)>,
        shipping: Option<Decimal>,
    ) -> CheckoutInfo {
        let mut checkout = CheckoutInfo::new(Self::channel());
        checkout.lines = lines
            .into_iter()
            .map(|(product, quantity, unit_price)| {
                CheckoutLine::new(product, quantity, Self::usd(unit_price))
            })
            .collect();
        checkout.delivery_method = shipping.map(|price| DeliveryMethod {
            name: "Courier".to_string(),
            price: Self::usd(price),
        });
        checkout
    }

    /// Order in USD with untaxed line prices
    pub fn order(lines: Vec<(Option<Product>, u32, Decimal)>, shipping: Option<Decimal>) -> Order {
        let mut order = Order::new(Self::channel());
        order.lines = lines
            .into_iter()
            .map(|(product, quantity, unit_price)| {
                OrderLine::new(product, quantity, Self::usd(unit_price)).expect("line total fits")
            })
            .collect();
        order.shipping_method = shipping.map(|price| ShippingMethod {
            name: "Courier".to_string(),
            price: Self::usd(price),
        });
        order
    }

    pub fn taxed(net: Decimal, gross: Decimal) -> TaxedMoney {
        TaxedMoney::new(Self::usd(net), Self::usd(gross)).expect("same currency")
    }
}

pub fn zero_usd() -> TaxedMoney {
    TaxedMoney::zero(Currency::USD)
}
