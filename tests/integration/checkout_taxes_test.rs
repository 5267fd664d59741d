/// Integration tests for checkout tax hooks
///
/// Tests:
/// - Line, subtotal, shipping and total prices with entered-net and entered-gross prices
/// - Voucher discounts on lines and on shipping
/// - Products sold without tax and untaxed shipping
/// - Country independence and pass-through of already-taxed values
///
/// Rates: standard 8%, reduced 5%

use flattax::modules::pricing::models::{Address, Voucher, VoucherType};
use flattax::modules::plugins::{FlatTaxPlugin, TaxPlugin};
use rust_decimal_macros::dec;

#[path = "../helpers/mod.rs"]
mod helpers;
use helpers::{init_test_tracing, zero_usd, TestDataFactory};

#[test]
fn test_checkout_prices_entered_without_tax() {
    init_test_tracing();
    let plugin = TestDataFactory::plugin(false);
    let checkout = TestDataFactory::checkout(
        vec![
            (TestDataFactory::product("Shirt"), 2, dec!(50.00)),
            (TestDataFactory::reduced_product("Bread"), 1, dec!(20.00)),
        ],
        Some(dec!(10.00)),
    );

    let first = &checkout.lines[0];
    let unit = plugin
        .calculate_checkout_line_unit_price(&checkout, first, None, zero_usd())
        .unwrap();
    assert_eq!(unit, TestDataFactory::taxed(dec!(50.00), dec!(54.00)));

    let line_total = plugin
        .calculate_checkout_line_total(&checkout, first, None, zero_usd())
        .unwrap();
    assert_eq!(line_total, TestDataFactory::taxed(dec!(100.00), dec!(108.00)));

    let subtotal = plugin
        .calculate_checkout_subtotal(&checkout, None, zero_usd())
        .unwrap();
    assert_eq!(subtotal, TestDataFactory::taxed(dec!(120.00), dec!(129.00)));

    let shipping = plugin
        .calculate_checkout_shipping(&checkout, None, zero_usd())
        .unwrap();
    assert_eq!(shipping, TestDataFactory::taxed(dec!(10.00), dec!(10.80)));

    let total = plugin
        .calculate_checkout_total(&checkout, None, zero_usd())
        .unwrap();
    assert_eq!(total, TestDataFactory::taxed(dec!(130.00), dec!(139.80)));
    assert_eq!(total.tax().amount, dec!(9.80));
}

#[test]
fn test_checkout_prices_entered_with_tax() {
    init_test_tracing();
    let plugin = TestDataFactory::plugin(true);
    let checkout = TestDataFactory::checkout(
        vec![
            (TestDataFactory::product("Shirt"), 2, dec!(50.00)),
            (TestDataFactory::reduced_product("Bread"), 1, dec!(20.00)),
        ],
        Some(dec!(10.00)),
    );

    // 100 / 1.08 = 92.593, 20 / 1.05 = 19.048, 10 / 1.08 = 9.259
    let subtotal = plugin
        .calculate_checkout_subtotal(&checkout, None, zero_usd())
        .unwrap();
    assert_eq!(subtotal, TestDataFactory::taxed(dec!(111.64), dec!(120.00)));

    let shipping = plugin
        .calculate_checkout_shipping(&checkout, None, zero_usd())
        .unwrap();
    assert_eq!(shipping, TestDataFactory::taxed(dec!(9.26), dec!(10.00)));

    let total = plugin
        .calculate_checkout_total(&checkout, None, zero_usd())
        .unwrap();
    assert_eq!(total, TestDataFactory::taxed(dec!(120.90), dec!(130.00)));
}

#[test]
fn test_checkout_line_total_is_taxed_as_a_whole() {
    let plugin = TestDataFactory::plugin(false);
    let checkout = TestDataFactory::checkout(
        vec![(TestDataFactory::product("Sticker"), 1000, dec!(0.05))],
        None,
    );
    let line = &checkout.lines[0];

    let unit_price = plugin
        .calculate_checkout_line_unit_price(&checkout, line, None, zero_usd())
        .unwrap();
    assert_eq!(unit_price, TestDataFactory::taxed(dec!(0.05), dec!(0.05)));

    let line_total = plugin
        .calculate_checkout_line_total(&checkout, line, None, zero_usd())
        .unwrap();
    assert_eq!(line_total, TestDataFactory::taxed(dec!(50.00), dec!(54.00)));
    assert_eq!(line_total.tax().amount, dec!(4.00));

    let subtotal = plugin
        .calculate_checkout_subtotal(&checkout, None, zero_usd())
        .unwrap();
    assert_eq!(subtotal, line_total);
}

#[test]
fn test_entire_order_voucher_discounts_lines() {
    let plugin = TestDataFactory::plugin(false);
    let mut checkout = TestDataFactory::checkout(
        vec![(TestDataFactory::product("Shirt"), 2, dec!(50.00))],
        Some(dec!(10.00)),
    );
    checkout.voucher = Some(Voucher::new("SAVE10", VoucherType::EntireOrder));
    checkout.discount = TestDataFactory::usd(dec!(10.00));

    let line = &checkout.lines[0];
    let unit = plugin
        .calculate_checkout_line_unit_price(&checkout, line, None, zero_usd())
        .unwrap();
    assert_eq!(unit, TestDataFactory::taxed(dec!(45.00), dec!(48.60)));

    let total = plugin
        .calculate_checkout_total(&checkout, None, zero_usd())
        .unwrap();
    // Lines 90.00 + 7.20 tax, shipping untouched 10.00 + 0.80 tax
    assert_eq!(total, TestDataFactory::taxed(dec!(100.00), dec!(108.00)));
}

#[test]
fn test_specific_product_voucher_only_touches_its_lines() {
    let plugin = TestDataFactory::plugin(false);
    let shirt = TestDataFactory::product("Shirt");
    let mug = TestDataFactory::product("Mug");
    let mut checkout = TestDataFactory::checkout(
        vec![(shirt.clone(), 1, dec!(50.00)), (mug, 1, dec!(20.00))],
        None,
    );
    checkout.voucher = Some(Voucher::for_products("SHIRTS", vec![shirt.id]));
    checkout.discount = TestDataFactory::usd(dec!(10.00));

    let shirt_total = plugin
        .calculate_checkout_line_total(&checkout, &checkout.lines[0], None, zero_usd())
        .unwrap();
    assert_eq!(shirt_total, TestDataFactory::taxed(dec!(40.00), dec!(43.20)));

    let mug_total = plugin
        .calculate_checkout_line_total(&checkout, &checkout.lines[1], None, zero_usd())
        .unwrap();
    assert_eq!(mug_total, TestDataFactory::taxed(dec!(20.00), dec!(21.60)));
}

#[test]
fn test_shipping_voucher_discounts_shipping_only() {
    let plugin = TestDataFactory::plugin(false);
    let mut checkout = TestDataFactory::checkout(
        vec![(TestDataFactory::product("Shirt"), 1, dec!(50.00))],
        Some(dec!(10.00)),
    );
    checkout.voucher = Some(Voucher::new("FREESHIP", VoucherType::Shipping));
    checkout.discount = TestDataFactory::usd(dec!(5.00));

    let shipping = plugin
        .calculate_checkout_shipping(&checkout, None, zero_usd())
        .unwrap();
    assert_eq!(shipping, TestDataFactory::taxed(dec!(5.00), dec!(5.40)));

    let subtotal = plugin
        .calculate_checkout_subtotal(&checkout, None, zero_usd())
        .unwrap();
    assert_eq!(subtotal, TestDataFactory::taxed(dec!(50.00), dec!(54.00)));
}

#[test]
fn test_shipping_discount_never_goes_below_zero() {
    let plugin = TestDataFactory::plugin(false);
    let mut checkout = TestDataFactory::checkout(Vec::new(), Some(dec!(10.00)));
    checkout.voucher = Some(Voucher::new("FREESHIP", VoucherType::Shipping));
    checkout.discount = TestDataFactory::usd(dec!(25.00));

    let shipping = plugin
        .calculate_checkout_shipping(&checkout, None, zero_usd())
        .unwrap();
    assert!(shipping.gross.is_zero());
    assert!(shipping.net.is_zero());
}

#[test]
fn test_product_without_taxes_is_not_taxed() {
    let plugin = TestDataFactory::plugin(false);
    let checkout = TestDataFactory::checkout(
        vec![(TestDataFactory::product("Gift card").without_taxes(), 3, dec!(25.00))],
        None,
    );

    let subtotal = plugin
        .calculate_checkout_subtotal(&checkout, None, zero_usd())
        .unwrap();
    assert_eq!(subtotal, TestDataFactory::taxed(dec!(75.00), dec!(75.00)));
    assert_eq!(
        plugin.get_checkout_line_tax_rate(&checkout, &checkout.lines[0], None, dec!(0)),
        dec!(0)
    );
}

#[test]
fn test_untaxed_shipping() {
    let configuration = TestDataFactory::configuration(false, false);
    let plugin = FlatTaxPlugin::new(&configuration, None).unwrap();
    let checkout = TestDataFactory::checkout(
        vec![(TestDataFactory::product("Shirt"), 1, dec!(50.00))],
        Some(dec!(10.00)),
    );

    let shipping = plugin
        .calculate_checkout_shipping(&checkout, None, zero_usd())
        .unwrap();
    assert_eq!(shipping, TestDataFactory::taxed(dec!(10.00), dec!(10.00)));
    assert_eq!(plugin.get_checkout_shipping_tax_rate(&checkout, None, dec!(0)), dec!(0));

    let total = plugin
        .calculate_checkout_total(&checkout, None, zero_usd())
        .unwrap();
    assert_eq!(total, TestDataFactory::taxed(dec!(60.00), dec!(64.00)));
}

#[test]
fn test_checkout_without_delivery_method_keeps_previous_shipping() {
    let plugin = TestDataFactory::plugin(false);
    let checkout = TestDataFactory::checkout(
        vec![(TestDataFactory::product("Shirt"), 1, dec!(50.00))],
        None,
    );

    let shipping = plugin
        .calculate_checkout_shipping(&checkout, None, zero_usd())
        .unwrap();
    assert_eq!(shipping, zero_usd());
}

#[test]
fn test_address_country_does_not_change_prices() {
    let plugin = TestDataFactory::plugin(false);
    let checkout = TestDataFactory::checkout(
        vec![(TestDataFactory::reduced_product("Bread"), 4, dec!(3.15))],
        Some(dec!(4.99)),
    );

    let without_address = plugin
        .calculate_checkout_total(&checkout, None, zero_usd())
        .unwrap();
    for country in ["US", "DE", "JP", "BR"] {
        let address = Address::in_country(country);
        let total = plugin
            .calculate_checkout_total(&checkout, Some(&address), zero_usd())
            .unwrap();
        assert_eq!(total, without_address, "country {} changed the total", country);
    }
}

#[test]
fn test_already_taxed_previous_values_pass_through() {
    let plugin = TestDataFactory::plugin(false);
    let checkout = TestDataFactory::checkout(
        vec![(TestDataFactory::product("Shirt"), 1, dec!(50.00))],
        Some(dec!(10.00)),
    );
    let previous = TestDataFactory::taxed(dec!(60.00), dec!(73.80));

    assert_eq!(
        plugin.calculate_checkout_total(&checkout, None, previous).unwrap(),
        previous
    );
    assert_eq!(
        plugin.calculate_checkout_subtotal(&checkout, None, previous).unwrap(),
        previous
    );
    assert_eq!(
        plugin.calculate_checkout_shipping(&checkout, None, previous).unwrap(),
        previous
    );
    assert_eq!(
        plugin
            .calculate_checkout_line_total(&checkout, &checkout.lines[0], None, previous)
            .unwrap(),
        previous
    );
}

#[test]
fn test_inactive_plugin_returns_previous_values() {
    let plugin = TestDataFactory::inactive_plugin();
    let checkout = TestDataFactory::checkout(
        vec![(TestDataFactory::product("Shirt"), 1, dec!(50.00))],
        Some(dec!(10.00)),
    );
    let previous = TestDataFactory::taxed(dec!(60.00), dec!(60.00));

    assert_eq!(
        plugin.calculate_checkout_total(&checkout, None, previous).unwrap(),
        previous
    );
    assert_eq!(
        plugin.get_checkout_line_tax_rate(&checkout, &checkout.lines[0], None, dec!(0.19)),
        dec!(0.19)
    );
}

#[test]
fn test_checkout_tax_rates() {
    let plugin = TestDataFactory::plugin(true);
    let checkout = TestDataFactory::checkout(
        vec![
            (TestDataFactory::product("Shirt"), 1, dec!(50.00)),
            (TestDataFactory::reduced_product("Bread"), 1, dec!(3.00)),
            (TestDataFactory::product("Book").with_tax_code("unknown"), 1, dec!(12.00)),
        ],
        Some(dec!(10.00)),
    );

    let rates: Vec<_> = checkout
        .lines
        .iter()
        .map(|line| plugin.get_checkout_line_tax_rate(&checkout, line, None, dec!(0)))
        .collect();
    assert_eq!(rates, vec![dec!(0.08), dec!(0.05), dec!(0.08)]);
    assert_eq!(plugin.get_checkout_shipping_tax_rate(&checkout, None, dec!(0)), dec!(0.08));
}
