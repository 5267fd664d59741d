use rust_decimal::Decimal;
use tracing::debug;

use crate::core::{Money, PluginError, Result};
use crate::modules::pricing::models::{CheckoutInfo, CheckoutLine};

/// Split `total_discount` across lines proportionally to their totals.
///
/// Each share is rounded to the minor unit; the last line takes whatever is
/// left so the shares always add up to `total_discount`.
pub fn allocate_discount(line_totals: &[Money], total_discount: Money) -> Result<Vec<Money>> {
    let currency = total_discount.currency;
    let mut shares = vec![Money::zero(currency); line_totals.len()];

    let grand_total = line_totals
        .iter()
        .try_fold(Money::zero(currency), |acc, total| acc.checked_add(*total))?;

    if total_discount.is_zero() || grand_total.amount <= Decimal::ZERO {
        return Ok(shares);
    }

    let mut allocated = Money::zero(currency);
    let last = line_totals.len() - 1;
    for (index, line_total) in line_totals.iter().enumerate() {
        let share = if index == last {
            total_discount.checked_sub(allocated)?
        } else {
            Money::new(
                line_total.amount / grand_total.amount * total_discount.amount,
                currency,
            )
            .quantize()
        };
        allocated = allocated.checked_add(share)?;
        shares[index] = share;
    }

    Ok(shares)
}

/// Unit price once `discount` is taken off the whole line, floored at zero
pub fn discounted_unit_price(line_total: Money, discount: Money, quantity: u32) -> Result<Money> {
    if quantity == 0 {
        return Err(PluginError::validation("Line quantity must be positive"));
    }

    let remaining = line_total.checked_sub(discount)?;
    let unit = Money::new(remaining.amount / Decimal::from(quantity), remaining.currency);
    Ok(unit.quantize().max_zero())
}

/// Voucher discount share of every checkout line, in line order
pub fn checkout_line_discounts(checkout: &CheckoutInfo) -> Result<Vec<Money>> {
    let currency = checkout.currency();
    let mut shares = vec![Money::zero(currency); checkout.lines.len()];

    let Some(voucher) = checkout.voucher.as_ref() else {
        return Ok(shares);
    };

    let eligible: Vec<usize> = checkout
        .lines
        .iter()
        .enumerate()
        .filter(|(_, line)| voucher.applies_to_line(&line.product))
        .map(|(index, _)| index)
        .collect();

    if eligible.is_empty() {
        return Ok(shares);
    }

    let totals = eligible
        .iter()
        .map(|index| checkout.lines[*index].base_total())
        .collect::<Result<Vec<_>>>()?;
    let allocated = allocate_discount(&totals, checkout.discount)?;

    for (index, share) in eligible.into_iter().zip(allocated) {
        shares[index] = share;
    }

    Ok(shares)
}

/// Share of the checkout voucher discount carried by `line`
pub fn checkout_line_discount(checkout: &CheckoutInfo, line: &CheckoutLine) -> Result<Money> {
    let share = match checkout.line_index(line.id) {
        Some(index) => checkout_line_discounts(checkout)?[index],
        None => Money::zero(checkout.currency()),
    };

    if !share.is_zero() {
        debug!(
            checkout_id = %checkout.id,
            line_id = %line.id,
            discount = %share.amount,
            "Applying checkout discount to line"
        );
    }

    Ok(share)
}

/// Unit price of `line` after its share of the checkout voucher discount
pub fn apply_checkout_discount_on_checkout_line(
    checkout: &CheckoutInfo,
    line: &CheckoutLine,
    unit_price: Money,
) -> Result<Money> {
    let share = checkout_line_discount(checkout, line)?;
    if share.is_zero() {
        return Ok(unit_price);
    }

    discounted_unit_price(unit_price.times(line.quantity)?, share, line.quantity)
}

/// Line total once `discount` is taken off, floored at zero
pub fn discounted_line_total(line_total: Money, discount: Money) -> Result<Money> {
    line_total.saturating_sub(discount)
}
