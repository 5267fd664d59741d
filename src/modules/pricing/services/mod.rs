pub mod discount;

pub use discount::{
    allocate_discount, apply_checkout_discount_on_checkout_line, checkout_line_discount,
    checkout_line_discounts, discounted_line_total, discounted_unit_price,
};
