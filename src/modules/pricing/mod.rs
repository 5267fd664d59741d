pub mod models;
pub mod services;

pub use models::{
    Address, Channel, CheckoutInfo, CheckoutLine, DeliveryMethod, HasMetadata, Order,
    OrderDiscount, OrderLine, Product, ProductType, ShippingMethod, Voucher, VoucherType,
};
