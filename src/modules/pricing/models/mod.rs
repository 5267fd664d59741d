pub mod channel;
pub mod checkout;
pub mod order;
pub mod product;
pub mod voucher;

pub use channel::{Address, Channel};
pub use checkout::{CheckoutInfo, CheckoutLine, DeliveryMethod};
pub use order::{Order, OrderDiscount, OrderLine, ShippingMethod};
pub use product::{HasMetadata, Metadata, Product, ProductType};
pub use voucher::{Voucher, VoucherType};
