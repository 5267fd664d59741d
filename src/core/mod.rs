pub mod currency;
pub mod error;
pub mod money;
pub mod traits;

pub use currency::Currency;
pub use error::{PluginError, PluginErrorCode, Result};
pub use money::{Money, TaxedMoney};
