//! Flat Tax Plugin
//!
//! Country-independent tax calculation for a host commerce platform. The
//! plugin applies administrator-configured flat rates to checkout and order
//! prices through the host's tax hook chain.

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use crate::config::{Config, PluginConfiguration};
pub use crate::core::{Currency, Money, PluginError, Result, TaxedMoney};
pub use modules::plugins::{FlatTaxPlugin, PluginsManager, TaxPlugin};
pub use modules::pricing;
pub use modules::taxes;
