pub mod flat_tax;
pub mod manager;
pub mod plugin_trait;

pub use flat_tax::{FlatTaxPlugin, DESCRIPTOR, PLUGIN_ID, PLUGIN_NAME};
pub use manager::PluginsManager;
pub use plugin_trait::{PluginDescriptor, TaxPlugin};
