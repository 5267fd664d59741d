pub mod plugins;
pub mod pricing;
pub mod taxes;
