// Test Helper Modules
//
// Shared fixtures for the integration tests. Each test binary pulls this in
// with `#[path = "../helpers/mod.rs"] mod helpers;`, so not every helper is
// used by every binary.
//
// Example:
//   let plugin = TestDataFactory::plugin(false);
//   let checkout = TestDataFactory::checkout(vec![(product, 2, dec!(50))], Some(dec!(10)));
//   let total = plugin.calculate_checkout_total(&checkout, None, zero_usd())?;

#![allow(dead_code)]

pub mod test_data;

pub use test_data::*;

use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test subscriber once per binary; honours RUST_LOG
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}
