//! Public SDK surface for maskcfg.
//!
//! This crate re-exports the overlay, schema and feature crates and provides
//! a small initialization helper to keep consumer setup consistent.

pub mod commands;

/// Re-export for convenience.
pub use maskcfg_config as config;
/// Re-export for convenience.
pub use maskcfg_features as features;
/// Re-export for convenience.
pub use maskcfg_schema as schema;

pub use maskcfg_config::{LoadStatus, MaskConfig};

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}
