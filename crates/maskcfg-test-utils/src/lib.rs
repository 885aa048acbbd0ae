//! Test helpers shared across maskcfg crates.

pub mod fixtures;
pub mod overlay;

pub use fixtures::{CATALOG, FINGERPRINT_DOCUMENT, PLUGINS_DOCUMENT};
pub use overlay::{overlay_from, write_layer};
