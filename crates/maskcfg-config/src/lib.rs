//! Typed, read-only configuration overlay.
//!
//! This crate owns the override document model, the typed accessors used by
//! call sites to decide between an override and their built-in default, and
//! the layered loader that assembles one document from files, inline text and
//! environment variables.

mod document;
mod error;
mod json5_value;
mod loader;
mod overlay;

/// Parsed override document and key resolution.
pub use document::{Document, value_kind};
/// Public error type returned by strict loading APIs.
pub use error::ConfigError;
/// Layered loading types and options.
pub use loader::{
    ConfigLayer, ConfigLayerSource, DEFAULT_ENV_VAR, LayerInput, LayeredMaskConfig,
    LayeredOverlayOptions, split_env_document,
};
/// Typed accessor surface.
pub use overlay::{LoadStatus, MaskConfig};
