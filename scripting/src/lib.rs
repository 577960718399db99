//! Lua startup configuration.
//!
//! A script runs once in a fresh Lua state seeded with defaults; the globals
//! it leaves behind are read back into an immutable [`ConfigSnapshot`] and the
//! state is dropped.

pub mod bridge;
pub mod color;
pub mod error;
pub mod marshal;

pub use bridge::{bootstrap_config, bootstrap_config_from_source, ConfigBridge, ConfigSnapshot};
pub use color::Color;
pub use error::ScriptError;
