//! Reference plugins.
//!
//! [`DefaultPlugin`] accepts any dictionary document and is the plugin the
//! harness tests exercise most. [`BluetoothPlugin`] is schema-specific and
//! demonstrates contract validation through required keys.

mod bluetooth;
mod default_plugin;

pub use self::bluetooth::BluetoothPlugin;
pub use self::default_plugin::{DefaultPlugin, MAX_RECURSION_DEPTH};
