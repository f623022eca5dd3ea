//! # matdev-channels
//!
//! Messaging channel integrations for MATDEV.

pub mod bridge;
pub mod console;

pub use bridge::BridgeChannel;
pub use console::ConsoleChannel;
