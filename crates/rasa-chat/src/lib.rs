//! A terminal client for bots served through the Rasa REST channel.
//!
//! The binary reads lines from stdin, sends them to the bot and types the
//! replies out as they arrive. The pieces it is made of (settings,
//! command parsing and bold markup) are exposed here so other front-ends
//! can reuse them.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

pub mod command;
pub mod input;
pub mod markup;
pub mod settings;

pub use command::Command;
pub use settings::{Settings, SettingsError};

/// Re-exports of [`rasa_chat_core`] crate.
pub mod core {
    pub use rasa_chat_core::*;
}
