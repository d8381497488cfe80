//! Types shared between the chat core and the reply backends.
//!
//! A reply backend is anything that takes a user utterance and answers
//! with zero or more structured bot replies, such as the REST channel of
//! a Rasa server. This crate fixes the wire shapes and the
//! [`ReplyProvider`] contract, and leaves transport concerns to the
//! implementors.

#![deny(missing_docs)]

mod error;
mod provider;
mod reply;
mod server;
mod utterance;

pub use error::*;
pub use provider::*;
pub use reply::*;
pub use server::*;
pub use utterance::*;
