//! Chat session logic: the conversation log, the typing animation that
//! reveals bot replies, and the snapshots renderers draw from.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod chat;
pub mod conversation;
pub mod monitor;
mod reply_client;
pub mod view;

pub use chat::{CONNECTION_APOLOGY, CONNECTION_ERROR, Chat, ChatBuilder, FALLBACK_REPLY};
pub use reply_client::{ReplyClient, ReplyError};
