//! A small single-writer actor runtime on top of tokio.
//!
//! Each actor owns its state exclusively and mutates it only while
//! handling a message, one message at a time. Timers are expressed as
//! delayed messages, which keeps every state change on the actor task.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod delayed;
mod error;
mod handle;
mod macros;
mod mailbox;
mod runner;

pub use delayed::Delayed;
pub use error::ActorDeadError;
pub use handle::Actor;
pub use mailbox::Message;
