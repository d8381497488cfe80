use std::error::Error;
use std::fmt;

/// Returned when a message is sent to an actor whose task has already
/// stopped, either because it was killed or because it was never polled
/// again after its runtime shut down.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ActorDeadError;

impl fmt::Debug for ActorDeadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ActorDeadError")
    }
}

impl fmt::Display for ActorDeadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("actor is no longer running")
    }
}

impl Error for ActorDeadError {}
