use serde::{Deserialize, Serialize};

/// The request body accepted by the webhook.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserUtterance {
    /// Identifies the conversation on the server side.
    pub sender: String,
    /// The text the user typed, or a button payload.
    pub message: String,
}

impl UserUtterance {
    /// Creates an utterance for the given sender.
    #[inline]
    pub fn new<S: Into<String>, M: Into<String>>(sender: S, message: M) -> Self {
        Self {
            sender: sender.into(),
            message: message.into(),
        }
    }
}
