use std::time::Duration;

use rasa_chat_model::ReplyProvider;

use super::Chat;
use super::animator::{DEFAULT_CHAR_DELAY, DEFAULT_MESSAGE_DELAY};
use crate::reply_client::ReplyClient;

/// [`Chat`] builder.
pub struct ChatBuilder {
    pub(crate) reply_client: ReplyClient,
    pub(crate) sender_id: String,
    pub(crate) char_delay: Duration,
    pub(crate) message_delay: Duration,
}

impl ChatBuilder {
    /// Creates a new builder with the specified reply provider.
    #[inline]
    pub fn with_provider<P: ReplyProvider + 'static>(provider: P) -> Self {
        Self::with_reply_client(ReplyClient::new(provider))
    }

    /// Creates a new builder sharing an existing client.
    #[inline]
    pub fn with_reply_client(reply_client: ReplyClient) -> Self {
        Self {
            reply_client,
            sender_id: "user".to_owned(),
            char_delay: DEFAULT_CHAR_DELAY,
            message_delay: DEFAULT_MESSAGE_DELAY,
        }
    }

    /// Sets the sender identifier sent along with every utterance.
    #[inline]
    pub fn with_sender_id<S: Into<String>>(mut self, sender_id: S) -> Self {
        self.sender_id = sender_id.into();
        self
    }

    /// Sets the delay between two revealed characters (20ms by default).
    #[inline]
    pub fn with_char_delay(mut self, delay: Duration) -> Self {
        self.char_delay = delay;
        self
    }

    /// Sets the pause between two typed messages (500ms by default).
    #[inline]
    pub fn with_message_delay(mut self, delay: Duration) -> Self {
        self.message_delay = delay;
        self
    }

    /// Starts the chat session.
    ///
    /// Must be called from within a tokio runtime.
    #[inline]
    pub fn build(self) -> Chat {
        Chat::spawn_from_builder(self)
    }
}
