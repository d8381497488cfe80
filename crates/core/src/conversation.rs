//! Conversation-related types.

use std::ops::Deref;
use std::sync::Arc;
use std::time::SystemTime;

use rasa_chat_model::{BotReply, Button};

/// Who wrote a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sender {
    /// The person using the chat.
    User,
    /// The remote bot.
    Bot,
}

/// A committed chat message.
///
/// Messages are immutable: once built they are only ever read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    sender: Sender,
    text: String,
    timestamp: SystemTime,
    buttons: Vec<Button>,
    image: Option<String>,
    is_error: bool,
}

impl Message {
    fn new(sender: Sender, text: String) -> Self {
        Self {
            sender,
            text,
            timestamp: SystemTime::now(),
            buttons: vec![],
            image: None,
            is_error: false,
        }
    }

    /// Creates a message typed by the user.
    #[inline]
    pub fn user<S: Into<String>>(text: S) -> Self {
        Self::new(Sender::User, text.into())
    }

    /// Creates a plain bot message.
    #[inline]
    pub fn bot<S: Into<String>>(text: S) -> Self {
        Self::new(Sender::Bot, text.into())
    }

    /// Creates a bot message from a webhook reply.
    pub fn from_reply(reply: BotReply) -> Self {
        let BotReply {
            text,
            buttons,
            image,
        } = reply;
        Self {
            buttons,
            image,
            ..Self::new(Sender::Bot, text)
        }
    }

    /// Creates a bot message flagged as an error notice.
    #[inline]
    pub fn error<S: Into<String>>(text: S) -> Self {
        Self {
            is_error: true,
            ..Self::new(Sender::Bot, text.into())
        }
    }

    /// Returns who wrote this message.
    #[inline]
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Returns the message text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns when the message was created.
    #[inline]
    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    /// Returns the quick-reply buttons, possibly empty.
    #[inline]
    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Returns the attached image URL, if any.
    #[inline]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Returns `true` for synthetic failure notices.
    #[inline]
    pub fn is_error(&self) -> bool {
        self.is_error
    }
}

/// The committed message log, in display order.
///
/// Entries can only be appended, or all removed at once. Cloning is cheap:
/// clones share storage until the next append.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Conversation {
    items: Arc<Vec<Message>>,
}

impl Conversation {
    pub(crate) fn push(&mut self, message: Message) {
        Arc::make_mut(&mut self.items).push(message);
    }

    pub(crate) fn clear(&mut self) {
        self.items = Default::default();
    }

    /// Returns the messages as a slice.
    #[inline]
    pub fn items(&self) -> &[Message] {
        &self.items
    }
}

impl Deref for Conversation {
    type Target = [Message];

    #[inline]
    fn deref(&self) -> &[Message] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reply() {
        let msg = Message::from_reply(
            BotReply::text("Pick one")
                .with_button("Cold", "/cold")
                .with_image("https://example.com/a.png"),
        );
        assert_eq!(msg.sender(), Sender::Bot);
        assert_eq!(msg.text(), "Pick one");
        assert_eq!(msg.buttons()[0].payload, "/cold");
        assert_eq!(msg.image(), Some("https://example.com/a.png"));
        assert!(!msg.is_error());
        assert!(Message::error("nope").is_error());
    }

    #[test]
    fn test_snapshots_are_unaffected_by_appends() {
        let mut conversation = Conversation::default();
        conversation.push(Message::user("hi"));
        let snapshot = conversation.clone();

        conversation.push(Message::bot("hello"));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(conversation.len(), 2);
        assert_eq!(conversation[0], snapshot[0]);

        conversation.clear();
        assert!(conversation.is_empty());
        assert_eq!(snapshot.len(), 1);
    }
}
