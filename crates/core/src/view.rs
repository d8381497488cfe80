//! Read-only snapshots of the chat for renderers.

use crate::conversation::{Conversation, Message, Sender};

/// What a renderer should show below the committed messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Indicator<'a> {
    /// Nothing.
    Hidden,
    /// A "bot is typing" placeholder without text.
    Dots,
    /// The partially revealed text of the message being typed.
    Text(&'a str),
}

/// A snapshot of the chat state.
///
/// Exactly one message can be mid-reveal at a time, so the committed log
/// plus [`current_typing_text`](Self::current_typing_text) fully describe
/// what is on screen. Messages still waiting to be typed are not visible
/// here.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChatView {
    pub(crate) messages: Conversation,
    pub(crate) loading: bool,
    pub(crate) last_error: Option<String>,
    pub(crate) is_bot_typing: bool,
    pub(crate) typing_text: String,
}

impl ChatView {
    /// Returns the committed messages.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        self.messages.items()
    }

    /// Returns `true` while a request to the bot is in flight.
    #[inline]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns the error from the last failed send, cleared by the next send.
    #[inline]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns `true` while bot messages are being revealed or are waiting
    /// for their turn.
    #[inline]
    pub fn is_bot_typing(&self) -> bool {
        self.is_bot_typing
    }

    /// Returns the revealed part of the message being typed, or an empty
    /// string.
    #[inline]
    pub fn current_typing_text(&self) -> &str {
        &self.typing_text
    }

    /// Returns `true` if there is nothing at all to show.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && !self.is_bot_typing && self.typing_text.is_empty()
    }

    /// Decides what goes below the committed messages.
    ///
    /// The dots only show during the pause between two bot messages (or
    /// before the very first one), never right after a user message.
    pub fn indicator(&self) -> Indicator<'_> {
        if !self.is_bot_typing {
            return Indicator::Hidden;
        }
        if !self.typing_text.is_empty() {
            return Indicator::Text(&self.typing_text);
        }
        match self.messages.last() {
            None => Indicator::Dots,
            Some(last) if last.sender() == Sender::Bot => Indicator::Dots,
            Some(_) => Indicator::Hidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(messages: &[Message], typing: Option<&str>) -> ChatView {
        let mut conversation = Conversation::default();
        for msg in messages {
            conversation.push(msg.clone());
        }
        ChatView {
            messages: conversation,
            is_bot_typing: typing.is_some(),
            typing_text: typing.unwrap_or_default().to_owned(),
            ..Default::default()
        }
    }

    #[test]
    fn test_indicator() {
        assert!(view(&[], None).is_empty());
        assert_eq!(view(&[], None).indicator(), Indicator::Hidden);
        assert_eq!(view(&[], Some("")).indicator(), Indicator::Dots);
        assert_eq!(
            view(&[Message::user("hi")], Some("Hel")).indicator(),
            Indicator::Text("Hel")
        );
        assert_eq!(
            view(&[Message::user("hi"), Message::bot("one")], Some(""))
                .indicator(),
            Indicator::Dots
        );
        assert_eq!(
            view(&[Message::user("hi")], Some("")).indicator(),
            Indicator::Hidden
        );
    }
}
