use std::collections::VecDeque;
use std::time::Duration;

use crate::conversation::Message;

pub(crate) const DEFAULT_CHAR_DELAY: Duration = Duration::from_millis(20);
pub(crate) const DEFAULT_MESSAGE_DELAY: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Phase {
    #[default]
    Idle,
    /// Revealing the front of the queue; `offset` is the byte offset of
    /// the next character to show.
    Revealing { offset: usize },
    /// The previous message was committed and the next one has not
    /// started yet.
    BetweenMessages,
}

/// The outcome of one [`TypingAnimator::tick`].
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Tick {
    /// One more character became visible. Tick again after the delay.
    Revealed(Duration),
    /// A message is fully revealed and must be committed to the log.
    /// `next` is the pause before the following message, or `None` if the
    /// queue is now empty.
    Finished {
        message: Message,
        next: Option<Duration>,
    },
    /// Nothing to do.
    Idle,
}

/// Reveals queued bot messages one character at a time.
///
/// This is a plain state machine: it never sleeps or spawns anything.
/// Whoever drives it calls [`tick`](Self::tick) and schedules the next
/// call according to the result. A character is a Unicode scalar value,
/// so multi-byte text is never cut in the middle of a code point.
#[derive(Debug)]
pub(crate) struct TypingAnimator {
    pending: VecDeque<Message>,
    phase: Phase,
    typing_text: String,
    char_delay: Duration,
    message_delay: Duration,
}

impl Default for TypingAnimator {
    fn default() -> Self {
        Self::new(DEFAULT_CHAR_DELAY, DEFAULT_MESSAGE_DELAY)
    }
}

impl TypingAnimator {
    pub fn new(char_delay: Duration, message_delay: Duration) -> Self {
        Self {
            pending: VecDeque::new(),
            phase: Phase::Idle,
            typing_text: String::new(),
            char_delay,
            message_delay,
        }
    }

    /// Appends a batch to the end of the queue.
    ///
    /// Returns `true` if the animator was idle and the caller must tick
    /// right away. A batch queued behind a running reveal waits its turn.
    pub fn enqueue<I: IntoIterator<Item = Message>>(&mut self, batch: I) -> bool {
        let before = self.pending.len();
        self.pending.extend(batch);
        if self.pending.len() == before || self.phase != Phase::Idle {
            return false;
        }
        self.phase = Phase::Revealing { offset: 0 };
        true
    }

    pub fn tick(&mut self) -> Tick {
        let offset = match self.phase {
            Phase::Idle => return Tick::Idle,
            Phase::BetweenMessages => 0,
            Phase::Revealing { offset } => offset,
        };
        let next_char = self
            .pending
            .front()
            .and_then(|front| front.text().get(offset..))
            .and_then(|rest| rest.chars().next());
        if let Some(ch) = next_char {
            self.typing_text.push(ch);
            self.phase = Phase::Revealing {
                offset: offset + ch.len_utf8(),
            };
            return Tick::Revealed(self.char_delay);
        }

        let Some(message) = self.pending.pop_front() else {
            warn!("animator was active with an empty queue");
            self.reset();
            return Tick::Idle;
        };
        self.typing_text.clear();
        if self.pending.is_empty() {
            self.phase = Phase::Idle;
            Tick::Finished {
                message,
                next: None,
            }
        } else {
            self.phase = Phase::BetweenMessages;
            Tick::Finished {
                message,
                next: Some(self.message_delay),
            }
        }
    }

    /// Drops everything queued and stops the current reveal.
    ///
    /// Returns `false` if the animator was already idle.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_typing() || !self.typing_text.is_empty();
        self.reset();
        was_active
    }

    #[inline]
    pub fn is_typing(&self) -> bool {
        self.phase != Phase::Idle
    }

    #[inline]
    pub fn typing_text(&self) -> &str {
        &self.typing_text
    }

    fn reset(&mut self) {
        self.pending.clear();
        self.typing_text.clear();
        self.phase = Phase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reveal_all(animator: &mut TypingAnimator) -> (Vec<String>, Message) {
        let mut frames = vec![];
        loop {
            match animator.tick() {
                Tick::Revealed(delay) => {
                    assert_eq!(delay, DEFAULT_CHAR_DELAY);
                    frames.push(animator.typing_text().to_owned());
                }
                Tick::Finished { message, .. } => return (frames, message),
                Tick::Idle => panic!("animator went idle before finishing"),
            }
        }
    }

    #[test]
    fn test_reveals_one_char_per_tick() {
        let mut animator = TypingAnimator::default();
        assert!(animator.enqueue([Message::bot("hello")]));
        assert!(animator.is_typing());

        let (frames, message) = reveal_all(&mut animator);
        assert_eq!(frames, ["h", "he", "hel", "hell", "hello"]);
        assert_eq!(message.text(), "hello");
        assert!(!animator.is_typing());
        assert_eq!(animator.typing_text(), "");
        assert_eq!(animator.tick(), Tick::Idle);
    }

    #[test]
    fn test_multibyte_chars_are_not_split() {
        let mut animator = TypingAnimator::default();
        animator.enqueue([Message::bot("né👋")]);
        let (frames, _) = reveal_all(&mut animator);
        assert_eq!(frames, ["n", "né", "né👋"]);
    }

    #[test]
    fn test_empty_message_commits_immediately() {
        let mut animator = TypingAnimator::default();
        assert!(animator.enqueue([Message::bot("")]));
        assert_eq!(animator.typing_text(), "");
        let Tick::Finished { message, next } = animator.tick() else {
            panic!("expected the empty message to finish on the first tick");
        };
        assert_eq!(message.text(), "");
        assert_eq!(next, None);
        assert!(!animator.is_typing());
    }

    #[test]
    fn test_pause_between_messages() {
        let mut animator = TypingAnimator::default();
        animator.enqueue([Message::bot("a"), Message::bot("b")]);

        assert_eq!(animator.tick(), Tick::Revealed(DEFAULT_CHAR_DELAY));
        let Tick::Finished { message, next } = animator.tick() else {
            panic!("expected `a` to finish");
        };
        assert_eq!(message.text(), "a");
        assert_eq!(next, Some(DEFAULT_MESSAGE_DELAY));
        // Still typing, but nothing is visible during the pause.
        assert!(animator.is_typing());
        assert_eq!(animator.typing_text(), "");

        let (frames, message) = reveal_all(&mut animator);
        assert_eq!(frames, ["b"]);
        assert_eq!(message.text(), "b");
        assert!(!animator.is_typing());
    }

    #[test]
    fn test_enqueue_while_typing_appends() {
        let mut animator = TypingAnimator::default();
        assert!(animator.enqueue([Message::bot("abc")]));
        animator.tick();
        assert!(!animator.enqueue([Message::bot("xyz")]));
        // The running reveal carries on where it was.
        animator.tick();
        assert_eq!(animator.typing_text(), "ab");

        let (_, first) = reveal_all(&mut animator);
        assert_eq!(first.text(), "abc");
        let (frames, second) = reveal_all(&mut animator);
        assert_eq!(frames, ["x", "xy", "xyz"]);
        assert_eq!(second.text(), "xyz");
    }

    #[test]
    fn test_empty_batch_is_ignored() {
        let mut animator = TypingAnimator::default();
        assert!(!animator.enqueue([]));
        assert!(!animator.is_typing());
    }

    #[test]
    fn test_cancel() {
        let mut animator = TypingAnimator::default();
        animator.enqueue([Message::bot("abc"), Message::bot("def")]);
        animator.tick();

        assert!(animator.cancel());
        assert!(!animator.is_typing());
        assert_eq!(animator.typing_text(), "");
        assert_eq!(animator.tick(), Tick::Idle);

        // Cancelling an idle animator is a no-op.
        assert!(!animator.cancel());
        assert!(!animator.is_typing());

        // And it is reusable afterwards.
        assert!(animator.enqueue([Message::bot("g")]));
        let (frames, _) = reveal_all(&mut animator);
        assert_eq!(frames, ["g"]);
    }

    #[test]
    fn test_active_with_empty_queue_goes_idle() {
        let mut animator = TypingAnimator::default();
        animator.phase = Phase::BetweenMessages;
        assert_eq!(animator.tick(), Tick::Idle);
        assert!(!animator.is_typing());
    }
}
