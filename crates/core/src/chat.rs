mod animator;
mod builder;
mod state;

use std::collections::HashMap;

use rasa_chat_actor::{Delayed, Message as ActorMessage, define_actor};
use rasa_chat_model::Button;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::conversation::Conversation;
use crate::reply_client::ReplyClient;
use crate::view::ChatView;
use animator::TypingAnimator;
pub use builder::ChatBuilder;
use state::{ClearChat, SendUtterance, Shutdown};

/// Shown, typed out like any reply, when the bot answers with nothing.
pub const FALLBACK_REPLY: &str = "Sorry, I didn't understand that.";
/// Shown at once, as an error message, when a send fails.
pub const CONNECTION_APOLOGY: &str =
    "Sorry, I'm having trouble connecting. Please try again later.";
/// Reported through [`ChatView::last_error`] when a send fails.
pub const CONNECTION_ERROR: &str =
    "Failed to connect to the chatbot. Please try again later.";

define_actor! {
    #[wrapper_type(ChatActor)]
    struct ChatState {
        reply_client: ReplyClient,
        sender_id: String,
        conversation: Conversation,
        animator: TypingAnimator,
        // The only pending typing tick, if any. Replacing it always goes
        // through `cancel_timer`, which also bumps `timer_generation`.
        typing_timer: Option<Delayed>,
        timer_generation: u64,
        in_flight: usize,
        last_error: Option<String>,
        running_tasks: HashMap<u64, JoinHandle<()>>,
        next_task_id: u64,
        view_tx: watch::Sender<ChatView>,
    }
}

/// A chat session with a bot.
///
/// The session runs as an actor: every operation on this handle is queued
/// and applied in order by a single task, which is the only writer of the
/// conversation and the typing state. Renderers observe the result through
/// [`ChatView`] snapshots and never see the queue of messages waiting to
/// be typed.
///
/// Cloning the handle is cheap and all clones drive the same session.
#[derive(Clone)]
pub struct Chat {
    actor: ChatActor,
    view_rx: watch::Receiver<ChatView>,
}

impl Chat {
    /// Sends an utterance to the bot.
    ///
    /// Surrounding whitespace is trimmed and blank input is ignored. The
    /// user message shows up in the log before the request is issued;
    /// the replies are typed out once they arrive, after any replies still
    /// being typed. Failures never surface here, they become an error
    /// message in the log.
    pub fn send<S: AsRef<str>>(&self, utterance: S) {
        let text = utterance.as_ref().trim();
        if text.is_empty() {
            debug!("ignoring a blank utterance");
            return;
        }
        self.dispatch(SendUtterance(text.to_owned()));
    }

    /// Presses a quick-reply button, sending its payload.
    pub fn press(&self, button: &Button) {
        if button.payload.is_empty() {
            debug!("button {:?} has no payload", button.title);
            return;
        }
        self.send(&button.payload);
    }

    /// Empties the log and stops any typing in progress.
    ///
    /// Requests already in flight are not cancelled: their replies, or the
    /// failure notice, still show up when they arrive. The last error is
    /// kept until the next send.
    pub fn clear(&self) {
        self.dispatch(ClearChat);
    }

    /// Stops typing and shuts the session down.
    ///
    /// Pending requests are abandoned and the last published view stays
    /// as it is. Later calls on any clone of this handle are ignored.
    pub fn shutdown(&self) {
        self.dispatch(Shutdown);
    }

    /// Returns `false` once the session has shut down.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.actor.handle().is_alive()
    }

    /// Returns the latest snapshot.
    #[inline]
    pub fn view(&self) -> ChatView {
        self.view_rx.borrow().clone()
    }

    /// Returns a receiver notified whenever the snapshot changes.
    #[inline]
    pub fn subscribe(&self) -> watch::Receiver<ChatView> {
        self.view_rx.clone()
    }

    fn dispatch<M: ActorMessage<ChatState> + 'static>(&self, msg: M) {
        if self.actor.handle().send(msg).is_err() {
            warn!("chat has been shut down, request dropped");
        }
    }
}

impl Chat {
    fn spawn_from_builder(builder: ChatBuilder) -> Self {
        let ChatBuilder {
            reply_client,
            sender_id,
            char_delay,
            message_delay,
        } = builder;

        let (view_tx, view_rx) = watch::channel(ChatView::default());
        let state = ChatState {
            reply_client,
            sender_id,
            conversation: Default::default(),
            animator: TypingAnimator::new(char_delay, message_delay),
            typing_timer: None,
            timer_generation: 0,
            in_flight: 0,
            last_error: None,
            running_tasks: Default::default(),
            next_task_id: 1,
            view_tx,
        };
        let actor = ChatActor::spawn(state, Some("chat"));
        Self { actor, view_rx }
    }
}
