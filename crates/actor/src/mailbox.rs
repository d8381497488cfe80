use std::fmt::Debug;

use tokio::sync::{mpsc, watch};

use crate::{Actor, ActorDeadError};

/// Object-safe companion of [`Message`], so that messages of different
/// types can travel through one channel.
pub trait BoxMessage<S>: Send + Debug + 'static {
    fn handle_boxed(self: Box<Self>, state: &mut S, handle: &Actor<S>);
}

/// A message the actor owning state `S` knows how to handle.
///
/// Handlers run one at a time on the actor task, so they get exclusive
/// access to the state without any locking.
pub trait Message<S>: BoxMessage<S> {
    /// Applies the message to the actor's state.
    fn handle(self, state: &mut S, handle: &Actor<S>);
}

impl<S, M: Message<S>> BoxMessage<S> for M {
    #[inline]
    fn handle_boxed(self: Box<Self>, state: &mut S, handle: &Actor<S>) {
        (*self).handle(state, handle)
    }
}

impl<S, M: Message<S> + ?Sized> Message<S> for Box<M> {
    #[inline]
    fn handle(self, state: &mut S, handle: &Actor<S>) {
        self.handle_boxed(state, handle)
    }
}

pub(crate) type BoxedMessage<S> = Box<dyn Message<S>>;

pub(crate) struct Inbox<S> {
    pub messages: mpsc::UnboundedReceiver<BoxedMessage<S>>,
    pub killed: watch::Receiver<bool>,
}

pub(crate) struct Mailbox<S> {
    messages: mpsc::UnboundedSender<BoxedMessage<S>>,
    kill: watch::Sender<bool>,
}

impl<S: Send + 'static> Mailbox<S> {
    pub fn open() -> (Mailbox<S>, Inbox<S>) {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (kill_tx, kill_rx) = watch::channel(false);
        let mailbox = Mailbox {
            messages: msg_tx,
            kill: kill_tx,
        };
        let inbox = Inbox {
            messages: msg_rx,
            killed: kill_rx,
        };
        (mailbox, inbox)
    }

    #[inline]
    pub fn deliver(&self, msg: BoxedMessage<S>) -> Result<(), ActorDeadError> {
        self.messages.send(msg).map_err(|_| ActorDeadError)
    }

    #[inline]
    pub fn kill(&self) {
        self.kill.send_replace(true);
    }

    #[inline]
    pub fn is_closed(&self) -> bool {
        self.messages.is_closed()
    }
}
