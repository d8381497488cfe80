use std::sync::Arc;
use std::time::Duration;

use tracing::Instrument;

use crate::delayed::Delayed;
use crate::mailbox::Mailbox;
use crate::runner::run_loop;
use crate::{ActorDeadError, Message};

/// A cloneable handle to a running actor.
///
/// The actor stops once it is killed or once every handle has been
/// dropped. Handles created by timers don't count, see
/// [`Actor::send_after`].
pub struct Actor<S> {
    mailbox: Arc<Mailbox<S>>,
}

impl<S: Send + 'static> Actor<S> {
    /// Spawns an actor owning `state` on the current tokio runtime.
    ///
    /// The optional `label` is attached to the actor's tracing span. Prefer
    /// the wrapper generated by [`crate::define_actor`] over calling this
    /// directly.
    pub fn spawn(state: S, label: Option<&str>) -> Self {
        let (mailbox, inbox) = Mailbox::open();
        let mailbox = Arc::new(mailbox);
        let span = trace_span!("actor", label = label);
        tokio::spawn(
            run_loop(Arc::downgrade(&mailbox), state, inbox).instrument(span),
        );
        Self { mailbox }
    }

    #[inline]
    pub(crate) fn from_mailbox(mailbox: Arc<Mailbox<S>>) -> Self {
        Self { mailbox }
    }

    /// Queues a message for the actor.
    #[inline]
    pub fn send<M: Message<S> + 'static>(
        &self,
        msg: M,
    ) -> Result<(), ActorDeadError> {
        self.mailbox.deliver(Box::new(msg))
    }

    /// Queues a message for the actor once `delay` has elapsed.
    ///
    /// The returned [`Delayed`] aborts the delivery when cancelled or
    /// dropped. The pending delivery holds only a weak reference, so it
    /// does not keep the actor alive; if the actor is gone by the time
    /// the delay elapses the message is discarded.
    pub fn send_after<M: Message<S> + 'static>(
        &self,
        msg: M,
        delay: Duration,
    ) -> Delayed {
        let mailbox = Arc::downgrade(&self.mailbox);
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(mailbox) = mailbox.upgrade() else {
                trace!("actor is gone, discarding {msg:?}");
                return;
            };
            if mailbox.deliver(Box::new(msg)).is_err() {
                trace!("actor stopped before a delayed message arrived");
            }
        });
        Delayed::new(task)
    }

    /// Asks the actor to stop.
    ///
    /// Messages already queued may or may not be handled; nothing sent
    /// after the actor has stopped will be.
    #[inline]
    pub fn try_kill(&self) {
        self.mailbox.kill();
    }

    /// Returns `false` once the actor task has stopped.
    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.mailbox.is_closed()
    }
}

impl<S> Clone for Actor<S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            mailbox: Arc::clone(&self.mailbox),
        }
    }
}
