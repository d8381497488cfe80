use std::sync::Weak;

use tokio::select;

use crate::{Actor, Message};
use crate::mailbox::{Inbox, Mailbox};

/// Drives one actor until it is killed or every handle is gone.
pub(crate) async fn run_loop<S: Send + 'static>(
    mailbox: Weak<Mailbox<S>>,
    mut state: S,
    mut inbox: Inbox<S>,
) {
    debug!("running");
    loop {
        let msg = select! {
            biased;

            _ = inbox.killed.changed() => break,
            msg = inbox.messages.recv() => match msg {
                Some(msg) => msg,
                None => break,
            },
        };
        trace!("dispatching {msg:?}");

        let Some(mailbox) = mailbox.upgrade() else {
            warn!("all handles dropped while a message was pending");
            break;
        };
        trace_span!("handle").in_scope(|| {
            msg.handle(&mut state, &Actor::from_mailbox(mailbox));
        });
    }
    // Closing the receiver makes later sends fail fast.
    inbox.messages.close();
    debug!("stopped");
}
