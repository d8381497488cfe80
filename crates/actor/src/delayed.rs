use std::fmt;

use tokio::task::JoinHandle;

/// A message delivery scheduled with [`crate::Actor::send_after`].
///
/// Dropping the value cancels the delivery. A delivery that has already
/// reached the mailbox cannot be recalled, so receivers that care must
/// tag their timer messages and ignore stale ones.
#[must_use = "dropping a `Delayed` cancels the delivery"]
pub struct Delayed {
    task: JoinHandle<()>,
}

impl Delayed {
    #[inline]
    pub(crate) fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    /// Cancels the delivery if it has not happened yet.
    #[inline]
    pub fn cancel(self) {
        drop(self);
    }

    /// Returns `true` while the delay has not elapsed.
    #[inline]
    pub fn is_pending(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for Delayed {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl fmt::Debug for Delayed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delayed")
            .field("pending", &self.is_pending())
            .finish()
    }
}
