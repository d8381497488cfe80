//! Periodic health checks against the bot server.

use std::fmt::{self, Display};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::Instrument;

use crate::reply_client::ReplyClient;

/// Whether the bot server answered its last health check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ConnectionStatus {
    /// No check has finished yet.
    #[default]
    Unknown,
    /// The last check succeeded.
    Online,
    /// The last check failed.
    Offline,
}

impl Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectionStatus::Unknown => "connecting",
            ConnectionStatus::Online => "online",
            ConnectionStatus::Offline => "offline",
        };
        f.write_str(s)
    }
}

/// Polls the server's status endpoint in the background.
///
/// The first check runs right away, the following ones every `interval`.
/// The poll task stops when the monitor is dropped.
pub struct ConnectionMonitor {
    status_rx: watch::Receiver<ConnectionStatus>,
    checking_rx: watch::Receiver<bool>,
    task: JoinHandle<()>,
}

impl ConnectionMonitor {
    /// The polling interval used by the terminal front-end.
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

    /// Starts polling. Must be called from within a tokio runtime.
    pub fn spawn(client: ReplyClient, every: Duration) -> Self {
        let (status_tx, status_rx) = watch::channel(ConnectionStatus::Unknown);
        let (checking_tx, checking_rx) = watch::channel(false);

        let task = tokio::spawn(
            async move {
                let mut ticker = interval(every);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;

                    checking_tx.send_replace(true);
                    let status = match client.check_status().await {
                        Ok(status) => {
                            trace!("status: {status:?}");
                            ConnectionStatus::Online
                        }
                        Err(err) => {
                            debug!("status check failed: {err}");
                            ConnectionStatus::Offline
                        }
                    };
                    checking_tx.send_replace(false);

                    let previous = status_tx.send_replace(status);
                    if previous != status {
                        info!("server is {status}");
                    }
                }
            }
            .instrument(trace_span!("connection monitor")),
        );

        Self {
            status_rx,
            checking_rx,
            task,
        }
    }

    /// Returns the latest status.
    #[inline]
    pub fn status(&self) -> ConnectionStatus {
        *self.status_rx.borrow()
    }

    /// Returns `true` while a check is in flight.
    #[inline]
    pub fn is_checking(&self) -> bool {
        *self.checking_rx.borrow()
    }

    /// Returns a receiver notified whenever the status is updated.
    #[inline]
    pub fn subscribe(&self) -> watch::Receiver<ConnectionStatus> {
        self.status_rx.clone()
    }

    /// Stops polling.
    #[inline]
    pub fn stop(self) {
        drop(self);
    }
}

impl Drop for ConnectionMonitor {
    fn drop(&mut self) {
        self.task.abort();
    }
}
