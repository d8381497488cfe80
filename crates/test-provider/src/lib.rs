//! A scripted, in-memory reply provider for tests.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::future::ready;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rasa_chat_model::{
    BotReply, DomainInfo, ErrorKind, ReplyProvider, ReplyProviderError,
    ServerStatus, UserUtterance,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

impl StdError for Error {}

impl ReplyProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

#[derive(Default)]
struct Script {
    turns: VecDeque<PresetTurn>,
    received: Vec<UserUtterance>,
    online: bool,
    domain: Option<DomainInfo>,
    status_checks: usize,
}

/// A reply provider that plays back a script.
///
/// Each utterance consumes the next [`PresetTurn`]; once the script runs
/// out every further send fails. Clones share the same script, so a test
/// can keep one clone around to add turns or inspect what was sent.
///
/// # Note
///
/// Meant for tests only. Every call locks a mutex and copies replies.
#[derive(Clone, Default)]
pub struct TestReplyProvider {
    script: Arc<Mutex<Script>>,
    delay: Option<Duration>,
}

impl TestReplyProvider {
    /// Appends a turn to the script.
    #[inline]
    pub fn add_turn(&self, turn: PresetTurn) {
        self.lock().turns.push_back(turn);
    }

    /// Sets the latency applied to turns without their own delay.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Sets what the status endpoint reports.
    #[inline]
    pub fn set_online(&self, online: bool) {
        self.lock().online = online;
    }

    /// Sets the domain returned by [`ReplyProvider::fetch_domain`].
    #[inline]
    pub fn set_domain(&self, domain: DomainInfo) {
        self.lock().domain = Some(domain);
    }

    /// Returns every utterance received so far.
    pub fn received(&self) -> Vec<UserUtterance> {
        self.lock().received.clone()
    }

    /// Returns how many times the status endpoint was queried.
    pub fn status_checks(&self) -> usize {
        self.lock().status_checks
    }

    /// Returns the number of turns not consumed yet.
    pub fn remaining_turns(&self) -> usize {
        self.lock().turns.len()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        // A panicking test thread must not hide the script from the others.
        self.script.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl ReplyProvider for TestReplyProvider {
    type Error = crate::Error;

    fn send_message(
        &self,
        utterance: &UserUtterance,
    ) -> impl Future<Output = Result<Vec<BotReply>, Self::Error>> + Send + 'static
    {
        let turn = {
            let mut script = self.lock();
            script.received.push(utterance.clone());
            script.turns.pop_front()
        };
        let delay = turn
            .as_ref()
            .and_then(|t| t.delay_ms.map(Duration::from_millis))
            .or(self.delay)
            .unwrap_or(Duration::from_millis(1));

        async move {
            sleep(delay).await;
            let Some(turn) = turn else {
                return Err(Error {
                    message: "script exhausted",
                    kind: ErrorKind::Other,
                });
            };
            if turn.fail {
                return Err(Error {
                    message: "scripted failure",
                    kind: ErrorKind::Connection,
                });
            }
            Ok(turn.replies)
        }
    }

    fn check_status(
        &self,
    ) -> impl Future<Output = Result<ServerStatus, Self::Error>> + Send + 'static
    {
        let mut script = self.lock();
        script.status_checks += 1;
        let result = if script.online {
            Ok(ServerStatus {
                model_id: Some("test".to_owned()),
                ..Default::default()
            })
        } else {
            Err(Error {
                message: "server is offline",
                kind: ErrorKind::Connection,
            })
        };
        ready(result)
    }

    fn fetch_domain(
        &self,
    ) -> impl Future<Output = Result<DomainInfo, Self::Error>> + Send + 'static
    {
        let result = self.lock().domain.clone().ok_or(Error {
            message: "no domain configured",
            kind: ErrorKind::Server,
        });
        ready(result)
    }
}
