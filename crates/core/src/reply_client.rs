use std::fmt;
use std::pin::Pin;
use std::sync::Arc;

use rasa_chat_model::{
    BotReply, DomainInfo, ReplyProvider, ReplyProviderError, ServerStatus,
    UserUtterance,
};
use tracing::Instrument;

/// Type-erased provider error.
pub type ReplyError = Box<dyn ReplyProviderError>;

type BoxedFuture<T> = Pin<Box<dyn Future<Output = Result<T, ReplyError>> + Send>>;

/// A cloneable, type-erased wrapper around a [`ReplyProvider`].
///
/// The chat and the connection monitor only need the provider's behavior,
/// not its type, so they hold one of these instead of a generic parameter.
#[derive(Clone)]
pub struct ReplyClient {
    provider: Arc<dyn ProviderObject>,
}

impl ReplyClient {
    /// Wraps a provider.
    #[inline]
    pub fn new<P: ReplyProvider + 'static>(provider: P) -> Self {
        Self {
            provider: Arc::new(AnyProvider(provider)),
        }
    }

    /// Sends an utterance and waits for the replies.
    ///
    /// # Cancel safety
    ///
    /// This method is cancel safe; dropping the future abandons the
    /// request.
    #[inline]
    pub async fn send_message(
        &self,
        utterance: UserUtterance,
    ) -> Result<Vec<BotReply>, ReplyError> {
        self.provider.send_message(utterance).await
    }

    /// Queries the server's health endpoint.
    #[inline]
    pub async fn check_status(&self) -> Result<ServerStatus, ReplyError> {
        self.provider.check_status().await
    }

    /// Fetches the bot's domain.
    #[inline]
    pub async fn fetch_domain(&self) -> Result<DomainInfo, ReplyError> {
        self.provider.fetch_domain().await
    }
}

impl fmt::Debug for ReplyClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplyClient").finish_non_exhaustive()
    }
}

trait ProviderObject: Send + Sync + 'static {
    fn send_message(&self, utterance: UserUtterance) -> BoxedFuture<Vec<BotReply>>;

    fn check_status(&self) -> BoxedFuture<ServerStatus>;

    fn fetch_domain(&self) -> BoxedFuture<DomainInfo>;
}

struct AnyProvider<P>(P);

impl<P: ReplyProvider + 'static> ProviderObject for AnyProvider<P> {
    fn send_message(&self, utterance: UserUtterance) -> BoxedFuture<Vec<BotReply>> {
        let fut = self.0.send_message(&utterance);
        Box::pin(
            async move {
                trace!("sending {utterance:?}");
                fut.await.map_err(|err| {
                    error!("send failed ({}): {err}", err.kind());
                    Box::new(err) as ReplyError
                })
            }
            .instrument(trace_span!("reply client send")),
        )
    }

    fn check_status(&self) -> BoxedFuture<ServerStatus> {
        let fut = self.0.check_status();
        Box::pin(async move { fut.await.map_err(|err| Box::new(err) as ReplyError) })
    }

    fn fetch_domain(&self) -> BoxedFuture<DomainInfo> {
        let fut = self.0.fetch_domain();
        Box::pin(async move { fut.await.map_err(|err| Box::new(err) as ReplyError) })
    }
}

#[cfg(test)]
mod tests {
    use rasa_chat_model::ErrorKind;
    use rasa_chat_test_provider::{PresetTurn, TestReplyProvider};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_send_message() {
        let provider = TestReplyProvider::default();
        provider.add_turn(PresetTurn::with_texts(["How ", "are you?"]));
        let client = ReplyClient::new(provider.clone());

        let replies = client
            .send_message(UserUtterance::new("user", "Hi"))
            .await
            .unwrap();
        assert_eq!(replies.len(), 2);
        assert_eq!(provider.received()[0].message, "Hi");
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_handling() {
        let client = ReplyClient::new(TestReplyProvider::default());
        let err = client
            .send_message(UserUtterance::new("user", "Hi"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
        assert!(client.fetch_domain().await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_domain() {
        let provider = TestReplyProvider::default();
        provider.set_domain(DomainInfo {
            actions: vec!["action_suggest_treatment".to_owned()],
            ..Default::default()
        });
        let client = ReplyClient::new(provider);

        let domain = client.fetch_domain().await.unwrap();
        assert_eq!(domain.actions, ["action_suggest_treatment"]);
    }
}
