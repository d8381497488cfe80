use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::future::ready;
use std::time::Duration;

use rasa_chat_model::{
    BotReply, DomainInfo, ErrorKind, ReplyProvider, ReplyProviderError,
    ServerStatus, UserUtterance,
};
use tokio::time::sleep;

#[derive(Debug)]
struct EchoError(ErrorKind);

impl Display for EchoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "echo failed: {}", self.0)
    }
}

impl Error for EchoError {}

impl ReplyProviderError for EchoError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

/// Answers every utterance with one reply per word.
struct EchoProvider;

impl ReplyProvider for EchoProvider {
    type Error = EchoError;

    fn send_message(
        &self,
        utterance: &UserUtterance,
    ) -> impl Future<Output = Result<Vec<BotReply>, Self::Error>> + Send + 'static
    {
        let message = utterance.message.clone();
        async move {
            sleep(Duration::from_millis(1)).await;
            if message.is_empty() {
                return Err(EchoError(ErrorKind::Server));
            }
            Ok(message.split(' ').map(BotReply::text).collect())
        }
    }

    fn check_status(
        &self,
    ) -> impl Future<Output = Result<ServerStatus, Self::Error>> + Send + 'static
    {
        ready(Ok(ServerStatus::default()))
    }

    fn fetch_domain(
        &self,
    ) -> impl Future<Output = Result<DomainInfo, Self::Error>> + Send + 'static
    {
        ready(Err(EchoError(ErrorKind::Other)))
    }
}

mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies() {
        let provider = EchoProvider;
        let utterance = UserUtterance::new("user", "Good morning");
        let replies = provider.send_message(&utterance).await.unwrap();
        let texts: Vec<_> = replies.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["Good", "morning"]);
    }

    #[tokio::test]
    async fn test_error() {
        let provider = EchoProvider;
        let utterance = UserUtterance::new("user", "");
        let err = provider.send_message(&utterance).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.to_string(), "echo failed: server");
    }

    #[tokio::test]
    async fn test_future_outlives_provider() {
        let fut = {
            let provider = EchoProvider;
            provider.send_message(&UserUtterance::new("user", "still here"))
        };
        assert_eq!(fut.await.unwrap().len(), 2);
        assert!(EchoProvider.check_status().await.is_ok());
        assert!(EchoProvider.fetch_domain().await.is_err());
    }
}
