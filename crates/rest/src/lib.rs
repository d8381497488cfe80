//! A reply provider for the REST channel of a Rasa server.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod config;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use mime::Mime;
use rasa_chat_model::{
    BotReply, DomainInfo, ErrorKind, ReplyProvider, ReplyProviderError,
    ServerStatus, UserUtterance,
};
use reqwest::{Client, RequestBuilder, Response, header};
use serde::de::DeserializeOwned;

pub use config::{RasaConfig, RasaConfigBuilder};

/// Error type for [`RasaProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    fn from_reqwest(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() || err.is_request() {
            ErrorKind::Connection
        } else if err.is_status() {
            ErrorKind::Server
        } else if err.is_decode() || err.is_body() {
            ErrorKind::Decode
        } else {
            ErrorKind::Other
        };
        Self::new(format!("{err}"), kind)
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.kind, self.message)
    }
}

impl StdError for Error {}

impl ReplyProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Talks to a Rasa server over HTTP.
#[derive(Clone, Debug)]
pub struct RasaProvider {
    client: Client,
    config: Arc<RasaConfig>,
}

impl RasaProvider {
    /// Creates a new `RasaProvider` with the given configuration.
    #[inline]
    pub fn new(config: RasaConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Returns the configuration in use.
    #[inline]
    pub fn config(&self) -> &RasaConfig {
        &self.config
    }

    fn get(&self, url: String) -> RequestBuilder {
        debug!("GET {url}");
        self.client
            .get(url)
            .timeout(self.config.timeout)
            .header(header::ACCEPT, "application/json")
    }
}

impl ReplyProvider for RasaProvider {
    type Error = Error;

    fn send_message(
        &self,
        utterance: &UserUtterance,
    ) -> impl Future<Output = Result<Vec<BotReply>, Self::Error>> + Send + 'static
    {
        let url = self.config.webhook_url();
        debug!("POST {url}");
        let req = self
            .client
            .post(url)
            .timeout(self.config.timeout)
            .header(header::ACCEPT, "application/json")
            .json(utterance);

        async move {
            let replies: Vec<BotReply> = fetch_json(req).await?;
            trace!("got {} replies", replies.len());
            Ok(replies)
        }
    }

    fn check_status(
        &self,
    ) -> impl Future<Output = Result<ServerStatus, Self::Error>> + Send + 'static
    {
        fetch_json(self.get(self.config.status_url()))
    }

    fn fetch_domain(
        &self,
    ) -> impl Future<Output = Result<DomainInfo, Self::Error>> + Send + 'static
    {
        fetch_json(self.get(self.config.domain_url()))
    }
}

async fn fetch_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, Error> {
    let resp = req
        .send()
        .await
        .and_then(Response::error_for_status)
        .map_err(Error::from_reqwest)?;

    // A missing content type is tolerated, anything else must be JSON.
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned);
    if let Some(content_type) = &content_type {
        let is_json = content_type
            .parse::<Mime>()
            .map(|m| m.subtype() == mime::JSON || m.suffix() == Some(mime::JSON))
            .unwrap_or(false);
        if !is_json {
            return Err(Error::new(
                format!("unexpected content type: {content_type}"),
                ErrorKind::Decode,
            ));
        }
    }

    let body = resp.bytes().await.map_err(Error::from_reqwest)?;
    serde_json::from_slice(&body)
        .map_err(|err| Error::new(format!("{err}"), ErrorKind::Decode))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_json, header as header_eq, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn provider_for(server: &MockServer) -> RasaProvider {
        RasaProvider::new(
            RasaConfigBuilder::default()
                .with_base_url(server.uri())
                .with_timeout(Duration::from_millis(200))
                .build(),
        )
    }

    #[tokio::test]
    async fn test_send_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/webhooks/rest/webhook"))
            .and(body_json(json!({"sender": "user", "message": "hi"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"recipient_id": "user", "text": "Hello!"},
                {
                    "recipient_id": "user",
                    "text": "Pick one",
                    "buttons": [{"title": "Flu", "payload": "/flu"}]
                }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let replies = provider_for(&server)
            .send_message(&UserUtterance::new("user", "hi"))
            .await
            .unwrap();
        assert_eq!(
            replies,
            [
                BotReply::text("Hello!"),
                BotReply::text("Pick one").with_button("Flu", "/flu"),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_reply_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let replies = provider_for(&server)
            .send_message(&UserUtterance::new("user", "???"))
            .await
            .unwrap();
        assert!(replies.is_empty());
    }

    #[tokio::test]
    async fn test_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .send_message(&UserUtterance::new("user", "hi"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Server);
    }

    #[tokio::test]
    async fn test_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html>oops</html>", "text/html"),
            )
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .send_message(&UserUtterance::new("user", "hi"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(r#"{"text": "not an array"}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .send_message(&UserUtterance::new("user", "hi"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([]))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .send_message(&UserUtterance::new("user", "hi"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Timeout);
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Grab a free port, then release it so nothing listens there.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let provider = RasaProvider::new(
            RasaConfigBuilder::default()
                .with_base_url(format!("http://{addr}"))
                .with_timeout(Duration::from_secs(2))
                .build(),
        );

        let err = provider
            .send_message(&UserUtterance::new("user", "hi"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connection);
    }

    #[tokio::test]
    async fn test_status_and_domain() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "model_file": "models/latest.tar.gz",
                "model_id": "9d0e",
                "num_active_training_jobs": 0
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/domain"))
            .and(header_eq("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "intents": ["greet", "goodbye"],
                "actions": ["action_check_symptoms"]
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let status = provider.check_status().await.unwrap();
        assert_eq!(status.model_id.as_deref(), Some("9d0e"));

        let domain = provider.fetch_domain().await.unwrap();
        assert_eq!(domain.intent_names(), ["greet", "goodbye"]);
        assert_eq!(domain.actions, ["action_check_symptoms"]);
    }
}
