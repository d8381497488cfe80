use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:5005";
const DEFAULT_WEBHOOK_PATH: &str = "/webhooks/rest/webhook";
const DEFAULT_STATUS_PATH: &str = "/status";
const DEFAULT_DOMAIN_PATH: &str = "/domain";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_SENDER_ID: &str = "user";

/// Builder for [`RasaConfig`].
///
/// Every setting has a default matching a stock local server, so
/// `RasaConfigBuilder::default().build()` talks to `localhost:5005`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RasaConfigBuilder {
    base_url: Option<String>,
    webhook_path: Option<String>,
    status_path: Option<String>,
    domain_path: Option<String>,
    timeout: Option<Duration>,
    sender_id: Option<String>,
}

impl RasaConfigBuilder {
    /// Creates a builder with overrides taken from the environment.
    ///
    /// Reads `RASA_URL` and `RASA_SENDER_ID`. Unset or empty variables
    /// leave the defaults in place.
    #[inline]
    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), but reads variables through
    /// `lookup`.
    pub fn from_vars<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        Self {
            base_url: var("RASA_URL"),
            sender_id: var("RASA_SENDER_ID"),
            ..Default::default()
        }
    }

    /// Sets the server's base URL, e.g. `http://localhost:5005`.
    #[inline]
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the path of the REST webhook.
    #[inline]
    pub fn with_webhook_path<S: Into<String>>(mut self, path: S) -> Self {
        self.webhook_path = Some(path.into());
        self
    }

    /// Sets the path of the health endpoint.
    #[inline]
    pub fn with_status_path<S: Into<String>>(mut self, path: S) -> Self {
        self.status_path = Some(path.into());
        self
    }

    /// Sets the path of the domain endpoint.
    #[inline]
    pub fn with_domain_path<S: Into<String>>(mut self, path: S) -> Self {
        self.domain_path = Some(path.into());
        self
    }

    /// Sets the per-request timeout.
    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the sender identifier the server uses to track the conversation.
    #[inline]
    pub fn with_sender_id<S: Into<String>>(mut self, sender_id: S) -> Self {
        self.sender_id = Some(sender_id.into());
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> RasaConfig {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        RasaConfig {
            base_url: base_url.trim_end_matches('/').to_owned(),
            webhook_path: self
                .webhook_path
                .unwrap_or_else(|| DEFAULT_WEBHOOK_PATH.to_owned()),
            status_path: self
                .status_path
                .unwrap_or_else(|| DEFAULT_STATUS_PATH.to_owned()),
            domain_path: self
                .domain_path
                .unwrap_or_else(|| DEFAULT_DOMAIN_PATH.to_owned()),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            sender_id: self
                .sender_id
                .unwrap_or_else(|| DEFAULT_SENDER_ID.to_owned()),
        }
    }
}

/// Configuration for [`crate::RasaProvider`]. Static once built.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RasaConfig {
    pub(crate) base_url: String,
    pub(crate) webhook_path: String,
    pub(crate) status_path: String,
    pub(crate) domain_path: String,
    pub(crate) timeout: Duration,
    pub(crate) sender_id: String,
}

impl RasaConfig {
    /// Returns the base URL, without a trailing slash.
    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the per-request timeout.
    #[inline]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the sender identifier.
    #[inline]
    pub fn sender_id(&self) -> &str {
        &self.sender_id
    }

    pub(crate) fn webhook_url(&self) -> String {
        format!("{}{}", self.base_url, self.webhook_path)
    }

    pub(crate) fn status_url(&self) -> String {
        format!("{}{}", self.base_url, self.status_path)
    }

    pub(crate) fn domain_url(&self) -> String {
        format!("{}{}", self.base_url, self.domain_path)
    }
}
