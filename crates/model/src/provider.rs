use std::error::Error;

use crate::error::ErrorKind;
use crate::reply::BotReply;
use crate::server::{DomainInfo, ServerStatus};
use crate::utterance::UserUtterance;

/// The error type for a reply provider.
pub trait ReplyProviderError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A backend that answers user utterances.
///
/// Providers should behave like stateless objects: every returned future
/// must be independent of `self`, so callers may drop the provider while
/// requests are still in flight.
pub trait ReplyProvider: Send + Sync {
    /// The error type that may be returned by the provider.
    type Error: ReplyProviderError;

    /// Sends one utterance and resolves to the replies, in display order.
    ///
    /// An empty vector is a valid answer meaning the bot had nothing to
    /// say.
    fn send_message(
        &self,
        utterance: &UserUtterance,
    ) -> impl Future<Output = Result<Vec<BotReply>, Self::Error>> + Send + 'static;

    /// Queries the health endpoint of the backend.
    fn check_status(
        &self,
    ) -> impl Future<Output = Result<ServerStatus, Self::Error>> + Send + 'static;

    /// Fetches the bot's domain (intents, actions and so on).
    fn fetch_domain(
        &self,
    ) -> impl Future<Output = Result<DomainInfo, Self::Error>> + Send + 'static;
}
