//! Settings loaded from the environment.

use std::env;
use std::error::Error;
use std::fmt::{self, Display};
use std::time::Duration;

use rasa_chat_rest::{RasaConfig, RasaConfigBuilder};

const DEFAULT_BOT_NAME: &str = "Rasa Assistant";

/// Everything the terminal front-end needs to start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Connection settings for the bot server.
    pub rasa: RasaConfig,
    /// Name printed in front of bot messages.
    pub bot_name: String,
    /// Overrides the delay between two revealed characters.
    pub char_delay: Option<Duration>,
    /// Overrides the pause between two typed messages.
    pub message_delay: Option<Duration>,
}

impl Settings {
    /// Loads settings from the process environment.
    ///
    /// Reads `RASA_URL`, `RASA_SENDER_ID`, `RASA_BOT_NAME`,
    /// `RASA_CHAR_DELAY_MS` and `RASA_MESSAGE_DELAY_MS`.
    #[inline]
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Loads settings, reading variables through `lookup`.
    pub fn from_vars<F: Fn(&str) -> Option<String>>(
        lookup: F,
    ) -> Result<Self, SettingsError> {
        let rasa = RasaConfigBuilder::from_vars(&lookup).build();
        let bot_name = lookup("RASA_BOT_NAME")
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_BOT_NAME.to_owned());
        Ok(Self {
            rasa,
            bot_name,
            char_delay: millis(&lookup, "RASA_CHAR_DELAY_MS")?,
            message_delay: millis(&lookup, "RASA_MESSAGE_DELAY_MS")?,
        })
    }
}

fn millis<F: Fn(&str) -> Option<String>>(
    lookup: &F,
    var: &'static str,
) -> Result<Option<Duration>, SettingsError> {
    let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };
    match value.trim().parse::<u64>() {
        Ok(ms) => Ok(Some(Duration::from_millis(ms))),
        Err(_) => Err(SettingsError { var, value }),
    }
}

/// An environment variable holds a value that cannot be used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsError {
    var: &'static str,
    value: String,
}

impl SettingsError {
    /// Returns the name of the offending variable.
    #[inline]
    pub fn var(&self) -> &str {
        self.var
    }

    /// Returns the rejected value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} must be a number of milliseconds, got {:?}",
            self.var, self.value
        )
    }
}

impl Error for SettingsError {}
