use rasa_chat_model::BotReply;
use serde::{Deserialize, Serialize};

/// How the provider answers one utterance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresetTurn {
    /// Replies returned on success, in order.
    #[serde(default)]
    pub replies: Vec<BotReply>,
    /// If set, the turn fails with a connection error instead.
    #[serde(default)]
    pub fail: bool,
    /// Extra latency for this turn, overriding the provider-wide delay.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
}

impl PresetTurn {
    /// A turn answering with the given replies.
    #[inline]
    pub fn with_replies(replies: impl Into<Vec<BotReply>>) -> Self {
        Self {
            replies: replies.into(),
            ..Default::default()
        }
    }

    /// A turn answering with plain text replies.
    #[inline]
    pub fn with_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_replies(
            texts.into_iter().map(BotReply::text).collect::<Vec<_>>(),
        )
    }

    /// A turn answering with no replies at all.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A turn that fails.
    #[inline]
    pub fn failure() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// Sets the latency of this turn.
    #[inline]
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_script() {
        let script: Vec<PresetTurn> = serde_json::from_value(json!([
            {"replies": [{"text": "Hi!", "buttons": [{"title": "Yes", "payload": "/affirm"}]}]},
            {"fail": true, "delay_ms": 50},
            {}
        ]))
        .unwrap();

        assert_eq!(
            script,
            [
                PresetTurn::with_replies([
                    BotReply::text("Hi!").with_button("Yes", "/affirm")
                ]),
                PresetTurn::failure().with_delay_ms(50),
                PresetTurn::empty(),
            ]
        );
    }
}
