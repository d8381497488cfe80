use serde::{Deserialize, Serialize};

/// A quick-reply button attached to a bot reply.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Button {
    /// Label shown to the user.
    pub title: String,
    /// Text sent back to the bot when the button is pressed.
    pub payload: String,
}

/// One element of the webhook's reply array.
///
/// The server omits fields it has nothing for, so everything defaults.
/// `text` may legitimately be empty, e.g. for image-only replies.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BotReply {
    /// Reply text.
    #[serde(default)]
    pub text: String,
    /// Quick-reply buttons, in display order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<Button>,
    /// URL of an attached image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl BotReply {
    /// Creates a text-only reply.
    #[inline]
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Appends a quick-reply button.
    #[inline]
    pub fn with_button<T: Into<String>, P: Into<String>>(
        mut self,
        title: T,
        payload: P,
    ) -> Self {
        self.buttons.push(Button {
            title: title.into(),
            payload: payload.into(),
        });
        self
    }

    /// Attaches an image URL.
    #[inline]
    pub fn with_image<S: Into<String>>(mut self, url: S) -> Self {
        self.image = Some(url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_sparse_replies() {
        let replies: Vec<BotReply> = serde_json::from_str(
            r#"[
                {"recipient_id": "user", "text": "Hey!"},
                {"recipient_id": "user", "image": "https://i.imgur.com/nGF1K8f.jpg"},
                {
                    "recipient_id": "user",
                    "text": "How are you?",
                    "buttons": [{"title": "Great", "payload": "/mood_great"}],
                    "image": null
                }
            ]"#,
        )
        .unwrap();

        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0], BotReply::text("Hey!"));
        assert_eq!(replies[1].text, "");
        assert_eq!(
            replies[1].image.as_deref(),
            Some("https://i.imgur.com/nGF1K8f.jpg")
        );
        assert_eq!(
            replies[2],
            BotReply::text("How are you?").with_button("Great", "/mood_great")
        );
    }
}
