use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_CATEGORY: &str = "No Category";

/// Product categories the recommendation backend has an index for.
pub const CATEGORIES: &[&str] = &[
    "clip_BASICS",
    "clip_BLAZERS",
    "clip_DRESSES_JUMPSUITS",
    "clip_JACKETS",
    "clip_KNITWEAR",
    "clip_men_BLAZERS",
    "clip_men_HOODIES_SWEATSHIRTS",
    "clip_men_LINEN",
    "clip_men_OVERSHIRTS",
    "clip_men_POLO_SHIRTS",
    "clip_men_SHIRTS",
    "clip_men_SHOES",
    "clip_men_SHORTS",
    "clip_men_SWEATERS_CARDIGANS",
    "clip_men_T-SHIRTS",
    "clip_men_TROUSERS",
    "clip_SHIRTS",
    "clip_SHOES",
    "clip_WAISTCOATS_GILETS",
    DEFAULT_CATEGORY,
    "beymen_women_sweatshirts",
    "beymen_women_skirts",
    "beymen_women_jackets",
    "beymen_women_dresses",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One conversational turn. Attachments only exist on user messages and
/// product images only on bot messages; the constructors are the only way to
/// build one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    text: String,
    sender: Sender,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_urls: Option<Vec<String>>,
    created_at: DateTime<Utc>,
}

impl Message {
    pub fn user(
        text: impl Into<String>,
        image_base64: Option<String>,
        category: Option<String>,
    ) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            image_base64,
            category,
            image_urls: None,
            created_at: Utc::now(),
        }
    }

    pub fn bot(text: impl Into<String>, image_urls: Vec<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            image_base64: None,
            category: None,
            image_urls: Some(image_urls),
            created_at: Utc::now(),
        }
    }

    /// Bot-side notice for a failed turn; carries no product images.
    pub fn bot_error(text: impl Into<String>) -> Self {
        Self {
            image_urls: None,
            ..Self::bot(text, Vec::new())
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn image_base64(&self) -> Option<&str> {
        self.image_base64.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn image_urls(&self) -> &[String] {
        self.image_urls.as_deref().unwrap_or_default()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Append-only conversation log.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Replaces the whole conversation with a single bot greeting.
    pub fn reset(&mut self, greeting: impl Into<String>) {
        self.messages.clear();
        self.messages.push(Message::bot(greeting, Vec::new()));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Where a turn leaves the user when the backend no longer accepts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginRedirect {
    pub after: Duration,
}

pub fn welcome_greeting(name: &str) -> String {
    format!(
        "Hello {name}! I'm your fashion assistant. How can I help with your style needs today? You can ask for outfit suggestions, search for specific products, or upload a photo to find similar items."
    )
}

pub fn clear_greeting(name: &str) -> String {
    format!("Hello {name}! I'm your fashion assistant. How can I help with your style needs today?")
}
