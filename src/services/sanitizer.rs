//! Post-processing of free-text assistant replies.
//!
//! The backend embeds product photos in its answers as bare URLs, usually on a
//! dedicated `**Image URL:** <url>` line. The chat view shows those photos as
//! cards, so the reply text itself must come back without them.
//!
//! Product-image URL grammar, with `<prefix>` taken from configuration:
//!
//! ```text
//! <prefix> [A-Za-z0-9_/.-]+ ( "?ts=" [0-9]+ )?      ending on a word boundary
//! ```

use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SanitizerError {
    #[error("Invalid product image pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedReply {
    pub clean_text: String,
    pub image_urls: Vec<String>,
}

#[derive(Debug)]
pub struct Sanitizer {
    product_url: Regex,
    label_line: Regex,
    label: Regex,
    image_url: Regex,
    whitespace: Regex,
}

impl Sanitizer {
    pub fn new(product_image_prefix: &str) -> Result<Self, SanitizerError> {
        let product_url = Regex::new(&format!(
            r"(?i){}[/\w\-.]+(?:\?ts=[0-9]+)?\b",
            regex::escape(product_image_prefix)
        ))?;

        // A line that holds nothing but the label, its value and markdown
        // decoration goes away whole, line break included.
        let label_line = Regex::new(
            r"(?im)^[ \t]*(?:[-*+][ \t]+)?(?:\*\*)?Image[ \t]*URL:(?:\*\*)?[ \t]*\S*[ \t]*(?:\r?\n|$)",
        )?;
        let label = Regex::new(r"(?i)(?:\*\*)?Image\s*URL:(?:\*\*)?")?;
        let image_url =
            Regex::new(r"(?i)https?://\S+\.(?:png|jpe?g|gif|webp)(?:\?\S*)?")?;
        let whitespace = Regex::new(r"\s+")?;

        Ok(Self {
            product_url,
            label_line,
            label,
            image_url,
            whitespace,
        })
    }

    /// Product-image URLs in order of appearance, duplicates kept.
    pub fn extract_image_urls(&self, text: &str) -> Vec<String> {
        self.product_url
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    pub fn sanitize(&self, raw: &str) -> SanitizedReply {
        let image_urls = self.extract_image_urls(raw);

        // After the first pass whitespace is already folded, so every further
        // change strictly shortens the text and the loop terminates.
        let mut clean_text = self.clean_once(raw);
        loop {
            let next = self.clean_once(&clean_text);
            if next == clean_text {
                break;
            }
            clean_text = next;
        }

        SanitizedReply {
            clean_text,
            image_urls,
        }
    }

    // Only deletes text or folds whitespace, never grows it.
    fn clean_once(&self, text: &str) -> String {
        let text = self.label_line.replace_all(text, "");
        let text = self.strip_labels(&text);
        let text = self.image_url.replace_all(&text, "");
        let text = self.product_url.replace_all(&text, "");
        self.whitespace.replace_all(&text, " ").trim().to_string()
    }

    /// Removing one label can splice its neighbours into another
    /// (`Ima` + `Image URL:` + `ge URL:`), so repeat until none is left.
    fn strip_labels(&self, text: &str) -> String {
        let mut text = text.to_string();
        while self.label.is_match(&text) {
            text = self.label.replace_all(&text, "").into_owned();
        }
        text
    }
}
