use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct KeywordsQuery<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SaveKeywords<'a> {
    pub email: &'a str,
    pub preferences: &'a [String],
}

#[derive(Debug, Deserialize)]
pub struct KeywordsResponse {
    #[serde(default)]
    pub preferences: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveKeywordsResponse {
    #[serde(default)]
    pub message: String,
}

/// Splits a comma separated keyword list, dropping blanks and repeats.
pub fn parse_keywords(input: &str) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for keyword in input.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        if !keywords.iter().any(|k| k.eq_ignore_ascii_case(keyword)) {
            keywords.push(keyword.to_string());
        }
    }
    keywords
}
