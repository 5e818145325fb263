use serde::Deserialize;

/// `POST /api/tryon` answers either with an image or an `error` field, with
/// either status code.
#[derive(Debug, Deserialize)]
pub struct TryOnResponse {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TryOnResponse {
    pub fn data_url(&self) -> Option<String> {
        let image = self.image.as_deref().filter(|i| !i.is_empty())?;
        let content_type = self.content_type.as_deref().unwrap_or("image/png");
        Some(format!("data:{content_type};base64,{image}"))
    }
}
