use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    pub category: String,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_backend_field_names() {
        let request = ChatRequest {
            message: "red dress".to_string(),
            image_base64: Some("data:image/jpeg;base64,AA".to_string()),
            category: "No Category".to_string(),
            email: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["imageBase64"], "data:image/jpeg;base64,AA");
        assert_eq!(json["category"], "No Category");
        assert!(json["email"].is_null());
    }
}
