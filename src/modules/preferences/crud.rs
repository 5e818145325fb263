use reqwest::Method;

use crate::modules::preferences::schema::{
    KeywordsQuery, KeywordsResponse, SaveKeywords, SaveKeywordsResponse,
};
use crate::services::api::{decode, encode, ApiClient, TransportError};

const GET_KEYWORDS: &str = "/api/get_keywords";
const SAVE_KEYWORDS: &str = "/api/save_keywords";

/// Style keywords stored per email address.
pub struct PreferencesCrud<'a> {
    api: &'a ApiClient,
}

impl<'a> PreferencesCrud<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    fn email(&self) -> Result<String, TransportError> {
        self.api
            .sessions()
            .load()?
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or(TransportError::Unauthenticated)
    }

    /// A user the backend has no keywords for yet gets an empty list.
    pub async fn find(&self) -> Result<Vec<String>, TransportError> {
        let email = self.email()?;
        let payload = encode(&KeywordsQuery { email: &email })?;

        match self
            .api
            .send_authed(Method::POST, GET_KEYWORDS, Some(&payload))
            .await
        {
            Ok(value) => Ok(decode::<KeywordsResponse>(value)?.preferences),
            Err(TransportError::ServerError { status: 404, .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    pub async fn save(&self, preferences: &[String]) -> Result<String, TransportError> {
        let email = self.email()?;
        let payload = encode(&SaveKeywords {
            email: &email,
            preferences,
        })?;
        let value = self
            .api
            .send_authed(Method::POST, SAVE_KEYWORDS, Some(&payload))
            .await?;
        let response: SaveKeywordsResponse = decode(value)?;
        Ok(response.message)
    }
}
