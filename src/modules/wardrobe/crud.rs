use reqwest::Method;
use validator::Validate;

use crate::modules::auth::schema::first_validation_message;
use crate::modules::wardrobe::{
    model::WardrobeItem,
    schema::{NewWardrobeItem, WardrobeItemResponse, WardrobeListResponse, PLACEHOLDER_IMAGE_URL},
};
use crate::services::api::{decode, encode, ApiClient, TransportError};

const ENDPOINT: &str = "/api/profile/wardrobe";

pub struct WardrobeCrud<'a> {
    api: &'a ApiClient,
}

impl<'a> WardrobeCrud<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn find_all(&self) -> Result<Vec<WardrobeItem>, TransportError> {
        let value = self.api.send_authed(Method::GET, ENDPOINT, None).await?;
        let response: WardrobeListResponse = decode(value)?;
        Ok(response.data)
    }

    pub async fn create(&self, mut item: NewWardrobeItem) -> Result<WardrobeItem, TransportError> {
        item.validate()
            .map_err(|e| TransportError::Validation(first_validation_message(&e)))?;

        if item.image_url.trim().is_empty() {
            item.image_url = PLACEHOLDER_IMAGE_URL.to_string();
        }

        let payload = encode(&item)?;
        let value = self
            .api
            .send_authed(Method::POST, ENDPOINT, Some(&payload))
            .await?;
        let response: WardrobeItemResponse = decode(value)?;
        Ok(response.data)
    }

    pub async fn delete(&self, id: &str) -> Result<(), TransportError> {
        if id.trim().is_empty() {
            return Err(TransportError::Validation("Missing wardrobe item id".to_string()));
        }

        self.api
            .send_authed(Method::DELETE, &format!("{ENDPOINT}/{id}"), None)
            .await?;
        Ok(())
    }
}
