use reqwest::Method;

use crate::modules::favorites::{model::FavoriteProduct, schema::FavoritesResponse};
use crate::services::api::{decode, ApiClient, TransportError};

const ENDPOINT: &str = "/api/profile/favorites";

pub struct FavoritesCrud<'a> {
    api: &'a ApiClient,
}

impl<'a> FavoritesCrud<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn find_all(&self) -> Result<Vec<FavoriteProduct>, TransportError> {
        let value = self.api.send_authed(Method::GET, ENDPOINT, None).await?;
        let response: FavoritesResponse = decode(value)?;
        Ok(response.data)
    }

    pub async fn delete(&self, id: &str) -> Result<(), TransportError> {
        if id.trim().is_empty() {
            return Err(TransportError::Validation("Missing favorite id".to_string()));
        }

        self.api
            .send_authed(Method::DELETE, &format!("{ENDPOINT}/{id}"), None)
            .await?;
        Ok(())
    }
}
