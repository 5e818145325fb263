use reqwest::Method;
use tracing::info;
use validator::Validate;

use crate::modules::auth::schema::first_validation_message;
use crate::modules::outfits::{
    model::OutfitItem,
    schema::{
        AddToWardrobeRequest, AddToWardrobeResponse, ComposeRequest, ComposeResponse,
        SearchRequest, SearchResponse, WardrobeDetails,
    },
};
use crate::services::api::{decode, encode, ApiClient, TransportError};

const SEARCH: &str = "/api/outfits/search";
const COMPOSE: &str = "/api/outfits/compose";
const ADD_TO_WARDROBE: &str = "/api/outfits/add-to-wardrobe";

pub struct OutfitsCrud<'a> {
    api: &'a ApiClient,
}

impl<'a> OutfitsCrud<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn search(&self, query: String) -> Result<Vec<OutfitItem>, TransportError> {
        let payload = encode(&SearchRequest { query })?;
        let value = self.api.send_authed(Method::POST, SEARCH, Some(&payload)).await?;
        let response: SearchResponse = decode(value)?;
        Ok(response.items)
    }

    pub async fn compose(&self, request: &ComposeRequest) -> Result<Vec<OutfitItem>, TransportError> {
        let payload = encode(request)?;
        let value = self.api.send_authed(Method::POST, COMPOSE, Some(&payload)).await?;
        let response: ComposeResponse = decode(value)?;
        Ok(response.outfit.search_items)
    }

    /// Returns the backend's confirmation message.
    pub async fn add_to_wardrobe(&self, item: &OutfitItem) -> Result<String, TransportError> {
        let details = WardrobeDetails::from(item);
        details
            .validate()
            .map_err(|e| TransportError::Validation(first_validation_message(&e)))?;

        let payload = encode(&AddToWardrobeRequest {
            item_id: &item.id,
            item_details: &details,
        })?;
        let value = self
            .api
            .send_authed(Method::POST, ADD_TO_WARDROBE, Some(&payload))
            .await?;
        let response: AddToWardrobeResponse = decode(value)?;

        info!(item_id = ?response.item_id, "added search result to wardrobe");
        Ok(response.message)
    }
}
