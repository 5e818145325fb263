use reqwest::multipart::Form;
use tracing::{error, info};

use crate::modules::tryon::{model::TryOnState, schema::TryOnResponse};
use crate::services::api::{decode, TransportError};
use crate::AppState;

pub const MISSING_INPUT_MESSAGE: &str = "Both your photo and a clothing item are required";

/// Submits the photo and clothing image and records the outcome on `state`.
/// Failures end up in `state.error`; the returned error is for logging only.
pub async fn process(state: &AppState, tryon: &mut TryOnState) -> Result<(), TransportError> {
    let (Some(photo), Some(clothing)) = (tryon.user_photo.clone(), tryon.image_url.clone())
    else {
        tryon.error = Some(MISSING_INPUT_MESSAGE.to_string());
        return Err(TransportError::Validation(MISSING_INPUT_MESSAGE.to_string()));
    };

    tryon.is_loading = true;
    tryon.error = None;

    let result = submit(state, photo, clothing).await;
    tryon.is_loading = false;

    match result {
        Ok(data_url) => {
            info!("try-on result received");
            tryon.result_image = Some(data_url);
            Ok(())
        }
        Err(e) => {
            error!("Try-on processing error: {}", e);
            tryon.error = Some(e.to_string());
            Err(e)
        }
    }
}

async fn submit(
    state: &AppState,
    avatar_image_url: String,
    clothing_image_url: String,
) -> Result<String, TransportError> {
    let form = Form::new()
        .text("avatar_image_url", avatar_image_url)
        .text("clothing_image_url", clothing_image_url);

    let value = state
        .api
        .post_multipart("/api/tryon", form, state.config.tryon_timeout)
        .await?;
    let response: TryOnResponse = decode(value)?;

    if let Some(message) = response.error.clone() {
        return Err(TransportError::ServerError {
            status: 200,
            message,
        });
    }

    response.data_url().ok_or_else(|| {
        TransportError::InvalidResponse("No image was returned from the server".to_string())
    })
}
