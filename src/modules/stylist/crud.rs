use reqwest::Method;
use validator::Validate;

use crate::modules::auth::schema::first_validation_message;
use crate::modules::stylist::{
    model::Consultation,
    schema::{
        AdviceRequest, AdviceResponse, ConsultationListResponse, ConsultationResponse,
        NewConsultation,
    },
};
use crate::services::api::{decode, encode, ApiClient, TransportError};

const CONSULTATIONS: &str = "/api/stylist/consultations";
const ADVICE: &str = "/api/stylist/generate-advice";

pub struct StylistCrud<'a> {
    api: &'a ApiClient,
}

impl<'a> StylistCrud<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn find_all(&self) -> Result<Vec<Consultation>, TransportError> {
        let value = self.api.send_authed(Method::GET, CONSULTATIONS, None).await?;
        let response: ConsultationListResponse = decode(value)?;
        Ok(response.data)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Consultation, TransportError> {
        if id.trim().is_empty() {
            return Err(TransportError::Validation("Missing consultation id".to_string()));
        }

        let value = self
            .api
            .send_authed(Method::GET, &format!("{CONSULTATIONS}/{id}"), None)
            .await?;
        let response: ConsultationResponse = decode(value)?;
        Ok(response.data)
    }

    /// Blank questions are dropped before sending.
    pub async fn create(&self, mut consultation: NewConsultation) -> Result<Consultation, TransportError> {
        consultation
            .validate()
            .map_err(|e| TransportError::Validation(first_validation_message(&e)))?;

        consultation.questions.retain(|q| !q.text.trim().is_empty());

        let payload = encode(&consultation)?;
        let value = self
            .api
            .send_authed(Method::POST, CONSULTATIONS, Some(&payload))
            .await?;
        let response: ConsultationResponse = decode(value)?;
        Ok(response.data)
    }

    pub async fn generate_advice(&self, query: &str) -> Result<String, TransportError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(TransportError::Validation("Ask the stylist a question first".to_string()));
        }

        let payload = encode(&AdviceRequest { query })?;
        let value = self.api.send_authed(Method::POST, ADVICE, Some(&payload)).await?;
        let response: AdviceResponse = decode(value)?;
        Ok(response.data.advice)
    }
}
