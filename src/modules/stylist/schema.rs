use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::modules::catalog::schema::toggle;
use crate::modules::stylist::model::{
    Consultation, ConsultationQuestion, ConsultationType, StylePreference,
};

/// Body of `POST /api/stylist/consultations`.
#[derive(Debug, Clone, Default, Serialize, Validate)]
pub struct NewConsultation {
    /// `YYYY-MM-DD`.
    #[validate(length(min = 1, message = "Please pick a date"))]
    pub date: String,
    #[validate(length(min = 1, message = "Please select at least one focus area"))]
    pub focus_areas: Vec<String>,
    pub questions: Vec<ConsultationQuestion>,
    pub style_preferences: Vec<StylePreference>,
    pub consultation_type: ConsultationType,
}

impl NewConsultation {
    pub fn toggle_focus_area(&mut self, id: &str) {
        toggle(&mut self.focus_areas, id);
    }

    pub fn add_question(&mut self, text: impl Into<String>) {
        let id = format!("q_{}", self.questions.len() + 1);
        self.questions.push(ConsultationQuestion {
            id,
            text: text.into(),
        });
    }
}

#[derive(Debug, Serialize)]
pub struct AdviceRequest<'a> {
    pub query: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct Advice {
    #[serde(default)]
    pub query: String,
    pub advice: String,
}

#[derive(Debug, Deserialize)]
pub struct AdviceResponse {
    pub data: Advice,
}

#[derive(Debug, Deserialize)]
pub struct ConsultationListResponse {
    #[serde(default)]
    pub data: Vec<Consultation>,
}

#[derive(Debug, Deserialize)]
pub struct ConsultationResponse {
    pub data: Consultation,
}
