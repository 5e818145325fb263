use chrono::Local;
use tracing::warn;

use crate::modules::stylist::{
    crud::StylistCrud,
    model::{focus_area_name, FOCUS_AREAS},
    schema::NewConsultation,
};
use crate::services::api::TransportError;
use crate::AppState;

pub const ADVICE_FALLBACK: &str =
    "Sorry, I couldn't process your question at the moment. Please try again later.";

/// Asks the stylist a one-off question. Backend failures degrade to
/// [`ADVICE_FALLBACK`]; only input and session errors are returned.
pub async fn ask(state: &AppState, query: &str) -> Result<String, TransportError> {
    match StylistCrud::new(&state.api).generate_advice(query).await {
        Ok(advice) => Ok(advice),
        Err(e @ TransportError::Validation(_)) => Err(e),
        Err(e) if e.requires_login() => Err(e),
        Err(e) => {
            warn!("stylist advice failed: {}", e);
            Ok(ADVICE_FALLBACK.to_string())
        }
    }
}

/// Resolves a comma separated list of focus areas, given by id or by
/// display name, case-insensitively.
pub fn parse_focus_areas(input: &str) -> Result<Vec<String>, TransportError> {
    let mut consultation = NewConsultation::default();

    for raw in input.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let id = FOCUS_AREAS
            .iter()
            .find(|(id, name)| id.eq_ignore_ascii_case(raw) || name.eq_ignore_ascii_case(raw))
            .map(|(id, _)| *id)
            .ok_or_else(|| TransportError::Validation(format!("Unknown focus area: {raw}")))?;

        if !consultation.focus_areas.iter().any(|a| a == id) {
            consultation.toggle_focus_area(id);
        }
    }

    Ok(consultation.focus_areas)
}

/// Builds an AI consultation for today.
pub fn consultation_for_today(focus: &str, question: Option<&str>) -> Result<NewConsultation, TransportError> {
    let mut consultation = NewConsultation {
        date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
        focus_areas: parse_focus_areas(focus)?,
        ..NewConsultation::default()
    };
    if let Some(question) = question {
        consultation.add_question(question);
    }
    Ok(consultation)
}

pub fn describe_focus(ids: &[String]) -> String {
    ids.iter()
        .map(|id| focus_area_name(id).unwrap_or(id.as_str()))
        .collect::<Vec<_>>()
        .join(", ")
}
