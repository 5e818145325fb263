use serde::{Deserialize, Serialize};

/// Topics a consultation can cover, as `(id, name)`.
pub const FOCUS_AREAS: &[(&str, &str)] = &[
    ("seasonal", "Seasonal Wardrobe"),
    ("occasion", "Special Occasion"),
    ("colorAnalysis", "Color Analysis"),
    ("bodyType", "Body Type Styling"),
    ("wardrobeEssentials", "Wardrobe Essentials"),
    ("trendAdaptation", "Trend Adaptation"),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationType {
    #[default]
    Ai,
    Human,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultationQuestion {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylePreference {
    pub category: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConsultationNote {
    pub text: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProductRecommendation {
    pub product_id: String,
    pub product_name: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Consultation {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub status: ConsultationStatus,
    #[serde(default)]
    pub focus_areas: Vec<String>,
    #[serde(default)]
    pub questions: Vec<ConsultationQuestion>,
    #[serde(default)]
    pub consultation_type: ConsultationType,
    #[serde(default)]
    pub notes: Vec<ConsultationNote>,
    #[serde(default)]
    pub recommendations: Vec<ProductRecommendation>,
}

pub fn focus_area_name(id: &str) -> Option<&'static str> {
    FOCUS_AREAS
        .iter()
        .find(|(area, _)| *area == id)
        .map(|(_, name)| *name)
}
