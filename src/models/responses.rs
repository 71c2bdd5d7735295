use serde::{Deserialize, Serialize};

use crate::models::domain::{BusinessType, MatchDetails};

/// One ranked supplier as returned to the search screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedSupplier {
    #[serde(rename = "supplierId")]
    pub supplier_id: String,
    pub name: String,
    #[serde(rename = "businessType")]
    pub business_type: Option<BusinessType>,
    #[serde(rename = "rawScore")]
    pub raw_score: f64,
    #[serde(rename = "compatibilityPercentage")]
    pub compatibility_percentage: u8,
    #[serde(rename = "compatibilityLevel")]
    pub compatibility_level: String,
    #[serde(rename = "compatibilityColor")]
    pub compatibility_color: String,
    pub summary: String,
    pub details: MatchDetails,
}

/// Response for the find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    #[serde(rename = "requestId")]
    pub request_id: String,
    pub matches: Vec<MatchedSupplier>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "minimumScore")]
    pub minimum_score: f64,
}

/// Response for the single-pair evaluate endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse {
    #[serde(rename = "rawScore")]
    pub raw_score: f64,
    #[serde(rename = "compatibilityPercentage")]
    pub compatibility_percentage: u8,
    #[serde(rename = "compatibilityLevel")]
    pub compatibility_level: String,
    #[serde(rename = "compatibilityColor")]
    pub compatibility_color: String,
    pub summary: String,
    pub details: MatchDetails,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
