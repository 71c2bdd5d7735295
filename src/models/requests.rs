use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{RequestCriteria, SupplierProfile};

/// Request to rank the supplier pool against a stored procurement request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "request_id", rename = "requestId")]
    pub request_id: String,
    /// Overrides the configured minimum compatibility score when present.
    #[validate(range(min = 0.0, max = 105.0))]
    #[serde(default, alias = "minimum_score", rename = "minimumScore")]
    pub minimum_score: Option<f64>,
    /// Falls back to the configured default limit when omitted.
    #[serde(default)]
    pub limit: Option<u16>,
}

/// Request to score a single criteria/supplier pair inline
///
/// Used by the supplier-detail screen to show the full compatibility
/// breakdown without a round trip through the document store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub criteria: RequestCriteria,
    pub supplier: SupplierProfile,
}
