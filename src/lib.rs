//! Provia Match - supplier compatibility matching service for the Provia
//! procurement platform
//!
//! Given a procurement request's search criteria and the supplier pool, the
//! core engine computes a weighted compatibility score per supplier, filters
//! by a minimum threshold and returns a ranked, explainable candidate list.
//! The surrounding service fetches both sides from the Appwrite document
//! store and exposes the engine over HTTP.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    match_summary, CompatibilityLevel, MatchResult, Matcher, DEFAULT_MINIMUM_SCORE,
};
pub use crate::models::{
    BusinessType, MatchDetails, NeutralCredits, RequestCriteria, RequiredBusinessType,
    ScoringWeights, SupplierProfile,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::with_default_weights();
        let criteria = RequestCriteria {
            request_id: "req".to_string(),
            required_business_type: None,
            required_categories: vec![],
            required_tags: vec![],
            custom_required_tags: vec![],
            industry: None,
        };

        assert!(matcher.match_suppliers(&criteria, &[], DEFAULT_MINIMUM_SCORE).is_empty());
    }
}
