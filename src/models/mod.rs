// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BusinessType, MatchDetails, NeutralCredits, RequestCriteria, RequiredBusinessType,
    ScoringWeights, SupplierProfile,
};
pub use requests::{EvaluateRequest, FindMatchesRequest};
pub use responses::{
    ErrorResponse, EvaluateResponse, FindMatchesResponse, HealthResponse, MatchedSupplier,
};
