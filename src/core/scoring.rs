use crate::models::{MatchDetails, NeutralCredits, RequestCriteria, ScoringWeights, SupplierProfile};

/// Reputation score at or above which the audit bonus applies
pub const REPUTATION_BONUS_THRESHOLD: f64 = 80.0;

/// Scored outcome for one supplier against one request
///
/// Borrows the evaluated profile; results live only for one render pass on
/// the caller's side and are rebuilt on every search.
#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    pub supplier: &'a SupplierProfile,
    pub raw_score: f64,
    pub compatibility_percentage: u8,
    pub details: MatchDetails,
}

/// Score one supplier against one request's search criteria.
///
/// Additive over five independent sub-criteria:
///
/// | criterion     | max credit | unset criterion |
/// |---------------|-----------|-----------------|
/// | business type | 25        | 15              |
/// | categories    | 20        | 10              |
/// | tags          | 40        | 20              |
/// | industry      | 10        | 5               |
/// | reputation    | 5 bonus   | never neutral   |
///
/// Category and tag credits are proportional to the fraction of required
/// items the supplier covers. A criterion the request leaves unset (absent
/// or empty) earns its fixed neutral credit, so an under-specified request
/// still produces a meaningful ranking. The reputation bonus is all-or-
/// nothing: 5 for suppliers audited at 80 or above, otherwise 0.
pub fn score_supplier<'a>(
    criteria: &RequestCriteria,
    supplier: &'a SupplierProfile,
    weights: &ScoringWeights,
    neutral: &NeutralCredits,
) -> MatchResult<'a> {
    let (business_type_credit, business_type_matched) =
        business_type_credit(criteria, supplier, weights, neutral);
    let (category_credit, matched_categories) = category_credit(criteria, supplier, weights, neutral);
    let (tag_credit, matched_tags) = tag_credit(criteria, supplier, weights, neutral);
    let (industry_credit, industry_matched) = industry_credit(criteria, supplier, weights, neutral);

    let bonus = if supplier.reputation() >= REPUTATION_BONUS_THRESHOLD {
        weights.reputation_bonus
    } else {
        0.0
    };

    let raw_score = business_type_credit + category_credit + tag_credit + industry_credit + bonus;

    debug_assert!(
        raw_score.is_finite() && raw_score >= 0.0,
        "raw score out of range: {raw_score}"
    );

    MatchResult {
        supplier,
        raw_score,
        compatibility_percentage: raw_score.round() as u8,
        details: MatchDetails {
            business_type_matched,
            matched_categories,
            matched_tags,
            industry_matched,
        },
    }
}

/// Full credit on "any" or on exact type equality; no partial credit.
fn business_type_credit(
    criteria: &RequestCriteria,
    supplier: &SupplierProfile,
    weights: &ScoringWeights,
    neutral: &NeutralCredits,
) -> (f64, bool) {
    match criteria.required_business_type {
        None => (neutral.business_type, false),
        Some(required) if required.accepts(supplier.business_type) => (weights.business_type, true),
        Some(_) => (0.0, false),
    }
}

/// Proportional credit for the overlap of required and offered categories.
fn category_credit(
    criteria: &RequestCriteria,
    supplier: &SupplierProfile,
    weights: &ScoringWeights,
    neutral: &NeutralCredits,
) -> (f64, Vec<String>) {
    // Empty and absent collapse to "not specified"; the denominator below is
    // therefore never zero.
    if criteria.required_categories.is_empty() {
        return (neutral.categories, Vec::new());
    }

    let matched: Vec<String> = criteria
        .required_categories
        .iter()
        .filter(|category| supplier.product_categories.contains(category))
        .cloned()
        .collect();

    let credit = weights.categories * matched.len() as f64 / criteria.required_categories.len() as f64;
    (credit, matched)
}

/// Proportional credit for request tags covered by the supplier's tag pool.
///
/// O(R*S) string comparisons; tag sets are tens of entries at most, so no
/// indexing is warranted here.
fn tag_credit(
    criteria: &RequestCriteria,
    supplier: &SupplierProfile,
    weights: &ScoringWeights,
    neutral: &NeutralCredits,
) -> (f64, Vec<String>) {
    let request_tags = criteria.request_tags();
    if request_tags.is_empty() {
        return (neutral.tags, Vec::new());
    }

    let pool: Vec<&str> = supplier.tag_pool().collect();
    let matched: Vec<String> = request_tags
        .iter()
        .filter(|tag| pool.iter().any(|candidate| tag_matches(tag, candidate)))
        .map(|tag| tag.to_string())
        .collect();

    let credit = weights.tags * matched.len() as f64 / request_tags.len() as f64;
    (credit, matched)
}

/// Full credit when the supplier serves the request's industry.
fn industry_credit(
    criteria: &RequestCriteria,
    supplier: &SupplierProfile,
    weights: &ScoringWeights,
    neutral: &NeutralCredits,
) -> (f64, bool) {
    match &criteria.industry {
        None => (neutral.industry, false),
        Some(industry) if supplier.industries.contains(industry) => (weights.industry, true),
        Some(_) => (0.0, false),
    }
}

/// Case-insensitive bidirectional containment, not exact equality.
///
/// "Tornillo" matches "tornillos M8" and "Acero Inoxidable" matches "acero":
/// free-form tags written by requesters and suppliers rarely agree verbatim.
pub fn tag_matches(request_tag: &str, supplier_tag: &str) -> bool {
    let request_tag = request_tag.to_lowercase();
    let supplier_tag = supplier_tag.to_lowercase();
    request_tag.contains(&supplier_tag) || supplier_tag.contains(&request_tag)
}
