use crate::core::scoring::{score_supplier, MatchResult};
use crate::models::{NeutralCredits, RequestCriteria, ScoringWeights, SupplierProfile};

/// Raw score below which candidates are dropped unless the caller overrides it
pub const DEFAULT_MINIMUM_SCORE: f64 = 20.0;

/// Ranking driver over an in-memory supplier pool
///
/// Filters to supplier-role profiles, scores each against the request
/// criteria, drops below-threshold results and sorts the rest. Stateless
/// apart from the configured weights; safe to share across handlers.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    neutral: NeutralCredits,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, neutral: NeutralCredits) -> Self {
        Self { weights, neutral }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
            neutral: NeutralCredits::default(),
        }
    }

    /// Score a single supplier against the criteria.
    pub fn score<'a>(
        &self,
        criteria: &RequestCriteria,
        supplier: &'a SupplierProfile,
    ) -> MatchResult<'a> {
        score_supplier(criteria, supplier, &self.weights, &self.neutral)
    }

    /// Rank the candidate pool against one request.
    ///
    /// Non-supplier profiles are never scored or returned. Output is sorted
    /// by raw score descending; ties order by supplier reputation descending
    /// and then by supplier id, so repeated runs over the same pool produce
    /// identical rankings.
    pub fn match_suppliers<'a>(
        &self,
        criteria: &RequestCriteria,
        suppliers: &'a [SupplierProfile],
        minimum_score: f64,
    ) -> Vec<MatchResult<'a>> {
        let mut matches: Vec<MatchResult<'a>> = suppliers
            .iter()
            .filter(|supplier| supplier.is_supplier())
            .map(|supplier| self.score(criteria, supplier))
            .filter(|result| result.raw_score >= minimum_score)
            .collect();

        matches.sort_by(|a, b| {
            b.raw_score
                .partial_cmp(&a.raw_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| {
                    b.supplier
                        .reputation()
                        .partial_cmp(&a.supplier.reputation())
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
                .then_with(|| a.supplier.user_id.cmp(&b.supplier.user_id))
        });

        matches
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BusinessType, RequiredBusinessType};

    fn candidate(id: &str, role: &str, tags: Vec<&str>, score: Option<f64>) -> SupplierProfile {
        SupplierProfile {
            user_id: id.to_string(),
            name: format!("Supplier {}", id),
            role: role.to_string(),
            business_type: Some(BusinessType::Distributor),
            product_categories: vec!["materia_prima".to_string()],
            product_tags: tags.into_iter().map(str::to_string).collect(),
            service_tags: vec![],
            custom_product_tags: vec![],
            custom_service_tags: vec![],
            industries: vec![],
            score,
        }
    }

    fn criteria() -> RequestCriteria {
        RequestCriteria {
            request_id: "req_1".to_string(),
            required_business_type: Some(RequiredBusinessType::Any),
            required_categories: vec!["materia_prima".to_string()],
            required_tags: vec!["tornillo".to_string()],
            custom_required_tags: vec![],
            industry: None,
        }
    }

    #[test]
    fn test_non_suppliers_are_never_returned() {
        let matcher = Matcher::with_default_weights();
        let pool = vec![
            candidate("1", "supplier", vec!["tornillos M8"], Some(90.0)),
            candidate("2", "buyer", vec!["tornillos M8"], Some(95.0)),
            candidate("3", "admin", vec!["tornillos M8"], None),
        ];

        let matches = matcher.match_suppliers(&criteria(), &pool, 0.0);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].supplier.user_id, "1");
    }

    #[test]
    fn test_threshold_drops_low_scores() {
        let matcher = Matcher::with_default_weights();
        let pool = vec![
            candidate("1", "supplier", vec!["tornillos M8"], Some(90.0)), // 95
            candidate("2", "supplier", vec![], Some(10.0)),               // 50: type+cat, no tags
        ];

        let matches = matcher.match_suppliers(&criteria(), &pool, 60.0);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].supplier.user_id, "1");
        assert!(matches.iter().all(|m| m.raw_score >= 60.0));
    }

    #[test]
    fn test_raising_threshold_never_grows_the_result() {
        let matcher = Matcher::with_default_weights();
        let pool: Vec<SupplierProfile> = (0..10)
            .map(|i| {
                let tags = if i % 2 == 0 { vec!["tornillo"] } else { vec![] };
                candidate(&format!("sup_{}", i), "supplier", tags, Some(i as f64 * 10.0))
            })
            .collect();

        let mut previous = usize::MAX;
        for threshold in [0.0, 20.0, 40.0, 60.0, 80.0, 100.0] {
            let count = matcher.match_suppliers(&criteria(), &pool, threshold).len();
            assert!(count <= previous, "threshold {} grew the result", threshold);
            previous = count;
        }
    }

    #[test]
    fn test_output_is_sorted_descending() {
        let matcher = Matcher::with_default_weights();
        let pool = vec![
            candidate("1", "supplier", vec![], Some(10.0)),
            candidate("2", "supplier", vec!["tornillos M8"], Some(90.0)),
            candidate("3", "supplier", vec!["tornillo"], None),
        ];

        let matches = matcher.match_suppliers(&criteria(), &pool, 0.0);

        for pair in matches.windows(2) {
            assert!(pair[0].raw_score >= pair[1].raw_score);
        }
    }

    #[test]
    fn test_ties_break_on_reputation_then_id() {
        let matcher = Matcher::with_default_weights();
        // Identical profiles except reputation below the bonus threshold,
        // so the raw scores tie.
        let pool = vec![
            candidate("b", "supplier", vec!["tornillo"], Some(40.0)),
            candidate("a", "supplier", vec!["tornillo"], Some(40.0)),
            candidate("c", "supplier", vec!["tornillo"], Some(60.0)),
        ];

        let matches = matcher.match_suppliers(&criteria(), &pool, 0.0);

        let order: Vec<&str> = matches.iter().map(|m| m.supplier.user_id.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let matcher = Matcher::with_default_weights();
        let pool = vec![candidate("1", "supplier", vec!["tornillo"], Some(90.0))];
        let before = pool.clone();

        let _ = matcher.match_suppliers(&criteria(), &pool, 0.0);

        assert_eq!(pool.len(), before.len());
        assert_eq!(pool[0].user_id, before[0].user_id);
        assert_eq!(pool[0].product_tags, before[0].product_tags);
    }

    #[test]
    fn test_empty_pool_yields_empty_ranking() {
        let matcher = Matcher::with_default_weights();
        let matches = matcher.match_suppliers(&criteria(), &[], DEFAULT_MINIMUM_SCORE);
        assert!(matches.is_empty());
    }
}
