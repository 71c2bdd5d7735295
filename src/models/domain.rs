use serde::{Deserialize, Serialize};

/// Business type stored on a supplier's user document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessType {
    Manufacturer,
    Distributor,
    Service,
    Mixed,
}

/// Business type a procurement request can ask for
///
/// `Any` accepts every supplier regardless of their declared type. A request
/// that leaves the field unset is modeled as `Option<RequiredBusinessType>`
/// being `None`, which earns the neutral credit instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequiredBusinessType {
    Manufacturer,
    Distributor,
    Service,
    Any,
}

impl RequiredBusinessType {
    /// Whether a supplier's declared business type satisfies this requirement.
    ///
    /// Exact equality except for `Any`; a `Mixed` supplier only passes on `Any`.
    pub fn accepts(&self, supplier_type: Option<BusinessType>) -> bool {
        match self {
            RequiredBusinessType::Any => true,
            RequiredBusinessType::Manufacturer => supplier_type == Some(BusinessType::Manufacturer),
            RequiredBusinessType::Distributor => supplier_type == Some(BusinessType::Distributor),
            RequiredBusinessType::Service => supplier_type == Some(BusinessType::Service),
        }
    }
}

/// Search criteria carried on a procurement request document
///
/// Every criterion is optional. An unset (or empty) criterion never zeroes a
/// supplier's score; the scorer awards a fixed neutral credit for it instead,
/// so under-specified requests still rank suppliers meaningfully.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestCriteria {
    #[serde(rename = "requestId", default)]
    pub request_id: String,
    #[serde(rename = "requiredBusinessType", default)]
    pub required_business_type: Option<RequiredBusinessType>,
    #[serde(rename = "requiredCategories", default)]
    pub required_categories: Vec<String>,
    #[serde(rename = "requiredTags", default)]
    pub required_tags: Vec<String>,
    #[serde(rename = "customRequiredTags", default)]
    pub custom_required_tags: Vec<String>,
    #[serde(default)]
    pub industry: Option<String>,
}

impl RequestCriteria {
    /// Union of catalog and free-form request tags, case-insensitively deduplicated.
    ///
    /// The length of this union is the denominator of the proportional tag
    /// credit, so duplicates between the two lists must not inflate it.
    pub fn request_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for tag in self.required_tags.iter().chain(&self.custom_required_tags) {
            if !tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                tags.push(tag.as_str());
            }
        }
        tags
    }
}

/// Subset of a user document relevant to supplier matching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierProfile {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    pub role: String,
    #[serde(rename = "businessType", default)]
    pub business_type: Option<BusinessType>,
    #[serde(rename = "productCategories", default)]
    pub product_categories: Vec<String>,
    #[serde(rename = "productTags", default)]
    pub product_tags: Vec<String>,
    #[serde(rename = "serviceTags", default)]
    pub service_tags: Vec<String>,
    #[serde(rename = "customProductTags", default)]
    pub custom_product_tags: Vec<String>,
    #[serde(rename = "customServiceTags", default)]
    pub custom_service_tags: Vec<String>,
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

impl SupplierProfile {
    /// Only documents with the supplier role are ever scored.
    pub fn is_supplier(&self) -> bool {
        self.role == "supplier"
    }

    /// Union of all four tag sets, the match target for request tags.
    pub fn tag_pool(&self) -> impl Iterator<Item = &str> {
        self.product_tags
            .iter()
            .chain(&self.service_tags)
            .chain(&self.custom_product_tags)
            .chain(&self.custom_service_tags)
            .map(String::as_str)
    }

    /// Reputation score defaulting to 0 for suppliers never audited.
    pub fn reputation(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }
}

/// Which sub-criteria actually matched, for explainability in the UI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchDetails {
    #[serde(rename = "businessTypeMatched")]
    pub business_type_matched: bool,
    #[serde(rename = "matchedCategories")]
    pub matched_categories: Vec<String>,
    #[serde(rename = "matchedTags")]
    pub matched_tags: Vec<String>,
    #[serde(rename = "industryMatched")]
    pub industry_matched: bool,
}

/// Maximum credit each sub-criterion contributes to the raw score
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub business_type: f64,
    pub categories: f64,
    pub tags: f64,
    pub industry: f64,
    pub reputation_bonus: f64,
}

impl ScoringWeights {
    /// Highest raw score any supplier can reach under these weights.
    pub fn max_raw_score(&self) -> f64 {
        self.business_type + self.categories + self.tags + self.industry + self.reputation_bonus
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            business_type: 25.0,
            categories: 20.0,
            tags: 40.0,
            industry: 10.0,
            reputation_bonus: 5.0,
        }
    }
}

/// Fixed partial credit awarded when the request leaves a criterion unset
#[derive(Debug, Clone, Copy)]
pub struct NeutralCredits {
    pub business_type: f64,
    pub categories: f64,
    pub tags: f64,
    pub industry: f64,
}

impl Default for NeutralCredits {
    fn default() -> Self {
        Self {
            business_type: 15.0,
            categories: 10.0,
            tags: 20.0,
            industry: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_business_type_any_accepts_everything() {
        assert!(RequiredBusinessType::Any.accepts(Some(BusinessType::Manufacturer)));
        assert!(RequiredBusinessType::Any.accepts(Some(BusinessType::Mixed)));
        assert!(RequiredBusinessType::Any.accepts(None));
    }

    #[test]
    fn test_mixed_supplier_requires_any() {
        assert!(!RequiredBusinessType::Manufacturer.accepts(Some(BusinessType::Mixed)));
        assert!(!RequiredBusinessType::Service.accepts(Some(BusinessType::Mixed)));
        assert!(RequiredBusinessType::Any.accepts(Some(BusinessType::Mixed)));
    }

    #[test]
    fn test_request_tags_deduplicates_case_insensitively() {
        let criteria = RequestCriteria {
            request_id: "r1".to_string(),
            required_business_type: None,
            required_categories: vec![],
            required_tags: vec!["Tornillo".to_string(), "acero".to_string()],
            custom_required_tags: vec!["tornillo".to_string(), "valvula".to_string()],
            industry: None,
        };

        let tags = criteria.request_tags();
        assert_eq!(tags, vec!["Tornillo", "acero", "valvula"]);
    }

    #[test]
    fn test_tag_pool_unions_all_four_sets() {
        let supplier = SupplierProfile {
            user_id: "s1".to_string(),
            name: "Aceros SA".to_string(),
            role: "supplier".to_string(),
            business_type: Some(BusinessType::Distributor),
            product_categories: vec![],
            product_tags: vec!["a".to_string()],
            service_tags: vec!["b".to_string()],
            custom_product_tags: vec!["c".to_string()],
            custom_service_tags: vec!["d".to_string()],
            industries: vec![],
            score: None,
        };

        let pool: Vec<&str> = supplier.tag_pool().collect();
        assert_eq!(pool, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_default_weights_match_scoring_table() {
        let weights = ScoringWeights::default();
        assert_eq!(weights.business_type, 25.0);
        assert_eq!(weights.categories, 20.0);
        assert_eq!(weights.tags, 40.0);
        assert_eq!(weights.industry, 10.0);
        assert_eq!(weights.reputation_bonus, 5.0);
        assert_eq!(weights.max_raw_score(), 105.0);
    }

    #[test]
    fn test_default_neutral_credits() {
        let neutral = NeutralCredits::default();
        assert_eq!(neutral.business_type, 15.0);
        assert_eq!(neutral.categories, 10.0);
        assert_eq!(neutral.tags, 20.0);
        assert_eq!(neutral.industry, 5.0);
    }
}
