use crate::models::MatchDetails;

/// Compatibility band displayed next to a scored supplier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompatibilityLevel {
    VeryHigh,
    High,
    Medium,
    Low,
    VeryLow,
}

impl CompatibilityLevel {
    /// Band for a raw score: 80/60/40/20 thresholds.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            CompatibilityLevel::VeryHigh
        } else if score >= 60.0 {
            CompatibilityLevel::High
        } else if score >= 40.0 {
            CompatibilityLevel::Medium
        } else if score >= 20.0 {
            CompatibilityLevel::Low
        } else {
            CompatibilityLevel::VeryLow
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompatibilityLevel::VeryHigh => "very high",
            CompatibilityLevel::High => "high",
            CompatibilityLevel::Medium => "medium",
            CompatibilityLevel::Low => "low",
            CompatibilityLevel::VeryLow => "very low",
        }
    }

    /// Badge color shown by the mobile client (Material palette).
    pub fn color_token(&self) -> &'static str {
        match self {
            CompatibilityLevel::VeryHigh => "#4CAF50",
            CompatibilityLevel::High => "#8BC34A",
            CompatibilityLevel::Medium => "#FFC107",
            CompatibilityLevel::Low => "#FF9800",
            CompatibilityLevel::VeryLow => "#F44336",
        }
    }
}

pub fn compatibility_level(score: f64) -> CompatibilityLevel {
    CompatibilityLevel::from_score(score)
}

pub fn compatibility_color(score: f64) -> &'static str {
    CompatibilityLevel::from_score(score).color_token()
}

/// One-line explanation of which criteria matched, in fixed order:
/// business type, categories, tags, industry. The order is part of the
/// contract; the client renders and snapshots this string.
pub fn match_summary(details: &MatchDetails) -> String {
    let mut clauses: Vec<String> = Vec::new();

    if details.business_type_matched {
        clauses.push("business type matched".to_string());
    }
    if !details.matched_categories.is_empty() {
        let n = details.matched_categories.len();
        clauses.push(if n == 1 {
            "1 category matched".to_string()
        } else {
            format!("{} categories matched", n)
        });
    }
    if !details.matched_tags.is_empty() {
        let n = details.matched_tags.len();
        clauses.push(if n == 1 {
            "1 tag matched".to_string()
        } else {
            format!("{} tags matched", n)
        });
    }
    if details.industry_matched {
        clauses.push("industry matched".to_string());
    }

    if clauses.is_empty() {
        "No specific matches found".to_string()
    } else {
        clauses.join(", ")
    }
}
