// Core algorithm exports
pub mod matcher;
pub mod presentation;
pub mod scoring;

pub use matcher::{Matcher, DEFAULT_MINIMUM_SCORE};
pub use presentation::{compatibility_color, compatibility_level, match_summary, CompatibilityLevel};
pub use scoring::{score_supplier, tag_matches, MatchResult, REPUTATION_BONUS_THRESHOLD};
