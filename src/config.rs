use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{NeutralCredits, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub appwrite: AppwriteSettings,
    pub collection: CollectionSettings,
    pub cache: CacheSettings,
    pub matching: MatchingSettings,
    pub scoring: ScoringSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub requests: String,
    pub users: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub redis_url: String,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_minimum_score")]
    pub minimum_score: f64,
    #[serde(default = "default_result_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

fn default_minimum_score() -> f64 {
    20.0
}
fn default_result_limit() -> usize {
    20
}
fn default_max_limit() -> usize {
    100
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub neutral: NeutralConfig,
}

/// Maximum credit per sub-criterion; defaults reproduce the scoring table
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_business_type_weight")]
    pub business_type: f64,
    #[serde(default = "default_categories_weight")]
    pub categories: f64,
    #[serde(default = "default_tags_weight")]
    pub tags: f64,
    #[serde(default = "default_industry_weight")]
    pub industry: f64,
    #[serde(default = "default_reputation_bonus")]
    pub reputation_bonus: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            business_type: default_business_type_weight(),
            categories: default_categories_weight(),
            tags: default_tags_weight(),
            industry: default_industry_weight(),
            reputation_bonus: default_reputation_bonus(),
        }
    }
}

fn default_business_type_weight() -> f64 {
    25.0
}
fn default_categories_weight() -> f64 {
    20.0
}
fn default_tags_weight() -> f64 {
    40.0
}
fn default_industry_weight() -> f64 {
    10.0
}
fn default_reputation_bonus() -> f64 {
    5.0
}

/// Neutral credit per unset criterion
#[derive(Debug, Clone, Deserialize)]
pub struct NeutralConfig {
    #[serde(default = "default_business_type_neutral")]
    pub business_type: f64,
    #[serde(default = "default_categories_neutral")]
    pub categories: f64,
    #[serde(default = "default_tags_neutral")]
    pub tags: f64,
    #[serde(default = "default_industry_neutral")]
    pub industry: f64,
}

impl Default for NeutralConfig {
    fn default() -> Self {
        Self {
            business_type: default_business_type_neutral(),
            categories: default_categories_neutral(),
            tags: default_tags_neutral(),
            industry: default_industry_neutral(),
        }
    }
}

fn default_business_type_neutral() -> f64 {
    15.0
}
fn default_categories_neutral() -> f64 {
    10.0
}
fn default_tags_neutral() -> f64 {
    20.0
}
fn default_industry_neutral() -> f64 {
    5.0
}

impl From<WeightsConfig> for ScoringWeights {
    fn from(config: WeightsConfig) -> Self {
        ScoringWeights {
            business_type: config.business_type,
            categories: config.categories,
            tags: config.tags,
            industry: config.industry,
            reputation_bonus: config.reputation_bonus,
        }
    }
}

impl From<NeutralConfig> for NeutralCredits {
    fn from(config: NeutralConfig) -> Self {
        NeutralCredits {
            business_type: config.business_type,
            categories: config.categories,
            tags: config.tags,
            industry: config.industry,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with PROVIA_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            // Local overrides for development
            .add_source(File::with_name("config/local").required(false))
            // e.g., PROVIA_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("PROVIA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PROVIA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply well-known environment variables over the file-based config
///
/// Deploy targets set REDIS_URL and the Appwrite credentials directly rather
/// than through the PROVIA__ scheme.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let redis_url = env::var("REDIS_URL")
        .or_else(|_| env::var("PROVIA_CACHE__REDIS_URL"))
        .unwrap_or_else(|_| "redis://localhost:6379".to_string());

    let appwrite_endpoint = env::var("PROVIA_APPWRITE__ENDPOINT").ok();
    let appwrite_api_key = env::var("PROVIA_APPWRITE__API_KEY").ok();
    let appwrite_project_id = env::var("PROVIA_APPWRITE__PROJECT_ID").ok();
    let appwrite_database_id = env::var("PROVIA_APPWRITE__DATABASE_ID").ok();

    let mut builder = Config::builder()
        .add_source(settings)
        .set_override("cache.redis_url", redis_url)?;

    if let Some(endpoint) = appwrite_endpoint {
        builder = builder.set_override("appwrite.endpoint", endpoint)?;
    }
    if let Some(api_key) = appwrite_api_key {
        builder = builder.set_override("appwrite.api_key", api_key)?;
    }
    if let Some(project_id) = appwrite_project_id {
        builder = builder.set_override("appwrite.project_id", project_id)?;
    }
    if let Some(database_id) = appwrite_database_id {
        builder = builder.set_override("appwrite.database_id", database_id)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_reproduce_scoring_table() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.business_type, 25.0);
        assert_eq!(weights.categories, 20.0);
        assert_eq!(weights.tags, 40.0);
        assert_eq!(weights.industry, 10.0);
        assert_eq!(weights.reputation_bonus, 5.0);

        let neutral = NeutralConfig::default();
        assert_eq!(neutral.business_type, 15.0);
        assert_eq!(neutral.categories, 10.0);
        assert_eq!(neutral.tags, 20.0);
        assert_eq!(neutral.industry, 5.0);
    }

    #[test]
    fn test_config_converts_into_domain_weights() {
        let weights: ScoringWeights = WeightsConfig::default().into();
        assert_eq!(weights.max_raw_score(), 105.0);

        let defaults = ScoringWeights::default();
        assert_eq!(weights.business_type, defaults.business_type);
        assert_eq!(weights.tags, defaults.tags);
    }

    #[test]
    fn test_default_logging() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_log_format(), "json");
    }

    #[test]
    fn test_default_matching_limits() {
        assert_eq!(default_minimum_score(), 20.0);
        assert_eq!(default_result_limit(), 20);
        assert_eq!(default_max_limit(), 100);
    }
}
