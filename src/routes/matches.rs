use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{match_summary, CompatibilityLevel, Matcher};
use crate::models::{
    ErrorResponse, EvaluateRequest, EvaluateResponse, FindMatchesRequest, FindMatchesResponse,
    HealthResponse, MatchedSupplier, RequestCriteria, SupplierProfile,
};
use crate::services::{AppwriteClient, AppwriteError, CacheKey, CacheManager};

/// Result-set limits and the default threshold, from configuration
#[derive(Debug, Clone, Copy)]
pub struct MatchLimits {
    pub minimum_score: f64,
    pub default_limit: usize,
    pub max_limit: usize,
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub appwrite: Arc<AppwriteClient>,
    pub cache: Arc<CacheManager>,
    pub matcher: Matcher,
    pub limits: MatchLimits,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/matches/evaluate", web::post().to(evaluate));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let cache_healthy = state.cache.health_check().await.unwrap_or(false);

    let status = if cache_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "requestId": "string",
///   "minimumScore": 20.0,
///   "limit": 20
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let request_id = &req.request_id;
    let minimum_score = req.minimum_score.unwrap_or(state.limits.minimum_score);
    let limit = req
        .limit
        .map(usize::from)
        .unwrap_or(state.limits.default_limit)
        .clamp(1, state.limits.max_limit);

    tracing::info!(
        "Matching suppliers for request {}, minimum score {}, limit {}",
        request_id,
        minimum_score,
        limit
    );

    let criteria = match load_criteria(&state, request_id).await {
        Ok(criteria) => criteria,
        Err(AppwriteError::NotFound(message)) => {
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Request not found".to_string(),
                message,
                status_code: 404,
            });
        }
        Err(e) => {
            tracing::error!("Failed to fetch criteria for {}: {}", request_id, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to fetch request".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let suppliers = match load_suppliers(&state).await {
        Ok(suppliers) => suppliers,
        Err(e) => {
            tracing::error!("Failed to query suppliers: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to query suppliers".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    tracing::debug!(
        "Scoring {} suppliers against request {}",
        suppliers.len(),
        request_id
    );

    let total_candidates = suppliers.len();
    let mut ranked = state
        .matcher
        .match_suppliers(&criteria, &suppliers, minimum_score);
    ranked.truncate(limit);

    let matches: Vec<MatchedSupplier> = ranked
        .iter()
        .map(|result| {
            let level = CompatibilityLevel::from_score(result.raw_score);
            MatchedSupplier {
                supplier_id: result.supplier.user_id.clone(),
                name: result.supplier.name.clone(),
                business_type: result.supplier.business_type,
                raw_score: result.raw_score,
                compatibility_percentage: result.compatibility_percentage,
                compatibility_level: level.as_str().to_string(),
                compatibility_color: level.color_token().to_string(),
                summary: match_summary(&result.details),
                details: result.details.clone(),
            }
        })
        .collect();

    tracing::info!(
        "Returning {} matches for request {} (from {} candidates)",
        matches.len(),
        request_id,
        total_candidates
    );

    HttpResponse::Ok().json(FindMatchesResponse {
        request_id: request_id.clone(),
        matches,
        total_candidates,
        minimum_score,
    })
}

/// Evaluate endpoint: full compatibility breakdown for one inline pair
///
/// POST /api/v1/matches/evaluate
async fn evaluate(state: web::Data<AppState>, req: web::Json<EvaluateRequest>) -> impl Responder {
    let result = state.matcher.score(&req.criteria, &req.supplier);
    let level = CompatibilityLevel::from_score(result.raw_score);

    HttpResponse::Ok().json(EvaluateResponse {
        raw_score: result.raw_score,
        compatibility_percentage: result.compatibility_percentage,
        compatibility_level: level.as_str().to_string(),
        compatibility_color: level.color_token().to_string(),
        summary: match_summary(&result.details),
        details: result.details,
    })
}

/// Load request criteria, cache-first.
async fn load_criteria(
    state: &web::Data<AppState>,
    request_id: &str,
) -> Result<RequestCriteria, AppwriteError> {
    let key = CacheKey::criteria(request_id);

    if let Ok(criteria) = state.cache.get::<RequestCriteria>(&key).await {
        tracing::debug!("Criteria cache hit for request {}", request_id);
        return Ok(criteria);
    }

    let criteria = state.appwrite.get_request(request_id).await?;

    if let Err(e) = state.cache.set(&key, &criteria).await {
        tracing::warn!("Failed to cache criteria for {}: {}", request_id, e);
    }

    Ok(criteria)
}

/// Load the supplier pool, cache-first.
async fn load_suppliers(
    state: &web::Data<AppState>,
) -> Result<Vec<SupplierProfile>, AppwriteError> {
    let key = CacheKey::suppliers();

    if let Ok(suppliers) = state.cache.get::<Vec<SupplierProfile>>(&key).await {
        tracing::debug!("Supplier pool cache hit ({} suppliers)", suppliers.len());
        return Ok(suppliers);
    }

    let suppliers = state.appwrite.query_suppliers().await?;

    if let Err(e) = state.cache.set(&key, &suppliers).await {
        tracing::warn!("Failed to cache supplier pool: {}", e);
    }

    Ok(suppliers)
}
