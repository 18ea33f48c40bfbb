use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{ErrorResponse, HealthResponse, RecommendQuery, RecommendRequest, RecommendResponse};
use crate::routes::AppState;

/// Configure health and recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/recommend", web::post().to(recommend));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let catalog_healthy = state.catalog.health_check().await;

    let status = if catalog_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog: state.catalog.source_name().to_string(),
        cached_explanations: state.llm.cache_stats().entries,
        timestamp: chrono::Utc::now(),
    })
}

/// Recommend breeds endpoint
///
/// POST /api/recommend?debug=true
///
/// Request body:
/// ```json
/// {
///   "answers": [
///     { "trait": "energyLevel", "value": [4] },
///     { "trait": "coatType", "value": ["curly"], "dealbreaker": true, "mode": "exclude" }
///   ]
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    query: web::Query<RecommendQuery>,
    req: web::Json<RecommendRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            400,
            "Invalid answers",
            errors.to_string(),
        ));
    }

    let breeds = match state.catalog.load_all().await {
        Ok(breeds) => breeds,
        Err(e) => {
            tracing::error!("Failed to load breed catalog: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse::new(
                500,
                "Failed to load breeds",
                e.to_string(),
            ));
        }
    };

    let results = state
        .matcher
        .match_breeds(&req.answers, &breeds, query.include_breakdown());

    tracing::info!(
        "Returning {} matches for {} answers (from {} breeds)",
        results.len(),
        req.answers.len(),
        breeds.len()
    );

    HttpResponse::Ok().json(RecommendResponse {
        success: true,
        count: results.len(),
        data: results,
    })
}
