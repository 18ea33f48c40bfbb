use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    CareTipsRequest, ErrorResponse, ExplainTraitRequest, ExplanationResponse, WhyMatchRequest,
    WhyNotRequest,
};
use crate::routes::AppState;
use crate::services::{summarize_answers, ExplanationRequest, LlmError};

/// Configure explanation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/llm")
            .route("/explainTrait", web::post().to(explain_trait))
            .route("/whyMatch", web::post().to(why_match))
            .route("/whyNot", web::post().to(why_not))
            .route("/careTips", web::post().to(care_tips))
            .route("/model", web::get().to(model_name)),
    );
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed for explanation request: {}", errors);
    HttpResponse::BadRequest().json(ErrorResponse::new(400, "Invalid request", errors.to_string()))
}

async fn respond(state: &AppState, request: ExplanationRequest) -> HttpResponse {
    match state.llm.explain(&request).await {
        Ok(text) => HttpResponse::Ok().json(ExplanationResponse {
            success: true,
            data: text,
        }),
        Err(LlmError::MissingApiKey) => {
            tracing::warn!("Explanation requested but no API key is configured");
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                503,
                "Explanations unavailable",
                LlmError::MissingApiKey.to_string(),
            ))
        }
        Err(e) => {
            tracing::error!("{} explanation failed: {}", request.role_name(), e);
            HttpResponse::BadGateway().json(ErrorResponse::new(
                502,
                "Failed to generate explanation",
                e.to_string(),
            ))
        }
    }
}

/// POST /api/llm/explainTrait
async fn explain_trait(
    state: web::Data<AppState>,
    req: web::Json<ExplainTraitRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let request = ExplanationRequest::ExplainTrait {
        trait_key: req.trait_key.trim().to_string(),
    };
    respond(&state, request).await
}

/// POST /api/llm/whyMatch
async fn why_match(
    state: web::Data<AppState>,
    req: web::Json<WhyMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let request = ExplanationRequest::WhyMatch {
        breed: req.breed.trim().to_string(),
        match_percentage: req.match_percentage,
        answers_summary: summarize_answers(&req.answers),
    };
    respond(&state, request).await
}

/// POST /api/llm/whyNot
async fn why_not(
    state: web::Data<AppState>,
    req: web::Json<WhyNotRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let request = ExplanationRequest::WhyNot {
        breed: req.breed.trim().to_string(),
        answers_summary: summarize_answers(&req.answers),
    };
    respond(&state, request).await
}

/// POST /api/llm/careTips
async fn care_tips(
    state: web::Data<AppState>,
    req: web::Json<CareTipsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let request = ExplanationRequest::CareTips {
        breed: req.breed.trim().to_string(),
    };
    respond(&state, request).await
}

/// GET /api/llm/model
async fn model_name(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(ExplanationResponse {
        success: true,
        data: state.llm.model().to_string(),
    })
}
