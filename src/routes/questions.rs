use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;
use crate::core::{group_by_category, CatalogQuery};
use crate::models::{ErrorResponse, QuestionGroupsResponse, QuestionListResponse};
use crate::routes::AppState;

/// Configure questionnaire routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/questions", web::get().to(list_questions))
        .route("/questions/categories", web::get().to(questions_by_category));
}

fn load_failed(e: impl std::fmt::Display) -> HttpResponse {
    tracing::error!("Failed to load questions: {}", e);
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        500,
        "Failed to load questions",
        e.to_string(),
    ))
}

/// List questions endpoint
///
/// GET /api/questions?limit=10&sort=order
async fn list_questions(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let question_query = CatalogQuery::for_questions(&query);

    let questions = match state.questions.load_all().await {
        Ok(questions) => questions,
        Err(e) => return load_failed(e),
    };

    let page = question_query.apply_questions(questions);

    HttpResponse::Ok().json(QuestionListResponse {
        success: true,
        count: page.items.len(),
        total: page.total,
        page: page.page,
        pages: page.pages,
        data: page.items,
    })
}

/// Questions grouped by category
///
/// GET /api/questions/categories
async fn questions_by_category(state: web::Data<AppState>) -> impl Responder {
    match state.questions.load_all().await {
        Ok(questions) => HttpResponse::Ok().json(QuestionGroupsResponse {
            success: true,
            data: group_by_category(questions),
        }),
        Err(e) => load_failed(e),
    }
}
