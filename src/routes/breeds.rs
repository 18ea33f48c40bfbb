use actix_web::{web, HttpResponse, Responder};
use std::collections::HashMap;
use crate::core::{CatalogQuery, TRAIT_GUIDE};
use crate::models::{BreedListResponse, ErrorResponse, TraitGuideResponse};
use crate::routes::AppState;

/// Configure catalog browsing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/breeds", web::get().to(list_breeds))
        .route("/traits", web::get().to(trait_guide));
}

/// List breeds endpoint
///
/// GET /api/breeds?energyLevel=4&height.min=20&coatType=curly&sort=-trainability&page=1&limit=20
async fn list_breeds(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> impl Responder {
    let catalog_query = CatalogQuery::from_params(&query);

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

    let page = catalog_query.apply(breeds);

    tracing::debug!(
        "Listing page {} of {} ({} matching breeds)",
        page.page,
        page.pages,
        page.total
    );

    HttpResponse::Ok().json(BreedListResponse {
        success: true,
        count: page.items.len(),
        total: page.total,
        page: page.page,
        pages: page.pages,
        data: page.items,
    })
}

/// Trait descriptions for the questionnaire
async fn trait_guide() -> impl Responder {
    HttpResponse::Ok().json(TraitGuideResponse {
        success: true,
        data: TRAIT_GUIDE,
    })
}
