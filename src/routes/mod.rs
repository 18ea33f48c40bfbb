// Route exports
pub mod breeds;
pub mod llm;
pub mod questions;
pub mod recommend;

use crate::core::Matcher;
use crate::models::ErrorResponse;
use crate::services::{BreedCatalog, LlmClient, QuestionCatalog};
use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use std::fmt;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<BreedCatalog>,
    pub questions: Arc<QuestionCatalog>,
    pub matcher: Matcher,
    pub llm: Arc<LlmClient>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(recommend::configure)
            .configure(breeds::configure)
            .configure(questions::configure)
            .configure(llm::configure),
    );
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl error::ResponseError for ErrorResponse {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ErrorResponse::new(400, "invalid_json", format!("Invalid JSON: {}", err)).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    ErrorResponse::new(400, "invalid_query", format!("Invalid query: {}", err)).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(handle_query_payload_error)
}
