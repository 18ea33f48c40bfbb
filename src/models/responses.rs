use serde::{Deserialize, Serialize};
use crate::core::traits::TraitInfo;
use crate::models::domain::{Breed, MatchResult, Question, QuestionGroup};

/// Response for the recommend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub success: bool,
    pub count: usize,
    pub data: Vec<MatchResult>,
}

/// One page of the breed catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreedListResponse {
    pub success: bool,
    pub count: usize,
    pub total: usize,
    pub page: usize,
    pub pages: usize,
    pub data: Vec<Breed>,
}

/// One page of the questionnaire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionListResponse {
    pub success: bool,
    pub count: usize,
    pub total: usize,
    pub page: usize,
    pub pages: usize,
    pub data: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionGroupsResponse {
    pub success: bool,
    pub data: Vec<QuestionGroup>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TraitGuideResponse {
    pub success: bool,
    pub data: &'static [TraitInfo],
}

/// Text produced by the explanation service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplanationResponse {
    pub success: bool,
    pub data: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub catalog: String,
    pub cached_explanations: u64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl ErrorResponse {
    pub fn new(status_code: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: message.into(),
            status_code,
        }
    }
}
