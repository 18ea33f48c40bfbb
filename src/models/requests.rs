use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use crate::models::domain::Answer;

/// Request body for `POST /api/recommend`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(min = 1, message = "answers must be a non-empty array"), nested)]
    pub answers: Vec<Answer>,
}

/// Query string for `POST /api/recommend`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendQuery {
    #[serde(default)]
    pub debug: Option<String>,
}

impl RecommendQuery {
    pub fn include_breakdown(&self) -> bool {
        self.debug.as_deref() == Some("true")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExplainTraitRequest {
    #[validate(custom(function = "validate_label"))]
    #[serde(rename = "trait")]
    pub trait_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct WhyMatchRequest {
    #[validate(custom(function = "validate_label"))]
    pub breed: String,
    #[validate(range(min = 0.0, max = 100.0, message = "matchPercentage 0..100"))]
    pub match_percentage: f64,
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WhyNotRequest {
    #[validate(custom(function = "validate_label"))]
    pub breed: String,
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CareTipsRequest {
    #[validate(custom(function = "validate_label"))]
    pub breed: String,
}

/// Breed names and trait keys need at least two visible characters
fn validate_label(value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() < 2 {
        let mut err = ValidationError::new("too_short");
        err.message = Some("must contain at least 2 characters".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_requires_answers() {
        let req: RecommendRequest = serde_json::from_str(r#"{"answers": []}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_recommend_validates_each_answer() {
        let req: RecommendRequest =
            serde_json::from_str(r#"{"answers": [{"trait": "", "value": 3}]}"#).unwrap();
        assert!(req.validate().is_err());

        let req: RecommendRequest =
            serde_json::from_str(r#"{"answers": [{"trait": "energyLevel", "value": [3, 4]}]}"#).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_debug_flag() {
        let query = RecommendQuery { debug: Some("true".into()) };
        assert!(query.include_breakdown());
        assert!(!RecommendQuery::default().include_breakdown());
        assert!(!RecommendQuery { debug: Some("1".into()) }.include_breakdown());
    }

    #[test]
    fn test_label_validation() {
        let req = CareTipsRequest { breed: "  a ".into() };
        assert!(req.validate().is_err());
        let req = CareTipsRequest { breed: "Akita".into() };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_match_percentage_range() {
        let req = WhyMatchRequest {
            breed: "Poodle".into(),
            match_percentage: 120.0,
            answers: vec![],
        };
        assert!(req.validate().is_err());
    }
}
