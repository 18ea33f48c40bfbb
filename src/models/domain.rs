use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::{Validate, ValidationError};

/// Inclusive numeric range as stored on breed records (height, weight, life expectancy)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

/// Categorical breed attribute: catalogs store these either as a single string or a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Categorical {
    One(String),
    Many(Vec<String>),
}

impl Categorical {
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Categorical::One(v) => v == value,
            Categorical::Many(vs) => vs.iter().any(|v| v == value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroomingFrequency {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthIssue {
    pub name: String,
    #[serde(default)]
    pub prevalence: Option<u8>,
}

/// Breed record from the catalog
///
/// Every trait is optional: partial records are accepted and missing traits
/// simply never contribute to a match score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breed {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Range>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Range>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_expectancy: Option<Range>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affectionate_with_family: Option<i32>,
    #[serde(default, alias = "goodWithYoungChildren", skip_serializing_if = "Option::is_none")]
    pub good_with_kids: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good_with_other_dogs: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drooling_level: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openness_to_strangers: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barking_level: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shedding: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protective_nature: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playfulness_level: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adaptability_level: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_level: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trainability: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grooming_frequency: Option<GroomingFrequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coat_type: Option<Categorical>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coat_length: Option<Categorical>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub living_environment: Option<Categorical>,

    /// Informational only, never scored
    #[serde(default)]
    pub common_health_issues: Vec<HealthIssue>,
}

impl Breed {
    /// Look up a 1-5 numeric trait by its catalog key
    pub fn numeric_trait(&self, key: &str) -> Option<i32> {
        match key {
            "affectionateWithFamily" => self.affectionate_with_family,
            "goodWithKids" | "goodWithYoungChildren" => self.good_with_kids,
            "goodWithOtherDogs" => self.good_with_other_dogs,
            "droolingLevel" => self.drooling_level,
            "opennessToStrangers" => self.openness_to_strangers,
            "barkingLevel" => self.barking_level,
            "shedding" => self.shedding,
            "protectiveNature" => self.protective_nature,
            "playfulnessLevel" => self.playfulness_level,
            "adaptabilityLevel" => self.adaptability_level,
            "energyLevel" => self.energy_level,
            "trainability" => self.trainability,
            _ => None,
        }
    }

    /// Look up a categorical trait by its catalog key
    pub fn categorical_trait(&self, key: &str) -> Option<&Categorical> {
        match key {
            "coatType" => self.coat_type.as_ref(),
            "coatLength" => self.coat_length.as_ref(),
            "livingEnvironment" => self.living_environment.as_ref(),
            _ => None,
        }
    }

    /// Look up a range-valued field by its catalog key
    pub fn range_field(&self, key: &str) -> Option<Range> {
        match key {
            "height" => self.height,
            "weight" => self.weight,
            "lifeExpectancy" => self.life_expectancy,
            _ => None,
        }
    }
}

/// Derived size bucket, computed from the maximum height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
}

impl SizeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizeCategory::Small => "small",
            SizeCategory::Medium => "medium",
            SizeCategory::Large => "large",
        }
    }
}

/// A breed's value for one trait, resolved through the trait schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraitValue {
    Numeric(i32),
    Text(String),
    TextSet(BTreeSet<String>),
}

impl From<&Categorical> for TraitValue {
    fn from(value: &Categorical) -> Self {
        match value {
            Categorical::One(v) => TraitValue::Text(v.clone()),
            Categorical::Many(vs) => TraitValue::TextSet(vs.iter().cloned().collect()),
        }
    }
}

/// One selectable answer value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Numeric reading of the value; numeric strings are accepted
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) if n.is_finite() => Some(*n),
            Scalar::Number(_) => None,
            Scalar::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            Scalar::Number(_) => None,
        }
    }
}

/// The user's selection for a trait: a single value or a multi-select list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Many(Vec<Scalar>),
    One(Scalar),
}

impl AnswerValue {
    pub fn values(&self) -> &[Scalar] {
        match self {
            AnswerValue::Many(vs) => vs,
            AnswerValue::One(v) => std::slice::from_ref(v),
        }
    }

    pub fn selection_count(&self) -> usize {
        self.values().len()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealbreakerMode {
    #[default]
    Accept,
    Exclude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// One questionnaire answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Answer {
    #[validate(length(min = 1, message = "trait must be a non-empty string"))]
    #[serde(rename = "trait")]
    pub trait_key: String,
    #[validate(custom(function = "validate_answer_value"))]
    pub value: AnswerValue,
    #[serde(default)]
    pub dealbreaker: bool,
    /// Only meaningful when `dealbreaker` is set
    #[serde(default)]
    pub mode: DealbreakerMode,
    /// Carried through to explanations; does not affect weights
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl Answer {
    pub fn new(trait_key: impl Into<String>, value: AnswerValue) -> Self {
        Self {
            trait_key: trait_key.into(),
            value,
            dealbreaker: false,
            mode: DealbreakerMode::Accept,
            priority: None,
        }
    }

    pub fn dealbreaker(mut self, mode: DealbreakerMode) -> Self {
        self.dealbreaker = true;
        self.mode = mode;
        self
    }

    /// Exclude-mode dealbreakers only filter; they never earn score
    pub fn is_exclusion(&self) -> bool {
        self.dealbreaker && self.mode == DealbreakerMode::Exclude
    }
}

fn validate_answer_value(value: &AnswerValue) -> Result<(), ValidationError> {
    if value.values().is_empty() {
        let mut err = ValidationError::new("empty_value");
        err.message = Some("value must be number/string or a non-empty array of them".into());
        return Err(err);
    }
    Ok(())
}

/// Per-trait scoring record, returned when a breakdown is requested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitBreakdown {
    #[serde(rename = "trait")]
    pub trait_key: String,
    pub user_value: AnswerValue,
    pub breed_value: Option<TraitValue>,
    pub base_weight: f64,
    pub dampen: f64,
    pub weight_used: f64,
    pub trait_score: f64,
    pub is_dealbreaker: bool,
    pub mode: DealbreakerMode,
}

/// Ranked match for one breed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub breed: String,
    pub match_percentage: u8,
    pub reasons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<TraitBreakdown>>,
}

/// Questionnaire section
///
/// Variants are declared alphabetically so grouping sorts by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionCategory {
    Constraints,
    Lifestyle,
    Preferences,
}

/// One selectable answer to a question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub label: String,
    pub value: Scalar,
}

/// Questionnaire entry targeting one breed trait
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    #[serde(rename = "trait")]
    pub trait_key: String,
    pub category: QuestionCategory,
    pub options: Vec<QuestionOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

/// Questions of one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionGroup {
    pub category: QuestionCategory,
    pub questions: Vec<Question>,
}

/// Scoring parameters for one matcher
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
    pub base_weight: f64,
    pub max_score_per_trait: f64,
    /// Multi-select damping constant; `None` disables dampening
    pub dampening: Option<f64>,
    pub top_n: usize,
    /// Emit per-breed debug events
    pub debug: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_weight: 2.0,
            max_score_per_trait: 5.0,
            dampening: None,
            top_n: 3,
            debug: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_record() {
        let question: Question = serde_json::from_str(
            r#"{
                "text": "How much shedding can you handle?",
                "trait": "shedding",
                "category": "preferences",
                "options": [{"label": "Very Low", "value": 1}, {"label": "Any", "value": "any"}],
                "order": 3
            }"#,
        )
        .unwrap();
        assert_eq!(question.category, QuestionCategory::Preferences);
        assert_eq!(question.options[0].value, Scalar::Number(1.0));
        assert_eq!(question.order, Some(3));
        assert!(QuestionCategory::Constraints < QuestionCategory::Lifestyle);
    }

    #[test]
    fn test_breed_partial_record() {
        let breed: Breed = serde_json::from_str(r#"{"name": "Mystery", "energyLevel": 4}"#).unwrap();
        assert_eq!(breed.energy_level, Some(4));
        assert!(breed.height.is_none());
        assert!(breed.coat_type.is_none());
    }

    #[test]
    fn test_categorical_accepts_string_or_list() {
        let breed: Breed = serde_json::from_str(
            r#"{"name": "Barbet", "coatType": ["curly", "wavy"], "coatLength": "medium"}"#,
        )
        .unwrap();
        assert_eq!(
            breed.coat_type,
            Some(Categorical::Many(vec!["curly".into(), "wavy".into()]))
        );
        assert_eq!(breed.coat_length, Some(Categorical::One("medium".into())));
    }

    #[test]
    fn test_young_children_alias() {
        let breed: Breed = serde_json::from_str(r#"{"name": "Pug", "goodWithYoungChildren": 5}"#).unwrap();
        assert_eq!(breed.numeric_trait("goodWithKids"), Some(5));
    }

    #[test]
    fn test_answer_defaults() {
        let answer: Answer = serde_json::from_str(r#"{"trait": "energyLevel", "value": 3}"#).unwrap();
        assert!(!answer.dealbreaker);
        assert_eq!(answer.mode, DealbreakerMode::Accept);
        assert_eq!(answer.value.selection_count(), 1);
        assert!(answer.validate().is_ok());
    }

    #[test]
    fn test_answer_multi_select() {
        let answer: Answer = serde_json::from_str(
            r#"{"trait": "coatType", "value": ["curly", "wire"], "dealbreaker": true, "mode": "exclude"}"#,
        )
        .unwrap();
        assert_eq!(answer.value.selection_count(), 2);
        assert!(answer.is_exclusion());
    }

    #[test]
    fn test_empty_value_rejected() {
        let answer: Answer = serde_json::from_str(r#"{"trait": "coatType", "value": []}"#).unwrap();
        assert!(answer.validate().is_err());
    }

    #[test]
    fn test_scalar_numeric_reading() {
        assert_eq!(Scalar::Number(4.0).as_number(), Some(4.0));
        assert_eq!(Scalar::Text(" 3 ".into()).as_number(), Some(3.0));
        assert_eq!(Scalar::Text("curly".into()).as_number(), None);
    }
}
