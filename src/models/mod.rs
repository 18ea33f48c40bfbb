// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Answer, AnswerValue, Breed, Categorical, DealbreakerMode, GroomingFrequency, HealthIssue,
    MatchResult, Priority, Question, QuestionCategory, QuestionGroup, QuestionOption, Range, Scalar,
    ScoringConfig, SizeCategory, TraitBreakdown, TraitValue,
};
pub use requests::{
    CareTipsRequest, ExplainTraitRequest, RecommendQuery, RecommendRequest, WhyMatchRequest,
    WhyNotRequest,
};
pub use responses::{
    BreedListResponse, ErrorResponse, ExplanationResponse, HealthResponse, QuestionGroupsResponse,
    QuestionListResponse, RecommendResponse, TraitGuideResponse,
};
