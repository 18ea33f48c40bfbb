// Service exports
pub mod cache;
pub mod catalog;
pub mod llm;
pub mod postgres;

pub use cache::{CacheKey, CacheStats, ExplanationCache};
pub use catalog::{BreedCatalog, CatalogError, FileCatalog, QuestionCatalog};
pub use llm::{summarize_answers, ExplanationRequest, LlmClient, LlmError, SYSTEM_PROMPT};
pub use postgres::PostgresCatalog;
