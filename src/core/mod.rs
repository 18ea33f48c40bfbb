// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod questions;
pub mod scoring;
pub mod traits;

pub use filters::{dealbreaker_excludes, value_matches, CatalogPage, CatalogQuery, SortOrder};
pub use matcher::Matcher;
pub use questions::group_by_category;
pub use scoring::{dampen_factor, effective_weight, match_percentage, score_trait, total_possible_score};
pub use traits::{resolve_trait, size_category, trait_label, TraitInfo, TRAIT_GUIDE};
