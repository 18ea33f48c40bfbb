use crate::core::{
    filters::dealbreaker_excludes,
    scoring::{dampen_factor, match_percentage, round2, score_trait, total_possible_score},
    traits::resolve_trait,
};
use crate::models::{Answer, Breed, MatchResult, ScoringConfig, TraitBreakdown};

/// Breed matching engine
///
/// # Pipeline
/// 1. Normalization denominator from the answers alone
/// 2. Per breed: dealbreaker filtering, then trait scoring
/// 3. Zero-score breeds dropped
/// 4. Stable sort by percentage, truncated to `top_n`
///
/// Holds no state between calls; every call recomputes from its inputs.
#[derive(Debug, Clone)]
pub struct Matcher {
    config: ScoringConfig,
}

impl Matcher {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self {
            config: ScoringConfig::default(),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Rank `breeds` against the user's `answers`
    ///
    /// # Arguments
    /// * `answers` - Validated questionnaire answers
    /// * `breeds` - Catalog snapshot for this request
    /// * `include_breakdown` - Attach per-trait scoring records to each result
    ///
    /// # Returns
    /// At most `top_n` results, best first. Ties keep catalog order.
    pub fn match_breeds(
        &self,
        answers: &[Answer],
        breeds: &[Breed],
        include_breakdown: bool,
    ) -> Vec<MatchResult> {
        let total_possible = total_possible_score(answers, &self.config);

        // Nothing can score against an empty or non-finite denominator
        if !(total_possible.is_finite() && total_possible > 0.0) {
            tracing::debug!(total_possible, "No scorable answers");
            return Vec::new();
        }

        let mut results: Vec<MatchResult> = breeds
            .iter()
            .filter_map(|breed| self.evaluate(breed, answers, total_possible, include_breakdown))
            .collect();

        // sort_by is stable, so equal percentages stay in catalog order
        results.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
        results.truncate(self.config.top_n);

        tracing::debug!(
            answers = answers.len(),
            catalog = breeds.len(),
            returned = results.len(),
            "Breed matching finished"
        );

        results
    }

    /// Score a single breed
    ///
    /// Returns `None` when a dealbreaker excludes the breed or when no trait
    /// scored anything.
    pub fn evaluate(
        &self,
        breed: &Breed,
        answers: &[Answer],
        total_possible: f64,
        include_breakdown: bool,
    ) -> Option<MatchResult> {
        let mut raw_score = 0.0;
        let mut reasons: Vec<String> = Vec::new();
        let mut breakdown = Vec::new();

        for answer in answers {
            let breed_value = resolve_trait(breed, &answer.trait_key);

            if dealbreaker_excludes(answer, breed_value.as_ref()) {
                if self.config.debug {
                    tracing::debug!(
                        breed = %breed.name,
                        trait_key = %answer.trait_key,
                        mode = ?answer.mode,
                        "Breed excluded by dealbreaker"
                    );
                }
                return None;
            }

            let dampen = dampen_factor(answer.value.selection_count(), &self.config);
            let weight = self.config.base_weight * dampen;

            let (weight_used, trait_score) = if answer.is_exclusion() {
                // Satisfied exclusions are neutral
                (0.0, 0.0)
            } else if let Some(value) = &breed_value {
                let scored = score_trait(
                    value,
                    answer.value.values(),
                    weight,
                    self.config.max_score_per_trait,
                );
                if let Some(mismatch) = scored.mismatch {
                    let reason = mismatch.reason(&breed.name, &answer.trait_key);
                    if !reasons.contains(&reason) {
                        reasons.push(reason);
                    }
                }
                (weight, scored.score)
            } else {
                (weight, 0.0)
            };

            raw_score += trait_score;

            if include_breakdown {
                breakdown.push(TraitBreakdown {
                    trait_key: answer.trait_key.clone(),
                    user_value: answer.value.clone(),
                    breed_value,
                    base_weight: self.config.base_weight,
                    dampen,
                    weight_used: round2(weight_used),
                    trait_score: round2(trait_score),
                    is_dealbreaker: answer.dealbreaker,
                    mode: answer.mode,
                });
            }
        }

        // NaN from a degenerate weight counts as no score
        if !(raw_score > 0.0) {
            return None;
        }

        let percentage = match_percentage(raw_score, total_possible);

        if self.config.debug {
            tracing::debug!(
                breed = %breed.name,
                match_percentage = percentage,
                raw_score,
                total_possible,
                reasons = ?reasons,
                breakdown_entries = breakdown.len(),
                "Scored breed"
            );
        }

        Some(MatchResult {
            breed: breed.name.clone(),
            match_percentage: percentage,
            reasons,
            breakdown: include_breakdown.then_some(breakdown),
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_config()
    }
}
