use crate::core::traits::trait_label;
use crate::models::{Answer, Scalar, ScoringConfig, TraitValue};

/// Why a trait did not score its maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    /// Scalar breed value (numeric or text) away from the user's choice
    Differs,
    /// None of the user's choices appear in the breed's value list
    NotInChoices,
}

impl Mismatch {
    pub fn reason(&self, breed_name: &str, trait_key: &str) -> String {
        let label = trait_label(trait_key);
        match self {
            Mismatch::Differs => format!("{}'s {} differs from your preference", breed_name, label),
            Mismatch::NotInChoices => format!("{}'s {} does not match your choices", breed_name, label),
        }
    }
}

/// Score of a single trait for a single breed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraitScore {
    pub score: f64,
    pub mismatch: Option<Mismatch>,
}

/// Weight multiplier for an answer with `selection_count` selected values
///
/// `1 / (1 + d * (k - 1))` when dampening is enabled, otherwise 1.
#[inline]
pub fn dampen_factor(selection_count: usize, config: &ScoringConfig) -> f64 {
    match config.dampening {
        Some(d) if selection_count > 1 => 1.0 / (1.0 + d * (selection_count - 1) as f64),
        _ => 1.0,
    }
}

#[inline]
pub fn effective_weight(answer: &Answer, config: &ScoringConfig) -> f64 {
    config.base_weight * dampen_factor(answer.value.selection_count(), config)
}

/// Maximum reachable raw score for a set of answers
///
/// Exclude-mode dealbreakers only filter and are left out. The result does
/// not depend on any breed.
pub fn total_possible_score(answers: &[Answer], config: &ScoringConfig) -> f64 {
    answers
        .iter()
        .filter(|a| !a.is_exclusion())
        .map(|a| config.max_score_per_trait * effective_weight(a, config))
        .sum()
}

/// Score one resolved breed value against the user's selected values
///
/// Numeric traits earn `max - |difference|` for the closest selected value;
/// categorical traits earn `max` on any overlap and nothing otherwise.
pub fn score_trait(
    breed_value: &TraitValue,
    user_values: &[Scalar],
    weight: f64,
    max_per_trait: f64,
) -> TraitScore {
    match breed_value {
        TraitValue::Numeric(n) => {
            let breed_n = f64::from(*n);
            let min_diff = user_values
                .iter()
                .filter_map(Scalar::as_number)
                .map(|v| (breed_n - v).abs())
                .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |a| a.min(d))));

            match min_diff {
                Some(diff) => TraitScore {
                    score: (max_per_trait - diff).max(0.0) * weight,
                    mismatch: (diff > 0.0).then_some(Mismatch::Differs),
                },
                None => TraitScore { score: 0.0, mismatch: Some(Mismatch::Differs) },
            }
        }
        TraitValue::Text(value) => {
            if user_values.iter().any(|v| v.as_text() == Some(value.as_str())) {
                TraitScore { score: max_per_trait * weight, mismatch: None }
            } else {
                TraitScore { score: 0.0, mismatch: Some(Mismatch::Differs) }
            }
        }
        TraitValue::TextSet(values) => {
            let overlaps = user_values
                .iter()
                .filter_map(Scalar::as_text)
                .any(|v| values.contains(v));
            if overlaps {
                TraitScore { score: max_per_trait * weight, mismatch: None }
            } else {
                TraitScore { score: 0.0, mismatch: Some(Mismatch::NotInChoices) }
            }
        }
    }
}

/// Normalize a raw score to a whole percentage in `0..=100`
///
/// Rounds half away from zero; a zero denominator yields 0.
#[inline]
pub fn match_percentage(raw_score: f64, total_possible: f64) -> u8 {
    if total_possible <= 0.0 {
        return 0;
    }
    (raw_score / total_possible * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Two-decimal rounding for breakdown display
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
