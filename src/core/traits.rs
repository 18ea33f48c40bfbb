use serde::Serialize;
use crate::models::{Breed, SizeCategory, TraitValue};

/// Upper height bound (inclusive) of the small size bucket
pub const SMALL_MAX_HEIGHT: f64 = 30.0;
/// Upper height bound (inclusive) of the medium size bucket
pub const MEDIUM_MAX_HEIGHT: f64 = 55.0;

/// How a trait key is read off a breed record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraitKind {
    /// 1-5 scale, scored by closeness
    Numeric,
    /// String or list of strings, scored by membership
    Categorical,
    /// Not stored; derived from `height.max`
    SizeCategory,
}

const SCHEMA: &[(&str, TraitKind)] = &[
    ("energyLevel", TraitKind::Numeric),
    ("trainability", TraitKind::Numeric),
    ("droolingLevel", TraitKind::Numeric),
    ("shedding", TraitKind::Numeric),
    ("barkingLevel", TraitKind::Numeric),
    ("affectionateWithFamily", TraitKind::Numeric),
    ("goodWithKids", TraitKind::Numeric),
    ("goodWithYoungChildren", TraitKind::Numeric),
    ("goodWithOtherDogs", TraitKind::Numeric),
    ("protectiveNature", TraitKind::Numeric),
    ("playfulnessLevel", TraitKind::Numeric),
    ("adaptabilityLevel", TraitKind::Numeric),
    ("opennessToStrangers", TraitKind::Numeric),
    ("coatType", TraitKind::Categorical),
    ("coatLength", TraitKind::Categorical),
    ("livingEnvironment", TraitKind::Categorical),
    ("sizeCategory", TraitKind::SizeCategory),
];

/// Schema lookup; `None` for keys the engine cannot score
pub fn trait_kind(key: &str) -> Option<TraitKind> {
    SCHEMA.iter().find(|(k, _)| *k == key).map(|(_, kind)| *kind)
}

/// Keys of all numeric traits, in schema order
pub fn numeric_trait_keys() -> impl Iterator<Item = &'static str> {
    SCHEMA
        .iter()
        .filter(|(_, kind)| *kind == TraitKind::Numeric)
        .map(|(k, _)| *k)
}

/// Human-readable trait name used in mismatch reasons
pub fn trait_label(key: &str) -> &str {
    match key {
        "energyLevel" => "energy level",
        "coatType" => "coat type",
        "coatLength" => "coat length",
        "livingEnvironment" => "living environment",
        "trainability" => "trainability",
        "playfulnessLevel" => "playfulness level",
        "adaptabilityLevel" => "adaptability",
        "opennessToStrangers" => "openness to strangers",
        "protectiveNature" => "protective nature",
        "affectionateWithFamily" => "affection with family",
        "goodWithKids" => "compatibility with children",
        "goodWithOtherDogs" => "compatibility with other dogs",
        "droolingLevel" => "drooling tendency",
        "barkingLevel" => "barking level",
        "shedding" => "shedding level",
        "groomingFrequency" => "grooming needs",
        "sizeCategory" => "size",
        other => other,
    }
}

/// Size bucket for a maximum height: `<= 30` small, `(30, 55]` medium, above that large
#[inline]
pub fn size_category(height_max: f64) -> SizeCategory {
    if height_max <= SMALL_MAX_HEIGHT {
        SizeCategory::Small
    } else if height_max <= MEDIUM_MAX_HEIGHT {
        SizeCategory::Medium
    } else {
        SizeCategory::Large
    }
}

pub fn breed_size_category(breed: &Breed) -> Option<SizeCategory> {
    breed.height.map(|h| size_category(h.max))
}

/// Resolve a breed's value for `key`
///
/// Returns `None` when the key is not part of the schema or the breed lacks
/// the trait; callers treat both as "nothing to score".
pub fn resolve_trait(breed: &Breed, key: &str) -> Option<TraitValue> {
    match trait_kind(key)? {
        TraitKind::Numeric => breed.numeric_trait(key).map(TraitValue::Numeric),
        TraitKind::Categorical => breed.categorical_trait(key).map(TraitValue::from),
        TraitKind::SizeCategory => {
            breed_size_category(breed).map(|size| TraitValue::Text(size.as_str().to_string()))
        }
    }
}

/// End-user description of a trait
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TraitInfo {
    pub key: &'static str,
    pub label: &'static str,
    pub explanation: &'static str,
}

pub const TRAIT_GUIDE: &[TraitInfo] = &[
    TraitInfo {
        key: "energyLevel",
        label: "Energy Level",
        explanation: "How active and energetic a breed is. High-energy dogs need a lot of exercise and stimulation, while low-energy dogs are more relaxed and less demanding.",
    },
    TraitInfo {
        key: "trainability",
        label: "Trainability",
        explanation: "How easy it is to train a dog. Highly trainable breeds are eager to learn commands and respond well to positive reinforcement.",
    },
    TraitInfo {
        key: "droolingLevel",
        label: "Drooling Level",
        explanation: "How much a dog typically drools. Some breeds naturally drool more due to mouth structure and size.",
    },
    TraitInfo {
        key: "opennessToStrangers",
        label: "Openness to Strangers",
        explanation: "How friendly a breed is towards unfamiliar people. High openness means social and welcoming; low means reserved or cautious.",
    },
    TraitInfo {
        key: "protectiveNature",
        label: "Protective Nature",
        explanation: "How inclined the breed is to guard home and family. Good for security, but may need training to avoid aggression.",
    },
    TraitInfo {
        key: "playfulnessLevel",
        label: "Playfulness",
        explanation: "How much a dog enjoys games and activities. Playful dogs need more interactive playtime.",
    },
    TraitInfo {
        key: "adaptabilityLevel",
        label: "Adaptability",
        explanation: "How easily a dog adjusts to changes in environment, routine or living space.",
    },
    TraitInfo {
        key: "affectionateWithFamily",
        label: "Affectionate with Family",
        explanation: "How loving and emotionally connected a dog typically is with its human family.",
    },
    TraitInfo {
        key: "goodWithKids",
        label: "Good with Children",
        explanation: "How well a breed tends to behave around kids. Not all dogs tolerate loud noises, touching or fast movement.",
    },
    TraitInfo {
        key: "goodWithOtherDogs",
        label: "Good with Other Dogs",
        explanation: "A breed's typical tolerance of, or friendliness towards, other dogs.",
    },
    TraitInfo {
        key: "barkingLevel",
        label: "Barking Level",
        explanation: "How vocal the breed usually is, from rarely heard to alerting on everything.",
    },
    TraitInfo {
        key: "shedding",
        label: "Shedding",
        explanation: "How much hair the breed loses around the house over the year.",
    },
    TraitInfo {
        key: "coatType",
        label: "Coat Type",
        explanation: "The breed's hair structure (curly, smooth, double and so on). Affects grooming needs and sometimes allergens.",
    },
    TraitInfo {
        key: "coatLength",
        label: "Coat Length",
        explanation: "Short, medium or long fur. Longer coats usually require more grooming.",
    },
    TraitInfo {
        key: "livingEnvironment",
        label: "Living Environment",
        explanation: "The setting a breed is best suited for: urban, suburban or rural.",
    },
    TraitInfo {
        key: "sizeCategory",
        label: "Size",
        explanation: "Small, medium or large, derived from the breed's maximum shoulder height.",
    },
    TraitInfo {
        key: "groomingFrequency",
        label: "Grooming Frequency",
        explanation: "How often the breed typically needs brushing, bathing or trimming.",
    },
    TraitInfo {
        key: "lifeExpectancy",
        label: "Life Expectancy",
        explanation: "An estimate of how long the breed typically lives.",
    },
    TraitInfo {
        key: "commonHealthIssues",
        label: "Common Health Issues",
        explanation: "Medical problems that occur in the breed more often than average. Good breeders screen for these.",
    },
];
