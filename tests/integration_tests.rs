// Integration tests for Breed Match

use breed_match::core::{resolve_trait, value_matches, Matcher};
use breed_match::models::{
    Answer, AnswerValue, Breed, Categorical, DealbreakerMode, Range, Scalar, ScoringConfig,
};

const CATALOG: &str = include_str!("../data/breeds.json");

fn catalog() -> Vec<Breed> {
    serde_json::from_str(CATALOG).expect("bundled catalog should parse")
}

fn numeric(key: &str, values: &[f64]) -> Answer {
    Answer::new(key, AnswerValue::Many(values.iter().map(|v| Scalar::Number(*v)).collect()))
}

fn text(key: &str, values: &[&str]) -> Answer {
    Answer::new(
        key,
        AnswerValue::Many(values.iter().map(|v| Scalar::Text(v.to_string())).collect()),
    )
}

fn names(results: &[breed_match::MatchResult]) -> Vec<&str> {
    results.iter().map(|r| r.breed.as_str()).collect()
}

/// A spread of realistic questionnaires used by the property tests
fn answer_sets() -> Vec<Vec<Answer>> {
    vec![
        vec![numeric("energyLevel", &[5.0])],
        vec![numeric("energyLevel", &[2.0, 3.0]), numeric("shedding", &[1.0])],
        vec![
            numeric("trainability", &[5.0]),
            text("coatType", &["curly", "wavy"]),
            text("livingEnvironment", &["urban"]).dealbreaker(DealbreakerMode::Accept),
        ],
        vec![
            numeric("energyLevel", &[4.0]),
            text("coatType", &["double"]).dealbreaker(DealbreakerMode::Exclude),
            text("sizeCategory", &["small"]),
        ],
        vec![
            numeric("goodWithKids", &[5.0]),
            numeric("barkingLevel", &[1.0]),
            numeric("droolingLevel", &[1.0]),
            text("livingEnvironment", &["rural"]).dealbreaker(DealbreakerMode::Exclude),
        ],
        vec![
            text("coatLength", &["short"]),
            numeric("opennessToStrangers", &[3.0]),
            numeric("protectiveNature", &[4.0]),
        ],
    ]
}

#[test]
fn test_integration_end_to_end_matching() {
    let matcher = Matcher::with_default_config();
    let breeds = catalog();

    let results = matcher.match_breeds(&[numeric("energyLevel", &[5.0])], &breeds, false);

    // Six breeds are perfect; ties keep catalog order
    assert_eq!(
        names(&results),
        vec!["Appenzeller Sennenhund", "Australian Cattle Dog", "Australian Kelpie"]
    );
    assert!(results.iter().all(|r| r.match_percentage == 100));
    assert!(results.iter().all(|r| r.reasons.is_empty()));
}

#[test]
fn test_perfect_and_mismatched_breeds() {
    let breeds = vec![
        Breed {
            name: "Curly Dynamo".to_string(),
            energy_level: Some(5),
            coat_type: Some(Categorical::One("curly".to_string())),
            ..Default::default()
        },
        Breed {
            name: "Smooth Sleeper".to_string(),
            energy_level: Some(1),
            coat_type: Some(Categorical::One("smooth".to_string())),
            ..Default::default()
        },
    ];
    let answers = vec![numeric("energyLevel", &[5.0]), text("coatType", &["curly"])];

    let results = Matcher::with_default_config().match_breeds(&answers, &breeds, false);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].breed, "Curly Dynamo");
    assert_eq!(results[0].match_percentage, 100);
    assert!(results[0].reasons.is_empty());

    assert_eq!(results[1].breed, "Smooth Sleeper");
    assert!(results[1].match_percentage < 100);
    assert_eq!(
        results[1].reasons,
        vec![
            "Smooth Sleeper's energy level differs from your preference".to_string(),
            "Smooth Sleeper's coat type differs from your preference".to_string(),
        ]
    );
}

#[test]
fn test_urban_exclusion_removes_perfect_breeds() {
    let breeds = catalog();
    let answers = vec![
        text("livingEnvironment", &["urban"]).dealbreaker(DealbreakerMode::Exclude),
        numeric("energyLevel", &[5.0]),
    ];

    let results = Matcher::with_default_config().match_breeds(&answers, &breeds, false);

    // Barbado da Terceira scores 100% on energy but lives in the city
    assert!(!names(&results).contains(&"Barbado da Terceira"));
    assert_eq!(
        names(&results),
        vec!["Appenzeller Sennenhund", "Australian Cattle Dog", "Australian Kelpie"]
    );
    for result in &results {
        let breed = breeds.iter().find(|b| b.name == result.breed).unwrap();
        let env = breed.living_environment.as_ref().unwrap();
        assert!(!env.contains("urban"));
        assert_eq!(result.match_percentage, 100);
    }
}

#[test]
fn test_accept_dealbreaker_is_scored() {
    let breeds = catalog();
    let answers = vec![
        text("livingEnvironment", &["urban"]).dealbreaker(DealbreakerMode::Accept),
        numeric("energyLevel", &[5.0]),
    ];

    let results = Matcher::with_default_config().match_breeds(&answers, &breeds, false);

    assert_eq!(names(&results), vec!["Barbado da Terceira", "Afghan Hound", "Akita"]);
    assert_eq!(
        results.iter().map(|r| r.match_percentage).collect::<Vec<_>>(),
        vec![100, 90, 90]
    );
}

#[test]
fn test_size_category_derivation() {
    let breed = |name: &str, max: f64| Breed {
        name: name.to_string(),
        height: Some(Range { min: max - 5.0, max }),
        ..Default::default()
    };
    let breeds = vec![breed("Pocket", 25.0), breed("Middling", 40.0), breed("Towering", 60.0)];
    let matcher = Matcher::with_default_config();

    for (size, expected) in [("small", "Pocket"), ("medium", "Middling"), ("large", "Towering")] {
        let results = matcher.match_breeds(&[text("sizeCategory", &[size])], &breeds, false);
        assert_eq!(names(&results), vec![expected], "size {}", size);
    }
}

#[test]
fn test_zero_score_breeds_dropped() {
    let breeds = catalog();
    let matcher = Matcher::with_default_config();

    // Nobody has a corded coat, and energy 10 is out of reach for a 1-5 scale
    assert!(matcher.match_breeds(&[text("coatType", &["corded"])], &breeds, false).is_empty());
    assert!(matcher.match_breeds(&[numeric("energyLevel", &[10.0])], &breeds, false).is_empty());
}

#[test]
fn test_bounds_and_top_n() {
    let breeds = catalog();
    let matcher = Matcher::with_default_config();

    for answers in answer_sets() {
        let results = matcher.match_breeds(&answers, &breeds, false);
        assert!(results.len() <= 3);
        assert!(results.iter().all(|r| r.match_percentage <= 100));
        assert!(results
            .windows(2)
            .all(|w| w[0].match_percentage >= w[1].match_percentage));
    }
}

#[test]
fn test_top_n_on_large_catalog() {
    let mut breeds = Vec::new();
    for round in 0..20 {
        breeds.extend(catalog().into_iter().map(|mut b| {
            b.name = format!("{} {}", b.name, round);
            b
        }));
    }

    let results =
        Matcher::with_default_config().match_breeds(&[numeric("energyLevel", &[4.0])], &breeds, false);
    assert_eq!(results.len(), 3);
}

#[test]
fn test_dealbreaker_correctness() {
    let breeds = catalog();
    let matcher = Matcher::with_default_config();

    for answers in answer_sets() {
        let results = matcher.match_breeds(&answers, &breeds, false);

        for result in &results {
            let breed = breeds.iter().find(|b| b.name == result.breed).unwrap();
            for answer in answers.iter().filter(|a| a.dealbreaker) {
                let value = resolve_trait(breed, &answer.trait_key);
                let hit = value_matches(value.as_ref(), answer.value.values());
                match answer.mode {
                    DealbreakerMode::Exclude => assert!(!hit, "{} should be excluded", breed.name),
                    DealbreakerMode::Accept => assert!(hit, "{} should be filtered", breed.name),
                }
            }
        }
    }
}

#[test]
fn test_determinism() {
    let breeds = catalog();
    let matcher = Matcher::with_default_config();

    for answers in answer_sets() {
        let first = matcher.match_breeds(&answers, &breeds, true);
        let second = matcher.match_breeds(&answers, &breeds, true);
        assert_eq!(first, second);
    }
}

#[test]
fn test_debug_logging_does_not_change_results() {
    let breeds = catalog();
    let quiet = Matcher::new(ScoringConfig::default());
    let chatty = Matcher::new(ScoringConfig {
        debug: true,
        ..ScoringConfig::default()
    });

    for answers in answer_sets() {
        assert_eq!(
            quiet.match_breeds(&answers, &breeds, false),
            chatty.match_breeds(&answers, &breeds, false)
        );
    }
}

#[test]
fn test_weight_scaling_preserves_ranking() {
    let breeds = catalog();
    let base = Matcher::with_default_config();
    let heavier = Matcher::new(ScoringConfig {
        base_weight: 4.0,
        ..ScoringConfig::default()
    });

    for answers in answer_sets() {
        assert_eq!(
            base.match_breeds(&answers, &breeds, false),
            heavier.match_breeds(&answers, &breeds, false)
        );
    }
}

#[test]
fn test_perfect_trait_never_ranks_below_worse_match() {
    let breed = |name: &str, energy: i32| Breed {
        name: name.to_string(),
        energy_level: Some(energy),
        trainability: Some(3),
        ..Default::default()
    };
    // Worse match listed first so catalog order cannot explain the ranking
    let breeds = vec![breed("Couch Potato", 2), breed("Live Wire", 5)];
    let answers = vec![numeric("energyLevel", &[5.0]), numeric("trainability", &[3.0])];

    for dampening in [None, Some(0.25)] {
        let matcher = Matcher::new(ScoringConfig {
            dampening,
            ..ScoringConfig::default()
        });
        let results = matcher.match_breeds(&answers, &breeds, false);
        assert_eq!(names(&results), vec!["Live Wire", "Couch Potato"]);
    }
}
