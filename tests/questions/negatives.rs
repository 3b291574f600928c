//! Integration tests for negative existence questions
//!
//! The sampled fakes must land right after the positive existence block,
//! collide with nothing real, and be the only thing a seed changes.

use rosqa_engine::graph_from_source;
use rosqa_questions::{GeneratorConfig, Level, QType, Question, generate};

/// Four node types, three instances, two topics, one service: ten
/// identities, so the positive existence block is twenty records long.
const CROSSING: &str = r"
    topic /gate : std_msgs/Bool;
    topic /train : std_msgs/Bool;
    service /override : std_srvs/SetBool;

    node type Sensor { publishes to /train; }
    node type Controller {
        subscribes to /train;
        publishes to /gate;
        provides service /override;
    }
    node type Gate { subscribes to /gate; }
    node type Panel { uses service /override; }

    system {
        node instance sensor0 : Sensor { }
        node instance ctrl0 : Controller { }
        node instance gate0 : Gate { }
    }
";

fn questions(config: &GeneratorConfig) -> Vec<Question> {
    let graph = graph_from_source(CROSSING).unwrap();
    generate(&graph, config)
}

/// The sampled fake names, in output order.
fn negative_names(questions: &[Question]) -> Vec<String> {
    questions
        .iter()
        .filter(|q| q.level == Level::Entity && q.answer == "No")
        .map(|q| {
            q.question
                .strip_prefix("Is there a ROSpec entity called ")
                .and_then(|rest| rest.strip_suffix('?'))
                .unwrap_or_else(|| panic!("malformed negative: {}", q.question))
                .to_string()
        })
        .collect()
}

// =============================================================================
// Placement
// =============================================================================

#[test]
fn negatives_follow_the_positive_existence_block() {
    let all = questions(&GeneratorConfig::default());

    // Ten identities, two records each, then the five fakes.
    let positions: Vec<usize> = all
        .iter()
        .enumerate()
        .filter(|(_, q)| q.level == Level::Entity && q.answer == "No")
        .map(|(i, _)| i)
        .collect();
    assert_eq!(positions, (20..25).collect::<Vec<_>>());

    for q in &all[20..25] {
        assert_eq!(q.qtype, QType::Bool);
        assert!(q.question.starts_with("Is there a ROSpec entity called "));
    }
}

#[test]
fn negative_count_follows_the_config() {
    let all = questions(&GeneratorConfig::new().with_negatives_per_file(2));
    assert_eq!(negative_names(&all).len(), 2);
}

#[test]
fn negatives_can_be_switched_off() {
    let with = questions(&GeneratorConfig::default());
    let without = questions(&GeneratorConfig::new().with_negative_entities(false));

    assert!(negative_names(&without).is_empty());
    let positives: Vec<&Question> = with
        .iter()
        .filter(|q| !(q.level == Level::Entity && q.answer == "No"))
        .collect();
    assert_eq!(positives.len(), without.len());
    for (a, b) in positives.iter().zip(&without) {
        assert_eq!(**a, *b);
    }
}

// =============================================================================
// Collision Freedom
// =============================================================================

#[test]
fn fakes_extend_real_names_without_colliding() {
    let all = questions(&GeneratorConfig::default());
    let graph = graph_from_source(CROSSING).unwrap();
    let reals: Vec<&str> = graph.identities().iter().map(|(_, n)| *n).collect();

    let fakes = negative_names(&all);
    assert_eq!(fakes.len(), 5);
    for fake in &fakes {
        let (base, suffix) = fake.rsplit_once('_').unwrap();
        assert!(reals.contains(&base), "unexpected base in {fake}");
        assert_eq!(suffix.len(), 2);
        assert!(suffix.chars().all(|c| c.is_ascii_lowercase()));
        assert!(!reals.contains(&fake.as_str()));
    }
}

#[test]
fn fakes_never_appear_inside_true_answers() {
    let all = questions(&GeneratorConfig::default());
    let fakes = negative_names(&all);
    for q in &all {
        if q.answer == "No" {
            continue;
        }
        for fake in &fakes {
            assert!(
                !q.answer.contains(fake.as_str()),
                "fake {fake} inside answer {:?}",
                q.answer
            );
        }
    }
}

// =============================================================================
// Seeding
// =============================================================================

#[test]
fn seeds_change_only_the_fakes() {
    let a = questions(&GeneratorConfig::new().with_seed(1));
    let b = questions(&GeneratorConfig::new().with_seed(2));

    assert_ne!(negative_names(&a), negative_names(&b));

    let strip = |qs: &[Question]| -> Vec<Question> {
        qs.iter()
            .filter(|q| !(q.level == Level::Entity && q.answer == "No"))
            .cloned()
            .collect()
    };
    assert_eq!(strip(&a), strip(&b));
}

#[test]
fn the_default_seed_is_stable() {
    let a = questions(&GeneratorConfig::default());
    let b = questions(&GeneratorConfig::new().with_seed(rosqa_questions::DEFAULT_SEED));
    assert_eq!(a, b);
}
