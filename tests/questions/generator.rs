//! Integration tests for the question generator
//!
//! Generates the full list for a harbor tug system and checks ordering,
//! coverage, and exact question-answer pairs across all three levels.

use rosqa_engine::graph_from_source;
use rosqa_questions::{Category, GeneratorConfig, Level, QType, Question, generate};

/// A harbor tug dispatch system exercising every question category except
/// content topics: aliases, QoS, contexts, content services, TF, remaps,
/// and a three-hop communication chain radar -> mapper -> tug -> dockmaster.
const HARBOR: &str = r#"
    type alias Scan = sensor_msgs/LaserScan;
    message alias Grid = nav_msgs/OccupancyGrid;

    topic /scan : Scan;
    topic /grid : Grid;
    service /dock : tug_msgs/Dock;

    qos policy radar_qos {
        reliability: best_effort;
        depth: 5;
    }
    attach qos radar_qos to /scan;

    node type Radar {
        param spin_hz: int = 4 where { spin_hz > 0 };
        optional param frame: string = "mast";
        publishes to /scan;
        tf broadcasts hull -> radar;
    }

    node type Mapper {
        subscribes to /scan;
        publishes to /grid;
    }

    node type Tug {
        param dock_service: string = "/dock";
        subscribes to /grid;
        uses service content(dock_service);
    }

    node type Dockmaster {
        provides service /dock;
    }

    system {
        context harbor {
            spin_hz = 8;
        }

        node instance radar0 : Radar {
            use context harbor;
            param frame = "fore_mast";
        }

        node instance mapper0 : Mapper {
            remap /grid to /harbor_grid;
        }

        node instance tug0 : Tug {
            remap /grid to /harbor_grid;
        }

        node instance dock0 : Dockmaster { }
    }
"#;

fn questions() -> Vec<Question> {
    let graph = graph_from_source(HARBOR).unwrap();
    generate(&graph, &GeneratorConfig::default())
}

fn find<'q>(questions: &'q [Question], text: &str) -> &'q Question {
    questions
        .iter()
        .find(|q| q.question == text)
        .unwrap_or_else(|| panic!("no question: {text}"))
}

// =============================================================================
// Ordering and Determinism
// =============================================================================

#[test]
fn identical_inputs_generate_identical_lists() {
    assert_eq!(questions(), questions());
}

#[test]
fn records_sort_by_level_then_category() {
    let all = questions();
    for pair in all.windows(2) {
        assert!(
            (pair[0].level, pair[0].category) <= (pair[1].level, pair[1].category),
            "{:?}/{:?} emitted after {:?}/{:?}",
            pair[1].level,
            pair[1].category,
            pair[0].level,
            pair[0].category,
        );
    }
}

#[test]
fn every_category_with_matter_appears() {
    let all = questions();
    let present: Vec<Category> = {
        let mut seen = Vec::new();
        for q in &all {
            if !seen.contains(&q.category) {
                seen.push(q.category);
            }
        }
        seen
    };

    for category in [
        Category::Entity,
        Category::Node,
        Category::NodeType,
        Category::Topic,
        Category::Service,
        Category::Parameter,
        Category::ParameterAssign,
        Category::Context,
        Category::ContextAssign,
        Category::QosPolicy,
        Category::QosAttachment,
        Category::TypeAlias,
        Category::MessageAlias,
        Category::ContentService,
        Category::Tf,
        Category::Remap,
        Category::WhereBlock,
        Category::Message,
    ] {
        assert!(present.contains(&category), "no {category} questions");
    }
    // No node type reads a topic name through content(...).
    assert!(!present.contains(&Category::ContentTopic));
}

// =============================================================================
// Level 0: existence and kind
// =============================================================================

#[test]
fn every_identity_gets_existence_and_kind_questions() {
    let all = questions();
    let graph = graph_from_source(HARBOR).unwrap();
    let identities = graph.identities();
    assert_eq!(identities.len(), 15);

    let existence = all
        .iter()
        .filter(|q| q.level == Level::Entity && q.answer == "Yes")
        .count();
    let kinds = all
        .iter()
        .filter(|q| q.level == Level::Entity && q.qtype == QType::Mcq)
        .count();
    assert_eq!(existence, identities.len());
    assert_eq!(kinds, identities.len());
}

#[test]
fn kind_questions_list_all_eight_options() {
    let all = questions();
    let q = find(
        &all,
        "What kind of ROSpec entity is /scan? Possible answers: \
         1- node type, 2- node instance, 3- topic, 4- service, \
         5- context, 6- QoS policy, 7- type alias, 8- message alias.",
    );
    assert_eq!(q.qtype, QType::Mcq);
    assert_eq!(q.answer, "3");

    let q = find(
        &all,
        "What kind of ROSpec entity is radar_qos? Possible answers: \
         1- node type, 2- node instance, 3- topic, 4- service, \
         5- context, 6- QoS policy, 7- type alias, 8- message alias.",
    );
    assert_eq!(q.answer, "6");
}

// =============================================================================
// Level 1: relations and attributes
// =============================================================================

#[test]
fn declared_and_effective_views_stay_distinct() {
    let all = questions();
    let declared = find(&all, "Which topics does node type Mapper declare publishing to?");
    assert_eq!(declared.answer, "/grid");

    let effective = find(
        &all,
        "To which topics does node instance mapper0 publish, \
         after resolving content(...) and remaps?",
    );
    assert_eq!(effective.answer, "/harbor_grid");
    assert_eq!(effective.category, Category::Node);
}

#[test]
fn channel_questions_use_resolved_types() {
    let all = questions();
    assert_eq!(
        find(&all, "What is the message type of topic /scan?").answer,
        "sensor_msgs/LaserScan"
    );
    assert_eq!(
        find(&all, "What is the type of service /dock?").answer,
        "tug_msgs/Dock"
    );
    assert_eq!(
        find(
            &all,
            "Which node instances subscribe to topic /scan, \
             after resolving content(...) and remaps?"
        )
        .answer,
        "mapper0"
    );
}

#[test]
fn parameter_questions_cover_type_optionality_and_default() {
    let all = questions();
    assert_eq!(
        find(&all, "What is the type of parameter spin_hz in node type Radar?").answer,
        "int"
    );
    assert_eq!(
        find(&all, "Is parameter frame optional in node type Radar?").answer,
        "Yes"
    );
    assert_eq!(
        find(&all, "What is the default value of parameter frame in node type Radar?").answer,
        "mast"
    );
    assert_eq!(
        find(&all, "Which parameters are declared in node type Dockmaster?").answer,
        "None"
    );
}

#[test]
fn assignment_questions_report_effective_values() {
    let all = questions();
    assert_eq!(
        find(&all, "Which parameters are assigned in node instance radar0?").answer,
        "frame"
    );
    assert_eq!(
        find(
            &all,
            "What is the effective value of parameter frame in node instance radar0?"
        )
        .answer,
        "fore_mast"
    );
    assert_eq!(
        find(&all, "What value does context harbor assign to spin_hz?").answer,
        "8"
    );
    assert_eq!(
        find(&all, "Which node instances use context harbor?").answer,
        "radar0"
    );
}

#[test]
fn qos_questions_cover_settings_and_attachments() {
    let all = questions();
    assert_eq!(
        find(&all, "Which settings are declared in QoS policy radar_qos?").answer,
        "depth = 5, reliability = best_effort"
    );
    assert_eq!(
        find(&all, "What is the value of setting reliability in QoS policy radar_qos?").answer,
        "best_effort"
    );
    assert_eq!(
        find(&all, "Is QoS policy radar_qos attached to topic /scan?").answer,
        "Yes"
    );
    assert_eq!(
        find(&all, "Which QoS policy is attached to topic /scan?").answer,
        "radar_qos"
    );
}

#[test]
fn alias_questions_name_the_declared_target() {
    let all = questions();
    let q = find(&all, "What is the target of type alias Scan?");
    assert_eq!(q.answer, "sensor_msgs/LaserScan");
    assert_eq!(q.category, Category::TypeAlias);

    let q = find(&all, "What is the target of message alias Grid?");
    assert_eq!(q.answer, "nav_msgs/OccupancyGrid");
    assert_eq!(q.category, Category::MessageAlias);

    // Single-link aliases get no separate resolution question.
    assert!(
        all.iter()
            .all(|q| q.question != "What does type alias Scan ultimately resolve to?")
    );
}

#[test]
fn content_questions_name_parameter_and_resolution() {
    let all = questions();
    assert_eq!(
        find(
            &all,
            "Which parameters provide service names via content(...) in node type Tug?"
        )
        .answer,
        "dock_service"
    );
    assert_eq!(
        find(
            &all,
            "What is the resolved name of the content service read from \
             parameter dock_service in node instance tug0?"
        )
        .answer,
        "/dock"
    );
}

#[test]
fn tf_remap_and_where_questions() {
    let all = questions();
    assert_eq!(
        find(&all, "Which TF relations does node type Radar declare?").answer,
        "broadcasts hull -> radar"
    );
    assert_eq!(
        find(&all, "Does node type Radar broadcast the TF transform hull -> radar?").answer,
        "Yes"
    );
    assert_eq!(
        find(&all, "Does node instance tug0 remap /grid to /harbor_grid?").answer,
        "Yes"
    );
    assert_eq!(
        find(&all, "Does node type Radar declare a where-clause?").answer,
        "No"
    );
    assert_eq!(
        find(&all, "What is the constraint of parameter spin_hz in node type Radar?").answer,
        "spin_hz > 0"
    );
}

// =============================================================================
// Level 2: communication paths
// =============================================================================

#[test]
fn message_questions_follow_effective_channels() {
    let all = questions();
    let messages: Vec<&Question> = all
        .iter()
        .filter(|q| q.category == Category::Message)
        .collect();
    assert_eq!(messages.len(), 3);
    for q in &messages {
        assert_eq!(q.level, Level::Path);
        assert_eq!(q.qtype, QType::Open);
    }

    assert_eq!(
        find(&all, "Which node subscribes to topic /scan published by node radar0?").answer,
        "mapper0"
    );
    // The hop exists under the remapped name, not the declared one.
    assert_eq!(
        find(&all, "Which node subscribes to topic /harbor_grid published by node mapper0?")
            .answer,
        "tug0"
    );
    assert_eq!(
        find(&all, "Which node serves service /dock called by node tug0?").answer,
        "dock0"
    );
}

// =============================================================================
// Files Without Systems
// =============================================================================

#[test]
fn declaration_only_files_skip_instance_categories() {
    let source = r"
        topic /scan : sensor_msgs/LaserScan;
        node type Radar {
            param spin_hz: int = 4;
            publishes to /scan;
        }
    ";
    let graph = graph_from_source(source).unwrap();
    let all = generate(&graph, &GeneratorConfig::default());

    for category in [
        Category::Node,
        Category::ParameterAssign,
        Category::Context,
        Category::ContextAssign,
        Category::Remap,
        Category::Message,
    ] {
        assert!(
            all.iter().all(|q| q.category != category),
            "unexpected {category} question without a system block"
        );
    }
    assert!(all.iter().any(|q| q.category == Category::NodeType));
    assert!(all.iter().any(|q| q.category == Category::Topic));
    assert!(all.iter().any(|q| q.category == Category::Parameter));
}
