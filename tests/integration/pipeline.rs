//! File pipeline integration tests
//!
//! Runs the full file-to-file flow across every crate: parse, build,
//! resolve, generate, serialize, and load back.

use std::fs;
use std::path::PathBuf;

use rosqa_foundation::ErrorKind;
use rosqa_questions::GeneratorConfig;
use rosqa_runtime::{QuestionRecord, generate_from_file, load_from_file, run_to_file};

/// A museum patrol system: a three-hop chain from beacons to the vault,
/// with an alias and a content-resolved service along the way.
const MUSEUM: &str = r#"
    type alias Pose = geometry_msgs/PoseStamped;

    topic /beacons : museum_msgs/BeaconArray;
    topic /pose : Pose;
    service /unlock : museum_msgs/Unlock;

    node type Beacon { publishes to /beacons; }
    node type Localizer {
        subscribes to /beacons;
        publishes to /pose;
    }
    node type Curator {
        param unlock_service: string = "/unlock";
        subscribes to /pose;
        uses service content(unlock_service);
    }
    node type Vault { provides service /unlock; }

    system {
        node instance beacon0 : Beacon { }
        node instance loc0 : Localizer { }
        node instance curator0 : Curator { }
        node instance vault0 : Vault { }
    }
"#;

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    fs::write(&path, contents).unwrap();
    path
}

// =============================================================================
// File to File
// =============================================================================

#[test]
fn source_file_becomes_loadable_question_json() {
    let input = write_temp("rosqa_integration_museum.rospec", MUSEUM);
    let output = std::env::temp_dir().join("rosqa_integration_museum.json");

    let count = run_to_file(&input, &output, &GeneratorConfig::default(), false).unwrap();
    let records = load_from_file(&output).unwrap();
    assert_eq!(records.len(), count);
    assert!(count > 0);

    // Output opens with the level-0 existence block.
    assert_eq!(records[0].level, 0);
    assert_eq!(records[0].category, "ENTITY");
    assert_eq!(records[0].answer, "Yes");

    let _ = fs::remove_file(&input);
    let _ = fs::remove_file(&output);
}

#[test]
fn loaded_records_match_generated_questions() {
    let input = write_temp("rosqa_integration_match.rospec", MUSEUM);
    let output = std::env::temp_dir().join("rosqa_integration_match.json");

    let config = GeneratorConfig::default();
    let questions = generate_from_file(&input, &config).unwrap();
    run_to_file(&input, &output, &config, true).unwrap();
    let records = load_from_file(&output).unwrap();

    assert_eq!(records.len(), questions.len());
    for (record, question) in records.iter().zip(&questions) {
        assert_eq!(*record, QuestionRecord::from(question));
    }

    let _ = fs::remove_file(&input);
    let _ = fs::remove_file(&output);
}

#[test]
fn answer_shape_serializes_under_the_type_key() {
    let input = write_temp("rosqa_integration_key.rospec", MUSEUM);
    let output = std::env::temp_dir().join("rosqa_integration_key.json");

    run_to_file(&input, &output, &GeneratorConfig::default(), true).unwrap();
    let json = fs::read_to_string(&output).unwrap();
    assert!(json.contains(r#""type":"BOOL""#));
    assert!(json.contains(r#""type":"MCQ""#));
    assert!(json.contains(r#""type":"OPEN""#));
    assert!(!json.contains("qtype"));

    let _ = fs::remove_file(&input);
    let _ = fs::remove_file(&output);
}

#[test]
fn repeated_runs_are_byte_identical() {
    let input = write_temp("rosqa_integration_stable.rospec", MUSEUM);
    let first = std::env::temp_dir().join("rosqa_integration_stable_a.json");
    let second = std::env::temp_dir().join("rosqa_integration_stable_b.json");

    run_to_file(&input, &first, &GeneratorConfig::default(), false).unwrap();
    run_to_file(&input, &second, &GeneratorConfig::default(), false).unwrap();
    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());

    let _ = fs::remove_file(&input);
    let _ = fs::remove_file(&first);
    let _ = fs::remove_file(&second);
}

// =============================================================================
// Whole-Pipeline Semantics
// =============================================================================

#[test]
fn message_questions_span_every_layer() {
    let input = write_temp("rosqa_integration_chain.rospec", MUSEUM);
    let output = std::env::temp_dir().join("rosqa_integration_chain.json");

    run_to_file(&input, &output, &GeneratorConfig::default(), false).unwrap();
    let records = load_from_file(&output).unwrap();

    let levels: Vec<u8> = records.iter().map(|r| r.level).collect();
    assert!(levels.contains(&0));
    assert!(levels.contains(&1));
    assert!(levels.contains(&2));

    let chain: Vec<&QuestionRecord> =
        records.iter().filter(|r| r.category == "MESSAGE").collect();
    assert_eq!(chain.len(), 3);
    assert!(chain.iter().all(|r| r.level == 2));

    let serve = chain
        .iter()
        .find(|r| r.question == "Which node serves service /unlock called by node curator0?")
        .unwrap();
    assert_eq!(serve.answer, "vault0");

    let _ = fs::remove_file(&input);
    let _ = fs::remove_file(&output);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn syntax_errors_name_the_offending_file() {
    let input = write_temp(
        "rosqa_integration_broken.rospec",
        "node type Beacon { publishes /beacons; }",
    );
    let err = generate_from_file(&input, &GeneratorConfig::default()).unwrap_err();

    assert!(matches!(err.kind, ErrorKind::Syntax { .. }));
    let context = err.context.expect("pipeline errors carry context");
    assert!(
        context
            .source
            .as_deref()
            .is_some_and(|s| s.contains("rosqa_integration_broken.rospec"))
    );

    let _ = fs::remove_file(&input);
}

#[test]
fn missing_inputs_fail_with_an_io_error() {
    let err = run_to_file(
        "/nonexistent/museum.rospec",
        std::env::temp_dir().join("rosqa_integration_never.json"),
        &GeneratorConfig::default(),
        false,
    )
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
}
