//! Integration tests for resolution
//!
//! Runs the full parse-build-resolve pipeline over systems where alias
//! chains, scope precedence, content channels, and remaps interact.

use rosqa_engine::graph_from_source;
use rosqa_foundation::{ErrorKind, Value};
use rosqa_language::ast::{ChannelRef, RoleKind};

/// An inspection rig: a two-step alias chain feeding a topic and a
/// service, a camera resolving parameters from three scopes, and a
/// stitcher whose content topic is set by context and then remapped.
const INSPECTION: &str = r#"
    type alias Image = RawImage;
    type alias RawImage = sensor_msgs/Image;
    message alias Cloud = sensor_msgs/PointCloud2;

    topic /camera : Image;
    topic /cloud : Cloud;
    service /capture : Image -> std_srvs/TriggerResponse;

    node type Camera {
        param device: string = "/dev/video0";
        param fps: int = 15;
        optional param label: string;
        publishes to /camera;
        provides service /capture;
    }

    node type Stitcher {
        param cloud_topic: string = "/cloud";
        param window: double = 1.5;
        subscribes to /camera;
        publishes to content(cloud_topic);
    }

    system {
        context bench {
            fps = 5;
            cloud_topic = "/bench_cloud";
        }
        context field {
            fps = 30;
            window = 0.25;
        }

        node instance cam0 : Camera {
            use context bench;
            use context field;
            param label = "forward";
        }

        node instance stitch0 : Stitcher {
            use context bench;
            remap /bench_cloud to /cloud;
        }
    }
"#;

// =============================================================================
// Alias and Channel Types
// =============================================================================

#[test]
fn alias_chains_resolve_to_their_end() {
    let graph = graph_from_source(INSPECTION).unwrap();

    assert_eq!(
        graph.alias("Image").unwrap().resolved_target.as_deref(),
        Some("sensor_msgs/Image")
    );
    assert_eq!(
        graph.alias("RawImage").unwrap().resolved_target.as_deref(),
        Some("sensor_msgs/Image")
    );
    assert_eq!(
        graph.alias("Cloud").unwrap().resolved_target.as_deref(),
        Some("sensor_msgs/PointCloud2")
    );
}

#[test]
fn channel_types_resolve_through_chains() {
    let graph = graph_from_source(INSPECTION).unwrap();

    assert_eq!(
        graph.topic("/camera").unwrap().resolved_ty.as_deref(),
        Some("sensor_msgs/Image")
    );
    assert_eq!(
        graph.service("/capture").unwrap().resolved_ty.as_deref(),
        Some("sensor_msgs/Image -> std_srvs/TriggerResponse")
    );
}

#[test]
fn declared_types_stay_next_to_resolved_ones() {
    let graph = graph_from_source(INSPECTION).unwrap();
    let camera = graph.topic("/camera").unwrap();
    assert_eq!(camera.ty.as_deref(), Some("Image"));
    assert_eq!(camera.resolved_ty.as_deref(), Some("sensor_msgs/Image"));
}

// =============================================================================
// Parameter Scopes
// =============================================================================

#[test]
fn each_parameter_resolves_from_its_own_scope() {
    let graph = graph_from_source(INSPECTION).unwrap();
    let cam0 = graph.instance("cam0").unwrap();

    // fps: both contexts assign it; bench attached first and wins.
    assert_eq!(cam0.effective_param("fps"), Some(&Value::Int(5)));
    // label: set directly on the instance.
    assert_eq!(
        cam0.effective_param("label"),
        Some(&Value::Str("forward".into()))
    );
    // device: nothing overrides the default.
    assert_eq!(
        cam0.effective_param("device"),
        Some(&Value::Str("/dev/video0".into()))
    );
}

#[test]
fn context_keys_for_other_types_are_ignored() {
    let graph = graph_from_source(INSPECTION).unwrap();
    // bench assigns cloud_topic, which Camera never declares; cam0 gets
    // no such effective parameter and stitch0 does.
    let cam0 = graph.instance("cam0").unwrap();
    assert_eq!(cam0.effective_param("cloud_topic"), None);

    let stitch0 = graph.instance("stitch0").unwrap();
    assert_eq!(
        stitch0.effective_param("cloud_topic"),
        Some(&Value::Str("/bench_cloud".into()))
    );
}

#[test]
fn context_type_errors_name_the_context() {
    let source = r#"
        node type Camera { param fps: int = 15; }
        system {
            context bad { fps = "fast"; }
            node instance cam0 : Camera { use context bad; }
        }
    "#;
    let err = graph_from_source(source).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    assert_eq!(
        err.to_string(),
        "type mismatch for parameter fps in context bad: expected int, found string"
    );
}

// =============================================================================
// Content Channels and Remaps
// =============================================================================

#[test]
fn content_topic_resolves_from_context_then_remaps() {
    let graph = graph_from_source(INSPECTION).unwrap();
    let stitch0 = graph.instance("stitch0").unwrap();

    // cloud_topic comes from the bench context as /bench_cloud, then the
    // remap renames the resolved channel to /cloud.
    assert_eq!(stitch0.effective_channels(RoleKind::Publishes), ["/cloud"]);

    let publish = stitch0
        .effective_roles
        .iter()
        .find(|r| r.kind == RoleKind::Publishes)
        .unwrap();
    assert_eq!(publish.declared, ChannelRef::Content("cloud_topic".into()));
}

#[test]
fn literal_roles_resolve_alongside_content_ones() {
    let graph = graph_from_source(INSPECTION).unwrap();
    let stitch0 = graph.instance("stitch0").unwrap();
    assert_eq!(
        stitch0.effective_channels(RoleKind::Subscribes),
        ["/camera"]
    );
}

#[test]
fn content_without_any_value_fails_resolution() {
    let source = r"
        node type Reporter {
            optional param sink: string;
            publishes to content(sink);
        }
        system { node instance rep0 : Reporter {} }
    ";
    let err = graph_from_source(source).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnresolvedContentService { .. }));
    assert_eq!(
        err.to_string(),
        "cannot resolve content channel for node instance rep0: \
         parameter sink has no effective value"
    );
}

#[test]
fn alias_cycles_fail_resolution() {
    let source = r"
        type alias Ping = Pong;
        message alias Pong = Ping;
        topic /x : Ping;
    ";
    let err = graph_from_source(source).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AliasCycle { .. }));
    assert_eq!(
        err.to_string(),
        "alias cycle detected at Ping: Ping -> Pong -> Ping"
    );
}
