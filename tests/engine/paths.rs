//! Integration tests for path derivation
//!
//! Derives hops and maximal paths from resolved multi-node systems.

use rosqa_engine::{PathSet, derive_paths, graph_from_source};
use rosqa_graph::{ChannelKind, Graph};

/// A delivery robot: a three-topic perception chain ending at the base,
/// with the navigator calling a planning service found via content(...).
const DELIVERY: &str = r#"
    topic /scan : sensor_msgs/LaserScan;
    topic /obstacles : vision_msgs/Detections;
    topic /cmd_vel : geometry_msgs/Twist;
    service /plan_route : nav_msgs/GetPlan;

    node type Lidar { publishes to /scan; }
    node type Detector {
        subscribes to /scan;
        publishes to /obstacles;
    }
    node type Navigator {
        param route_service: string = "/plan_route";
        subscribes to /obstacles;
        publishes to /cmd_vel;
        uses service content(route_service);
    }
    node type Planner { provides service /plan_route; }
    node type Base { subscribes to /cmd_vel; }

    system {
        node instance lidar0 : Lidar {}
        node instance detector0 : Detector {}
        node instance nav0 : Navigator {}
        node instance planner0 : Planner {}
        node instance base0 : Base {}
    }
"#;

fn delivery() -> (Graph, PathSet) {
    let graph = graph_from_source(DELIVERY).unwrap();
    let set = derive_paths(&graph);
    (graph, set)
}

fn hop_names(graph: &Graph, set: &PathSet, path: &[usize]) -> Vec<String> {
    path.iter()
        .map(|&h| {
            let hop = &set.hops()[h];
            format!(
                "{} -{}-> {}",
                graph.instances()[hop.origin].name,
                hop.channel,
                graph.instances()[hop.dest].name
            )
        })
        .collect()
}

// =============================================================================
// Hops
// =============================================================================

#[test]
fn every_connected_pair_becomes_a_hop() {
    let (_, set) = delivery();
    // scan, obstacles, cmd_vel, plus the content-resolved service call.
    assert_eq!(set.hops().len(), 4);
}

#[test]
fn content_resolution_feeds_service_hops() {
    let (graph, set) = delivery();
    let service_hop = set
        .hops()
        .iter()
        .find(|h| h.kind == ChannelKind::Service)
        .unwrap();
    assert_eq!(service_hop.channel, "/plan_route");
    assert_eq!(graph.instances()[service_hop.origin].name, "nav0");
    assert_eq!(graph.instances()[service_hop.dest].name, "planner0");
}

#[test]
fn remapping_a_channel_away_disconnects_it() {
    let source = r"
        topic /scan : sensor_msgs/LaserScan;
        node type Lidar { publishes to /scan; }
        node type Viewer { subscribes to /scan; }
        system {
            node instance l0 : Lidar { remap /scan to /test_scan; }
            node instance v0 : Viewer {}
        }
    ";
    let graph = graph_from_source(source).unwrap();
    let set = derive_paths(&graph);
    assert!(set.is_empty());
}

#[test]
fn content_values_decide_which_server_answers() {
    let source = r#"
        service /fast_plan : nav_msgs/GetPlan;
        service /slow_plan : nav_msgs/GetPlan;
        node type Planner {
            param which: string = "/fast_plan";
            provides service content(which);
        }
        node type Commander { uses service /fast_plan; }
        system {
            node instance planner_a : Planner {}
            node instance planner_b : Planner { param which = "/slow_plan"; }
            node instance cmd : Commander {}
        }
    "#;
    let graph = graph_from_source(source).unwrap();
    let set = derive_paths(&graph);

    assert_eq!(set.hops().len(), 1);
    let hop = &set.hops()[0];
    assert_eq!(graph.instances()[hop.origin].name, "cmd");
    assert_eq!(graph.instances()[hop.dest].name, "planner_a");
}

// =============================================================================
// Paths
// =============================================================================

#[test]
fn maximal_paths_start_from_every_origin() {
    let (graph, set) = delivery();

    // The perception chain forks at nav0 (topic to base0, service to
    // planner0), so each start point contributes its suffixes:
    // 2 from lidar0, 2 from detector0, 2 from nav0 itself.
    assert_eq!(set.paths().len(), 6);

    let rendered: Vec<Vec<String>> = set
        .paths()
        .iter()
        .map(|p| hop_names(&graph, &set, p))
        .collect();
    assert!(rendered.contains(&vec![
        "lidar0 -/scan-> detector0".to_string(),
        "detector0 -/obstacles-> nav0".to_string(),
        "nav0 -/cmd_vel-> base0".to_string(),
    ]));
    assert!(rendered.contains(&vec![
        "lidar0 -/scan-> detector0".to_string(),
        "detector0 -/obstacles-> nav0".to_string(),
        "nav0 -/plan_route-> planner0".to_string(),
    ]));
}

#[test]
fn feedback_loops_truncate_instead_of_spinning() {
    let source = r"
        topic /cmd : std_msgs/Float64;
        topic /state : std_msgs/Float64;
        node type Controller {
            publishes to /cmd;
            subscribes to /state;
        }
        node type Plant {
            subscribes to /cmd;
            publishes to /state;
        }
        system {
            node instance ctrl : Controller {}
            node instance plant : Plant {}
        }
    ";
    let graph = graph_from_source(source).unwrap();
    let set = derive_paths(&graph);

    assert_eq!(set.hops().len(), 2);
    assert_eq!(set.paths().len(), 2);
    for path in set.paths() {
        assert_eq!(path.len(), 2);
    }
}

// =============================================================================
// Hop Groups
// =============================================================================

#[test]
fn fanout_collapses_into_one_group() {
    let source = r"
        topic /scan : sensor_msgs/LaserScan;
        node type Lidar { publishes to /scan; }
        node type Viewer { subscribes to /scan; }
        system {
            node instance l0 : Lidar {}
            node instance v1 : Viewer {}
            node instance v2 : Viewer {}
        }
    ";
    let graph = graph_from_source(source).unwrap();
    let set = derive_paths(&graph);

    let groups = set.hop_groups();
    assert_eq!(groups.len(), 1);
    let dests: Vec<&str> = groups[0]
        .dests
        .iter()
        .map(|&d| graph.instances()[d].name.as_str())
        .collect();
    assert_eq!(dests, ["v1", "v2"]);
}

#[test]
fn fan_in_keeps_one_group_per_caller() {
    let source = r"
        service /plan : nav_msgs/GetPlan;
        node type Planner { provides service /plan; }
        node type Commander { uses service /plan; }
        system {
            node instance srv : Planner {}
            node instance cmd_a : Commander {}
            node instance cmd_b : Commander {}
        }
    ";
    let graph = graph_from_source(source).unwrap();
    let set = derive_paths(&graph);

    // Groups key on the origin, so each client keeps its own question.
    let groups = set.hop_groups();
    assert_eq!(groups.len(), 2);
    for group in &groups {
        assert_eq!(group.channel, "/plan");
        assert_eq!(group.dests.len(), 1);
        assert_eq!(graph.instances()[group.dests[0]].name, "srv");
    }
}

#[test]
fn delivery_groups_have_no_fanout() {
    let (_, set) = delivery();
    let groups = set.hop_groups();
    assert_eq!(groups.len(), 4);
    assert!(groups.iter().all(|g| g.dests.len() == 1));
}
