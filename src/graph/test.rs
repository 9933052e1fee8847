use crate::graph::{Edge, NetworkError, RoadNetwork, RoutingOverlay, TemporaryIds};
use crate::primitives::{ClosestStreetResult, Endpoint, NodeId, Segment, TimedPosition};
use crate::util::fixture;

use approx::assert_relative_eq;
use geo::Point;

const BLOCK: f64 = 142.949;

fn snapped(network: &RoadNetwork, way_id: i64, a: NodeId, b: NodeId, lat: f64, lng: f64) -> ClosestStreetResult {
    let endpoint = |id: NodeId| Endpoint {
        node_id: id,
        position: network.position(id).expect("node must exist"),
    };

    ClosestStreetResult {
        position: TimedPosition::new(lat, lng, 0),
        segment: Segment {
            way_id,
            start: endpoint(a),
            end: endpoint(b),
        },
    }
}

#[test_log::test]
fn routes_along_primary_road() {
    let network = fixture::network();
    let route = network.shortest_path(1, 5);

    assert_eq!(route.path, vec![1, 2, 3, 4, 5]);
    assert_eq!(route.edges.len(), 4);
    assert_eq!(route.positions.len(), 5);
    assert_relative_eq!(route.distance, 4.0 * BLOCK, epsilon = 1e-6);
}

#[test_log::test]
fn routes_onto_the_spur() {
    let network = fixture::network();
    let route = network.shortest_path(1, 8);

    assert_eq!(route.path, vec![1, 2, 3, 6, 8]);
    assert!(route.edges.iter().any(|edge| &*edge.street_type == "service"));
}

#[test_log::test]
fn route_to_self_is_empty() {
    let network = fixture::network();
    let route = network.shortest_path(3, 3);

    assert_eq!(route.path, vec![3]);
    assert_eq!(route.distance, 0.0);
    assert!(route.edges.is_empty());
}

#[test_log::test]
fn unreachable_target_is_infinite() {
    let mut network = fixture::network();
    network.add_node(99, Point::new(10.1, 50.1));

    let route = network.shortest_path(1, 99);

    assert!(route.distance.is_infinite());
    assert!(route.path.is_empty());
    assert!(!route.is_reachable());
}

#[test_log::test]
fn rejects_anomalous_edges() {
    let mut network = RoadNetwork::new();
    network.add_node(1, Point::new(10.0, 50.0));
    network.add_node(2, Point::new(10.001, 50.0));

    assert!(!network.add_edge(1, 1, Edge::new(10.0, "primary", "50", 1)));
    assert!(!network.add_edge(1, 2, Edge::new(0.0, "primary", "50", 1)));
    assert!(network.add_edge(1, 2, Edge::new(71.5, "primary", "50", 1)));

    assert!(network.edge(1, 1).is_none());
    assert!(network.edge(2, 1).is_none());
    assert!(network.edge(1, 2).is_some());
}

#[test_log::test]
fn routes_between_snapped_positions() {
    let network = fixture::network();
    let nodes_before = network.size();

    let from = snapped(&network, 100, 1, 2, 50.0, 10.0005);
    let to = snapped(&network, 100, 2, 3, 50.0, 10.0025);

    let route = network.route_between(&from, &to).expect("must route");

    assert_eq!(route.path.len(), 3);
    assert!(route.path[0] < 0 && route.path[2] < 0, "ends must be temporary");
    assert_eq!(route.path[1], 2);
    assert_relative_eq!(route.distance, BLOCK, max_relative = 1e-4);
    assert_relative_eq!(route.positions[0].x(), 10.0005);

    assert_eq!(network.size(), nodes_before, "network must not grow");
}

#[test_log::test]
fn joins_positions_on_the_same_segment() {
    let network = fixture::network();

    let from = snapped(&network, 100, 1, 2, 50.0, 10.0005);
    let to = snapped(&network, 100, 2, 1, 50.0, 10.0015);

    let route = network.route_between(&from, &to).expect("must route");

    assert_eq!(route.path, vec![-1, -2]);
    assert_relative_eq!(route.distance, BLOCK / 2.0, max_relative = 1e-4);
}

#[test_log::test]
fn reuses_coincident_endpoints() {
    let network = fixture::network();
    let mut overlay = RoutingOverlay::new(&network);

    let at_node = snapped(&network, 100, 2, 3, 50.0, 10.002);
    assert_eq!(overlay.materialize(&at_node).expect("resolves"), 2);

    let inside = snapped(&network, 100, 2, 3, 50.0, 10.003);
    let first = overlay.materialize(&inside).expect("resolves");
    let second = overlay.materialize(&inside).expect("resolves");

    assert_eq!(first, second);
    assert_eq!(overlay.temporary_nodes(), 1);
}

#[test_log::test]
fn respects_one_way_segments() {
    let mut network = RoadNetwork::new();
    network.add_node(1, Point::new(10.0, 50.0));
    network.add_node(2, Point::new(10.002, 50.0));
    network.add_edge(1, 2, Edge::new(BLOCK, "primary", "50", 7));

    let near_start = snapped(&network, 7, 1, 2, 50.0, 10.0005);
    let near_end = snapped(&network, 7, 1, 2, 50.0, 10.0015);

    let forward = network.route_between(&near_start, &near_end).expect("must route");
    assert!(forward.is_reachable());

    let backward = network.route_between(&near_end, &near_start).expect("must route");
    assert!(!backward.is_reachable());
}

#[test_log::test]
fn segment_without_edges_is_an_error() {
    let network = fixture::network();
    let orphan = snapped(&network, 100, 1, 5, 50.0, 10.004);

    let result = network.route_between(&orphan, &orphan);
    assert!(matches!(result, Err(NetworkError::MissingEdge { from: 1, to: 5 })));
}

#[test]
fn temporary_ids_descend() {
    let mut ids = TemporaryIds::default();
    assert_eq!((ids.allocate(), ids.allocate(), ids.allocate()), (-1, -2, -3));
}
