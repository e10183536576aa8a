//! End-to-end scenarios through the ID-based `Graph` API.

use collab_graph_wasm::{Graph, GraphError, PathOutcome, Traversal};

fn chain() -> Graph {
    Graph::from_json(r#"{"A": ["B"], "B": ["C"], "C": []}"#).unwrap()
}

#[test]
fn bfs_lists_chain_in_order() {
    let g = chain();
    assert_eq!(
        g.breadth_first("A", None).unwrap(),
        Traversal::Order(vec!["A".to_string(), "B".to_string(), "C".to_string()])
    );
    assert_eq!(g.breadth_first("A", Some("C")).unwrap(), Traversal::Found(true));
}

#[test]
fn bfs_misses_absent_target() {
    let g = chain();
    assert_eq!(g.breadth_first("A", Some("D")).unwrap(), Traversal::Found(false));
    assert_eq!(g.depth_first("A", Some("D")).unwrap(), Traversal::Found(false));
}

#[test]
fn dfs_matches_bfs_on_chain() {
    let g = chain();
    assert_eq!(
        g.depth_first("A", None).unwrap(),
        g.breadth_first("A", None).unwrap()
    );
    assert_eq!(g.depth_first("B", Some("A")).unwrap(), Traversal::Found(false));
}

#[test]
fn dijkstra_takes_two_cheap_hops() {
    let g = Graph::from_json(r#"{"A": {"B": 1, "C": 4}, "B": {"C": 1}, "C": {}}"#).unwrap();
    match g.shortest_path("A", "C").unwrap() {
        PathOutcome::Reachable(p) => {
            assert_eq!(p.path, vec!["A", "B", "C"]);
            assert_eq!(p.distance, 2.0);
            assert_eq!(p.hops, 2);
        }
        PathOutcome::Unreachable => panic!("C should be reachable from A"),
    }
    assert_eq!(g.shortest_path("C", "A").unwrap(), PathOutcome::Unreachable);
}

#[test]
fn kosaraju_groups_mutual_pair() {
    let g = Graph::from_json(r#"{"A": {"B": 1}, "B": {"A": 1}, "C": {}}"#).unwrap();
    let mut components: Vec<Vec<String>> = g
        .strongly_connected_components()
        .components
        .into_iter()
        .map(|mut c| {
            c.sort();
            c
        })
        .collect();
    components.sort();
    assert_eq!(components, vec![vec!["A", "B"], vec!["C"]]);
}

#[test]
fn unknown_start_is_an_error() {
    let g = chain();
    assert!(matches!(
        g.depth_first("Z", None),
        Err(GraphError::UnknownNode(id)) if id == "Z"
    ));
    assert!(matches!(
        g.reachable_from("Z"),
        Err(GraphError::UnknownNode(_))
    ));
}

#[test]
fn reachable_from_excludes_upstream() {
    let g = chain();
    assert_eq!(g.reachable_from("B").unwrap(), vec!["B", "C"]);
}

#[test]
fn algorithms_leave_graph_unchanged() {
    let g = Graph::from_json(r#"{"A": {"B": 2}, "B": {"A": 3, "C": 1}, "C": {}}"#).unwrap();
    let before = g.to_json().unwrap();
    let _ = g.breadth_first("A", None).unwrap();
    let _ = g.depth_first("A", Some("C")).unwrap();
    let _ = g.shortest_path("A", "C").unwrap();
    let _ = g.strongly_connected_components();
    assert_eq!(g.to_json().unwrap(), before);
}

#[test]
fn concurrent_readers_share_one_graph() {
    let g = std::sync::Arc::new(chain());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let g = std::sync::Arc::clone(&g);
            std::thread::spawn(move || g.breadth_first("A", Some("C")).unwrap().is_found())
        })
        .collect();
    for h in handles {
        assert!(h.join().unwrap());
    }
}
