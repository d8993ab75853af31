// tests/unit_graph_build.rs
//! Tests for collaboration-graph construction from raw records.

use collabnet_core::aggregate;
use collabnet_core::graph::build_period_graphs;
use collabnet_core::identity::DevRegistry;
use collabnet_core::ingest;

fn build_from_csv(
    participation: &str,
    assignments: &str,
    k: u32,
) -> (
    std::collections::BTreeMap<u32, collabnet_core::graph::CollabGraph>,
    DevRegistry,
) {
    let (records, _) = ingest::read_participation(participation.as_bytes()).unwrap();
    let (assigned, _) = ingest::read_assignments(assignments.as_bytes()).unwrap();

    let mut registry = DevRegistry::new();
    let participants = aggregate::collect_participants(&records, &mut registry);
    let periods = aggregate::collect_assignments(&assigned);
    (build_period_graphs(&participants, &periods, k), registry)
}

#[test]
fn co_commenting_pairs_become_weighted_edges() {
    let participation = "\
bug_id,comment_author
1,alice
1,bob
2,alice
2,bob
3,alice
3,carol
";
    let assignments = "\
bug_id,period
1,1
2,1
3,1
";
    let (graphs, registry) = build_from_csv(participation, assignments, 5);
    let g = &graphs[&1];

    let alice = registry.get("alice").unwrap();
    let bob = registry.get("bob").unwrap();
    let carol = registry.get("carol").unwrap();

    assert_eq!(g.node_count(), 3);
    assert_eq!(g.edge_count(), 2);
    assert_eq!(g.weight(alice, bob), Some(2));
    assert_eq!(g.weight(alice, carol), Some(1));
    assert!(!g.has_edge(bob, carol));
}

#[test]
fn repeat_comments_by_one_developer_count_once() {
    let participation = "\
bug_id,comment_author
1,alice
1,alice
1,bob
";
    let assignments = "bug_id,period\n1,2\n";
    let (graphs, registry) = build_from_csv(participation, assignments, 3);

    let alice = registry.get("alice").unwrap();
    let bob = registry.get("bob").unwrap();
    assert_eq!(graphs[&2].weight(alice, bob), Some(1));
}

#[test]
fn bugs_without_assignment_reach_no_graph() {
    let participation = "\
bug_id,comment_author
1,alice
1,bob
9,carol
9,dave
";
    let assignments = "bug_id,period\n1,1\n";
    let (graphs, registry) = build_from_csv(participation, assignments, 2);

    assert_eq!(graphs[&1].edge_count(), 1);
    assert_eq!(graphs[&2].edge_count(), 0);
    // carol and dave were interned but appear in no graph.
    assert!(registry.get("carol").is_some());
    assert!(!graphs[&1].has_node(registry.get("carol").unwrap()));
}

#[test]
fn developer_ids_are_stable_across_periods() {
    let participation = "\
bug_id,comment_author
1,alice
1,bob
2,alice
2,carol
";
    let assignments = "bug_id,period\n1,1\n2,2\n";
    let (graphs, registry) = build_from_csv(participation, assignments, 2);

    let alice = registry.get("alice").unwrap();
    // The same surrogate id represents alice in both period graphs.
    assert!(graphs[&1].has_node(alice));
    assert!(graphs[&2].has_node(alice));
}

#[test]
fn every_pair_of_a_large_bug_is_connected() {
    let participation = "\
bug_id,comment_author
1,a
1,b
1,c
1,d
";
    let assignments = "bug_id,period\n1,1\n";
    let (graphs, registry) = build_from_csv(participation, assignments, 1);
    let g = &graphs[&1];

    let ids: Vec<_> = ["a", "b", "c", "d"]
        .iter()
        .map(|h| registry.get(h).unwrap())
        .collect();
    assert_eq!(g.edge_count(), 6);
    for (i, &u) in ids.iter().enumerate() {
        for &v in &ids[i + 1..] {
            assert_eq!(g.weight(u, v), Some(1));
        }
    }
}
