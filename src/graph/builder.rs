// src/graph/builder.rs
//! Per-period graph construction from aggregated activity.

use std::collections::BTreeMap;

use crate::aggregate::{BugParticipants, BugPeriods};
use crate::graph::collab::CollabGraph;

/// Builds one collaboration graph per period from the bug -> developers
/// and bug -> period mappings.
///
/// Every period 1..=k gets a graph, empty or not, so downstream
/// reporting has a row for each. Bugs without a period assignment, or
/// with a period outside 1..=k, contribute nothing. A bug's developers
/// all become nodes of its period graph; every unordered pair of
/// distinct developers gains one unit of edge weight.
#[must_use]
pub fn build_period_graphs(
    participants: &BugParticipants,
    periods: &BugPeriods,
    k: u32,
) -> BTreeMap<u32, CollabGraph> {
    let mut graphs: BTreeMap<u32, CollabGraph> =
        (1..=k).map(|p| (p, CollabGraph::new())).collect();

    for (bug_id, devs) in participants {
        let Some(&period) = periods.get(bug_id) else {
            continue;
        };
        let Some(graph) = graphs.get_mut(&period) else {
            continue;
        };

        for &dev in devs {
            graph.add_node(dev);
        }

        // Quadratic in the participant count; participant sets are small.
        let devs: Vec<_> = devs.iter().copied().collect();
        for (i, &u) in devs.iter().enumerate() {
            for &v in &devs[i + 1..] {
                graph.bump_edge(u, v);
            }
        }
    }

    graphs
}
