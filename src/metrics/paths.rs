// src/metrics/paths.rs
//! Shortest-path metrics: connectivity, diameter, average path length.
//!
//! Connectivity is tested up front; diameter and average path length are
//! undefined on disconnected graphs and are never attempted there.

use std::collections::{HashMap, VecDeque};

use crate::graph::collab::CollabGraph;
use crate::identity::DevId;

/// Unweighted BFS distances from `source` to every reachable node
/// (including `source` itself at distance 0).
#[must_use]
pub fn bfs_distances(graph: &CollabGraph, source: DevId) -> HashMap<DevId, usize> {
    let mut dist = HashMap::new();
    dist.insert(source, 0);
    let mut queue = VecDeque::from([source]);

    while let Some(v) = queue.pop_front() {
        let d = dist[&v];
        for w in graph.neighbors(v) {
            if !dist.contains_key(&w) {
                dist.insert(w, d + 1);
                queue.push_back(w);
            }
        }
    }
    dist
}

/// True when every node reaches every other. The empty graph counts as
/// disconnected so path metrics fall back to their unbounded sentinel.
#[must_use]
pub fn is_connected(graph: &CollabGraph) -> bool {
    let Some(start) = graph.nodes().next() else {
        return false;
    };
    bfs_distances(graph, start).len() == graph.node_count()
}

/// Longest shortest-path length, or `None` when disconnected.
#[must_use]
pub fn diameter(graph: &CollabGraph) -> Option<usize> {
    if !is_connected(graph) {
        return None;
    }
    let mut max = 0;
    for v in graph.nodes() {
        let ecc = bfs_distances(graph, v).into_values().max().unwrap_or(0);
        max = max.max(ecc);
    }
    Some(max)
}

/// Mean shortest-path length over all node pairs, or `None` when
/// disconnected. A single-node graph has no pairs and averages to 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn avg_path_length(graph: &CollabGraph) -> Option<f64> {
    if !is_connected(graph) {
        return None;
    }
    let n = graph.node_count();
    if n < 2 {
        return Some(0.0);
    }

    let total: usize = graph
        .nodes()
        .map(|v| bfs_distances(graph, v).into_values().sum::<usize>())
        .sum();
    Some(total as f64 / (n * (n - 1)) as f64)
}
