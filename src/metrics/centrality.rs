// src/metrics/centrality.rs
//! Per-node centrality measures: degree, betweenness, closeness,
//! eigenvector.

use std::collections::{HashMap, VecDeque};

use crate::error::{MinerError, Result};
use crate::graph::collab::CollabGraph;
use crate::identity::DevId;
use crate::metrics::paths::bfs_distances;

const EIGENVECTOR_MAX_ITER: usize = 1000;
const EIGENVECTOR_TOL: f64 = 1e-6;

/// Unweighted degree per node.
#[must_use]
pub fn degrees(graph: &CollabGraph) -> HashMap<DevId, usize> {
    graph.nodes().map(|v| (v, graph.degree(v))).collect()
}

/// Normalized betweenness centrality (Brandes' accumulation).
///
/// Pair dependencies are accumulated per source, then scaled by
/// 1/((n-1)(n-2)): the undirected halving and the (n-1)(n-2)/2
/// normalization combined. Graphs with n <= 2 have all-zero scores.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness(graph: &CollabGraph) -> HashMap<DevId, f64> {
    let mut scores: HashMap<DevId, f64> = graph.nodes().map(|v| (v, 0.0)).collect();

    for s in graph.nodes() {
        accumulate_from(graph, s, &mut scores);
    }

    let n = graph.node_count();
    if n > 2 {
        let scale = 1.0 / ((n - 1) as f64 * (n - 2) as f64);
        for score in scores.values_mut() {
            *score *= scale;
        }
    }
    scores
}

/// One Brandes pass: shortest-path DAG from `s`, then dependency
/// accumulation in reverse finish order.
fn accumulate_from(graph: &CollabGraph, s: DevId, scores: &mut HashMap<DevId, f64>) {
    let mut stack = Vec::new();
    let mut preds: HashMap<DevId, Vec<DevId>> = HashMap::new();
    let mut sigma: HashMap<DevId, f64> = HashMap::new();
    let mut dist: HashMap<DevId, usize> = HashMap::new();

    sigma.insert(s, 1.0);
    dist.insert(s, 0);
    let mut queue = VecDeque::from([s]);

    while let Some(v) = queue.pop_front() {
        stack.push(v);
        let dv = dist[&v];
        let sv = sigma[&v];
        for w in graph.neighbors(v) {
            if !dist.contains_key(&w) {
                dist.insert(w, dv + 1);
                queue.push_back(w);
            }
            if dist[&w] == dv + 1 {
                *sigma.entry(w).or_insert(0.0) += sv;
                preds.entry(w).or_default().push(v);
            }
        }
    }

    let mut delta: HashMap<DevId, f64> = HashMap::new();
    while let Some(w) = stack.pop() {
        let dw = delta.get(&w).copied().unwrap_or(0.0);
        if let Some(parents) = preds.get(&w) {
            for &v in parents {
                let share = sigma[&v] / sigma[&w] * (1.0 + dw);
                *delta.entry(v).or_insert(0.0) += share;
            }
        }
        if w != s {
            *scores.entry(w).or_insert(0.0) += dw;
        }
    }
}

/// Closeness centrality with the per-component correction: the inverse
/// mean distance to reachable nodes, scaled by the fraction of the
/// graph that is reachable.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn closeness(graph: &CollabGraph) -> HashMap<DevId, f64> {
    let n = graph.node_count();
    graph
        .nodes()
        .map(|v| {
            let dist = bfs_distances(graph, v);
            let total: usize = dist.values().sum();
            let reachable = dist.len();
            let score = if total > 0 && n > 1 {
                let inverse_mean = (reachable - 1) as f64 / total as f64;
                inverse_mean * ((reachable - 1) as f64 / (n - 1) as f64)
            } else {
                0.0
            };
            (v, score)
        })
        .collect()
}

/// Eigenvector centrality by power iteration on A + I, normalized to
/// unit Euclidean length.
///
/// # Errors
/// Returns [`MinerError::NonConvergence`] if the iteration has not
/// converged after 1000 rounds; callers downgrade that to a failed
/// value for the eigenvector metrics only.
#[allow(clippy::cast_precision_loss)]
pub fn eigenvector(graph: &CollabGraph) -> Result<HashMap<DevId, f64>> {
    let n = graph.node_count();
    if n == 0 {
        return Ok(HashMap::new());
    }

    let nodes: Vec<DevId> = graph.nodes().collect();
    let mut x: HashMap<DevId, f64> = nodes.iter().map(|&v| (v, 1.0 / n as f64)).collect();

    for _ in 0..EIGENVECTOR_MAX_ITER {
        let xlast = x.clone();
        // x = (A + I) * xlast; the identity term damps bipartite oscillation.
        for &v in &nodes {
            let contribution = xlast[&v];
            for w in graph.neighbors(v) {
                if let Some(slot) = x.get_mut(&w) {
                    *slot += contribution;
                }
            }
        }

        let norm = x.values().map(|s| s * s).sum::<f64>().sqrt();
        let norm = if norm > 0.0 { norm } else { 1.0 };
        for score in x.values_mut() {
            *score /= norm;
        }

        let drift: f64 = nodes.iter().map(|v| (x[v] - xlast[v]).abs()).sum();
        if drift < n as f64 * EIGENVECTOR_TOL {
            return Ok(x);
        }
    }
    Err(MinerError::NonConvergence(EIGENVECTOR_MAX_ITER))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn star() -> CollabGraph {
        // Node 1 at the center of a 4-node star.
        let mut g = CollabGraph::new();
        g.bump_edge(1, 2);
        g.bump_edge(1, 3);
        g.bump_edge(1, 4);
        g
    }

    fn p3() -> CollabGraph {
        let mut g = CollabGraph::new();
        g.bump_edge(1, 2);
        g.bump_edge(2, 3);
        g
    }

    #[test]
    fn degrees_of_a_star() {
        let d = degrees(&star());
        assert_eq!(d[&1], 3);
        assert_eq!(d[&2], 1);
    }

    #[test]
    fn betweenness_peaks_at_path_center() {
        let b = betweenness(&p3());
        // Center carries the single shortest path 1-3: 1/((n-1)(n-2)) = 1.
        assert!((b[&2] - 1.0).abs() < 1e-12);
        assert!(b[&1].abs() < 1e-12);
        assert!(b[&3].abs() < 1e-12);
    }

    #[test]
    fn betweenness_of_star_center_is_one() {
        let b = betweenness(&star());
        assert!((b[&1] - 1.0).abs() < 1e-12);
        assert!(b[&2].abs() < 1e-12);
    }

    #[test]
    fn closeness_on_p3() {
        let c = closeness(&p3());
        assert!((c[&2] - 1.0).abs() < 1e-12);
        assert!((c[&1] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn closeness_scales_down_across_components() {
        let mut g = p3();
        g.bump_edge(10, 11);
        let c = closeness(&g);
        // Node 10 reaches one node at distance 1 out of 4 others.
        assert!((c[&10] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn eigenvector_peaks_at_star_center() {
        let e = eigenvector(&star()).unwrap();
        assert!(e[&1] > e[&2]);
        assert!((e[&2] - e[&3]).abs() < 1e-6);
        let norm: f64 = e.values().map(|s| s * s).sum();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn eigenvector_of_empty_graph_is_empty() {
        assert!(eigenvector(&CollabGraph::new()).unwrap().is_empty());
    }
}
