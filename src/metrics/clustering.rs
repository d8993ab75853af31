// src/metrics/clustering.rs
//! Global transitivity and degree assortativity.

use crate::graph::collab::CollabGraph;
use crate::identity::DevId;

/// Global clustering coefficient: closed triplets over all triplets.
/// Returns 0 when the graph has no triplets at all.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn transitivity(graph: &CollabGraph) -> f64 {
    let mut closed = 0usize;
    let mut triplets = 0usize;

    for v in graph.nodes() {
        let nbrs: Vec<DevId> = graph.neighbors(v).collect();
        let d = nbrs.len();
        triplets += d * d.saturating_sub(1) / 2;

        for (i, &x) in nbrs.iter().enumerate() {
            for &y in &nbrs[i + 1..] {
                if graph.has_edge(x, y) {
                    closed += 1;
                }
            }
        }
    }

    if triplets == 0 {
        return 0.0;
    }
    closed as f64 / triplets as f64
}

/// Degree assortativity: the Pearson correlation of endpoint degrees
/// over every edge, counted in both orientations. `None` when a degree
/// variance is zero (regular graphs), where the coefficient is
/// undefined.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn assortativity(graph: &CollabGraph) -> Option<f64> {
    let mut xs: Vec<f64> = Vec::new();
    let mut ys: Vec<f64> = Vec::new();
    for (u, v, _) in graph.edges() {
        let du = graph.degree(u) as f64;
        let dv = graph.degree(v) as f64;
        xs.push(du);
        ys.push(dv);
        xs.push(dv);
        ys.push(du);
    }
    if xs.is_empty() {
        return None;
    }

    let count = xs.len() as f64;
    let mean_x: f64 = xs.iter().sum::<f64>() / count;
    let mean_y: f64 = ys.iter().sum::<f64>() / count;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(&ys) {
        cov += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x).powi(2);
        var_y += (y - mean_y).powi(2);
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some(cov / (var_x * var_y).sqrt())
}
