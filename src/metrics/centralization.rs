// src/metrics/centralization.rs
//! Freeman centralization: how unevenly a centrality measure is spread,
//! relative to a maximally centralized star.
//!
//! Each formula divides by an n-dependent denominator, so every function
//! applies the n <= 2 guard before any arithmetic.

use std::collections::HashMap;

use crate::error::Result;
use crate::graph::collab::CollabGraph;
use crate::identity::DevId;
use crate::metrics::centrality;

/// Sum of (max - value) over all nodes, the shared numerator shape.
fn spread(scores: &HashMap<DevId, f64>) -> f64 {
    let max = scores.values().copied().fold(f64::MIN, f64::max);
    scores.values().map(|v| max - v).sum()
}

/// Degree centralization: sum(max - d) / ((n-1)(n-2)).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn degree(graph: &CollabGraph) -> f64 {
    let n = graph.node_count();
    if n <= 2 {
        return 0.0;
    }
    let degrees: HashMap<DevId, f64> = centrality::degrees(graph)
        .into_iter()
        .map(|(v, d)| (v, d as f64))
        .collect();
    spread(&degrees) / ((n - 1) as f64 * (n - 2) as f64)
}

/// Betweenness centralization: sum(max - b) / ((n-1)(n-2)/2).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness(graph: &CollabGraph) -> f64 {
    let n = graph.node_count();
    if n <= 2 {
        return 0.0;
    }
    let scores = centrality::betweenness(graph);
    spread(&scores) / ((n - 1) as f64 * (n - 2) as f64 / 2.0)
}

/// Closeness centralization: sum(max - c) / (n-2).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn closeness(graph: &CollabGraph) -> f64 {
    let n = graph.node_count();
    if n <= 2 {
        return 0.0;
    }
    let scores = centrality::closeness(graph);
    spread(&scores) / (n - 2) as f64
}

/// Eigenvector centralization: sum(max - e) / (n-2).
///
/// # Errors
/// Propagates [`crate::error::MinerError::NonConvergence`] from the
/// underlying power iteration.
#[allow(clippy::cast_precision_loss)]
pub fn eigenvector(graph: &CollabGraph) -> Result<f64> {
    let n = graph.node_count();
    if n <= 2 {
        return Ok(0.0);
    }
    let scores = centrality::eigenvector(graph)?;
    Ok(spread(&scores) / (n - 2) as f64)
}
