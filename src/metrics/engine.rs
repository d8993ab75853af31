// src/metrics/engine.rs
//! The fixed metrics battery computed per period graph.

use crate::graph::collab::CollabGraph;
use crate::identity::DevId;
use crate::metrics::{centralization, clustering, community, paths};

/// A metric cell: a number or one of the documented sentinels. A record
/// is never emitted with a hole; undefined values always carry their
/// sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Num(f64),
    /// Path metric on a disconnected graph.
    Unbounded,
    /// Metric undefined for this topology (zero degree variance).
    Undefined,
    /// Numeric routine failed for this metric only.
    Failed,
}

impl MetricValue {
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetricValue::Num(v) => Some(*v),
            _ => None,
        }
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricValue::Num(v) => write!(f, "{v}"),
            MetricValue::Unbounded => write!(f, "inf"),
            MetricValue::Undefined => write!(f, "NaN"),
            MetricValue::Failed => write!(f, "NA"),
        }
    }
}

/// One period's metrics. Field order matches the report columns.
#[derive(Debug, Clone)]
pub struct MetricsRecord {
    pub vertices: usize,
    pub edges: usize,
    pub degree_centralization: f64,
    pub betweenness_centralization: f64,
    pub closeness_centralization: f64,
    pub eigenvector_centralization: MetricValue,
    pub global_clustcoeff: f64,
    pub assortativity: MetricValue,
    pub diameter: MetricValue,
    pub avg_degree: f64,
    pub modularity: f64,
    pub density: f64,
    pub avg_path_length: MetricValue,
}

/// Computes the full battery for one graph. `partition` supplies a
/// precomputed community structure; without one the greedy fallback in
/// [`community::greedy_communities`] is used.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute(graph: &CollabGraph, partition: Option<&[Vec<DevId>]>) -> MetricsRecord {
    let n = graph.node_count();
    let m = graph.edge_count();

    let (degree_c, betweenness_c, closeness_c, eigenvector_c) = if n <= 2 {
        (0.0, 0.0, 0.0, MetricValue::Num(0.0))
    } else {
        let eigenvector_c = match centralization::eigenvector(graph) {
            Ok(value) => MetricValue::Num(value),
            // Non-convergence fails this metric alone, not the record.
            Err(_) => MetricValue::Failed,
        };
        (
            centralization::degree(graph),
            centralization::betweenness(graph),
            centralization::closeness(graph),
            eigenvector_c,
        )
    };

    // Connectivity is decided before any path metric is attempted.
    let connected = paths::is_connected(graph);
    let diameter = if connected {
        paths::diameter(graph)
            .map(|d| MetricValue::Num(d as f64))
            .unwrap_or(MetricValue::Unbounded)
    } else {
        MetricValue::Unbounded
    };
    let avg_path_length = if connected {
        paths::avg_path_length(graph)
            .map(MetricValue::Num)
            .unwrap_or(MetricValue::Unbounded)
    } else {
        MetricValue::Unbounded
    };

    let assortativity = clustering::assortativity(graph)
        .map(MetricValue::Num)
        .unwrap_or(MetricValue::Undefined);

    let modularity = match partition {
        Some(communities) => community::modularity(graph, communities),
        None => {
            let communities = community::greedy_communities(graph);
            community::modularity(graph, &communities)
        }
    };

    let avg_degree = if n == 0 { 0.0 } else { 2.0 * m as f64 / n as f64 };
    let density = if n > 1 {
        2.0 * m as f64 / (n as f64 * (n - 1) as f64)
    } else {
        0.0
    };

    MetricsRecord {
        vertices: n,
        edges: m,
        degree_centralization: degree_c,
        betweenness_centralization: betweenness_c,
        closeness_centralization: closeness_c,
        eigenvector_centralization: eigenvector_c,
        global_clustcoeff: clustering::transitivity(graph),
        assortativity,
        diameter,
        avg_degree,
        modularity,
        density,
        avg_path_length,
    }
}
