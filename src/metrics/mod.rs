// src/metrics/mod.rs
//! Social-network-analysis metrics over collaboration graphs.
//!
//! Every metric treats the graph as unweighted; weights matter only to
//! persistence. Degenerate graphs (n <= 2, disconnected, zero degree
//! variance) get explicit fallback values instead of arithmetic errors.

pub mod centrality;
pub mod centralization;
pub mod clustering;
pub mod community;
pub mod engine;
pub mod paths;

pub use engine::{compute, MetricValue, MetricsRecord};
