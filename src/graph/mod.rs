// src/graph/mod.rs
//! Collaboration graphs: structure, per-period construction, Pajek I/O.

pub mod builder;
pub mod collab;
pub mod pajek;

pub use builder::build_period_graphs;
pub use collab::CollabGraph;
