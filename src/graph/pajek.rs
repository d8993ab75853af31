// src/graph/pajek.rs
//! Pajek `.net` serialization for collaboration graphs.
//!
//! The build and metrics stages only meet through these files, so the
//! format must round-trip node ids and integer weights exactly. Vertex
//! labels carry the surrogate developer id; the human-readable handle
//! mapping lives in the identity-map JSON sidecar.

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read, Write};

use crate::error::{MinerError, Result};
use crate::graph::collab::CollabGraph;
use crate::identity::DevId;

/// Writes `graph` in Pajek format: a `*Vertices` section with 1-based
/// indices and quoted id labels, then a `*Edges` section of
/// `u v weight` triples.
///
/// # Errors
/// Returns an error if the writer fails.
pub fn write<W: Write>(graph: &CollabGraph, mut out: W) -> Result<()> {
    let nodes: Vec<DevId> = graph.nodes().collect();
    let index: HashMap<DevId, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, &v)| (v, i + 1))
        .collect();

    writeln!(out, "*Vertices {}", nodes.len())?;
    for (i, v) in nodes.iter().enumerate() {
        writeln!(out, "{} \"{v}\"", i + 1)?;
    }

    writeln!(out, "*Edges")?;
    for (u, v, w) in graph.edges() {
        writeln!(out, "{} {} {w}", index[&u], index[&v])?;
    }

    Ok(())
}

/// Reads a graph written by [`write`].
///
/// # Errors
/// Returns a [`MinerError::PajekParse`] for any malformed line, unknown
/// vertex reference, non-integer weight, or vertex-count mismatch.
/// Persistence corruption is fatal for the affected period.
pub fn read<R: Read>(input: R) -> Result<CollabGraph> {
    let reader = BufReader::new(input);
    let mut graph = CollabGraph::new();
    let mut labels: HashMap<usize, DevId> = HashMap::new();
    let mut expected_vertices = 0usize;
    let mut section = Section::Preamble;

    for (lineno, line) in reader.lines().enumerate() {
        let lineno = lineno + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = strip_header(line, "*vertices") {
            expected_vertices = rest.trim().parse().map_err(|_| parse_err(
                lineno,
                "vertex count is not an integer",
            ))?;
            section = Section::Vertices;
            continue;
        }
        if strip_header(line, "*edges").is_some() || strip_header(line, "*arcs").is_some() {
            section = Section::Edges;
            continue;
        }

        match section {
            Section::Preamble => {
                return Err(parse_err(lineno, "data before *Vertices header"));
            }
            Section::Vertices => read_vertex(line, lineno, &mut graph, &mut labels)?,
            Section::Edges => read_edge(line, lineno, &mut graph, &labels)?,
        }
    }

    if labels.len() != expected_vertices {
        return Err(MinerError::PajekParse {
            line: 0,
            reason: format!(
                "header declares {expected_vertices} vertices, found {}",
                labels.len()
            ),
        });
    }

    Ok(graph)
}

enum Section {
    Preamble,
    Vertices,
    Edges,
}

fn read_vertex(
    line: &str,
    lineno: usize,
    graph: &mut CollabGraph,
    labels: &mut HashMap<usize, DevId>,
) -> Result<()> {
    let mut parts = line.splitn(2, char::is_whitespace);
    let index: usize = parts
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| parse_err(lineno, "vertex index is not an integer"))?;
    let label = parts
        .next()
        .map(|t| t.trim().trim_matches('"'))
        .filter(|t| !t.is_empty())
        .ok_or_else(|| parse_err(lineno, "vertex has no label"))?;
    let id: DevId = label
        .parse()
        .map_err(|_| parse_err(lineno, "vertex label is not a developer id"))?;

    if labels.insert(index, id).is_some() {
        return Err(parse_err(lineno, "duplicate vertex index"));
    }
    graph.add_node(id);
    Ok(())
}

fn read_edge(
    line: &str,
    lineno: usize,
    graph: &mut CollabGraph,
    labels: &HashMap<usize, DevId>,
) -> Result<()> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 3 {
        return Err(parse_err(lineno, "edge line is not 'u v weight'"));
    }

    let endpoint = |t: &str| -> Result<DevId> {
        let idx: usize = t
            .parse()
            .map_err(|_| parse_err(lineno, "edge endpoint is not an integer"))?;
        labels
            .get(&idx)
            .copied()
            .ok_or_else(|| parse_err(lineno, "edge references an undeclared vertex"))
    };

    let u = endpoint(fields[0])?;
    let v = endpoint(fields[1])?;
    let weight: u64 = fields[2]
        .parse()
        .map_err(|_| parse_err(lineno, "edge weight is not an integer"))?;
    if weight == 0 {
        return Err(parse_err(lineno, "edge weight must be at least 1"));
    }
    if u == v {
        return Err(parse_err(lineno, "self-edge"));
    }

    graph.set_edge(u, v, weight);
    Ok(())
}

fn strip_header<'l>(line: &'l str, header: &str) -> Option<&'l str> {
    let lower = line.to_ascii_lowercase();
    lower
        .starts_with(header)
        .then(|| &line[header.len().min(line.len())..])
}

fn parse_err(line: usize, reason: &str) -> MinerError {
    MinerError::PajekParse {
        line,
        reason: reason.to_string(),
    }
}
