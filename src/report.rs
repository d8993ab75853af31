// src/report.rs
//! Tabular report: one row per period, fixed column set.

use std::io::Write;

use crate::error::Result;
use crate::metrics::MetricsRecord;

pub const COLUMNS: &[&str] = &[
    "period",
    "vertices",
    "edges",
    "degree_centralization",
    "betweenness_centralization",
    "closeness_centralization",
    "eigenvector_centralization",
    "global_clustcoeff",
    "assortativity",
    "diameter",
    "avg_degree",
    "modularity",
    "density",
    "avg_path_length",
];

/// One emitted row.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub period: u32,
    pub record: MetricsRecord,
}

/// Writes the accumulated rows as CSV. Callers supply one row per
/// period in period order; degenerate periods carry sentinel cells, so
/// every row has the full column set.
///
/// # Errors
/// Returns an error if the CSV writer fails.
pub fn write_report<W: Write>(rows: &[ReportRow], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(COLUMNS)?;

    for row in rows {
        let r = &row.record;
        writer.write_record(&[
            row.period.to_string(),
            r.vertices.to_string(),
            r.edges.to_string(),
            r.degree_centralization.to_string(),
            r.betweenness_centralization.to_string(),
            r.closeness_centralization.to_string(),
            r.eigenvector_centralization.to_string(),
            r.global_clustcoeff.to_string(),
            r.assortativity.to_string(),
            r.diameter.to_string(),
            r.avg_degree.to_string(),
            r.modularity.to_string(),
            r.density.to_string(),
            r.avg_path_length.to_string(),
        ])?;
    }

    writer.flush().map_err(crate::error::MinerError::from)?;
    Ok(())
}
