// src/cli/handlers.rs
//! Stage drivers behind the CLI subcommands. Each stage reads and
//! writes flat files so any stage can be re-run on its own.

use std::fs::{self, File};
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use rayon::prelude::*;

use crate::aggregate;
use crate::config::Config;
use crate::error::MinerError;
use crate::graph::{build_period_graphs, pajek};
use crate::identity::DevRegistry;
use crate::ingest;
use crate::metrics;
use crate::periods::PeriodWindows;
use crate::report::{self, ReportRow};

/// Classify stage: activity intervals -> period assignments CSV.
///
/// # Errors
/// Fails on unreadable input, an invalid study span, or output I/O.
pub fn run_classify(config: &Config) -> Result<()> {
    let (start, end) = config.span()?;
    let windows = PeriodWindows::split(start, end, config.study.periods)?;

    let activity_path = &config.paths.activity;
    let file = open(activity_path)?;
    let (activities, stats) = ingest::read_activity(file, &config.study.date_format)?;

    let mut assigned = 0usize;
    let mut unresolved = 0usize;
    let mut writer = csv::Writer::from_path(&config.paths.assignments)
        .with_context(|| format!("writing {}", config.paths.assignments.display()))?;
    writer.write_record(["bug_id", "period"])?;

    for activity in &activities {
        match windows.classify(activity.first, activity.last) {
            Some(period) => {
                assigned += 1;
                writer.write_record([activity.bug_id.as_str(), period.to_string().as_str()])?;
            }
            // Unresolved assignments are excluded, never defaulted.
            None => unresolved += 1,
        }
    }
    writer.flush()?;

    println!(
        "🗓  Classified {} bugs into {} periods ({} unresolved, {} malformed rows skipped).",
        assigned.to_string().cyan(),
        config.study.periods,
        unresolved,
        stats.skipped
    );
    if config.verbose {
        for period in 1..=config.study.periods {
            if let Some((ws, we)) = windows.bounds(period) {
                println!("   period {period}: {ws} → {we}");
            }
        }
    }
    Ok(())
}

/// Build stage: participation + assignments -> per-period Pajek files
/// plus the identity-map sidecar.
///
/// # Errors
/// Fails on unreadable input or output I/O.
pub fn run_build(config: &Config) -> Result<()> {
    let (records, part_stats) = ingest::read_participation(open(&config.paths.participation)?)?;
    let (assignments, assign_stats) = ingest::read_assignments(open(&config.paths.assignments)?)?;

    let mut registry = DevRegistry::new();
    let participants = aggregate::collect_participants(&records, &mut registry);
    let periods = aggregate::collect_assignments(&assignments);
    let graphs = build_period_graphs(&participants, &periods, config.study.periods);

    fs::create_dir_all(&config.paths.graph_dir)
        .map_err(|e| MinerError::io(e, &config.paths.graph_dir))?;
    for (&period, graph) in &graphs {
        let path = config.graph_path(period);
        let file = File::create(&path).map_err(|e| MinerError::io(e, &path))?;
        pajek::write(graph, file)?;
        if config.verbose {
            println!(
                "   period {period}: {} developers, {} edges → {}",
                graph.node_count(),
                graph.edge_count(),
                path.display()
            );
        }
    }
    registry.save(&config.paths.identity_map)?;

    let skipped = part_stats.skipped + assign_stats.skipped;
    println!(
        "🕸  Built {} period graphs from {} bugs and {} developers ({} malformed rows skipped).",
        graphs.len().to_string().cyan(),
        participants.len(),
        registry.len(),
        skipped
    );
    Ok(())
}

/// Metrics stage: persisted graphs -> one report CSV. Periods are
/// independent, so they are computed in parallel.
///
/// # Errors
/// Fails if any period's graph is missing or corrupt (persistence
/// round-trip failures are fatal for that stage), or on output I/O.
pub fn run_metrics(config: &Config) -> Result<()> {
    let mut rows: Vec<ReportRow> = (1..=config.study.periods)
        .into_par_iter()
        .map(|period| -> Result<ReportRow> {
            let path = config.graph_path(period);
            let file = open(&path)?;
            let graph = pajek::read(file)
                .with_context(|| format!("reading {}", path.display()))?;
            Ok(ReportRow {
                period,
                record: metrics::compute(&graph, None),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    rows.sort_by_key(|row| row.period);

    let out = File::create(&config.paths.report)
        .map_err(|e| MinerError::io(e, &config.paths.report))?;
    report::write_report(&rows, out)?;

    if config.verbose {
        for row in &rows {
            println!(
                "   period {}: n={} m={} density={}",
                row.period, row.record.vertices, row.record.edges, row.record.density
            );
        }
    }
    println!(
        "📈 Metrics for {} periods saved to {}.",
        rows.len().to_string().cyan(),
        config.paths.report.display().to_string().green()
    );
    Ok(())
}

/// Full pipeline: classify, build, metrics.
///
/// # Errors
/// Propagates the first failing stage.
pub fn run_all(config: &Config) -> Result<()> {
    run_classify(config)?;
    run_build(config)?;
    run_metrics(config)
}

fn open(path: &Path) -> Result<File, MinerError> {
    File::open(path).map_err(|e| MinerError::io(e, path))
}
