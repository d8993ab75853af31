// tests/integration_pipeline.rs
//! End-to-end pipeline: classify → build → metrics over real files.

use std::fs;
use std::path::Path;

use collabnet_core::cli::handlers;
use collabnet_core::config::Config;
use collabnet_core::graph::pajek;
use collabnet_core::identity::DevRegistry;
use collabnet_core::report::COLUMNS;
use tempfile::TempDir;

/// Config with every path rooted in the temp dir and the default
/// reference study span (2012-03-18 → 2015-02-06, 5 periods).
fn temp_config(dir: &Path) -> Config {
    let mut config = Config::default();
    config.paths.participation = dir.join("participation.csv");
    config.paths.activity = dir.join("activity.csv");
    config.paths.assignments = dir.join("assignments.csv");
    config.paths.graph_dir = dir.join("graphs");
    config.paths.identity_map = dir.join("author_mapping.json");
    config.paths.report = dir.join("allmetrics.csv");
    config
}

fn write_inputs(config: &Config) {
    // Bugs 1-3 are active early in the span (period 1), bug 4 late
    // (period 5), bug 5 after the span end (unresolved).
    fs::write(
        &config.paths.activity,
        "\
bug_id,first_comment_date,last_comment_date
1,2012-04-01 00:00:00,2012-05-01 00:00:00
2,2012-04-10 00:00:00,2012-05-20 00:00:00
3,2012-06-01 00:00:00,2012-06-15 00:00:00
4,2014-12-01 00:00:00,2015-01-01 00:00:00
5,2020-01-01 00:00:00,2020-02-01 00:00:00
",
    )
    .unwrap();

    fs::write(
        &config.paths.participation,
        "\
bug_id,comment_author
1,alice
1,bob
2,alice
2,bob
3,alice
3,carol
4,dave
4,erin
5,zoe
5,yuri
",
    )
    .unwrap();
}

#[test]
fn pipeline_produces_graphs_identity_map_and_report() {
    let dir = TempDir::new().unwrap();
    let config = temp_config(dir.path());
    write_inputs(&config);

    handlers::run_classify(&config).unwrap();
    handlers::run_build(&config).unwrap();
    handlers::run_metrics(&config).unwrap();

    // Classification: bug 5 fell outside the span.
    let assignments = fs::read_to_string(&config.paths.assignments).unwrap();
    assert!(assignments.contains("1,1"));
    assert!(assignments.contains("4,5"));
    assert!(!assignments.contains("\n5,"));

    // Every period graph exists, empty or not.
    for period in 1..=5 {
        assert!(config.graph_path(period).exists(), "missing graph {period}");
    }

    // Period 1 holds the co-commenting structure of bugs 1-3.
    let registry = DevRegistry::load(&config.paths.identity_map).unwrap();
    let graph1 = pajek::read(fs::File::open(config.graph_path(1)).unwrap()).unwrap();
    let alice = registry.get("alice").unwrap();
    let bob = registry.get("bob").unwrap();
    let carol = registry.get("carol").unwrap();
    assert_eq!(graph1.node_count(), 3);
    assert_eq!(graph1.weight(alice, bob), Some(2));
    assert_eq!(graph1.weight(alice, carol), Some(1));
    assert!(!graph1.has_edge(bob, carol));

    // The report carries one row per period under the fixed header.
    let report = fs::read_to_string(&config.paths.report).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], COLUMNS.join(","));
    assert!(lines[1].starts_with("1,3,2,"));
    assert!(lines[5].starts_with("5,2,1,"));
    // Empty middle periods keep their sentinel cells.
    assert!(lines[2].starts_with("2,0,0,"));
    assert!(lines[2].contains("inf"));
    assert!(lines[2].contains("NaN"));
}

#[test]
fn metrics_stage_fails_on_corrupt_graph_file() {
    let dir = TempDir::new().unwrap();
    let config = temp_config(dir.path());
    write_inputs(&config);

    handlers::run_classify(&config).unwrap();
    handlers::run_build(&config).unwrap();

    // Persistence corruption is fatal for the metrics stage.
    fs::write(config.graph_path(2), "*Vertices 2\n1 \"1\"\n").unwrap();
    assert!(handlers::run_metrics(&config).is_err());
}

#[test]
fn metrics_stage_is_rerunnable_without_rebuild() {
    let dir = TempDir::new().unwrap();
    let config = temp_config(dir.path());
    write_inputs(&config);

    handlers::run_classify(&config).unwrap();
    handlers::run_build(&config).unwrap();
    handlers::run_metrics(&config).unwrap();
    let first = fs::read_to_string(&config.paths.report).unwrap();

    // Re-running metrics alone reproduces the report from the persisted
    // graphs, byte for byte.
    handlers::run_metrics(&config).unwrap();
    let second = fs::read_to_string(&config.paths.report).unwrap();
    assert_eq!(first, second);
}
