// src/bin/collabnet.rs
use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use collabnet_core::cli::{handlers, Cli, Commands};
use collabnet_core::config::Config;

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("collabnet.toml"));
    let mut config = Config::load(&config_path)?;
    config.verbose = cli.verbose;

    apply_overrides(&cli, &mut config);
    dispatch(&cli, &config)
}

fn dispatch(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Commands::Classify { .. } => handlers::run_classify(config),
        Commands::Build { .. } => handlers::run_build(config),
        Commands::Metrics { .. } => handlers::run_metrics(config),
        Commands::Run => handlers::run_all(config),
    }
}

fn apply_overrides(cli: &Cli, config: &mut Config) {
    match &cli.command {
        Commands::Classify { activity, out } => {
            if let Some(path) = activity {
                config.paths.activity = path.clone();
            }
            if let Some(path) = out {
                config.paths.assignments = path.clone();
            }
        }
        Commands::Build {
            participation,
            assignments,
            graph_dir,
        } => {
            if let Some(path) = participation {
                config.paths.participation = path.clone();
            }
            if let Some(path) = assignments {
                config.paths.assignments = path.clone();
            }
            if let Some(path) = graph_dir {
                config.paths.graph_dir = path.clone();
            }
        }
        Commands::Metrics { graph_dir, out } => {
            if let Some(path) = graph_dir {
                config.paths.graph_dir = path.clone();
            }
            if let Some(path) = out {
                config.paths.report = path.clone();
            }
        }
        Commands::Run => {}
    }
}
