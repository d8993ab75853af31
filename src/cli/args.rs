use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "collabnet", version, about = "Bug-tracker collaboration-network miner")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Configuration file (defaults to collabnet.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Assign each bug to a study period from its activity interval
    Classify {
        /// Activity CSV (bug_id, first_comment_date, last_comment_date)
        #[arg(long, value_name = "FILE")]
        activity: Option<PathBuf>,
        /// Output assignments CSV (bug_id, period)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Build one collaboration graph per period and persist them
    Build {
        /// Participation CSV (bug_id, comment_author)
        #[arg(long, value_name = "FILE")]
        participation: Option<PathBuf>,
        /// Assignments CSV (bug_id, period)
        #[arg(long, value_name = "FILE")]
        assignments: Option<PathBuf>,
        /// Directory receiving the per-period Pajek files
        #[arg(long, value_name = "DIR")]
        graph_dir: Option<PathBuf>,
    },
    /// Compute the metrics battery over persisted graphs
    Metrics {
        /// Directory holding the per-period Pajek files
        #[arg(long, value_name = "DIR")]
        graph_dir: Option<PathBuf>,
        /// Output report CSV
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Run classify, build, and metrics back to back
    Run,
}
