//! # wbspert - charts from hierarchical task lists
//!
//! Turns a flat list of hierarchically-numbered tasks into:
//!
//! - **WBS**: an indented PlantUML work-breakdown outline
//! - **PERT**: a PlantUML dependency graph bracketed by `Start` and `Finish` anchors
//! - **Kanban**: a Markdown table pivoted from board columns
//! - **Tables and lists**: a Markdown task table, a bug table and an epic checklist
//!
//! Any artifact can be embedded into an existing document between
//! `<!-- tag:embed:start -->` / `<!-- tag:embed:end -->` markers, so regenerating
//! replaces only its own region and leaves surrounding prose untouched.
//!
//! ## Quick Start
//!
//! ```bash
//! # Outline to stdout
//! wbspert wbs -i tasks.csv
//!
//! # PERT chart from level 2 down, embedded into the README
//! wbspert pert -l 2 -i tasks.csv -o README.md -e
//!
//! # Active kanban cards grouped by sprint
//! wbspert kanban -c Sprint -a -i tasks.csv
//!
//! # Regenerate every configured document
//! wbspert batch -c charts.yaml
//! ```
//!
//! Set `RUST_LOG` (or pass `--verbose`) for diagnostics on stderr.

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod batch;
pub mod cli;
pub mod cmd;
pub mod db;
pub mod embed;
pub mod error;
pub mod fields;
pub mod hierarchy;
pub mod kanban;
pub mod lists;
pub mod pert;
pub mod table;
pub mod task;
pub mod wbs;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("wbspert=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let opts = cli.run_options();
    if let Err(e) = cmd::run(cli.command, &opts) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
