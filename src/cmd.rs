//! Command implementations for the CLI interface.
//!
//! Each handler loads its input, hands it to exactly one renderer and writes the
//! result to stdout, to a fresh file, or into the output file's managed region.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;
use clap_complete::{generate, Shell};
use tracing::info;

use crate::batch::{BatchConfig, ProjectJob};
use crate::db::{load_board, Database};
use crate::embed::{merge_into_file, EmbedTag};
use crate::error::Result;
use crate::kanban::{render_kanban, KanbanOptions, STATUS_FIELD};
use crate::lists::{render_bug_list, render_epic_list, write_epic_stories};
use crate::pert::{render_pert, PertOptions};
use crate::table::render_table;
use crate::wbs::{render_wbs, WbsOptions};

/// Output path meaning standard output.
pub const STDOUT: &str = "-";

#[derive(Subcommand)]
pub enum Commands {
    /// Render the work-breakdown outline as PlantUML.
    Wbs {
        /// Mark tasks deeper than this level as collapsed (0 = never).
        #[arg(long, default_value_t = 0)]
        floor: usize,
    },

    /// Render the PERT dependency graph as PlantUML.
    Pert {
        /// Minimum WBS level included in the chart.
        #[arg(short, long, default_value_t = 3)]
        level: usize,
        /// Keep housekeeping tasks (ids starting with 0.99).
        #[arg(long)]
        keep_reserved: bool,
        /// Include tasks that have no status.
        #[arg(long)]
        allow_blank_status: bool,
    },

    /// Render the task list as a Markdown table.
    Table,

    /// Render a kanban board as a Markdown table.
    Kanban {
        /// Field whose values become the board columns.
        #[arg(short, long, default_value = STATUS_FIELD)]
        column: String,
    },

    /// Render a Markdown table of tasks labelled bug.
    Bugs,

    /// Render a checklist of epics.
    Epics,

    /// Write one Markdown story page per epic.
    Stories {
        /// Existing directory to write the stories into.
        #[arg(short, long)]
        dir: PathBuf,
    },

    /// Regenerate every chart listed in a YAML config.
    Batch {
        /// Path to the batch config.
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Generate shell completion scripts.
    Completions {
        shell: Shell,
    },
}

/// Input, output and filtering shared by every rendering command.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: String,
    pub output: String,
    pub embed: bool,
    pub active_only: bool,
    pub filter: Option<String>,
}

/// Dispatch a parsed command.
pub fn run(command: Commands, opts: &RunOptions) -> Result<()> {
    match command {
        Commands::Wbs { floor } => cmd_wbs(opts, floor),
        Commands::Pert { level, keep_reserved, allow_blank_status } => {
            let pert = PertOptions {
                level,
                active_only: opts.active_only,
                skip_reserved: !keep_reserved,
                require_status: !allow_blank_status,
            };
            cmd_pert(opts, pert)
        }
        Commands::Table => cmd_table(opts),
        Commands::Kanban { column } => cmd_kanban(opts, &column),
        Commands::Bugs => cmd_bugs(opts),
        Commands::Epics => cmd_epics(opts),
        Commands::Stories { dir } => cmd_stories(opts, &dir),
        Commands::Batch { config } => cmd_batch(&config),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

pub fn cmd_wbs(opts: &RunOptions, floor: usize) -> Result<()> {
    let db = Database::load(&opts.input)?;
    let wbs = WbsOptions { floor, active_only: opts.active_only };
    write_artifact(opts, EmbedTag::Wbs, &render_wbs(&db.tasks, wbs))
}

pub fn cmd_pert(opts: &RunOptions, pert: PertOptions) -> Result<()> {
    let db = Database::load(&opts.input)?;
    write_artifact(opts, EmbedTag::Pert, &render_pert(&db.tasks, pert))
}

pub fn cmd_table(opts: &RunOptions) -> Result<()> {
    let db = Database::load(&opts.input)?;
    let table = render_table(&db.tasks, opts.active_only, opts.filter.as_deref());
    write_artifact(opts, EmbedTag::WbsTable, &table)
}

pub fn cmd_kanban(opts: &RunOptions, column: &str) -> Result<()> {
    let board = load_board(&opts.input, column)?;
    let kanban = KanbanOptions {
        active_only: opts.active_only,
        filter: opts.filter.clone(),
    };
    write_artifact(opts, EmbedTag::Kanban, &render_kanban(&board, &kanban))
}

pub fn cmd_bugs(opts: &RunOptions) -> Result<()> {
    let db = Database::load(&opts.input)?;
    write_artifact(opts, EmbedTag::Bug, &render_bug_list(&db.tasks, opts.active_only))
}

pub fn cmd_epics(opts: &RunOptions) -> Result<()> {
    let db = Database::load(&opts.input)?;
    write_artifact(opts, EmbedTag::Epic, &render_epic_list(&db.tasks))
}

pub fn cmd_stories(opts: &RunOptions, dir: &Path) -> Result<()> {
    let db = Database::load(&opts.input)?;
    write_epic_stories(&db.tasks, dir)?;
    Ok(())
}

/// Run every job in the config, embedding into each job's output. Stops at the
/// first failure.
pub fn cmd_batch(config: &Path) -> Result<()> {
    let config = BatchConfig::load(config)?;
    for job in &config.projects {
        info!(name = %job.name, output = %job.output, "regenerating charts");
        run_job(job)?;
    }
    Ok(())
}

fn run_job(job: &ProjectJob) -> Result<()> {
    let opts = RunOptions {
        input: job.input.clone(),
        output: job.output.clone(),
        embed: true,
        active_only: job.active_only,
        filter: job.filter.clone().filter(|f| !f.is_empty()),
    };
    if job.pert {
        let pert = PertOptions {
            level: job.level(),
            active_only: job.active_only,
            ..PertOptions::default()
        };
        cmd_pert(&opts, pert)?;
    }
    if job.wbs {
        cmd_wbs(&opts, 0)?;
    }
    if job.wbs_table {
        cmd_table(&opts)?;
    }
    if job.kanban {
        cmd_kanban(&opts, job.column())?;
    }
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut io::stdout());
}

/// Write a rendered artifact to its destination.
///
/// Embedding only applies to a named output file; stdout always receives the
/// plain artifact.
pub fn write_artifact(opts: &RunOptions, tag: EmbedTag, rendered: &str) -> Result<()> {
    if opts.output == STDOUT {
        let mut stdout = io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    if opts.embed {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&opts.output)?;
        merge_into_file(&mut file, &tag.wrap(rendered), tag.name())?;
        info!(output = %opts.output, tag = tag.name(), "embedded chart");
    } else {
        fs::write(&opts.output, rendered)?;
        info!(output = %opts.output, "wrote chart");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TASKS: &str = "Task,Title,Parents,Duration,Status\n\
1,Plan,,1,Done\n\
1.1,Design,,2,In Progress\n\
1.1.1,Wireframes,,1,Waiting\n\
1.1.2,Review,1.1.1,1,Blocked\n";

    fn opts(dir: &Path, output: &str, embed: bool) -> RunOptions {
        let input = dir.join("tasks.csv");
        fs::write(&input, TASKS).unwrap();
        RunOptions {
            input: input.to_string_lossy().into_owned(),
            output: dir.join(output).to_string_lossy().into_owned(),
            embed,
            active_only: false,
            filter: None,
        }
    }

    #[test]
    fn test_wbs_writes_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let opts = opts(dir.path(), "wbs.puml", false);
        cmd_wbs(&opts, 0).unwrap();
        let out = fs::read_to_string(&opts.output).unwrap();
        assert!(out.starts_with("@startwbs\n* Project\n**[#Thistle] 1: Plan\n"));
        assert!(!out.contains("```plantuml"));
    }

    #[test]
    fn test_embed_preserves_prose_and_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let opts = opts(dir.path(), "README.md", true);
        fs::write(&opts.output, "# Project\n\nHand-written intro.\n").unwrap();

        cmd_pert(&opts, PertOptions::default()).unwrap();
        let first = fs::read_to_string(&opts.output).unwrap();
        cmd_pert(&opts, PertOptions::default()).unwrap();
        let second = fs::read_to_string(&opts.output).unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with("# Project\n\nHand-written intro.\n\n\n<!-- pert:embed:start -->\n\n```plantuml\n@startuml PERT\n"));
        assert!(first.contains("Start --> 1.1.1\n"));
        assert!(first.contains("1.1.1 --> 1.1.2\n"));
        assert!(first.contains("1.1.2 --> Finish\n"));
        assert!(!first.contains("1.1.1 --> Finish"));
    }

    #[test]
    fn test_embed_creates_missing_output() {
        let dir = tempfile::tempdir().unwrap();
        let opts = opts(dir.path(), "new.md", true);
        cmd_table(&opts).unwrap();
        let out = fs::read_to_string(&opts.output).unwrap();
        assert!(out.starts_with("<!-- wbsTable:embed:start -->\n\n| WBS | Status |"));
        assert!(out.contains("| 1.1.2 | Blocked | Review | 1.1.1 | 1.00 |"));
    }

    #[test]
    fn test_batch_embeds_each_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let opts = opts(dir.path(), "plan.md", true);
        let config = dir.path().join("charts.yaml");
        fs::write(
            &config,
            format!(
                "projects:\n  - name: Demo\n    input: {}\n    output: {}\n    level: 2\n    wbs: true\n    wbs_table: true\n    pert: true\n    kanban: true\n",
                opts.input, opts.output
            ),
        )
        .unwrap();

        cmd_batch(&config).unwrap();
        cmd_batch(&config).unwrap();
        let out = fs::read_to_string(&opts.output).unwrap();
        for tag in ["pert", "wbs", "wbsTable", "kanban"] {
            assert_eq!(out.matches(&format!("<!-- {}:embed:start -->", tag)).count(), 1, "{}", tag);
        }
        assert!(out.contains("| Done | In Progress | Waiting | Blocked |"));
    }

    #[test]
    fn test_stories_require_existing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let opts = opts(dir.path(), "unused.md", false);
        assert!(cmd_stories(&opts, &dir.path().join("missing")).is_err());
    }
}
