use clap::Parser;

use crate::cmd::{Commands, RunOptions};
use crate::db::STDIN;

/// Chart generator for hierarchical task lists.
/// Reads CSV from --input (or stdin) and writes to --output (or stdout).
#[derive(Parser)]
#[command(name = "wbspert", version, about = "Render WBS, PERT and kanban charts from task lists")]
pub struct Cli {
    /// Input CSV (or board JSON for kanban), or - for stdin.
    #[arg(short, long, global = true, default_value = STDIN)]
    pub input: String,

    /// Output file, or - for stdout.
    #[arg(short, long, global = true, default_value = "-")]
    pub output: String,

    /// Embed into the output file's managed region instead of overwriting it.
    #[arg(short, long, global = true)]
    pub embed: bool,

    /// Only show incomplete tasks.
    #[arg(short, long, global = true)]
    pub active_only: bool,

    /// Filter the table and kanban by a label or Type value.
    #[arg(short, long, global = true)]
    pub filter: Option<String>,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Options shared by every rendering command.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            input: self.input.clone(),
            output: self.output.clone(),
            embed: self.embed,
            active_only: self.active_only,
            filter: self.filter.clone().filter(|f| !f.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["wbspert", "pert", "-l", "2", "-i", "tasks.csv", "-o", "README.md", "-e", "-a"]);
        let opts = cli.run_options();
        assert_eq!(opts.input, "tasks.csv");
        assert_eq!(opts.output, "README.md");
        assert!(opts.embed && opts.active_only);
        assert!(matches!(cli.command, Commands::Pert { level: 2, .. }));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["wbspert", "kanban"]);
        let opts = cli.run_options();
        assert_eq!(opts.input, "-");
        assert_eq!(opts.output, "-");
        assert!(opts.filter.is_none());
        assert!(matches!(cli.command, Commands::Kanban { ref column } if column == "Status"));
    }
}
