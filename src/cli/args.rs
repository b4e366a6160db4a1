//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Anchor and cross-link checker for static HTML documentation
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (searched upward from the current directory)
    #[arg(short = 'C', long, default_value = "anchorlint.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Corpus root directory (overrides `[corpus] root`)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Check every cross-link and anchor in the corpus
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        args: CheckArgs,
    },

    /// Print the summary index built from a page's anchored sections
    #[command(visible_alias = "i")]
    Index {
        #[command(flatten)]
        args: IndexArgs,
    },

    /// Dump pages, titles and anchors as JSON
    #[command(visible_alias = "a")]
    Anchors {
        #[command(flatten)]
        args: AnchorsArgs,
    },
}

/// Check command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Pages or directories whose links are checked. If omitted, checks the
    /// whole corpus. Anchors are always collected from every page.
    /// Use `-` to read paths from stdin.
    #[arg(value_name = "PATH", value_hint = clap::ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Validate #fragments against the target page's anchors
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub fragments: Option<bool>,

    /// Report anchored sections missing from a page's index block
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub index: Option<bool>,

    /// Treat defects as warnings instead of errors
    #[arg(long, short = 'w')]
    pub warn_only: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per defect
    Text,
    /// The full report as JSON
    Json,
}

/// Index command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct IndexArgs {
    /// Pages to build the index for. Use `-` to read paths from stdin.
    #[arg(required = true, value_name = "PAGE", value_hint = clap::ValueHint::FilePath)]
    pub pages: Vec<PathBuf>,

    /// Render the index as an HTML list
    #[arg(long)]
    pub html: bool,
}

/// Anchors command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct AnchorsArgs {
    /// Pages or directories to dump (omit for the whole corpus).
    /// Use `-` to read paths from stdin.
    #[arg(value_name = "PATH", value_hint = clap::ValueHint::AnyPath)]
    pub pages: Vec<PathBuf>,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_flags() {
        let cli = Cli::try_parse_from([
            "anchorlint",
            "check",
            "tips.html",
            "--fragments=false",
            "-i",
            "--format",
            "json",
        ])
        .unwrap();
        let Commands::Check { args } = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.paths, vec![PathBuf::from("tips.html")]);
        assert_eq!(args.fragments, Some(false));
        assert_eq!(args.index, Some(true));
        assert!(!args.warn_only);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_check_defaults_leave_config_alone() {
        let cli = Cli::try_parse_from(["anchorlint", "c"]).unwrap();
        let Commands::Check { args } = cli.command else {
            panic!("expected check");
        };
        assert_eq!(args.fragments, None);
        assert_eq!(args.index, None);
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(cli.config, PathBuf::from("anchorlint.toml"));
    }

    #[test]
    fn test_index_requires_page() {
        assert!(Cli::try_parse_from(["anchorlint", "index"]).is_err());
        let cli = Cli::try_parse_from(["anchorlint", "-v", "index", "a.html", "--html"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Index { args } if args.html));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from(["anchorlint", "check", "--verbose"]).unwrap();
        assert!(cli.verbose);
        assert!(Cli::try_parse_from(["anchorlint", "-V"]).is_err());
    }
}
