//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Reelcheck - Validate, clean and load movie rating datasets.
#[derive(Debug, Parser)]
#[command(name = "reelcheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "REELCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (counts only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a single input file and report what would be kept
    Check(CheckArgs),

    /// Validate the movie file and write the cleaned copy
    Export(ExportArgs),

    /// Validate every input file and load them into SQLite
    Load(LoadArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Dataset kinds accepted by `check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DatasetArg {
    /// Movie file (MovieID, Title, Genres)
    Movies,
    /// User file (UserID, Gender, Age, CAP, Work)
    Users,
    /// Rating file (UserID, MovieID, Rating, Timestamp)
    Ratings,
}

impl DatasetArg {
    /// Dataset name used in output
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetArg::Movies => "movies",
            DatasetArg::Users => "users",
            DatasetArg::Ratings => "ratings",
        }
    }
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Which dataset the file holds
    #[arg(value_enum)]
    pub dataset: DatasetArg,

    /// File to validate
    pub path: PathBuf,

    /// Postal code reference file (users only)
    #[arg(long)]
    pub caps: Option<PathBuf>,

    /// List every skip and repair
    #[arg(short, long)]
    pub diagnostics: bool,
}

/// Arguments for the export command.
#[derive(Debug, Parser)]
pub struct ExportArgs {
    /// Movie file to clean
    #[arg(short, long)]
    pub movies: Option<PathBuf>,

    /// Destination of the cleaned file (overwritten)
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

/// Arguments for the load command.
#[derive(Debug, Parser)]
pub struct LoadArgs {
    /// SQLite database file
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// Movie file
    #[arg(long)]
    pub movies: Option<PathBuf>,

    /// User file
    #[arg(long)]
    pub users: Option<PathBuf>,

    /// Rating file
    #[arg(long)]
    pub ratings: Option<PathBuf>,

    /// Postal code reference file
    #[arg(long)]
    pub caps: Option<PathBuf>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_check_command() {
        let cli = Cli::parse_from(["reelcheck", "check", "movies", "data/movies.csv"]);
        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.dataset, DatasetArg::Movies);
                assert_eq!(args.path, PathBuf::from("data/movies.csv"));
                assert!(!args.diagnostics);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "reelcheck",
            "load",
            "--database",
            "out.db",
            "--format",
            "json",
            "--no-color",
        ]);
        assert!(cli.no_color);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Load(args) => assert_eq!(args.database, Some(PathBuf::from("out.db"))),
            _ => panic!("Expected Load command"),
        }
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["reelcheck", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force: true }
            })
        ));
    }

    #[test]
    fn test_unknown_dataset_rejected() {
        assert!(Cli::try_parse_from(["reelcheck", "check", "actors", "a.csv"]).is_err());
    }

    #[test]
    fn test_format_conversion() {
        let format: OutputFormat = CliFormat::Quiet.into();
        assert_eq!(format, OutputFormat::Quiet);
    }
}
