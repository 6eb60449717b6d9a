//! # Command-Line Interface Module
//!
//! Clap derive definitions for the `dance-scheduler` binary.
//!
//! ## Commands
//!
//! - `generate`: Build a weekly schedule from a CSV song sheet
//! - `completion`: Print a shell completion script
//!
//! ## Examples
//!
//! ```bash
//! dance-scheduler generate songs.csv
//! dance-scheduler generate songs.csv --days 5 --minutes 45 --seed 42
//! dance-scheduler generate songs.csv --format json --output week.json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Output format for a generated schedule
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Readable weekly plan with summary
    #[default]
    Text,
    /// Pretty-printed JSON report
    Json,
}

/// Main application arguments structure.
#[derive(Parser)]
#[command(name = "dance-scheduler")]
#[command(about = "Dance Scheduler: spread a song sheet across a week of practice sessions")]
#[command(version)]
pub struct Args {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a schedule from a CSV song sheet
    ///
    /// The sheet needs a header row with title, duration (M:SS) and
    /// familiarity columns. Songs with higher familiarity numbers are
    /// practised on more days. Malformed rows are skipped with a warning.
    Generate {
        /// Path to the CSV song sheet
        #[arg(value_hint = clap::ValueHint::FilePath)]
        sheet: PathBuf,

        /// Number of days to schedule
        #[arg(long)]
        days: Option<usize>,

        /// Target session length in minutes
        #[arg(long)]
        minutes: Option<f64>,

        /// Allowed deviation from the target length, in minutes
        #[arg(long)]
        flexibility: Option<f64>,

        /// Seed for the day shuffle; the same seed reproduces the same schedule
        #[arg(long, env = "DANCE_SCHEDULER_SEED")]
        seed: Option<u64>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write the schedule to this file instead of stdout
        #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,

        /// Settings file (JSON) with days, minutes_per_day and flexibility
        ///
        /// Defaults to dance-scheduler/settings.json in the user config
        /// directory, if present. Command-line flags override its values.
        #[arg(long, value_hint = clap::ValueHint::FilePath)]
        settings: Option<PathBuf>,
    },

    /// Generate shell completions
    ///
    /// Usage: dance-scheduler completion bash > /path/to/completions/dance-scheduler
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_generate_defaults() {
        let args = Args::try_parse_from(["dance-scheduler", "generate", "songs.csv"]).unwrap();
        match args.command {
            Command::Generate {
                sheet,
                days,
                format,
                output,
                ..
            } => {
                assert_eq!(sheet, PathBuf::from("songs.csv"));
                assert_eq!(days, None);
                assert_eq!(format, OutputFormat::Text);
                assert!(output.is_none());
            }
            Command::Completion { .. } => panic!("expected generate"),
        }
    }

    #[test]
    fn test_generate_overrides() {
        let args = Args::try_parse_from([
            "dance-scheduler",
            "generate",
            "songs.csv",
            "--days",
            "5",
            "--minutes",
            "45",
            "--flexibility",
            "3.5",
            "--seed",
            "9",
            "--format",
            "json",
        ])
        .unwrap();

        let Command::Generate {
            days,
            minutes,
            flexibility,
            seed,
            format,
            ..
        } = args.command
        else {
            panic!("expected generate");
        };
        assert_eq!(days, Some(5));
        assert_eq!(minutes, Some(45.0));
        assert_eq!(flexibility, Some(3.5));
        assert_eq!(seed, Some(9));
        assert_eq!(format, OutputFormat::Json);
    }
}
