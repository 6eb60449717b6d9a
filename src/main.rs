//! # Dance Scheduler
//!
//! Reads a class song sheet and spreads the songs across a week of practice
//! sessions: songs the class knows least are played on the most days, no
//! song repeats within a session, and every session stays inside its time
//! window.
//!
//! ## Usage
//!
//! ```bash
//! # Default week: 7 days of 60 ± 2 minutes
//! dance-scheduler generate songs.csv
//!
//! # Reproducible run, written as JSON
//! dance-scheduler generate songs.csv --seed 42 --format json -o week.json
//!
//! # Shell completions
//! dance-scheduler completion fish
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use dance_scheduler::{cli, completion, config, import, report, scheduler};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;

/// Main entry point.
///
/// Logging is controlled via `RUST_LOG`:
/// - `RUST_LOG=debug dance-scheduler generate songs.csv` - pass summaries
/// - `RUST_LOG=dance_scheduler::scheduler=trace ...` - every placement
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();

    match args.command {
        cli::Command::Generate {
            sheet,
            days,
            minutes,
            flexibility,
            seed,
            format,
            output,
            settings,
        } => {
            let settings = config::resolve_settings(settings.as_deref())?;
            let base = config::ScheduleConfig::default().merged_with(&settings);
            let schedule_config = config::ScheduleConfig {
                days: days.unwrap_or(base.days),
                minutes_per_day: minutes.unwrap_or(base.minutes_per_day),
                flexibility: flexibility.unwrap_or(base.flexibility),
            };

            info!("Reading song sheet from: {}", sheet.display());
            let songs = import::load_songs(&sheet)?;
            if songs.is_empty() {
                warn!("No usable songs in {}", sheet.display());
            }

            let scheduler = scheduler::Scheduler::new(songs, schedule_config)
                .context("Invalid schedule configuration")?;

            let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
            info!("Generating schedule with seed {seed}");
            let schedule = scheduler.generate(&mut StdRng::seed_from_u64(seed));

            let rendered = match format {
                cli::OutputFormat::Text => report::render_text(&schedule),
                cli::OutputFormat::Json => report::render_json(&schedule)?,
            };

            match output {
                Some(path) => {
                    fs::write(&path, &rendered).with_context(|| {
                        format!("Failed to write schedule to {}", path.display())
                    })?;
                    println!("Schedule saved to: {}", path.display());
                }
                None => print!("{rendered}"),
            }
        }
        cli::Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            let shell = completion::shell_to_completion_shell(shell);
            completion::generate_completions(shell, &mut cmd);
        }
    }

    Ok(())
}
