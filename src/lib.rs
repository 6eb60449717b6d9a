//! Weekly practice scheduler for a dance class song sheet.
//!
//! Core modules:
//! - [`song`] - Song model (duration and familiarity)
//! - [`scheduler`] - Two-pass greedy schedule generation
//! - [`config`] - Engine configuration and settings file
//!
//! ### Supporting Modules
//!
//! - [`import`] - CSV song sheet reader
//! - [`report`] - Text and JSON rendering of a schedule
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```
//! use dance_scheduler::config::ScheduleConfig;
//! use dance_scheduler::scheduler::Scheduler;
//! use dance_scheduler::song::Song;
//!
//! let songs = vec![
//!     Song::new("Bolero", 3.42, 4),
//!     Song::new("Tango", 2.5, 7),
//! ];
//! let scheduler = Scheduler::new(songs, ScheduleConfig::default())?;
//! let schedule = scheduler.generate_seeded(42);
//!
//! for day in 0..schedule.days() {
//!     assert!(schedule.total_minutes(day) <= 62.0);
//! }
//! assert!(schedule.unassigned().is_empty());
//! # Ok::<(), dance_scheduler::config::ConfigError>(())
//! ```
//!
//! ## Algorithm Details
//!
//! ### Priority Pass
//! - Songs with the most desired plays (highest familiarity number) go first
//! - Longer songs go first among equals
//! - Each song tries days in its own random order and stops at the first
//!   day with no room, recording a shortfall
//!
//! ### Fill Pass
//! - Days under `minutes_per_day - flexibility` are topped up with songs in
//!   sheet order, even past their desired plays
//! - Days that still fall short are reported, not treated as errors
//!
//! ## Error Handling
//!
//! The engine itself never fails once constructed. [`scheduler::Scheduler::new`]
//! rejects bad configuration with [`config::ConfigError`]; I/O and parsing
//! helpers return `anyhow::Result`.

pub mod cli;
pub mod completion;
pub mod config;
pub mod import;
pub mod report;
pub mod scheduler;
pub mod song;
