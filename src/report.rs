//! Rendering of generated schedules as plain text or JSON.

use crate::scheduler::{Schedule, Unassigned};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Display name for a zero-based day index. Schedules longer than a week fall
/// back to `Day N`.
#[must_use]
pub fn day_name(day: usize) -> String {
    WEEKDAYS
        .get(day)
        .map_or_else(|| format!("Day {}", day + 1), |name| (*name).to_string())
}

/// Split decimal minutes into whole minutes and seconds, truncating.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn minutes_to_minutes_seconds(decimal_minutes: f64) -> (u32, u32) {
    let decimal_minutes = decimal_minutes.max(0.0);
    let minutes = decimal_minutes.trunc();
    let seconds = ((decimal_minutes - minutes) * 60.0).trunc();
    (minutes as u32, seconds as u32)
}

/// Machine-readable view of a schedule.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleReport {
    pub min_minutes: f64,
    pub max_minutes: f64,
    pub days: Vec<DayReport>,
    pub play_counts: Vec<PlayCount>,
    pub unassigned: Vec<Unassigned>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayReport {
    pub day: usize,
    pub name: String,
    pub songs: Vec<ScheduledSong>,
    pub total_minutes: f64,
    pub underloaded: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduledSong {
    pub title: String,
    pub duration: f64,
    pub familiarity: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayCount {
    pub title: String,
    pub played: u32,
    pub desired: u32,
}

impl ScheduleReport {
    #[must_use]
    pub fn from_schedule(schedule: &Schedule<'_>) -> Self {
        let days = (0..schedule.days())
            .map(|day| DayReport {
                day,
                name: day_name(day),
                songs: schedule
                    .songs_on(day)
                    .map(|song| ScheduledSong {
                        title: song.title.clone(),
                        duration: song.duration,
                        familiarity: song.familiarity,
                    })
                    .collect(),
                total_minutes: schedule.total_minutes(day),
                underloaded: schedule.is_underloaded(day),
            })
            .collect();

        let play_counts = schedule
            .songs()
            .iter()
            .zip(schedule.play_counts())
            .map(|(song, played)| PlayCount {
                title: song.title.clone(),
                played,
                desired: song.desired_plays(),
            })
            .collect();

        Self {
            min_minutes: schedule.config().min_minutes(),
            max_minutes: schedule.config().max_minutes(),
            days,
            play_counts,
            unassigned: schedule.unassigned().to_vec(),
        }
    }
}

/// Pretty-printed JSON form of [`ScheduleReport`].
///
/// # Errors
///
/// Fails only if serialization fails.
pub fn render_json(schedule: &Schedule<'_>) -> Result<String> {
    serde_json::to_string_pretty(&ScheduleReport::from_schedule(schedule))
        .context("Failed to serialize schedule report")
}

/// Human-readable weekly plan, play-count summary and unassigned songs.
#[must_use]
pub fn render_text(schedule: &Schedule<'_>) -> String {
    let mut out = String::new();
    let min_minutes = schedule.config().min_minutes();

    // Writing to a String cannot fail.
    for day in 0..schedule.days() {
        let _ = writeln!(out, "\n{} Schedule:", day_name(day));
        for song in schedule.songs_on(day) {
            let _ = writeln!(
                out,
                "  - {} ({:.2}m, fam: {})",
                song.title, song.duration, song.familiarity
            );
        }

        let (minutes, seconds) = minutes_to_minutes_seconds(schedule.total_minutes(day));
        let _ = writeln!(out, "  Total time: {minutes} minutes {seconds} seconds");
        if schedule.is_underloaded(day) {
            let _ = writeln!(out, "  Warning: under minimum of {min_minutes}m!");
        }
    }

    let _ = writeln!(out, "\nSummary of Song Play Counts:");
    for (song, played) in schedule.songs().iter().zip(schedule.play_counts()) {
        let _ = writeln!(
            out,
            "{}: played {played} times (desired: {})",
            song.title,
            song.desired_plays()
        );
    }

    if !schedule.unassigned().is_empty() {
        let _ = writeln!(out, "\nSongs That Didn't Get Assigned:");
        for entry in schedule.unassigned() {
            let _ = writeln!(
                out,
                "  - {}: assigned {} out of {} desired plays",
                entry.title, entry.assigned, entry.desired
            );
        }
    }

    out
}
