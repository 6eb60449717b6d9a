//! Weekly schedule generation.
//!
//! Spreads songs across days so that unfamiliar songs are practised more
//! often while every session stays inside its time window.
//!
//! ## Algorithm
//!
//! 1. **Priority pass**: songs are taken by descending desired plays, then by
//!    descending duration. Each song gets its own shuffled day order and is
//!    placed once per desired play on the first day in that order that still
//!    accepts it. A song that cannot be placed is recorded as [`Unassigned`]
//!    and never revisited.
//! 2. **Fill pass**: every day still below the minimum is topped up with songs
//!    in sheet order, regardless of how often they already play.
//!
//! A day accepts a song when the song (or another song with the same title)
//! is not already on it and the new total stays at or below the maximum.
//!
//! The only randomness is the per-song day shuffle, drawn from a caller-owned
//! [`Rng`], so a seeded generator reproduces a schedule exactly.

use crate::config::{ConfigError, ScheduleConfig};
use crate::song::Song;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// A song the priority pass gave up on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unassigned {
    pub title: String,
    pub desired: u32,
    /// Days it did get before no further day accepted it.
    pub assigned: u32,
}

/// Validated input for schedule generation.
///
/// Holds no state between runs: every call to [`Scheduler::generate`] starts
/// from empty days.
#[derive(Debug, Clone)]
pub struct Scheduler {
    songs: Vec<Song>,
    config: ScheduleConfig,
}

impl Scheduler {
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is unusable or a song
    /// has a non-positive duration or zero familiarity.
    pub fn new(songs: Vec<Song>, config: ScheduleConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        for song in &songs {
            if !song.duration.is_finite() || song.duration <= 0.0 {
                return Err(ConfigError::InvalidDuration {
                    title: song.title.clone(),
                    duration: song.duration,
                });
            }
            if song.familiarity == 0 {
                return Err(ConfigError::InvalidFamiliarity {
                    title: song.title.clone(),
                });
            }
        }

        Ok(Self { songs, config })
    }

    #[must_use]
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    #[must_use]
    pub const fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Run both passes and return a fresh schedule.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Schedule<'_> {
        let mut schedule = Schedule::empty(&self.songs, self.config);

        schedule.assign_by_priority(rng);
        debug!(
            "Priority pass placed {} plays, {} songs unassigned",
            schedule.phase_one_plays.iter().sum::<u32>(),
            schedule.unassigned.len()
        );

        schedule.fill_underloaded_days();
        debug!(
            "Fill pass done, {} days still under {} minutes",
            schedule.underloaded_days().len(),
            self.config.min_minutes()
        );

        schedule
    }

    /// Convenience wrapper seeding a [`StdRng`].
    #[must_use]
    pub fn generate_seeded(&self, seed: u64) -> Schedule<'_> {
        self.generate(&mut StdRng::seed_from_u64(seed))
    }
}

/// Random visiting order over `0..days`.
pub fn shuffled_days<R: Rng + ?Sized>(days: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..days).collect();
    order.shuffle(rng);
    order
}

/// Song indices in priority order: most desired plays first, longer songs
/// first among equals. Remaining ties keep sheet order.
#[must_use]
pub fn priority_order(songs: &[Song]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..songs.len()).collect();
    order.sort_by(|&a, &b| {
        songs[b]
            .desired_plays()
            .cmp(&songs[a].desired_plays())
            .then_with(|| songs[b].duration.total_cmp(&songs[a].duration))
    });
    order
}

/// Result of one generation run.
///
/// Day sequences are the only record of placement; which days a song is on
/// is always derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule<'a> {
    songs: &'a [Song],
    config: ScheduleConfig,
    /// Song indices per day, in the order they were placed.
    days: Vec<Vec<usize>>,
    phase_one_plays: Vec<u32>,
    unassigned: Vec<Unassigned>,
}

impl<'a> Schedule<'a> {
    fn empty(songs: &'a [Song], config: ScheduleConfig) -> Self {
        Self {
            songs,
            config,
            days: vec![Vec::new(); config.days],
            phase_one_plays: vec![0; songs.len()],
            unassigned: Vec::new(),
        }
    }

    fn assign_by_priority<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let songs = self.songs;

        for idx in priority_order(songs) {
            let song = &songs[idx];
            let day_order = shuffled_days(self.days.len(), rng);
            let mut assigned = 0;

            while assigned < song.desired_plays() {
                match day_order.iter().copied().find(|&day| self.accepts(day, idx)) {
                    Some(day) => {
                        self.place(day, idx);
                        assigned += 1;
                    }
                    None => {
                        debug!(
                            "Could not fully assign `{}' (needed {}, assigned {assigned})",
                            song.title,
                            song.desired_plays()
                        );
                        self.unassigned.push(Unassigned {
                            title: song.title.clone(),
                            desired: song.desired_plays(),
                            assigned,
                        });
                        break;
                    }
                }
            }

            self.phase_one_plays[idx] = assigned;
        }
    }

    fn fill_underloaded_days(&mut self) {
        let min_minutes = self.config.min_minutes();

        for day in 0..self.days.len() {
            while self.total_minutes(day) < min_minutes {
                match (0..self.songs.len()).find(|&idx| self.accepts(day, idx)) {
                    Some(idx) => self.place(day, idx),
                    None => break,
                }
            }
        }
    }

    fn accepts(&self, day: usize, idx: usize) -> bool {
        let song = &self.songs[idx];

        if self.days[day].contains(&idx) {
            return false;
        }
        if self.songs_on(day).any(|other| other.same_title(song)) {
            return false;
        }
        self.total_minutes(day) + song.duration <= self.config.max_minutes()
    }

    fn place(&mut self, day: usize, idx: usize) {
        trace!("Placing `{}' on day {day}", self.songs[idx].title);
        self.days[day].push(idx);
    }

    /// The songs this schedule was generated from, in sheet order.
    #[must_use]
    pub fn songs(&self) -> &'a [Song] {
        self.songs
    }

    #[must_use]
    pub const fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Number of days.
    #[must_use]
    pub fn days(&self) -> usize {
        self.days.len()
    }

    /// Songs on `day` in placement order.
    ///
    /// # Panics
    ///
    /// Panics if `day` is out of range.
    pub fn songs_on(&self, day: usize) -> impl Iterator<Item = &'a Song> + '_ {
        let songs = self.songs;
        self.days[day].iter().map(move |&idx| &songs[idx])
    }

    /// Sheet indices of the songs on `day`, in placement order.
    ///
    /// # Panics
    ///
    /// Panics if `day` is out of range.
    #[must_use]
    pub fn song_indices_on(&self, day: usize) -> &[usize] {
        &self.days[day]
    }

    /// Total minutes on `day`.
    ///
    /// # Panics
    ///
    /// Panics if `day` is out of range.
    #[must_use]
    pub fn total_minutes(&self, day: usize) -> f64 {
        self.songs_on(day).map(|song| song.duration).sum()
    }

    /// Days the song at sheet index `song` is on, ascending.
    #[must_use]
    pub fn assigned_days(&self, song: usize) -> Vec<usize> {
        self.days
            .iter()
            .enumerate()
            .filter(|(_, day)| day.contains(&song))
            .map(|(day, _)| day)
            .collect()
    }

    /// Final number of days per song (sheet order), fill pass included.
    #[must_use]
    pub fn play_counts(&self) -> Vec<u32> {
        let mut counts = vec![0u32; self.songs.len()];
        for &idx in self.days.iter().flatten() {
            counts[idx] += 1;
        }
        counts
    }

    /// Days per song (sheet order) as they stood after the priority pass.
    #[must_use]
    pub fn phase_one_plays(&self) -> &[u32] {
        &self.phase_one_plays
    }

    /// Songs the priority pass could not place as often as desired, in the
    /// order they were given up on.
    #[must_use]
    pub fn unassigned(&self) -> &[Unassigned] {
        &self.unassigned
    }

    /// Whether `day` ended below the minimum even after the fill pass.
    #[must_use]
    pub fn is_underloaded(&self, day: usize) -> bool {
        self.total_minutes(day) < self.config.min_minutes()
    }

    #[must_use]
    pub fn underloaded_days(&self) -> Vec<usize> {
        (0..self.days.len())
            .filter(|&day| self.is_underloaded(day))
            .collect()
    }
}
