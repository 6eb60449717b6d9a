//! # Song Sheet Import
//!
//! Reads the class song sheet from CSV. The sheet has a header row and three
//! columns, accepted under either their original or English names:
//!
//! | Original | English       | Example  |
//! |----------|---------------|----------|
//! | `曲名`   | `title`       | `Bolero` |
//! | `时长`   | `duration`    | `3:25`   |
//! | `熟悉度` | `familiarity` | `4`      |
//!
//! Durations are `M:SS` or `M:SS:FF` (frames are ignored) and become decimal
//! minutes rounded to two places. Rows that cannot be turned into a valid
//! [`Song`] are logged and skipped so one bad line never loses the sheet.

use crate::song::Song;
use anyhow::{bail, Context, Result};
use log::{debug, warn};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Required columns as (original, English) header names.
const COLUMNS: [(&str, &str); 3] = [
    ("曲名", "title"),
    ("时长", "duration"),
    ("熟悉度", "familiarity"),
];

#[derive(Debug, Deserialize)]
struct SheetRow {
    #[serde(rename = "曲名", alias = "title")]
    title: String,
    #[serde(rename = "时长", alias = "duration")]
    duration: String,
    #[serde(rename = "熟悉度", alias = "familiarity")]
    familiarity: String,
}

/// Load songs from a CSV file on disk.
///
/// # Errors
///
/// Fails if the file cannot be opened or its header cannot be read.
pub fn load_songs(path: &Path) -> Result<Vec<Song>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open song sheet {}", path.display()))?;

    read_songs(file).with_context(|| format!("Failed to read song sheet {}", path.display()))
}

/// Load songs from any CSV source.
///
/// # Errors
///
/// Fails on I/O errors or a header missing one of the required columns.
/// Malformed data rows are skipped, not reported as errors.
pub fn read_songs<R: Read>(reader: R) -> Result<Vec<Song>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers().context("Missing header row")?.clone();
    for (column, english) in COLUMNS {
        match headers.iter().filter(|h| *h == column || *h == english).count() {
            0 => bail!("Missing `{column}' / `{english}' column in header"),
            1 => {}
            _ => bail!("Column `{column}' / `{english}' appears more than once in header"),
        }
    }

    let mut songs = Vec::new();
    for (i, record) in csv_reader.records().enumerate() {
        // Header is line 1.
        let line = i + 2;
        let record = record.with_context(|| format!("Failed to read line {line}"))?;

        match record
            .deserialize::<SheetRow>(Some(&headers))
            .map_err(anyhow::Error::from)
            .and_then(|row| parse_row(&row))
        {
            Ok(song) => songs.push(song),
            Err(e) => {
                let raw = record.iter().collect::<Vec<_>>().join(",");
                warn!("Skipping line {line} ({raw}): {e:#}");
            }
        }
    }

    debug!("Read {} songs from sheet", songs.len());
    Ok(songs)
}

fn parse_row(row: &SheetRow) -> Result<Song> {
    let title = row.title.trim();
    if title.is_empty() {
        bail!("empty title");
    }

    let duration = parse_duration(&row.duration)?;
    if duration <= 0.0 {
        bail!("zero duration");
    }

    let familiarity: u32 = row
        .familiarity
        .trim()
        .parse()
        .with_context(|| format!("invalid familiarity `{}'", row.familiarity))?;
    if familiarity == 0 {
        bail!("familiarity must be at least 1");
    }

    Ok(Song::new(title, duration, familiarity))
}

/// Parse `M:SS` or `M:SS:FF` into decimal minutes, rounded to two places.
///
/// # Errors
///
/// Fails on any other shape, non-numeric parts, or seconds of 60 or more.
pub fn parse_duration(text: &str) -> Result<f64> {
    let parts: Vec<&str> = text.trim().split(':').collect();

    let (minutes, seconds) = match parts.as_slice() {
        [m, s] | [m, s, _] => (*m, *s),
        _ => bail!("invalid time format `{text}'"),
    };

    let minutes: u32 = minutes
        .trim()
        .parse()
        .with_context(|| format!("invalid minutes in `{text}'"))?;
    let seconds: u32 = seconds
        .trim()
        .parse()
        .with_context(|| format!("invalid seconds in `{text}'"))?;
    if seconds >= 60 {
        bail!("seconds out of range in `{text}'");
    }

    let decimal = f64::from(minutes) + f64::from(seconds) / 60.0;
    Ok((decimal * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_formats() {
        assert_eq!(parse_duration("3:30").unwrap(), 3.5);
        assert_eq!(parse_duration("4:20").unwrap(), 4.33);
        assert_eq!(parse_duration("2:45:12").unwrap(), 2.75);
        assert_eq!(parse_duration(" 0:06 ").unwrap(), 0.1);
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("3").is_err());
        assert!(parse_duration("1:2:3:4").is_err());
        assert!(parse_duration("a:30").is_err());
        assert!(parse_duration("3:75").is_err());
        assert!(parse_duration("-1:30").is_err());
    }

    #[test]
    fn test_read_original_headers() {
        let sheet = "曲名,时长,熟悉度\n  Bolero ,3:25,4\nTango,2:30,7\n";
        let songs = read_songs(sheet.as_bytes()).unwrap();

        assert_eq!(
            songs,
            vec![Song::new("Bolero", 3.42, 4), Song::new("Tango", 2.5, 7)]
        );
    }

    #[test]
    fn test_read_english_headers() {
        let sheet = "title,duration,familiarity\nWaltz,3:00,2\n";
        let songs = read_songs(sheet.as_bytes()).unwrap();
        assert_eq!(songs, vec![Song::new("Waltz", 3.0, 2)]);
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let sheet = "曲名,歌手,时长,熟悉度\nRumba,Someone,3:10,3\n";
        let songs = read_songs(sheet.as_bytes()).unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].title, "Rumba");
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let sheet = "title,duration,familiarity\n\
                     Good,3:00,2\n\
                     BadTime,three,2\n\
                     BadFam,3:00,often\n\
                     ZeroFam,3:00,0\n\
                     ZeroTime,0:00,2\n\
                     ,3:00,2\n\
                     Short,3:00\n\
                     AlsoGood,1:15,1\n";
        let songs = read_songs(sheet.as_bytes()).unwrap();

        let titles: Vec<&str> = songs.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Good", "AlsoGood"]);
    }

    #[test]
    fn test_missing_column_is_error() {
        let sheet = "title,duration\nWaltz,3:00\n";
        assert!(read_songs(sheet.as_bytes()).is_err());
    }

    #[test]
    fn test_repeated_column_is_error() {
        let both_titles = "曲名,title,时长,熟悉度\nA,B,3:00,2\n";
        let err = read_songs(both_titles.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("more than once"));

        let same_twice = "title,duration,duration,familiarity\nA,3:00,3:00,2\n";
        assert!(read_songs(same_twice.as_bytes()).is_err());
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_songs(&dir.path().join("missing.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("missing.csv"));
    }
}
