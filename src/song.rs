//! Song model: the unit the scheduler spreads across days.

/// A song on the practice sheet.
///
/// `familiarity` doubles as the priority weight: a song the class does not
/// know well yet gets a higher number and is played on more days.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub title: String,
    /// Length in minutes.
    pub duration: f64,
    pub familiarity: u32,
}

impl Song {
    #[must_use]
    pub fn new(title: impl Into<String>, duration: f64, familiarity: u32) -> Self {
        Self {
            title: title.into(),
            duration,
            familiarity,
        }
    }

    /// Number of distinct days this song should ideally be played on.
    #[must_use]
    pub const fn desired_plays(&self) -> u32 {
        self.familiarity
    }

    /// Same-day duplicate check. Songs sharing a title count as the same
    /// content even if their durations differ.
    #[must_use]
    pub fn same_title(&self, other: &Song) -> bool {
        self.title == other.title
    }
}

impl std::fmt::Display for Song {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}m, fam:{}, plays:{})",
            self.title,
            self.duration,
            self.familiarity,
            self.desired_plays()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desired_plays_follows_familiarity() {
        assert_eq!(Song::new("Waltz", 3.5, 1).desired_plays(), 1);
        assert_eq!(Song::new("Tango", 2.75, 7).desired_plays(), 7);
    }

    #[test]
    fn test_same_title_ignores_duration() {
        let a = Song::new("Bolero", 4.0, 2);
        let b = Song::new("Bolero", 6.5, 5);
        let c = Song::new("Rumba", 4.0, 2);

        assert!(a.same_title(&b));
        assert!(!a.same_title(&c));
    }

    #[test]
    fn test_display_format() {
        let song = Song::new("Cha Cha", 3.25, 4);
        assert_eq!(song.to_string(), "Cha Cha (3.25m, fam:4, plays:4)");
    }
}
