//! Program (timetable slot) model.
//!
//! A program is one airing on one channel: a fixed interval with a genre
//! tag and a base score. The scheduler never moves a program in time; it can
//! only pick it up while it is airing.

use serde::{Deserialize, Serialize};

use super::{ChannelId, Minute, TimeWindow};

/// Builds the instance-wide identifier of a program airing.
///
/// Program ids are only unique within a channel and may repeat on the same
/// channel at different times, so the identifier combines all three.
pub fn unique_program_id(channel_id: ChannelId, program_id: &str, start: Minute) -> String {
    format!("{channel_id}_{program_id}_{start}")
}

/// One program airing on a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Owning channel.
    pub channel_id: ChannelId,
    /// Program identifier as given in the timetable.
    pub program_id: String,
    /// Derived identifier, unique within an instance.
    pub unique_id: String,
    /// Air start (inclusive).
    pub start: Minute,
    /// Air end (exclusive).
    pub end: Minute,
    /// Genre tag used by genre caps and time preferences.
    pub genre: String,
    /// Base score awarded for broadcasting this program.
    pub score: i64,
}

impl Program {
    /// Creates a program airing on `channel_id` during [start, end).
    pub fn new(
        channel_id: ChannelId,
        program_id: impl Into<String>,
        start: Minute,
        end: Minute,
    ) -> Self {
        let program_id = program_id.into();
        Self {
            unique_id: unique_program_id(channel_id, &program_id, start),
            channel_id,
            program_id,
            start,
            end,
            genre: String::new(),
            score: 0,
        }
    }

    /// Sets the genre tag.
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    /// Sets the base score.
    pub fn with_score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }

    /// Air time in minutes.
    #[inline]
    pub fn duration(&self) -> Minute {
        self.end - self.start
    }

    /// The airing interval.
    #[inline]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }

    /// Whether the program is on air at `time`.
    #[inline]
    pub fn is_airing_at(&self, time: Minute) -> bool {
        self.start <= time && time < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_builder() {
        let p = Program::new(3, "news", 480, 540)
            .with_genre("News")
            .with_score(70);

        assert_eq!(p.channel_id, 3);
        assert_eq!(p.program_id, "news");
        assert_eq!(p.unique_id, "3_news_480");
        assert_eq!(p.genre, "News");
        assert_eq!(p.score, 70);
        assert_eq!(p.duration(), 60);
        assert_eq!(p.window(), TimeWindow::new(480, 540));
    }

    #[test]
    fn test_program_airing() {
        let p = Program::new(0, "p", 10, 20);
        assert!(!p.is_airing_at(9));
        assert!(p.is_airing_at(10));
        assert!(p.is_airing_at(19));
        assert!(!p.is_airing_at(20));
    }

    #[test]
    fn test_unique_id_distinguishes_reruns() {
        let first = Program::new(1, "movie", 0, 90);
        let rerun = Program::new(1, "movie", 600, 690);
        let other_channel = Program::new(2, "movie", 0, 90);
        assert_ne!(first.unique_id, rerun.unique_id);
        assert_ne!(first.unique_id, other_channel.unique_id);
    }
}
