//! Time-bound scheduling rules.
//!
//! Two kinds of rules attach to an interval of the broadcast day:
//! - [`PriorityBlock`]: a hard restriction on which channels may air.
//! - [`TimePreference`]: a soft bonus for airing a preferred genre.
//!
//! Both use the open-interval overlap test against a program's airing
//! interval: `program.start < rule.end && program.end > rule.start`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{ChannelId, Minute, Program, TimeWindow};

/// Restricts broadcasting to a set of channels during [start, end).
///
/// A program violates the block if its airing interval overlaps the block
/// and its channel is not in `allowed_channels`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBlock {
    /// Block start (inclusive).
    pub start: Minute,
    /// Block end (exclusive).
    pub end: Minute,
    /// Channels allowed to air while the block is active.
    pub allowed_channels: BTreeSet<ChannelId>,
}

impl PriorityBlock {
    /// Creates a block that allows no channel.
    pub fn new(start: Minute, end: Minute) -> Self {
        Self {
            start,
            end,
            allowed_channels: BTreeSet::new(),
        }
    }

    /// Allows a channel during the block.
    pub fn allow(mut self, channel_id: ChannelId) -> Self {
        self.allowed_channels.insert(channel_id);
        self
    }

    /// Allows every channel in `channel_ids` during the block.
    pub fn allow_all(mut self, channel_ids: impl IntoIterator<Item = ChannelId>) -> Self {
        self.allowed_channels.extend(channel_ids);
        self
    }

    /// The block interval.
    #[inline]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }

    /// Whether the block applies to a program airing during `window`.
    #[inline]
    pub fn overlaps(&self, window: &TimeWindow) -> bool {
        self.window().overlaps(window)
    }

    /// Whether `channel_id` may air during the block.
    #[inline]
    pub fn allows(&self, channel_id: ChannelId) -> bool {
        self.allowed_channels.contains(&channel_id)
    }

    /// Whether airing `program` breaks this block.
    pub fn excludes(&self, program: &Program) -> bool {
        self.overlaps(&program.window()) && !self.allows(program.channel_id)
    }
}

/// Rewards airing `preferred_genre` during [start, end).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePreference {
    /// Preference start (inclusive).
    pub start: Minute,
    /// Preference end (exclusive).
    pub end: Minute,
    /// Genre that earns the bonus.
    pub preferred_genre: String,
    /// Bonus added to the program score.
    pub bonus: i64,
}

impl TimePreference {
    /// Creates a preference.
    pub fn new(start: Minute, end: Minute, preferred_genre: impl Into<String>, bonus: i64) -> Self {
        Self {
            start,
            end,
            preferred_genre: preferred_genre.into(),
            bonus,
        }
    }

    /// The preference interval.
    #[inline]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.start, self.end)
    }

    /// Whether `program` earns this preference's bonus.
    pub fn applies_to(&self, program: &Program) -> bool {
        program.genre == self.preferred_genre && self.window().overlaps(&program.window())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_block_excludes() {
        let block = PriorityBlock::new(60, 120).allow(1);

        let inside_other = Program::new(2, "x", 90, 150);
        let inside_allowed = Program::new(1, "y", 90, 150);
        let before = Program::new(2, "z", 0, 60);
        let after = Program::new(2, "w", 120, 180);

        assert!(block.excludes(&inside_other));
        assert!(!block.excludes(&inside_allowed));
        assert!(!block.excludes(&before));
        assert!(!block.excludes(&after));
    }

    #[test]
    fn test_priority_block_allow_all() {
        let block = PriorityBlock::new(0, 10).allow_all([3, 1, 2]);
        assert!(block.allows(1));
        assert!(block.allows(3));
        assert!(!block.allows(4));
    }

    #[test]
    fn test_time_preference_applies() {
        let pref = TimePreference::new(480, 720, "technology", 4);

        let matching = Program::new(0, "a", 700, 760).with_genre("technology");
        let wrong_genre = Program::new(0, "b", 500, 560).with_genre("science");
        let outside = Program::new(0, "c", 720, 780).with_genre("technology");

        assert!(pref.applies_to(&matching));
        assert!(!pref.applies_to(&wrong_genre));
        assert!(!pref.applies_to(&outside));
    }
}
