//! Problem instance model.
//!
//! [`InstanceData`] is the immutable root handed to the scheduler: the
//! broadcast window, the global rule parameters and every channel timetable.
//! Construct it with the `with_*` builders (or from the JSON wire format in
//! [`crate::io`]), validate it once, then share it read-only.

use serde::{Deserialize, Serialize};

use super::{Channel, ChannelId, Minute, PriorityBlock, TimePreference, TimeWindow};
use crate::validation::{validate_instance, ValidationResult};

/// Default parameter values used when a request leaves them out.
pub mod defaults {
    use super::Minute;

    /// 08:00 in minutes from midnight.
    pub const OPENING_TIME: Minute = 480;
    /// 23:00 in minutes from midnight.
    pub const CLOSING_TIME: Minute = 1380;
    /// Minimum dwell before a channel switch.
    pub const MIN_DURATION: Minute = 30;
    /// Number of channels produced by the generator.
    pub const CHANNELS_COUNT: usize = 10;
    /// Longest allowed run of one genre.
    pub const MAX_CONSECUTIVE_GENRE: u32 = 2;
    /// Penalty for switching channels.
    pub const SWITCH_PENALTY: i64 = 10;
    /// Penalty for cutting off a program mid-broadcast.
    pub const TERMINATION_PENALTY: i64 = 20;
}

/// A complete scheduling problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceData {
    /// First schedulable minute.
    pub opening_time: Minute,
    /// End of the broadcast window (exclusive).
    pub closing_time: Minute,
    /// Minimum dwell (minutes) after a committed entry starts before the
    /// next one may start; also the minimum length of a committed program.
    pub min_duration: Minute,
    /// Longest allowed run of consecutive entries sharing a genre.
    pub max_consecutive_genre: u32,
    /// Subtracted when the candidate's channel differs from the last entry's.
    pub switch_penalty: i64,
    /// Subtracted when the candidate would cut off the last entry.
    pub termination_penalty: i64,
    /// Channel restrictions.
    pub priority_blocks: Vec<PriorityBlock>,
    /// Genre bonuses.
    pub time_preferences: Vec<TimePreference>,
    /// Channels in priority order; on score ties the earlier channel wins.
    pub channels: Vec<Channel>,
}

impl InstanceData {
    /// Creates an instance for the window [opening_time, closing_time) with
    /// default parameters and no channels.
    pub fn new(opening_time: Minute, closing_time: Minute) -> Self {
        Self {
            opening_time,
            closing_time,
            min_duration: defaults::MIN_DURATION,
            max_consecutive_genre: defaults::MAX_CONSECUTIVE_GENRE,
            switch_penalty: defaults::SWITCH_PENALTY,
            termination_penalty: defaults::TERMINATION_PENALTY,
            priority_blocks: Vec::new(),
            time_preferences: Vec::new(),
            channels: Vec::new(),
        }
    }

    /// Sets the minimum dwell.
    pub fn with_min_duration(mut self, min_duration: Minute) -> Self {
        self.min_duration = min_duration;
        self
    }

    /// Sets the genre cap.
    pub fn with_max_consecutive_genre(mut self, max: u32) -> Self {
        self.max_consecutive_genre = max;
        self
    }

    /// Sets the channel-switch penalty.
    pub fn with_switch_penalty(mut self, penalty: i64) -> Self {
        self.switch_penalty = penalty;
        self
    }

    /// Sets the early-termination penalty.
    pub fn with_termination_penalty(mut self, penalty: i64) -> Self {
        self.termination_penalty = penalty;
        self
    }

    /// Adds a priority block.
    pub fn with_priority_block(mut self, block: PriorityBlock) -> Self {
        self.priority_blocks.push(block);
        self
    }

    /// Adds a time preference.
    pub fn with_time_preference(mut self, preference: TimePreference) -> Self {
        self.time_preferences.push(preference);
        self
    }

    /// Appends a channel.
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channels.push(channel);
        self
    }

    /// The broadcast window.
    #[inline]
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.opening_time, self.closing_time)
    }

    /// Length of the broadcast window in minutes.
    #[inline]
    pub fn horizon(&self) -> Minute {
        self.closing_time - self.opening_time
    }

    /// Looks up a channel by id.
    pub fn channel(&self, channel_id: ChannelId) -> Option<&Channel> {
        self.channels.iter().find(|c| c.channel_id == channel_id)
    }

    /// Total number of programs across all channels.
    pub fn program_count(&self) -> usize {
        self.channels.iter().map(Channel::program_count).sum()
    }

    /// Runs the input integrity checks.
    pub fn validate(&self) -> ValidationResult {
        validate_instance(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_builder() {
        let inst = InstanceData::new(0, 600)
            .with_min_duration(15)
            .with_max_consecutive_genre(3)
            .with_switch_penalty(5)
            .with_termination_penalty(8)
            .with_priority_block(PriorityBlock::new(60, 120).allow(1))
            .with_time_preference(TimePreference::new(0, 60, "News", 10))
            .with_channel(Channel::new(1).with_slot("a", 0, 60, "News", 50))
            .with_channel(Channel::new(2).with_slot("b", 0, 30, "Sport", 40));

        assert_eq!(inst.min_duration, 15);
        assert_eq!(inst.max_consecutive_genre, 3);
        assert_eq!(inst.switch_penalty, 5);
        assert_eq!(inst.termination_penalty, 8);
        assert_eq!(inst.horizon(), 600);
        assert_eq!(inst.program_count(), 2);
        assert_eq!(inst.channel(2).map(|c| c.programs.len()), Some(1));
        assert!(inst.channel(9).is_none());
        assert!(inst.validate().is_ok());
    }

    #[test]
    fn test_instance_defaults() {
        let inst = InstanceData::new(defaults::OPENING_TIME, defaults::CLOSING_TIME);
        assert_eq!(inst.min_duration, 30);
        assert_eq!(inst.max_consecutive_genre, 2);
        assert_eq!(inst.switch_penalty, 10);
        assert_eq!(inst.termination_penalty, 20);
        assert_eq!(inst.window(), TimeWindow::new(480, 1380));
    }
}
