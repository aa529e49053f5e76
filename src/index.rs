//! Program lookup cache.
//!
//! [`ProgramIndex`] answers the two questions the scheduler asks on every
//! time step: "what is channel `c` airing at minute `t`?" and "which program
//! does this schedule entry refer to?". It is built once per run from a
//! borrowed [`InstanceData`] and owned by that run; nothing is shared across
//! runs.
//!
//! # Algorithm
//! Each channel's timetable is sorted by start (stable, so input order
//! breaks ties) with a parallel array of start times. An "active at `t`"
//! query binary-searches for the rightmost start `<= t` and accepts that
//! program if `t < end`.
//!
//! # Complexity
//! Build: O(P log P). Active-at: O(log P_c). By-unique-id: O(1) expected.

use std::collections::HashMap;

use crate::models::{Channel, ChannelId, InstanceData, Minute, Program};

/// One channel's timetable sorted by start.
#[derive(Debug, Clone)]
struct Timeline<'a> {
    programs: Vec<&'a Program>,
    starts: Vec<Minute>,
}

impl<'a> Timeline<'a> {
    fn build(channel: &'a Channel) -> Self {
        let mut programs: Vec<&Program> = channel.programs.iter().collect();
        programs.sort_by_key(|p| p.start);
        let starts = programs.iter().map(|p| p.start).collect();
        Self { programs, starts }
    }

    fn active_at(&self, time: Minute) -> Option<&'a Program> {
        // Number of programs starting at or before `time`; the last of them
        // is the rightmost start <= time.
        let upto = self.starts.partition_point(|&s| s <= time);
        let candidate = *self.programs.get(upto.checked_sub(1)?)?;
        (time < candidate.end).then_some(candidate)
    }
}

/// Request-scoped program lookup index.
///
/// # Example
/// ```
/// use tv_schedule::index::ProgramIndex;
/// use tv_schedule::models::{Channel, InstanceData};
///
/// let instance = InstanceData::new(0, 120).with_channel(
///     Channel::new(1)
///         .with_slot("morning", 0, 60, "News", 50)
///         .with_slot("noon", 70, 120, "Sport", 40),
/// );
/// let index = ProgramIndex::build(&instance);
///
/// assert_eq!(index.program_active_at(1, 30).unwrap().program_id, "morning");
/// assert!(index.program_active_at(1, 65).is_none()); // gap
/// assert_eq!(index.program_by_unique_id("1_noon_70").unwrap().genre, "Sport");
/// ```
#[derive(Debug, Clone)]
pub struct ProgramIndex<'a> {
    /// Timelines in channel-list order.
    timelines: Vec<Timeline<'a>>,
    /// Channel id → position in `timelines`.
    positions: HashMap<ChannelId, usize>,
    /// Unique id → program.
    by_unique_id: HashMap<&'a str, &'a Program>,
}

impl<'a> ProgramIndex<'a> {
    /// Builds the index for an instance.
    pub fn build(instance: &'a InstanceData) -> Self {
        let mut timelines = Vec::with_capacity(instance.channels.len());
        let mut positions = HashMap::with_capacity(instance.channels.len());
        let mut by_unique_id = HashMap::with_capacity(instance.program_count());

        for (pos, channel) in instance.channels.iter().enumerate() {
            let timeline = Timeline::build(channel);
            for &program in &timeline.programs {
                by_unique_id.insert(program.unique_id.as_str(), program);
            }
            positions.entry(channel.channel_id).or_insert(pos);
            timelines.push(timeline);
        }

        Self {
            timelines,
            positions,
            by_unique_id,
        }
    }

    /// Program airing on the channel at position `channel_index` at `time`.
    ///
    /// Returns `None` for gaps in the timetable and for out-of-range indices.
    pub fn active_at_index(&self, channel_index: usize, time: Minute) -> Option<&'a Program> {
        self.timelines.get(channel_index)?.active_at(time)
    }

    /// Program airing on `channel_id` at `time`.
    ///
    /// Returns `None` for gaps in the timetable and for unknown channels.
    pub fn program_active_at(&self, channel_id: ChannelId, time: Minute) -> Option<&'a Program> {
        let pos = *self.positions.get(&channel_id)?;
        self.active_at_index(pos, time)
    }

    /// Program with the given unique id.
    pub fn program_by_unique_id(&self, unique_id: &str) -> Option<&'a Program> {
        self.by_unique_id.get(unique_id).copied()
    }

    /// Number of indexed channels.
    pub fn channel_count(&self) -> usize {
        self.timelines.len()
    }

    /// Number of indexed programs.
    pub fn program_count(&self) -> usize {
        self.by_unique_id.len()
    }
}

/// Reference lookup by linear scan: among programs with `start <= time < end`,
/// the one with the greatest start, the later one in input order on ties.
///
/// Agrees with [`ProgramIndex::program_active_at`] whenever the channel's
/// programs do not overlap.
pub fn scan_active_at(channel: &Channel, time: Minute) -> Option<&Program> {
    channel
        .programs
        .iter()
        .filter(|p| p.is_airing_at(time))
        .fold(None, |best: Option<&Program>, p| match best {
            Some(b) if b.start > p.start => Some(b),
            _ => Some(p),
        })
}
