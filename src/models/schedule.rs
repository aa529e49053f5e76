//! Schedule (solution) model.
//!
//! A solution is the broadcast timeline: an append-only sequence of
//! committed [`ScheduleEntry`] values in increasing time order, plus the
//! accumulated score. [`Violation`] records a rule a timeline breaks; it is
//! produced by [`crate::verify`] and never by the scheduler itself.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ChannelId, Minute, Program};

/// One committed broadcast decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Channel that airs the entry.
    pub channel_id: ChannelId,
    /// Program identifier as given in the timetable.
    pub program_id: String,
    /// Instance-wide program identifier.
    pub unique_program_id: String,
    /// Program start (inclusive).
    pub start: Minute,
    /// Program end (exclusive).
    pub end: Minute,
    /// Score awarded for this entry at the moment it was committed.
    pub fitness: i64,
}

impl ScheduleEntry {
    /// Creates an entry broadcasting `program` with the given fitness.
    pub fn for_program(program: &Program, fitness: i64) -> Self {
        Self {
            channel_id: program.channel_id,
            program_id: program.program_id.clone(),
            unique_program_id: program.unique_id.clone(),
            start: program.start,
            end: program.end,
            fitness,
        }
    }

    /// Length of the entry in minutes.
    #[inline]
    pub fn duration(&self) -> Minute {
        self.end - self.start
    }
}

fn saturating_fitness_sum(entries: &[ScheduleEntry]) -> i64 {
    entries.iter().map(|e| e.fitness).fold(0, i64::saturating_add)
}

/// A finished broadcast timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Committed entries in increasing start order.
    pub entries: Vec<ScheduleEntry>,
    /// Sum of entry fitness values.
    pub total_score: i64,
}

impl Solution {
    /// Creates a solution from entries and a precomputed total.
    pub fn new(entries: Vec<ScheduleEntry>, total_score: i64) -> Self {
        Self {
            entries,
            total_score,
        }
    }

    /// Creates a solution whose total is the sum of entry fitness values.
    pub fn from_entries(entries: Vec<ScheduleEntry>) -> Self {
        let total_score = saturating_fitness_sum(&entries);
        Self {
            entries,
            total_score,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was scheduled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Last committed entry.
    pub fn last(&self) -> Option<&ScheduleEntry> {
        self.entries.last()
    }

    /// Sum of fitness values, recomputed from the entries.
    pub fn fitness_sum(&self) -> i64 {
        saturating_fitness_sum(&self.entries)
    }

    /// Total minutes on air.
    pub fn broadcast_minutes(&self) -> Minute {
        self.entries.iter().map(ScheduleEntry::duration).sum()
    }

    /// Entries aired by a given channel.
    pub fn entries_for_channel(&self, channel_id: ChannelId) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.channel_id == channel_id)
            .collect()
    }

    /// Number of adjacent entry pairs on different channels.
    pub fn channel_switches(&self) -> usize {
        self.entries
            .windows(2)
            .filter(|pair| pair[0].channel_id != pair[1].channel_id)
            .count()
    }

    /// Minutes on air per channel.
    pub fn minutes_by_channel(&self) -> BTreeMap<ChannelId, Minute> {
        let mut minutes = BTreeMap::new();
        for e in &self.entries {
            *minutes.entry(e.channel_id).or_insert(0) += e.duration();
        }
        minutes
    }
}

/// A rule broken by a timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Position of the offending entry in the timeline (`None` for
    /// timeline-wide violations).
    pub entry_index: Option<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Classification of timeline violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// `total_score` differs from the sum of entry fitness values.
    ScoreMismatch,
    /// An entry starts before the previous one ends.
    Overlap,
    /// An entry is shorter than the minimum dwell.
    TooShort,
    /// Two adjacent entries air the same program.
    RepeatedProgram,
    /// An entry airs a channel excluded by an overlapping priority block.
    PriorityBlock,
    /// A run of same-genre entries exceeds the genre cap.
    GenreRun,
    /// An entry references no program of the instance, or disagrees with it.
    UnknownProgram,
}

impl Violation {
    /// Creates a violation attached to an entry.
    pub fn at(
        violation_type: ViolationType,
        entry_index: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            violation_type,
            entry_index: Some(entry_index),
            message: message.into(),
        }
    }

    /// Creates a timeline-wide violation.
    pub fn global(violation_type: ViolationType, message: impl Into<String>) -> Self {
        Self {
            violation_type,
            entry_index: None,
            message: message.into(),
        }
    }
}
