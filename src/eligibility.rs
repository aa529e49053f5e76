//! Channel eligibility checks.
//!
//! Decides whether extending a partial schedule with a channel's currently
//! airing program is legal at a given minute. Four independent checks, run
//! in this order and short-circuiting on the first failure:
//!
//! 1. **Time window**: `opening <= t < closing` and `t + min_duration <= closing`.
//! 2. **Minimum dwell**: `t >= last.start + min_duration`. Dwell counts from
//!    the *start* of the last entry, so a switch may cut the last program short.
//! 3. **Consecutive genre**: the trailing run of entries sharing the
//!    candidate's genre, plus the candidate, must not exceed the cap.
//! 4. **Priority block**: no block overlapping the candidate program may
//!    exclude its channel.
//!
//! Checks 3 and 4 pass vacuously when the channel airs nothing at `t`.
//! A failed check is an ordinary outcome, reported as [`Eligibility`].

use std::fmt;

use tracing::trace;

use crate::index::ProgramIndex;
use crate::models::{InstanceData, Minute, Program, ScheduleEntry};

/// One of the legality checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    /// Candidate time lies outside the schedulable window.
    TimeWindow,
    /// The last entry has not been on air for `min_duration` yet.
    MinimumDwell,
    /// Too many consecutive entries of the candidate's genre.
    ConsecutiveGenre,
    /// A priority block excludes the candidate's channel.
    PriorityBlock,
}

impl Check {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Check::TimeWindow => "time-window",
            Check::MinimumDwell => "minimum-dwell",
            Check::ConsecutiveGenre => "consecutive-genre",
            Check::PriorityBlock => "priority-block",
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of an eligibility query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// Every check passed.
    Eligible,
    /// The named check failed.
    Ineligible(Check),
}

impl Eligibility {
    /// Whether every check passed.
    #[inline]
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }

    /// The failed check, if any.
    #[inline]
    pub fn failed_check(&self) -> Option<Check> {
        match self {
            Eligibility::Eligible => None,
            Eligibility::Ineligible(check) => Some(*check),
        }
    }
}

/// Evaluates eligibility against one instance through its index.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintValidator<'a> {
    instance: &'a InstanceData,
    index: &'a ProgramIndex<'a>,
}

impl<'a> ConstraintValidator<'a> {
    /// Creates a validator. `index` must have been built from `instance`.
    pub fn new(instance: &'a InstanceData, index: &'a ProgramIndex<'a>) -> Self {
        Self { instance, index }
    }

    /// Runs all checks for the channel at position `channel_index`.
    ///
    /// # Panics
    /// If `channel_index` is out of range for the instance's channel list.
    pub fn check(
        &self,
        schedule: &[ScheduleEntry],
        channel_index: usize,
        time: Minute,
    ) -> Eligibility {
        let channel = &self.instance.channels[channel_index];
        let program = self.index.active_at_index(channel_index, time);

        let failed = if !self.within_window(time) {
            Some(Check::TimeWindow)
        } else if !self.dwell_elapsed(schedule, time) {
            Some(Check::MinimumDwell)
        } else if !self.genre_run_allows(schedule, program) {
            Some(Check::ConsecutiveGenre)
        } else if !self.priority_blocks_allow(program) {
            Some(Check::PriorityBlock)
        } else {
            None
        };

        match failed {
            None => Eligibility::Eligible,
            Some(check) => {
                trace!(
                    time,
                    channel = channel.channel_id,
                    check = check.name(),
                    "channel ineligible"
                );
                Eligibility::Ineligible(check)
            }
        }
    }

    /// Whether the channel at `channel_index` may be picked at `time`.
    ///
    /// # Panics
    /// If `channel_index` is out of range for the instance's channel list.
    pub fn is_channel_eligible(
        &self,
        schedule: &[ScheduleEntry],
        channel_index: usize,
        time: Minute,
    ) -> bool {
        self.check(schedule, channel_index, time).is_eligible()
    }

    /// Positions of all eligible channels at `time`, in channel-list order.
    pub fn eligible_channels(&self, schedule: &[ScheduleEntry], time: Minute) -> Vec<usize> {
        (0..self.instance.channels.len())
            .filter(|&idx| self.is_channel_eligible(schedule, idx, time))
            .collect()
    }

    fn within_window(&self, time: Minute) -> bool {
        let inst = self.instance;
        inst.window().contains(time)
            && time
                .checked_add(inst.min_duration)
                .is_some_and(|end| end <= inst.closing_time)
    }

    fn dwell_elapsed(&self, schedule: &[ScheduleEntry], time: Minute) -> bool {
        match schedule.last() {
            Some(last) => last
                .start
                .checked_add(self.instance.min_duration)
                .is_some_and(|earliest| time >= earliest),
            None => true,
        }
    }

    fn genre_run_allows(&self, schedule: &[ScheduleEntry], program: Option<&Program>) -> bool {
        let Some(program) = program else {
            return true;
        };
        let run = self.trailing_genre_run(schedule, &program.genre);
        // The candidate extends the run by one.
        run < self.instance.max_consecutive_genre as usize
    }

    /// Length of the run of entries at the end of `schedule` whose program
    /// genre equals `genre`. Stops at an entry whose program is unknown.
    pub fn trailing_genre_run(&self, schedule: &[ScheduleEntry], genre: &str) -> usize {
        schedule
            .iter()
            .rev()
            .take_while(|entry| {
                self.index
                    .program_by_unique_id(&entry.unique_program_id)
                    .is_some_and(|p| p.genre == genre)
            })
            .count()
    }

    fn priority_blocks_allow(&self, program: Option<&Program>) -> bool {
        let Some(program) = program else {
            return true;
        };
        !self
            .instance
            .priority_blocks
            .iter()
            .any(|block| block.excludes(program))
    }
}
