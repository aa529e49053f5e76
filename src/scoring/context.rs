//! Scoring context for rule evaluation.

use crate::models::{InstanceData, Minute, ScheduleEntry};

/// State of the simulation at a decision point, passed to score rules.
#[derive(Debug, Clone, Copy)]
pub struct ScoringContext<'a> {
    /// The instance being scheduled.
    pub instance: &'a InstanceData,
    /// Decision time.
    pub time: Minute,
    /// Last committed entry, if any.
    pub previous: Option<&'a ScheduleEntry>,
}

impl<'a> ScoringContext<'a> {
    /// Creates a context.
    pub fn new(instance: &'a InstanceData, time: Minute, previous: Option<&'a ScheduleEntry>) -> Self {
        Self {
            instance,
            time,
            previous,
        }
    }

    /// Creates a context whose previous entry is the last of `schedule`.
    pub fn after(instance: &'a InstanceData, time: Minute, schedule: &'a [ScheduleEntry]) -> Self {
        Self::new(instance, time, schedule.last())
    }
}
