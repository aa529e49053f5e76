//! Time-stepped greedy broadcast scheduler.
//!
//! # Algorithm
//!
//! Starting at the opening time, repeatedly:
//!
//! 1. Collect the channels eligible at the cursor ([`ConstraintValidator`]).
//! 2. Score each eligible channel's airing program ([`CandidateScorer`]) and
//!    take the first channel with the strictly greatest score.
//! 3. If nothing scored above zero, or the pick re-airs the last program,
//!    overlaps it, or is shorter than the minimum duration, advance the
//!    cursor by one minute.
//! 4. Otherwise commit the program and jump the cursor to its end.
//!
//! The cursor strictly increases, so the loop ends after at most
//! `closing - opening` single-minute advances interleaved with commits.
//!
//! # Complexity
//! O(T * c * (log p + g + b)) where T = horizon, c = channels, p = programs
//! per channel, g = longest genre run, b = priority blocks.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, trace};

use crate::eligibility::ConstraintValidator;
use crate::error::Result;
use crate::index::ProgramIndex;
use crate::models::{InstanceData, Minute, Program, ScheduleEntry, Solution};
use crate::scoring::{Candidate, CandidateScorer, ScoringContext};

/// Counters collected during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Loop iterations.
    pub steps: u64,
    /// Iterations that ended with a one-minute advance.
    pub idle_steps: u64,
    /// Committed entries.
    pub commits: u64,
    /// Picks discarded before commit.
    pub rejections: u64,
    /// Whether the run stopped early on the abort flag.
    pub aborted: bool,
}

/// Reason a step advanced the cursor without committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    /// No eligible channel, or no candidate scored above zero.
    NoCandidate,
    /// The pick is the program the last entry already airs.
    SameProgram,
    /// The pick starts before the last entry ends.
    Overlap,
    /// The pick is shorter than the minimum duration.
    TooShort,
}

impl Rejection {
    fn name(self) -> &'static str {
        match self {
            Rejection::NoCandidate => "no-candidate",
            Rejection::SameProgram => "same-program",
            Rejection::Overlap => "overlap",
            Rejection::TooShort => "too-short",
        }
    }
}

/// Greedy multiplex scheduler.
///
/// Runs are independent: every call builds its own [`ProgramIndex`] and
/// timeline, so one scheduler may serve many instances, also from several
/// threads.
///
/// # Example
///
/// ```
/// use tv_schedule::models::{Channel, InstanceData};
/// use tv_schedule::scheduler::GreedyScheduler;
///
/// let instance = InstanceData::new(0, 120)
///     .with_min_duration(30)
///     .with_channel(
///         Channel::new(1)
///             .with_slot("morning", 0, 60, "News", 50)
///             .with_slot("noon", 60, 120, "Sport", 40),
///     );
///
/// let solution = GreedyScheduler::new().schedule(&instance);
/// assert_eq!(solution.len(), 2);
/// assert_eq!(solution.total_score, 90);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyScheduler {
    scorer: CandidateScorer,
    abort: Option<Arc<AtomicBool>>,
}

impl GreedyScheduler {
    /// Creates a scheduler with the standard scorer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the candidate scorer.
    pub fn with_scorer(mut self, scorer: CandidateScorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Sets a flag polled once per step. When it reads `true`, the run
    /// stops and returns the entries committed so far.
    pub fn with_abort_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.abort = Some(flag);
        self
    }

    /// The configured scorer.
    pub fn scorer(&self) -> &CandidateScorer {
        &self.scorer
    }

    /// Validates the instance, then schedules it.
    ///
    /// # Errors
    /// [`crate::ScheduleError::InvalidInput`] listing every validation
    /// problem of the instance.
    pub fn solve(&self, instance: &InstanceData) -> Result<Solution> {
        instance.validate()?;
        Ok(self.schedule(instance))
    }

    /// Schedules an instance assumed valid.
    pub fn schedule(&self, instance: &InstanceData) -> Solution {
        self.schedule_with_stats(instance).0
    }

    /// Schedules an instance assumed valid and reports run counters.
    pub fn schedule_with_stats(&self, instance: &InstanceData) -> (Solution, SolveStats) {
        let index = ProgramIndex::build(instance);
        let validator = ConstraintValidator::new(instance, &index);
        let mut stats = SolveStats::default();
        let mut entries: Vec<ScheduleEntry> = Vec::new();
        let mut total_score: i64 = 0;
        let mut time = instance.opening_time;

        while time < instance.closing_time {
            if self.abort_requested() {
                stats.aborted = true;
                break;
            }
            stats.steps += 1;

            match self.pick(instance, &index, &validator, &entries, time) {
                Ok(candidate) => {
                    let program = candidate.program;
                    debug!(
                        time,
                        channel = program.channel_id,
                        program = %program.program_id,
                        start = program.start,
                        end = program.end,
                        score = candidate.score,
                        "committed"
                    );
                    entries.push(ScheduleEntry::for_program(program, candidate.score));
                    total_score = total_score.saturating_add(candidate.score);
                    stats.commits += 1;
                    time = program.end;
                }
                Err(rejection) => {
                    if rejection != Rejection::NoCandidate {
                        stats.rejections += 1;
                    }
                    trace!(time, reason = rejection.name(), "advancing");
                    stats.idle_steps += 1;
                    time += 1;
                }
            }
        }

        info!(
            entries = entries.len(),
            total_score,
            steps = stats.steps,
            rejections = stats.rejections,
            aborted = stats.aborted,
            "schedule complete"
        );
        (Solution::new(entries, total_score), stats)
    }

    fn pick<'a>(
        &self,
        instance: &InstanceData,
        index: &ProgramIndex<'a>,
        validator: &ConstraintValidator<'_>,
        entries: &[ScheduleEntry],
        time: Minute,
    ) -> std::result::Result<Candidate<'a>, Rejection> {
        let eligible = validator.eligible_channels(entries, time);
        if eligible.is_empty() {
            return Err(Rejection::NoCandidate);
        }

        let context = ScoringContext::after(instance, time, entries);
        let candidate = self
            .scorer
            .best_candidate(index, &context, &eligible)
            .filter(|c| c.score > 0)
            .ok_or(Rejection::NoCandidate)?;

        match Self::reject_reason(entries.last(), candidate.program, instance.min_duration) {
            Some(rejection) => Err(rejection),
            None => Ok(candidate),
        }
    }

    fn reject_reason(
        previous: Option<&ScheduleEntry>,
        program: &Program,
        min_duration: Minute,
    ) -> Option<Rejection> {
        if let Some(prev) = previous {
            if prev.unique_program_id == program.unique_id {
                return Some(Rejection::SameProgram);
            }
            if program.start < prev.end {
                return Some(Rejection::Overlap);
            }
        }
        if program.duration() < min_duration {
            return Some(Rejection::TooShort);
        }
        None
    }

    fn abort_requested(&self) -> bool {
        self.abort
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
