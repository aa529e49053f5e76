//! Candidate scoring.
//!
//! A candidate is a channel together with the program it airs at the
//! decision time. Its net score is the sum of independent score rules:
//!
//! | Rule | Contribution |
//! |------|--------------|
//! | [`rules::BaseScore`] | `program.score` |
//! | [`rules::TimePreferenceBonus`] | `+bonus` for each overlapping preference of the program's genre |
//! | [`rules::SwitchPenalty`] | `-switch_penalty` if the last entry is on another channel |
//! | [`rules::TerminationPenalty`] | `-termination_penalty` if the candidate cuts off the last entry |
//!
//! Programs always air at their timetable start, so there is no delay term.
//!
//! # Usage
//!
//! ```
//! use tv_schedule::scoring::{CandidateScorer, ScoringContext};
//! use tv_schedule::models::{Channel, InstanceData, TimePreference};
//!
//! let instance = InstanceData::new(0, 120)
//!     .with_time_preference(TimePreference::new(0, 60, "News", 5))
//!     .with_channel(Channel::new(1).with_slot("n", 0, 60, "News", 50));
//! let ctx = ScoringContext::new(&instance, 0, None);
//!
//! let scorer = CandidateScorer::default();
//! let program = &instance.channels[0].programs[0];
//! assert_eq!(scorer.score(&instance.channels[0], program, &ctx), 55);
//! ```

mod context;
pub mod rules;
mod scorer;

pub use context::ScoringContext;
pub use scorer::{Candidate, CandidateScorer};

use crate::models::{Channel, Program};
use std::fmt::Debug;

/// Score contribution of one rule.
///
/// Higher is better. Penalties contribute negative values.
pub type Score = i64;

/// A term of the candidate score.
pub trait ScoreRule: Send + Sync + Debug {
    /// Rule name (e.g., "base", "switch-penalty").
    fn name(&self) -> &'static str;

    /// Contribution of this rule for airing `program` from `channel`.
    fn evaluate(&self, channel: &Channel, program: &Program, context: &ScoringContext) -> Score;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
