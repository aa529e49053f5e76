//! Built-in score rules.
//!
//! # Score Convention
//! Bonuses return positive values, penalties negative values, and rules that
//! do not apply return zero.

use super::{Score, ScoreRule, ScoringContext};
use crate::models::{Channel, Program};

/// The program's own score.
#[derive(Debug, Clone, Copy)]
pub struct BaseScore;

impl ScoreRule for BaseScore {
    fn name(&self) -> &'static str {
        "base"
    }

    fn evaluate(&self, _channel: &Channel, program: &Program, _context: &ScoringContext) -> Score {
        program.score
    }

    fn description(&self) -> &'static str {
        "Program base score"
    }
}

/// Sum of bonuses of all time preferences matching the program.
///
/// A preference matches when its genre equals the program's genre and its
/// interval overlaps the program's airing interval. Overlapping preferences
/// stack.
#[derive(Debug, Clone, Copy)]
pub struct TimePreferenceBonus;

impl ScoreRule for TimePreferenceBonus {
    fn name(&self) -> &'static str {
        "time-preference"
    }

    fn evaluate(&self, _channel: &Channel, program: &Program, context: &ScoringContext) -> Score {
        context
            .instance
            .time_preferences
            .iter()
            .filter(|pref| pref.applies_to(program))
            .map(|pref| pref.bonus)
            .fold(0, Score::saturating_add)
    }

    fn description(&self) -> &'static str {
        "Genre bonus for matching time preferences"
    }
}

/// Penalty for airing a different channel than the last entry.
#[derive(Debug, Clone, Copy)]
pub struct SwitchPenalty;

impl ScoreRule for SwitchPenalty {
    fn name(&self) -> &'static str {
        "switch-penalty"
    }

    fn evaluate(&self, channel: &Channel, _program: &Program, context: &ScoringContext) -> Score {
        match context.previous {
            Some(prev) if prev.channel_id != channel.channel_id => -context.instance.switch_penalty,
            _ => 0,
        }
    }

    fn description(&self) -> &'static str {
        "Channel switch penalty"
    }
}

/// Penalty for cutting off the last entry before its end.
///
/// Applies when the candidate is a different airing than the last entry and
/// starts before the last entry ends.
#[derive(Debug, Clone, Copy)]
pub struct TerminationPenalty;

impl ScoreRule for TerminationPenalty {
    fn name(&self) -> &'static str {
        "termination-penalty"
    }

    fn evaluate(&self, _channel: &Channel, program: &Program, context: &ScoringContext) -> Score {
        match context.previous {
            Some(prev) if prev.unique_program_id != program.unique_id && program.start < prev.end => {
                -context.instance.termination_penalty
            }
            _ => 0,
        }
    }

    fn description(&self) -> &'static str {
        "Early termination penalty"
    }
}
