//! Rule composition and candidate selection.

use std::sync::Arc;

use super::{rules, Score, ScoreRule, ScoringContext};
use crate::index::ProgramIndex;
use crate::models::{Channel, Program};

/// A scored candidate: a channel and the program it airs at decision time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// Position of the channel in the instance's channel list.
    pub channel_index: usize,
    /// The program airing at decision time.
    pub program: &'a Program,
    /// Net score.
    pub score: Score,
}

/// Additive composition of score rules.
///
/// The default scorer applies, in order: [`rules::BaseScore`],
/// [`rules::TimePreferenceBonus`], [`rules::SwitchPenalty`],
/// [`rules::TerminationPenalty`].
#[derive(Clone)]
pub struct CandidateScorer {
    rules: Vec<Arc<dyn ScoreRule>>,
}

impl CandidateScorer {
    /// Creates a scorer with no rules (every candidate scores zero).
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Creates the standard scorer.
    pub fn standard() -> Self {
        Self::empty()
            .with_rule(rules::BaseScore)
            .with_rule(rules::TimePreferenceBonus)
            .with_rule(rules::SwitchPenalty)
            .with_rule(rules::TerminationPenalty)
    }

    /// Adds a rule.
    pub fn with_rule<R: ScoreRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Net score of airing `program` from `channel`, saturating at the
    /// bounds of [`Score`].
    pub fn score(&self, channel: &Channel, program: &Program, context: &ScoringContext) -> Score {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(channel, program, context))
            .fold(0, Score::saturating_add)
    }

    /// Per-rule contributions, in evaluation order.
    pub fn breakdown(
        &self,
        channel: &Channel,
        program: &Program,
        context: &ScoringContext,
    ) -> Vec<(&'static str, Score)> {
        self.rules
            .iter()
            .map(|rule| (rule.name(), rule.evaluate(channel, program, context)))
            .collect()
    }

    /// Scores the channel at `channel_index` at the context's decision time.
    ///
    /// Returns `None` when the channel airs nothing at that time or the
    /// index is out of range.
    pub fn score_candidate<'a>(
        &self,
        index: &ProgramIndex<'a>,
        context: &ScoringContext<'_>,
        channel_index: usize,
    ) -> Option<Candidate<'a>> {
        let channel = context.instance.channels.get(channel_index)?;
        let program = index.active_at_index(channel_index, context.time)?;
        Some(Candidate {
            channel_index,
            program,
            score: self.score(channel, program, context),
        })
    }

    /// Highest-scoring candidate among `channel_indices`.
    ///
    /// Only a strictly greater score replaces the current best, so on ties the
    /// first candidate in iteration order wins. Channels airing nothing are
    /// skipped.
    pub fn best_candidate<'a>(
        &self,
        index: &ProgramIndex<'a>,
        context: &ScoringContext<'_>,
        channel_indices: &[usize],
    ) -> Option<Candidate<'a>> {
        let mut best: Option<Candidate<'a>> = None;
        for &idx in channel_indices {
            let Some(candidate) = self.score_candidate(index, context, idx) else {
                continue;
            };
            if best.map_or(true, |b| candidate.score > b.score) {
                best = Some(candidate);
            }
        }
        best
    }
}

impl Default for CandidateScorer {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for CandidateScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateScorer")
            .field("rules", &self.rule_names())
            .finish()
    }
}
