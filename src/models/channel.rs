//! Channel model.

use serde::{Deserialize, Serialize};

use super::Program;

/// Numeric channel identifier.
pub type ChannelId = u32;

/// A channel and its timetable.
///
/// Programs are kept in input order. They need not be contiguous; gaps are
/// periods where the channel airs nothing the scheduler can pick up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Unique channel identifier.
    pub channel_id: ChannelId,
    /// Display name.
    pub name: String,
    /// Timetable.
    pub programs: Vec<Program>,
}

impl Channel {
    /// Creates an empty channel named `Channel {id}`.
    pub fn new(channel_id: ChannelId) -> Self {
        Self {
            channel_id,
            name: format!("Channel {channel_id}"),
            programs: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Appends a program to the timetable.
    pub fn with_program(mut self, program: Program) -> Self {
        self.programs.push(program);
        self
    }

    /// Appends a program built from its parts, owned by this channel.
    pub fn with_slot(
        self,
        program_id: impl Into<String>,
        start: i64,
        end: i64,
        genre: impl Into<String>,
        score: i64,
    ) -> Self {
        let program = Program::new(self.channel_id, program_id, start, end)
            .with_genre(genre)
            .with_score(score);
        self.with_program(program)
    }

    /// Number of programs in the timetable.
    pub fn program_count(&self) -> usize {
        self.programs.len()
    }
}
