//! JSON wire format.
//!
//! Requests describe an instance with snake_case fields; responses list the
//! scheduled programs and the total score. The DTOs here mirror the wire
//! shape and convert to and from the domain models, which carry derived data
//! (unique program ids) the wire format leaves implicit.
//!
//! # Request
//! ```json
//! {
//!   "opening_time": 480, "closing_time": 1380, "min_duration": 30,
//!   "max_consecutive_genre": 2, "switch_penalty": 10, "termination_penalty": 20,
//!   "priority_blocks": [{"start": 600, "end": 660, "allowed_channels": [1]}],
//!   "time_preferences": [{"start": 480, "end": 720, "preferred_genre": "news", "bonus": 5}],
//!   "channels": [{"channel_id": 1, "channel_name": "One", "programs": [
//!     {"program_id": "p", "start": 480, "end": 540, "genre": "news", "score": 60}
//!   ]}]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScheduleError};
use crate::models::{
    defaults, Channel, ChannelId, InstanceData, Minute, PriorityBlock, Program, Solution,
    TimePreference,
};

fn default_min_duration() -> Minute {
    defaults::MIN_DURATION
}

fn default_max_consecutive_genre() -> u32 {
    defaults::MAX_CONSECUTIVE_GENRE
}

fn default_switch_penalty() -> i64 {
    defaults::SWITCH_PENALTY
}

fn default_termination_penalty() -> i64 {
    defaults::TERMINATION_PENALTY
}

/// Scheduling request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceRequest {
    /// Start of the schedulable window.
    pub opening_time: Minute,
    /// End of the schedulable window (exclusive).
    pub closing_time: Minute,
    /// Minimum dwell, also the shortest program that may be committed.
    #[serde(default = "default_min_duration")]
    pub min_duration: Minute,
    /// Longest allowed run of one genre.
    #[serde(default = "default_max_consecutive_genre")]
    pub max_consecutive_genre: u32,
    /// Informational; the channel list is authoritative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels_count: Option<usize>,
    /// Cost of switching to another channel.
    #[serde(default = "default_switch_penalty")]
    pub switch_penalty: i64,
    /// Cost of cutting off the current program.
    #[serde(default = "default_termination_penalty")]
    pub termination_penalty: i64,
    /// Intervals reserved for a subset of channels.
    #[serde(default)]
    pub priority_blocks: Vec<PriorityBlockDto>,
    /// Genre bonuses by time of day.
    #[serde(default)]
    pub time_preferences: Vec<TimePreferenceDto>,
    /// Channel timetables.
    #[serde(default)]
    pub channels: Vec<ChannelDto>,
}

/// Wire form of a [`PriorityBlock`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityBlockDto {
    /// Block start.
    pub start: Minute,
    /// Block end (exclusive).
    pub end: Minute,
    /// Channels that may air during the block.
    #[serde(default)]
    pub allowed_channels: Vec<ChannelId>,
}

/// Wire form of a [`TimePreference`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePreferenceDto {
    /// Preference start.
    pub start: Minute,
    /// Preference end (exclusive).
    pub end: Minute,
    /// Genre that earns the bonus.
    pub preferred_genre: String,
    /// Bonus per matching program.
    #[serde(default)]
    pub bonus: i64,
}

/// Wire form of a [`Channel`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelDto {
    /// Channel identifier.
    pub channel_id: ChannelId,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,
    /// Timetable.
    #[serde(default)]
    pub programs: Vec<ProgramDto>,
}

/// Wire form of a [`Program`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramDto {
    /// Identifier within the channel.
    pub program_id: String,
    /// Air start.
    pub start: Minute,
    /// Air end (exclusive).
    pub end: Minute,
    /// Genre tag.
    pub genre: String,
    /// Base score.
    pub score: i64,
}

/// Scheduling response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    /// Committed programs in broadcast order.
    pub scheduled_programs: Vec<ScheduledProgramDto>,
    /// Sum of entry fitness values.
    pub total_score: i64,
}

/// One committed program in a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledProgramDto {
    /// Identifier within the channel.
    pub program_id: String,
    /// Channel the program airs on.
    pub channel_id: ChannelId,
    /// Air start.
    pub start: Minute,
    /// Air end (exclusive).
    pub end: Minute,
}

impl InstanceRequest {
    /// Converts to a domain instance without validating it.
    pub fn into_instance(self) -> InstanceData {
        let mut instance = InstanceData::new(self.opening_time, self.closing_time)
            .with_min_duration(self.min_duration)
            .with_max_consecutive_genre(self.max_consecutive_genre)
            .with_switch_penalty(self.switch_penalty)
            .with_termination_penalty(self.termination_penalty);

        for block in self.priority_blocks {
            instance = instance
                .with_priority_block(PriorityBlock::new(block.start, block.end).allow_all(block.allowed_channels));
        }
        for pref in self.time_preferences {
            instance = instance.with_time_preference(TimePreference::new(
                pref.start,
                pref.end,
                pref.preferred_genre,
                pref.bonus,
            ));
        }
        for dto in self.channels {
            let mut channel = Channel::new(dto.channel_id);
            if let Some(name) = dto.channel_name {
                channel = channel.with_name(name);
            }
            for p in dto.programs {
                channel = channel.with_program(
                    Program::new(dto.channel_id, p.program_id, p.start, p.end)
                        .with_genre(p.genre)
                        .with_score(p.score),
                );
            }
            instance = instance.with_channel(channel);
        }
        instance
    }
}

impl TryFrom<InstanceRequest> for InstanceData {
    type Error = ScheduleError;

    fn try_from(request: InstanceRequest) -> Result<Self> {
        let instance = request.into_instance();
        instance.validate()?;
        Ok(instance)
    }
}

impl From<&InstanceData> for InstanceRequest {
    fn from(instance: &InstanceData) -> Self {
        Self {
            opening_time: instance.opening_time,
            closing_time: instance.closing_time,
            min_duration: instance.min_duration,
            max_consecutive_genre: instance.max_consecutive_genre,
            channels_count: Some(instance.channels.len()),
            switch_penalty: instance.switch_penalty,
            termination_penalty: instance.termination_penalty,
            priority_blocks: instance
                .priority_blocks
                .iter()
                .map(|b| PriorityBlockDto {
                    start: b.start,
                    end: b.end,
                    allowed_channels: b.allowed_channels.iter().copied().collect(),
                })
                .collect(),
            time_preferences: instance
                .time_preferences
                .iter()
                .map(|p| TimePreferenceDto {
                    start: p.start,
                    end: p.end,
                    preferred_genre: p.preferred_genre.clone(),
                    bonus: p.bonus,
                })
                .collect(),
            channels: instance
                .channels
                .iter()
                .map(|c| ChannelDto {
                    channel_id: c.channel_id,
                    channel_name: Some(c.name.clone()),
                    programs: c
                        .programs
                        .iter()
                        .map(|p| ProgramDto {
                            program_id: p.program_id.clone(),
                            start: p.start,
                            end: p.end,
                            genre: p.genre.clone(),
                            score: p.score,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl From<&Solution> for ScheduleResponse {
    fn from(solution: &Solution) -> Self {
        Self {
            scheduled_programs: solution
                .entries
                .iter()
                .map(|e| ScheduledProgramDto {
                    program_id: e.program_id.clone(),
                    channel_id: e.channel_id,
                    start: e.start,
                    end: e.end,
                })
                .collect(),
            total_score: solution.total_score,
        }
    }
}

/// Parses and validates a JSON request.
///
/// # Errors
/// [`ScheduleError::Json`] on malformed JSON, [`ScheduleError::InvalidInput`]
/// when the instance fails validation.
pub fn parse_instance(json: &str) -> Result<InstanceData> {
    let request: InstanceRequest = serde_json::from_str(json)?;
    InstanceData::try_from(request)
}

/// Reads, parses and validates a JSON request file.
pub fn load_instance(path: impl AsRef<Path>) -> Result<InstanceData> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let instance = parse_instance(&json)?;
    debug!(
        path = %path.display(),
        channels = instance.channels.len(),
        programs = instance.program_count(),
        "loaded instance"
    );
    Ok(instance)
}

/// Wire response for a solution.
pub fn to_response(solution: &Solution) -> ScheduleResponse {
    ScheduleResponse::from(solution)
}

/// Pretty-printed JSON response for a solution.
pub fn response_json(solution: &Solution) -> Result<String> {
    Ok(serde_json::to_string_pretty(&to_response(solution))?)
}

/// Writes the JSON response for a solution.
pub fn write_response(path: impl AsRef<Path>, solution: &Solution) -> Result<()> {
    fs::write(path, response_json(solution)?)?;
    Ok(())
}

/// Pretty-printed JSON request for an instance.
pub fn instance_json(instance: &InstanceData) -> Result<String> {
    Ok(serde_json::to_string_pretty(&InstanceRequest::from(instance))?)
}

/// Writes an instance as a JSON request.
pub fn write_instance(path: impl AsRef<Path>, instance: &InstanceData) -> Result<()> {
    fs::write(path, instance_json(instance)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{generate_instance, GeneratorConfig};
    use crate::models::ScheduleEntry;
    use crate::validation::ValidationErrorKind;

    const REQUEST: &str = r#"{
        "opening_time": 0,
        "closing_time": 120,
        "min_duration": 20,
        "max_consecutive_genre": 1,
        "channels_count": 2,
        "switch_penalty": 5,
        "termination_penalty": 15,
        "priority_blocks": [{"start": 60, "end": 90, "allowed_channels": [1]}],
        "time_preferences": [{"start": 0, "end": 60, "preferred_genre": "news", "bonus": 3}],
        "channels": [
            {"channel_id": 1, "channel_name": "One", "programs": [
                {"program_id": "a", "start": 0, "end": 60, "genre": "news", "score": 50}
            ]},
            {"channel_id": 2, "programs": [
                {"program_id": "b", "start": 60, "end": 120, "genre": "film", "score": 40}
            ]}
        ]
    }"#;

    #[test]
    fn test_parse_request() {
        let inst = parse_instance(REQUEST).unwrap();
        assert_eq!(inst.window().duration(), 120);
        assert_eq!(inst.min_duration, 20);
        assert_eq!(inst.max_consecutive_genre, 1);
        assert_eq!(inst.switch_penalty, 5);
        assert_eq!(inst.termination_penalty, 15);
        assert!(inst.priority_blocks[0].allows(1));
        assert!(!inst.priority_blocks[0].allows(2));
        assert_eq!(inst.time_preferences[0].bonus, 3);

        assert_eq!(inst.channels[0].name, "One");
        assert_eq!(inst.channels[1].name, "Channel 2");
        assert_eq!(inst.channels[1].programs[0].unique_id, "2_b_60");
        assert_eq!(inst.channels[1].programs[0].channel_id, 2);
    }

    #[test]
    fn test_defaults_applied() {
        let json = r#"{
            "opening_time": 0,
            "closing_time": 60,
            "time_preferences": [{"start": 0, "end": 60, "preferred_genre": "news"}],
            "channels": [{"channel_id": 1}]
        }"#;
        let inst = parse_instance(json).unwrap();
        assert_eq!(inst.min_duration, defaults::MIN_DURATION);
        assert_eq!(inst.max_consecutive_genre, defaults::MAX_CONSECUTIVE_GENRE);
        assert_eq!(inst.switch_penalty, defaults::SWITCH_PENALTY);
        assert_eq!(inst.termination_penalty, defaults::TERMINATION_PENALTY);
        assert_eq!(inst.time_preferences[0].bonus, 0);
        assert!(inst.channels[0].programs.is_empty());
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_instance("{ not json").unwrap_err();
        assert!(matches!(err, ScheduleError::Json(_)));
    }

    #[test]
    fn test_invalid_instance_rejected() {
        let json = r#"{"opening_time": 100, "closing_time": 50, "channels": []}"#;
        match parse_instance(json).unwrap_err() {
            ScheduleError::InvalidInput(errors) => {
                let kinds: Vec<_> = errors.iter().map(|e| e.kind).collect();
                assert!(kinds.contains(&ValidationErrorKind::InvalidTimeWindow));
                assert!(kinds.contains(&ValidationErrorKind::NoChannels));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_response_shape() {
        let program = Program::new(3, "show", 10, 70);
        let solution = Solution::from_entries(vec![ScheduleEntry::for_program(&program, 42)]);
        let value: serde_json::Value = serde_json::from_str(&response_json(&solution).unwrap()).unwrap();

        assert_eq!(value["total_score"], 42);
        let entry = &value["scheduled_programs"][0];
        assert_eq!(entry["program_id"], "show");
        assert_eq!(entry["channel_id"], 3);
        assert_eq!(entry["start"], 10);
        assert_eq!(entry["end"], 70);
    }

    #[test]
    fn test_generated_instance_survives_wire() {
        let inst = generate_instance(&GeneratorConfig::default().with_channels(3).with_seed(5));
        let parsed = parse_instance(&instance_json(&inst).unwrap()).unwrap();
        assert_eq!(parsed, inst);
    }
}
