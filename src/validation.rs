//! Input validation for scheduling problems.
//!
//! Checks structural integrity of an instance before scheduling. Detects:
//! - An empty or inverted broadcast window
//! - Negative durations or penalties, a genre cap below one
//! - Missing channels
//! - Duplicate channel and program identifiers
//! - Empty intervals (programs, priority blocks, time preferences)
//! - Priority blocks referencing unknown channels
//! - Programs without an id or genre
//! - Program identifiers that disagree with their channel or airing
//! - Times, durations, scores, bonuses and penalties beyond
//!   [`MAX_TIME_MAGNITUDE`] / [`MAX_SCORE_MAGNITUDE`]
//!
//! All problems are collected; validation never stops at the first one.

use std::collections::HashSet;
use std::fmt;

use crate::models::{unique_program_id, InstanceData, Minute};

/// Largest accepted absolute value of any time or duration.
pub const MAX_TIME_MAGNITUDE: Minute = 1 << 40;

/// Largest accepted absolute value of any score, bonus or penalty.
pub const MAX_SCORE_MAGNITUDE: i64 = 1 << 31;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// `closing_time` is not after `opening_time`.
    InvalidTimeWindow,
    /// A duration or penalty is negative.
    NegativeParameter,
    /// `max_consecutive_genre` is below one.
    InvalidGenreCap,
    /// The instance has no channels.
    NoChannels,
    /// Two entities share the same ID.
    DuplicateId,
    /// An interval has `start >= end`.
    EmptyInterval,
    /// A priority block allows a channel that doesn't exist.
    UnknownChannel,
    /// A required text field is empty.
    EmptyField,
    /// A program's ids disagree with its channel or airing.
    MismatchedId,
    /// A time or score lies outside the accepted range.
    OutOfRange,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a problem instance.
///
/// Checks:
/// 1. `closing_time > opening_time`
/// 2. `min_duration`, `switch_penalty`, `termination_penalty` are non-negative
/// 3. `max_consecutive_genre >= 1`
/// 4. At least one channel
/// 5. No duplicate channel IDs, no duplicate program unique IDs
/// 6. Every program, block and preference has `start < end`
/// 7. Every channel allowed by a priority block exists
/// 8. Every program has a non-empty id and genre
/// 9. Every program belongs to its channel and its `unique_id` equals
///    [`unique_program_id`] of its channel, id and start
/// 10. Times and durations stay within [`MAX_TIME_MAGNITUDE`], scores,
///     bonuses and penalties within [`MAX_SCORE_MAGNITUDE`]
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance(instance: &InstanceData) -> ValidationResult {
    let mut errors = Vec::new();

    if instance.closing_time <= instance.opening_time {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidTimeWindow,
            format!(
                "Closing time {} must be after opening time {}",
                instance.closing_time, instance.opening_time
            ),
        ));
    }

    for (name, value) in [
        ("min_duration", instance.min_duration),
        ("switch_penalty", instance.switch_penalty),
        ("termination_penalty", instance.termination_penalty),
    ] {
        if value < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeParameter,
                format!("{name} must not be negative (got {value})"),
            ));
        }
    }

    for (name, value) in [
        ("opening_time", instance.opening_time),
        ("closing_time", instance.closing_time),
        ("min_duration", instance.min_duration),
    ] {
        check_time(&mut errors, name, value);
    }
    for (name, value) in [
        ("switch_penalty", instance.switch_penalty),
        ("termination_penalty", instance.termination_penalty),
    ] {
        check_score(&mut errors, name, value);
    }

    if instance.max_consecutive_genre < 1 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidGenreCap,
            "max_consecutive_genre must be at least 1",
        ));
    }

    if instance.channels.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoChannels,
            "Instance has no channels",
        ));
    }

    let mut channel_ids = HashSet::new();
    let mut program_ids = HashSet::new();

    for channel in &instance.channels {
        if !channel_ids.insert(channel.channel_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate channel ID: {}", channel.channel_id),
            ));
        }

        for program in &channel.programs {
            if !program_ids.insert(program.unique_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate program: {}", program.unique_id),
                ));
            }

            if program.start >= program.end {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyInterval,
                    format!(
                        "Program '{}' on channel {} has start {} >= end {}",
                        program.program_id, channel.channel_id, program.start, program.end
                    ),
                ));
            }

            if program.channel_id != channel.channel_id {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MismatchedId,
                    format!(
                        "Program '{}' claims channel {} but is listed on channel {}",
                        program.program_id, program.channel_id, channel.channel_id
                    ),
                ));
            }

            let expected = unique_program_id(program.channel_id, &program.program_id, program.start);
            if program.unique_id != expected {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MismatchedId,
                    format!(
                        "Program '{}' has unique id '{}', expected '{}'",
                        program.program_id, program.unique_id, expected
                    ),
                ));
            }

            check_time(&mut errors, "program start", program.start);
            check_time(&mut errors, "program end", program.end);
            check_score(&mut errors, "program score", program.score);

            if program.program_id.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyField,
                    format!(
                        "Program starting at {} on channel {} has no id",
                        program.start, channel.channel_id
                    ),
                ));
            }

            if program.genre.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyField,
                    format!("Program '{}' has no genre", program.unique_id),
                ));
            }
        }
    }

    for block in &instance.priority_blocks {
        if block.start >= block.end {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyInterval,
                format!("Priority block {}-{} is empty", block.start, block.end),
            ));
        }

        for allowed in &block.allowed_channels {
            if !channel_ids.contains(allowed) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownChannel,
                    format!(
                        "Priority block {}-{} references unknown channel {}",
                        block.start, block.end, allowed
                    ),
                ));
            }
        }
    }

    for pref in &instance.time_preferences {
        if pref.start >= pref.end {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyInterval,
                format!(
                    "Time preference {}-{} for '{}' is empty",
                    pref.start, pref.end, pref.preferred_genre
                ),
            ));
        }
        check_score(&mut errors, "time preference bonus", pref.bonus);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_time(errors: &mut Vec<ValidationError>, name: &str, value: Minute) {
    if value.unsigned_abs() > MAX_TIME_MAGNITUDE.unsigned_abs() {
        errors.push(ValidationError::new(
            ValidationErrorKind::OutOfRange,
            format!("{name} {value} exceeds +/-{MAX_TIME_MAGNITUDE}"),
        ));
    }
}

fn check_score(errors: &mut Vec<ValidationError>, name: &str, value: i64) {
    if value.unsigned_abs() > MAX_SCORE_MAGNITUDE.unsigned_abs() {
        errors.push(ValidationError::new(
            ValidationErrorKind::OutOfRange,
            format!("{name} {value} exceeds +/-{MAX_SCORE_MAGNITUDE}"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Channel, PriorityBlock, Program, TimePreference};

    fn sample_instance() -> InstanceData {
        InstanceData::new(0, 240)
            .with_min_duration(30)
            .with_priority_block(PriorityBlock::new(60, 120).allow(1))
            .with_time_preference(TimePreference::new(0, 120, "News", 5))
            .with_channel(
                Channel::new(1)
                    .with_slot("n1", 0, 60, "News", 50)
                    .with_slot("n2", 60, 120, "News", 50),
            )
            .with_channel(Channel::new(2).with_slot("s1", 0, 90, "Sport", 60))
    }

    fn kinds(instance: &InstanceData) -> Vec<ValidationErrorKind> {
        validate_instance(instance)
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_instance(&sample_instance()).is_ok());
    }

    #[test]
    fn test_inverted_window() {
        let mut inst = sample_instance();
        inst.closing_time = inst.opening_time;
        assert!(kinds(&inst).contains(&ValidationErrorKind::InvalidTimeWindow));
    }

    #[test]
    fn test_negative_parameters() {
        let inst = sample_instance()
            .with_min_duration(-1)
            .with_switch_penalty(-5);
        let found = kinds(&inst);
        assert_eq!(
            found
                .iter()
                .filter(|k| **k == ValidationErrorKind::NegativeParameter)
                .count(),
            2
        );
    }

    #[test]
    fn test_zero_genre_cap() {
        let inst = sample_instance().with_max_consecutive_genre(0);
        assert!(kinds(&inst).contains(&ValidationErrorKind::InvalidGenreCap));
    }

    #[test]
    fn test_no_channels() {
        let inst = InstanceData::new(0, 100);
        assert!(kinds(&inst).contains(&ValidationErrorKind::NoChannels));
    }

    #[test]
    fn test_duplicate_channel_id() {
        let inst = sample_instance().with_channel(Channel::new(1));
        let errors = validate_instance(&inst).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("channel")));
    }

    #[test]
    fn test_duplicate_program() {
        let inst = InstanceData::new(0, 100).with_channel(
            Channel::new(1)
                .with_slot("p", 0, 50, "News", 10)
                .with_slot("p", 0, 50, "News", 10),
        );
        assert!(kinds(&inst).contains(&ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_empty_program_interval() {
        let inst = InstanceData::new(0, 100)
            .with_channel(Channel::new(1).with_slot("p", 50, 50, "News", 10));
        assert!(kinds(&inst).contains(&ValidationErrorKind::EmptyInterval));
    }

    #[test]
    fn test_unknown_channel_in_block() {
        let inst = sample_instance().with_priority_block(PriorityBlock::new(0, 10).allow(99));
        assert!(kinds(&inst).contains(&ValidationErrorKind::UnknownChannel));
    }

    #[test]
    fn test_empty_fields() {
        let inst = InstanceData::new(0, 100)
            .with_channel(Channel::new(1).with_program(Program::new(1, "", 0, 10).with_genre("")));
        let found = kinds(&inst);
        assert_eq!(
            found
                .iter()
                .filter(|k| **k == ValidationErrorKind::EmptyField)
                .count(),
            2
        );
    }

    #[test]
    fn test_mismatched_ids() {
        let mut inst = sample_instance();
        inst.channels[0].programs[0].unique_id = "1_n1_999".to_string();
        inst.channels[1].programs[0].channel_id = 1;
        let errors = validate_instance(&inst).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::MismatchedId)
                .count(),
            3
        );
    }

    #[test]
    fn test_deserialized_unique_id_checked() {
        let mut value = serde_json::to_value(sample_instance()).unwrap();
        value["channels"][0]["programs"][0]["unique_id"] = "forged".into();
        let inst: InstanceData = serde_json::from_value(value).unwrap();
        assert!(kinds(&inst).contains(&ValidationErrorKind::MismatchedId));
    }

    #[test]
    fn test_extreme_times_rejected() {
        let inst = InstanceData::new(i64::MAX - 100, i64::MAX)
            .with_channel(Channel::new(1).with_slot("p", i64::MAX - 100, i64::MAX - 10, "News", 10));
        let found = kinds(&inst);
        assert!(found.contains(&ValidationErrorKind::OutOfRange));
        assert!(!found.contains(&ValidationErrorKind::InvalidTimeWindow));

        let at_limit = InstanceData::new(0, MAX_TIME_MAGNITUDE)
            .with_channel(Channel::new(1).with_slot("p", 0, MAX_TIME_MAGNITUDE, "News", 10));
        assert!(validate_instance(&at_limit).is_ok());
    }

    #[test]
    fn test_extreme_scores_rejected() {
        let inst = sample_instance()
            .with_switch_penalty(i64::MAX)
            .with_time_preference(TimePreference::new(0, 60, "News", i64::MIN))
            .with_channel(Channel::new(3).with_slot("big", 0, 60, "News", i64::MAX));
        let found = kinds(&inst);
        assert_eq!(
            found
                .iter()
                .filter(|k| **k == ValidationErrorKind::OutOfRange)
                .count(),
            3
        );
    }

    #[test]
    fn test_multiple_errors() {
        let inst = InstanceData::new(10, 0)
            .with_max_consecutive_genre(0)
            .with_time_preference(TimePreference::new(5, 1, "News", 1));
        let errors = validate_instance(&inst).unwrap_err();
        assert!(errors.len() >= 4);
    }
}
