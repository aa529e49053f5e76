//! Seeded synthetic instance generator.
//!
//! Fills every channel's window with back-to-back programs of random length
//! and score. Channels cycle through three genres, each with its own base
//! score, so generated instances exercise the genre cap, switch penalty and
//! time preferences together.
//!
//! Generation is deterministic for a given seed. Category and channel
//! filters drop generated channels without changing the timetables of the
//! ones kept; a filter that would drop every channel is ignored.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::models::{defaults, Channel, ChannelId, InstanceData, Minute, PriorityBlock, Program, TimePreference};

/// Generated genres and their base scores, in channel order.
pub const GENRE_SCORES: [(&str, i64); 3] = [("technology", 75), ("science", 85), ("climate", 78)];

/// Lowest score a generated program can have.
pub const MIN_PROGRAM_SCORE: i64 = 40;

/// Maximum random extension of a program beyond the minimum duration.
const MAX_EXTRA_DURATION: Minute = 60;

/// Maximum absolute random score jitter.
const SCORE_JITTER: i64 = 10;

/// Generator parameters.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Number of channels.
    pub channels: usize,
    /// RNG seed.
    pub seed: u64,
    /// Opening time.
    pub opening_time: Minute,
    /// Closing time.
    pub closing_time: Minute,
    /// Minimum program duration, also the instance's minimum dwell.
    pub min_duration: Minute,
    /// Genre cap of the instance.
    pub max_consecutive_genre: u32,
    /// Switch penalty of the instance.
    pub switch_penalty: i64,
    /// Termination penalty of the instance.
    pub termination_penalty: i64,
    /// Whether to attach [`default_time_preferences`].
    pub time_preferences: bool,
    /// Priority blocks copied into the instance.
    pub priority_blocks: Vec<PriorityBlock>,
    /// Keep only channels of these genres (case-insensitive). Empty keeps all.
    pub categories: Vec<String>,
    /// Keep only channels with these ids. Empty keeps all.
    pub channel_ids: Vec<ChannelId>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            channels: defaults::CHANNELS_COUNT,
            seed: 42,
            opening_time: defaults::OPENING_TIME,
            closing_time: defaults::CLOSING_TIME,
            min_duration: defaults::MIN_DURATION,
            max_consecutive_genre: defaults::MAX_CONSECUTIVE_GENRE,
            switch_penalty: defaults::SWITCH_PENALTY,
            termination_penalty: defaults::TERMINATION_PENALTY,
            time_preferences: true,
            priority_blocks: Vec::new(),
            categories: Vec::new(),
            channel_ids: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Sets the channel count.
    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the schedulable window.
    pub fn with_window(mut self, opening_time: Minute, closing_time: Minute) -> Self {
        self.opening_time = opening_time;
        self.closing_time = closing_time;
        self
    }

    /// Sets the minimum program duration.
    pub fn with_min_duration(mut self, min_duration: Minute) -> Self {
        self.min_duration = min_duration;
        self
    }

    /// Sets the genre cap copied into the instance.
    pub fn with_max_consecutive_genre(mut self, max_consecutive_genre: u32) -> Self {
        self.max_consecutive_genre = max_consecutive_genre;
        self
    }

    /// Sets the switch and termination penalties.
    pub fn with_penalties(mut self, switch_penalty: i64, termination_penalty: i64) -> Self {
        self.switch_penalty = switch_penalty;
        self.termination_penalty = termination_penalty;
        self
    }

    /// Enables or disables the default time preferences.
    pub fn with_time_preferences(mut self, enabled: bool) -> Self {
        self.time_preferences = enabled;
        self
    }

    /// Adds a priority block.
    pub fn with_priority_block(mut self, block: PriorityBlock) -> Self {
        self.priority_blocks.push(block);
        self
    }

    /// Restricts the instance to channels of the given genres.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts the instance to the given channel ids.
    pub fn with_channel_ids(mut self, channel_ids: impl IntoIterator<Item = ChannelId>) -> Self {
        self.channel_ids = channel_ids.into_iter().collect();
        self
    }

    fn keeps(&self, channel: &Channel, genre: &str) -> bool {
        let category_ok = self.categories.is_empty()
            || self.categories.iter().any(|c| c.eq_ignore_ascii_case(genre));
        let id_ok = self.channel_ids.is_empty() || self.channel_ids.contains(&channel.channel_id);
        category_ok && id_ok
    }
}

/// Morning technology, afternoon science, evening climate; +4 each.
pub fn default_time_preferences() -> Vec<TimePreference> {
    vec![
        TimePreference::new(480, 720, "technology", 4),
        TimePreference::new(720, 960, "science", 4),
        TimePreference::new(960, 1200, "climate", 4),
    ]
}

/// Generates an instance.
///
/// # Example
/// ```
/// use tv_schedule::generator::{generate_instance, GeneratorConfig};
///
/// let instance = generate_instance(&GeneratorConfig::default().with_channels(3).with_seed(1));
/// assert_eq!(instance.channels.len(), 3);
/// assert!(instance.validate().is_ok());
/// ```
pub fn generate_instance(config: &GeneratorConfig) -> InstanceData {
    let mut rng = StdRng::seed_from_u64(config.seed);

    let mut instance = InstanceData::new(config.opening_time, config.closing_time)
        .with_min_duration(config.min_duration)
        .with_max_consecutive_genre(config.max_consecutive_genre)
        .with_switch_penalty(config.switch_penalty)
        .with_termination_penalty(config.termination_penalty);

    if config.time_preferences {
        instance.time_preferences = default_time_preferences();
    }
    instance.priority_blocks = config.priority_blocks.clone();

    let mut kept = Vec::new();
    let mut dropped = Vec::new();
    for c in 0..config.channels {
        let (genre, base) = GENRE_SCORES[c % GENRE_SCORES.len()];
        let channel_id = c as ChannelId;
        let name = format!("{genre}-{}", c / GENRE_SCORES.len() + 1);
        let mut channel = Channel::new(channel_id).with_name(name.clone());

        let mut current = config.opening_time;
        let mut k = 0;
        while current < config.closing_time {
            let remaining = config.closing_time - current;
            if remaining < config.min_duration {
                break;
            }
            let extra = rng.random_range(0..=MAX_EXTRA_DURATION);
            let duration = (config.min_duration + extra).min(remaining).max(1);
            let jitter = rng.random_range(-SCORE_JITTER..=SCORE_JITTER);
            let score = (base + jitter).max(MIN_PROGRAM_SCORE);

            channel = channel.with_program(
                Program::new(channel_id, format!("{name}_program_{k}"), current, current + duration)
                    .with_genre(genre)
                    .with_score(score),
            );
            current += duration;
            k += 1;
        }
        if config.keeps(&channel, genre) {
            kept.push(channel);
        } else {
            dropped.push(channel);
        }
    }

    if kept.is_empty() && !dropped.is_empty() {
        warn!(
            categories = ?config.categories,
            channel_ids = ?config.channel_ids,
            "channel filters matched nothing, keeping all channels"
        );
        kept = dropped;
    }
    instance.channels = kept;

    instance
}
