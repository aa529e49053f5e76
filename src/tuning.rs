//! Parameters derived from the timetable.
//!
//! Lets a caller size the minimum dwell and the switch penalty relative to
//! the programs of an instance rather than in absolute minutes and points,
//! and decide from a category selection whether the default time
//! preferences apply.

use crate::error::Result;
use crate::generator::{default_time_preferences, GENRE_SCORES};
use crate::models::{InstanceData, Minute};

/// `max(0, round(value * pct / 100))`, rounding half to even.
pub fn pct_of(value: f64, pct: u32) -> i64 {
    let scaled = (value * f64::from(pct) / 100.0).round_ties_even();
    (scaled as i64).max(0)
}

/// Whether `categories` names every default genre, ignoring case.
pub fn covers_default_categories<S: AsRef<str>>(categories: &[S]) -> bool {
    GENRE_SCORES.iter().all(|(genre, _)| {
        categories
            .iter()
            .any(|c| c.as_ref().eq_ignore_ascii_case(genre))
    })
}

/// Overrides for an instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TuningParams {
    /// Minimum dwell as a percentage of the shortest program.
    pub min_duration_pct: Option<u32>,
    /// Switch penalty as a percentage of the average program score.
    pub switch_penalty_pct: Option<u32>,
    /// Selected categories. When set, the instance gets the default time
    /// preferences if the selection covers every default genre and no time
    /// preferences otherwise.
    pub category_filter: Option<Vec<String>>,
}

impl TuningParams {
    /// No overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum dwell percentage.
    pub fn with_min_duration_pct(mut self, pct: u32) -> Self {
        self.min_duration_pct = Some(pct);
        self
    }

    /// Sets the switch penalty percentage.
    pub fn with_switch_penalty_pct(mut self, pct: u32) -> Self {
        self.switch_penalty_pct = Some(pct);
        self
    }

    /// Sets the category selection.
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.category_filter = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Whether no override is set.
    pub fn is_empty(&self) -> bool {
        self.min_duration_pct.is_none()
            && self.switch_penalty_pct.is_none()
            && self.category_filter.is_none()
    }

    /// Returns a copy of `instance` with the overrides applied, validated.
    ///
    /// A zero percentage counts as unset.
    ///
    /// # Errors
    /// [`crate::ScheduleError::InvalidInput`] if the tuned instance is invalid.
    pub fn apply(&self, instance: &InstanceData) -> Result<InstanceData> {
        let mut tuned = instance.clone();

        if let Some(pct) = self.min_duration_pct.filter(|&p| p > 0) {
            let shortest = shortest_duration(instance).unwrap_or(instance.min_duration);
            tuned.min_duration = pct_of(shortest as f64, pct).max(1);
        }

        if let Some(pct) = self.switch_penalty_pct.filter(|&p| p > 0) {
            tuned.switch_penalty = pct_of(average_score(instance), pct);
        }

        if let Some(categories) = &self.category_filter {
            tuned.time_preferences = if covers_default_categories(categories) {
                default_time_preferences()
            } else {
                Vec::new()
            };
        }

        tuned.validate()?;
        Ok(tuned)
    }
}

/// Shortest program duration across all channels.
pub fn shortest_duration(instance: &InstanceData) -> Option<Minute> {
    instance
        .channels
        .iter()
        .flat_map(|c| c.programs.iter())
        .map(|p| p.duration())
        .min()
}

/// Mean program base score across all channels (0.0 without programs).
pub fn average_score(instance: &InstanceData) -> f64 {
    let count = instance.program_count();
    if count == 0 {
        return 0.0;
    }
    let sum: i64 = instance
        .channels
        .iter()
        .flat_map(|c| c.programs.iter())
        .map(|p| p.score)
        .sum();
    sum as f64 / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Channel, TimePreference};

    fn instance() -> InstanceData {
        InstanceData::new(0, 300)
            .with_min_duration(30)
            .with_switch_penalty(10)
            .with_channel(
                Channel::new(1)
                    .with_slot("a", 0, 45, "News", 60)
                    .with_slot("b", 45, 165, "News", 90),
            )
            .with_channel(Channel::new(2).with_slot("c", 0, 90, "Film", 75))
    }

    #[test]
    fn test_pct_of() {
        assert_eq!(pct_of(200.0, 10), 20);
        assert_eq!(pct_of(45.0, 50), 22); // 22.5 rounds to even
        assert_eq!(pct_of(47.0, 50), 24); // 23.5 rounds to even
        assert_eq!(pct_of(-10.0, 50), 0);
        assert_eq!(pct_of(0.0, 100), 0);
    }

    #[test]
    fn test_statistics() {
        let inst = instance();
        assert_eq!(shortest_duration(&inst), Some(45));
        assert!((average_score(&inst) - 75.0).abs() < 1e-10);

        let empty = InstanceData::new(0, 10).with_channel(Channel::new(1));
        assert_eq!(shortest_duration(&empty), None);
        assert!((average_score(&empty) - 0.0).abs() < 1e-10);
    }

    #[test]
    fn test_apply() {
        let inst = instance();
        let tuned = TuningParams::new()
            .with_min_duration_pct(50)
            .with_switch_penalty_pct(20)
            .apply(&inst)
            .unwrap();
        assert_eq!(tuned.min_duration, 22);
        assert_eq!(tuned.switch_penalty, 15);
        // Input untouched.
        assert_eq!(inst.min_duration, 30);
        assert_eq!(inst.switch_penalty, 10);
    }

    #[test]
    fn test_min_duration_floor() {
        let tuned = TuningParams::new()
            .with_min_duration_pct(1)
            .apply(&instance())
            .unwrap();
        assert_eq!(tuned.min_duration, 1);
    }

    #[test]
    fn test_zero_and_empty() {
        let inst = instance();
        assert!(TuningParams::new().is_empty());
        assert_eq!(TuningParams::new().apply(&inst).unwrap(), inst);

        let zero = TuningParams::new().with_min_duration_pct(0).with_switch_penalty_pct(0);
        assert_eq!(zero.apply(&inst).unwrap(), inst);
    }

    #[test]
    fn test_covers_default_categories() {
        assert!(covers_default_categories(&["climate", "Science", "TECHNOLOGY"]));
        assert!(covers_default_categories(&["technology", "science", "climate", "sport"]));
        assert!(!covers_default_categories(&["technology", "science"]));
        assert!(!covers_default_categories::<&str>(&[]));
    }

    #[test]
    fn test_category_filter_all_three() {
        let inst = instance().with_time_preference(TimePreference::new(0, 60, "News", 9));
        let tuned = TuningParams::new()
            .with_categories(["technology", "science", "climate"])
            .apply(&inst)
            .unwrap();
        assert_eq!(tuned.time_preferences, default_time_preferences());
    }

    #[test]
    fn test_category_filter_subset_and_empty() {
        let inst = instance().with_time_preference(TimePreference::new(0, 60, "News", 9));

        let subset = TuningParams::new()
            .with_categories(["technology", "climate"])
            .apply(&inst)
            .unwrap();
        assert!(subset.time_preferences.is_empty());

        let empty = TuningParams::new()
            .with_categories(Vec::<String>::new())
            .apply(&inst)
            .unwrap();
        assert!(empty.time_preferences.is_empty());

        // Without a selection the instance keeps its own preferences.
        let untouched = TuningParams::new().apply(&inst).unwrap();
        assert_eq!(untouched.time_preferences, inst.time_preferences);
    }

    #[test]
    fn test_apply_validates() {
        let broken = InstanceData::new(10, 0);
        assert!(TuningParams::new().with_switch_penalty_pct(10).apply(&broken).is_err());
    }
}
