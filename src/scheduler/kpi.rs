//! Broadcast timeline metrics (KPIs).
//!
//! Computes summary indicators from a finished solution and its instance.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Coverage | Minutes on air / schedulable window |
//! | Idle minutes | Window minutes with nothing on air |
//! | Channel switches | Adjacent entries on different channels |
//! | Longest genre run | Most adjacent entries sharing a genre |
//! | Average fitness | Mean entry score |

use std::collections::BTreeMap;

use crate::index::ProgramIndex;
use crate::models::{ChannelId, InstanceData, Minute, Solution};

/// Solution performance indicators.
///
/// All time values are in minutes.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleKpi {
    /// Number of committed entries.
    pub entry_count: usize,
    /// Accumulated score.
    pub total_score: i64,
    /// Minutes on air.
    pub covered_minutes: Minute,
    /// Fraction of the window on air (0.0..1.0).
    pub coverage: f64,
    /// Window minutes with nothing on air.
    pub idle_minutes: Minute,
    /// Adjacent entries on different channels.
    pub channel_switches: usize,
    /// Minutes on air per genre. Entries with an unknown program are not counted.
    pub minutes_by_genre: BTreeMap<String, Minute>,
    /// Minutes on air per channel.
    pub minutes_by_channel: BTreeMap<ChannelId, Minute>,
    /// Longest run of adjacent entries sharing a genre.
    pub longest_genre_run: usize,
    /// Mean entry fitness (0.0 when empty).
    pub average_fitness: f64,
}

impl ScheduleKpi {
    /// Computes KPIs from a solution and the instance it was built for.
    pub fn calculate(solution: &Solution, instance: &InstanceData) -> Self {
        let index = ProgramIndex::build(instance);
        let window = instance.horizon();
        let covered = solution.broadcast_minutes();

        let genres: Vec<Option<&str>> = solution
            .entries
            .iter()
            .map(|e| {
                index
                    .program_by_unique_id(&e.unique_program_id)
                    .map(|p| p.genre.as_str())
            })
            .collect();

        let mut minutes_by_genre = BTreeMap::new();
        for (entry, genre) in solution.entries.iter().zip(&genres) {
            if let Some(genre) = genre {
                *minutes_by_genre.entry((*genre).to_string()).or_insert(0) += entry.duration();
            }
        }

        let mut longest_genre_run = 0;
        let mut run = 0;
        let mut previous: Option<&str> = None;
        for genre in &genres {
            run = match (*genre, previous) {
                (Some(g), Some(p)) if g == p => run + 1,
                (Some(_), _) => 1,
                (None, _) => 0,
            };
            longest_genre_run = longest_genre_run.max(run);
            previous = *genre;
        }

        let coverage = if window <= 0 {
            0.0
        } else {
            covered as f64 / window as f64
        };

        let average_fitness = if solution.is_empty() {
            0.0
        } else {
            solution.fitness_sum() as f64 / solution.len() as f64
        };

        Self {
            entry_count: solution.len(),
            total_score: solution.total_score,
            covered_minutes: covered,
            coverage,
            idle_minutes: (window - covered).max(0),
            channel_switches: solution.channel_switches(),
            minutes_by_genre,
            minutes_by_channel: solution.minutes_by_channel(),
            longest_genre_run,
            average_fitness,
        }
    }

    /// Whether the solution meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_coverage: f64, max_switches: usize) -> bool {
        self.coverage >= min_coverage && self.channel_switches <= max_switches
    }
}
