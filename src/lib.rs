//! Greedy broadcast scheduling for TV multiplexes.
//!
//! Given several channels, each with a fixed timetable of programs, builds a
//! single broadcast timeline that switches between channels to maximize the
//! accumulated score while honoring a minimum dwell, a cap on consecutive
//! programs of one genre, and priority blocks that reserve intervals for a
//! subset of channels.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Program`, `Channel`, `PriorityBlock`,
//!   `TimePreference`, `InstanceData`, `ScheduleEntry`, `Solution`
//! - **`index`**: Request-scoped program lookup (`ProgramIndex`)
//! - **`eligibility`**: Per-channel legality checks (`ConstraintValidator`)
//! - **`scoring`**: Additive candidate scoring (`CandidateScorer`)
//! - **`scheduler`**: The time-stepped `GreedyScheduler` and `ScheduleKpi`
//! - **`validation`**: Input integrity checks
//! - **`verify`**: Post-hoc solution checking
//! - **`io`**: JSON request/response format
//! - **`tuning`**: Percentage-derived parameters
//! - **`generator`**: Seeded synthetic instances
//!
//! # Example
//!
//! ```
//! use tv_schedule::models::{Channel, InstanceData, PriorityBlock};
//! use tv_schedule::GreedyScheduler;
//!
//! let instance = InstanceData::new(0, 180)
//!     .with_min_duration(30)
//!     .with_priority_block(PriorityBlock::new(60, 120).allow(1))
//!     .with_channel(
//!         Channel::new(1)
//!             .with_slot("news", 0, 60, "News", 50)
//!             .with_slot("talk", 60, 120, "Talk", 30),
//!     )
//!     .with_channel(Channel::new(2).with_slot("film", 60, 180, "Film", 90));
//!
//! let solution = GreedyScheduler::new().solve(&instance).unwrap();
//! // The film overlaps the block reserved for channel 1.
//! assert!(solution.entries.iter().all(|e| e.channel_id == 1));
//! ```

pub mod eligibility;
pub mod error;
pub mod generator;
pub mod index;
pub mod io;
pub mod models;
pub mod scheduler;
pub mod scoring;
pub mod tuning;
pub mod validation;
pub mod verify;

pub use error::{Result, ScheduleError};
pub use models::{InstanceData, Solution};
pub use scheduler::{GreedyScheduler, ScheduleKpi, SolveStats};
