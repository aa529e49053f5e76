//! Greedy scheduler and KPI evaluation.
//!
//! # Algorithm
//!
//! `GreedyScheduler` walks a time cursor from opening to closing time. At
//! each minute it commits the best-scoring eligible channel's program and
//! jumps to that program's end, or advances one minute when nothing
//! qualifies. It is not optimal, but is fast and deterministic.
//!
//! # KPI
//!
//! `ScheduleKpi` computes timeline metrics: coverage, idle time, channel
//! switches, per-genre and per-channel airtime, and genre runs.

mod greedy;
mod kpi;

pub use greedy::{GreedyScheduler, SolveStats};
pub use kpi::ScheduleKpi;
