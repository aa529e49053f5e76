//! Broadcast scheduling domain models.
//!
//! Provides the data types for describing a multiplex scheduling problem
//! and its solution.
//!
//! # Domain Mappings
//!
//! | tv-schedule | Meaning |
//! |-------------|---------|
//! | Channel | A broadcaster with a fixed timetable |
//! | Program | One airing in a timetable |
//! | PriorityBlock | Interval where only some channels may air |
//! | TimePreference | Interval where a genre earns a bonus |
//! | InstanceData | The whole problem |
//! | ScheduleEntry | One committed pick of the multiplex |
//! | Solution | The finished timeline |

mod channel;
mod constraint;
mod instance;
mod program;
mod schedule;
mod window;

pub use channel::{Channel, ChannelId};
pub use constraint::{PriorityBlock, TimePreference};
pub use instance::{defaults, InstanceData};
pub use program::{unique_program_id, Program};
pub use schedule::{ScheduleEntry, Solution, Violation, ViolationType};
pub use window::{Minute, TimeWindow};
