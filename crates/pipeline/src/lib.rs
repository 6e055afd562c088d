//! The mower polling pipeline.
//!
//! [`PollCycle`] runs one tick: token → fetch → diff → record → notify.
//! [`Scheduler`] drives the cycle on a fixed period as a background task and
//! publishes its progress through [`PollerStatus`].

pub mod cycle;
pub mod scheduler;
pub mod status;

pub use cycle::{PollCycle, TickReport};
pub use scheduler::Scheduler;
pub use status::{PollerSnapshot, PollerStatus, SchedulerState};
