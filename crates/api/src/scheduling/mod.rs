//! The scheduling engine: the availability gate every booking passes
//! through, the job-creation orchestration around it, and the background
//! sweeper that advances job state as time passes.

pub mod availability;
pub mod scheduler;
pub mod sweeper;
