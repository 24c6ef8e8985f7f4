//! Timeline scheduling: transport state and the tick-driven scheduler

pub mod timeline_scheduler;
pub mod transport;

pub use timeline_scheduler::*;
pub use transport::*;
