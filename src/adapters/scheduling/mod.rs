//! Scheduling adapters.

mod static_scheduler;

pub use static_scheduler::StaticScheduler;
