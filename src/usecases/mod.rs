//! Application use cases. Orchestrate domain logic via ports.

pub mod schedule_service;

pub use schedule_service::{ScheduleService, TimetableEntry};
