//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here: slot overlap, conflict detection,
//! timetable geometry, and the class form rules. Dependencies flow inward.

pub mod conflict;
pub mod entities;
pub mod errors;
pub mod layout;
pub mod validation;

pub use conflict::{Conflict, ConflictDetector};
pub use entities::{
    ClassDraft, ClassInfo, ClockTime, Day, DaySet, Overlap, ScheduleOwner, WeeklySlot,
};
pub use errors::{DomainError, FieldError, ValidationErrors};
pub use layout::{LayoutConfig, PlacedBlock, TimetableLayout, format_hour};
pub use validation::validate_draft;
