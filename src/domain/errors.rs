//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use super::entities::{ClockTime, Day};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid time '{0}' (expected HH:mm, 00:00-23:59)")]
    InvalidTime(String),

    #[error("Unknown day '{0}'")]
    InvalidDay(String),

    #[error("Invalid class: {0}")]
    Invalid(ValidationErrors),

    /// First conflicting pair found; the caller decides how to surface it.
    #[error(
        "A time slot for \"{class_name}\" conflicts with \"{conflicting_with}\" on {day} ({start}-{end})"
    )]
    ScheduleConflict {
        class_name: String,
        conflicting_with: String,
        day: Day,
        start: ClockTime,
        end: ClockTime,
    },

    #[error("Class not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("UI error: {0}")]
    Ui(String),
}

/// One failed form rule. `field` uses dotted paths, e.g. `schedule.1.endTime`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every field error found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}
