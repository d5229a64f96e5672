//! Class form rules. Runs before anything reaches conflict detection or layout.

use super::entities::ClassDraft;
use super::errors::{DomainError, ValidationErrors};

const MIN_TEXT_LEN: usize = 2;

/// Checks every rule and reports all failures together.
pub fn validate_draft(draft: &ClassDraft) -> Result<(), DomainError> {
    let mut errors = ValidationErrors::default();

    for (field, label, value) in [
        ("name", "Name", &draft.name),
        ("code", "Code", &draft.code),
        ("instructor", "Instructor name", &draft.instructor),
        ("location", "Location", &draft.location),
    ] {
        if value.trim().chars().count() < MIN_TEXT_LEN {
            errors.push(
                field,
                format!("{} must be at least {} characters.", label, MIN_TEXT_LEN),
            );
        }
    }

    if !is_hex_color(&draft.accent_color) {
        errors.push("accentColor", "Must be a valid hex color.");
    }

    if draft.schedule.is_empty() {
        errors.push("schedule", "Please add at least one time slot.");
    }
    for (i, slot) in draft.schedule.iter().enumerate() {
        if slot.days.is_empty() {
            errors.push(format!("schedule.{}.days", i), "Select at least one day.");
        } else if slot.day_set().len() != slot.days.len() {
            errors.push(format!("schedule.{}.days", i), "Each day can only be selected once.");
        }
        if slot.start_time >= slot.end_time {
            errors.push(
                format!("schedule.{}.endTime", i),
                "End time must be after start time.",
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Invalid(errors))
    }
}

/// `#RRGGBB`, case-insensitive.
pub fn is_hex_color(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].bytes().all(|b| b.is_ascii_hexdigit())
}
