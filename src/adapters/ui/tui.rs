//! Implements InputPort. Inquire-based interactive menu.
//!
//! Service errors (validation, conflicts, missing classes) are printed and the
//! menu continues; only a failing terminal ends the session.

use super::render;
use crate::domain::validation::is_hex_color;
use crate::domain::{ClassDraft, ClassInfo, ClockTime, Day, DomainError, WeeklySlot};
use crate::ports::InputPort;
use crate::usecases::ScheduleService;
use async_trait::async_trait;
use inquire::validator::Validation;
use inquire::{Confirm, InquireError, MultiSelect, Select, Text};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

const DEFAULT_ACCENT: &str = "#8B5CF6";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    ViewClasses,
    AddClass,
    EditClass,
    DeleteClass,
    Timetable,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 6] = [
        MenuItem::ViewClasses,
        MenuItem::AddClass,
        MenuItem::EditClass,
        MenuItem::DeleteClass,
        MenuItem::Timetable,
        MenuItem::Quit,
    ];
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuItem::ViewClasses => "View classes",
            MenuItem::AddClass => "Add class",
            MenuItem::EditClass => "Edit class",
            MenuItem::DeleteClass => "Delete class",
            MenuItem::Timetable => "Timetable",
            MenuItem::Quit => "Quit",
        };
        f.write_str(label)
    }
}

fn ui_err(e: InquireError) -> DomainError {
    DomainError::Ui(e.to_string())
}

fn ask_text(label: &str, default: Option<&str>) -> Result<String, DomainError> {
    let mut prompt = Text::new(label);
    if let Some(d) = default {
        prompt = prompt.with_default(d);
    }
    prompt.prompt().map_err(ui_err)
}

fn ask_time(label: &str, default: Option<ClockTime>) -> Result<ClockTime, DomainError> {
    let default = default.map(|t| t.to_string());
    let mut prompt = Text::new(label)
        .with_placeholder("HH:mm")
        .with_validator(|input: &str| {
            Ok(match input.trim().parse::<ClockTime>() {
                Ok(_) => Validation::Valid,
                Err(e) => Validation::Invalid(e.to_string().into()),
            })
        });
    if let Some(d) = default.as_deref() {
        prompt = prompt.with_default(d);
    }
    prompt.prompt().map_err(ui_err)?.trim().parse()
}

fn ask_slot(number: usize, current: Option<&WeeklySlot>) -> Result<WeeklySlot, DomainError> {
    let preselected: Vec<usize> = current
        .map(|s| {
            Day::ALL
                .iter()
                .enumerate()
                .filter(|(_, d)| s.days.contains(d))
                .map(|(i, _)| i)
                .collect()
        })
        .unwrap_or_default();
    let days = MultiSelect::new(
        &format!("Time slot #{}: days", number),
        Day::ALL.to_vec(),
    )
    .with_default(&preselected)
    .prompt()
    .map_err(ui_err)?;
    let start = ask_time("Start time:", current.map(|s| s.start_time))?;
    let end = ask_time("End time:", current.map(|s| s.end_time))?;
    Ok(WeeklySlot::new(days, start, end))
}

/// Collects a class form. With `existing`, every prompt defaults to its value.
fn ask_draft(existing: Option<&ClassInfo>) -> Result<ClassDraft, DomainError> {
    let name = ask_text("Class name:", existing.map(|c| c.name.as_str()))?;
    let code = ask_text("Class code:", existing.map(|c| c.code.as_str()))?;
    let instructor = ask_text("Instructor:", existing.map(|c| c.instructor.as_str()))?;
    let location = ask_text("Location:", existing.map(|c| c.location.as_str()))?;
    let description = ask_text(
        "Description (optional):",
        existing.and_then(|c| c.description.as_deref()),
    )?;
    let accent_color = Text::new("Accent color:")
        .with_default(existing.map_or(DEFAULT_ACCENT, |c| c.accent_color.as_str()))
        .with_validator(|input: &str| {
            Ok(if is_hex_color(input.trim()) {
                Validation::Valid
            } else {
                Validation::Invalid("Must be a valid hex color (#RRGGBB).".into())
            })
        })
        .prompt()
        .map_err(ui_err)?;

    let current = existing.map(|c| c.schedule.as_slice()).unwrap_or_default();
    let mut schedule = Vec::new();
    loop {
        let slot = ask_slot(schedule.len() + 1, current.get(schedule.len()))?;
        schedule.push(slot);
        let more = Confirm::new("Add another time slot?")
            .with_default(schedule.len() < current.len())
            .prompt()
            .map_err(ui_err)?;
        if !more {
            break;
        }
    }

    let description = description.trim();
    Ok(ClassDraft {
        name: name.trim().to_string(),
        code: code.trim().to_string(),
        instructor: instructor.trim().to_string(),
        location: location.trim().to_string(),
        description: (!description.is_empty()).then(|| description.to_string()),
        accent_color: accent_color.trim().to_string(),
        schedule,
    })
}

/// TUI adapter. Inquire prompts over the schedule service.
pub struct TuiInputPort {
    service: Arc<ScheduleService>,
}

impl TuiInputPort {
    pub fn new(service: Arc<ScheduleService>) -> Self {
        Self { service }
    }

    /// Pick one class; `None` when there are no classes.
    async fn choose_class(&self, message: &str) -> Result<Option<ClassInfo>, DomainError> {
        let mut classes = self.service.list_classes().await?;
        if classes.is_empty() {
            render::print_classes(&classes);
            return Ok(None);
        }
        let labels: Vec<String> = classes
            .iter()
            .map(|c| format!("{} {}", c.code, c.name))
            .collect();
        let picked = Select::new(message, labels).raw_prompt().map_err(ui_err)?;
        Ok(Some(classes.swap_remove(picked.index)))
    }

    async fn view_classes(&self) -> Result<(), DomainError> {
        let classes = self.service.list_classes().await?;
        render::print_classes(&classes);
        Ok(())
    }

    async fn add_class(&self) -> Result<(), DomainError> {
        let draft = ask_draft(None)?;
        let class = self.service.add_class(draft).await?;
        render::print_success(&format!("\"{}\" has been added to your schedule.", class.name));
        Ok(())
    }

    async fn edit_class(&self) -> Result<(), DomainError> {
        let Some(class) = self.choose_class("Edit which class?").await? else {
            return Ok(());
        };
        let draft = ask_draft(Some(&class))?;
        let updated = self.service.update_class(&class.id, draft).await?;
        render::print_success(&format!("\"{}\" has been updated.", updated.name));
        Ok(())
    }

    async fn delete_class(&self) -> Result<(), DomainError> {
        let Some(class) = self.choose_class("Delete which class?").await? else {
            return Ok(());
        };
        let confirmed = Confirm::new(&format!("Delete \"{}\"?", class.name))
            .with_default(false)
            .prompt()
            .map_err(ui_err)?;
        if confirmed {
            self.service.delete_class(&class.id).await?;
            render::print_success("The class has been removed from your schedule.");
        }
        Ok(())
    }

    async fn show_timetable(&self) -> Result<(), DomainError> {
        let entries = self.service.timetable().await?;
        render::print_timetable(self.service.layout(), &entries);
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let choice = match Select::new("What would you like to do?", MenuItem::ALL.to_vec())
                .prompt()
            {
                Ok(choice) => choice,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    return Ok(());
                }
                Err(e) => return Err(ui_err(e)),
            };
            debug!(choice = %choice, "menu");

            let result = match choice {
                MenuItem::ViewClasses => self.view_classes().await,
                MenuItem::AddClass => self.add_class().await,
                MenuItem::EditClass => self.edit_class().await,
                MenuItem::DeleteClass => self.delete_class().await,
                MenuItem::Timetable => self.show_timetable().await,
                MenuItem::Quit => return Ok(()),
            };
            if let Err(e) = result {
                render::print_error(&e);
            }
        }
    }
}
