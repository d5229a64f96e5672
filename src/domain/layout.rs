//! Weekly timetable placement.
//!
//! Maps every (slot, day) pair onto a grid of day columns and hour rows of fixed
//! pixel height. Slots that start before or end after the visible window are
//! dropped rather than clipped; unknown days are skipped. Only geometry is
//! computed here, drawing is left to the caller.

use super::entities::{Day, ScheduleOwner, WeeklySlot};
use super::errors::DomainError;
use std::ops::RangeInclusive;

pub const DEFAULT_START_HOUR: u8 = 7;
pub const DEFAULT_END_HOUR: u8 = 17;
pub const DEFAULT_HOUR_HEIGHT_PX: f64 = 80.0;

/// Grid configuration, fixed when the layout is built.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// First visible hour (row 0 starts at `start_hour:00`).
    pub start_hour: u8,
    /// Last visible hour row; the window ends at `end_hour + 1`.
    pub end_hour: u8,
    pub hour_height_px: f64,
    /// Column order. Days missing from it are not placed, but the grid keeps
    /// one column per weekday.
    pub ordered_days: Vec<Day>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
            hour_height_px: DEFAULT_HOUR_HEIGHT_PX,
            ordered_days: Day::ALL.to_vec(),
        }
    }
}

/// Geometry of one slot on one day.
#[derive(Debug)]
pub struct PlacedBlock<'a, O> {
    pub owner: &'a O,
    pub slot_index: usize,
    pub slot: &'a WeeklySlot,
    pub day: Day,
    pub column: usize,
    pub top_px: f64,
    pub height_px: f64,
    /// Horizontal offset as a percentage of the grid width.
    pub left_pct: f64,
    pub width_pct: f64,
}

#[derive(Debug, Clone)]
pub struct TimetableLayout {
    config: LayoutConfig,
}

impl TimetableLayout {
    pub fn new(config: LayoutConfig) -> Result<Self, DomainError> {
        if config.end_hour > 23 {
            return Err(DomainError::Config(format!(
                "end_hour must be 0-23, got {}",
                config.end_hour
            )));
        }
        if config.start_hour > config.end_hour {
            return Err(DomainError::Config(format!(
                "start_hour ({}) is after end_hour ({})",
                config.start_hour, config.end_hour
            )));
        }
        if !config.hour_height_px.is_finite() || config.hour_height_px <= 0.0 {
            return Err(DomainError::Config(format!(
                "hour_height_px must be positive, got {}",
                config.hour_height_px
            )));
        }
        if config.ordered_days.is_empty() {
            return Err(DomainError::Config("ordered_days is empty".into()));
        }
        for (i, day) in config.ordered_days.iter().enumerate() {
            if config.ordered_days[..i].contains(day) {
                return Err(DomainError::Config(format!(
                    "ordered_days lists {} twice",
                    day
                )));
            }
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Always one column per weekday, however many days are ordered.
    pub fn columns(&self) -> usize {
        Day::ALL.len()
    }

    /// Hours that get a row, `start_hour..=end_hour`.
    pub fn hour_rows(&self) -> RangeInclusive<u8> {
        self.config.start_hour..=self.config.end_hour
    }

    pub fn grid_height_px(&self) -> f64 {
        f64::from(self.config.end_hour - self.config.start_hour + 1) * self.config.hour_height_px
    }

    /// Left edge and width of a column, in percent.
    pub fn column_span(&self, column: usize) -> (f64, f64) {
        let columns = self.columns() as f64;
        (column as f64 / columns * 100.0, 100.0 / columns)
    }

    /// Places every slot of every owner, in owner -> slot -> day order. No sorting.
    pub fn layout<'a, O: ScheduleOwner>(&self, owners: &'a [O]) -> Vec<PlacedBlock<'a, O>> {
        let window_start = u32::from(self.config.start_hour) * 60;
        let window_end = (u32::from(self.config.end_hour) + 1) * 60;
        let hour_px = self.config.hour_height_px;

        let mut blocks = Vec::new();
        for owner in owners {
            for (slot_index, slot) in owner.slots().iter().enumerate() {
                let start = u32::from(slot.start_time.minutes());
                let end = u32::from(slot.end_time.minutes());
                if start < window_start || end > window_end {
                    continue;
                }
                for &day in &slot.days {
                    let Some(column) = self.config.ordered_days.iter().position(|d| *d == day) else {
                        continue;
                    };
                    let (left_pct, width_pct) = self.column_span(column);
                    blocks.push(PlacedBlock {
                        owner,
                        slot_index,
                        slot,
                        day,
                        column,
                        top_px: f64::from(start - window_start) / 60.0 * hour_px,
                        height_px: f64::from(end.saturating_sub(start)) / 60.0 * hour_px,
                        left_pct,
                        width_pct,
                    });
                }
            }
        }
        blocks
    }
}

impl Default for TimetableLayout {
    fn default() -> Self {
        Self {
            config: LayoutConfig::default(),
        }
    }
}

/// Twelve-hour label for an hour row: `12 AM`, `9 AM`, `12 PM`, `5 PM`.
pub fn format_hour(hour: u8) -> String {
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    let h = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{} {}", h, suffix)
}
