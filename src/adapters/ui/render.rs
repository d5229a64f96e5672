//! Terminal output for classes, errors and timetable blocks.
//!
//! Lines are built as plain strings (testable) and printed with the class
//! accent color when the terminal supports it.

use crate::domain::{ClassInfo, DomainError, TimetableLayout, WeeklySlot, format_hour};
use crate::usecases::TimetableEntry;
use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{Write, stdout};

const ERROR_RED: Color = Color::Rgb { r: 0xef, g: 0x44, b: 0x44 };
const OK_GREEN: Color = Color::Rgb { r: 0x22, g: 0xc5, b: 0x5e };

/// Parses `#RRGGBB` into a terminal color.
pub fn accent_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

/// `M/W 09:00-10:15`
pub fn slot_label(slot: &WeeklySlot) -> String {
    let days: Vec<&str> = slot.days.iter().map(|d| d.tag()).collect();
    format!("{} {}-{}", days.join("/"), slot.start_time, slot.end_time)
}

pub fn class_line(class: &ClassInfo) -> String {
    let slots: Vec<String> = class.schedule.iter().map(slot_label).collect();
    format!(
        "{} {}  ({}, {})  {}",
        class.code,
        class.name,
        class.instructor,
        class.location,
        slots.join(", ")
    )
}

/// Timetable as text: header, then one section per day column with its blocks
/// sorted by start time.
pub fn timetable_lines(
    layout: &TimetableLayout,
    entries: &[TimetableEntry],
) -> Vec<(Option<Color>, String)> {
    let cfg = layout.config();
    let mut lines = vec![(
        None,
        format!(
            "Window {} - {} ({} px/hour, grid {} px)",
            format_hour(cfg.start_hour),
            format_hour(cfg.end_hour),
            cfg.hour_height_px,
            layout.grid_height_px()
        ),
    )];

    for (column, day) in cfg.ordered_days.iter().enumerate() {
        let mut blocks: Vec<&TimetableEntry> =
            entries.iter().filter(|e| e.column == column).collect();
        if blocks.is_empty() {
            continue;
        }
        blocks.sort_by_key(|e| e.start_time);
        let (left, width) = layout.column_span(column);
        lines.push((None, format!("{} (left {:.1}%, width {:.1}%)", day, left, width)));
        for e in blocks {
            lines.push((
                accent_color(&e.accent_color),
                format!(
                    "  {}-{}  {} {}  [top {:.0}px, height {:.0}px]",
                    e.start_time, e.end_time, e.code, e.name, e.top_px, e.height_px
                ),
            ));
        }
    }

    if lines.len() == 1 {
        lines.push((None, "No classes in the visible window.".to_string()));
    }
    lines
}

fn print_line(color: Option<Color>, text: &str) {
    let mut out = stdout();
    if let Some(c) = color {
        let _ = out.execute(SetForegroundColor(c));
    }
    let _ = out.execute(Print(text));
    let _ = out.execute(Print("\r\n"));
    if color.is_some() {
        let _ = out.execute(ResetColor);
    }
    let _ = out.flush();
}

pub fn print_classes(classes: &[ClassInfo]) {
    if classes.is_empty() {
        print_line(None, "No classes yet. Add one to get started.");
        return;
    }
    for class in classes {
        print_line(accent_color(&class.accent_color), &class_line(class));
    }
}

pub fn print_timetable(layout: &TimetableLayout, entries: &[TimetableEntry]) {
    for (color, text) in timetable_lines(layout, entries) {
        print_line(color, &text);
    }
}

pub fn print_success(message: &str) {
    print_line(Some(OK_GREEN), message);
}

/// Validation problems are listed one per line; everything else is one line.
pub fn print_error(err: &DomainError) {
    match err {
        DomainError::Invalid(errors) => {
            print_line(Some(ERROR_RED), "Please fix the following:");
            for e in &errors.0 {
                print_line(Some(ERROR_RED), &format!("  {}: {}", e.field, e.message));
            }
        }
        DomainError::ScheduleConflict { .. } => {
            print_line(Some(ERROR_RED), "Time Conflict Detected");
            print_line(Some(ERROR_RED), &format!("  {}", err));
        }
        other => print_line(Some(ERROR_RED), &other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClockTime, Day};

    fn entry(column: usize, day: Day, start: u16, end: u16, name: &str) -> TimetableEntry {
        TimetableEntry {
            class_id: name.to_lowercase(),
            name: name.into(),
            code: "CS-50".into(),
            accent_color: "#8B5CF6".into(),
            day,
            column,
            start_time: ClockTime::from_minutes(start).unwrap(),
            end_time: ClockTime::from_minutes(end).unwrap(),
            top_px: f64::from(start - 420) / 60.0 * 80.0,
            height_px: f64::from(end - start) / 60.0 * 80.0,
            left_pct: column as f64 / 7.0 * 100.0,
            width_pct: 100.0 / 7.0,
        }
    }

    #[test]
    fn test_accent_color() {
        assert_eq!(
            accent_color("#8B5CF6"),
            Some(Color::Rgb { r: 0x8b, g: 0x5c, b: 0xf6 })
        );
        assert_eq!(accent_color("8B5CF6"), None);
        assert_eq!(accent_color("#8B5CFZ"), None);
        assert_eq!(accent_color("#ÿÿÿ"), None);
    }

    #[test]
    fn test_slot_label() {
        let slot = WeeklySlot::new(
            [Day::Mon, Day::Thu],
            ClockTime::from_hm(9, 0).unwrap(),
            ClockTime::from_hm(10, 15).unwrap(),
        );
        assert_eq!(slot_label(&slot), "M/Th 09:00-10:15");
    }

    #[test]
    fn test_timetable_lines_group_by_day() {
        let layout = TimetableLayout::default();
        let entries = vec![
            entry(2, Day::Wed, 660, 720, "Later"),
            entry(0, Day::Mon, 540, 600, "Monday"),
            entry(2, Day::Wed, 540, 600, "Earlier"),
        ];
        let text: Vec<String> = timetable_lines(&layout, &entries)
            .into_iter()
            .map(|(_, s)| s)
            .collect();
        assert!(text[0].starts_with("Window 7 AM - 5 PM"));
        assert!(text[1].starts_with("Mon"));
        assert!(text[2].contains("Monday") && text[2].contains("top 160px"));
        assert!(text[3].starts_with("Wed"));
        assert!(text[4].contains("Earlier"));
        assert!(text[5].contains("Later"));
        assert_eq!(text.len(), 6);
    }

    #[test]
    fn test_timetable_lines_empty() {
        let lines = timetable_lines(&TimetableLayout::default(), &[]);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].1.contains("No classes"));
    }
}
