//! Domain entities. Pure data structures for the schedule core.
//!
//! No storage or UI types here; adapters map into these.

use super::errors::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Day of the week. Serialized with the short tags stored in class documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    #[serde(rename = "M")]
    Mon,
    #[serde(rename = "T")]
    Tue,
    #[serde(rename = "W")]
    Wed,
    #[serde(rename = "Th")]
    Thu,
    #[serde(rename = "F")]
    Fri,
    #[serde(rename = "Sa")]
    Sat,
    #[serde(rename = "Su")]
    Sun,
}

impl Day {
    /// Monday-first week, the default column order of the timetable.
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    /// Short tag used in stored documents (`M`, `T`, `W`, `Th`, `F`, `Sa`, `Su`).
    pub fn tag(self) -> &'static str {
        match self {
            Day::Mon => "M",
            Day::Tue => "T",
            Day::Wed => "W",
            Day::Thu => "Th",
            Day::Fri => "F",
            Day::Sat => "Sa",
            Day::Sun => "Su",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        };
        f.write_str(name)
    }
}

impl FromStr for Day {
    type Err = DomainError;

    /// Accepts the document tags (case-sensitive, `T` vs `Th` matters) and
    /// English names or three-letter abbreviations (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(day) = Day::ALL.iter().find(|d| d.tag() == s) {
            return Ok(*day);
        }
        let lower = s.to_lowercase();
        let day = match lower.as_str() {
            "mon" | "monday" => Day::Mon,
            "tue" | "tuesday" => Day::Tue,
            "wed" | "wednesday" => Day::Wed,
            "thu" | "thursday" => Day::Thu,
            "fri" | "friday" => Day::Fri,
            "sat" | "saturday" => Day::Sat,
            "sun" | "sunday" => Day::Sun,
            _ => return Err(DomainError::InvalidDay(s.to_string())),
        };
        Ok(day)
    }
}

/// Compact set of days. Iterates in Monday-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DaySet(u8);

impl DaySet {
    pub const EMPTY: DaySet = DaySet(0);

    pub fn contains(self, day: Day) -> bool {
        self.0 & day.bit() != 0
    }

    pub fn insert(&mut self, day: Day) {
        self.0 |= day.bit();
    }

    pub fn intersection(self, other: DaySet) -> DaySet {
        DaySet(self.0 & other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn first(self) -> Option<Day> {
        self.iter().next()
    }

    pub fn iter(self) -> impl Iterator<Item = Day> {
        Day::ALL.into_iter().filter(move |d| self.contains(*d))
    }
}

impl FromIterator<Day> for DaySet {
    fn from_iter<I: IntoIterator<Item = Day>>(iter: I) -> Self {
        let mut set = DaySet::EMPTY;
        for day in iter {
            set.insert(day);
        }
        set
    }
}

/// Wall-clock time of day as minutes since midnight (0..=1439).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MINUTES_PER_DAY: u16 = 24 * 60;

    /// Returns `None` unless `hour < 24` and `minute < 60`.
    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(u16::from(hour) * 60 + u16::from(minute)))
        } else {
            None
        }
    }

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < Self::MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = DomainError;

    /// Parses `H:mm` or `HH:mm` with hours 0-23 and minutes 00-59.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidTime(s.to_string());
        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(h) || h.len() > 2 || !digits(m) || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        Self::from_hm(hour, minute).ok_or_else(invalid)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// One contiguous block of time recurring on one or more weekdays.
///
/// Callers keep `days` non-empty and `start_time < end_time`; the core relies
/// on it and does not re-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySlot {
    /// Distinct days, in the order first given.
    #[serde(deserialize_with = "deserialize_days")]
    pub days: Vec<Day>,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

/// Day and time intersection of two slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub days: DaySet,
    pub start: ClockTime,
    pub end: ClockTime,
}

/// Drops repeated days, keeping first-seen order.
fn distinct_days(days: impl IntoIterator<Item = Day>) -> Vec<Day> {
    let mut seen = DaySet::EMPTY;
    days.into_iter()
        .filter(|&d| {
            let fresh = !seen.contains(d);
            seen.insert(d);
            fresh
        })
        .collect()
}

fn deserialize_days<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Day>, D::Error> {
    Vec::<Day>::deserialize(deserializer).map(distinct_days)
}

impl WeeklySlot {
    pub fn new(days: impl IntoIterator<Item = Day>, start_time: ClockTime, end_time: ClockTime) -> Self {
        Self {
            days: distinct_days(days),
            start_time,
            end_time,
        }
    }

    pub fn day_set(&self) -> DaySet {
        self.days.iter().copied().collect()
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end_time.minutes().saturating_sub(self.start_time.minutes())
    }

    /// Half-open `[start, end)` overlap on at least one shared day.
    /// Slots that only touch at a boundary do not overlap.
    pub fn overlap_with(&self, other: &WeeklySlot) -> Option<Overlap> {
        let days = self.day_set().intersection(other.day_set());
        if days.is_empty() {
            return None;
        }
        if self.start_time < other.end_time && other.start_time < self.end_time {
            Some(Overlap {
                days,
                start: self.start_time.max(other.start_time),
                end: self.end_time.min(other.end_time),
            })
        } else {
            None
        }
    }
}

/// Anything that owns a list of weekly slots (a class, in this application).
pub trait ScheduleOwner {
    fn owner_id(&self) -> &str;
    fn slots(&self) -> &[WeeklySlot];
}

/// Class fields as submitted by a form, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDraft {
    pub name: String,
    pub code: String,
    pub instructor: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub accent_color: String,
    pub schedule: Vec<WeeklySlot>,
}

/// A stored class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub id: String,
    pub name: String,
    pub code: String,
    pub instructor: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub accent_color: String,
    pub schedule: Vec<WeeklySlot>,
    pub created_at: DateTime<Utc>,
}

impl ClassInfo {
    pub fn from_draft(id: impl Into<String>, draft: ClassDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            code: draft.code,
            instructor: draft.instructor,
            location: draft.location,
            description: draft.description,
            accent_color: draft.accent_color,
            schedule: draft.schedule,
            created_at,
        }
    }

    /// Replace every editable field, keeping id and creation time.
    pub fn apply(&mut self, draft: ClassDraft) {
        self.name = draft.name;
        self.code = draft.code;
        self.instructor = draft.instructor;
        self.location = draft.location;
        self.description = draft.description;
        self.accent_color = draft.accent_color;
        self.schedule = draft.schedule;
    }

    pub fn to_draft(&self) -> ClassDraft {
        ClassDraft {
            name: self.name.clone(),
            code: self.code.clone(),
            instructor: self.instructor.clone(),
            location: self.location.clone(),
            description: self.description.clone(),
            accent_color: self.accent_color.clone(),
            schedule: self.schedule.clone(),
        }
    }

    /// Start of the first listed slot; used to order the class list.
    pub fn first_start(&self) -> Option<ClockTime> {
        self.schedule.first().map(|s| s.start_time)
    }
}

impl ScheduleOwner for ClassInfo {
    fn owner_id(&self) -> &str {
        &self.id
    }

    fn slots(&self) -> &[WeeklySlot] {
        &self.schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_clock_time_parse() {
        assert_eq!(t("9:05").minutes(), 545);
        assert_eq!(t("09:05").minutes(), 545);
        assert_eq!(t("00:00").minutes(), 0);
        assert_eq!(t("23:59").minutes(), 1439);
        assert_eq!(t("7:30").to_string(), "07:30");
    }

    #[test]
    fn test_clock_time_rejects_malformed() {
        for bad in ["24:00", "12:60", "1200", "ab:cd", "9:5", "123:00", "", ":30", "-1:00", "9:05 "] {
            assert!(bad.parse::<ClockTime>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_day_parse() {
        assert_eq!("Th".parse::<Day>().unwrap(), Day::Thu);
        assert_eq!("T".parse::<Day>().unwrap(), Day::Tue);
        assert_eq!("wednesday".parse::<Day>().unwrap(), Day::Wed);
        assert_eq!("SUN".parse::<Day>().unwrap(), Day::Sun);
        assert!(matches!("Funday".parse::<Day>(), Err(DomainError::InvalidDay(_))));
    }

    #[test]
    fn test_day_set_intersection() {
        let a: DaySet = [Day::Mon, Day::Wed].into_iter().collect();
        let b: DaySet = [Day::Wed, Day::Fri].into_iter().collect();
        let both = a.intersection(b);
        assert_eq!(both.len(), 1);
        assert_eq!(both.first(), Some(Day::Wed));
        assert!(a.intersection(DaySet::EMPTY).is_empty());
    }

    #[test]
    fn test_slot_document_format() {
        let json = r#"{"days":["M","Th"],"startTime":"9:00","endTime":"10:30"}"#;
        let slot: WeeklySlot = serde_json::from_str(json).unwrap();
        assert_eq!(slot.days, vec![Day::Mon, Day::Thu]);
        assert_eq!(slot.duration_minutes(), 90);
        assert_eq!(
            serde_json::to_string(&slot).unwrap(),
            r#"{"days":["M","Th"],"startTime":"09:00","endTime":"10:30"}"#
        );
    }

    #[test]
    fn test_slot_days_are_distinct() {
        let json = r#"{"days":["M","W","M"],"startTime":"9:00","endTime":"10:00"}"#;
        let slot: WeeklySlot = serde_json::from_str(json).unwrap();
        assert_eq!(slot.days, vec![Day::Mon, Day::Wed]);

        let built = WeeklySlot::new([Day::Fri, Day::Fri, Day::Tue], t("9:00"), t("10:00"));
        assert_eq!(built.days, vec![Day::Fri, Day::Tue]);
    }

    #[test]
    fn test_slot_rejects_bad_time_in_document() {
        let json = r#"{"days":["M"],"startTime":"25:00","endTime":"26:00"}"#;
        assert!(serde_json::from_str::<WeeklySlot>(json).is_err());
    }

    #[test]
    fn test_overlap_window() {
        let a = WeeklySlot::new([Day::Mon, Day::Wed], t("9:00"), t("10:30"));
        let b = WeeklySlot::new([Day::Wed], t("10:00"), t("11:00"));
        let overlap = a.overlap_with(&b).unwrap();
        assert_eq!(overlap.days.first(), Some(Day::Wed));
        assert_eq!((overlap.start.minutes(), overlap.end.minutes()), (600, 630));

        let touching = WeeklySlot::new([Day::Mon], t("10:30"), t("11:00"));
        assert!(a.overlap_with(&touching).is_none());
    }
}
