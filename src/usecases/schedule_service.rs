//! Schedule service. Add, edit, delete and lay out classes.
//!
//! Every write is validated and checked for time conflicts before it reaches
//! the store. Edits exclude the edited class from the conflict check. Writes
//! are serialized so a conflict check and its store write cannot interleave
//! with another writer sharing the service.

use crate::domain::{
    ClassDraft, ClassInfo, ClockTime, Conflict, ConflictDetector, Day, DomainError,
    TimetableLayout, validate_draft,
};
use crate::ports::ClassStore;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// One placed block with the class details a renderer needs. Owned, so it can
/// outlive the class list it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableEntry {
    pub class_id: String,
    pub name: String,
    pub code: String,
    pub accent_color: String,
    pub day: Day,
    pub column: usize,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub top_px: f64,
    pub height_px: f64,
    pub left_pct: f64,
    pub width_pct: f64,
}

pub struct ScheduleService {
    store: Arc<dyn ClassStore>,
    layout: TimetableLayout,
    // Held from the conflict check through the store write.
    write_lock: Mutex<()>,
}

impl ScheduleService {
    pub fn new(store: Arc<dyn ClassStore>, layout: TimetableLayout) -> Self {
        Self {
            store,
            layout,
            write_lock: Mutex::new(()),
        }
    }

    pub fn layout(&self) -> &TimetableLayout {
        &self.layout
    }

    /// All classes, ordered by the start time of their first slot.
    pub async fn list_classes(&self) -> Result<Vec<ClassInfo>, DomainError> {
        let mut classes = self.store.list().await?;
        classes.sort_by_key(|c| c.first_start().map_or(u16::MAX, ClockTime::minutes));
        Ok(classes)
    }

    pub async fn get_class(&self, id: &str) -> Result<ClassInfo, DomainError> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(id.to_string()))
    }

    /// Validate, reject on the first conflict with an existing class, then store.
    pub async fn add_class(&self, draft: ClassDraft) -> Result<ClassInfo, DomainError> {
        validate_draft(&draft)?;
        let _guard = self.write_lock.lock().await;
        let existing = self.store.list().await?;
        if let Some(conflict) = ConflictDetector::find_conflict(&draft.schedule, &existing) {
            let err = conflict_error(&draft.name, &conflict);
            warn!(class = %draft.name, conflicting_with = %conflict.owner.id, "time conflict, class not added");
            return Err(err);
        }

        let class = ClassInfo::from_draft(uuid::Uuid::new_v4().to_string(), draft, Utc::now());
        self.store.insert(class.clone()).await?;
        info!(class_id = %class.id, name = %class.name, slots = class.schedule.len(), "class added");
        Ok(class)
    }

    /// Replace a class's fields. Its current slots never count as conflicts.
    pub async fn update_class(&self, id: &str, draft: ClassDraft) -> Result<ClassInfo, DomainError> {
        let _guard = self.write_lock.lock().await;
        let mut class = self.get_class(id).await?;
        validate_draft(&draft)?;
        let existing = self.store.list().await?;
        if let Some(conflict) =
            ConflictDetector::find_conflict_excluding(&draft.schedule, &existing, id)
        {
            let err = conflict_error(&draft.name, &conflict);
            warn!(class_id = %id, conflicting_with = %conflict.owner.id, "time conflict, class not updated");
            return Err(err);
        }

        class.apply(draft);
        self.store.update(class.clone()).await?;
        info!(class_id = %id, name = %class.name, "class updated");
        Ok(class)
    }

    pub async fn delete_class(&self, id: &str) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;
        if !self.store.delete(id).await? {
            return Err(DomainError::NotFound(id.to_string()));
        }
        info!(class_id = %id, "class deleted");
        Ok(())
    }

    /// Timetable blocks for every stored class, in class -> slot -> day order.
    pub async fn timetable(&self) -> Result<Vec<TimetableEntry>, DomainError> {
        let classes = self.store.list().await?;
        let entries: Vec<TimetableEntry> = self
            .layout
            .layout(&classes)
            .into_iter()
            .map(|b| TimetableEntry {
                class_id: b.owner.id.clone(),
                name: b.owner.name.clone(),
                code: b.owner.code.clone(),
                accent_color: b.owner.accent_color.clone(),
                day: b.day,
                column: b.column,
                start_time: b.slot.start_time,
                end_time: b.slot.end_time,
                top_px: b.top_px,
                height_px: b.height_px,
                left_pct: b.left_pct,
                width_pct: b.width_pct,
            })
            .collect();

        let slot_days: usize = classes
            .iter()
            .flat_map(|c| c.schedule.iter())
            .map(|s| s.days.len())
            .sum();
        debug!(
            classes = classes.len(),
            placed = entries.len(),
            hidden = slot_days.saturating_sub(entries.len()),
            "timetable computed"
        );
        Ok(entries)
    }
}

fn conflict_error(class_name: &str, conflict: &Conflict<'_, ClassInfo>) -> DomainError {
    DomainError::ScheduleConflict {
        class_name: class_name.to_string(),
        conflicting_with: conflict.owner.name.clone(),
        // Overlap always has at least one shared day.
        day: conflict.overlap.days.first().unwrap_or(Day::Mon),
        start: conflict.overlap.start,
        end: conflict.overlap.end,
    }
}
