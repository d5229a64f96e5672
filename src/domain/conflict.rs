//! Schedule conflict detection.
//!
//! Checks a candidate list of slots against every slot of every other owner and
//! stops at the first pair that shares a day and overlaps in time. Iteration
//! order: candidate slots, then owners, then the owner's slots.

use super::entities::{Overlap, ScheduleOwner, WeeklySlot};

/// The first colliding pair found by [`ConflictDetector`].
#[derive(Debug)]
pub struct Conflict<'a, O> {
    pub candidate_index: usize,
    pub candidate: &'a WeeklySlot,
    pub owner: &'a O,
    pub slot_index: usize,
    pub slot: &'a WeeklySlot,
    pub overlap: Overlap,
}

/// Stateless; every call sees only its arguments.
pub struct ConflictDetector;

impl ConflictDetector {
    /// First conflict between `candidate` and any slot of `others`, or `None`.
    ///
    /// When editing an owner, leave it out of `others` (or use
    /// [`ConflictDetector::find_conflict_excluding`]), otherwise its own
    /// unchanged slots are reported as conflicts.
    pub fn find_conflict<'a, O: ScheduleOwner>(
        candidate: &'a [WeeklySlot],
        others: &'a [O],
    ) -> Option<Conflict<'a, O>> {
        Self::scan(candidate, others, None)
    }

    /// Same as [`ConflictDetector::find_conflict`], skipping the owner whose id is `exclude_id`.
    pub fn find_conflict_excluding<'a, O: ScheduleOwner>(
        candidate: &'a [WeeklySlot],
        others: &'a [O],
        exclude_id: &str,
    ) -> Option<Conflict<'a, O>> {
        Self::scan(candidate, others, Some(exclude_id))
    }

    fn scan<'a, O: ScheduleOwner>(
        candidate: &'a [WeeklySlot],
        others: &'a [O],
        exclude_id: Option<&str>,
    ) -> Option<Conflict<'a, O>> {
        for (candidate_index, new_slot) in candidate.iter().enumerate() {
            for owner in others {
                if exclude_id.is_some_and(|id| owner.owner_id() == id) {
                    continue;
                }
                for (slot_index, existing) in owner.slots().iter().enumerate() {
                    if let Some(overlap) = new_slot.overlap_with(existing) {
                        return Some(Conflict {
                            candidate_index,
                            candidate: new_slot,
                            owner,
                            slot_index,
                            slot: existing,
                            overlap,
                        });
                    }
                }
            }
        }
        None
    }
}
