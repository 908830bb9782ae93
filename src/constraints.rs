//! Hard-constraint validation for tentative placements. The check is pure:
//! it inspects the current search state and mutates nothing. The first
//! failing rule wins; the returned conflict is diagnostic only and nothing
//! may depend on its text.

use std::fmt;

use crate::state::SearchState;
use crate::{Group, Professor, Slot};

/// Why a tentative placement was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    /// The slot lies outside the group's shift
    ShiftMismatch,
    /// The group already has a lesson in this slot
    GroupBusy,
    /// The professor already teaches elsewhere in this slot
    ProfessorBusy,
    /// The professor's weekly hour budget is exhausted
    OutOfHours,
    /// The professor does not teach in this shift
    ShiftPreference,
    /// The slot falls outside the professor's availability windows
    Unavailable,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Conflict::ShiftMismatch => "slot not in group's shift",
            Conflict::GroupBusy => "group already busy",
            Conflict::ProfessorBusy => "professor already busy",
            Conflict::OutOfHours => "professor out of hours",
            Conflict::ShiftPreference => "shift mismatch",
            Conflict::Unavailable => "professor not available",
        })
    }
}

/// Decide whether teaching `group` for one hour in `slot` under `professor`
/// would violate any hard rule in the current state.
pub fn check_placement(
    state: &SearchState,
    group: &Group,
    professor: &Professor,
    slot: &Slot,
) -> Result<(), Conflict> {
    if slot.shift != group.shift {
        return Err(Conflict::ShiftMismatch);
    }
    if !state.group_is_free(group.index, slot) {
        return Err(Conflict::GroupBusy);
    }
    if !state.professor_is_free(professor.index, slot) {
        return Err(Conflict::ProfessorBusy);
    }
    if state.professor_hours(professor.index) >= professor.max_hours {
        return Err(Conflict::OutOfHours);
    }
    if professor.preferred_shift.is_some_and(|p| p != slot.shift) {
        return Err(Conflict::ShiftPreference);
    }
    if !professor.available_for(slot) {
        return Err(Conflict::Unavailable);
    }
    Ok(())
}
