//! Slot-ordering heuristic guiding the search. Ordering is advisory: it
//! never removes a candidate, it only decides which slots are tried first.
//! Early-morning slots are preferred, late-evening slots are penalized, and
//! days that already carry lessons for the group are deprioritized so the
//! load spreads across the week.

use crate::state::Timetable;
use crate::{Group, Slot};

/// Preference score of one slot; lower is tried first.
fn score(slot: &Slot, timetable: &Timetable, group: &Group) -> i32 {
    let busy_on_day = timetable.occupied_on(group.index, slot.day) as i32;
    let hour_bonus = if slot.start < 10 {
        -3
    } else if slot.start > 18 {
        3
    } else {
        0
    };
    2 * busy_on_day + hour_bonus
}

/// Reorder candidate slots by ascending preference score. The sort is
/// stable, so equally scored slots keep the catalog order and the search
/// stays deterministic.
pub fn order_slots(candidates: &[Slot], timetable: &Timetable, group: &Group) -> Vec<Slot> {
    let mut ordered = candidates.to_vec();
    ordered.sort_by_key(|slot| score(slot, timetable, group));
    ordered
}
