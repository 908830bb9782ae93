//! The fixed weekly slot grid. Each shift has the same shape: five teaching
//! days of seven one-hour slots, 35 slots per week.

use crate::{Shift, Slot, Weekday};

/// Teaching days per week.
pub const DAYS_PER_WEEK: usize = 5;
/// One-hour slots per day within a shift.
pub const SLOTS_PER_DAY: usize = 7;
/// One-hour slots of the whole teaching day, both shifts back to back.
pub const HOURS_PER_DAY: usize = 2 * SLOTS_PER_DAY;

const MORNING_HOURS: [(u8, u8); SLOTS_PER_DAY] = [
    (7, 8),
    (8, 9),
    (9, 10),
    (10, 11),
    (11, 12),
    (12, 13),
    (13, 14),
];

const EVENING_HOURS: [(u8, u8); SLOTS_PER_DAY] = [
    (14, 15),
    (15, 16),
    (16, 17),
    (17, 18),
    (18, 19),
    (19, 20),
    (20, 21),
];

/// All 35 slots of one shift. Deterministic: Monday through Friday outside,
/// ascending start hour inside.
pub fn all_slots(shift: Shift) -> Vec<Slot> {
    let hours = match shift {
        Shift::Morning => &MORNING_HOURS,
        Shift::Evening => &EVENING_HOURS,
    };
    let mut slots = Vec::with_capacity(DAYS_PER_WEEK * SLOTS_PER_DAY);
    for day in Weekday::ALL {
        for &(start, end) in hours {
            slots.push(Slot {
                day,
                start,
                end,
                shift,
            });
        }
    }
    slots
}
