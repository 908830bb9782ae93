//! Mutable search state: the timetable under construction, the professor
//! occupancy mirror and the hour counters. All mutation goes through the
//! `commit`/`undo` pair so that the mirror and the counters can never drift
//! apart from the timetable; an asymmetric call is a bug and panics.

use ndarray::{Array2, Array3};

use crate::slots::{DAYS_PER_WEEK, HOURS_PER_DAY};
use crate::{Instance, Slot, Weekday};

/// The (subject, professor) pair occupying one timetable cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub subject: usize,
    pub professor: usize,
}

/// Dense weekly timetable: one optional placement per (group, day, hour)
/// cell. `None` means the cell is free.
#[derive(Debug, Clone, PartialEq)]
pub struct Timetable {
    cells: Array3<Option<Placement>>,
}

impl Timetable {
    pub fn empty(num_groups: usize) -> Timetable {
        Timetable {
            cells: Array3::from_elem((num_groups, DAYS_PER_WEEK, HOURS_PER_DAY), None),
        }
    }

    pub fn get(&self, group: usize, slot: &Slot) -> Option<Placement> {
        self.cells[[group, slot.day.ordinal(), slot.hour_ordinal()]]
    }

    /// Number of occupied cells for `group` on `day`.
    pub fn occupied_on(&self, group: usize, day: Weekday) -> usize {
        (0..HOURS_PER_DAY)
            .filter(|&hour| self.cells[[group, day.ordinal(), hour]].is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}

/// All mutable state of one solve. Created empty at solve start, mutated
/// exclusively through `commit` and `undo`, consumed when the solve returns.
pub struct SearchState {
    timetable: Timetable,
    /// Mirror of the timetable keyed by professor, for O(1) clash checks
    occupancy: Array3<bool>,
    /// Hours each professor is currently teaching
    professor_hours: Vec<u32>,
    /// Hours placed so far per (group, subject) unit
    placed_hours: Array2<u32>,
}

impl SearchState {
    pub fn new(instance: &Instance) -> SearchState {
        SearchState {
            timetable: Timetable::empty(instance.groups.len()),
            occupancy: Array3::from_elem(
                (instance.professors.len(), DAYS_PER_WEEK, HOURS_PER_DAY),
                false,
            ),
            professor_hours: vec![0; instance.professors.len()],
            placed_hours: Array2::zeros((instance.groups.len(), instance.subjects.len())),
        }
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    pub fn group_is_free(&self, group: usize, slot: &Slot) -> bool {
        self.timetable.get(group, slot).is_none()
    }

    pub fn professor_is_free(&self, professor: usize, slot: &Slot) -> bool {
        !self.occupancy[[professor, slot.day.ordinal(), slot.hour_ordinal()]]
    }

    pub fn professor_hours(&self, professor: usize) -> u32 {
        self.professor_hours[professor]
    }

    pub fn placed_hours(&self, group: usize, subject: usize) -> u32 {
        self.placed_hours[[group, subject]]
    }

    /// Place one hour: write the timetable cell, set the occupancy bit and
    /// bump both counters. Panics if the cell or the professor is taken.
    pub fn commit(&mut self, group: usize, placement: Placement, slot: &Slot) {
        let day = slot.day.ordinal();
        let hour = slot.hour_ordinal();

        let cell = &mut self.timetable.cells[[group, day, hour]];
        assert!(cell.is_none(), "timetable cell written twice");
        *cell = Some(placement);

        let busy = &mut self.occupancy[[placement.professor, day, hour]];
        assert!(!*busy, "professor double-booked");
        *busy = true;

        self.professor_hours[placement.professor] += 1;
        self.placed_hours[[group, placement.subject]] += 1;
    }

    /// Exact reverse of `commit`. Panics if the cell does not hold the given
    /// placement.
    pub fn undo(&mut self, group: usize, placement: Placement, slot: &Slot) {
        let day = slot.day.ordinal();
        let hour = slot.hour_ordinal();

        let cell = &mut self.timetable.cells[[group, day, hour]];
        assert!(*cell == Some(placement), "undo of a placement that is not there");
        *cell = None;

        self.occupancy[[placement.professor, day, hour]] = false;
        self.professor_hours[placement.professor] -= 1;
        self.placed_hours[[group, placement.subject]] -= 1;
    }

    /// Whether every (group, subject) unit has received its weekly hours.
    pub fn is_complete(&self, instance: &Instance) -> bool {
        instance.subjects.iter().all(|subject| {
            subject
                .groups_taking
                .iter()
                .all(|&group| self.placed_hours[[group, subject.index]] >= subject.weekly_hours)
        })
    }

    pub fn into_timetable(self) -> Timetable {
        self.timetable
    }
}
