pub mod conflicts;
mod constraints;
mod heuristics;
pub mod io;
pub mod slots;
pub mod solver;
pub mod state;

use std::collections::{HashMap, HashSet};
use std::fmt;

/// Teaching days of the week, in timetable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Position of this day in the weekly grid (Monday = 0).
    pub fn ordinal(self) -> usize {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
        }
    }

    /// Day name as it appears in the input and output files.
    pub fn wire_name(self) -> &'static str {
        match self {
            Weekday::Monday => "Lunes",
            Weekday::Tuesday => "Martes",
            Weekday::Wednesday => "Miercoles",
            Weekday::Thursday => "Jueves",
            Weekday::Friday => "Viernes",
        }
    }

    pub fn from_wire(name: &str) -> Option<Weekday> {
        Weekday::ALL.into_iter().find(|day| day.wire_name() == name)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Morning or evening half of the teaching day. Every group lives entirely
/// in one shift; its lessons may only occupy slots of that shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    Morning,
    Evening,
}

impl Shift {
    /// Shift name as it appears in the input file.
    pub fn wire_name(self) -> &'static str {
        match self {
            Shift::Morning => "Matutino",
            Shift::Evening => "Vespertino",
        }
    }

    pub fn from_wire(name: &str) -> Option<Shift> {
        match name {
            "Matutino" => Some(Shift::Morning),
            "Vespertino" => Some(Shift::Evening),
            _ => None,
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A cohort of students moving through a term together. Each group gets its
/// own weekly timetable.
#[derive(Debug, Clone)]
pub struct Group {
    /// Position of the group in the instance's group list
    pub index: usize,
    /// Unique group name
    pub name: String,
    /// Term number; groups take exactly the subjects of their term
    pub term: u32,
    pub shift: Shift,
}

/// A course with a fixed weekly hour requirement.
#[derive(Debug, Clone)]
pub struct Subject {
    /// Position of the subject in the instance's subject list
    pub index: usize,
    /// Unique subject name
    pub name: String,
    pub term: u32,
    /// Hours per week each enrolled group must receive
    pub weekly_hours: u32,
    /// Indices of the groups taking this subject, filled in once by
    /// `Instance::link_groups_taking` (groups of the same term, input order)
    pub groups_taking: Vec<usize>,
}

/// A teacher qualified for a subset of subjects, with a weekly hour cap and
/// optional availability windows.
#[derive(Debug, Clone)]
pub struct Professor {
    /// Position of the professor in the instance's professor list
    pub index: usize,
    /// Unique professor name
    pub name: String,
    /// Indices of the subjects this professor may teach
    pub subjects: Vec<usize>,
    /// Maximum teaching hours per week
    pub max_hours: u32,
    /// `None` means the professor accepts either shift
    pub preferred_shift: Option<Shift>,
    /// Per-day `(start, end)` hour windows the professor can teach in.
    /// An empty map means always available; a non-empty map restricts
    /// teaching to the listed days and windows.
    pub availability: HashMap<Weekday, Vec<(u8, u8)>>,
}

impl Professor {
    pub fn qualifies_for(&self, subject: usize) -> bool {
        self.subjects.contains(&subject)
    }

    /// Whether the professor's availability windows admit this slot. With an
    /// empty map every slot is admitted; otherwise the slot's day must be
    /// listed and one window must cover the whole slot, comparing by hour.
    pub fn available_for(&self, slot: &Slot) -> bool {
        if self.availability.is_empty() {
            return true;
        }
        match self.availability.get(&slot.day) {
            Some(windows) => windows
                .iter()
                .any(|&(start, end)| slot.start >= start && slot.end <= end),
            None => false,
        }
    }
}

/// One one-hour cell of the weekly grid, fixed by day, start/end hour and
/// shift. Slots come exclusively from `slots::all_slots`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub day: Weekday,
    /// Start hour (slots always begin on the hour)
    pub start: u8,
    /// End hour, always `start + 1`
    pub end: u8,
    pub shift: Shift,
}

impl Slot {
    /// Stable key of the slot within a day, `"HH:MM-HH:MM"`.
    pub fn key(&self) -> String {
        format!("{:02}:00-{:02}:00", self.start, self.end)
    }

    /// Position of this slot within the whole teaching day 07:00-21:00
    /// (0..14). The grids index hours at this granularity because a
    /// professor may teach in both shifts of the same day.
    pub fn hour_ordinal(&self) -> usize {
        (self.start - 7) as usize
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.key())
    }
}

/// A fully loaded timetabling problem: all groups, subjects and professors.
/// Immutable while a solve is running.
#[derive(Debug, Clone)]
pub struct Instance {
    pub groups: Vec<Group>,
    pub subjects: Vec<Subject>,
    pub professors: Vec<Professor>,
}

impl Instance {
    /// Enroll every group into the subjects of its term. Must run once after
    /// loading, before the instance is handed to the solver.
    pub fn link_groups_taking(&mut self) {
        for subject in &mut self.subjects {
            subject.groups_taking = self
                .groups
                .iter()
                .filter(|group| group.term == subject.term)
                .map(|group| group.index)
                .collect();
        }
    }

    /// Professors qualified to teach `subject`, in input order.
    pub fn qualified_professors(&self, subject: usize) -> Vec<usize> {
        self.professors
            .iter()
            .filter(|professor| professor.qualifies_for(subject))
            .map(|professor| professor.index)
            .collect()
    }

    /// Pre-solve consistency report. Issues do not stop the solver (an
    /// inconsistent instance simply comes back infeasible), but they tell
    /// the operator why a search is doomed before it runs.
    pub fn consistency_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        for subject in &self.subjects {
            if self.qualified_professors(subject.index).is_empty() {
                issues.push(format!(
                    "subject '{}' has no qualified professor",
                    subject.name
                ));
            }
        }

        let demanded: u32 = self
            .subjects
            .iter()
            .map(|subject| subject.weekly_hours * subject.groups_taking.len() as u32)
            .sum();
        let capacity: u32 = self.professors.iter().map(|p| p.max_hours).sum();
        if demanded > capacity {
            issues.push(format!(
                "{}h/week demanded but professors offer only {}h/week (deficit {}h)",
                demanded,
                capacity,
                demanded - capacity
            ));
        }

        for (kind, names) in [
            ("group", self.groups.iter().map(|g| g.name.as_str()).collect()),
            (
                "subject",
                self.subjects.iter().map(|s| s.name.as_str()).collect(),
            ),
            (
                "professor",
                self.professors.iter().map(|p| p.name.as_str()).collect(),
            ),
        ] {
            let duplicates = duplicate_names(names);
            if !duplicates.is_empty() {
                issues.push(format!("duplicate {} names: {}", kind, duplicates.join(", ")));
            }
        }

        issues
    }
}

fn duplicate_names(names: Vec<&str>) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for name in names {
        if !seen.insert(name) && !duplicates.contains(&name) {
            duplicates.push(name);
        }
    }
    duplicates
}
