use super::{pending_units, solve, Solution};
use crate::conflicts::ConflictGraph;
use crate::slots::all_slots;
use crate::state::{Placement, Timetable};
use crate::{Group, Instance, Professor, Shift, Slot, Subject, Weekday};
use std::collections::HashMap;

fn group(index: usize, name: &str, term: u32, shift: Shift) -> Group {
    Group {
        index,
        name: String::from(name),
        term,
        shift,
    }
}

fn subject(index: usize, name: &str, term: u32, weekly_hours: u32) -> Subject {
    Subject {
        index,
        name: String::from(name),
        term,
        weekly_hours,
        groups_taking: Vec::new(),
    }
}

fn professor(
    index: usize,
    name: &str,
    subjects: Vec<usize>,
    max_hours: u32,
    preferred_shift: Option<Shift>,
) -> Professor {
    Professor {
        index,
        name: String::from(name),
        subjects,
        max_hours,
        preferred_shift,
        availability: HashMap::new(),
    }
}

fn build_instance(
    groups: Vec<Group>,
    subjects: Vec<Subject>,
    professors: Vec<Professor>,
) -> Instance {
    let mut instance = Instance {
        groups,
        subjects,
        professors,
    };
    instance.link_groups_taking();
    instance
}

fn run(instance: &Instance) -> Solution {
    let graph = ConflictGraph::build(instance);
    solve(instance, &graph)
}

/// All occupied cells of one group, in catalog order.
fn placed_slots(timetable: &Timetable, group: usize, shift: Shift) -> Vec<(Slot, Placement)> {
    all_slots(shift)
        .into_iter()
        .filter_map(|slot| timetable.get(group, &slot).map(|p| (slot, p)))
        .collect()
}

#[test]
fn trivial_instance_is_solved() {
    // One group, one two-hour subject, one unconstrained professor. The
    // heuristic takes the earliest hour and then spreads to the next day.
    let instance = build_instance(
        vec![group(0, "1A", 1, Shift::Morning)],
        vec![subject(0, "Algebra", 1, 2)],
        vec![professor(0, "Rivera", vec![0], 10, Some(Shift::Morning))],
    );
    let solution = run(&instance);

    assert!(solution.success);
    let placed = placed_slots(&solution.timetable, 0, Shift::Morning);
    assert_eq!(placed.len(), 2);
    assert_eq!(
        (placed[0].0.day, placed[0].0.start),
        (Weekday::Monday, 7)
    );
    assert_eq!(
        (placed[1].0.day, placed[1].0.start),
        (Weekday::Tuesday, 7)
    );
    for (_, placement) in &placed {
        assert_eq!(placement.subject, 0);
        assert_eq!(placement.professor, 0);
    }
    assert_eq!(solution.stats.nodes_explored, 2);
}

#[test]
fn exhausted_professor_budget_is_infeasible() {
    // Four hours demanded, three available: the search must give up and
    // hand back an empty timetable, not a partial one.
    let instance = build_instance(
        vec![group(0, "1A", 1, Shift::Morning)],
        vec![subject(0, "Algebra", 1, 4)],
        vec![professor(0, "Rivera", vec![0], 3, Some(Shift::Morning))],
    );
    let solution = run(&instance);

    assert!(!solution.success);
    assert!(solution.timetable.is_empty());
}

#[test]
fn shift_preference_mismatch_is_infeasible() {
    let instance = build_instance(
        vec![group(0, "5B", 5, Shift::Evening)],
        vec![subject(0, "Redes", 5, 2)],
        vec![professor(0, "Rivera", vec![0], 10, Some(Shift::Morning))],
    );
    let solution = run(&instance);

    assert!(!solution.success);
    assert!(solution.timetable.is_empty());
}

#[test]
fn availability_window_pins_the_slots() {
    // The professor can only teach Tuesday 08:00-10:00, so both hours of
    // the subject must land exactly there.
    let mut prof = professor(0, "Rivera", vec![0], 10, None);
    prof.availability.insert(Weekday::Tuesday, vec![(8, 10)]);
    let instance = build_instance(
        vec![group(0, "1A", 1, Shift::Morning)],
        vec![subject(0, "Algebra", 1, 2)],
        vec![prof],
    );
    let solution = run(&instance);

    assert!(solution.success);
    let placed = placed_slots(&solution.timetable, 0, Shift::Morning);
    let cells: Vec<(Weekday, u8)> = placed.iter().map(|(s, _)| (s.day, s.start)).collect();
    assert_eq!(
        cells,
        vec![(Weekday::Tuesday, 8), (Weekday::Tuesday, 9)]
    );
}

#[test]
fn shared_professor_never_clashes() {
    // Two groups need the same one-hour subject from the only qualified
    // professor; the occupancy mirror must force distinct slots.
    let instance = build_instance(
        vec![
            group(0, "1A", 1, Shift::Morning),
            group(1, "1B", 1, Shift::Morning),
        ],
        vec![subject(0, "Algebra", 1, 1)],
        vec![professor(0, "Rivera", vec![0], 2, None)],
    );
    let solution = run(&instance);

    assert!(solution.success);
    let first = placed_slots(&solution.timetable, 0, Shift::Morning);
    let second = placed_slots(&solution.timetable, 1, Shift::Morning);
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!((first[0].0.day, first[0].0.start), (Weekday::Monday, 7));
    assert_eq!((second[0].0.day, second[0].0.start), (Weekday::Monday, 8));
}

#[test]
fn two_subjects_fill_distinct_cells() {
    // One group, two five-hour subjects: ten placements in ten distinct
    // cells, one early hour per day for the first subject and the next
    // hour for the second.
    let instance = build_instance(
        vec![group(0, "1A", 1, Shift::Morning)],
        vec![
            subject(0, "Algebra", 1, 5),
            subject(1, "Fisica", 1, 5),
        ],
        vec![professor(0, "Rivera", vec![0, 1], 12, None)],
    );
    let solution = run(&instance);

    assert!(solution.success);
    let placed = placed_slots(&solution.timetable, 0, Shift::Morning);
    assert_eq!(placed.len(), 10);

    for day in Weekday::ALL {
        let on_day: Vec<&(Slot, Placement)> =
            placed.iter().filter(|(s, _)| s.day == day).collect();
        assert_eq!(on_day.len(), 2);
        assert_eq!(on_day[0].0.start, 7);
        assert_eq!(on_day[0].1.subject, 0);
        assert_eq!(on_day[1].0.start, 8);
        assert_eq!(on_day[1].1.subject, 1);
    }
}

#[test]
fn failing_later_unit_fails_the_whole_search() {
    // The professor has a single hour: the first group is served, the
    // second cannot be, and the result must still be a clean infeasible.
    let instance = build_instance(
        vec![
            group(0, "1A", 1, Shift::Morning),
            group(1, "1B", 1, Shift::Morning),
        ],
        vec![subject(0, "Algebra", 1, 1)],
        vec![professor(0, "Rivera", vec![0], 1, None)],
    );
    let solution = run(&instance);

    assert!(!solution.success);
    assert!(solution.timetable.is_empty());
}

#[test]
fn only_qualified_professors_teach() {
    // The first professor in input order is not qualified for the subject
    // and must never appear in the timetable.
    let instance = build_instance(
        vec![group(0, "1A", 1, Shift::Morning)],
        vec![subject(0, "Algebra", 1, 3)],
        vec![
            professor(0, "Vega", vec![], 10, None),
            professor(1, "Rivera", vec![0], 10, None),
        ],
    );
    let solution = run(&instance);

    assert!(solution.success);
    for (_, placement) in placed_slots(&solution.timetable, 0, Shift::Morning) {
        assert_eq!(placement.professor, 1);
    }
}

#[test]
fn professor_budget_is_never_exceeded() {
    // Two professors share the load once the first one's budget runs out.
    let instance = build_instance(
        vec![group(0, "1A", 1, Shift::Morning)],
        vec![subject(0, "Algebra", 1, 5)],
        vec![
            professor(0, "Vega", vec![0], 2, None),
            professor(1, "Rivera", vec![0], 10, None),
        ],
    );
    let solution = run(&instance);

    assert!(solution.success);
    let placed = placed_slots(&solution.timetable, 0, Shift::Morning);
    assert_eq!(placed.len(), 5);
    let vega_hours = placed.iter().filter(|(_, p)| p.professor == 0).count();
    assert!(vega_hours <= 2);
}

#[test]
fn completed_units_meet_their_quota_exactly() {
    let instance = build_instance(
        vec![
            group(0, "1A", 1, Shift::Morning),
            group(1, "1B", 1, Shift::Morning),
        ],
        vec![
            subject(0, "Algebra", 1, 2),
            subject(1, "Fisica", 1, 3),
        ],
        vec![
            professor(0, "Vega", vec![0], 10, None),
            professor(1, "Rivera", vec![1], 10, None),
        ],
    );
    let solution = run(&instance);

    assert!(solution.success);
    for subject in &instance.subjects {
        for &group in &subject.groups_taking {
            let hours = placed_slots(&solution.timetable, group, Shift::Morning)
                .iter()
                .filter(|(_, p)| p.subject == subject.index)
                .count() as u32;
            assert_eq!(hours, subject.weekly_hours);
        }
    }
}

#[test]
fn groups_only_occupy_their_own_shift() {
    let instance = build_instance(
        vec![
            group(0, "1A", 1, Shift::Morning),
            group(1, "5B", 5, Shift::Evening),
        ],
        vec![
            subject(0, "Algebra", 1, 2),
            subject(1, "Redes", 5, 2),
        ],
        vec![professor(0, "Rivera", vec![0, 1], 10, None)],
    );
    let solution = run(&instance);

    assert!(solution.success);
    // A morning group's cells are reachable through morning slots only,
    // and symmetrically for the evening group.
    assert_eq!(placed_slots(&solution.timetable, 0, Shift::Morning).len(), 2);
    assert_eq!(placed_slots(&solution.timetable, 1, Shift::Evening).len(), 2);
}

#[test]
fn identical_runs_give_identical_results() {
    let instance = build_instance(
        vec![
            group(0, "1A", 1, Shift::Morning),
            group(1, "1B", 1, Shift::Morning),
        ],
        vec![
            subject(0, "Algebra", 1, 3),
            subject(1, "Fisica", 1, 2),
        ],
        vec![
            professor(0, "Vega", vec![0, 1], 6, None),
            professor(1, "Rivera", vec![0, 1], 6, None),
        ],
    );
    let first = run(&instance);
    let second = run(&instance);

    assert_eq!(first.success, second.success);
    assert_eq!(first.timetable, second.timetable);
    assert_eq!(first.stats.nodes_explored, second.stats.nodes_explored);
    assert_eq!(first.stats.backtracks, second.stats.backtracks);
}

#[test]
fn pending_units_follow_input_order() {
    let instance = build_instance(
        vec![
            group(0, "1A", 1, Shift::Morning),
            group(1, "1B", 1, Shift::Morning),
        ],
        vec![
            subject(0, "Algebra", 1, 2),
            subject(1, "Fisica", 1, 2),
        ],
        vec![
            professor(0, "Vega", vec![0, 1], 10, None),
            professor(1, "Rivera", vec![0], 10, None),
        ],
    );
    let units = pending_units(&instance);

    let order: Vec<(usize, usize)> = units.iter().map(|u| (u.subject, u.group)).collect();
    assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    // Qualified professors keep professor input order.
    assert_eq!(units[0].professors, vec![0, 1]);
    assert_eq!(units[2].professors, vec![0]);
}

#[test]
fn empty_instance_is_trivially_complete() {
    let instance = build_instance(Vec::new(), Vec::new(), Vec::new());
    let solution = run(&instance);
    assert!(solution.success);
    assert_eq!(solution.stats.nodes_explored, 0);
}
