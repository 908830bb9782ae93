//! Depth-first backtracking search over pending (group, subject) units.
//!
//! The engine walks the pending list in input order. For each unit it fills
//! the subject's weekly hour quota one slot at a time: slots are tried in
//! heuristic order, qualified professors in input order, and every
//! tentative placement passes the hard-constraint check before it is
//! committed. A dead end undoes the last placement and tries the next
//! candidate; exhausting all candidates for a unit fails the whole search.
//! These orderings are the only tie-breakers, so a given instance always
//! produces the same exploration and the same result.

use std::time::Instant;

use log::{debug, info, trace};

use crate::conflicts::ConflictGraph;
use crate::constraints::check_placement;
use crate::heuristics::order_slots;
use crate::slots::all_slots;
use crate::state::{Placement, SearchState, Timetable};
use crate::Instance;

#[cfg(test)]
mod tests;

/// An unmet (group, subject) obligation: the hours it requires and the
/// professors allowed to teach it, fixed at construction.
#[derive(Debug, Clone)]
pub struct PendingUnit {
    pub group: usize,
    pub subject: usize,
    pub hours: u32,
    pub professors: Vec<usize>,
}

/// Metrics of one search run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    /// Wall-clock seconds spent searching
    pub total_time: f64,
    /// Tentative placements committed, including later-undone ones
    pub nodes_explored: u64,
    /// Undo operations performed
    pub backtracks: u64,
    /// Deepest recursion level reached
    pub max_depth: u32,
}

/// Outcome of a solve. On failure the timetable is empty; no partial
/// schedule is surfaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub success: bool,
    pub timetable: Timetable,
    pub stats: Stats,
}

/// Build the pending-assignment list: one unit per (group, subject) pair,
/// subject-major in input order, qualified professors in input order.
pub fn pending_units(instance: &Instance) -> Vec<PendingUnit> {
    let mut units = Vec::new();
    for subject in &instance.subjects {
        for &group in &subject.groups_taking {
            units.push(PendingUnit {
                group,
                subject: subject.index,
                hours: subject.weekly_hours,
                professors: instance.qualified_professors(subject.index),
            });
        }
    }
    units
}

/// Solve one instance. Returns a complete constraint-satisfying timetable,
/// or `success = false` when the search space is exhausted. Infeasibility
/// is a regular outcome, not an error.
pub fn solve(instance: &Instance, graph: &ConflictGraph) -> Solution {
    let started = Instant::now();

    let units = pending_units(instance);
    info!("starting search over {} pending assignments", units.len());
    debug!(
        "conflict graph: {} units, {} conflicts, density {:.3}",
        graph.node_count(),
        graph.edge_count(),
        graph.density()
    );

    let mut search = Search {
        instance,
        state: SearchState::new(instance),
        nodes_explored: 0,
        backtracks: 0,
        max_depth: 0,
    };
    let success = search.assign_from(&units, 0, 1);

    let stats = Stats {
        total_time: started.elapsed().as_secs_f64(),
        nodes_explored: search.nodes_explored,
        backtracks: search.backtracks,
        max_depth: search.max_depth,
    };
    if success {
        info!(
            "complete timetable found in {:.3}s ({} placements explored, {} backtracks)",
            stats.total_time, stats.nodes_explored, stats.backtracks
        );
    } else {
        info!(
            "search exhausted after {:.3}s ({} placements explored): no feasible timetable",
            stats.total_time, stats.nodes_explored
        );
    }

    let timetable = if success {
        search.state.into_timetable()
    } else {
        Timetable::empty(instance.groups.len())
    };
    Solution {
        success,
        timetable,
        stats,
    }
}

struct Search<'a> {
    instance: &'a Instance,
    state: SearchState,
    nodes_explored: u64,
    backtracks: u64,
    max_depth: u32,
}

impl Search<'_> {
    /// Outer recursion over the pending list. A fully placed unit is never
    /// revisited; once every unit is placed the completeness check decides.
    fn assign_from(&mut self, units: &[PendingUnit], index: usize, depth: u32) -> bool {
        if index == units.len() {
            return self.state.is_complete(self.instance);
        }

        let unit = &units[index];
        debug!(
            "assigning '{}' to group '{}' ({}h, {} candidate professors)",
            self.instance.subjects[unit.subject].name,
            self.instance.groups[unit.group].name,
            unit.hours,
            unit.professors.len()
        );

        if self.place_unit(unit, depth) {
            return self.assign_from(units, index + 1, depth + 1);
        }
        false
    }

    /// Place the next hour of one unit, recursing until its quota is met.
    fn place_unit(&mut self, unit: &PendingUnit, depth: u32) -> bool {
        self.max_depth = self.max_depth.max(depth);
        if self.state.placed_hours(unit.group, unit.subject) >= unit.hours {
            return true;
        }

        let group = &self.instance.groups[unit.group];
        let candidates = order_slots(&all_slots(group.shift), self.state.timetable(), group);

        for slot in &candidates {
            for &professor_index in &unit.professors {
                let professor = &self.instance.professors[professor_index];
                if let Err(conflict) = check_placement(&self.state, group, professor, slot) {
                    trace!(
                        "{} / {} at {}: {}",
                        group.name,
                        professor.name,
                        slot,
                        conflict
                    );
                    continue;
                }

                let placement = Placement {
                    subject: unit.subject,
                    professor: professor_index,
                };
                self.state.commit(unit.group, placement, slot);
                self.nodes_explored += 1;

                if self.place_unit(unit, depth + 1) {
                    return true;
                }

                self.state.undo(unit.group, placement, slot);
                self.backtracks += 1;
            }
        }
        false
    }
}
