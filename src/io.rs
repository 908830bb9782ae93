pub mod json;

use std::fmt::Write;

use crate::slots::all_slots;
use crate::state::Timetable;
use crate::Instance;

/// Format a finished timetable into a human readable String (e.g. to print
/// it to stdout).
///
/// The output format will look like
/// ```text
/// ===== Group name =====
/// Lunes 07:00-08:00  Subject (Professor)
/// Martes 07:00-08:00  Subject (Professor)
///
/// ===== Another group name =====
/// …
/// ```
pub fn format_schedule(timetable: &Timetable, instance: &Instance) -> String {
    let mut result = String::new();
    for group in &instance.groups {
        write!(result, "\n===== {} =====\n", group.name).unwrap();
        for slot in all_slots(group.shift) {
            if let Some(placement) = timetable.get(group.index, &slot) {
                write!(
                    result,
                    "{}  {} ({})\n",
                    slot,
                    instance.subjects[placement.subject].name,
                    instance.professors[placement.professor].name
                )
                .unwrap();
            }
        }
    }
    result
}
