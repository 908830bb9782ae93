//! Reading problem instances and writing results in the JSON wire format.
//! The file keys are the Spanish domain terms of the institution's data
//! exports (`grupos`, `materias`, `profesores` on the way in; `exito`,
//! `horario`, `estadisticas` on the way out); everything is translated to
//! the typed domain model at this boundary.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::slots::all_slots;
use crate::solver::Solution;
use crate::{Group, Instance, Professor, Shift, Subject, Weekday};

#[derive(Deserialize)]
struct RawInstance {
    grupos: Vec<RawGroup>,
    materias: Vec<RawSubject>,
    profesores: Vec<RawProfessor>,
}

#[derive(Deserialize)]
struct RawGroup {
    #[serde(rename = "nombre")]
    name: String,
    #[serde(rename = "turno")]
    shift: String,
    #[serde(rename = "cuatrimestre")]
    term: u32,
}

#[derive(Deserialize)]
struct RawSubject {
    #[serde(rename = "nombre")]
    name: String,
    #[serde(rename = "cuatrimestre")]
    term: u32,
    #[serde(rename = "horas_semana")]
    weekly_hours: u32,
}

#[derive(Deserialize)]
struct RawProfessor {
    #[serde(rename = "nombre")]
    name: String,
    #[serde(rename = "materias_imparte")]
    subjects: Vec<String>,
    #[serde(rename = "horas_disponibles")]
    max_hours: u32,
    #[serde(rename = "turno_preferido")]
    preferred_shift: String,
    #[serde(rename = "disponibilidad_horaria", default)]
    availability: Option<HashMap<String, Vec<(String, String)>>>,
}

/// Read a problem instance from its JSON representation and resolve all
/// by-name references to indices. Every group is enrolled into the subjects
/// of its term before the instance is returned.
pub fn read<R: std::io::Read>(reader: R) -> Result<Instance, String> {
    let raw: RawInstance = serde_json::from_reader(reader).map_err(|err| err.to_string())?;

    let groups = raw
        .grupos
        .into_iter()
        .enumerate()
        .map(|(index, g)| {
            Ok(Group {
                index,
                shift: parse_shift(&g.shift)?,
                name: g.name,
                term: g.term,
            })
        })
        .collect::<Result<Vec<_>, String>>()?;

    let subjects: Vec<Subject> = raw
        .materias
        .into_iter()
        .enumerate()
        .map(|(index, m)| Subject {
            index,
            name: m.name,
            term: m.term,
            weekly_hours: m.weekly_hours,
            groups_taking: Vec::new(),
        })
        .collect();

    let subject_index: HashMap<&str, usize> = subjects
        .iter()
        .map(|subject| (subject.name.as_str(), subject.index))
        .collect();

    let professors = raw
        .profesores
        .into_iter()
        .enumerate()
        .map(|(index, p)| {
            // Subject names with no match confer no qualification.
            let taught = p
                .subjects
                .iter()
                .filter_map(|name| subject_index.get(name.as_str()).copied())
                .collect();
            Ok(Professor {
                index,
                subjects: taught,
                max_hours: p.max_hours,
                preferred_shift: parse_preference(&p.preferred_shift)?,
                availability: parse_availability(p.availability, &p.name)?,
                name: p.name,
            })
        })
        .collect::<Result<Vec<_>, String>>()?;

    let mut instance = Instance {
        groups,
        subjects,
        professors,
    };
    instance.link_groups_taking();
    Ok(instance)
}

fn parse_shift(name: &str) -> Result<Shift, String> {
    Shift::from_wire(name).ok_or_else(|| format!("unknown shift '{}'", name))
}

fn parse_preference(name: &str) -> Result<Option<Shift>, String> {
    if name == "Ambos" {
        Ok(None)
    } else {
        parse_shift(name).map(Some)
    }
}

fn parse_availability(
    raw: Option<HashMap<String, Vec<(String, String)>>>,
    professor: &str,
) -> Result<HashMap<Weekday, Vec<(u8, u8)>>, String> {
    let mut availability = HashMap::new();
    let Some(days) = raw else {
        return Ok(availability);
    };
    for (day_name, windows) in days {
        let day = Weekday::from_wire(&day_name).ok_or_else(|| {
            format!("unknown day '{}' in availability of '{}'", day_name, professor)
        })?;
        let mut parsed = Vec::with_capacity(windows.len());
        for (start, end) in &windows {
            parsed.push((parse_hour(start)?, parse_hour(end)?));
        }
        // Days with no windows are dropped; only listed windows restrict.
        if !parsed.is_empty() {
            availability.insert(day, parsed);
        }
    }
    Ok(availability)
}

/// Leading two-digit hour of an `"HH:MM"` string; minutes are ignored.
fn parse_hour(text: &str) -> Result<u8, String> {
    text.get(..2)
        .and_then(|hour| hour.parse().ok())
        .ok_or_else(|| format!("malformed hour '{}'", text))
}

/// Write a solve result as JSON: the `exito` flag, the per-group timetable
/// under `horario` and the search statistics. Groups and days without any
/// lesson are omitted.
pub fn write<W: std::io::Write>(
    writer: W,
    solution: &Solution,
    instance: &Instance,
) -> Result<(), String> {
    let mut timetables = Map::new();
    for group in &instance.groups {
        let slots = all_slots(group.shift);
        let mut days = Map::new();
        for day in Weekday::ALL {
            let mut cells = Map::new();
            for slot in slots.iter().filter(|slot| slot.day == day) {
                if let Some(placement) = solution.timetable.get(group.index, slot) {
                    cells.insert(
                        slot.key(),
                        json!({
                            "materia": instance.subjects[placement.subject].name,
                            "profesor": instance.professors[placement.professor].name,
                        }),
                    );
                }
            }
            if !cells.is_empty() {
                days.insert(day.wire_name().to_string(), Value::Object(cells));
            }
        }
        if !days.is_empty() {
            timetables.insert(group.name.clone(), Value::Object(days));
        }
    }

    let data = json!({
        "exito": solution.success,
        "horario": timetables,
        "estadisticas": {
            "tiempo_total": solution.stats.total_time,
            "nodos_explorados": solution.stats.nodes_explored,
            "backtracks_realizados": solution.stats.backtracks,
            "profundidad_maxima": solution.stats.max_depth,
        },
    });
    serde_json::to_writer_pretty(writer, &data).map_err(|err| err.to_string())
}
