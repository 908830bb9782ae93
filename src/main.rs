use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use log::{debug, error, info, warn};

use horarium::conflicts::ConflictGraph;
use horarium::slots::{DAYS_PER_WEEK, SLOTS_PER_DAY};
use horarium::{io, solver};

/// Weekly academic timetable solver.
///
/// Reads a problem instance (groups, subjects, professors), searches for a
/// complete hard-constraint-satisfying weekly schedule and writes the
/// result. An infeasible instance is a valid result, not an error.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Problem instance (JSON)
    input: PathBuf,
    /// Destination file for the computed timetable (JSON)
    output: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(message) = run(&args) {
        error!("{}", message);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), String> {
    debug!("opening input file {}", args.input.display());
    let input = File::open(&args.input)
        .map_err(|err| format!("cannot open {}: {}", args.input.display(), err))?;
    let instance = io::json::read(input)?;
    info!(
        "read {} groups, {} subjects, {} professors",
        instance.groups.len(),
        instance.subjects.len(),
        instance.professors.len()
    );
    for issue in instance.consistency_issues() {
        warn!("{}", issue);
    }

    let graph = ConflictGraph::build(&instance);
    info!(
        "conflict graph: {} assignment units, {} conflicts",
        graph.node_count(),
        graph.edge_count()
    );
    let estimate = graph.greedy_coloring_estimate();
    let week_slots = DAYS_PER_WEEK * SLOTS_PER_DAY;
    if estimate > week_slots {
        warn!(
            "around {} mutually conflicting slots needed, but a shift only has {}",
            estimate, week_slots
        );
    } else {
        debug!(
            "coloring estimate: around {} of {} slots per shift",
            estimate, week_slots
        );
    }

    let solution = solver::solve(&instance, &graph);
    if solution.success {
        print!("{}", io::format_schedule(&solution.timetable, &instance));
    } else {
        info!("no feasible timetable for this instance");
    }

    let output = File::create(&args.output)
        .map_err(|err| format!("cannot write {}: {}", args.output.display(), err))?;
    io::json::write(output, &solution, &instance)?;
    info!("result written to {}", args.output.display());

    Ok(())
}
