use std::error::Error;
use std::path::Path;

use setflow_core::{flatten, total_duration_secs, Activity, ActivityKind, Unit, Workout};

use super::format_mmss;

pub fn run(file: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let workout = Workout::from_json_file(file)?.normalized();
    let activities = flatten(&workout);

    if json {
        println!("{}", serde_json::to_string_pretty(&activities)?);
        return Ok(());
    }

    println!(
        "{}: {} activities, estimated {}",
        workout.title,
        activities.len(),
        format_mmss(workout.estimated_duration_secs()),
    );
    print_table(&activities);
    Ok(())
}

/// Overview table mirroring the in-app workout plan view.
pub(crate) fn print_table(activities: &[Activity]) {
    println!(
        "{:<4} {:<14} {:<24} {:>6} {:>10} {:>9}",
        "#", "section", "activity", "set", "time/reps", "kind"
    );
    for (index, activity) in activities.iter().enumerate() {
        let amount = match activity.unit {
            Unit::Reps => activity
                .quantity
                .as_ref()
                .map(|q| format!("{q} reps"))
                .unwrap_or_else(|| "-".into()),
            Unit::Time => activity
                .duration
                .map(|d| format!("{d}s"))
                .unwrap_or_else(|| "-".into()),
        };
        let kind = match activity.kind {
            ActivityKind::Exercise => "exercise",
            ActivityKind::Rest => "rest",
        };
        println!(
            "{:<4} {:<14} {:<24} {:>6} {:>10} {:>9}",
            index,
            activity.section_name,
            activity.name,
            format!("{}/{}", activity.current_set, activity.total_sets),
            amount,
            kind
        );
    }
    println!(
        "total planned time: {}",
        format_mmss(total_duration_secs(activities))
    );
}
