use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::{Name, WorkoutSession};

/// One charted session of a selected exercise.
///
/// Weights and volume keep full precision. Rounding to display resolution
/// (0.1 kg for weights, whole kg for volume) is left to the presentation
/// layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub max_weight: f32,
    pub avg_weight: f32,
    pub total_volume: f32,
    pub personal_record: bool,
}

/// Distinct exercise names across all sessions, sorted alphabetically.
#[must_use]
pub fn exercise_names(sessions: &[WorkoutSession]) -> Vec<Name> {
    sessions
        .iter()
        .flat_map(|s| s.exercises.iter().map(|e| e.exercise_name.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Per-session time series for the given exercise, ascending by date, and
/// the all-time personal record.
///
/// A data point is flagged as personal record when its max weight strictly
/// exceeds every earlier session's max weight. The returned record is `None`
/// when there is no data, as opposed to a record of 0.
#[must_use]
pub fn progress_series(
    sessions: &[WorkoutSession],
    exercise_name: &Name,
) -> (Vec<DataPoint>, Option<f32>) {
    let mut matching = sessions
        .iter()
        .filter(|s| s.exercise(exercise_name).is_some())
        .collect::<Vec<_>>();
    matching.sort_by_key(|s| s.date);

    let mut points = vec![];
    let mut current_record = 0.0;

    for session in matching {
        let Some(exercise) = session.exercise(exercise_name) else {
            continue;
        };
        let (Some(max_weight), Some(avg_weight)) = (exercise.max_weight(), exercise.avg_weight())
        else {
            continue;
        };

        let personal_record = max_weight > current_record;
        if personal_record {
            current_record = max_weight;
        }

        points.push(DataPoint {
            date: session.date,
            max_weight,
            avg_weight,
            total_volume: exercise.volume(),
            personal_record,
        });
    }

    let record = if current_record > 0.0 {
        Some(current_record)
    } else {
        None
    };

    (points, record)
}
