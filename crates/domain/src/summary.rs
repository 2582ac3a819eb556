use crate::{BodyWeightEntry, Name, WorkoutSession, body_weight};

struct ExerciseTotals {
    max_weight: f32,
    total_volume: f32,
    sessions: u32,
}

/// Shareable plain-text summary of all logged data.
///
/// The layout is fixed: overall counts, the top 3 exercises by accumulated
/// volume, and a body-weight section when entries exist. Weights are
/// rendered with one decimal, volumes as whole kg, counts as integers. The
/// output is deterministic for a given input.
///
/// The most recent and oldest body-weight entries are determined by date,
/// not by collection order.
#[must_use]
pub fn share_summary(sessions: &[WorkoutSession], body_weights: &[BodyWeightEntry]) -> String {
    let total_workouts = sessions.len();
    let total_exercises = sessions.iter().map(|s| s.exercises.len()).sum::<usize>();
    let total_sets = sessions.iter().map(WorkoutSession::num_sets).sum::<usize>();

    let mut totals: Vec<(Name, ExerciseTotals)> = vec![];
    for session in sessions {
        for exercise in &session.exercises {
            let max_weight = exercise.max_weight().unwrap_or(0.0);
            let volume = exercise.volume();
            if let Some((_, t)) = totals
                .iter_mut()
                .find(|(name, _)| *name == exercise.exercise_name)
            {
                t.max_weight = t.max_weight.max(max_weight);
                t.total_volume += volume;
                t.sessions += 1;
            } else {
                totals.push((
                    exercise.exercise_name.clone(),
                    ExerciseTotals {
                        max_weight,
                        total_volume: volume,
                        sessions: 1,
                    },
                ));
            }
        }
    }
    totals.sort_by(|a, b| b.1.total_volume.total_cmp(&a.1.total_volume));
    totals.truncate(3);

    let mut message = String::from("*💪 My Workout Progress Stats*\n\n");
    message.push_str("📊 *Overall Stats:*\n");
    message.push_str(&format!("• Total Workouts: {total_workouts}\n"));
    message.push_str(&format!("• Total Exercises: {total_exercises}\n"));
    message.push_str(&format!("• Total Sets: {total_sets}\n\n"));

    if !totals.is_empty() {
        message.push_str("🏋️ *Top 3 Exercises by Volume:*\n");
        for (i, (name, t)) in totals.iter().enumerate() {
            message.push_str(&format!("{}. {name}\n", i + 1));
            message.push_str(&format!("   • Max Weight: {:.1} kg\n", t.max_weight));
            message.push_str(&format!("   • Total Volume: {:.0} kg\n", t.total_volume));
            message.push_str(&format!("   • Sessions: {}\n", t.sessions));
        }
        message.push('\n');
    }

    if let (Some(current), Some(change)) = (
        body_weight::current(body_weights),
        body_weight::weight_change(body_weights),
    ) {
        message.push_str("⚖️ *Body Weight:*\n");
        message.push_str(&format!("• Current: {:.1} kg\n", current.weight));
        let sign = if change > 0.0 { "+" } else { "" };
        message.push_str(&format!("• Change: {sign}{change:.1} kg\n"));
    }

    message.push_str("\n_Tracked with Workout Tracker App_");

    message
}
