use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};

use crate::{
    BodyWeightService, DataPoint, Name, ReadError, WorkoutSession, WorkoutSessionService,
    progress, summary,
};

pub trait StatisticsService: WorkoutSessionService + BodyWeightService {
    fn get_streak(&self) -> Result<u32, ReadError> {
        Ok(streak(
            &self.get_workout_sessions()?,
            Local::now().date_naive(),
        ))
    }

    fn get_personal_records(&self) -> Result<BTreeMap<Name, PersonalRecord>, ReadError> {
        Ok(personal_records(&self.get_workout_sessions()?))
    }

    fn get_volume_by_muscle_group(&self) -> Result<BTreeMap<String, f32>, ReadError> {
        Ok(volume_by_muscle_group(&self.get_workout_sessions()?))
    }

    fn get_avg_duration(&self) -> Result<u32, ReadError> {
        Ok(avg_duration(&self.get_workout_sessions()?))
    }

    fn get_exercise_names(&self) -> Result<Vec<Name>, ReadError> {
        Ok(progress::exercise_names(&self.get_workout_sessions()?))
    }

    fn get_progress_series(
        &self,
        exercise_name: &Name,
    ) -> Result<(Vec<DataPoint>, Option<f32>), ReadError> {
        Ok(progress::progress_series(
            &self.get_workout_sessions()?,
            exercise_name,
        ))
    }

    fn get_share_summary(&self) -> Result<String, ReadError> {
        Ok(summary::share_summary(
            &self.get_workout_sessions()?,
            &self.get_body_weight()?,
        ))
    }
}

/// Heaviest single set ever logged for an exercise.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalRecord {
    pub weight: f32,
    pub date: NaiveDate,
    pub reps: u32,
}

/// Consecutive-day count of logged sessions ending at or adjacent to
/// `as_of`.
///
/// Sessions are walked in descending date order. A session counts as long as
/// it is at most one day before the current cursor. Multiple sessions on the
/// same calendar date each advance the streak.
#[must_use]
pub fn streak(sessions: &[WorkoutSession], as_of: NaiveDate) -> u32 {
    let mut dates = sessions.iter().map(|s| s.date).collect::<Vec<_>>();
    dates.sort_unstable_by(|a, b| b.cmp(a));

    let mut result = 0;
    let mut cursor = as_of;

    for date in dates {
        let days_diff = (cursor - date).num_days();
        if days_diff == 0 || days_diff == 1 {
            result += 1;
            cursor = date;
        } else {
            break;
        }
    }

    result
}

/// Heaviest single set per exercise name across all sessions.
///
/// Records are only replaced by a strictly heavier set, so on equal weights
/// the first-encountered set wins (input iteration order).
#[must_use]
pub fn personal_records(sessions: &[WorkoutSession]) -> BTreeMap<Name, PersonalRecord> {
    let mut records: BTreeMap<Name, PersonalRecord> = BTreeMap::new();

    for session in sessions {
        for exercise in &session.exercises {
            for set in &exercise.sets {
                let weight = f32::from(set.weight);
                match records.get(&exercise.exercise_name) {
                    Some(record) if weight <= record.weight => {}
                    _ => {
                        records.insert(
                            exercise.exercise_name.clone(),
                            PersonalRecord {
                                weight,
                                date: session.date,
                                reps: u32::from(set.reps),
                            },
                        );
                    }
                }
            }
        }
    }

    records
}

/// Top `n` personal records by weight, descending.
#[must_use]
pub fn top_personal_records<'a>(
    records: &'a BTreeMap<Name, PersonalRecord>,
    n: usize,
) -> Vec<(&'a Name, &'a PersonalRecord)> {
    let mut result = records.iter().collect::<Vec<_>>();
    result.sort_by(|a, b| b.1.weight.total_cmp(&a.1.weight));
    result.truncate(n);
    result
}

/// Accumulated volume per muscle group. Exercises without a muscle group are
/// bucketed under "Other".
#[must_use]
pub fn volume_by_muscle_group(sessions: &[WorkoutSession]) -> BTreeMap<String, f32> {
    let mut result: BTreeMap<String, f32> = BTreeMap::new();

    for session in sessions {
        for exercise in &session.exercises {
            *result.entry(exercise.muscle_group().to_string()).or_insert(0.0) +=
                exercise.volume();
        }
    }

    result
}

#[must_use]
pub fn total_volume(sessions: &[WorkoutSession]) -> f32 {
    sessions.iter().map(WorkoutSession::volume).sum()
}

#[must_use]
pub fn top_muscle_group(volume: &BTreeMap<String, f32>) -> Option<(&str, f32)> {
    volume
        .iter()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(group, volume)| (group.as_str(), *volume))
}

/// Mean duration in minutes over sessions with a positive duration, rounded
/// to the nearest minute. 0 when no such session exists.
#[must_use]
pub fn avg_duration(sessions: &[WorkoutSession]) -> u32 {
    let durations = sessions
        .iter()
        .filter_map(|s| s.duration)
        .filter(|d| *d > 0)
        .collect::<Vec<_>>();

    if durations.is_empty() {
        0
    } else {
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_precision_loss,
            clippy::cast_sign_loss
        )]
        {
            (f64::from(durations.iter().sum::<u32>()) / durations.len() as f64).round() as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{ExerciseInSession, Reps, Weight, WorkoutSet};

    use super::*;

    fn from_ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn exercise(name: &str, muscle_group: Option<&str>, sets: &[(u32, f32)]) -> ExerciseInSession {
        ExerciseInSession::new(
            Name::new(name).unwrap(),
            sets.iter()
                .enumerate()
                .map(|(i, (reps, weight))| WorkoutSet {
                    #[allow(clippy::cast_possible_truncation)]
                    set_number: i as u32 + 1,
                    reps: Reps::new(*reps).unwrap(),
                    weight: Weight::new(*weight).unwrap(),
                })
                .collect(),
            muscle_group.map(String::from),
        )
        .unwrap()
    }

    fn session(
        id: u128,
        date: NaiveDate,
        duration: Option<u32>,
        exercises: Vec<ExerciseInSession>,
    ) -> WorkoutSession {
        WorkoutSession {
            id: id.into(),
            date,
            exercises,
            duration,
            start_time: None,
        }
    }

    fn bench_session(id: u128, date: NaiveDate, sets: &[(u32, f32)]) -> WorkoutSession {
        session(
            id,
            date,
            None,
            vec![exercise("Bench Press", Some("Chest"), sets)],
        )
    }

    #[test]
    fn test_streak_no_sessions() {
        assert_eq!(streak(&[], from_ymd(2024, 1, 10)), 0);
    }

    #[rstest]
    #[case::today(&[0], 1)]
    #[case::yesterday(&[1], 1)]
    #[case::today_and_yesterday(&[0, 1], 2)]
    #[case::gap_of_two_days(&[0, 2], 1)]
    #[case::long_run(&[0, 1, 2, 3], 4)]
    #[case::run_broken_by_gap(&[0, 1, 3, 4], 2)]
    #[case::only_in_the_past(&[2, 3], 0)]
    fn test_streak(#[case] days_before: &[i64], #[case] expected: u32) {
        let as_of = from_ymd(2024, 1, 10);
        let sessions = days_before
            .iter()
            .enumerate()
            .map(|(i, days)| {
                bench_session(i as u128 + 1, as_of - chrono::Duration::days(*days), &[(10, 50.0)])
            })
            .collect::<Vec<_>>();
        assert_eq!(streak(&sessions, as_of), expected);
    }

    #[test]
    fn test_streak_counts_same_day_sessions_individually() {
        // Two sessions on the same calendar date yield a streak of 2.
        let as_of = from_ymd(2024, 1, 10);
        let sessions = vec![
            bench_session(1, as_of, &[(10, 50.0)]),
            bench_session(2, as_of, &[(10, 50.0)]),
        ];
        assert_eq!(streak(&sessions, as_of), 2);
    }

    #[test]
    fn test_streak_ignores_future_sessions() {
        let as_of = from_ymd(2024, 1, 10);
        let sessions = vec![bench_session(1, from_ymd(2024, 1, 12), &[(10, 50.0)])];
        assert_eq!(streak(&sessions, as_of), 0);
    }

    #[test]
    fn test_personal_records_empty() {
        assert_eq!(personal_records(&[]), BTreeMap::new());
    }

    #[test]
    fn test_personal_records_heaviest_set_wins() {
        let sessions = vec![
            bench_session(1, from_ymd(2024, 1, 10), &[(10, 50.0), (8, 55.0)]),
            bench_session(2, from_ymd(2024, 1, 9), &[(10, 52.0)]),
        ];
        assert_eq!(
            personal_records(&sessions),
            BTreeMap::from([(
                Name::new("Bench Press").unwrap(),
                PersonalRecord {
                    weight: 55.0,
                    date: from_ymd(2024, 1, 10),
                    reps: 8,
                }
            )])
        );
    }

    #[test]
    fn test_personal_records_tie_first_encountered_wins() {
        // On equal weights the record keeps the first-encountered set, in
        // input collection order rather than date order.
        let sessions = vec![
            bench_session(1, from_ymd(2024, 1, 10), &[(10, 50.0)]),
            bench_session(2, from_ymd(2024, 1, 2), &[(5, 50.0)]),
        ];
        assert_eq!(
            personal_records(&sessions),
            BTreeMap::from([(
                Name::new("Bench Press").unwrap(),
                PersonalRecord {
                    weight: 50.0,
                    date: from_ymd(2024, 1, 10),
                    reps: 10,
                }
            )])
        );
    }

    #[test]
    fn test_top_personal_records() {
        let sessions = vec![session(
            1,
            from_ymd(2024, 1, 10),
            None,
            vec![
                exercise("Bench Press", Some("Chest"), &[(10, 50.0)]),
                exercise("Squat", Some("Legs"), &[(5, 100.0)]),
                exercise("Deadlift", Some("Back"), &[(5, 120.0)]),
                exercise("Curl", Some("Biceps"), &[(12, 15.0)]),
            ],
        )];
        let records = personal_records(&sessions);
        let top = top_personal_records(&records, 3);
        assert_eq!(
            top.iter().map(|(name, _)| name.as_ref()).collect::<Vec<&str>>(),
            vec!["Deadlift", "Squat", "Bench Press"]
        );
    }

    #[test]
    fn test_volume_by_muscle_group() {
        let sessions = vec![
            session(
                1,
                from_ymd(2024, 1, 10),
                None,
                vec![
                    exercise("Bench Press", Some("Chest"), &[(10, 50.0)]),
                    exercise("Plank Pull", None, &[(10, 10.0)]),
                ],
            ),
            session(
                2,
                from_ymd(2024, 1, 11),
                None,
                vec![exercise("Chest Fly", Some("Chest"), &[(10, 20.0)])],
            ),
        ];
        assert_eq!(
            volume_by_muscle_group(&sessions),
            BTreeMap::from([
                ("Chest".to_string(), 700.0),
                ("Other".to_string(), 100.0),
            ])
        );
    }

    #[test]
    fn test_total_volume_matches_category_sum() {
        let sessions = vec![
            bench_session(1, from_ymd(2024, 1, 10), &[(10, 50.0), (8, 55.0)]),
            session(
                2,
                from_ymd(2024, 1, 11),
                None,
                vec![exercise("Squat", Some("Legs"), &[(5, 100.0)])],
            ),
        ];
        assert_approx_eq!(
            total_volume(&sessions),
            volume_by_muscle_group(&sessions).values().sum::<f32>()
        );
        assert_approx_eq!(total_volume(&sessions), 1440.0);
    }

    #[test]
    fn test_top_muscle_group() {
        let volume = BTreeMap::from([
            ("Chest".to_string(), 700.0),
            ("Legs".to_string(), 500.0),
        ]);
        assert_eq!(top_muscle_group(&volume), Some(("Chest", 700.0)));
        assert_eq!(top_muscle_group(&BTreeMap::new()), None);
    }

    #[rstest]
    #[case::no_sessions(&[], 0)]
    #[case::no_durations(&[None], 0)]
    #[case::zero_duration(&[Some(0)], 0)]
    #[case::single(&[Some(60)], 60)]
    #[case::mean_rounded(&[Some(60), Some(45), None, Some(0)], 53)]
    fn test_avg_duration(#[case] durations: &[Option<u32>], #[case] expected: u32) {
        let sessions = durations
            .iter()
            .enumerate()
            .map(|(i, duration)| {
                session(
                    i as u128 + 1,
                    from_ymd(2024, 1, 10),
                    *duration,
                    vec![exercise("Bench Press", Some("Chest"), &[(10, 50.0)])],
                )
            })
            .collect::<Vec<_>>();
        assert_eq!(avg_duration(&sessions), expected);
    }
}
