use std::{collections::BTreeSet, ops::Mul};

use chrono::{Local, NaiveDate, NaiveDateTime};
use derive_more::{Deref, Display, Into};
use uuid::Uuid;

use crate::{CreateError, DeleteError, Name, ReadError, ValidationError};

pub trait WorkoutSessionRepository {
    fn read_workout_sessions(&self) -> Result<Vec<WorkoutSession>, ReadError>;
    fn create_workout_session(
        &self,
        date: NaiveDate,
        exercises: Vec<ExerciseInSession>,
        duration: Option<u32>,
        start_time: Option<NaiveDateTime>,
    ) -> Result<WorkoutSession, CreateError>;
    fn delete_workout_session(&self, id: WorkoutSessionID)
    -> Result<WorkoutSessionID, DeleteError>;
}

pub trait WorkoutSessionService {
    fn get_workout_sessions(&self) -> Result<Vec<WorkoutSession>, ReadError>;
    fn create_workout_session(
        &self,
        date: NaiveDate,
        exercises: Vec<ExerciseInSession>,
        duration: Option<u32>,
        start_time: Option<NaiveDateTime>,
    ) -> Result<WorkoutSession, CreateError>;
    fn delete_workout_session(&self, id: WorkoutSessionID)
    -> Result<WorkoutSessionID, DeleteError>;

    fn validate_workout_date(&self, date: &str) -> Result<NaiveDate, ValidationError> {
        match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(parsed_date) => {
                if parsed_date <= Local::now().date_naive() {
                    Ok(parsed_date)
                } else {
                    Err(ValidationError::Other(
                        "Date must not be in the future".into(),
                    ))
                }
            }
            Err(_) => Err(ValidationError::Other("Invalid date".into())),
        }
    }
}

/// One logged workout instance.
///
/// Sessions are created atomically with at least one exercise and are
/// immutable afterwards except for deletion by id.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSession {
    pub id: WorkoutSessionID,
    pub date: NaiveDate,
    pub exercises: Vec<ExerciseInSession>,
    pub duration: Option<u32>,
    pub start_time: Option<NaiveDateTime>,
}

impl WorkoutSession {
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.exercises.iter().map(ExerciseInSession::volume).sum()
    }

    #[must_use]
    pub fn num_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }

    #[must_use]
    pub fn exercise_names(&self) -> BTreeSet<&Name> {
        self.exercises.iter().map(|e| &e.exercise_name).collect()
    }

    /// First exercise entry with the given name, if any.
    #[must_use]
    pub fn exercise(&self, name: &Name) -> Option<&ExerciseInSession> {
        self.exercises.iter().find(|e| &e.exercise_name == name)
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutSessionID(Uuid);

impl WorkoutSessionID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutSessionID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutSessionID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// All sets performed for one exercise within a session.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseInSession {
    pub exercise_name: Name,
    pub sets: Vec<WorkoutSet>,
    pub muscle_group: Option<String>,
}

impl ExerciseInSession {
    /// Sets with zero reps or zero weight are dropped. At least one set must
    /// remain for the exercise to be admitted into a session.
    pub fn new(
        exercise_name: Name,
        sets: Vec<WorkoutSet>,
        muscle_group: Option<String>,
    ) -> Result<Self, ExerciseError> {
        let sets = sets.into_iter().filter(WorkoutSet::is_valid).collect::<Vec<_>>();

        if sets.is_empty() {
            return Err(ExerciseError::NoValidSets);
        }

        Ok(Self {
            exercise_name,
            sets,
            muscle_group,
        })
    }

    #[must_use]
    pub fn muscle_group(&self) -> &str {
        self.muscle_group.as_deref().unwrap_or("Other")
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.sets.iter().map(WorkoutSet::volume).sum()
    }

    #[must_use]
    pub fn max_weight(&self) -> Option<f32> {
        self.sets
            .iter()
            .map(|s| f32::from(s.weight))
            .reduce(f32::max)
    }

    #[must_use]
    pub fn avg_weight(&self) -> Option<f32> {
        if self.sets.is_empty() {
            None
        } else {
            #[allow(clippy::cast_precision_loss)]
            Some(
                self.sets.iter().map(|s| f32::from(s.weight)).sum::<f32>()
                    / self.sets.len() as f32,
            )
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ExerciseError {
    #[error("An exercise requires at least one set with positive reps and weight")]
    NoValidSets,
}

/// One performed unit of an exercise. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutSet {
    pub set_number: u32,
    pub reps: Reps,
    pub weight: Weight,
}

impl WorkoutSet {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.reps > Reps::default() && self.weight > Weight::default()
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.reps * self.weight
    }
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

impl Mul<Weight> for Reps {
    type Output = f32;

    #[allow(clippy::cast_precision_loss)]
    fn mul(self, rhs: Weight) -> Self::Output {
        self.0 as f32 * rhs.0
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1 kg")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}
