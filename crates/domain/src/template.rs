use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, DeleteError, Name, ReadError};

pub trait TemplateRepository {
    fn read_templates(&self) -> Result<Vec<WorkoutTemplate>, ReadError>;
    fn create_template(
        &self,
        name: Name,
        exercises: Vec<TemplateExercise>,
    ) -> Result<WorkoutTemplate, CreateError>;
    fn delete_template(&self, id: TemplateID) -> Result<TemplateID, DeleteError>;
}

pub trait TemplateService {
    fn get_templates(&self) -> Result<Vec<WorkoutTemplate>, ReadError>;
    fn create_template(
        &self,
        name: Name,
        exercises: Vec<TemplateExercise>,
    ) -> Result<WorkoutTemplate, CreateError>;
    fn delete_template(&self, id: TemplateID) -> Result<TemplateID, DeleteError>;
}

/// Reusable exercise plan used to prefill the logging flow.
///
/// Templates are reference data only. They are not consumed by any derived
/// statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutTemplate {
    pub id: TemplateID,
    pub name: Name,
    pub exercises: Vec<TemplateExercise>,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TemplateID(Uuid);

impl TemplateID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for TemplateID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for TemplateID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateExercise {
    pub exercise_name: Name,
    pub muscle_group: Option<String>,
    pub target_sets: u32,
}

impl TemplateExercise {
    pub fn new(
        exercise_name: Name,
        muscle_group: Option<String>,
        target_sets: u32,
    ) -> Result<Self, TemplateError> {
        if target_sets == 0 {
            return Err(TemplateError::ZeroTargetSets);
        }

        Ok(Self {
            exercise_name,
            muscle_group,
            target_sets,
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TemplateError {
    #[error("Target sets must be positive")]
    ZeroTargetSets,
}
