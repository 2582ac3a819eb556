use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, error};

use crate::{
    BodyWeightEntry, BodyWeightID, BodyWeightRepository, BodyWeightService, CreateError,
    DeleteError, ExerciseInSession, Name, ReadError, StatisticsService, TemplateExercise,
    TemplateID, TemplateRepository, TemplateService, WorkoutSession, WorkoutSessionID,
    WorkoutSessionRepository, WorkoutSessionService, WorkoutTemplate,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::Inaccessible) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: WorkoutSessionRepository> WorkoutSessionService for Service<R> {
    fn get_workout_sessions(&self) -> Result<Vec<WorkoutSession>, ReadError> {
        log_on_error!(
            self.repository.read_workout_sessions(),
            ReadError,
            "get",
            "workout sessions"
        )
    }

    fn create_workout_session(
        &self,
        date: NaiveDate,
        exercises: Vec<ExerciseInSession>,
        duration: Option<u32>,
        start_time: Option<NaiveDateTime>,
    ) -> Result<WorkoutSession, CreateError> {
        log_on_error!(
            self.repository
                .create_workout_session(date, exercises, duration, start_time),
            CreateError,
            "create",
            "workout session"
        )
    }

    fn delete_workout_session(
        &self,
        id: WorkoutSessionID,
    ) -> Result<WorkoutSessionID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout_session(id),
            DeleteError,
            "delete",
            "workout session"
        )
    }
}

impl<R: BodyWeightRepository> BodyWeightService for Service<R> {
    fn get_body_weight(&self) -> Result<Vec<BodyWeightEntry>, ReadError> {
        log_on_error!(
            self.repository.read_body_weight(),
            ReadError,
            "get",
            "body weight"
        )
    }

    fn create_body_weight(
        &self,
        date: NaiveDate,
        weight: f32,
    ) -> Result<BodyWeightEntry, CreateError> {
        log_on_error!(
            self.repository.create_body_weight(date, weight),
            CreateError,
            "create",
            "body weight"
        )
    }

    fn delete_body_weight(&self, id: BodyWeightID) -> Result<BodyWeightID, DeleteError> {
        log_on_error!(
            self.repository.delete_body_weight(id),
            DeleteError,
            "delete",
            "body weight"
        )
    }
}

impl<R: TemplateRepository> TemplateService for Service<R> {
    fn get_templates(&self) -> Result<Vec<WorkoutTemplate>, ReadError> {
        log_on_error!(
            self.repository.read_templates(),
            ReadError,
            "get",
            "templates"
        )
    }

    fn create_template(
        &self,
        name: Name,
        exercises: Vec<TemplateExercise>,
    ) -> Result<WorkoutTemplate, CreateError> {
        log_on_error!(
            self.repository.create_template(name, exercises),
            CreateError,
            "create",
            "template"
        )
    }

    fn delete_template(&self, id: TemplateID) -> Result<TemplateID, DeleteError> {
        log_on_error!(
            self.repository.delete_template(id),
            DeleteError,
            "delete",
            "template"
        )
    }
}

impl<R: WorkoutSessionRepository + BodyWeightRepository> StatisticsService for Service<R> {}
