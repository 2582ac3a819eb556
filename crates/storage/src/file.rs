use std::{
    fs, io,
    path::PathBuf,
};

use chrono::{NaiveDate, NaiveDateTime};
use liftlog_domain::{
    self as domain, BodyWeightRepository, TemplateRepository, WorkoutSessionRepository,
};
use log::debug;
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

const WORKOUT_SESSIONS_FILE: &str = "workout_sessions.json";
const BODY_WEIGHTS_FILE: &str = "body_weights.json";
const WORKOUT_TEMPLATES_FILE: &str = "workout_templates.json";

/// Store keeping each collection in its own JSON file below a common
/// directory.
///
/// Each write replaces the whole file. New entries are prepended, so files
/// are ordered newest first. A missing file is read as an empty collection.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read_collection<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>, FileError> {
        let content = match fs::read_to_string(self.dir.join(file_name)) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("{file_name} not found, reading empty collection");
                return Ok(vec![]);
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    fn write_collection<T: Serialize>(
        &self,
        file_name: &str,
        values: &[T],
    ) -> Result<(), FileError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(
            self.dir.join(file_name),
            serde_json::to_string_pretty(values)?,
        )?;
        Ok(())
    }
}

impl WorkoutSessionRepository for FileStore {
    fn read_workout_sessions(&self) -> Result<Vec<domain::WorkoutSession>, domain::ReadError> {
        self.read_collection::<WorkoutSession>(WORKOUT_SESSIONS_FILE)
            .map_err(domain::StorageError::from)?
            .into_iter()
            .map(|dto| {
                domain::WorkoutSession::try_from(dto)
                    .map_err(|err| domain::ReadError::Other(err.into()))
            })
            .collect()
    }

    fn create_workout_session(
        &self,
        date: NaiveDate,
        exercises: Vec<domain::ExerciseInSession>,
        duration: Option<u32>,
        start_time: Option<NaiveDateTime>,
    ) -> Result<domain::WorkoutSession, domain::CreateError> {
        let session = domain::WorkoutSession {
            id: Uuid::new_v4().into(),
            date,
            exercises,
            duration,
            start_time,
        };
        let mut sessions = self.read_workout_sessions()?;
        sessions.insert(0, session.clone());
        self.write_collection(
            WORKOUT_SESSIONS_FILE,
            &sessions.iter().map(WorkoutSession::from).collect::<Vec<_>>(),
        )
        .map_err(domain::StorageError::from)?;
        Ok(session)
    }

    fn delete_workout_session(
        &self,
        id: domain::WorkoutSessionID,
    ) -> Result<domain::WorkoutSessionID, domain::DeleteError> {
        let mut sessions = self.read_workout_sessions()?;
        let len = sessions.len();
        sessions.retain(|s| s.id != id);
        if sessions.len() == len {
            return Err(domain::DeleteError::NotFound);
        }
        self.write_collection(
            WORKOUT_SESSIONS_FILE,
            &sessions.iter().map(WorkoutSession::from).collect::<Vec<_>>(),
        )
        .map_err(domain::StorageError::from)?;
        Ok(id)
    }
}

impl BodyWeightRepository for FileStore {
    fn read_body_weight(&self) -> Result<Vec<domain::BodyWeightEntry>, domain::ReadError> {
        Ok(self
            .read_collection::<BodyWeightEntry>(BODY_WEIGHTS_FILE)
            .map_err(domain::StorageError::from)?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    fn create_body_weight(
        &self,
        date: NaiveDate,
        weight: f32,
    ) -> Result<domain::BodyWeightEntry, domain::CreateError> {
        let entry = domain::BodyWeightEntry {
            id: Uuid::new_v4().into(),
            date,
            weight,
        };
        let mut entries = self.read_body_weight()?;
        entries.insert(0, entry.clone());
        self.write_collection(
            BODY_WEIGHTS_FILE,
            &entries.iter().map(BodyWeightEntry::from).collect::<Vec<_>>(),
        )
        .map_err(domain::StorageError::from)?;
        Ok(entry)
    }

    fn delete_body_weight(
        &self,
        id: domain::BodyWeightID,
    ) -> Result<domain::BodyWeightID, domain::DeleteError> {
        let mut entries = self.read_body_weight()?;
        let len = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == len {
            return Err(domain::DeleteError::NotFound);
        }
        self.write_collection(
            BODY_WEIGHTS_FILE,
            &entries.iter().map(BodyWeightEntry::from).collect::<Vec<_>>(),
        )
        .map_err(domain::StorageError::from)?;
        Ok(id)
    }
}

impl TemplateRepository for FileStore {
    fn read_templates(&self) -> Result<Vec<domain::WorkoutTemplate>, domain::ReadError> {
        self.read_collection::<WorkoutTemplate>(WORKOUT_TEMPLATES_FILE)
            .map_err(domain::StorageError::from)?
            .into_iter()
            .map(|dto| {
                domain::WorkoutTemplate::try_from(dto)
                    .map_err(|err| domain::ReadError::Other(err.into()))
            })
            .collect()
    }

    fn create_template(
        &self,
        name: domain::Name,
        exercises: Vec<domain::TemplateExercise>,
    ) -> Result<domain::WorkoutTemplate, domain::CreateError> {
        let template = domain::WorkoutTemplate {
            id: Uuid::new_v4().into(),
            name,
            exercises,
        };
        let mut templates = self.read_templates()?;
        templates.insert(0, template.clone());
        self.write_collection(
            WORKOUT_TEMPLATES_FILE,
            &templates.iter().map(WorkoutTemplate::from).collect::<Vec<_>>(),
        )
        .map_err(domain::StorageError::from)?;
        Ok(template)
    }

    fn delete_template(
        &self,
        id: domain::TemplateID,
    ) -> Result<domain::TemplateID, domain::DeleteError> {
        let mut templates = self.read_templates()?;
        let len = templates.len();
        templates.retain(|t| t.id != id);
        if templates.len() == len {
            return Err(domain::DeleteError::NotFound);
        }
        self.write_collection(
            WORKOUT_TEMPLATES_FILE,
            &templates.iter().map(WorkoutTemplate::from).collect::<Vec<_>>(),
        )
        .map_err(domain::StorageError::from)?;
        Ok(id)
    }
}

#[derive(thiserror::Error, Debug)]
enum FileError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

impl From<FileError> for domain::StorageError {
    fn from(value: FileError) -> Self {
        match value {
            FileError::Io(_) => domain::StorageError::Inaccessible,
            FileError::Serde(err) => domain::StorageError::Other(err.into()),
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum ConversionError {
    #[error(transparent)]
    Name(#[from] domain::NameError),
    #[error(transparent)]
    Reps(#[from] domain::RepsError),
    #[error(transparent)]
    Weight(#[from] domain::WeightError),
    #[error(transparent)]
    Exercise(#[from] domain::ExerciseError),
    #[error(transparent)]
    Template(#[from] domain::TemplateError),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
struct WorkoutSession {
    id: Uuid,
    date: NaiveDate,
    exercises: Vec<ExerciseInSession>,
    #[serde(default)]
    duration: Option<u32>,
    #[serde(default)]
    start_time: Option<NaiveDateTime>,
}

impl From<&domain::WorkoutSession> for WorkoutSession {
    fn from(value: &domain::WorkoutSession) -> Self {
        Self {
            id: *value.id,
            date: value.date,
            exercises: value.exercises.iter().map(Into::into).collect(),
            duration: value.duration,
            start_time: value.start_time,
        }
    }
}

impl TryFrom<WorkoutSession> for domain::WorkoutSession {
    type Error = ConversionError;

    fn try_from(value: WorkoutSession) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            date: value.date,
            exercises: value
                .exercises
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<_>, _>>()?,
            duration: value.duration,
            start_time: value.start_time,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
struct ExerciseInSession {
    exercise_name: String,
    sets: Vec<WorkoutSet>,
    #[serde(default)]
    muscle_group: Option<String>,
}

impl From<&domain::ExerciseInSession> for ExerciseInSession {
    fn from(value: &domain::ExerciseInSession) -> Self {
        Self {
            exercise_name: value.exercise_name.to_string(),
            sets: value.sets.iter().map(Into::into).collect(),
            muscle_group: value.muscle_group.clone(),
        }
    }
}

impl TryFrom<ExerciseInSession> for domain::ExerciseInSession {
    type Error = ConversionError;

    fn try_from(value: ExerciseInSession) -> Result<Self, Self::Error> {
        Ok(domain::ExerciseInSession::new(
            domain::Name::new(&value.exercise_name)?,
            value
                .sets
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<_>, ConversionError>>()?,
            value.muscle_group,
        )?)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq)]
struct WorkoutSet {
    set_number: u32,
    reps: u32,
    weight: f32,
}

impl From<&domain::WorkoutSet> for WorkoutSet {
    fn from(value: &domain::WorkoutSet) -> Self {
        Self {
            set_number: value.set_number,
            reps: value.reps.into(),
            weight: value.weight.into(),
        }
    }
}

impl TryFrom<WorkoutSet> for domain::WorkoutSet {
    type Error = ConversionError;

    fn try_from(value: WorkoutSet) -> Result<Self, Self::Error> {
        Ok(Self {
            set_number: value.set_number,
            reps: domain::Reps::new(value.reps)?,
            weight: domain::Weight::new(value.weight)?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
struct BodyWeightEntry {
    id: Uuid,
    date: NaiveDate,
    weight: f32,
}

impl From<&domain::BodyWeightEntry> for BodyWeightEntry {
    fn from(value: &domain::BodyWeightEntry) -> Self {
        Self {
            id: *value.id,
            date: value.date,
            weight: value.weight,
        }
    }
}

impl From<BodyWeightEntry> for domain::BodyWeightEntry {
    fn from(value: BodyWeightEntry) -> Self {
        Self {
            id: value.id.into(),
            date: value.date,
            weight: value.weight,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
struct WorkoutTemplate {
    id: Uuid,
    name: String,
    exercises: Vec<TemplateExercise>,
}

impl From<&domain::WorkoutTemplate> for WorkoutTemplate {
    fn from(value: &domain::WorkoutTemplate) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            exercises: value.exercises.iter().map(Into::into).collect(),
        }
    }
}

impl TryFrom<WorkoutTemplate> for domain::WorkoutTemplate {
    type Error = ConversionError;

    fn try_from(value: WorkoutTemplate) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            exercises: value
                .exercises
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<_>, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
struct TemplateExercise {
    exercise_name: String,
    #[serde(default)]
    muscle_group: Option<String>,
    target_sets: u32,
}

impl From<&domain::TemplateExercise> for TemplateExercise {
    fn from(value: &domain::TemplateExercise) -> Self {
        Self {
            exercise_name: value.exercise_name.to_string(),
            muscle_group: value.muscle_group.clone(),
            target_sets: value.target_sets,
        }
    }
}

impl TryFrom<TemplateExercise> for domain::TemplateExercise {
    type Error = ConversionError;

    fn try_from(value: TemplateExercise) -> Result<Self, Self::Error> {
        Ok(domain::TemplateExercise::new(
            domain::Name::new(&value.exercise_name)?,
            value.muscle_group,
            value.target_sets,
        )?)
    }
}
