#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod body_weight;
pub mod error;
pub mod name;
pub mod progress;
pub mod service;
pub mod statistics;
pub mod summary;
pub mod template;
pub mod workout;

pub use body_weight::{BodyWeightEntry, BodyWeightID, BodyWeightRepository, BodyWeightService};
pub use error::{CreateError, DeleteError, ReadError, StorageError, ValidationError};
pub use name::{Name, NameError};
pub use progress::{DataPoint, exercise_names, progress_series};
pub use service::Service;
pub use statistics::{
    PersonalRecord, StatisticsService, avg_duration, personal_records, streak, top_muscle_group,
    top_personal_records, total_volume, volume_by_muscle_group,
};
pub use summary::share_summary;
pub use template::{
    TemplateError, TemplateExercise, TemplateID, TemplateRepository, TemplateService,
    WorkoutTemplate,
};
pub use workout::{
    ExerciseError, ExerciseInSession, Reps, RepsError, Weight, WeightError, WorkoutSession,
    WorkoutSessionID, WorkoutSessionRepository, WorkoutSessionService, WorkoutSet,
};
