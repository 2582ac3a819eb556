use chrono::{Local, NaiveDate};
use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, DeleteError, ReadError, ValidationError};

pub trait BodyWeightRepository {
    fn read_body_weight(&self) -> Result<Vec<BodyWeightEntry>, ReadError>;
    fn create_body_weight(
        &self,
        date: NaiveDate,
        weight: f32,
    ) -> Result<BodyWeightEntry, CreateError>;
    fn delete_body_weight(&self, id: BodyWeightID) -> Result<BodyWeightID, DeleteError>;
}

pub trait BodyWeightService {
    fn get_body_weight(&self) -> Result<Vec<BodyWeightEntry>, ReadError>;
    fn create_body_weight(
        &self,
        date: NaiveDate,
        weight: f32,
    ) -> Result<BodyWeightEntry, CreateError>;
    fn delete_body_weight(&self, id: BodyWeightID) -> Result<BodyWeightID, DeleteError>;

    fn validate_body_weight_date(&self, date: &str) -> Result<NaiveDate, ValidationError> {
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

    fn validate_body_weight_weight(&self, weight: &str) -> Result<f32, ValidationError> {
        match weight.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_weight) => {
                if parsed_weight > 0.0 {
                    Ok(parsed_weight)
                } else {
                    Err(ValidationError::Other(
                        "Weight must be a positive decimal number".into(),
                    ))
                }
            }
            Err(_) => Err(ValidationError::Other(
                "Weight must be a decimal number".into(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BodyWeightEntry {
    pub id: BodyWeightID,
    pub date: NaiveDate,
    pub weight: f32,
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BodyWeightID(Uuid);

impl BodyWeightID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for BodyWeightID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for BodyWeightID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Entry with the most recent date, regardless of collection order.
#[must_use]
pub fn current(entries: &[BodyWeightEntry]) -> Option<&BodyWeightEntry> {
    entries.iter().max_by_key(|e| e.date)
}

/// Entry with the oldest date, regardless of collection order.
#[must_use]
pub fn oldest(entries: &[BodyWeightEntry]) -> Option<&BodyWeightEntry> {
    entries.iter().min_by_key(|e| e.date)
}

/// Change from the oldest to the most recent entry in kg.
#[must_use]
pub fn weight_change(entries: &[BodyWeightEntry]) -> Option<f32> {
    Some(current(entries)?.weight - oldest(entries)?.weight)
}
