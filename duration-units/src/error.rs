//! Errors raised while building a unit registry

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Unit at position {0} has an empty name")]
    EmptyName(usize),

    #[error("Unit name must be lowercase: {0}")]
    NameNotLowercase(String),

    #[error("Duplicate unit name: {0}")]
    DuplicateName(String),

    #[error("Unit {name} has invalid value {value}: must be a positive, finite number of seconds")]
    InvalidValue { name: String, value: f64 },

    #[error("Invalid unit table: {0}")]
    Json(#[from] serde_json::Error),
}
