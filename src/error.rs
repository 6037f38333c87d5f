//! Ошибки подготовки данных

use thiserror::Error;

use crate::validation::ValidationReport;

#[derive(Error, Debug)]
pub enum PrepError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data validation failed: {0}")]
    Validation(ValidationReport),

    #[error("Data error: {0}")]
    Data(String),

    #[error("Split error: {0}")]
    Split(String),

    #[error("Artifact error: {0}")]
    Artifact(String),
}

pub type Result<T> = std::result::Result<T, PrepError>;
