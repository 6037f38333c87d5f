//! Сохранение обученного препроцессора в версионированный JSON

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::FittedColumnTransformer;
use crate::error::{PrepError, Result};

pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessorArtifact {
    pub format_version: u32,
    pub fitted_at: DateTime<Utc>,
    pub train_rows: usize,
    pub preprocessor: FittedColumnTransformer,
}

impl PreprocessorArtifact {
    pub fn new(preprocessor: FittedColumnTransformer, train_rows: usize) -> Self {
        Self {
            format_version: ARTIFACT_FORMAT_VERSION,
            fitted_at: Utc::now(),
            train_rows,
            preprocessor,
        }
    }
}

pub fn save_preprocessor(artifact: &PreprocessorArtifact, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, artifact)?;
    writer.flush()?;
    tracing::info!("Saved preprocessor to {}", path.display());
    Ok(())
}

pub fn load_preprocessor(path: &Path) -> Result<PreprocessorArtifact> {
    let reader = BufReader::new(File::open(path)?);
    let artifact: PreprocessorArtifact = serde_json::from_reader(reader)?;
    if artifact.format_version != ARTIFACT_FORMAT_VERSION {
        return Err(PrepError::Artifact(format!(
            "unsupported format version {} (expected {})",
            artifact.format_version, ARTIFACT_FORMAT_VERSION
        )));
    }
    Ok(artifact)
}
