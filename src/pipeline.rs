//! Подготовка данных: загрузка -> нормализация -> проверка -> разбиение -> препроцессор

use std::fs;
use std::path::PathBuf;

use crate::cleaning::normalize;
use crate::config::{
    PipelineConfig, PROCESSED_TEST_FILE, PROCESSED_TRAIN_FILE, RAW_TEST_FILE, RAW_TRAIN_FILE,
};
use crate::error::Result;
use crate::io::{read_csv, write_csv};
use crate::preprocessing::{apply, fit, save_preprocessor, PreprocessorArtifact};
use crate::split::train_test_split;
use crate::validation::{validate_data, ValidationRules};

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub raw_dir: PathBuf,
    pub processed_dir: PathBuf,
    pub preprocessor_path: PathBuf,
    pub train_rows: usize,
    pub test_rows: usize,
    pub processed_columns: Vec<String>,
}

/// Создание выходных каталогов, если их ещё нет
pub fn prepare_dirs(config: &PipelineConfig) -> Result<()> {
    for dir in [config.raw_dir(), config.processed_dir(), config.preprocessor_to.clone()] {
        fs::create_dir_all(&dir)?;
    }
    Ok(())
}

pub fn run(config: &PipelineConfig) -> Result<PipelineOutput> {
    config.validate()?;
    tracing::debug!("Resolved config: {}", serde_json::to_string(config)?);

    let raw = read_csv(&config.raw_data)?;
    tracing::info!(
        "Loaded {} rows x {} columns from {}",
        raw.n_rows(),
        raw.n_cols(),
        config.raw_data.display()
    );

    prepare_dirs(config)?;

    let data = normalize(raw)?;
    validate_data(&data, &ValidationRules::satisfaction(config.missing_threshold))?;

    let (train, test) = train_test_split(&data, config.test_size, config.seed)?;

    let raw_dir = config.raw_dir();
    write_csv(&train, &raw_dir.join(RAW_TRAIN_FILE))?;
    write_csv(&test, &raw_dir.join(RAW_TEST_FILE))?;
    tracing::info!("Wrote raw splits to {}", raw_dir.display());

    let fitted = fit(&config.groups, &train)?;
    let scaled_train = apply(&fitted, &train)?;
    let scaled_test = apply(&fitted, &test)?;

    let preprocessor_path = config.preprocessor_path();
    save_preprocessor(&PreprocessorArtifact::new(fitted.clone(), train.n_rows()), &preprocessor_path)?;

    let processed_dir = config.processed_dir();
    write_csv(&scaled_train.to_table()?, &processed_dir.join(PROCESSED_TRAIN_FILE))?;
    write_csv(&scaled_test.to_table()?, &processed_dir.join(PROCESSED_TEST_FILE))?;
    tracing::info!("Wrote processed splits to {}", processed_dir.display());

    Ok(PipelineOutput {
        raw_dir,
        processed_dir,
        preprocessor_path,
        train_rows: train.n_rows(),
        test_rows: test.n_rows(),
        processed_columns: fitted.output_columns(),
    })
}
