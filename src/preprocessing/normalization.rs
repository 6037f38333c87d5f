//! Стандартизация (z-score) числовых столбцов

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::{observed_values, safe_scale, scale_columns, FittedTransformer, Transformer};
use crate::error::Result;
use crate::types::Table;

/// Параметры одного столбца
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardParams {
    pub column: String,
    pub mean: f64,
    /// Стандартное отклонение генеральной совокупности (ddof = 0)
    pub std: f64,
}

#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    columns: Vec<String>,
}

impl StandardScaler {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn fit_transform(&self, table: &Table) -> Result<(FittedStandardScaler, Array2<f64>)> {
        let fitted = self.fit(table)?;
        let transformed = fitted.transform(table)?;
        Ok((fitted, transformed))
    }
}

impl Transformer for StandardScaler {
    type Fitted = FittedStandardScaler;

    fn fit(&self, table: &Table) -> Result<FittedStandardScaler> {
        let params = self
            .columns
            .iter()
            .map(|column| {
                let values = observed_values(table, column)?;
                // mean() возвращает None только для пустого массива
                let mean = values.mean().unwrap_or(f64::NAN);
                let std = values.std(0.0);
                tracing::debug!("StandardScaler {}: mean={} std={}", column, mean, std);
                Ok(StandardParams { column: column.clone(), mean, std })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(FittedStandardScaler { params })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedStandardScaler {
    params: Vec<StandardParams>,
}

impl FittedStandardScaler {
    pub fn params(&self) -> &[StandardParams] {
        &self.params
    }

    pub fn get(&self, column: &str) -> Option<&StandardParams> {
        self.params.iter().find(|p| p.column == column)
    }
}

impl FittedTransformer for FittedStandardScaler {
    fn feature_names(&self) -> Vec<String> {
        self.params.iter().map(|p| p.column.clone()).collect()
    }

    fn transform(&self, table: &Table) -> Result<Array2<f64>> {
        let columns: Vec<&str> = self.params.iter().map(|p| p.column.as_str()).collect();
        scale_columns(table, &columns, |j, v| {
            let p = &self.params[j];
            (v - p.mean) / safe_scale(p.std)
        })
    }
}
