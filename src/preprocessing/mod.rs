/// Модуль предобработки: fit на train, применение к любым таблицам

pub mod artifact;
pub mod column_transformer;
pub mod min_max;
pub mod normalization;
pub mod one_hot;

pub use artifact::{load_preprocessor, save_preprocessor, PreprocessorArtifact, ARTIFACT_FORMAT_VERSION};
pub use column_transformer::{apply, fit, ColumnGroups, ColumnTransformer, FittedColumnTransformer};
pub use min_max::{FittedMinMaxScaler, MinMaxScaler};
pub use normalization::{FittedStandardScaler, StandardScaler};
pub use one_hot::{FittedOneHotEncoder, OneHotEncoder};

use ndarray::{Array1, Array2};

use crate::error::{PrepError, Result};
use crate::types::Table;

/// Необученный преобразователь группы столбцов
pub trait Transformer {
    type Fitted: FittedTransformer;

    fn fit(&self, table: &Table) -> Result<Self::Fitted>;
}

/// Обученный преобразователь: выдаёт блок признаков той же высоты, что и таблица
pub trait FittedTransformer {
    fn feature_names(&self) -> Vec<String>;

    fn transform(&self, table: &Table) -> Result<Array2<f64>>;
}

/// Делитель для нулевого масштаба
pub(crate) fn safe_scale(scale: f64) -> f64 {
    if scale.abs() < 1e-10 {
        1.0
    } else {
        scale
    }
}

/// Наблюдаемые (не NaN) значения числового столбца
pub(crate) fn observed_values(table: &Table, column: &str) -> Result<Array1<f64>> {
    let values: Array1<f64> = table
        .numeric_column(column)?
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .collect();
    if values.is_empty() {
        return Err(PrepError::Data(format!("column '{}' has no observed values", column)));
    }
    Ok(values)
}

/// Поэлементное преобразование числовых столбцов в блок (NaN сохраняется)
pub(crate) fn scale_columns<F>(table: &Table, columns: &[&str], f: F) -> Result<Array2<f64>>
where
    F: Fn(usize, f64) -> f64,
{
    let mut block = Array2::zeros((table.n_rows(), columns.len()));
    for (j, column) in columns.iter().enumerate() {
        let values = table.numeric_column(column)?;
        for (i, v) in values.iter().enumerate() {
            block[[i, j]] = if v.is_nan() { f64::NAN } else { f(j, *v) };
        }
    }
    Ok(block)
}
