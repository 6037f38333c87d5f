//! One-hot кодирование категориальных столбцов
//!
//! Категории сортируются лексикографически. Неизвестные на этапе fit значения
//! и пропуски кодируются нулевой строкой.

use std::collections::BTreeSet;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::{FittedTransformer, Transformer};
use crate::error::Result;
use crate::types::{is_missing, Table};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryVocabulary {
    pub column: String,
    pub categories: Vec<String>,
}

impl CategoryVocabulary {
    pub fn feature_names(&self) -> impl Iterator<Item = String> + '_ {
        self.categories
            .iter()
            .map(move |c| format!("{}_{}", self.column, c))
    }
}

#[derive(Debug, Clone, Default)]
pub struct OneHotEncoder {
    columns: Vec<String>,
}

impl OneHotEncoder {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }
}

impl Transformer for OneHotEncoder {
    type Fitted = FittedOneHotEncoder;

    fn fit(&self, table: &Table) -> Result<FittedOneHotEncoder> {
        let vocabularies = self
            .columns
            .iter()
            .map(|column| {
                let categories: BTreeSet<&str> = table
                    .column(column)?
                    .into_iter()
                    .filter(|v| !is_missing(v))
                    .collect();
                if categories.is_empty() {
                    tracing::warn!("OneHotEncoder {}: no observed categories", column);
                }
                tracing::debug!("OneHotEncoder {}: {:?}", column, categories);
                Ok(CategoryVocabulary {
                    column: column.clone(),
                    categories: categories.into_iter().map(String::from).collect(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(FittedOneHotEncoder { vocabularies })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedOneHotEncoder {
    vocabularies: Vec<CategoryVocabulary>,
}

impl FittedOneHotEncoder {
    pub fn vocabularies(&self) -> &[CategoryVocabulary] {
        &self.vocabularies
    }

    pub fn n_features_out(&self) -> usize {
        self.vocabularies.iter().map(|v| v.categories.len()).sum()
    }
}

impl FittedTransformer for FittedOneHotEncoder {
    fn feature_names(&self) -> Vec<String> {
        self.vocabularies.iter().flat_map(|v| v.feature_names()).collect()
    }

    fn transform(&self, table: &Table) -> Result<Array2<f64>> {
        let mut block = Array2::zeros((table.n_rows(), self.n_features_out()));
        let mut offset = 0;
        for vocabulary in &self.vocabularies {
            let values = table.column(&vocabulary.column)?;
            for (i, value) in values.iter().enumerate() {
                if let Some(k) = vocabulary.categories.iter().position(|c| c == value) {
                    block[[i, offset + k]] = 1.0;
                }
            }
            offset += vocabulary.categories.len();
        }
        Ok(block)
    }
}
