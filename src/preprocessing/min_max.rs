//! Min-max масштабирование порядковых столбцов в [0, 1]

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::{observed_values, safe_scale, scale_columns, FittedTransformer, Transformer};
use crate::error::Result;
use crate::types::Table;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxParams {
    pub column: String,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default)]
pub struct MinMaxScaler {
    columns: Vec<String>,
}

impl MinMaxScaler {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }
}

impl Transformer for MinMaxScaler {
    type Fitted = FittedMinMaxScaler;

    fn fit(&self, table: &Table) -> Result<FittedMinMaxScaler> {
        let params = self
            .columns
            .iter()
            .map(|column| {
                let values = observed_values(table, column)?;
                let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                tracing::debug!("MinMaxScaler {}: min={} max={}", column, min, max);
                Ok(MinMaxParams { column: column.clone(), min, max })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(FittedMinMaxScaler { params })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedMinMaxScaler {
    params: Vec<MinMaxParams>,
}

impl FittedMinMaxScaler {
    pub fn params(&self) -> &[MinMaxParams] {
        &self.params
    }

    pub fn get(&self, column: &str) -> Option<&MinMaxParams> {
        self.params.iter().find(|p| p.column == column)
    }
}

impl FittedTransformer for FittedMinMaxScaler {
    fn feature_names(&self) -> Vec<String> {
        self.params.iter().map(|p| p.column.clone()).collect()
    }

    /// Значения вне [min, max] не обрезаются
    fn transform(&self, table: &Table) -> Result<Array2<f64>> {
        let columns: Vec<&str> = self.params.iter().map(|p| p.column.as_str()).collect();
        scale_columns(table, &columns, |j, v| {
            let p = &self.params[j];
            (v - p.min) / safe_scale(p.max - p.min)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratings(values: &[&str]) -> Table {
        Table::new(
            vec!["seat_comfort".into()],
            values.iter().map(|v| vec![v.to_string()]).collect(),
        )
        .unwrap()
    }

    #[test]
    fn min_maps_to_zero_and_max_to_one() {
        let train = ratings(&["1", "3", "4", "2"]);
        let scaler = MinMaxScaler::new(vec!["seat_comfort".into()]);
        let fitted = scaler.fit(&train).unwrap();
        let out = fitted.transform(&train).unwrap();
        assert_eq!(out[[0, 0]], 0.0);
        assert_eq!(out[[2, 0]], 1.0);
        assert!((out[[1, 0]] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_values_are_not_clipped() {
        let fitted = MinMaxScaler::new(vec!["seat_comfort".into()])
            .fit(&ratings(&["1", "3"]))
            .unwrap();
        let out = fitted.transform(&ratings(&["0", "5"])).unwrap();
        assert_eq!(out[[0, 0]], -0.5);
        assert_eq!(out[[1, 0]], 2.0);
    }

    #[test]
    fn constant_column_maps_to_zero() {
        let fitted = MinMaxScaler::new(vec!["seat_comfort".into()])
            .fit(&ratings(&["4", "4"]))
            .unwrap();
        let p = fitted.get("seat_comfort").unwrap();
        assert_eq!((p.min, p.max), (4.0, 4.0));
        assert_eq!(fitted.transform(&ratings(&["4"])).unwrap()[[0, 0]], 0.0);
    }
}
