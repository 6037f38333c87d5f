//! Препроцессор по группам столбцов
//!
//! Порядок вывода: one-hot, порядковые, числовые, затем passthrough.
//! Удаляемые столбцы в выход не попадают.

use std::collections::HashSet;

use ndarray::{concatenate, Axis};
use serde::{Deserialize, Serialize};

use super::min_max::{FittedMinMaxScaler, MinMaxScaler};
use super::normalization::{FittedStandardScaler, StandardScaler};
use super::one_hot::{FittedOneHotEncoder, OneHotEncoder};
use super::{FittedTransformer, Transformer};
use crate::error::{PrepError, Result};
use crate::types::{is_missing, Table, TransformedTable};

fn names(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

/// Разбиение всех столбцов таблицы на пять непересекающихся групп
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnGroups {
    pub categorical: Vec<String>,
    pub ordinal: Vec<String>,
    pub numerical: Vec<String>,
    pub dropped: Vec<String>,
    pub passthrough: Vec<String>,
}

impl ColumnGroups {
    /// Схема датасета удовлетворённости пассажиров (после нормализации имён)
    pub fn satisfaction() -> Self {
        Self {
            categorical: names(&["gender", "customer_type", "type_of_travel", "class"]),
            ordinal: names(&[
                "inflight_wifi_service",
                "time_convenient",
                "ease_of_online_booking",
                "gate_location",
                "food_and_drink",
                "online_boarding",
                "seat_comfort",
                "inflight_entertainment",
                "on_board_service",
                "leg_room_service",
                "baggage_handling",
                "checkin_service",
                "inflight_service",
                "cleanliness",
            ]),
            numerical: names(&["age", "flight_distance", "departure_delay_in_minutes"]),
            dropped: names(&["arrival_delay_in_minutes", "id"]),
            passthrough: names(&["satisfaction"]),
        }
    }

    pub fn total(&self) -> usize {
        self.categorical.len()
            + self.ordinal.len()
            + self.numerical.len()
            + self.dropped.len()
            + self.passthrough.len()
    }

    pub fn all_columns(&self) -> Vec<String> {
        self.categorical
            .iter()
            .chain(&self.ordinal)
            .chain(&self.numerical)
            .chain(&self.dropped)
            .chain(&self.passthrough)
            .cloned()
            .collect()
    }

    /// Проверка, что группы точно покрывают столбцы таблицы
    pub fn check_partition(&self, columns: &[String]) -> Result<()> {
        if self.total() != columns.len() {
            return Err(PrepError::Config(format!(
                "column groups declare {} columns but the table has {}",
                self.total(),
                columns.len()
            )));
        }

        let mut declared = HashSet::new();
        for column in self.all_columns() {
            if !columns.contains(&column) {
                return Err(PrepError::Config(format!(
                    "declared column '{}' is not in the table",
                    column
                )));
            }
            if !declared.insert(column.clone()) {
                return Err(PrepError::Config(format!(
                    "column '{}' is declared in more than one group",
                    column
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ColumnTransformer {
    groups: ColumnGroups,
}

impl ColumnTransformer {
    pub fn new(groups: ColumnGroups) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &ColumnGroups {
        &self.groups
    }

    /// Обучение только на train; разбиение проверяется до любых вычислений
    pub fn fit(&self, train: &Table) -> Result<FittedColumnTransformer> {
        self.groups.check_partition(train.columns())?;

        let one_hot = OneHotEncoder::new(self.groups.categorical.clone()).fit(train)?;
        let min_max = MinMaxScaler::new(self.groups.ordinal.clone()).fit(train)?;
        let standard = StandardScaler::new(self.groups.numerical.clone()).fit(train)?;

        tracing::info!(
            "Fitted preprocessor on {} rows: {} one-hot, {} ordinal, {} numerical, {} passthrough columns",
            train.n_rows(),
            one_hot.n_features_out(),
            self.groups.ordinal.len(),
            self.groups.numerical.len(),
            self.groups.passthrough.len()
        );

        Ok(FittedColumnTransformer {
            groups: self.groups.clone(),
            one_hot,
            min_max,
            standard,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedColumnTransformer {
    groups: ColumnGroups,
    one_hot: FittedOneHotEncoder,
    min_max: FittedMinMaxScaler,
    standard: FittedStandardScaler,
}

impl FittedColumnTransformer {
    pub fn groups(&self) -> &ColumnGroups {
        &self.groups
    }

    pub fn one_hot(&self) -> &FittedOneHotEncoder {
        &self.one_hot
    }

    pub fn min_max(&self) -> &FittedMinMaxScaler {
        &self.min_max
    }

    pub fn standard(&self) -> &FittedStandardScaler {
        &self.standard
    }

    /// Имена признаков без passthrough
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = self.one_hot.feature_names();
        names.extend(self.min_max.feature_names());
        names.extend(self.standard.feature_names());
        names
    }

    pub fn output_columns(&self) -> Vec<String> {
        let mut columns = self.feature_names();
        columns.extend(self.groups.passthrough.iter().cloned());
        columns
    }

    pub fn transform(&self, table: &Table) -> Result<TransformedTable> {
        let blocks = [
            self.one_hot.transform(table)?,
            self.min_max.transform(table)?,
            self.standard.transform(table)?,
        ];
        let views: Vec<_> = blocks.iter().map(|b| b.view()).collect();
        let features = concatenate(Axis(1), &views).map_err(|e| PrepError::Data(e.to_string()))?;

        let indices = self
            .groups
            .passthrough
            .iter()
            .map(|c| {
                table
                    .column_index(c)
                    .ok_or_else(|| PrepError::Data(format!("column '{}' not found", c)))
            })
            .collect::<Result<Vec<_>>>()?;
        let passthrough = table
            .rows()
            .iter()
            .map(|row| {
                indices
                    .iter()
                    .map(|&i| if is_missing(&row[i]) { String::new() } else { row[i].clone() })
                    .collect()
            })
            .collect();

        Ok(TransformedTable {
            feature_names: self.feature_names(),
            features,
            passthrough_names: self.groups.passthrough.clone(),
            passthrough,
        })
    }
}

/// Обучение препроцессора на train
pub fn fit(groups: &ColumnGroups, train: &Table) -> Result<FittedColumnTransformer> {
    ColumnTransformer::new(groups.clone()).fit(train)
}

/// Применение обученного препроцессора без переобучения
pub fn apply(fitted: &FittedColumnTransformer, table: &Table) -> Result<TransformedTable> {
    fitted.transform(table)
}
