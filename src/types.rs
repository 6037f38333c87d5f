/// Табличные типы данных

use ndarray::{Array1, Array2, ArrayView1};
use crate::error::{PrepError, Result};

/// Значения, которые считаются пропуском при чтении CSV
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing(value: &str) -> bool {
    MISSING_MARKERS.contains(&value.trim())
}

/// Парсинг числовой ячейки: пропуск -> NaN, inf/nan в тексте -> None
pub fn parse_number(value: &str) -> Option<f64> {
    if is_missing(value) {
        return Some(f64::NAN);
    }
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Форматирование числа для CSV (NaN -> пустая ячейка)
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Таблица с текстовыми ячейками: строки в исходном порядке
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns.len()) {
            return Err(PrepError::Data(format!(
                "row {} has {} fields, expected {}",
                i,
                row.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    fn require_column(&self, name: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| PrepError::Data(format!("column '{}' not found", name)))
    }

    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let idx = self.require_column(name)?;
        Ok(self.rows.iter().map(|r| r[idx].as_str()).collect())
    }

    /// Числовой столбец; пропуски становятся NaN
    pub fn numeric_column(&self, name: &str) -> Result<Array1<f64>> {
        let idx = self.require_column(name)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(i, r)| {
                parse_number(&r[idx]).ok_or_else(|| {
                    PrepError::Data(format!(
                        "column '{}', row {}: '{}' is not a number",
                        name, i, r[idx]
                    ))
                })
            })
            .collect::<Result<Vec<f64>>>()
            .map(Array1::from)
    }

    /// Заменяет имена столбцов, количество должно совпадать
    pub fn with_columns(mut self, columns: Vec<String>) -> Result<Self> {
        if columns.len() != self.columns.len() {
            return Err(PrepError::Data(format!(
                "expected {} column names, got {}",
                self.columns.len(),
                columns.len()
            )));
        }
        self.columns = columns;
        Ok(self)
    }

    pub fn map_column<F>(&mut self, name: &str, f: F) -> Result<()>
    where
        F: Fn(&str) -> String,
    {
        let idx = self.require_column(name)?;
        for row in &mut self.rows {
            row[idx] = f(&row[idx]);
        }
        Ok(())
    }

    /// Подтаблица из строк с заданными индексами (в указанном порядке)
    pub fn select_rows(&self, indices: &[usize]) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }
}

/// Результат применения препроцессора
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedTable {
    pub feature_names: Vec<String>,
    pub features: Array2<f64>,
    pub passthrough_names: Vec<String>,
    pub passthrough: Vec<Vec<String>>,
}

impl TransformedTable {
    pub fn n_rows(&self) -> usize {
        self.features.nrows()
    }

    /// Все столбцы в порядке вывода: признаки, затем passthrough
    pub fn columns(&self) -> Vec<String> {
        self.feature_names
            .iter()
            .chain(self.passthrough_names.iter())
            .cloned()
            .collect()
    }

    pub fn feature(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        self.feature_names
            .iter()
            .position(|n| n == name)
            .map(|i| self.features.column(i))
    }

    pub fn to_table(&self) -> Result<Table> {
        let rows = self
            .features
            .rows()
            .into_iter()
            .zip(self.passthrough.iter())
            .map(|(features, extra)| {
                features
                    .iter()
                    .map(|&v| format_number(v))
                    .chain(extra.iter().cloned())
                    .collect()
            })
            .collect();
        Table::new(self.columns(), rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["a".into(), "b".into()],
            vec![
                vec!["1".into(), "x".into()],
                vec!["".into(), "y".into()],
                vec!["3.5".into(), "z".into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn rejects_ragged_rows() {
        let result = Table::new(vec!["a".into()], vec![vec!["1".into(), "2".into()]]);
        assert!(matches!(result, Err(PrepError::Data(_))));
    }

    #[test]
    fn numeric_column_maps_missing_to_nan() {
        let col = sample().numeric_column("a").unwrap();
        assert_eq!(col[0], 1.0);
        assert!(col[1].is_nan());
        assert_eq!(col[2], 3.5);
    }

    #[test]
    fn numeric_column_rejects_text() {
        assert!(matches!(sample().numeric_column("b"), Err(PrepError::Data(_))));
    }

    #[test]
    fn select_rows_keeps_given_order() {
        let sub = sample().select_rows(&[2, 0]);
        assert_eq!(sub.column("b").unwrap(), vec!["z", "x"]);
        assert_eq!(sub.columns(), sample().columns());
    }

    #[test]
    fn non_finite_text_is_not_a_number() {
        for text in ["inf", "-inf", "Infinity", "NAN", "nAn"] {
            assert_eq!(parse_number(text), None, "{}", text);
        }
        assert!(parse_number("NaN").unwrap().is_nan());
        assert_eq!(parse_number(" 2.5 "), Some(2.5));
    }

    #[test]
    fn numeric_column_rejects_infinity() {
        let table = Table::new(vec!["a".into()], vec![vec!["1".into()], vec!["inf".into()]]).unwrap();
        assert!(matches!(table.numeric_column("a"), Err(PrepError::Data(_))));
    }

    #[test]
    fn number_formatting() {
        assert_eq!(format_number(1.0), "1.0");
        assert_eq!(format_number(-0.25), "-0.25");
        assert_eq!(format_number(f64::NAN), "");
    }

    #[test]
    fn transformed_table_to_table() {
        let t = TransformedTable {
            feature_names: vec!["f".into()],
            features: Array2::from_shape_vec((2, 1), vec![0.5, 1.0]).unwrap(),
            passthrough_names: vec!["label".into()],
            passthrough: vec![vec!["yes".into()], vec!["no".into()]],
        };
        let table = t.to_table().unwrap();
        assert_eq!(table.columns(), &["f".to_string(), "label".to_string()]);
        assert_eq!(table.rows()[1], vec!["1.0".to_string(), "no".to_string()]);
    }
}
