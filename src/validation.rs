//! Проверка качества данных перед разбиением
//!
//! Все нарушения собираются в отчёт; любое нарушение останавливает пайплайн.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use crate::error::{PrepError, Result};
use crate::preprocessing::ColumnGroups;
use crate::types::{is_missing, parse_number, Table};

pub const DEFAULT_MISSING_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, PartialEq)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn at_least(min: f64) -> Self {
        Self { min, max: f64::INFINITY }
    }

    fn contains(&self, value: f64) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone)]
pub struct ValidationRules {
    /// Максимальная доля пропусков в столбце
    pub missing_threshold: f64,
    pub required_columns: Vec<String>,
    pub allowed_values: BTreeMap<String, Vec<String>>,
    pub numeric_ranges: BTreeMap<String, NumericRange>,
    pub check_duplicates: bool,
}

impl ValidationRules {
    /// Только порог пропусков, без схемы
    pub fn new(missing_threshold: f64) -> Self {
        Self {
            missing_threshold,
            required_columns: Vec::new(),
            allowed_values: BTreeMap::new(),
            numeric_ranges: BTreeMap::new(),
            check_duplicates: false,
        }
    }

    /// Схема датасета удовлетворённости пассажиров
    pub fn satisfaction(missing_threshold: f64) -> Self {
        let groups = ColumnGroups::satisfaction();
        let mut rules = Self::new(missing_threshold);
        rules.required_columns = groups.all_columns();
        rules.check_duplicates = true;

        let allowed: [(&str, &[&str]); 5] = [
            ("gender", &["Female", "Male"]),
            ("customer_type", &["Disloyal Customer", "Loyal Customer"]),
            ("type_of_travel", &["Business travel", "Personal Travel"]),
            ("class", &["Business", "Eco", "Eco Plus"]),
            ("satisfaction", &["neutral or dissatisfied", "satisfied"]),
        ];
        for (column, values) in allowed {
            rules
                .allowed_values
                .insert(column.to_string(), values.iter().map(|v| v.to_string()).collect());
        }

        for column in &groups.ordinal {
            rules.numeric_ranges.insert(column.clone(), NumericRange::new(0.0, 5.0));
        }
        rules.numeric_ranges.insert("age".into(), NumericRange::new(0.0, 120.0));
        for column in ["flight_distance", "departure_delay_in_minutes", "arrival_delay_in_minutes"] {
            rules.numeric_ranges.insert(column.into(), NumericRange::at_least(0.0));
        }
        rules
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Violation {
    EmptyTable,
    DuplicateColumn { column: String },
    MissingColumn { column: String },
    TooManyMissing { column: String, fraction: f64, threshold: f64 },
    UnexpectedValues { column: String, values: Vec<String> },
    NonNumeric { column: String, count: usize },
    OutOfRange { column: String, count: usize, min: f64, max: f64 },
    DuplicateRows { count: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::EmptyTable => write!(f, "table has no rows"),
            Violation::DuplicateColumn { column } => write!(f, "column '{}' appears more than once", column),
            Violation::MissingColumn { column } => write!(f, "required column '{}' is absent", column),
            Violation::TooManyMissing { column, fraction, threshold } => write!(
                f,
                "column '{}' has {:.2}% missing values (threshold {:.2}%)",
                column,
                fraction * 100.0,
                threshold * 100.0
            ),
            Violation::UnexpectedValues { column, values } => {
                write!(f, "column '{}' has unexpected values: {}", column, values.join(", "))
            }
            Violation::NonNumeric { column, count } => {
                write!(f, "column '{}' has {} non-numeric values", column, count)
            }
            Violation::OutOfRange { column, count, min, max } => write!(
                f,
                "column '{}' has {} values outside [{}, {}]",
                column, count, min, max
            ),
            Violation::DuplicateRows { count } => write!(f, "{} duplicate rows", count),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Сбор всех нарушений без прерывания
pub fn check_data(table: &Table, rules: &ValidationRules) -> ValidationReport {
    let mut violations = Vec::new();
    let n_rows = table.n_rows();

    if n_rows == 0 {
        violations.push(Violation::EmptyTable);
    }

    let mut seen = HashSet::new();
    for column in table.columns() {
        if !seen.insert(column.as_str()) {
            violations.push(Violation::DuplicateColumn { column: column.clone() });
        }
    }

    for column in &rules.required_columns {
        if table.column_index(column).is_none() {
            violations.push(Violation::MissingColumn { column: column.clone() });
        }
    }

    if n_rows > 0 {
        for (idx, column) in table.columns().iter().enumerate() {
            let missing = table.rows().iter().filter(|r| is_missing(&r[idx])).count();
            let fraction = missing as f64 / n_rows as f64;
            if fraction > rules.missing_threshold {
                violations.push(Violation::TooManyMissing {
                    column: column.clone(),
                    fraction,
                    threshold: rules.missing_threshold,
                });
            }
        }
    }

    for (column, allowed) in &rules.allowed_values {
        let Ok(values) = table.column(column) else { continue };
        let unexpected: Vec<String> = values
            .into_iter()
            .filter(|v| !is_missing(v) && !allowed.iter().any(|a| a == v))
            .map(|v| v.to_string())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        if !unexpected.is_empty() {
            violations.push(Violation::UnexpectedValues { column: column.clone(), values: unexpected });
        }
    }

    for (column, range) in &rules.numeric_ranges {
        let Ok(values) = table.column(column) else { continue };
        let parsed: Vec<Option<f64>> = values.into_iter().map(parse_number).collect();
        let non_numeric = parsed.iter().filter(|v| v.is_none()).count();
        if non_numeric > 0 {
            violations.push(Violation::NonNumeric { column: column.clone(), count: non_numeric });
        }
        let out_of_range = parsed
            .iter()
            .flatten()
            .filter(|v| !v.is_nan() && !range.contains(**v))
            .count();
        if out_of_range > 0 {
            violations.push(Violation::OutOfRange {
                column: column.clone(),
                count: out_of_range,
                min: range.min,
                max: range.max,
            });
        }
    }

    if rules.check_duplicates {
        let mut rows = HashSet::new();
        let duplicates = table.rows().iter().filter(|r| !rows.insert(*r)).count();
        if duplicates > 0 {
            violations.push(Violation::DuplicateRows { count: duplicates });
        }
    }

    ValidationReport { violations }
}

/// Пропускает таблицу дальше или возвращает ошибку со всеми нарушениями
pub fn validate_data(table: &Table, rules: &ValidationRules) -> Result<()> {
    let report = check_data(table, rules);
    if report.is_valid() {
        tracing::info!("Validation passed for {} rows", table.n_rows());
        return Ok(());
    }
    for violation in &report.violations {
        tracing::warn!("Validation: {}", violation);
    }
    Err(PrepError::Validation(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<Vec<&str>>) -> Table {
        Table::new(
            vec!["gender".into(), "age".into()],
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        )
        .unwrap()
    }

    fn rules() -> ValidationRules {
        let mut rules = ValidationRules::new(0.25);
        rules
            .allowed_values
            .insert("gender".into(), vec!["Female".into(), "Male".into()]);
        rules.numeric_ranges.insert("age".into(), NumericRange::new(0.0, 120.0));
        rules.check_duplicates = true;
        rules
    }

    #[test]
    fn clean_table_passes() {
        let t = table(vec![vec!["Male", "30"], vec!["Female", "41"], vec!["Male", ""], vec!["Female", "7"]]);
        assert!(validate_data(&t, &rules()).is_ok());
    }

    #[test]
    fn missing_fraction_over_threshold_fails() {
        let t = table(vec![vec!["Male", ""], vec!["Female", ""], vec!["Male", "3"], vec!["Female", "4"]]);
        let report = check_data(&t, &rules());
        assert_eq!(report.violations.len(), 1);
        assert!(matches!(
            &report.violations[0],
            Violation::TooManyMissing { column, .. } if column == "age"
        ));
        assert!(matches!(validate_data(&t, &rules()), Err(PrepError::Validation(_))));
    }

    #[test]
    fn reports_every_violation() {
        let t = table(vec![vec!["Other", "200"], vec!["Male", "abc"], vec!["Male", "abc"]]);
        let report = check_data(&t, &rules());
        assert!(report.violations.contains(&Violation::UnexpectedValues {
            column: "gender".into(),
            values: vec!["Other".into()],
        }));
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, Violation::OutOfRange { count: 1, .. })));
        assert!(report
            .violations
            .iter()
            .any(|v| matches!(v, Violation::NonNumeric { count: 2, .. })));
        assert!(report.violations.contains(&Violation::DuplicateRows { count: 1 }));
    }

    #[test]
    fn infinite_values_are_rejected() {
        let t = table(vec![vec!["Male", "inf"], vec!["Female", "30"], vec!["Male", "NAN"]]);
        let report = check_data(&t, &rules());
        assert!(report
            .violations
            .contains(&Violation::NonNumeric { column: "age".into(), count: 2 }));
        assert!(!NumericRange::at_least(0.0).contains(f64::INFINITY));
    }

    #[test]
    fn empty_table_fails() {
        let t = table(vec![]);
        assert_eq!(check_data(&t, &rules()).violations, vec![Violation::EmptyTable]);
    }

    #[test]
    fn satisfaction_rules_require_all_columns() {
        let t = table(vec![vec!["Male", "30"]]);
        let report = check_data(&t, &ValidationRules::satisfaction(DEFAULT_MISSING_THRESHOLD));
        assert!(report
            .violations
            .contains(&Violation::MissingColumn { column: "satisfaction".into() }));
    }
}
