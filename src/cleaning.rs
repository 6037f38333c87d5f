//! Нормализация имён столбцов и значений

use regex::Regex;

use crate::error::{PrepError, Result};
use crate::types::{is_missing, Table};

/// Переименования применяются после замены пробелов и дефисов
pub const COLUMN_RENAMES: &[(&str, &str)] = &[("departure/arrival_time_convenient", "time_convenient")];

pub const CUSTOMER_TYPE_COLUMN: &str = "customer_type";

fn clean_name(name: &str, whitespace: &Regex) -> String {
    let lowered = name.to_lowercase();
    let cleaned = whitespace.replace_all(&lowered, "_").replace('-', "_");
    COLUMN_RENAMES
        .iter()
        .find(|(from, _)| *from == cleaned)
        .map(|(_, to)| to.to_string())
        .unwrap_or(cleaned)
}

pub fn clean_column_names(table: Table) -> Result<Table> {
    let whitespace = Regex::new(r"\s+").map_err(|e| PrepError::Config(e.to_string()))?;
    let columns: Vec<String> = table
        .columns()
        .iter()
        .map(|c| clean_name(c, &whitespace))
        .collect();
    table.with_columns(columns)
}

/// Title case: первая буква каждого слова заглавная, остальные строчные
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_letter = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if prev_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(ch);
            prev_letter = false;
        }
    }
    out
}

/// Полная нормализация: имена столбцов + регистр customer_type
pub fn normalize(table: Table) -> Result<Table> {
    let mut table = clean_column_names(table)?;
    table.map_column(CUSTOMER_TYPE_COLUMN, |v| {
        if is_missing(v) {
            v.to_string()
        } else {
            title_case(v)
        }
    })?;
    tracing::info!("Normalized {} columns", table.n_cols());
    Ok(table)
}
