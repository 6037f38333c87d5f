//! Разбиение на train/test с явным seed

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{PrepError, Result};
use crate::types::Table;

#[derive(Debug, Clone, PartialEq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Размер тестовой части округляется вверх
pub fn test_count(n_rows: usize, test_fraction: f64) -> usize {
    (test_fraction * n_rows as f64).ceil() as usize
}

pub fn split_indices(n_rows: usize, test_fraction: f64, seed: u64) -> Result<SplitIndices> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(PrepError::Split(format!(
            "test fraction must be in (0, 1), got {}",
            test_fraction
        )));
    }

    let n_test = test_count(n_rows, test_fraction);
    if n_test == 0 || n_test >= n_rows {
        return Err(PrepError::Split(format!(
            "{} rows with test fraction {} leaves an empty partition",
            n_rows, test_fraction
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut permutation: Vec<usize> = (0..n_rows).collect();
    permutation.shuffle(&mut rng);

    let train = permutation.split_off(n_test);
    Ok(SplitIndices { train, test: permutation })
}

pub fn train_test_split(table: &Table, test_fraction: f64, seed: u64) -> Result<(Table, Table)> {
    let indices = split_indices(table.n_rows(), test_fraction, seed)?;
    tracing::info!(
        "Split {} rows into {} train / {} test (seed {})",
        table.n_rows(),
        indices.train.len(),
        indices.test.len(),
        seed
    );
    Ok((table.select_rows(&indices.train), table.select_rows(&indices.test)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn partitions_are_disjoint_and_complete() {
        for seed in [0u64, 1, 42, 12345] {
            for fraction in [0.1, 0.2, 0.33, 0.5, 0.9] {
                let n = 97;
                let split = split_indices(n, fraction, seed).unwrap();
                assert_eq!(split.train.len() + split.test.len(), n);
                let train: HashSet<_> = split.train.iter().collect();
                let test: HashSet<_> = split.test.iter().collect();
                assert!(train.is_disjoint(&test));
                assert_eq!(train.len() + test.len(), n);
            }
        }
    }

    #[test]
    fn same_seed_same_partition() {
        assert_eq!(split_indices(50, 0.2, 7).unwrap(), split_indices(50, 0.2, 7).unwrap());
        assert_ne!(split_indices(50, 0.2, 7).unwrap(), split_indices(50, 0.2, 8).unwrap());
    }

    #[test]
    fn ten_rows_give_eight_and_two() {
        let split = split_indices(10, 0.2, 42).unwrap();
        assert_eq!(split.train.len(), 8);
        assert_eq!(split.test.len(), 2);
    }

    #[test]
    fn rejects_fraction_outside_unit_interval() {
        for fraction in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            assert!(matches!(split_indices(10, fraction, 42), Err(PrepError::Split(_))));
        }
    }

    #[test]
    fn rejects_empty_partition() {
        assert!(split_indices(1, 0.5, 42).is_err());
        assert!(split_indices(0, 0.5, 42).is_err());
    }

    #[test]
    fn split_table_rows() {
        let rows: Vec<Vec<String>> = (0..10).map(|i| vec![i.to_string()]).collect();
        let table = Table::new(vec!["id".into()], rows).unwrap();
        let (train, test) = train_test_split(&table, 0.2, 42).unwrap();
        let mut ids: Vec<String> = train
            .column("id")
            .unwrap()
            .into_iter()
            .chain(test.column("id").unwrap())
            .map(String::from)
            .collect();
        ids.sort_by_key(|s| s.parse::<u32>().unwrap());
        assert_eq!(ids, (0..10).map(|i| i.to_string()).collect::<Vec<_>>());
    }
}
