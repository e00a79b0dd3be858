//! Table validation
//!
//! Validation collects every problem in a table rather than stopping at the
//! first. Errors block a run; warnings (zero activity, duplicated factor rows)
//! are shown to the user but the run proceeds.

use crate::loader::{ActivityTable, FactorTable, RawFactorRow};
use cityscale_core::sector::SectorKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Combine two reports, keeping the order of messages
    pub fn merge(mut self, other: ValidationReport) -> Self {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self
    }

    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            log::warn!("{}", warning);
        }
    }
}

/// Report labels that are not one of the five sectors
fn check_sector_labels<'a>(
    labels: impl Iterator<Item = &'a Option<String>>,
    report: &mut ValidationReport,
) {
    let mut empty = false;
    let mut unknown = BTreeSet::new();
    for label in labels {
        match label {
            Some(label) if !label.trim().is_empty() => {
                if SectorKind::parse_label(label).is_err() {
                    unknown.insert(label.clone());
                }
            }
            _ => empty = true,
        }
    }
    if empty {
        report.errors.push("Sector values cannot be empty".to_string());
    }
    if !unknown.is_empty() {
        report.errors.push(format!(
            "Unknown sectors: {:?}",
            unknown.into_iter().collect::<Vec<_>>()
        ));
    }
}

pub fn validate_activity(table: &ActivityTable) -> ValidationReport {
    let mut report = ValidationReport::default();

    let missing = table.missing_columns();
    if !missing.is_empty() {
        report.errors.push(format!("Missing columns: {:?}", missing));
        return report;
    }

    check_sector_labels(table.rows.iter().map(|row| &row.sector), &mut report);

    if table.rows.iter().any(|row| row.activity.is_none()) {
        report.errors.push("Activity values cannot be empty".to_string());
    }
    if table
        .rows
        .iter()
        .any(|row| row.activity.is_some_and(|value| !(value >= 0.0)))
    {
        report
            .errors
            .push("Activity values must be non-negative".to_string());
    }
    if table.rows.iter().any(|row| row.activity == Some(0.0)) {
        report
            .warnings
            .push("Some activities are zero; this may understate emissions".to_string());
    }

    report
}

pub fn validate_factors(table: &FactorTable) -> ValidationReport {
    let mut report = ValidationReport::default();

    let missing = table.missing_columns();
    if !missing.is_empty() {
        report.errors.push(format!("Missing columns: {:?}", missing));
        return report;
    }

    check_sector_labels(table.rows.iter().map(|row| &row.sector), &mut report);

    let columns: [(&str, fn(&RawFactorRow) -> Option<f64>); 3] = [
        ("co2_factor", |row| row.co2_factor),
        ("ch4_factor", |row| row.ch4_factor),
        ("n2o_factor", |row| row.n2o_factor),
    ];
    for (column, cell) in columns {
        if table.rows.iter().any(|row| cell(row).is_none()) {
            report
                .errors
                .push(format!("Column has null values: {}", column));
        }
        if table
            .rows
            .iter()
            .any(|row| cell(row).is_some_and(|value| !(value >= 0.0)))
        {
            report
                .errors
                .push(format!("Column has negative factors: {}", column));
        }
    }

    let mut seen = BTreeSet::new();
    let duplicated = table
        .rows
        .iter()
        .filter_map(|row| row.sector.as_deref())
        .any(|label| !seen.insert(label.trim().to_ascii_lowercase()));
    if duplicated {
        report
            .warnings
            .push("Duplicate sectors in factor table; first match will be used".to_string());
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{read_activity_csv, read_factor_csv};

    #[test]
    fn test_validate_activity_flags_negative() {
        let table = read_activity_csv("sector,activity\ntransport,-1.0\n".as_bytes()).unwrap();
        let report = validate_activity(&table);
        assert!(!report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_validate_activity_warns_on_zero() {
        let table =
            read_activity_csv("sector,activity\ntransport,0\nenergy,5\n".as_bytes()).unwrap();
        let report = validate_activity(&table);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_validate_activity_empty_cells() {
        let table = read_activity_csv("sector,activity\n,3\nwaste,\n".as_bytes()).unwrap();
        let report = validate_activity(&table);
        assert!(report
            .errors
            .contains(&"Sector values cannot be empty".to_string()));
        assert!(report
            .errors
            .contains(&"Activity values cannot be empty".to_string()));
    }

    #[test]
    fn test_validate_factor_data_detects_missing_columns() {
        let table = read_factor_csv("sector,co2_factor\ntransport,1.0\n".as_bytes()).unwrap();
        let report = validate_factors(&table);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].starts_with("Missing columns"));
    }

    #[test]
    fn test_validate_factor_duplicates_warn() {
        let table = read_factor_csv(
            "sector,co2_factor,ch4_factor,n2o_factor\nenergy,1,0,0\nEnergy,2,0,0\n".as_bytes(),
        )
        .unwrap();
        let report = validate_factors(&table);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);

        let factors = table.into_factor_table().unwrap();
        assert_eq!(factors.get(SectorKind::Energy).unwrap().co2_factor, 1.0);
    }

    #[test]
    fn test_validate_factor_negative_and_unknown() {
        let table = read_factor_csv(
            "sector,co2_factor,ch4_factor,n2o_factor\nenergy,1,-0.1,0\nfarming,1,0,0\n"
                .as_bytes(),
        )
        .unwrap();
        let report = validate_factors(&table);
        assert_eq!(report.errors.len(), 2);
    }

    #[test]
    fn test_merge() {
        let a = ValidationReport {
            errors: vec!["a".to_string()],
            warnings: vec![],
        };
        let b = ValidationReport {
            errors: vec![],
            warnings: vec!["b".to_string()],
        };
        let merged = a.merge(b);
        assert_eq!(merged.errors, vec!["a"]);
        assert_eq!(merged.warnings, vec!["b"]);
    }
}
