//! Activity and emission factor tables
//!
//! Tables are read from CSV or Excel workbooks into raw rows that keep empty
//! cells and unparsed sector labels, so that [`crate::validation`] can report
//! every problem in a table before anything is converted into core types.
//! Workbook cells go through the same row deserialisation as CSV fields.

use crate::errors::{IoError, IoResult};
use crate::validation::{validate_activity, validate_factors};
use calamine::{open_workbook_auto, Reader};
use cityscale_core::activity::{ActivitySet, SectorActivity};
use cityscale_core::errors::CityScaleError;
use cityscale_core::factors::{EmissionFactor, EmissionFactorTable};
use cityscale_core::sector::SectorKind;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const ACTIVITY_COLUMNS: [&str; 2] = ["sector", "activity"];
pub const FACTOR_COLUMNS: [&str; 4] = ["sector", "co2_factor", "ch4_factor", "n2o_factor"];

/// Activity row as read from a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawActivityRow {
    pub sector: Option<String>,
    pub activity: Option<f64>,
}

/// Emission factor row as read from a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFactorRow {
    pub sector: Option<String>,
    pub co2_factor: Option<f64>,
    pub ch4_factor: Option<f64>,
    pub n2o_factor: Option<f64>,
}

/// An activity table before validation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ActivityTable {
    pub columns: Vec<String>,
    pub rows: Vec<RawActivityRow>,
}

/// A factor table before validation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FactorTable {
    pub columns: Vec<String>,
    pub rows: Vec<RawFactorRow>,
}

/// Required columns absent from `columns`
pub fn missing_columns(columns: &[String], required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|name| !columns.iter().any(|c| c == *name))
        .map(|name| name.to_string())
        .collect()
}

fn parse_sector(label: &Option<String>) -> IoResult<SectorKind> {
    match label {
        Some(label) if !label.trim().is_empty() => Ok(SectorKind::parse_label(label)?),
        _ => Err(IoError::Validation(vec![
            "Sector values cannot be empty".to_string(),
        ])),
    }
}

/// Fail with [`CityScaleError::UnknownSector`] on the first label outside the five sectors
fn check_sector_labels<'a>(labels: impl Iterator<Item = &'a Option<String>>) -> IoResult<()> {
    for label in labels.flatten() {
        if !label.trim().is_empty() {
            SectorKind::parse_label(label)?;
        }
    }
    Ok(())
}

/// Read rows of `T`, skipping them entirely when a required column is missing
fn read_table<R, T>(reader: R, required: &[&str]) -> IoResult<(Vec<String>, Vec<T>)>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_owned()).collect();
    if !missing_columns(&columns, required).is_empty() {
        return Ok((columns, Vec::new()));
    }

    let rows = reader.deserialize().collect::<Result<Vec<T>, _>>()?;
    Ok((columns, rows))
}

/// Read rows of `T` from the first sheet of a workbook. The first row holds the column names.
fn read_workbook<T>(path: &Path, required: &[&str]) -> IoResult<(Vec<String>, Vec<T>)>
where
    T: for<'de> Deserialize<'de>,
{
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook.worksheet_range_at(0).ok_or_else(|| {
        IoError::Validation(vec![format!("Workbook {} has no sheets", path.display())])
    })??;

    let mut records = range.rows().map(|row| {
        row.iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect::<StringRecord>()
    });
    let headers = records.next().unwrap_or_default();
    let columns: Vec<String> = headers.iter().map(|h| h.to_owned()).collect();
    if !missing_columns(&columns, required).is_empty() {
        return Ok((columns, Vec::new()));
    }

    let rows = records
        .map(|record| record.deserialize(Some(&headers)))
        .collect::<Result<Vec<T>, _>>()?;
    Ok((columns, rows))
}

impl ActivityTable {
    pub fn missing_columns(&self) -> Vec<String> {
        missing_columns(&self.columns, &ACTIVITY_COLUMNS)
    }

    /// Validate the table and convert it into an [`ActivitySet`].
    ///
    /// Validation errors are returned as [`IoError::Validation`]; warnings are logged.
    /// Unknown sector labels fail with [`CityScaleError::UnknownSector`].
    pub fn into_activity_set(&self) -> IoResult<ActivitySet> {
        check_sector_labels(self.rows.iter().map(|row| &row.sector))?;
        let report = validate_activity(self);
        report.log_warnings();
        if !report.is_valid() {
            return Err(IoError::Validation(report.errors));
        }

        let activities = self
            .rows
            .iter()
            .map(|row| {
                let sector = parse_sector(&row.sector)?;
                let value = row.activity.ok_or_else(|| {
                    IoError::Validation(vec![format!("Activity for {} cannot be empty", sector)])
                })?;
                Ok(SectorActivity::new(sector, value))
            })
            .collect::<IoResult<Vec<_>>>()?;

        Ok(ActivitySet::from_activities(activities)?)
    }
}

impl FactorTable {
    pub fn missing_columns(&self) -> Vec<String> {
        missing_columns(&self.columns, &FACTOR_COLUMNS)
    }

    /// Validate the table and convert it into an [`EmissionFactorTable`].
    ///
    /// For duplicated sectors the first row is used. Unknown sector labels fail with
    /// [`CityScaleError::UnknownSector`].
    pub fn into_factor_table(&self) -> IoResult<EmissionFactorTable> {
        check_sector_labels(self.rows.iter().map(|row| &row.sector))?;
        let report = validate_factors(self);
        report.log_warnings();
        if !report.is_valid() {
            return Err(IoError::Validation(report.errors));
        }

        let factors = self
            .rows
            .iter()
            .map(|row| {
                let sector = parse_sector(&row.sector)?;
                let cell = |value: Option<f64>, column: &str| {
                    value.ok_or_else(|| CityScaleError::InvalidFactor {
                        sector,
                        reason: format!("missing {}", column),
                    })
                };
                Ok(EmissionFactor::new(
                    sector,
                    cell(row.co2_factor, "co2_factor")?,
                    cell(row.ch4_factor, "ch4_factor")?,
                    cell(row.n2o_factor, "n2o_factor")?,
                ))
            })
            .collect::<IoResult<Vec<_>>>()?;

        Ok(EmissionFactorTable::from_factors(factors)?)
    }
}

pub fn read_activity_csv<R: Read>(reader: R) -> IoResult<ActivityTable> {
    let (columns, rows) = read_table(reader, &ACTIVITY_COLUMNS)?;
    Ok(ActivityTable { columns, rows })
}

pub fn read_factor_csv<R: Read>(reader: R) -> IoResult<FactorTable> {
    let (columns, rows) = read_table(reader, &FACTOR_COLUMNS)?;
    Ok(FactorTable { columns, rows })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableFormat {
    Csv,
    Excel,
}

fn table_format(path: &Path) -> IoResult<TableFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => Ok(TableFormat::Csv),
        "xlsx" | "xls" => Ok(TableFormat::Excel),
        _ => Err(IoError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Load an activity table from a `.csv`, `.xlsx` or `.xls` file
pub fn load_activity_file(path: impl AsRef<Path>) -> IoResult<ActivityTable> {
    let path = path.as_ref();
    let format = table_format(path)?;
    log::debug!("Reading activity table {}", path.display());
    match format {
        TableFormat::Csv => read_activity_csv(File::open(path)?),
        TableFormat::Excel => {
            let (columns, rows) = read_workbook(path, &ACTIVITY_COLUMNS)?;
            Ok(ActivityTable { columns, rows })
        }
    }
}

/// Load an emission factor table from a `.csv`, `.xlsx` or `.xls` file
pub fn load_factor_file(path: impl AsRef<Path>) -> IoResult<FactorTable> {
    let path = path.as_ref();
    let format = table_format(path)?;
    log::debug!("Reading factor table {}", path.display());
    match format {
        TableFormat::Csv => read_factor_csv(File::open(path)?),
        TableFormat::Excel => {
            let (columns, rows) = read_workbook(path, &FACTOR_COLUMNS)?;
            Ok(FactorTable { columns, rows })
        }
    }
}

/// Factor table from `path`, or the default table when no path is given
pub fn load_factors_or_default(path: Option<&Path>) -> IoResult<EmissionFactorTable> {
    match path {
        Some(path) => load_factor_file(path)?.into_factor_table(),
        None => Ok(EmissionFactorTable::default_table()),
    }
}

/// Activity set from manually entered values for all five sectors
pub fn manual_activity(
    residential_energy: f64,
    transport_activity: f64,
    industrial_output: f64,
    waste_activity: f64,
    grid_energy: f64,
) -> IoResult<ActivitySet> {
    Ok(ActivitySet::from_activities([
        SectorActivity::new(SectorKind::Residential, residential_energy),
        SectorActivity::new(SectorKind::Transport, transport_activity),
        SectorActivity::new(SectorKind::Industry, industrial_output),
        SectorActivity::new(SectorKind::Waste, waste_activity),
        SectorActivity::new(SectorKind::Energy, grid_energy),
    ])?)
}

/// Activity of a mid-sized sample city
pub fn synthetic_city() -> ActivitySet {
    ActivitySet::from_activities([
        SectorActivity::new(SectorKind::Residential, 1_200_000.0),
        SectorActivity::new(SectorKind::Transport, 800_000_000.0),
        SectorActivity::new(SectorKind::Industry, 450_000.0),
        SectorActivity::new(SectorKind::Waste, 180_000.0),
        SectorActivity::new(SectorKind::Energy, 2_300_000.0),
    ])
    .unwrap_or_default()
}
