//! Python bindings
//!
//! Inputs and outputs cross the boundary as plain dicts and lists using the same
//! field names as the serialized Rust types, so a Python front end can build a
//! request with literals and hand the result straight to its charting code.

use cityscale_core::activity::ActivitySet;
use cityscale_core::emissions::EmissionsEngine;
use cityscale_core::factors::EmissionFactorTable;
use cityscale_core::forecast::ForecastYearRecord;
use cityscale_core::parameters::{GwpConstants, UrbanFormParameters};
use cityscale_core::simulation::{self, RunRequest};
use cityscale_core::urban_form::UrbanFormEngine;
use numpy::PyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pythonize::{depythonize_bound, pythonize};
use serde::de::DeserializeOwned;

fn value_error(err: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn from_python<T: DeserializeOwned>(obj: Bound<'_, PyAny>) -> PyResult<T> {
    depythonize_bound(obj).map_err(value_error)
}

/// Run the full pipeline for a request dict and return the run bundle as a dict.
#[pyfunction]
fn run_pipeline(py: Python<'_>, request: Bound<'_, PyAny>) -> PyResult<PyObject> {
    let request: RunRequest = from_python(request)?;
    let bundle = simulation::run_pipeline(&request).map_err(value_error)?;
    pythonize(py, &bundle).map_err(value_error)
}

/// Sector emissions for a `{sector: activity}` dict.
///
/// The default factor table and GWP values are used when not supplied.
#[pyfunction]
#[pyo3(signature = (activity, factors=None, gwp=None))]
fn compute_sector_emissions(
    py: Python<'_>,
    activity: Bound<'_, PyAny>,
    factors: Option<Bound<'_, PyAny>>,
    gwp: Option<Bound<'_, PyAny>>,
) -> PyResult<PyObject> {
    let activity: ActivitySet = from_python(activity)?;
    let factors: EmissionFactorTable = match factors {
        Some(factors) => from_python(factors)?,
        None => EmissionFactorTable::default_table(),
    };
    let gwp: GwpConstants = match gwp {
        Some(gwp) => from_python(gwp)?,
        None => GwpConstants::default(),
    };

    let results = EmissionsEngine::from_parameters(gwp)
        .compute_sectors(&activity, &factors)
        .map_err(value_error)?;
    pythonize(py, &results).map_err(value_error)
}

/// Urban form modifiers for `{density, compactness, transit_access}`.
#[pyfunction]
fn urban_modifiers(py: Python<'_>, params: Bound<'_, PyAny>) -> PyResult<PyObject> {
    let params: UrbanFormParameters = from_python(params)?;
    pythonize(py, &UrbanFormEngine::compute_modifiers(&params)).map_err(value_error)
}

/// Total CO2e per year of a forecast (list of year records) as a numpy array.
#[pyfunction]
fn total_co2e_series<'py>(
    py: Python<'py>,
    records: Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let records: Vec<ForecastYearRecord> = from_python(records)?;
    let totals: Vec<f64> = records
        .iter()
        .map(|record| record.aggregate.total_co2e)
        .collect();
    Ok(PyArray1::from_vec_bound(py, totals))
}

#[pymodule]
#[pyo3(name = "_lib")]
fn cityscale(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_function(wrap_pyfunction!(run_pipeline, m)?)?;
    m.add_function(wrap_pyfunction!(compute_sector_emissions, m)?)?;
    m.add_function(wrap_pyfunction!(urban_modifiers, m)?)?;
    m.add_function(wrap_pyfunction!(total_co2e_series, m)?)?;
    Ok(())
}
