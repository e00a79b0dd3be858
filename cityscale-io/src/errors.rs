use cityscale_core::errors::CityScaleError;
use thiserror::Error;

/// Error type for loading, validating and storing data.
#[derive(Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Could not read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not read workbook: {0}")]
    Excel(#[from] calamine::Error),
    #[error("Could not read JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Could not read GeoJSON: {0}")]
    GeoJson(#[from] Box<geojson::Error>),
    #[error(transparent)]
    Core(#[from] CityScaleError),
    #[error("Unsupported file format '{0}'. Use CSV or Excel")]
    UnsupportedFormat(String),
    #[error("Invalid input: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Convenience type for `Result<T, IoError>`.
pub type IoResult<T> = Result<T, IoError>;
