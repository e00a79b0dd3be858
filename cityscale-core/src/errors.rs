use crate::sector::SectorKind;
use thiserror::Error;

/// Error type for invalid inputs reaching the computation pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CityScaleError {
    #[error("Activity for sector {sector} must be non-negative, got {value}")]
    InvalidActivity { sector: SectorKind, value: f64 },
    #[error("Invalid emission factor for sector {sector}: {reason}")]
    InvalidFactor { sector: SectorKind, reason: String },
    #[error("Unknown sector label '{0}'. Expected one of residential, transport, industry, waste, energy")]
    UnknownSector(String),
    #[error("Cannot divide by {quantity}: denominator must be positive, got {value}")]
    DivisionDomain { quantity: &'static str, value: f64 },
    #[error("Invalid forecast range: end year {end_year} is before start year {start_year}")]
    InvalidRange { start_year: i32, end_year: i32 },
    #[error("Year range {start_year}-{end_year} is outside the forecast horizon {min_year}-{max_year}")]
    YearOutsideHorizon {
        start_year: i32,
        end_year: i32,
        min_year: i32,
        max_year: i32,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenience type for `Result<T, CityScaleError>`.
pub type CityScaleResult<T> = Result<T, CityScaleError>;
