//! Small numeric helpers shared by the engines.

use crate::errors::{CityScaleError, CityScaleResult};

/// Clamp `value` into `[minimum, maximum]`.
///
/// NaN is mapped to `minimum` so that a normalised parameter is always a real number.
pub fn clamp(value: f64, minimum: f64, maximum: f64) -> f64 {
    value.max(minimum).min(maximum)
}

/// Clamp a fraction into `[0, 1]`.
pub fn clamp_unit(value: f64) -> f64 {
    clamp(value, 0.0, 1.0)
}

/// Inclusive list of years between `start_year` and `end_year`.
pub fn year_range(start_year: i32, end_year: i32) -> CityScaleResult<Vec<i32>> {
    if end_year < start_year {
        return Err(CityScaleError::InvalidRange {
            start_year,
            end_year,
        });
    }
    Ok((start_year..=end_year).collect())
}

/// Divide, failing when the denominator is not strictly positive.
pub(crate) fn checked_ratio(
    numerator: f64,
    denominator: f64,
    quantity: &'static str,
) -> CityScaleResult<f64> {
    // `!(x > 0)` also rejects NaN
    if !(denominator > 0.0) {
        return Err(CityScaleError::DivisionDomain {
            quantity,
            value: denominator,
        });
    }
    Ok(numerator / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_unit() {
        assert_eq!(clamp_unit(-0.5), 0.0);
        assert_eq!(clamp_unit(0.3), 0.3);
        assert_eq!(clamp_unit(1.7), 1.0);
        assert_eq!(clamp_unit(f64::NAN), 0.0);
        assert_eq!(clamp_unit(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_clamp_idempotent() {
        for x in [-1e9, -1.0, -0.0, 0.0, 0.25, 0.999, 1.0, 1.5, 42.0, f64::NAN] {
            let once = clamp_unit(x);
            assert_eq!(clamp_unit(once), once, "clamp not idempotent for {}", x);
        }
    }

    #[test]
    fn test_year_range() {
        assert_eq!(year_range(2025, 2027).unwrap(), vec![2025, 2026, 2027]);
        assert_eq!(year_range(2030, 2030).unwrap(), vec![2030]);
        assert_eq!(
            year_range(2025, 2024).unwrap_err(),
            CityScaleError::InvalidRange {
                start_year: 2025,
                end_year: 2024
            }
        );
    }

    #[test]
    fn test_checked_ratio() {
        assert_eq!(checked_ratio(10.0, 4.0, "population").unwrap(), 2.5);
        assert!(matches!(
            checked_ratio(10.0, 0.0, "population"),
            Err(CityScaleError::DivisionDomain { .. })
        ));
        assert!(checked_ratio(10.0, f64::NAN, "population").is_err());
    }
}
