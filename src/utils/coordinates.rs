use crate::error::{ProcessingError, Result};

/// Convert a `[degrees, minutes]` pair to decimal degrees
///
/// The sign of the degrees component applies to the whole coordinate.
///
/// # Examples
/// ```
/// use amedas_processor::utils::dm_to_decimal;
///
/// let decimal = dm_to_decimal(135.0, 30.0).unwrap();
/// assert!((decimal - 135.5).abs() < 0.000001);
/// ```
pub fn dm_to_decimal(degrees: f64, minutes: f64) -> Result<f64> {
    if !degrees.is_finite() || !minutes.is_finite() {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Non-finite coordinate: [{}, {}]",
            degrees, minutes
        )));
    }

    if !(0.0..60.0).contains(&minutes) {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Minutes must be between 0 and 60, got: {}",
            minutes
        )));
    }

    let decimal_value = degrees.abs() + minutes / 60.0;

    if degrees.is_sign_negative() {
        Ok(-decimal_value)
    } else {
        Ok(decimal_value)
    }
}

/// Parse a JSON-style `[degrees, minutes]` slice
pub fn parse_dm_pair(pair: &[f64]) -> Result<f64> {
    match pair {
        [degrees, minutes] => dm_to_decimal(*degrees, *minutes),
        _ => Err(ProcessingError::InvalidCoordinate(format!(
            "Expected [degrees, minutes], got {} components",
            pair.len()
        ))),
    }
}

/// Validate coordinate bounds for a longitude/latitude pair
pub fn validate_coordinates(longitude: f64, latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Latitude {} is outside [-90, 90]",
            latitude
        )));
    }

    if !(-180.0..=180.0).contains(&longitude) {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Longitude {} is outside [-180, 180]",
            longitude
        )));
    }

    Ok(())
}
