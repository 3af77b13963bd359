/// Rescale a reading against a `[min, max]` range
///
/// Missing readings stay missing. The result is not clamped: a reading above
/// `max` yields a fraction above 1. A zero-width range is rejected when the
/// catalog is validated, so it is not checked here.
pub fn normalize(value: Option<f64>, min: f64, max: f64) -> Option<f64> {
    value.map(|v| (v - min) / (max - min))
}

/// Linear interpolation `a * (1 - f) + b * f`, propagating missing fractions
pub fn mix(fraction: Option<f64>, a: f64, b: f64) -> Option<f64> {
    fraction.map(|f| a * (1.0 - f) + b * f)
}
