use crate::utils::constants::{HUE_HIGH, HUE_LOW};
use crate::utils::scaling::mix;

/// Convert an HSV triple to 8-bit RGB
///
/// `hue` is in degrees and wraps modulo 360, so 360.0 maps to the same color
/// as 0.0. `saturation` and `value` are expected in [0, 1]; each channel is
/// scaled by 255 and floored.
///
/// # Examples
/// ```
/// use amedas_processor::utils::hsv_to_rgb;
///
/// assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), [0, 255, 0]);
/// ```
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> [u8; 3] {
    let hue = if hue >= 360.0 || hue < 0.0 {
        hue.rem_euclid(360.0)
    } else {
        hue
    };
    // rem_euclid can round a tiny negative input up to exactly 360.0
    let hue = if hue >= 360.0 { 0.0 } else { hue };

    let sector = (hue / 60.0).floor();
    let f = hue / 60.0 - sector;

    let p = value * (1.0 - saturation);
    let q = value * (1.0 - saturation * f);
    let t = value * (1.0 - saturation * (1.0 - f));

    let (r, g, b) = match sector as i64 % 6 {
        0 => (value, t, p),
        1 => (q, value, p),
        2 => (p, value, t),
        3 => (p, q, value),
        4 => (t, p, value),
        _ => (value, p, q),
    };

    [to_channel(r), to_channel(g), to_channel(b)]
}

fn to_channel(x: f64) -> u8 {
    // `as` saturates out-of-range floats at the u8 bounds
    (x * 255.0).floor() as u8
}

/// Blue-to-red ramp used by every catalog entry
///
/// A fraction of 0 maps to blue (240°), 1 to red (0°), interpolated linearly
/// in hue at full saturation and value.
pub fn hue_ramp(fraction: f64) -> [u8; 3] {
    let hue = mix(Some(fraction), HUE_LOW, HUE_HIGH).unwrap_or(HUE_LOW);
    hsv_to_rgb(hue, 1.0, 1.0)
}

/// Attach an alpha channel to an RGB triple
pub fn with_alpha(rgb: [u8; 3], alpha: u8) -> [u8; 4] {
    [rgb[0], rgb[1], rgb[2], alpha]
}
