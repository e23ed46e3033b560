// Scalar helpers: clamping and interpolation

use std::f32::consts::PI;

/// Clamp a value between min and max
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate between two angles (radians) along the short path.
///
/// When the two angles are more than PI apart (an atan2 result wrapping from
/// -PI to PI between ticks), the endpoint is shifted by a full turn first so
/// the blend does not sweep through zero.
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    let delta = (from - to).abs();
    let mut to = to;

    if from < to && delta > PI {
        to -= 2.0 * PI;
    } else if from > to && delta > PI {
        to += 2.0 * PI;
    }

    lerp(from, to, t)
}
