// Math utilities and helper functions

/// Check if two f32 values are approximately equal
pub fn approx_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Check if a value lies within `epsilon` of zero
pub fn near_zero(value: f32, epsilon: f32) -> bool {
    approx_equal(value, 0.0, epsilon)
}

/// Sign of a value as -1.0, 0.0 or 1.0
///
/// Unlike `f32::signum`, anything within `epsilon` of zero (including -0.0)
/// maps to 0.0.
pub fn sign_or_zero(value: f32, epsilon: f32) -> f32 {
    if near_zero(value, epsilon) {
        0.0
    } else if value > 0.0 {
        1.0
    } else {
        -1.0
    }
}
