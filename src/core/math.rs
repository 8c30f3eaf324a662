// Scalar helpers used by the charge timer, falloff curves and input thresholds

/// Clamp a value into `[0, 1]`
pub fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Linear interpolation (unclamped)
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Where `value` sits between `a` and `b`, clamped to `[0, 1]`.
/// A degenerate range reports 1.0 so callers saturate instead of dividing by zero.
pub fn inverse_lerp01(a: f32, b: f32, value: f32) -> f32 {
    let span = b - a;
    if span.abs() <= f32::EPSILON {
        return 1.0;
    }
    clamp01((value - a) / span)
}

/// Whether an axis value counts as "no input"
pub fn is_near_zero(value: f32, dead_zone: f32) -> bool {
    value.abs() <= dead_zone
}

/// Sign of an input axis, treating anything inside the dead zone as zero
pub fn axis_sign(value: f32, dead_zone: f32) -> f32 {
    if is_near_zero(value, dead_zone) {
        0.0
    } else {
        value.signum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(0.5), 0.5);
        assert_eq!(clamp01(-5.0), 0.0);
        assert_eq!(clamp01(15.0), 1.0);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(1.0, 3.0, 0.0), 1.0);
        assert_eq!(lerp(1.0, 3.0, 1.0), 3.0);
        assert_eq!(lerp(1.0, 3.0, 0.5), 2.0);
    }

    #[test]
    fn test_inverse_lerp_degenerate_range_saturates() {
        assert_eq!(inverse_lerp01(0.0, 0.0, 0.3), 1.0);
        assert_eq!(inverse_lerp01(0.0, 2.0, 1.0), 0.5);
        assert_eq!(inverse_lerp01(0.0, 2.0, 9.0), 1.0);
    }

    #[test]
    fn test_axis_sign_dead_zone() {
        assert_eq!(axis_sign(0.005, 0.01), 0.0);
        assert_eq!(axis_sign(-0.8, 0.01), -1.0);
        assert_eq!(axis_sign(0.3, 0.01), 1.0);
    }
}
