//! Scalar helpers and easing curves.
//!
//! Easing functions map a normalized position to a normalized value. They are
//! plain `fn(f32) -> f32` so interpolators can store them by value.

use glam::Vec3;

/// Tolerance used for float comparisons and degenerate-duration checks.
pub const EPSILON: f32 = 0.000_001;

/// Half of pi.
pub const PI_OVER_2: f32 = std::f32::consts::FRAC_PI_2;

/// Signature shared by every easing curve.
pub type EasingFn = fn(f32) -> f32;

/// Clamps `v` into `[min, max]`.
///
/// Unlike [`f32::clamp`] this never panics when the bounds are inverted; it
/// then returns `max`.
#[must_use]
pub fn clamp(v: f32, min: f32, max: f32) -> f32 {
    v.max(min).min(max)
}

/// Linear interpolation between `a` and `b`.
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly blends two linear-space colors.
#[must_use]
pub fn lerp_color(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    from + (to - from) * t
}

/// Identity easing.
#[must_use]
pub fn ease_linear(t: f32) -> f32 {
    t
}

/// Quadratic ease-in: `t²`.
#[must_use]
pub fn ease_quadratic(t: f32) -> f32 {
    t * t
}

/// Quadratic ease-out: `t * (2 - t)`.
#[must_use]
pub fn ease_quadratic_out(t: f32) -> f32 {
    t * (2.0 - t)
}

/// Mirror of [`ease_quadratic_out`], falling from 1 to 0.
#[must_use]
pub fn ease_quadratic_out_inverse(t: f32) -> f32 {
    1.0 - ease_quadratic_out(t)
}

/// Sine remapped to `[0, 1]`.
#[must_use]
pub fn sin_norm(t: f32) -> f32 {
    t.sin() * 0.5 + 0.5
}

/// Point on a sphere of radius `radius` for the angles `theta` (azimuth,
/// around +Y) and `phi` (polar, from +Y).
#[must_use]
pub fn spherical_to_cartesian(theta: f32, phi: f32, radius: f32) -> Vec3 {
    let sin_phi = phi.sin();
    Vec3::new(
        radius * sin_phi * theta.sin(),
        radius * phi.cos(),
        radius * sin_phi * theta.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp_inverted_bounds() {
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
        assert_eq!(clamp(-3.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.5, 1.0, 0.0), 0.0);
    }

    #[test]
    fn test_easing_endpoints() {
        for ease in [ease_linear, ease_quadratic, ease_quadratic_out] {
            assert!(ease(0.0).abs() < EPSILON);
            assert!((ease(1.0) - 1.0).abs() < EPSILON);
        }
        assert!((ease_quadratic_out_inverse(0.0) - 1.0).abs() < EPSILON);
        assert!(ease_quadratic_out_inverse(1.0).abs() < EPSILON);
        assert!((sin_norm(0.0) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_lerp_color() {
        let c = lerp_color(Vec3::ZERO, Vec3::new(1.0, 0.5, 0.25), 0.5);
        assert_eq!(c, Vec3::new(0.5, 0.25, 0.125));
    }

    #[test]
    fn test_spherical_poles() {
        let up = spherical_to_cartesian(0.0, 0.0, 2.0);
        assert!((up - Vec3::new(0.0, 2.0, 0.0)).length() < 1e-5);
        let front = spherical_to_cartesian(0.0, PI_OVER_2, 1.0);
        assert!((front - Vec3::Z).length() < 1e-5);
    }

    proptest! {
        #[test]
        fn ease_out_stays_in_unit_range(t in 0.0f32..=1.0) {
            let v = ease_quadratic_out(t);
            prop_assert!((0.0..=1.0 + 1e-6).contains(&v));
        }

        #[test]
        fn ease_out_is_monotonic(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(ease_quadratic_out(lo) <= ease_quadratic_out(hi) + 1e-6);
        }

        #[test]
        fn sin_norm_in_unit_range(t in -1.0e4f32..1.0e4) {
            let v = sin_norm(t);
            prop_assert!((0.0..=1.0 + 1e-6).contains(&v));
        }
    }
}
