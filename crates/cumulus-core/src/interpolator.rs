//! Time-driven scalar interpolators.
//!
//! Two flavours drive every animated parameter of the demo:
//! - [`Interpolator`]: a one-shot ramp with an optional start delay, an
//!   ease-in segment and an ease-out segment. It owns its clock and is
//!   advanced with frame deltas.
//! - [`PeriodicInterpolator`]: an endless oscillation evaluated from an
//!   externally tracked elapsed time.

use crate::error::{CumulusError, Result};
use crate::math::{clamp, ease_linear, EasingFn, EPSILON};

/// Returns `(min, max)` ordered so that `min <= max`.
///
/// Inverted bounds are swapped rather than rejected so that animation never
/// stalls on a bad configuration.
#[must_use]
pub fn ordered_range(min: f32, max: f32) -> (f32, f32) {
    if max < min {
        log::debug!("swapping inverted interpolator range [{min}, {max}]");
        (max, min)
    } else {
        (min, max)
    }
}

/// Rejects ranges with `max < min`.
///
/// Used when validating user-provided configuration, where an inverted range
/// is more likely a typo than intent.
pub fn check_range(min: f32, max: f32) -> Result<()> {
    if max < min {
        return Err(CumulusError::DegenerateInterpolatorRange { min, max });
    }
    Ok(())
}

/// One-shot ramp from `min` up and back along two easing segments.
///
/// The ramp lasts `duration` seconds after an initial `delay`. The first
/// `ramp_up` seconds are shaped by the ease-in curve, the remaining
/// `duration - ramp_up` seconds by the ease-out curve. When no ramp-up is
/// given the ease-in curve spans the whole duration.
#[derive(Debug, Clone)]
pub struct Interpolator {
    min: f32,
    max: f32,
    duration: f32,
    ramp_up: Option<f32>,
    delay: f32,
    ease_in: EasingFn,
    ease_out: Option<EasingFn>,

    clock: f32,
    running: bool,
    finished: bool,
    progress: f32,
}

impl Default for Interpolator {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1.0,
            duration: 1.0,
            ramp_up: None,
            delay: 0.0,
            ease_in: ease_linear,
            ease_out: None,
            clock: 0.0,
            running: false,
            finished: false,
            progress: 0.0,
        }
    }
}

impl Interpolator {
    /// Creates a one second linear ramp between `min` and `max`.
    pub fn new(min: f32, max: f32) -> Self {
        let (min, max) = ordered_range(min, max);
        Self {
            min,
            max,
            ..Self::default()
        }
    }

    /// Sets the total ramp duration (ramp-up plus ramp-down), in seconds.
    #[must_use]
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration.max(0.0);
        self
    }

    /// Sets how long the ease-in segment lasts, in seconds.
    #[must_use]
    pub fn with_ramp_up(mut self, ramp_up: f32) -> Self {
        self.ramp_up = Some(ramp_up.max(0.0));
        self
    }

    /// Sets the idle period before the ramp starts, in seconds.
    #[must_use]
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// Sets the easing of the ramp-up segment.
    #[must_use]
    pub fn with_ease_in(mut self, ease: EasingFn) -> Self {
        self.ease_in = ease;
        self
    }

    /// Sets the easing of the ramp-down segment. Defaults to the ease-in curve.
    #[must_use]
    pub fn with_ease_out(mut self, ease: EasingFn) -> Self {
        self.ease_out = Some(ease);
        self
    }

    /// Rewinds the clock so the next [`advance`](Self::advance) restarts the ramp.
    pub fn reset(&mut self) {
        self.clock = 0.0;
        self.running = false;
        self.finished = false;
        self.progress = 0.0;
    }

    /// Advances the clock by `delta` seconds and returns the current value.
    ///
    /// While the clock is still inside the delay period the value is exactly
    /// `min`. A ramp with a zero duration (or zero ramp-up) completes
    /// immediately at `max`.
    pub fn advance(&mut self, delta: f32) -> f32 {
        let delta = delta.max(0.0);
        let duration = self.duration;
        let ramp_up = self.ramp_up_duration();

        if duration <= EPSILON || ramp_up <= EPSILON {
            self.clock = duration + self.delay;
            self.running = false;
            self.finished = true;
            self.progress = 1.0;
            return self.max;
        }

        let relative = self.clock - self.delay;
        self.clock = clamp(self.clock + delta, 0.0, duration + self.delay);

        if relative < 0.0 {
            self.running = false;
            self.progress = 0.0;
            return self.min;
        }

        self.running = true;
        let relative = self.clock - self.delay;
        let ramp_down = duration - ramp_up;
        let t = if relative < ramp_up {
            (self.ease_in)(relative / ramp_up)
        } else if ramp_down > EPSILON {
            self.ease_out()((relative - ramp_up) / ramp_down)
        } else {
            (self.ease_in)(1.0)
        };

        if relative >= duration {
            self.running = false;
            self.finished = true;
        }

        self.progress = t;
        self.min + t * (self.max - self.min)
    }

    /// Updates the bounds without touching the clock.
    pub fn set_range(&mut self, min: f32, max: f32) {
        let (min, max) = ordered_range(min, max);
        self.min = min;
        self.max = max;
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Elapsed time including the delay, clamped to `duration + delay`.
    #[must_use]
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Total ramp duration, excluding the delay.
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Start delay.
    #[must_use]
    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Effective length of the ease-in segment.
    #[must_use]
    pub fn ramp_up_duration(&self) -> f32 {
        self.ramp_up.unwrap_or(self.duration).min(self.duration)
    }

    /// Length of the ease-out segment.
    #[must_use]
    pub fn ramp_down_duration(&self) -> f32 {
        self.duration - self.ramp_up_duration()
    }

    /// Whether the last advance landed inside the ramp (past the delay, not done).
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the ramp reached its end.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether the ramp is currently playing.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.running && !self.finished
    }

    /// Eased position of the last returned value, `0` at `min` and `1` at `max`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    fn ease_out(&self) -> EasingFn {
        self.ease_out.unwrap_or(self.ease_in)
    }
}

/// Endless oscillation between `min` and `max`.
///
/// `evaluate(t) = min + clamp(ease(sin(t * speed) * 0.5 + 0.5), 0, 1) * (max - min)`
#[derive(Debug, Clone, Copy)]
pub struct PeriodicInterpolator {
    min: f32,
    max: f32,
    speed: f32,
    ease: EasingFn,
}

impl PeriodicInterpolator {
    /// Creates an oscillator with unit angular speed and linear easing.
    pub fn new(min: f32, max: f32) -> Self {
        let (min, max) = ordered_range(min, max);
        Self {
            min,
            max,
            speed: 1.0,
            ease: ease_linear,
        }
    }

    /// Sets the angular speed, in radians per second.
    #[must_use]
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Sets the easing applied to the normalized sine.
    #[must_use]
    pub fn with_ease(mut self, ease: EasingFn) -> Self {
        self.ease = ease;
        self
    }

    /// Value at `elapsed` seconds.
    #[must_use]
    pub fn evaluate(&self, elapsed: f32) -> f32 {
        let v = clamp(
            (self.ease)((elapsed * self.speed).sin() * 0.5 + 0.5),
            0.0,
            1.0,
        );
        self.min + v * (self.max - self.min)
    }

    /// Updates the bounds. There is no clock to reset.
    pub fn set_range(&mut self, min: f32, max: f32) {
        let (min, max) = ordered_range(min, max);
        self.min = min;
        self.max = max;
    }

    /// Lower bound.
    #[must_use]
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Angular speed, in radians per second.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Length of one oscillation, in seconds.
    #[must_use]
    pub fn period(&self) -> f32 {
        if self.speed.abs() <= EPSILON {
            f32::INFINITY
        } else {
            std::f32::consts::TAU / self.speed.abs()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{
        ease_quadratic, ease_quadratic_out, ease_quadratic_out_inverse, sin_norm,
    };
    use proptest::prelude::*;

    #[test]
    fn test_delay_returns_min() {
        let mut lerp = Interpolator::new(2.0, 5.0)
            .with_duration(1.0)
            .with_delay(0.5);
        assert_eq!(lerp.advance(0.1), 2.0);
        assert!(!lerp.is_running());
        assert_eq!(lerp.advance(0.1), 2.0);
        assert_eq!(lerp.advance(0.1), 2.0);
        assert!(!lerp.is_running());
        assert!(!lerp.is_finished());
    }

    #[test]
    fn test_single_large_step_finishes_at_max() {
        let mut lerp = Interpolator::new(0.0, 1.0).with_duration(2.0);
        let v = lerp.advance(2.5);
        assert!(lerp.is_finished());
        assert!(!lerp.is_running());
        assert!((v - 1.0).abs() < EPSILON);
        assert_eq!(lerp.clock(), 2.0);
    }

    #[test]
    fn test_delayed_ramp_reaches_max() {
        let mut lerp = Interpolator::new(0.0, 1.0)
            .with_duration(2.5)
            .with_delay(0.75)
            .with_ease_in(ease_quadratic);
        let step = 2.5 + 0.75 + 0.01;
        let mut v = 0.0;
        for _ in 0..3 {
            v = lerp.advance(step);
        }
        assert!(lerp.is_finished());
        assert!((v - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_ramp_up_then_down() {
        let mut lerp = Interpolator::new(0.0, 13.0)
            .with_duration(3.0)
            .with_ramp_up(1.0)
            .with_ease_in(ease_quadratic_out)
            .with_ease_out(ease_quadratic_out_inverse);
        assert_eq!(lerp.ramp_down_duration(), 2.0);

        let first = lerp.advance(0.0);
        assert_eq!(first, 0.0);
        assert!(lerp.is_running());

        let peak = lerp.advance(1.0);
        assert!((peak - 13.0).abs() < 1e-4);

        let mid = lerp.advance(1.0);
        assert!(mid > 0.0 && mid < 13.0);

        let end = lerp.advance(1.0);
        assert!(end.abs() < 1e-4);
        assert!(lerp.is_finished());
    }

    #[test]
    fn test_reset_restarts() {
        let mut lerp = Interpolator::new(0.0, 1.0).with_duration(1.0);
        lerp.advance(5.0);
        assert!(lerp.is_finished());
        lerp.reset();
        assert_eq!(lerp.clock(), 0.0);
        assert!(!lerp.is_finished());
        assert!(!lerp.is_running());
        assert!(!lerp.is_active());
        let v = lerp.advance(0.25);
        assert!((v - 0.25).abs() < 1e-6);
        assert!(lerp.is_active());
    }

    #[test]
    fn test_zero_duration_is_complete() {
        let mut lerp = Interpolator::new(1.0, 4.0).with_duration(0.0);
        assert_eq!(lerp.advance(0.0), 4.0);
        assert!(lerp.is_finished());

        let mut lerp = Interpolator::new(1.0, 4.0)
            .with_duration(2.0)
            .with_ramp_up(0.0);
        assert_eq!(lerp.advance(0.1), 4.0);
        assert!(lerp.is_finished());
        assert!(!lerp.is_running());
    }

    #[test]
    fn test_negative_delta_is_ignored() {
        let mut lerp = Interpolator::new(0.0, 1.0).with_duration(1.0);
        lerp.advance(0.5);
        lerp.advance(-10.0);
        assert_eq!(lerp.clock(), 0.5);
    }

    #[test]
    fn test_inverted_range_is_swapped() {
        let lerp = Interpolator::new(3.0, 1.0);
        assert_eq!((lerp.min(), lerp.max()), (1.0, 3.0));
        let mut periodic = PeriodicInterpolator::new(0.0, 1.0);
        periodic.set_range(2.0, -2.0);
        assert_eq!((periodic.min(), periodic.max()), (-2.0, 2.0));
        assert!(check_range(3.0, 1.0).is_err());
        assert!(check_range(1.0, 1.0).is_ok());
    }

    #[test]
    fn test_periodic_midpoint() {
        let lerp = PeriodicInterpolator::new(1.0, 3.0);
        assert!((lerp.evaluate(0.0) - 2.0).abs() < 1e-6);
        let quarter = std::f32::consts::FRAC_PI_2;
        assert!((lerp.evaluate(quarter) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_periodic_set_range_keeps_phase() {
        let mut lerp = PeriodicInterpolator::new(0.0, 1.0).with_speed(2.0);
        let before = lerp.evaluate(0.3);
        lerp.set_range(0.0, 2.0);
        assert!((lerp.evaluate(0.3) - before * 2.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn bounded_value_stays_in_range(
            min in -10.0f32..10.0,
            span in 0.0f32..10.0,
            duration in 0.1f32..5.0,
            delay in 0.0f32..2.0,
            steps in prop::collection::vec(0.0f32..0.5, 1..64),
        ) {
            let max = min + span;
            let mut lerp = Interpolator::new(min, max)
                .with_duration(duration)
                .with_delay(delay)
                .with_ease_in(ease_quadratic_out);
            for dt in steps {
                let v = lerp.advance(dt);
                prop_assert!(v >= min - 1e-4 && v <= max + 1e-4);
            }
        }

        #[test]
        fn bounded_delay_holds_min(
            delay in 0.5f32..3.0,
            steps in prop::collection::vec(0.0f32..0.05, 1..8),
        ) {
            let mut lerp = Interpolator::new(1.0, 2.0).with_delay(delay);
            for dt in steps {
                prop_assert_eq!(lerp.advance(dt), 1.0);
                prop_assert!(!lerp.is_running());
            }
        }

        #[test]
        fn periodic_is_bounded(t in -1.0e4f32..1.0e4, speed in -5.0f32..5.0) {
            let lerp = PeriodicInterpolator::new(-1.5, 4.0)
                .with_speed(speed)
                .with_ease(sin_norm);
            let v = lerp.evaluate(t);
            prop_assert!((-1.5..=4.0).contains(&v));
        }

        #[test]
        fn periodic_repeats(t in -50.0f32..50.0, speed in 0.5f32..3.0) {
            let lerp = PeriodicInterpolator::new(0.0, 1.0).with_speed(speed);
            let a = lerp.evaluate(t);
            let b = lerp.evaluate(t + lerp.period());
            prop_assert!((a - b).abs() < 1e-3);
        }
    }
}
