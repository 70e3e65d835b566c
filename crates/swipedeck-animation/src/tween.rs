//! Pull-driven tweens between two values.
//!
//! A [`Tween`] is advanced by the host loop handing it frame timestamps; each
//! tick yields the interpolated value and whether the run has finished. There
//! are no callbacks here: completion is observed through the returned frame,
//! and dropping a tween cancels it.

use log::trace;

use crate::easing::Easing;

/// Trait for values that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

/// Timed tween specification: duration plus easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
}

impl TweenSpec {
    /// Create a timed tween spec with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    /// Create a linear timed tween spec.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowIn)
    }
}

/// Spring configuration for settling tweens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Damping ratio. 1.0 = critically damped, < 1.0 = under-damped (bouncy).
    pub damping_ratio: f32,
    /// Stiffness constant. Higher values settle faster.
    pub stiffness: f32,
    /// Velocity threshold (in progress units per second) to stop.
    pub velocity_threshold: f32,
    /// Progress threshold to stop.
    pub position_threshold: f32,
}

impl SpringSpec {
    /// Critically damped spring with material-design-ish defaults.
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
        }
    }

    /// Under-damped, visibly bouncy spring.
    pub fn bouncy() -> Self {
        Self {
            damping_ratio: 0.5,
            ..Self::default_spring()
        }
    }

    /// Stiff spring (fast, no bounce).
    pub fn stiff() -> Self {
        Self {
            stiffness: 3000.0,
            ..Self::default_spring()
        }
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

/// How a tween converges on its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenMode {
    /// Fixed-duration eased interpolation.
    Timed(TweenSpec),
    /// Spring physics with no fixed duration; runs until it settles.
    Settling(SpringSpec),
}

/// One frame of tween output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TweenFrame<T> {
    /// The tween is still converging; the value is the current sample.
    Running(T),
    /// The tween reached its target; the value is exactly the target. Once
    /// finished, every further tick reports `Finished` again.
    Finished(T),
}

impl<T> TweenFrame<T> {
    /// The interpolated value carried by this frame.
    pub fn value(&self) -> &T {
        match self {
            TweenFrame::Running(value) | TweenFrame::Finished(value) => value,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, TweenFrame::Finished(_))
    }
}

/// Fixed sub-step for spring integration, ~60fps for stability.
const SPRING_TIMESTEP: f32 = 0.016;

/// An in-flight interpolation from a start value to a target value.
///
/// Both modes drive a scalar progress from 0 to 1 and map it through
/// [`Lerp`], which keeps the physics one-dimensional even for 2D values.
pub struct Tween<T: Lerp + Clone> {
    start: T,
    target: T,
    mode: TweenMode,
    start_time_nanos: Option<u64>,
    last_time_nanos: u64,
    progress: f32,
    velocity: f32,
    finished: bool,
}

impl<T: Lerp + Clone> Tween<T> {
    /// Create a tween from `start` to `target`. The clock is anchored by the
    /// first call to [`Tween::tick`].
    pub fn new(start: T, target: T, mode: TweenMode) -> Self {
        Self {
            start,
            target,
            mode,
            start_time_nanos: None,
            last_time_nanos: 0,
            progress: 0.0,
            velocity: 0.0,
            finished: false,
        }
    }

    /// The value the tween converges to.
    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn mode(&self) -> TweenMode {
        self.mode
    }

    /// Advance the tween to `now_nanos` and return the resulting frame.
    ///
    /// Timestamps are expected to be monotonically non-decreasing; a stale
    /// timestamp is treated as zero elapsed time.
    pub fn tick(&mut self, now_nanos: u64) -> TweenFrame<T> {
        if self.finished {
            return TweenFrame::Finished(self.target.clone());
        }

        let start_time = *self.start_time_nanos.get_or_insert(now_nanos);

        match self.mode {
            TweenMode::Timed(spec) => {
                let elapsed_nanos = now_nanos.saturating_sub(start_time);
                let duration_nanos = (spec.duration_millis * 1_000_000).max(1);
                let linear = (elapsed_nanos as f32 / duration_nanos as f32).clamp(0.0, 1.0);
                self.progress = spec.easing.transform(linear);
                trace!(
                    "timed tween tick: linear={:.3} eased={:.3}",
                    linear,
                    self.progress
                );

                if linear >= 1.0 {
                    self.finished = true;
                    TweenFrame::Finished(self.target.clone())
                } else {
                    TweenFrame::Running(self.start.lerp(&self.target, self.progress))
                }
            }
            TweenMode::Settling(spec) => {
                let dt = now_nanos.saturating_sub(self.last_time_nanos.max(start_time)) as f32
                    / 1_000_000_000.0;
                self.last_time_nanos = now_nanos;

                // Semi-implicit Euler on the progress scalar, sub-stepped for
                // stability. Target progress is 1.0.
                let stiffness = spec.stiffness;
                let damping = 2.0 * spec.damping_ratio * stiffness.sqrt();
                let mut integrated = 0.0f32;
                while integrated < dt {
                    let step = SPRING_TIMESTEP.min(dt - integrated);
                    let displacement = self.progress - 1.0;
                    let acceleration = -stiffness * displacement - damping * self.velocity;
                    self.velocity += acceleration * step;
                    self.progress += self.velocity * step;
                    integrated += step;
                }
                trace!(
                    "settling tween tick: progress={:.4} velocity={:.4}",
                    self.progress,
                    self.velocity
                );

                let at_rest = self.velocity.abs() < spec.velocity_threshold;
                let near_target = (self.progress - 1.0).abs() < spec.position_threshold;
                if at_rest && near_target {
                    self.finished = true;
                    TweenFrame::Finished(self.target.clone())
                } else {
                    TweenFrame::Running(
                        self.start.lerp(&self.target, self.progress.clamp(-1.0, 2.0)),
                    )
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/tween_tests.rs"]
mod tests;
