//! Tween engine for the swipedeck card component.
//!
//! Provides timed (eased) and settling (spring) interpolation between two
//! values, advanced by explicit frame timestamps from the host loop.

pub mod easing;
pub mod tween;

pub use easing::Easing;
pub use tween::{
    Lerp, SpringSpec, Tween, TweenFrame, TweenMode, TweenSpec,
};
