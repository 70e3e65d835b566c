//! Testing utilities for the swipedeck component.
//!
//! The harness drives a real [`swipedeck_core::SwipeDeck`] with scripted
//! pointer gestures and a manually stepped frame clock, so gesture handling,
//! classification, and animation can be verified deterministically without a
//! window system.

pub mod assertions;
pub mod robot;

pub use assertions::*;
pub use robot::*;
