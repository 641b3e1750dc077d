//! Temporal stabilization for a noisy per-frame hand gesture classifier.
//!
//! [`GestureEngine::update`] takes the current hand landmarks (or `None`) and
//! the host clock, and returns the [`RenderParams`] for that frame.

pub mod config;
pub mod engine;
pub mod gestures;
pub mod landmarks;
pub mod params;
pub mod replay;
pub mod stabilizer;
pub mod trace;

pub use engine::GestureEngine;
pub use gestures::{FrameGate, GestureLabel, classify};
pub use landmarks::{HandLandmarks, Landmark, LandmarkError};
pub use params::{RenderParams, map_to_params};
pub use stabilizer::{Millis, StabilizationState, StepReport};
