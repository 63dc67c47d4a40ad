//! Platform layer
//!
//! Handles what sits between a host and the simulation:
//! - Control sources (keyboard accumulator, demo autopilot)
//! - Browser bindings (wasm32 only)

pub mod input;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use input::{Autopilot, Direction, KeyboardControl};
