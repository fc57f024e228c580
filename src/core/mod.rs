// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod state;

pub use error::WalkError;
pub use state::AmplitudeState;

pub mod constants;
pub use constants::walk_constants::{AMPLITUDE_CUTOFF, DEFAULT_BIASED_THETA, NORM_TOLERANCE};
