//! Shared types for the scene walker.
//!
//! # Invariants
//! - Types here carry no behavior beyond construction; all simulation logic
//!   lives in `walker-sim`.

pub mod pose;

pub use pose::CameraPose;
