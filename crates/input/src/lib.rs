//! Walker input: logical controls mapped from raw key events.
//!
//! # Invariants
//! - The simulation consumes [`Control`]s, never raw key events.
//! - Unknown keys are a no-op, never an error.
//! - Special keys (space, shift, arrows) resolve by physical key code;
//!   letters resolve by logical character, case-insensitively.

pub mod bindings;
pub mod control;
pub mod state;

pub use bindings::{Bindings, BindingsError};
pub use control::Control;
pub use state::{InputState, map_key};
