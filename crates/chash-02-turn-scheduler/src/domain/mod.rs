//! Domain module for the Turn Scheduler

pub mod errors;
pub mod invariants;
pub mod state;

pub use errors::*;
pub use state::*;
