//! Domain module for the Record Store
//!
//! Contains errors, value objects and invariants.

pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use errors::*;
pub use value_objects::*;
