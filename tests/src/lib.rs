//! # CHASH Test Suite
//!
//! Unified test crate for behaviour that spans the record store, the turn
//! scheduler and the runtime.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── scenarios.rs   # End-to-end runs from command text to results
//!     ├── ordering.rs    # Total order, liveness and per-worker event order
//!     └── event_log.rs   # hash.log contents of a real run
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p chash-tests
//! cargo test -p chash-tests integration::ordering::
//! ```

pub mod integration;
