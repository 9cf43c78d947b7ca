//! Cross-crate test suite for Coinfall.
//!
//! Property tests drive the engine with arbitrary valid configurations and
//! seeds and check every layout invariant; end-to-end tests cover the
//! reference configurations and the planner trait seam.

pub mod helpers;
