//! # coinfall-layout: payout partitioning and board layout engine.
//!
//! All monetary arithmetic is integer-only and snapped to the rounding unit.
//! Randomness is always an explicitly passed generator, so a fixed seed
//! reproduces the same layout.
//!
//! The engine works top-down in three nested splits:
//! - **Spins**: the target prize is split into a spin count derived from the
//!   wager and prize ratio ([`estimator`]).
//! - **Combinations**: each spin value is split into one to three colored
//!   combinations ([`assembler`]).
//! - **Cells**: each combination total is split into three to seven coin values
//!   placed on a connected region of the board ([`cluster`]).
//!
//! Every split is generate-and-test ([`splitter`]) and the finished layout is
//! checked bottom-up by the [`validator`].

pub mod assembler;
pub mod cluster;
pub mod engine;
pub mod estimator;
pub mod grid;
pub mod splitter;
pub mod validator;

pub use cluster::{allocate, ClusterOutcome, ClusterQuality};
pub use engine::LayoutEngine;
pub use estimator::estimate_spin_count;
pub use grid::Grid;
pub use splitter::{split, Split, SplitBounds};
pub use validator::{validate, Check, CheckKind, ValidationReport};
