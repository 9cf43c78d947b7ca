//! # coinfall-core
//! Foundation types and traits for Coinfall payout layouts.

pub mod config;
pub mod constants;
pub mod error;
pub mod rounding;
pub mod traits;
pub mod types;
