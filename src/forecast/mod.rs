//! Caller-side assembly of optimiser inputs from separate forecast feeds.

pub mod join;

pub use join::*;
