//! Data models for Waterline
//!
//! Core data structures shared across the engine: drink categories,
//! logged entries, and the category filter applied to every rollup.

pub mod category;
pub mod entry;

pub use category::*;
pub use entry::*;
