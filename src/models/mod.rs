//! Defines the data structures and models used throughout the application.
//!
//! This typically includes structures representing tweet records parsed from
//! input sources, rows stored in the database, and enrichment output values.

mod tweet;

pub use tweet::*;
