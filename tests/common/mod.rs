//! Common test utilities module
//!
//! Provides shared fixtures for integration tests:
//! - Synthetic raw Zillow extracts with planted outliers and nulls
//! - Scratch directories for file round-trips

#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::{raw_zillow_table, scratch_dir, write_raw_csv, RAW_ROWS};
